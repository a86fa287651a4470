// Terminal multiplexer pane used to run commands next to the editor

use tracing::{info, warn};

use crate::config::MultiplexerConfig;
use crate::error::{ProcessError, Result};
use crate::process::ShellRunner;

const PANE_FORMAT: &str = "#{session_name}:#{window_index}.#{pane_index}";

/// tmux session handle. Every call is a blocking shell invocation.
pub struct Multiplexer<R: ShellRunner> {
    program: String,
    session: String,
    runner: R,
}

impl<R: ShellRunner> Multiplexer<R> {
    pub fn new(config: &MultiplexerConfig, runner: R) -> Self {
        Self {
            program: config.program.clone(),
            session: config.session.clone(),
            runner,
        }
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    fn tmux(&self, args: &[&str]) -> Result<String> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.runner.run(&self.program, &args)
    }

    /// Names of running sessions
    pub fn sessions(&self) -> Result<Vec<String>> {
        let output = self.tmux(&["list-sessions", "-F", "#{session_name}"])?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Target of the session's first pane, if the session is running
    pub fn pane_target(&self) -> Result<String> {
        let output = self.tmux(&["list-panes", "-s", "-t", &self.session, "-F", PANE_FORMAT])?;
        output
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                ProcessError::EmptyOutput {
                    command: format!("{} list-panes -t {}", self.program, self.session),
                }
                .into()
            })
    }

    /// Detached session creation; returns the new pane target
    pub fn create_session(&self) -> Result<String> {
        info!(session = %self.session, "Creating multiplexer session");
        let output = self.tmux(&[
            "new-session",
            "-d",
            "-s",
            &self.session,
            "-P",
            "-F",
            PANE_FORMAT,
        ])?;
        if output.is_empty() {
            Ok(format!("{}:0.0", self.session))
        } else {
            Ok(output)
        }
    }

    /// Existing pane target, falling back to creating the session when the
    /// lookup fails or comes back empty
    pub fn ensure_pane(&self) -> Result<String> {
        match self.pane_target() {
            Ok(target) => Ok(target),
            Err(e) => {
                warn!(session = %self.session, error = %e, "No pane found, creating session");
                self.create_session()
            }
        }
    }

    /// Type `command` into the pane and press Enter
    pub fn send(&self, command: &str) -> Result<String> {
        let target = self.ensure_pane()?;
        self.tmux(&["send-keys", "-t", &target, command, "Enter"])?;
        Ok(target)
    }

    /// Shell command that attaches a terminal to the session
    pub fn attach_command(&self) -> String {
        format!("{} attach-session -t {}", self.program, self.session)
    }
}

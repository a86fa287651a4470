// Synchronous shell invocations with captured, trimmed output

use std::process::{Command, Stdio};
use std::time::Instant;

use tracing::debug;

use crate::error::{ProcessError, Result};

/// Runs an external program to completion and returns its trimmed stdout
pub trait ShellRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<String>;
}

/// Runner backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShellRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<String> {
        crate::logging::utils::log_shell_command(program, args);

        let executable = which::which(program).map_err(|_| ProcessError::CommandNotFound {
            command: program.to_string(),
            suggestion: Some(format!("Install {program} or make sure it is on PATH")),
        })?;

        let mut cmd = Command::new(executable);
        cmd.args(args).stdin(Stdio::null());

        let start = Instant::now();
        let output = cmd.output().map_err(|e| ProcessError::SpawnFailed {
            command: program.to_string(),
            error: e.to_string(),
        })?;

        debug!(
            program = %program,
            status = ?output.status.code(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Shell command finished"
        );

        if !output.status.success() {
            return Err(ProcessError::ExecutionFailed {
                command: format!("{program} {}", args.join(" ")),
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

// Current path to clipboard

use std::path::{Path, PathBuf};

use crate::editor::{EditorHost, NotifyLevel};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct CopyPathConfig {
    pub path: PathBuf,
    /// Directory relative paths are computed against
    pub cwd: PathBuf,
    /// Append `:<line>` when set
    pub line: Option<usize>,
    /// Always use the absolute path
    pub absolute: bool,
}

/// Path relative to `cwd` when `path` lies beneath it, else absolute
pub fn display_path(path: &Path, cwd: &Path, absolute: bool) -> String {
    let full = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    if !absolute {
        if let Ok(relative) = full.strip_prefix(cwd) {
            if !relative.as_os_str().is_empty() {
                return relative.display().to_string();
            }
        }
    }
    full.display().to_string()
}

pub fn execute_copy_path_command(
    host: &mut dyn EditorHost,
    config: &CopyPathConfig,
) -> Result<String> {
    let mut text = display_path(&config.path, &config.cwd, config.absolute);
    if let Some(line) = config.line {
        text.push_str(&format!(":{line}"));
    }

    host.set_clipboard(&text)?;
    host.notify(NotifyLevel::Info, &format!("Copied {text}"));
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::RecordingHost;

    #[test]
    fn test_relative_inside_cwd() {
        assert_eq!(
            display_path(Path::new("/proj/src/lib.rs"), Path::new("/proj"), false),
            "src/lib.rs"
        );
    }

    #[test]
    fn test_absolute_outside_cwd() {
        assert_eq!(
            display_path(Path::new("/etc/hosts"), Path::new("/proj"), false),
            "/etc/hosts"
        );
    }

    #[test]
    fn test_relative_input_is_joined() {
        assert_eq!(
            display_path(Path::new("src/lib.rs"), Path::new("/proj"), true),
            "/proj/src/lib.rs"
        );
    }

    #[test]
    fn test_copy_with_line() {
        let mut host = RecordingHost::new();
        let config = CopyPathConfig {
            path: PathBuf::from("/proj/src/main.rs"),
            cwd: PathBuf::from("/proj"),
            line: Some(42),
            absolute: false,
        };
        let text = execute_copy_path_command(&mut host, &config).unwrap();
        assert_eq!(text, "src/main.rs:42");
        assert_eq!(host.clipboard.as_deref(), Some("src/main.rs:42"));
    }
}

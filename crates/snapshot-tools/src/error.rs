use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to start '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' failed with {status}{}", stderr_suffix(.stderr))]
    NonZeroExit {
        command: String,
        status: ExitStatusText,
        stderr: String,
    },

    #[error("'{program}' is not installed or not on PATH")]
    NotInstalled {
        program: String,
        #[source]
        source: which::Error,
    },

    #[error("'{command}' produced output that is not valid UTF-8")]
    InvalidUtf8 {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Human-readable rendering of a process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatusText(pub Option<i32>);

impl std::fmt::Display for ExitStatusText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(code) => write!(f, "exit code {code}"),
            None => write!(f, "a signal"),
        }
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_zero_exit_includes_trimmed_stderr() {
        let error = ToolError::NonZeroExit {
            command: "git merge main".to_string(),
            status: ExitStatusText(Some(1)),
            stderr: "CONFLICT (content)\n".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "'git merge main' failed with exit code 1: CONFLICT (content)"
        );
    }

    #[test]
    fn non_zero_exit_without_stderr() {
        let error = ToolError::NonZeroExit {
            command: "quilt push".to_string(),
            status: ExitStatusText(None),
            stderr: String::new(),
        };

        assert_eq!(error.to_string(), "'quilt push' failed with a signal");
    }
}

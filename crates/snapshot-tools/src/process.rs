use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::ExitStatusText;
use crate::{Result, ToolError};

/// A single external command: program, arguments and extra environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl Invocation {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// The command line as an operator would type it.
    #[must_use]
    pub fn command_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// What a finished command reported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    #[must_use]
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// # Errors
    ///
    /// Returns [`ToolError::NonZeroExit`] unless the command exited with 0.
    pub fn checked(self, invocation: &Invocation) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ToolError::NonZeroExit {
                command: invocation.command_line(),
                status: ExitStatusText(self.code),
                stderr: self.stderr,
            })
        }
    }
}

/// The single capability every tool front-end goes through.
pub trait CommandRunner: Send + Sync {
    /// Runs the command to completion. A non-zero exit is not an error at
    /// this level; callers decide what each exit code means.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be started or its output
    /// cannot be decoded.
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;
}

/// Runs commands for real, inside the packaging root.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    root: PathBuf,
}

impl SystemRunner {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        debug!(command = %invocation, cwd = %self.root.display(), "running");

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(invocation.env.iter().map(|(k, v)| (k, v)))
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ToolError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        let decode = |bytes: Vec<u8>| {
            String::from_utf8(bytes).map_err(|source| ToolError::InvalidUtf8 {
                command: invocation.command_line(),
                source,
            })
        };

        let result = CommandOutput {
            code: output.status.code(),
            stdout: decode(output.stdout)?,
            stderr: decode(output.stderr)?,
        };
        debug!(command = %invocation, code = ?result.code, "finished");
        Ok(result)
    }
}

/// Checks that every program is on `PATH`.
///
/// # Errors
///
/// Returns [`ToolError::NotInstalled`] for the first missing program.
pub fn ensure_available(programs: &[&str]) -> Result<()> {
    for program in programs {
        let path = which::which(program).map_err(|source| ToolError::NotInstalled {
            program: (*program).to_string(),
            source,
        })?;
        debug!(program, path = %path.display(), "found tool");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_quotes_arguments_with_whitespace() {
        let invocation = Invocation::new("git")
            .arg("commit")
            .arg("-m")
            .arg("refresh patches against main")
            .arg("");

        assert_eq!(
            invocation.command_line(),
            "git commit -m 'refresh patches against main' ''"
        );
    }

    #[test]
    fn checked_passes_success_through() -> anyhow::Result<()> {
        let invocation = Invocation::new("true");
        let output = CommandOutput::success("out").checked(&invocation)?;
        assert_eq!(output.stdout, "out");
        Ok(())
    }

    #[test]
    fn checked_turns_failure_into_error() {
        let invocation = Invocation::new("git").arg("describe");

        let result = CommandOutput::failure(128, "fatal: no names").checked(&invocation);

        assert!(matches!(
            result,
            Err(ToolError::NonZeroExit { command, status: ExitStatusText(Some(128)), .. })
                if command == "git describe"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_captures_output_and_env() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let runner = SystemRunner::new(dir.path());
        let invocation = Invocation::new("sh")
            .arg("-c")
            .arg("printf '%s' \"$GREETING\"; pwd >&2; exit 3")
            .env("GREETING", "hello");

        let output = runner.run(&invocation)?;

        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout, "hello");
        assert_eq!(
            std::path::Path::new(output.stderr.trim()).canonicalize()?,
            dir.path().canonicalize()?
        );
        Ok(())
    }

    #[test]
    fn system_runner_reports_missing_program() {
        let runner = SystemRunner::new(".");

        let result = runner.run(&Invocation::new("definitely-not-a-real-program-xyz"));

        assert!(matches!(result, Err(ToolError::Spawn { .. })));
    }

    #[test]
    fn ensure_available_rejects_missing_program() {
        let result = ensure_available(&["definitely-not-a-real-program-xyz"]);

        assert!(matches!(result, Err(ToolError::NotInstalled { .. })));
    }
}

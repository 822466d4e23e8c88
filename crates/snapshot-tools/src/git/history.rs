use crate::error::ExitStatusText;
use crate::{Result, ToolError};

use super::Git;

impl Git {
    /// # Errors
    ///
    /// Returns an error if `commitish` cannot be resolved.
    pub fn rev_parse_short(&self, commitish: &str) -> Result<String> {
        let output = self.run_checked(&Self::invocation(["rev-parse", "--short=8", commitish]))?;
        Ok(output.stdout.trim().to_string())
    }

    /// # Errors
    ///
    /// Returns an error if HEAD cannot be resolved.
    pub fn current_branch(&self) -> Result<String> {
        let output = self.run_checked(&Self::invocation(["rev-parse", "--abbrev-ref", "HEAD"]))?;
        Ok(output.stdout.trim().to_string())
    }

    /// Whether `ancestor` is reachable from `descendant`.
    ///
    /// # Errors
    ///
    /// Returns an error for exit codes other than 0 (yes) and 1 (no), which
    /// git uses for unknown commits.
    pub fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool> {
        let invocation =
            Self::invocation(["merge-base", "--is-ancestor", ancestor, descendant]);
        let output = self.run(&invocation)?;
        match output.code {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            code => Err(ToolError::NonZeroExit {
                command: invocation.command_line(),
                status: ExitStatusText(code),
                stderr: output.stderr,
            }),
        }
    }

    /// Number of parents of `revision`; more than one means a merge commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be printed.
    pub fn parent_count(&self, revision: &str) -> Result<usize> {
        let output = self.run_checked(&Self::invocation(["cat-file", "-p", revision]))?;
        Ok(output
            .stdout
            .lines()
            .take_while(|line| !line.is_empty())
            .filter(|line| line.starts_with("parent "))
            .count())
    }

    /// Full log text for `range`, e.g. `HEAD~3..HEAD`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is invalid.
    pub fn log(&self, range: &str) -> Result<String> {
        let output = self.run_checked(&Self::invocation(["log", range]))?;
        Ok(output.stdout)
    }
}

use crate::Result;

use super::Git;

impl Git {
    /// Names `commitish` relative to the nearest tag, e.g. `23.1-12-g0cb0b80f`.
    ///
    /// Returns `None` when git cannot describe it, which is how an unknown
    /// ref or a ref without any reachable tag shows up.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be run.
    pub fn describe(&self, commitish: &str) -> Result<Option<String>> {
        let output = self.run(&Self::invocation(["describe", "--abbrev=8", commitish]))?;
        if output.is_success() {
            Ok(Some(output.stdout.trim().to_string()))
        } else {
            Ok(None)
        }
    }

    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    pub fn fetch(&self, remote: &str) -> Result<()> {
        self.run_checked(&Self::invocation(["fetch", remote]))?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`crate::ToolError::NonZeroExit`] if the merge stops, e.g. on
    /// conflicts.
    pub fn merge(&self, commitish: &str, message: &str) -> Result<()> {
        self.run_checked(&Self::invocation(["merge", commitish, "-m", message]))?;
        Ok(())
    }
}

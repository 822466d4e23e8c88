use crate::Result;

use super::Git;

impl Git {
    /// # Errors
    ///
    /// Returns an error if staging fails.
    pub fn add(&self, paths: &[&str]) -> Result<()> {
        let mut args = vec!["add"];
        args.extend_from_slice(paths);
        self.run_checked(&Self::invocation(args))?;
        Ok(())
    }

    /// Commits what is staged. Hooks are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    pub fn commit(&self, message: &str) -> Result<()> {
        self.commit_paths(message, &[])
    }

    /// Commits the current content of `paths` only. Hooks are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    pub fn commit_paths(&self, message: &str, paths: &[&str]) -> Result<()> {
        let mut args = vec!["commit", "--no-verify", "-m", message];
        args.extend_from_slice(paths);
        self.run_checked(&Self::invocation(args))?;
        Ok(())
    }

    /// Paths under `path` that differ from the index.
    ///
    /// # Errors
    ///
    /// Returns an error if the diff cannot be computed.
    pub fn diff_name_only(&self, path: &str) -> Result<Vec<String>> {
        let output = self.run_checked(&Self::invocation(["diff", "--name-only", path]))?;
        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

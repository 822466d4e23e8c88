use crate::Result;

pub trait GitProvider: Send + Sync {
    /// `None` when git cannot name the commitish.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be run.
    fn describe(&self, commitish: &str) -> Result<Option<String>>;

    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    fn fetch(&self, remote: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the merge stops.
    fn merge(&self, commitish: &str, message: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the commitish cannot be resolved.
    fn short_hash(&self, commitish: &str) -> Result<String>;

    /// # Errors
    ///
    /// Returns an error if ancestry cannot be determined.
    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if the revision cannot be read.
    fn parent_count(&self, revision: &str) -> Result<usize>;

    /// # Errors
    ///
    /// Returns an error if the range is invalid.
    fn log(&self, range: &str) -> Result<String>;

    /// # Errors
    ///
    /// Returns an error if HEAD cannot be resolved.
    fn current_branch(&self) -> Result<String>;

    /// Paths below `path` with unstaged changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the diff fails.
    fn changed_files(&self, path: &str) -> Result<Vec<String>>;

    /// # Errors
    ///
    /// Returns an error if staging fails.
    fn stage(&self, paths: &[&str]) -> Result<()>;

    /// Commits the index.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    fn commit(&self, message: &str) -> Result<()>;

    /// Commits the given paths only.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    fn commit_paths(&self, message: &str, paths: &[&str]) -> Result<()>;
}

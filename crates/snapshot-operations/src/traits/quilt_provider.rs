use crate::Result;

pub trait QuiltProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if quilt cannot be run.
    fn next_patch(&self) -> Result<Option<String>>;

    /// # Errors
    ///
    /// Returns an error if the patch does not apply.
    fn push(&self) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the top patch cannot be refreshed.
    fn refresh(&self) -> Result<()>;

    /// Exit code of `quilt pop -a`.
    ///
    /// # Errors
    ///
    /// Returns an error if quilt cannot be run.
    fn pop_all(&self) -> Result<Option<i32>>;
}

use crate::Result;

/// The quilt patch directory on disk.
pub trait PatchStore: Send + Sync {
    /// Repository-relative path of the patch directory.
    fn patches_dir(&self) -> &str;

    /// File names of cherry-pick patches (`cpick-<hash>-…`), sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    fn cherry_picks(&self) -> Result<Vec<String>>;

    /// Drops `name` from the series file, leaving every other line as is.
    ///
    /// # Errors
    ///
    /// Returns an error if the series file cannot be rewritten.
    fn remove_from_series(&self, name: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the patch file cannot be deleted.
    fn remove_patch(&self, name: &str) -> Result<()>;
}

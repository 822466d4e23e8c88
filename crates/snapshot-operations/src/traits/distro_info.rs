use crate::Result;

pub trait DistroInfoProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the release data cannot be queried.
    fn devel_series(&self) -> Result<Option<String>>;

    /// # Errors
    ///
    /// Returns an error if the release data cannot be queried.
    fn stable_release(&self) -> Result<String>;
}

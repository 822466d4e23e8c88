use snapshot_core::BugNumber;

use crate::Result;

/// Questions the workflow cannot answer from the repository alone.
pub trait InteractionProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the question cannot be asked.
    fn confirm_first_devel_upload(&self, devel_series: &str, changelog_series: &str)
    -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if the question cannot be asked.
    fn confirm_first_sru(&self, devel_series: &str, changelog_series: &str) -> Result<bool>;

    /// `None` when the operator chooses not to reference a bug.
    ///
    /// # Errors
    ///
    /// Returns an error if the question cannot be asked or the answer is not
    /// a bug number.
    fn sru_bug(&self) -> Result<Option<BugNumber>>;
}

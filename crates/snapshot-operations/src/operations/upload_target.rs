use snapshot_changelog::ChangelogDetails;
use snapshot_core::{BugNumber, UploadTarget};
use tracing::info;

use crate::traits::{ChangelogReader, DistroInfoProvider, InteractionProvider};
use crate::{OperationError, Result};

/// Shown when `distro-info` cannot name the development series.
pub const UNKNOWN_SERIES: &str = "UNKNOWN";

/// What the operator said on the command line about the upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadFlags {
    pub first_devel_upload: bool,
    pub first_sru: bool,
}

impl UploadFlags {
    /// # Errors
    ///
    /// Returns `OperationError::ConflictingUploadFlags` if both flags are set.
    pub fn validate(self) -> Result<Self> {
        if self.first_devel_upload && self.first_sru {
            return Err(OperationError::ConflictingUploadFlags);
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDecision {
    pub target: UploadTarget,
    /// Current development series, or [`UNKNOWN_SERIES`].
    pub devel_series: String,
}

/// Decides whether the snapshot goes to the development series or is a
/// stable release update.
///
/// Flags win. Without flags, a version that already carries a series
/// suffix is an SRU. Otherwise the snapshot targets devel unless the last
/// released distribution in the changelog is not the current devel series,
/// in which case the operator is asked.
///
/// # Errors
///
/// Returns `OperationError::ConflictingUploadFlags`, errors reading the
/// changelog, or the error of an unanswerable question.
pub fn resolve_upload_target<R, D, I>(
    reader: &R,
    distro: &D,
    interaction: &I,
    old: &ChangelogDetails,
    flags: UploadFlags,
) -> Result<UploadDecision>
where
    R: ChangelogReader,
    D: DistroInfoProvider,
    I: InteractionProvider,
{
    let flags = flags.validate()?;
    let devel_series = distro
        .devel_series()?
        .unwrap_or_else(|| UNKNOWN_SERIES.to_string());

    let target = if flags.first_devel_upload {
        UploadTarget::Devel
    } else if flags.first_sru || old.version.series_revision().is_some() {
        UploadTarget::StableUpdate
    } else {
        let changelog_series = reader.current_distribution()?;
        if devel_series == changelog_series {
            UploadTarget::Devel
        } else {
            info!(
                "d/changelog shows current devel distro as {changelog_series}, yet distro-info says it is {devel_series}"
            );
            if interaction.confirm_first_devel_upload(&devel_series, &changelog_series)? {
                UploadTarget::Devel
            } else if interaction.confirm_first_sru(&devel_series, &changelog_series)? {
                UploadTarget::StableUpdate
            } else {
                UploadTarget::Devel
            }
        }
    };

    info!(target = %target, devel_series = %devel_series, "upload target");
    Ok(UploadDecision {
        target,
        devel_series,
    })
}

/// SRU bug for the changelog bullet. Devel uploads never carry one.
///
/// # Errors
///
/// Returns the error of the interactive prompt.
pub fn resolve_sru_bug<I: InteractionProvider>(
    interaction: &I,
    target: UploadTarget,
    bug: Option<&BugNumber>,
    no_sru_bug: bool,
) -> Result<Option<BugNumber>> {
    if target.is_devel() {
        return Ok(None);
    }
    if let Some(bug) = bug {
        return Ok(Some(bug.clone()));
    }
    if no_sru_bug {
        return Ok(None);
    }
    interaction.sru_bug()
}

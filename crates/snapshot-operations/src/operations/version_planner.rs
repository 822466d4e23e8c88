use snapshot_changelog::SnapshotSubject;
use snapshot_core::UploadTarget;
use snapshot_version::{
    PRE_COMMIT_LEN, PackagingRevision, VersionInfo, VersionOverrides, VersionSuffix, checked_bump,
};
use tracing::debug;

use crate::{OperationError, Result};

/// Everything the version policy looks at.
#[derive(Debug, Clone)]
pub struct VersionRequest<'a> {
    /// Version of the top changelog entry before the snapshot.
    pub old: &'a VersionInfo,
    /// Whether that entry was still `UNRELEASED`.
    pub previously_unreleased: bool,
    pub subject: &'a SnapshotSubject,
    pub target: UploadTarget,
}

/// Picks the version of the new changelog entry.
///
/// `stable_release` is only consulted for the first backport of a tag to a
/// stable series.
///
/// # Errors
///
/// Returns a version error if a tag is not an upstream version, the error of
/// `stable_release`, or `OperationError::UnreachableVersionPolicy` when no
/// rule covers the combination.
pub fn plan_next_version<F>(request: &VersionRequest<'_>, stable_release: F) -> Result<VersionInfo>
where
    F: FnOnce() -> Result<String>,
{
    let old = request.old;
    let version = match request.subject {
        SnapshotSubject::Tag(tag) => plan_for_tag(old, tag, request.target, stable_release)?,
        SnapshotSubject::Commit { short_hash, .. } if request.target.is_devel() => {
            plan_devel_snapshot(old, short_hash)?
        }
        SnapshotSubject::Commit { .. } if request.previously_unreleased => old.clone(),
        SnapshotSubject::Commit { commitish, .. } => match old.series_revision() {
            Some(revision) => {
                let revision = checked_bump(revision, "series_revision", old)?;
                old.replace(VersionOverrides::new().with_series_revision(revision))?
            }
            None => {
                return Err(OperationError::UnreachableVersionPolicy {
                    version: old.to_string(),
                    commitish: commitish.clone(),
                    target: request.target,
                });
            }
        },
    };

    debug!(old = %old, new = %version, target = %request.target, "planned version");
    Ok(version)
}

fn plan_for_tag<F>(
    old: &VersionInfo,
    tag: &str,
    target: UploadTarget,
    stable_release: F,
) -> Result<VersionInfo>
where
    F: FnOnce() -> Result<String>,
{
    let tag_info = VersionInfo::from_string(tag)?;

    let version = if target.is_devel() {
        tag_info.replace(VersionOverrides::new().with_packaging(0, 1))?
    } else if old.series().is_some() {
        old.replace(
            VersionOverrides::new()
                .with_upstream(tag_info.major(), tag_info.minor(), tag_info.hotfix())
                .with_series_revision(1),
        )?
    } else {
        let series = stable_release()?;
        tag_info.replace(
            VersionOverrides::new()
                .with_packaging(0, 0)
                .with_series(series, 1),
        )?
    };

    // Heuristic: a hotfix tag is assumed to be a feature freeze exception.
    // Wrong while devel itself is in feature freeze.
    if tag_info.hotfix().is_some() {
        return Ok(version.replace(VersionOverrides::new().with_ubuntu(0))?);
    }
    Ok(version)
}

fn plan_devel_snapshot(old: &VersionInfo, short_hash: &str) -> Result<VersionInfo> {
    let (major, minor, revision) = match old.pre_revision() {
        Some(revision) => (
            old.major(),
            old.minor(),
            checked_bump(revision, "pre_revision", old)?,
        ),
        None => {
            let next = old.increment_major_minor()?;
            (next.major(), next.minor(), 1)
        }
    };

    // git lengthens --short=8 output when 8 digits are ambiguous
    let commit = short_hash.get(..PRE_COMMIT_LEN).unwrap_or(short_hash);

    Ok(VersionInfo::new(
        major,
        minor,
        None,
        Some(PackagingRevision {
            debian: 0,
            ubuntu: 1,
        }),
        VersionSuffix::PreRelease {
            revision,
            commit: commit.to_string(),
        },
    )?)
}

#[cfg(test)]
mod tests {
    use snapshot_version::VersionError;

    use super::*;

    fn version(text: &str) -> VersionInfo {
        VersionInfo::from_string(text).expect("valid version")
    }

    fn tag(name: &str) -> SnapshotSubject {
        SnapshotSubject::Tag(name.to_string())
    }

    fn commit(hash: &str) -> SnapshotSubject {
        SnapshotSubject::Commit {
            commitish: "main".to_string(),
            short_hash: hash.to_string(),
        }
    }

    fn plan(
        old: &str,
        previously_unreleased: bool,
        subject: &SnapshotSubject,
        target: UploadTarget,
    ) -> Result<VersionInfo> {
        let old = version(old);
        let request = VersionRequest {
            old: &old,
            previously_unreleased,
            subject,
            target,
        };
        plan_next_version(&request, || Ok("10.10".to_string()))
    }

    fn no_stable_lookup() -> Result<String> {
        panic!("stable release must not be queried")
    }

    #[test]
    fn devel_tag_takes_upstream_version() -> anyhow::Result<()> {
        let new = plan("1.4-0ubuntu1", false, &tag("2.3"), UploadTarget::Devel)?;

        assert_eq!(new.to_string(), "2.3-0ubuntu1");
        Ok(())
    }

    #[test]
    fn devel_hotfix_tag_uses_ubuntu_zero() -> anyhow::Result<()> {
        let new = plan("2.3-0ubuntu1", false, &tag("2.3.1"), UploadTarget::Devel)?;

        assert_eq!(new.to_string(), "2.3.1-0ubuntu0");
        Ok(())
    }

    #[test]
    fn devel_commit_starts_pre_release_on_next_cadence_step() -> anyhow::Result<()> {
        let new = plan("1.4-0ubuntu1", false, &commit("0cb0b80f"), UploadTarget::Devel)?;

        assert_eq!(new.to_string(), "2.1~1g0cb0b80f-0ubuntu1");
        Ok(())
    }

    #[test]
    fn devel_commit_bumps_existing_pre_release() -> anyhow::Result<()> {
        let new = plan(
            "2.1~1g0cb0b80f-0ubuntu1",
            true,
            &commit("12ab34cd"),
            UploadTarget::Devel,
        )?;

        assert_eq!(new.to_string(), "2.1~2g12ab34cd-0ubuntu1");
        Ok(())
    }

    #[test]
    fn sru_tag_keeps_series_and_resets_revision() -> anyhow::Result<()> {
        let new = plan(
            "1.4-0ubuntu0~10.04.3",
            false,
            &tag("2.3"),
            UploadTarget::StableUpdate,
        )?;

        assert_eq!(new.to_string(), "2.3-0ubuntu0~10.04.1");
        Ok(())
    }

    #[test]
    fn sru_hotfix_tag_keeps_series_with_ubuntu_zero() -> anyhow::Result<()> {
        let new = plan(
            "1.4-0ubuntu1~10.04.3",
            false,
            &tag("2.3.2"),
            UploadTarget::StableUpdate,
        )?;

        assert_eq!(new.to_string(), "2.3.2-0ubuntu0~10.04.1");
        Ok(())
    }

    #[test]
    fn first_sru_of_tag_uses_stable_release() -> anyhow::Result<()> {
        let new = plan("2.1-0ubuntu1", false, &tag("2.3"), UploadTarget::StableUpdate)?;

        assert_eq!(new.to_string(), "2.3-0ubuntu0~10.10.1");
        Ok(())
    }

    #[test]
    fn stable_release_is_only_queried_for_first_sru() -> anyhow::Result<()> {
        let old = version("1.4-0ubuntu0~10.04.1");
        let subject = tag("2.3");
        let request = VersionRequest {
            old: &old,
            previously_unreleased: false,
            subject: &subject,
            target: UploadTarget::StableUpdate,
        };

        let new = plan_next_version(&request, no_stable_lookup)?;

        assert_eq!(new.to_string(), "2.3-0ubuntu0~10.04.1");
        Ok(())
    }

    #[test]
    fn stable_release_failure_propagates() {
        let old = version("2.1-0ubuntu1");
        let subject = tag("2.3");
        let request = VersionRequest {
            old: &old,
            previously_unreleased: false,
            subject: &subject,
            target: UploadTarget::StableUpdate,
        };

        let result = plan_next_version(&request, || Err(OperationError::NoRecentMerge));

        assert!(matches!(result, Err(OperationError::NoRecentMerge)));
    }

    #[test]
    fn sru_commit_bumps_series_revision() -> anyhow::Result<()> {
        let new = plan(
            "1.4-0ubuntu0~10.04.1",
            false,
            &commit("0cb0b80f"),
            UploadTarget::StableUpdate,
        )?;

        assert_eq!(new.to_string(), "1.4-0ubuntu0~10.04.2");
        Ok(())
    }

    #[test]
    fn sru_commit_on_unreleased_entry_keeps_version() -> anyhow::Result<()> {
        let new = plan(
            "1.4-0ubuntu0~10.04.2",
            true,
            &commit("0cb0b80f"),
            UploadTarget::StableUpdate,
        )?;

        assert_eq!(new.to_string(), "1.4-0ubuntu0~10.04.2");
        Ok(())
    }

    #[test]
    fn sru_commit_without_series_is_unreachable() {
        let result = plan(
            "1.4-0ubuntu1",
            false,
            &commit("0cb0b80f"),
            UploadTarget::StableUpdate,
        );

        assert!(matches!(
            result,
            Err(OperationError::UnreachableVersionPolicy { .. })
        ));
    }

    #[test]
    fn planned_versions_round_trip() -> anyhow::Result<()> {
        let sru = UploadTarget::StableUpdate;
        let cases = [
            plan("1.4-0ubuntu1", false, &tag("2.3"), UploadTarget::Devel)?,
            plan("1.4-0ubuntu1", false, &commit("0cb0b80f"), UploadTarget::Devel)?,
            plan("1.4-0ubuntu1", false, &commit("0cb0b80f5"), UploadTarget::Devel)?,
            plan("2.1-0ubuntu1", false, &tag("2.3.1"), sru)?,
            plan("1.4-0ubuntu0~10.04.1", false, &commit("0cb0b80f"), sru)?,
        ];

        for planned in cases {
            assert_eq!(VersionInfo::from_string(&planned.to_string())?, planned);
        }
        Ok(())
    }

    #[test]
    fn devel_commit_after_minor_five_stays_on_major() -> anyhow::Result<()> {
        let new = plan("18.5-0ubuntu1", false, &commit("0cb0b80f"), UploadTarget::Devel)?;

        assert_eq!(new.to_string(), "18.6~1g0cb0b80f-0ubuntu1");
        Ok(())
    }

    #[test]
    fn lengthened_short_hash_is_cut_to_eight_digits() -> anyhow::Result<()> {
        let new = plan("24.1-0ubuntu1", false, &commit("0cb0b80f5"), UploadTarget::Devel)?;

        assert_eq!(new.to_string(), "24.2~1g0cb0b80f-0ubuntu1");
        assert_eq!(VersionInfo::from_string(&new.to_string())?, new);
        Ok(())
    }

    #[test]
    fn non_hex_short_hash_is_rejected() {
        let result = plan("24.1-0ubuntu1", false, &commit("not-hex!"), UploadTarget::Devel);

        assert!(matches!(
            result,
            Err(OperationError::Version(VersionError::InvalidPreCommit(_)))
        ));
    }

    #[test]
    fn exhausted_revision_counters_are_errors() {
        let pre = plan(
            "2.1~4294967295g0cb0b80f-0ubuntu1",
            true,
            &commit("12ab34cd"),
            UploadTarget::Devel,
        );
        let series = plan(
            "1.4-0ubuntu0~10.04.4294967295",
            false,
            &commit("0cb0b80f"),
            UploadTarget::StableUpdate,
        );

        assert!(matches!(
            pre,
            Err(OperationError::Version(VersionError::Overflow {
                field: "pre_revision",
                ..
            }))
        ));
        assert!(matches!(
            series,
            Err(OperationError::Version(VersionError::Overflow {
                field: "series_revision",
                ..
            }))
        ));
    }

    #[test]
    fn malformed_tag_is_a_parse_error() {
        let result = plan("1.4-0ubuntu1", false, &tag("2.x"), UploadTarget::Devel);

        assert!(matches!(result, Err(OperationError::Version(_))));
    }
}

use thiserror::Error;

/// Every anticipated way a snapshot run can stop. Messages tell the operator
/// what to do next.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Core(#[from] snapshot_core::CoreError),

    #[error(transparent)]
    Version(#[from] snapshot_version::VersionError),

    #[error(transparent)]
    Changelog(#[from] snapshot_changelog::ChangelogError),

    #[error(transparent)]
    Tool(#[from] snapshot_tools::ToolError),

    #[error(transparent)]
    Project(#[from] snapshot_project::ProjectError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("'git describe' failed for {commitish}. Is it a valid commitish or annotated tag?")]
    UnknownCommitish { commitish: String },

    #[error(
        "merging {commitish} failed. Resolve the conflicts, commit the merge and rerun with '--post-stage merge'"
    )]
    MergeFailed {
        commitish: String,
        #[source]
        source: snapshot_tools::ToolError,
    },

    #[error(
        "Failed applying patch '{patch}'. Patch must be refreshed manually. When you can successfully 'quilt push -a && quilt pop -a', commit the result and rerun with '--post-stage quilt'"
    )]
    PatchFailed {
        patch: String,
        #[source]
        source: snapshot_tools::ToolError,
    },

    #[error("'quilt pop -a' unexpectedly returned {code}.")]
    QuiltPop { code: String },

    #[error("failed to update patch series '{path}'")]
    SeriesUpdate {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove patch '{path}'")]
    PatchRemove {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid patch glob '{pattern}'")]
    PatchGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("No recent merge. Can't continue")]
    NoRecentMerge,

    #[error("Could not determine distro from changelog: no released entry in the last {scanned}")]
    NoReleasedDistribution { scanned: usize },

    #[error("Can't simultaneously be first SRU and first devel upload")]
    ConflictingUploadFlags,

    #[error(
        "d/changelog shows {changelog_series} as the last released series, yet distro-info says the devel series is {devel_series}; rerun with --first-devel-upload or --first-sru and --post-stage quilt"
    )]
    UploadTargetUndecided {
        devel_series: String,
        changelog_series: String,
    },

    #[error(
        "no SRU bug given; rerun with --bug <number> or --no-sru-bug and --post-stage quilt"
    )]
    SruBugRequired,

    #[error(
        "Shouldn't be here: no version rule for a {target} snapshot of {commitish} on top of {version}. Stopping as the version number is likely to be wrong"
    )]
    UnreachableVersionPolicy {
        version: String,
        commitish: String,
        target: snapshot_core::UploadTarget,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;

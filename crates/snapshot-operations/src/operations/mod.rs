pub mod bugs;
pub mod merge;
pub mod patches;
pub mod release;
pub mod snapshot;
pub mod upload_target;
pub mod version_planner;

pub use bugs::{MERGE_SEARCH_DEPTH, bugs_fixed_since_merge, original_head, parse_bug_trailers};
pub use merge::merge_commitish;
pub use patches::{cherry_pick_hash, drop_cherry_picks, refresh_patches};
pub use release::ReleaseInstructions;
pub use snapshot::{
    CHANGELOG_COMMIT_MESSAGE, ChangelogUpdate, SnapshotInput, SnapshotOperation, SnapshotOutput,
    SnapshotProviders, SnapshotStage,
};
pub use upload_target::{
    UNKNOWN_SERIES, UploadDecision, UploadFlags, resolve_sru_bug, resolve_upload_target,
};
pub use version_planner::{VersionRequest, plan_next_version};

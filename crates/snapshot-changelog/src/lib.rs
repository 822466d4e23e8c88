mod changelog;
mod details;
mod error;
mod format;
mod upstream;

pub use changelog::{Changelog, PLACEHOLDER_LINE};
pub use details::{ChangelogDetails, Distribution};
pub use error::ChangelogError;
pub use format::{
    MAX_LINE_WIDTH, SnapshotMessage, SnapshotSubject, abbreviate_patch_path, format_bugs_fixed,
    format_refresh_note,
};
pub use upstream::{DEFAULT_UPSTREAM_CHANGELOG_TEMPLATE, UpstreamChangelogTemplate};

pub type Result<T> = std::result::Result<T, ChangelogError>;

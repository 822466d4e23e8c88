mod error;
mod version;

pub use error::VersionError;
pub use version::{
    PRE_COMMIT_LEN, PackagingRevision, VersionInfo, VersionOverrides, VersionSuffix, checked_bump,
};

pub type Result<T> = std::result::Result<T, VersionError>;

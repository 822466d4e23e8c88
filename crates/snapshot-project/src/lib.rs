mod config;
mod error;
mod project;

pub use config::{
    CONFIG_FILE, DEFAULT_CHANGELOG, DEFAULT_PATCHES_DIR, DEFAULT_UPSTREAM_REF, SnapshotConfig,
    load_config, parse_config,
};
pub use error::ProjectError;
pub use project::{PackagingProject, discover_project};

pub type Result<T> = std::result::Result<T, ProjectError>;

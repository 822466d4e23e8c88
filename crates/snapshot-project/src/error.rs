use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("No debian/changelog found. Are we in the right dir or branch?")]
    NotFound { start_dir: PathBuf },

    #[error("changelog configured at '{path}' does not exist")]
    MissingChangelog { path: PathBuf },

    #[error("failed to read config at '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid 'changelog-url' in config at '{path}'")]
    InvalidChangelogUrl {
        path: PathBuf,
        #[source]
        source: snapshot_changelog::ChangelogError,
    },

    #[error("config at '{path}' has an empty '{key}'")]
    EmptyValue { path: PathBuf, key: &'static str },
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChangelogError {
    #[error("failed to read changelog at '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write changelog at '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no changelog entry at offset {offset}")]
    NoEntry { offset: usize },

    #[error("changelog entry is missing the '{field}' field")]
    MissingField { field: &'static str },

    #[error("could not parse changelog line: {line}")]
    UnknownField { line: String },

    #[error("invalid version in changelog entry")]
    InvalidVersion(#[from] snapshot_version::VersionError),

    #[error("invalid changelog timestamp '{value}'")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("invalid changelog date '{value}'")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid bug reference in changelog entry")]
    InvalidBug(#[from] snapshot_core::CoreError),

    #[error(
        "changelog has {found} blank changelog entries where exactly one was expected; not sure how to proceed"
    )]
    PlaceholderCount { found: usize },

    #[error("upstream changelog template '{template}' must contain '{{tag}}'")]
    TemplateMissingTag { template: String },

    #[error("failed to parse URL '{url}'")]
    UrlParse {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

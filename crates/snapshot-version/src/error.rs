use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("cannot parse version string '{0}'")]
    Parse(String),

    #[error("field '{field}' of version '{version}' is out of range")]
    InvalidNumber {
        field: &'static str,
        version: String,
        #[source]
        source: ParseIntError,
    },

    #[error("a version cannot carry both a series suffix and a pre-release suffix")]
    ConflictingSuffixes,

    #[error("incomplete {kind} suffix: {first} and {second} must be given together")]
    IncompleteSuffix {
        kind: &'static str,
        first: &'static str,
        second: &'static str,
    },

    #[error("a {kind} suffix requires a debian/ubuntu revision")]
    SuffixWithoutRevision { kind: &'static str },

    #[error("pre-release commit '{0}' is not an 8 digit lowercase hex hash")]
    InvalidPreCommit(String),

    #[error("cannot increment '{field}' of version '{version}'")]
    Overflow {
        field: &'static str,
        version: String,
    },
}

use std::fmt;

use chrono::{DateTime, FixedOffset};
use snapshot_core::BugNumber;
use snapshot_version::VersionInfo;

use crate::Result;
use crate::error::ChangelogError;

const UNRELEASED: &str = "UNRELEASED";

/// Target distribution of a changelog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Distribution {
    Unreleased,
    Named(String),
}

impl Distribution {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case(UNRELEASED) {
            Self::Unreleased
        } else {
            Self::Named(value.trim().to_string())
        }
    }

    #[must_use]
    pub fn is_unreleased(&self) -> bool {
        matches!(self, Self::Unreleased)
    }

    /// The series codename, or `None` while the entry is unreleased.
    #[must_use]
    pub fn released_series(&self) -> Option<&str> {
        match self {
            Self::Unreleased => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreleased => write!(f, "{UNRELEASED}"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// One changelog entry as reported by `dpkg-parsechangelog --count=1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogDetails {
    pub source: String,
    pub version: VersionInfo,
    pub distribution: Distribution,
    pub urgency: String,
    pub maintainer: String,
    pub timestamp: i64,
    pub date: DateTime<FixedOffset>,
    pub bugs_fixed: Vec<BugNumber>,
    pub closes: Vec<String>,
    pub changes: String,
}

impl ChangelogDetails {
    /// Parses the `Key: value` output of `dpkg-parsechangelog`.
    ///
    /// Parsing is strict: any key other than the ones dpkg emits for a
    /// single entry is rejected instead of being skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ChangelogError::NoEntry`] for empty output and a parse error
    /// for unknown, missing or malformed fields.
    pub fn parse(output: &str, offset: usize) -> Result<Self> {
        let output = output.trim();
        if output.is_empty() {
            return Err(ChangelogError::NoEntry { offset });
        }

        let mut source = None;
        let mut version = None;
        let mut distribution = None;
        let mut urgency = None;
        let mut maintainer = None;
        let mut timestamp = None;
        let mut date = None;
        let mut bugs_fixed = Vec::new();
        let mut closes = Vec::new();
        let mut changes = None;

        let mut consumed = 0;
        for line in output.split_inclusive('\n') {
            consumed += line.len();
            let line = line.trim_end_matches(['\n', '\r']);

            if line.starts_with("Changes:") {
                changes = Some(output[consumed..].to_string());
                break;
            }

            let Some((key, value)) = line.split_once(": ") else {
                return Err(ChangelogError::UnknownField {
                    line: line.to_string(),
                });
            };

            match key {
                "Source" => source = Some(value.to_string()),
                "Version" => version = Some(VersionInfo::from_string(value)?),
                "Distribution" => distribution = Some(Distribution::parse(value)),
                "Urgency" => urgency = Some(value.to_string()),
                "Maintainer" => maintainer = Some(value.to_string()),
                "Timestamp" => {
                    timestamp = Some(value.parse::<i64>().map_err(|source| {
                        ChangelogError::InvalidTimestamp {
                            value: value.to_string(),
                            source,
                        }
                    })?);
                }
                "Date" => {
                    date = Some(DateTime::parse_from_rfc2822(value).map_err(|source| {
                        ChangelogError::InvalidDate {
                            value: value.to_string(),
                            source,
                        }
                    })?);
                }
                "Launchpad-Bugs-Fixed" => {
                    bugs_fixed = value
                        .split_whitespace()
                        .map(str::parse)
                        .collect::<std::result::Result<_, _>>()?;
                }
                "Closes" => closes = value.split_whitespace().map(str::to_string).collect(),
                _ => {
                    return Err(ChangelogError::UnknownField {
                        line: line.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            source: source.ok_or(ChangelogError::MissingField { field: "Source" })?,
            version: version.ok_or(ChangelogError::MissingField { field: "Version" })?,
            distribution: distribution.ok_or(ChangelogError::MissingField {
                field: "Distribution",
            })?,
            urgency: urgency.ok_or(ChangelogError::MissingField { field: "Urgency" })?,
            maintainer: maintainer.ok_or(ChangelogError::MissingField {
                field: "Maintainer",
            })?,
            timestamp: timestamp.ok_or(ChangelogError::MissingField { field: "Timestamp" })?,
            date: date.ok_or(ChangelogError::MissingField { field: "Date" })?,
            bugs_fixed,
            closes,
            changes: changes.ok_or(ChangelogError::MissingField { field: "Changes" })?,
        })
    }

    #[must_use]
    pub fn is_unreleased(&self) -> bool {
        self.distribution.is_unreleased()
    }
}

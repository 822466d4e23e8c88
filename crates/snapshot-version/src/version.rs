use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::Result;
use crate::error::VersionError;

// Something like 23.1.1-0ubuntu1~22.04.1 or 23.1~1g111f1a6e-0ubuntu1
static PACKAGING_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<major>\d+)\.(?P<minor>\d+)(?:\.(?P<hotfix>\d+)|~(?P<pre_revision>\d+)g(?P<pre_commit>[0-9a-f]{8}))?-(?P<debian>\d+)ubuntu(?P<ubuntu>\d+)(?:~(?P<series>\d+\.\d+)\.(?P<series_revision>\d+))?$",
    )
    .expect("valid packaging version regex")
});

static UPSTREAM_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<major>\d+)\.(?P<minor>\d+)(?:\.(?P<hotfix>\d+))?$")
        .expect("valid upstream tag regex")
});

/// Minor releases per major version in the upstream release cadence.
const MINORS_PER_MAJOR: u32 = 4;

/// Length of the abbreviated commit hash in a pre-release suffix.
pub const PRE_COMMIT_LEN: usize = 8;

/// The `-{debian}ubuntu{ubuntu}` part of a packaging version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackagingRevision {
    pub debian: u32,
    pub ubuntu: u32,
}

/// The two mutually exclusive trailing decorations a version may carry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VersionSuffix {
    #[default]
    None,
    /// `~{revision}g{commit}` on devel snapshots taken between upstream tags.
    PreRelease { revision: u32, commit: String },
    /// `~{series}.{revision}` on stable release updates.
    Series { series: String, revision: u32 },
}

impl VersionSuffix {
    fn from_parts(
        series: Option<String>,
        series_revision: Option<u32>,
        pre_revision: Option<u32>,
        pre_commit: Option<String>,
    ) -> Result<Self> {
        let has_series = series.is_some() || series_revision.is_some();
        let has_pre = pre_revision.is_some() || pre_commit.is_some();
        if has_series && has_pre {
            return Err(VersionError::ConflictingSuffixes);
        }

        match (series, series_revision, pre_revision, pre_commit) {
            (None, None, None, None) => Ok(Self::None),
            (Some(series), Some(revision), None, None) => Ok(Self::Series { series, revision }),
            (None, None, Some(revision), Some(commit)) => {
                if !is_pre_commit(&commit) {
                    return Err(VersionError::InvalidPreCommit(commit));
                }
                Ok(Self::PreRelease { revision, commit })
            }
            _ if has_series => Err(VersionError::IncompleteSuffix {
                kind: "series",
                first: "series",
                second: "series_revision",
            }),
            _ => Err(VersionError::IncompleteSuffix {
                kind: "pre-release",
                first: "pre_revision",
                second: "pre_commit",
            }),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::None => "no",
            Self::PreRelease { .. } => "pre-release",
            Self::Series { .. } => "series",
        }
    }
}

/// A Debian/Ubuntu packaging version such as `23.1.1-0ubuntu1~22.04.1`.
///
/// Canonical form:
/// `{major}.{minor}[.{hotfix}][~{pre_revision}g{pre_commit}]-{debian}ubuntu{ubuntu}[~{series}.{series_revision}]`.
///
/// A bare upstream tag (`major.minor[.hotfix]`) parses into a value without a
/// packaging revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    major: u32,
    minor: u32,
    hotfix: Option<u32>,
    packaging: Option<PackagingRevision>,
    suffix: VersionSuffix,
}

impl VersionInfo {
    /// # Errors
    ///
    /// Returns [`VersionError::SuffixWithoutRevision`] if a suffix is given
    /// without a packaging revision, or [`VersionError::InvalidPreCommit`]
    /// if a pre-release commit is not 8 lowercase hex digits.
    pub fn new(
        major: u32,
        minor: u32,
        hotfix: Option<u32>,
        packaging: Option<PackagingRevision>,
        suffix: VersionSuffix,
    ) -> Result<Self> {
        if let VersionSuffix::PreRelease { commit, .. } = &suffix {
            if !is_pre_commit(commit) {
                return Err(VersionError::InvalidPreCommit(commit.clone()));
            }
        }
        if packaging.is_none() && suffix != VersionSuffix::None {
            return Err(VersionError::SuffixWithoutRevision {
                kind: suffix.kind(),
            });
        }
        Ok(Self {
            major,
            minor,
            hotfix,
            packaging,
            suffix,
        })
    }

    /// An upstream release such as `23.1` or `23.1.2`.
    #[must_use]
    pub fn upstream(major: u32, minor: u32, hotfix: Option<u32>) -> Self {
        Self {
            major,
            minor,
            hotfix,
            packaging: None,
            suffix: VersionSuffix::None,
        }
    }

    /// # Errors
    ///
    /// Returns [`VersionError::Parse`] if the text is neither a packaging
    /// version nor a bare `major.minor[.hotfix]` upstream tag.
    pub fn from_string(text: &str) -> Result<Self> {
        if let Some(caps) = PACKAGING_VERSION.captures(text) {
            let packaging = PackagingRevision {
                debian: required_int(&caps, "debian", text)?,
                ubuntu: required_int(&caps, "ubuntu", text)?,
            };
            let suffix = VersionSuffix::from_parts(
                caps.name("series").map(|m| m.as_str().to_string()),
                optional_int(&caps, "series_revision", text)?,
                optional_int(&caps, "pre_revision", text)?,
                caps.name("pre_commit").map(|m| m.as_str().to_string()),
            )?;
            return Self::new(
                required_int(&caps, "major", text)?,
                required_int(&caps, "minor", text)?,
                optional_int(&caps, "hotfix", text)?,
                Some(packaging),
                suffix,
            );
        }

        if let Some(caps) = UPSTREAM_TAG.captures(text) {
            return Ok(Self::upstream(
                required_int(&caps, "major", text)?,
                required_int(&caps, "minor", text)?,
                optional_int(&caps, "hotfix", text)?,
            ));
        }

        Err(VersionError::Parse(text.to_string()))
    }

    #[must_use]
    pub fn major(&self) -> u32 {
        self.major
    }

    #[must_use]
    pub fn minor(&self) -> u32 {
        self.minor
    }

    #[must_use]
    pub fn hotfix(&self) -> Option<u32> {
        self.hotfix
    }

    #[must_use]
    pub fn packaging(&self) -> Option<PackagingRevision> {
        self.packaging
    }

    #[must_use]
    pub fn debian(&self) -> Option<u32> {
        self.packaging.map(|p| p.debian)
    }

    #[must_use]
    pub fn ubuntu(&self) -> Option<u32> {
        self.packaging.map(|p| p.ubuntu)
    }

    #[must_use]
    pub fn suffix(&self) -> &VersionSuffix {
        &self.suffix
    }

    #[must_use]
    pub fn pre_revision(&self) -> Option<u32> {
        match &self.suffix {
            VersionSuffix::PreRelease { revision, .. } => Some(*revision),
            _ => None,
        }
    }

    #[must_use]
    pub fn pre_commit(&self) -> Option<&str> {
        match &self.suffix {
            VersionSuffix::PreRelease { commit, .. } => Some(commit),
            _ => None,
        }
    }

    #[must_use]
    pub fn series(&self) -> Option<&str> {
        match &self.suffix {
            VersionSuffix::Series { series, .. } => Some(series),
            _ => None,
        }
    }

    #[must_use]
    pub fn series_revision(&self) -> Option<u32> {
        match &self.suffix {
            VersionSuffix::Series { revision, .. } => Some(*revision),
            _ => None,
        }
    }

    /// `major.minor`, as used in upstream stable branch names.
    #[must_use]
    pub fn major_minor(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    /// Returns a copy with the given fields overridden.
    ///
    /// `hotfix` keeps its old value only when neither `major` nor `minor`
    /// is overridden; a new upstream major/minor starts a fresh hotfix track.
    ///
    /// # Errors
    ///
    /// Returns an error if the result would carry both suffix kinds, only
    /// half of a suffix, or a suffix without a packaging revision.
    pub fn replace(&self, overrides: VersionOverrides) -> Result<Self> {
        let upstream_changed = overrides.major.is_some() || overrides.minor.is_some();
        let hotfix = if overrides.hotfix.is_some() || upstream_changed {
            overrides.hotfix
        } else {
            self.hotfix
        };

        let packaging = match (overrides.debian, overrides.ubuntu, self.packaging) {
            (None, None, current) => current,
            (debian, ubuntu, Some(current)) => Some(PackagingRevision {
                debian: debian.unwrap_or(current.debian),
                ubuntu: ubuntu.unwrap_or(current.ubuntu),
            }),
            (debian, ubuntu, None) => Some(PackagingRevision {
                debian: debian.unwrap_or(0),
                ubuntu: ubuntu.unwrap_or(0),
            }),
        };

        let suffix = VersionSuffix::from_parts(
            overrides
                .series
                .or_else(|| self.series().map(str::to_string)),
            overrides.series_revision.or_else(|| self.series_revision()),
            overrides.pre_revision.or_else(|| self.pre_revision()),
            overrides
                .pre_commit
                .or_else(|| self.pre_commit().map(str::to_string)),
        )?;

        Self::new(
            overrides.major.unwrap_or(self.major),
            overrides.minor.unwrap_or(self.minor),
            hotfix,
            packaging,
            suffix,
        )
    }

    /// Advances to the next upstream release in the four-per-year cadence.
    ///
    /// `22.1 -> 22.2`, `22.2.3 -> 22.3`, `22.4 -> 23.1`. Only a bump onto
    /// minor 5 rolls over, so `18.5 -> 18.6`. The hotfix is dropped;
    /// everything else is kept.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Overflow`] if the bumped field does not fit.
    pub fn increment_major_minor(&self) -> Result<Self> {
        let minor = checked_bump(self.minor, "minor", self)?;
        let (major, minor) = if minor == MINORS_PER_MAJOR + 1 {
            (checked_bump(self.major, "major", self)?, 1)
        } else {
            (self.major, minor)
        };
        Ok(Self {
            major,
            minor,
            hotfix: None,
            ..self.clone()
        })
    }

    /// The git tag this version is released under, e.g.
    /// `ubuntu/23.1-0ubuntu1_22.04.1`.
    #[must_use]
    pub fn tag_name(&self) -> String {
        let tag = self.to_string().replace('~', "_");
        if tag.contains("ubuntu") && !tag.starts_with("ubuntu/") {
            format!("ubuntu/{tag}")
        } else {
            tag
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(hotfix) = self.hotfix {
            write!(f, ".{hotfix}")?;
        }
        if let VersionSuffix::PreRelease { revision, commit } = &self.suffix {
            write!(f, "~{revision}g{commit}")?;
        }
        if let Some(packaging) = self.packaging {
            write!(f, "-{}ubuntu{}", packaging.debian, packaging.ubuntu)?;
        }
        if let VersionSuffix::Series { series, revision } = &self.suffix {
            write!(f, "~{series}.{revision}")?;
        }
        Ok(())
    }
}

impl FromStr for VersionInfo {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

/// Field-level overrides for [`VersionInfo::replace`]. Unset fields keep
/// their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionOverrides {
    pub major: Option<u32>,
    pub minor: Option<u32>,
    pub hotfix: Option<u32>,
    pub debian: Option<u32>,
    pub ubuntu: Option<u32>,
    pub series: Option<String>,
    pub series_revision: Option<u32>,
    pub pre_revision: Option<u32>,
    pub pre_commit: Option<String>,
}

impl VersionOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_upstream(mut self, major: u32, minor: u32, hotfix: Option<u32>) -> Self {
        self.major = Some(major);
        self.minor = Some(minor);
        self.hotfix = hotfix;
        self
    }

    #[must_use]
    pub fn with_packaging(mut self, debian: u32, ubuntu: u32) -> Self {
        self.debian = Some(debian);
        self.ubuntu = Some(ubuntu);
        self
    }

    #[must_use]
    pub fn with_ubuntu(mut self, ubuntu: u32) -> Self {
        self.ubuntu = Some(ubuntu);
        self
    }

    #[must_use]
    pub fn with_series(mut self, series: impl Into<String>, revision: u32) -> Self {
        self.series = Some(series.into());
        self.series_revision = Some(revision);
        self
    }

    #[must_use]
    pub fn with_series_revision(mut self, revision: u32) -> Self {
        self.series_revision = Some(revision);
        self
    }

    #[must_use]
    pub fn with_pre_release(mut self, revision: u32, commit: impl Into<String>) -> Self {
        self.pre_revision = Some(revision);
        self.pre_commit = Some(commit.into());
        self
    }
}

/// `value + 1`, or [`VersionError::Overflow`] naming `field` of `version`.
///
/// # Errors
///
/// Returns [`VersionError::Overflow`] when `value` is already `u32::MAX`.
pub fn checked_bump(value: u32, field: &'static str, version: &VersionInfo) -> Result<u32> {
    value.checked_add(1).ok_or_else(|| VersionError::Overflow {
        field,
        version: version.to_string(),
    })
}

fn is_pre_commit(commit: &str) -> bool {
    commit.len() == PRE_COMMIT_LEN
        && commit
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

fn optional_int(caps: &Captures<'_>, field: &'static str, version: &str) -> Result<Option<u32>> {
    caps.name(field)
        .map(|m| {
            m.as_str()
                .parse()
                .map_err(|source| VersionError::InvalidNumber {
                    field,
                    version: version.to_string(),
                    source,
                })
        })
        .transpose()
}

fn required_int(caps: &Captures<'_>, field: &'static str, version: &str) -> Result<u32> {
    optional_int(caps, field, version)?.ok_or_else(|| VersionError::Parse(version.to_string()))
}

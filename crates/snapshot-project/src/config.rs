use std::path::{Path, PathBuf};

use serde::Deserialize;
use snapshot_changelog::{DEFAULT_UPSTREAM_CHANGELOG_TEMPLATE, UpstreamChangelogTemplate};
use tracing::debug;

use crate::error::ProjectError;

pub const CONFIG_FILE: &str = "debian/upstream-snapshot.toml";
pub const DEFAULT_UPSTREAM_REF: &str = "upstream/main";
pub const DEFAULT_PATCHES_DIR: &str = "debian/patches";
pub const DEFAULT_CHANGELOG: &str = "debian/changelog";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigFile {
    upstream_ref: Option<String>,
    changelog_url: Option<String>,
    patches_dir: Option<String>,
    changelog: Option<String>,
}

/// Settings for one packaging tree. Paths are relative to the packaging root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotConfig {
    upstream_ref: String,
    changelog_url: UpstreamChangelogTemplate,
    patches_dir: String,
    changelog: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            upstream_ref: DEFAULT_UPSTREAM_REF.to_string(),
            changelog_url: UpstreamChangelogTemplate::default(),
            patches_dir: DEFAULT_PATCHES_DIR.to_string(),
            changelog: DEFAULT_CHANGELOG.to_string(),
        }
    }
}

impl SnapshotConfig {
    /// Commitish merged when none is given on the command line.
    #[must_use]
    pub fn upstream_ref(&self) -> &str {
        &self.upstream_ref
    }

    /// Remote to fetch before merging [`Self::upstream_ref`], if it names one.
    #[must_use]
    pub fn upstream_remote(&self) -> Option<&str> {
        self.upstream_ref
            .split_once('/')
            .map(|(remote, _)| remote)
            .filter(|remote| !remote.is_empty())
    }

    #[must_use]
    pub fn changelog_url(&self) -> &UpstreamChangelogTemplate {
        &self.changelog_url
    }

    #[must_use]
    pub fn patches_dir(&self) -> &str {
        &self.patches_dir
    }

    #[must_use]
    pub fn changelog(&self) -> &str {
        &self.changelog
    }
}

/// Loads `debian/upstream-snapshot.toml` below `root`, falling back to the
/// defaults when the file does not exist.
///
/// # Errors
///
/// Returns `ProjectError` if the file exists but cannot be read, is not valid
/// TOML, has unknown keys, or holds an invalid value.
pub fn load_config(root: &Path) -> Result<SnapshotConfig, ProjectError> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(SnapshotConfig::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|source| ProjectError::ConfigRead {
        path: path.clone(),
        source,
    })?;
    let config = parse_config(&content, &path)?;
    debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

/// # Errors
///
/// Returns `ProjectError` if `content` is not a valid config file.
pub fn parse_config(content: &str, path: &Path) -> Result<SnapshotConfig, ProjectError> {
    let file: ConfigFile = toml::from_str(content).map_err(|source| ProjectError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    let non_empty = |value: Option<String>, key: &'static str, default: &str| match value {
        Some(value) if value.trim().is_empty() => Err(ProjectError::EmptyValue {
            path: path.to_path_buf(),
            key,
        }),
        Some(value) => Ok(value),
        None => Ok(default.to_string()),
    };

    let changelog_url = non_empty(
        file.changelog_url,
        "changelog-url",
        DEFAULT_UPSTREAM_CHANGELOG_TEMPLATE,
    )?;
    let changelog_url = UpstreamChangelogTemplate::new(changelog_url).map_err(|source| {
        ProjectError::InvalidChangelogUrl {
            path: path.to_path_buf(),
            source,
        }
    })?;

    Ok(SnapshotConfig {
        upstream_ref: non_empty(file.upstream_ref, "upstream-ref", DEFAULT_UPSTREAM_REF)?,
        changelog_url,
        patches_dir: non_empty(file.patches_dir, "patches-dir", DEFAULT_PATCHES_DIR)?,
        changelog: non_empty(file.changelog, "changelog", DEFAULT_CHANGELOG)?,
    })
}

pub(crate) fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

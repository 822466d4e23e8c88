use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{DEFAULT_CHANGELOG, SnapshotConfig, config_path, load_config};
use crate::error::ProjectError;

/// A packaging branch checkout: the directory holding `debian/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagingProject {
    pub root: PathBuf,
    pub config: SnapshotConfig,
}

impl PackagingProject {
    #[must_use]
    pub fn changelog_path(&self) -> PathBuf {
        self.root.join(self.config.changelog())
    }
}

/// Walks up from `start_dir` to the first directory with a `debian/`
/// packaging tree and loads its configuration.
///
/// # Errors
///
/// Returns `ProjectError::NotFound` if no ancestor holds `debian/changelog`
/// or a config file, or `ProjectError::MissingChangelog` if the configured
/// changelog does not exist.
pub fn discover_project(start_dir: &Path) -> Result<PackagingProject, ProjectError> {
    let start_dir = start_dir
        .canonicalize()
        .map_err(|_| ProjectError::NotFound {
            start_dir: start_dir.to_path_buf(),
        })?;

    let root = find_packaging_root(&start_dir).ok_or_else(|| ProjectError::NotFound {
        start_dir: start_dir.clone(),
    })?;
    debug!(root = %root.display(), "found packaging root");

    let config = load_config(&root)?;
    let project = PackagingProject { root, config };

    let changelog = project.changelog_path();
    if !changelog.is_file() {
        return Err(ProjectError::MissingChangelog { path: changelog });
    }

    Ok(project)
}

fn find_packaging_root(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .find(|dir| dir.join(DEFAULT_CHANGELOG).is_file() || config_path(dir).is_file())
        .map(Path::to_path_buf)
}

use std::path::{Path, PathBuf};

use crate::traits::PatchStore;
use crate::{OperationError, Result};

const CHERRY_PICK_GLOB: &str = "cpick*";

pub struct FileSystemPatchStore {
    root: PathBuf,
    patches_dir: String,
}

impl FileSystemPatchStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, patches_dir: &str) -> Self {
        Self {
            root: root.into(),
            patches_dir: patches_dir.trim_end_matches('/').to_string(),
        }
    }

    fn dir(&self) -> PathBuf {
        self.root.join(&self.patches_dir)
    }

    fn series_path(&self) -> PathBuf {
        self.dir().join("series")
    }
}

impl PatchStore for FileSystemPatchStore {
    fn patches_dir(&self) -> &str {
        &self.patches_dir
    }

    fn cherry_picks(&self) -> Result<Vec<String>> {
        let pattern = self.dir().join(CHERRY_PICK_GLOB);
        let pattern = pattern.to_string_lossy();
        let entries = glob::glob(&pattern).map_err(|source| OperationError::PatchGlob {
            pattern: pattern.to_string(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .filter(|path| path.is_file())
            .filter_map(|path| file_name(&path))
            .collect();
        names.sort();
        Ok(names)
    }

    fn remove_from_series(&self, name: &str) -> Result<()> {
        let path = self.series_path();
        let content =
            std::fs::read_to_string(&path).map_err(|source| OperationError::SeriesUpdate {
                path: path.clone(),
                source,
            })?;

        let kept: String = content
            .split_inclusive('\n')
            .filter(|line| line.trim() != name.trim())
            .collect();

        std::fs::write(&path, kept).map_err(|source| OperationError::SeriesUpdate { path, source })
    }

    fn remove_patch(&self, name: &str) -> Result<()> {
        let path = self.dir().join(name);
        std::fs::remove_file(&path).map_err(|source| OperationError::PatchRemove { path, source })
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}

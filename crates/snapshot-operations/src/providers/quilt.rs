use std::sync::Arc;

use snapshot_tools::{CommandRunner, Quilt};

use crate::Result;
use crate::traits::QuiltProvider;

pub struct ProcessQuiltProvider {
    quilt: Quilt,
}

impl ProcessQuiltProvider {
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>, patches_dir: &str) -> Self {
        Self {
            quilt: Quilt::new(runner, patches_dir),
        }
    }
}

impl QuiltProvider for ProcessQuiltProvider {
    fn next_patch(&self) -> Result<Option<String>> {
        Ok(self.quilt.next()?)
    }

    fn push(&self) -> Result<()> {
        Ok(self.quilt.push()?)
    }

    fn refresh(&self) -> Result<()> {
        Ok(self.quilt.refresh()?)
    }

    fn pop_all(&self) -> Result<Option<i32>> {
        Ok(self.quilt.pop_all()?)
    }
}

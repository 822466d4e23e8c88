use std::sync::Arc;

use snapshot_tools::{CommandRunner, DistroInfo};

use crate::Result;
use crate::traits::DistroInfoProvider;

pub struct ProcessDistroInfo {
    distro_info: DistroInfo,
}

impl ProcessDistroInfo {
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            distro_info: DistroInfo::new(runner),
        }
    }
}

impl DistroInfoProvider for ProcessDistroInfo {
    fn devel_series(&self) -> Result<Option<String>> {
        Ok(self.distro_info.devel()?)
    }

    fn stable_release(&self) -> Result<String> {
        Ok(self.distro_info.stable_release()?)
    }
}

use std::sync::Arc;

use snapshot_tools::{CommandRunner, Git};

use crate::Result;
use crate::traits::GitProvider;

pub struct ProcessGitProvider {
    git: Git,
}

impl ProcessGitProvider {
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            git: Git::new(runner),
        }
    }
}

impl GitProvider for ProcessGitProvider {
    fn describe(&self, commitish: &str) -> Result<Option<String>> {
        Ok(self.git.describe(commitish)?)
    }

    fn fetch(&self, remote: &str) -> Result<()> {
        Ok(self.git.fetch(remote)?)
    }

    fn merge(&self, commitish: &str, message: &str) -> Result<()> {
        Ok(self.git.merge(commitish, message)?)
    }

    fn short_hash(&self, commitish: &str) -> Result<String> {
        Ok(self.git.rev_parse_short(commitish)?)
    }

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool> {
        Ok(self.git.is_ancestor(ancestor, descendant)?)
    }

    fn parent_count(&self, revision: &str) -> Result<usize> {
        Ok(self.git.parent_count(revision)?)
    }

    fn log(&self, range: &str) -> Result<String> {
        Ok(self.git.log(range)?)
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.git.current_branch()?)
    }

    fn changed_files(&self, path: &str) -> Result<Vec<String>> {
        Ok(self.git.diff_name_only(path)?)
    }

    fn stage(&self, paths: &[&str]) -> Result<()> {
        Ok(self.git.add(paths)?)
    }

    fn commit(&self, message: &str) -> Result<()> {
        Ok(self.git.commit(message)?)
    }

    fn commit_paths(&self, message: &str, paths: &[&str]) -> Result<()> {
        Ok(self.git.commit_paths(message, paths)?)
    }
}

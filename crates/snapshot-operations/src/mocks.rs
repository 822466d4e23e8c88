use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use snapshot_changelog::{ChangelogDetails, ChangelogError};
use snapshot_core::BugNumber;
use snapshot_tools::{ExitStatusText, ToolError};
use snapshot_version::VersionInfo;

use crate::Result;
use crate::traits::{
    ChangelogReader, ChangelogWriter, DistroInfoProvider, GitProvider, InteractionProvider,
    PatchStore, QuiltProvider,
};

fn tool_failure(command: &str) -> ToolError {
    ToolError::NonZeroExit {
        command: command.to_string(),
        status: ExitStatusText(Some(1)),
        stderr: String::new(),
    }
}

/// Builds an entry the way `dpkg-parsechangelog` would report it.
///
/// # Panics
///
/// Panics if `version` is not a valid package version.
#[must_use]
pub fn changelog_entry(source: &str, version: &str, distribution: &str) -> ChangelogDetails {
    let output = format!(
        "Source: {source}\nVersion: {version}\nDistribution: {distribution}\nUrgency: medium\n\
         Maintainer: J Doe <j.doe@canonical.com>\nTimestamp: 1221226232\n\
         Date: Fri, 12 Sep 2008 15:30:32 +0200\nChanges:\n {source} ({version}) {distribution}; urgency=medium\n"
    );
    ChangelogDetails::parse(&output, 0).expect("valid changelog entry")
}

#[derive(Default)]
pub struct MockGitProvider {
    describes: HashMap<String, String>,
    short_hashes: HashMap<String, String>,
    ancestors: HashSet<String>,
    merge_parents: HashSet<String>,
    log_output: String,
    branch: String,
    changed: Vec<String>,
    failing_merge: bool,
    fetched: Mutex<Vec<String>>,
    merged: Mutex<Vec<(String, String)>>,
    staged: Mutex<Vec<String>>,
    commits: Mutex<Vec<(String, Vec<String>)>>,
    logged_ranges: Mutex<Vec<String>>,
}

impl MockGitProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            branch: "ubuntu/devel".to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_describe(mut self, commitish: &str, description: &str) -> Self {
        self.describes
            .insert(commitish.to_string(), description.to_string());
        self
    }

    #[must_use]
    pub fn with_short_hash(mut self, commitish: &str, hash: &str) -> Self {
        self.short_hashes
            .insert(commitish.to_string(), hash.to_string());
        self
    }

    #[must_use]
    pub fn with_ancestor(mut self, hash: &str) -> Self {
        self.ancestors.insert(hash.to_string());
        self
    }

    /// Marks `revision` (e.g. `HEAD~2`) as a merge commit.
    #[must_use]
    pub fn with_merge_at(mut self, revision: &str) -> Self {
        self.merge_parents.insert(revision.to_string());
        self
    }

    #[must_use]
    pub fn with_log(mut self, output: &str) -> Self {
        self.log_output = output.to_string();
        self
    }

    #[must_use]
    pub fn with_branch(mut self, branch: &str) -> Self {
        self.branch = branch.to_string();
        self
    }

    #[must_use]
    pub fn with_changed_files(mut self, files: &[&str]) -> Self {
        self.changed = files.iter().map(|f| (*f).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_failing_merge(mut self) -> Self {
        self.failing_merge = true;
        self
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn merged(&self) -> Vec<(String, String)> {
        self.merged.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn staged(&self) -> Vec<String> {
        self.staged.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn commits(&self) -> Vec<(String, Vec<String>)> {
        self.commits.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn logged_ranges(&self) -> Vec<String> {
        self.logged_ranges.lock().expect("lock poisoned").clone()
    }
}

impl GitProvider for MockGitProvider {
    fn describe(&self, commitish: &str) -> Result<Option<String>> {
        Ok(self.describes.get(commitish).cloned())
    }

    fn fetch(&self, remote: &str) -> Result<()> {
        self.fetched
            .lock()
            .expect("lock poisoned")
            .push(remote.to_string());
        Ok(())
    }

    fn merge(&self, commitish: &str, message: &str) -> Result<()> {
        if self.failing_merge {
            return Err(tool_failure("git merge").into());
        }
        self.merged
            .lock()
            .expect("lock poisoned")
            .push((commitish.to_string(), message.to_string()));
        Ok(())
    }

    fn short_hash(&self, commitish: &str) -> Result<String> {
        self.short_hashes
            .get(commitish)
            .cloned()
            .ok_or_else(|| tool_failure("git rev-parse --short").into())
    }

    fn is_ancestor(&self, ancestor: &str, _descendant: &str) -> Result<bool> {
        Ok(self.ancestors.contains(ancestor))
    }

    fn parent_count(&self, revision: &str) -> Result<usize> {
        Ok(if self.merge_parents.contains(revision) {
            2
        } else {
            1
        })
    }

    fn log(&self, range: &str) -> Result<String> {
        self.logged_ranges
            .lock()
            .expect("lock poisoned")
            .push(range.to_string());
        Ok(self.log_output.clone())
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn changed_files(&self, _path: &str) -> Result<Vec<String>> {
        Ok(self.changed.clone())
    }

    fn stage(&self, paths: &[&str]) -> Result<()> {
        self.staged
            .lock()
            .expect("lock poisoned")
            .extend(paths.iter().map(|p| (*p).to_string()));
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.commit_paths(message, &[])
    }

    fn commit_paths(&self, message: &str, paths: &[&str]) -> Result<()> {
        self.commits.lock().expect("lock poisoned").push((
            message.to_string(),
            paths.iter().map(|p| (*p).to_string()).collect(),
        ));
        Ok(())
    }
}

/// Walks a fixed series; `push` fails on the configured patch.
pub struct MockQuiltProvider {
    series: Vec<String>,
    failing: Option<String>,
    pop_code: Option<i32>,
    applied: Mutex<usize>,
    refreshed: Mutex<Vec<String>>,
    pops: Mutex<usize>,
}

impl MockQuiltProvider {
    #[must_use]
    pub fn new(series: &[&str]) -> Self {
        Self {
            series: series.iter().map(|p| (*p).to_string()).collect(),
            failing: None,
            pop_code: Some(0),
            applied: Mutex::new(0),
            refreshed: Mutex::new(Vec::new()),
            pops: Mutex::new(0),
        }
    }

    #[must_use]
    pub fn with_failing_patch(mut self, patch: &str) -> Self {
        self.failing = Some(patch.to_string());
        self
    }

    #[must_use]
    pub fn with_pop_code(mut self, code: Option<i32>) -> Self {
        self.pop_code = code;
        self
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn refreshed(&self) -> Vec<String> {
        self.refreshed.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn pops(&self) -> usize {
        *self.pops.lock().expect("lock poisoned")
    }
}

impl QuiltProvider for MockQuiltProvider {
    fn next_patch(&self) -> Result<Option<String>> {
        let applied = *self.applied.lock().expect("lock poisoned");
        Ok(self.series.get(applied).cloned())
    }

    fn push(&self) -> Result<()> {
        let mut applied = self.applied.lock().expect("lock poisoned");
        if self.failing.is_some() && self.series.get(*applied) == self.failing.as_ref() {
            return Err(tool_failure("quilt push").into());
        }
        *applied += 1;
        Ok(())
    }

    fn refresh(&self) -> Result<()> {
        let applied = *self.applied.lock().expect("lock poisoned");
        if let Some(top) = applied.checked_sub(1).and_then(|i| self.series.get(i)) {
            self.refreshed
                .lock()
                .expect("lock poisoned")
                .push(top.clone());
        }
        Ok(())
    }

    fn pop_all(&self) -> Result<Option<i32>> {
        *self.pops.lock().expect("lock poisoned") += 1;
        *self.applied.lock().expect("lock poisoned") = 0;
        Ok(self.pop_code)
    }
}

#[derive(Default)]
struct ChangelogState {
    entries: Vec<ChangelogDetails>,
    messages: Vec<(String, Option<String>)>,
}

/// In-memory changelog that serves both as reader and writer.
///
/// Clones share state, so one handle can be given to the reader slot and
/// another to the writer slot of an operation.
#[derive(Clone)]
pub struct MockChangelog {
    path: String,
    state: Arc<Mutex<ChangelogState>>,
}

impl MockChangelog {
    #[must_use]
    pub fn new(entries: Vec<ChangelogDetails>) -> Self {
        Self {
            path: "debian/changelog".to_string(),
            state: Arc::new(Mutex::new(ChangelogState {
                entries,
                messages: Vec::new(),
            })),
        }
    }

    /// Messages added so far, with the version each one opened.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn messages(&self) -> Vec<(String, Option<String>)> {
        self.state.lock().expect("lock poisoned").messages.clone()
    }
}

impl ChangelogReader for MockChangelog {
    fn entry(&self, offset: usize) -> Result<ChangelogDetails> {
        let state = self.state.lock().expect("lock poisoned");
        state
            .entries
            .get(offset)
            .cloned()
            .ok_or_else(|| ChangelogError::NoEntry { offset }.into())
    }
}

impl ChangelogWriter for MockChangelog {
    fn path(&self) -> &str {
        &self.path
    }

    fn add_message(&self, message: &str, new_version: Option<&VersionInfo>) -> Result<()> {
        let mut state = self.state.lock().expect("lock poisoned");
        if let Some(version) = new_version {
            let source = state
                .entries
                .first()
                .map_or("pkg", |entry| entry.source.as_str())
                .to_string();
            let entry = changelog_entry(&source, &version.to_string(), "UNRELEASED");
            state.entries.insert(0, entry);
        }
        state
            .messages
            .push((message.to_string(), new_version.map(ToString::to_string)));
        Ok(())
    }
}

pub struct MockPatchStore {
    cherry_picks: Mutex<Vec<String>>,
    series_removals: Mutex<Vec<String>>,
    removed: Mutex<Vec<String>>,
}

impl MockPatchStore {
    #[must_use]
    pub fn new(cherry_picks: &[&str]) -> Self {
        Self {
            cherry_picks: Mutex::new(cherry_picks.iter().map(|p| (*p).to_string()).collect()),
            series_removals: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
        }
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn series_removals(&self) -> Vec<String> {
        self.series_removals.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().expect("lock poisoned").clone()
    }
}

impl PatchStore for MockPatchStore {
    fn patches_dir(&self) -> &str {
        "debian/patches"
    }

    fn cherry_picks(&self) -> Result<Vec<String>> {
        Ok(self.cherry_picks.lock().expect("lock poisoned").clone())
    }

    fn remove_from_series(&self, name: &str) -> Result<()> {
        self.series_removals
            .lock()
            .expect("lock poisoned")
            .push(name.to_string());
        Ok(())
    }

    fn remove_patch(&self, name: &str) -> Result<()> {
        self.cherry_picks
            .lock()
            .expect("lock poisoned")
            .retain(|p| p != name);
        self.removed
            .lock()
            .expect("lock poisoned")
            .push(name.to_string());
        Ok(())
    }
}

pub struct MockDistroInfo {
    devel: Option<String>,
    stable: String,
    stable_queries: Mutex<usize>,
}

impl MockDistroInfo {
    #[must_use]
    pub fn new(devel: Option<&str>, stable: &str) -> Self {
        Self {
            devel: devel.map(str::to_string),
            stable: stable.to_string(),
            stable_queries: Mutex::new(0),
        }
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn stable_queries(&self) -> usize {
        *self.stable_queries.lock().expect("lock poisoned")
    }
}

impl DistroInfoProvider for MockDistroInfo {
    fn devel_series(&self) -> Result<Option<String>> {
        Ok(self.devel.clone())
    }

    fn stable_release(&self) -> Result<String> {
        *self.stable_queries.lock().expect("lock poisoned") += 1;
        Ok(self.stable.clone())
    }
}

/// Scripted answers; every question asked is recorded by name.
#[derive(Default)]
pub struct MockInteractionProvider {
    first_devel_upload: bool,
    first_sru: bool,
    sru_bug: Option<BugNumber>,
    questions: Mutex<Vec<String>>,
}

impl MockInteractionProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn answering_first_devel_upload(mut self, answer: bool) -> Self {
        self.first_devel_upload = answer;
        self
    }

    #[must_use]
    pub fn answering_first_sru(mut self, answer: bool) -> Self {
        self.first_sru = answer;
        self
    }

    /// # Panics
    ///
    /// Panics if `bug` is not a bug number.
    #[must_use]
    pub fn answering_sru_bug(mut self, bug: &str) -> Self {
        self.sru_bug = Some(bug.parse().expect("valid bug number"));
        self
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().expect("lock poisoned").clone()
    }

    fn record(&self, question: String) {
        self.questions.lock().expect("lock poisoned").push(question);
    }
}

impl InteractionProvider for MockInteractionProvider {
    fn confirm_first_devel_upload(
        &self,
        devel_series: &str,
        _changelog_series: &str,
    ) -> Result<bool> {
        self.record(format!("first-devel-upload:{devel_series}"));
        Ok(self.first_devel_upload)
    }

    fn confirm_first_sru(&self, _devel_series: &str, changelog_series: &str) -> Result<bool> {
        self.record(format!("first-sru:{changelog_series}"));
        Ok(self.first_sru)
    }

    fn sru_bug(&self) -> Result<Option<BugNumber>> {
        self.record("sru-bug".to_string());
        Ok(self.sru_bug.clone())
    }
}

impl GitProvider for Arc<MockGitProvider> {
    fn describe(&self, commitish: &str) -> Result<Option<String>> {
        (**self).describe(commitish)
    }

    fn fetch(&self, remote: &str) -> Result<()> {
        (**self).fetch(remote)
    }

    fn merge(&self, commitish: &str, message: &str) -> Result<()> {
        (**self).merge(commitish, message)
    }

    fn short_hash(&self, commitish: &str) -> Result<String> {
        (**self).short_hash(commitish)
    }

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool> {
        (**self).is_ancestor(ancestor, descendant)
    }

    fn parent_count(&self, revision: &str) -> Result<usize> {
        (**self).parent_count(revision)
    }

    fn log(&self, range: &str) -> Result<String> {
        (**self).log(range)
    }

    fn current_branch(&self) -> Result<String> {
        (**self).current_branch()
    }

    fn changed_files(&self, path: &str) -> Result<Vec<String>> {
        (**self).changed_files(path)
    }

    fn stage(&self, paths: &[&str]) -> Result<()> {
        (**self).stage(paths)
    }

    fn commit(&self, message: &str) -> Result<()> {
        (**self).commit(message)
    }

    fn commit_paths(&self, message: &str, paths: &[&str]) -> Result<()> {
        (**self).commit_paths(message, paths)
    }
}

impl QuiltProvider for Arc<MockQuiltProvider> {
    fn next_patch(&self) -> Result<Option<String>> {
        (**self).next_patch()
    }

    fn push(&self) -> Result<()> {
        (**self).push()
    }

    fn refresh(&self) -> Result<()> {
        (**self).refresh()
    }

    fn pop_all(&self) -> Result<Option<i32>> {
        (**self).pop_all()
    }
}

impl PatchStore for Arc<MockPatchStore> {
    fn patches_dir(&self) -> &str {
        (**self).patches_dir()
    }

    fn cherry_picks(&self) -> Result<Vec<String>> {
        (**self).cherry_picks()
    }

    fn remove_from_series(&self, name: &str) -> Result<()> {
        (**self).remove_from_series(name)
    }

    fn remove_patch(&self, name: &str) -> Result<()> {
        (**self).remove_patch(name)
    }
}

impl DistroInfoProvider for Arc<MockDistroInfo> {
    fn devel_series(&self) -> Result<Option<String>> {
        (**self).devel_series()
    }

    fn stable_release(&self) -> Result<String> {
        (**self).stable_release()
    }
}

impl InteractionProvider for Arc<MockInteractionProvider> {
    fn confirm_first_devel_upload(
        &self,
        devel_series: &str,
        changelog_series: &str,
    ) -> Result<bool> {
        (**self).confirm_first_devel_upload(devel_series, changelog_series)
    }

    fn confirm_first_sru(&self, devel_series: &str, changelog_series: &str) -> Result<bool> {
        (**self).confirm_first_sru(devel_series, changelog_series)
    }

    fn sru_bug(&self) -> Result<Option<BugNumber>> {
        (**self).sru_bug()
    }
}

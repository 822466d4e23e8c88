use std::fmt;

use snapshot_changelog::{
    ChangelogDetails, SnapshotMessage, SnapshotSubject, format_refresh_note,
};
use snapshot_core::{BugNumber, PostStage, UploadTarget, is_upstream_tag};
use snapshot_project::SnapshotConfig;
use snapshot_version::VersionInfo;
use tracing::{debug, info};

use crate::Result;
use crate::operations::bugs::bugs_fixed_since_merge;
use crate::operations::merge::merge_commitish;
use crate::operations::patches::{drop_cherry_picks, refresh_patches};
use crate::operations::release::ReleaseInstructions;
use crate::operations::upload_target::{
    UploadDecision, UploadFlags, resolve_sru_bug, resolve_upload_target,
};
use crate::operations::version_planner::{VersionRequest, plan_next_version};
use crate::traits::{
    ChangelogReader, ChangelogWriter, DistroInfoProvider, GitProvider, InteractionProvider,
    PatchStore, QuiltProvider,
};

pub const CHANGELOG_COMMIT_MESSAGE: &str = "update changelog (new upstream snapshot)";

/// Progress of a snapshot run. Stages only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SnapshotStage {
    Start,
    Merged,
    PatchesRefreshed,
    ChangelogUpdated,
    Done,
}

impl SnapshotStage {
    /// Where a run starts when the operator already finished the stages up
    /// to and including `post_stage` by hand.
    #[must_use]
    pub fn resume_point(post_stage: Option<PostStage>) -> Self {
        match post_stage {
            None => Self::Start,
            Some(PostStage::Merge) => Self::Merged,
            Some(PostStage::Quilt) => Self::PatchesRefreshed,
        }
    }
}

impl fmt::Display for SnapshotStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Merged => "merged",
            Self::PatchesRefreshed => "patches-refreshed",
            Self::ChangelogUpdated => "changelog-updated",
            Self::Done => "done",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Default)]
pub struct SnapshotInput {
    pub commitish: String,
    pub bug: Option<BugNumber>,
    pub flags: UploadFlags,
    pub no_sru_bug: bool,
    pub post_stage: Option<PostStage>,
}

/// What the changelog stage decided and wrote.
#[derive(Debug, Clone)]
pub struct ChangelogUpdate {
    pub decision: UploadDecision,
    pub sru_bug: Option<BugNumber>,
    pub new_version: VersionInfo,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct SnapshotOutput {
    pub resumed_from: SnapshotStage,
    /// Stages reached by this run, in order.
    pub completed: Vec<SnapshotStage>,
    pub dropped_cherry_picks: Vec<String>,
    pub refreshed_patches: Vec<String>,
    pub update: ChangelogUpdate,
    pub release: ReleaseInstructions,
}

impl SnapshotOutput {
    #[must_use]
    pub fn target(&self) -> UploadTarget {
        self.update.decision.target
    }
}

/// The collaborators a snapshot run drives.
pub struct SnapshotProviders<G, Q, R, W, S, D, I> {
    pub git: G,
    pub quilt: Q,
    pub reader: R,
    pub writer: W,
    pub patches: S,
    pub distro: D,
    pub interaction: I,
}

enum Step {
    Start,
    Merged,
    PatchesRefreshed,
    ChangelogUpdated(ChangelogUpdate),
    Done(ChangelogUpdate, ReleaseInstructions),
}

impl Step {
    fn resume_from(post_stage: Option<PostStage>) -> Self {
        match SnapshotStage::resume_point(post_stage) {
            SnapshotStage::Merged => Self::Merged,
            SnapshotStage::PatchesRefreshed => Self::PatchesRefreshed,
            _ => Self::Start,
        }
    }

    fn stage(&self) -> SnapshotStage {
        match self {
            Self::Start => SnapshotStage::Start,
            Self::Merged => SnapshotStage::Merged,
            Self::PatchesRefreshed => SnapshotStage::PatchesRefreshed,
            Self::ChangelogUpdated(_) => SnapshotStage::ChangelogUpdated,
            Self::Done(..) => SnapshotStage::Done,
        }
    }
}

pub struct SnapshotOperation<G, Q, R, W, S, D, I> {
    providers: SnapshotProviders<G, Q, R, W, S, D, I>,
    config: SnapshotConfig,
}

impl<G, Q, R, W, S, D, I> SnapshotOperation<G, Q, R, W, S, D, I>
where
    G: GitProvider,
    Q: QuiltProvider,
    R: ChangelogReader,
    W: ChangelogWriter,
    S: PatchStore,
    D: DistroInfoProvider,
    I: InteractionProvider,
{
    pub fn new(providers: SnapshotProviders<G, Q, R, W, S, D, I>, config: SnapshotConfig) -> Self {
        Self { providers, config }
    }

    /// Runs the remaining stages of a snapshot of `input.commitish`.
    ///
    /// The top changelog entry is read before anything changes; version and
    /// release decisions are made against it.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that fails. Stages before it
    /// stay committed, so the run can be resumed with a `post_stage`.
    pub fn execute(&self, input: &SnapshotInput) -> Result<SnapshotOutput> {
        input.flags.validate()?;

        let old = self.providers.reader.entry(0)?;
        info!(
            source = %old.source,
            version = %old.version,
            distribution = %old.distribution,
            "current changelog entry"
        );

        let mut step = Step::resume_from(input.post_stage);
        let resumed_from = step.stage();
        if resumed_from != SnapshotStage::Start {
            info!(stage = %resumed_from, "resuming after manual fixes");
        }

        let mut completed = Vec::new();
        let mut dropped_cherry_picks = Vec::new();
        let mut refreshed_patches = Vec::new();

        loop {
            step = match step {
                Step::Start => {
                    self.merge(&input.commitish)?;
                    Step::Merged
                }
                Step::Merged => {
                    dropped_cherry_picks = drop_cherry_picks(
                        &self.providers.git,
                        &self.providers.patches,
                        &input.commitish,
                    )?;
                    refreshed_patches = self.refresh(&input.commitish)?;
                    Step::PatchesRefreshed
                }
                Step::PatchesRefreshed => {
                    Step::ChangelogUpdated(self.update_changelog(input, &old)?)
                }
                Step::ChangelogUpdated(update) => {
                    let release = ReleaseInstructions::collect(
                        &self.providers.reader,
                        &self.providers.git,
                        &old,
                        &update.decision,
                        self.providers.writer.path(),
                    )?;
                    Step::Done(update, release)
                }
                Step::Done(update, release) => {
                    return Ok(SnapshotOutput {
                        resumed_from,
                        completed,
                        dropped_cherry_picks,
                        refreshed_patches,
                        update,
                        release,
                    });
                }
            };
            debug!(stage = %step.stage(), "stage complete");
            completed.push(step.stage());
        }
    }

    fn merge(&self, commitish: &str) -> Result<()> {
        let fetch_remote = if commitish == self.config.upstream_ref() {
            self.config.upstream_remote()
        } else {
            None
        };
        merge_commitish(&self.providers.git, commitish, fetch_remote)?;
        Ok(())
    }

    fn refresh(&self, commitish: &str) -> Result<Vec<String>> {
        let refreshed = refresh_patches(
            &self.providers.git,
            &self.providers.quilt,
            &self.providers.patches,
            commitish,
        )?;
        if !refreshed.is_empty() {
            self.providers
                .writer
                .add_message(&format_refresh_note(&refreshed), None)?;
        }
        Ok(refreshed)
    }

    fn update_changelog(
        &self,
        input: &SnapshotInput,
        old: &ChangelogDetails,
    ) -> Result<ChangelogUpdate> {
        let p = &self.providers;
        let decision =
            resolve_upload_target(&p.reader, &p.distro, &p.interaction, old, input.flags)?;
        let sru_bug = resolve_sru_bug(
            &p.interaction,
            decision.target,
            input.bug.as_ref(),
            input.no_sru_bug,
        )?;

        let subject = if is_upstream_tag(&input.commitish) {
            SnapshotSubject::Tag(input.commitish.clone())
        } else {
            SnapshotSubject::Commit {
                commitish: input.commitish.clone(),
                short_hash: p.git.short_hash(&input.commitish)?,
            }
        };

        let new_version = plan_next_version(
            &VersionRequest {
                old: &old.version,
                previously_unreleased: old.is_unreleased(),
                subject: &subject,
                target: decision.target,
            },
            || p.distro.stable_release(),
        )?;

        let upstream_changelog = match &subject {
            SnapshotSubject::Tag(tag) => Some(self.config.changelog_url().url_for(tag)?),
            SnapshotSubject::Commit { .. } => None,
        };
        let bugs_fixed = if decision.target.is_devel() {
            bugs_fixed_since_merge(&p.git)?
        } else {
            Vec::new()
        };

        let message = SnapshotMessage::new(subject)
            .with_sru_bug(sru_bug.clone())
            .with_upstream_changelog(upstream_changelog)
            .with_bugs_fixed(bugs_fixed)
            .render();

        p.writer.add_message(&message, Some(&new_version))?;
        p.git
            .commit_paths(CHANGELOG_COMMIT_MESSAGE, &[p.writer.path()])?;
        info!(version = %new_version, "changelog updated");

        Ok(ChangelogUpdate {
            decision,
            sru_bug,
            new_version,
            message,
        })
    }
}

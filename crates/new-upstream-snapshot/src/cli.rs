use std::path::PathBuf;

use clap::Parser;
use snapshot_core::{BugNumber, PostStage};
use snapshot_operations::operations::{SnapshotInput, UploadFlags};

#[derive(Debug, Parser)]
#[command(name = "new-upstream-snapshot")]
#[command(bin_name = "new-upstream-snapshot")]
#[command(version = env!("NEW_UPSTREAM_SNAPSHOT_VERSION"))]
#[command(
    about = "Merge an upstream snapshot into an Ubuntu packaging branch",
    long_about = "Merges an upstream commitish into the current packaging branch, \
drops cherry picks the snapshot already contains, refreshes quilt patches and \
writes a new debian/changelog entry. Prints the commands needed to release."
)]
pub struct Cli {
    /// Commitish to merge (default: the configured upstream ref, usually upstream/main)
    #[arg(short = 'c', long)]
    pub commitish: Option<String>,

    /// Launchpad bug number to mention in the changelog entry
    #[arg(short = 'b', long)]
    pub bug: Option<BugNumber>,

    /// This is the first upload to the devel series
    #[arg(short = 'd', long)]
    pub first_devel_upload: bool,

    /// Do not ask for an SRU bug
    #[arg(short = 'n', long)]
    pub no_sru_bug: bool,

    /// This is the first SRU to a stable series
    #[arg(short = 's', long)]
    pub first_sru: bool,

    /// Resume after a stage that was finished by hand
    #[arg(short = 'p', long, value_enum)]
    pub post_stage: Option<PostStage>,

    /// Directory to start packaging discovery from (default: current directory)
    #[arg(short = 'C', long)]
    pub directory: Option<PathBuf>,

    /// More output; repeat for trace
    #[arg(short = 'v', long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only warnings and errors
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Cli {
    pub fn upload_flags(&self) -> UploadFlags {
        UploadFlags {
            first_devel_upload: self.first_devel_upload,
            first_sru: self.first_sru,
        }
    }

    pub fn snapshot_input(&self, default_commitish: &str) -> SnapshotInput {
        SnapshotInput {
            commitish: self
                .commitish
                .clone()
                .unwrap_or_else(|| default_commitish.to_string()),
            bug: self.bug.clone(),
            flags: self.upload_flags(),
            no_sru_bug: self.no_sru_bug,
            post_stage: self.post_stage,
        }
    }

    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

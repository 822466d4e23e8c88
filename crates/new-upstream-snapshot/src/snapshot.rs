use std::path::{Path, PathBuf};
use std::sync::Arc;

use snapshot_operations::operations::{SnapshotOperation, SnapshotProviders};
use snapshot_operations::providers::{
    DchChangelogWriter, FileSystemPatchStore, ParsedChangelogReader, ProcessDistroInfo,
    ProcessGitProvider, ProcessQuiltProvider,
};
use snapshot_operations::traits::InteractionProvider;
use snapshot_project::{PackagingProject, discover_project};
use snapshot_tools::{CommandRunner, REQUIRED_PROGRAMS, SystemRunner, ensure_available};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::environment::non_interactive_reason;
use crate::error::{CliError, Result};
use crate::interaction::{NonInteractiveProvider, TerminalInteractionProvider};

pub fn run(cli: &Cli) -> Result<()> {
    cli.upload_flags().validate()?;

    let start_dir = resolve_start_dir(cli.directory.as_deref())?;
    let project = discover_project(&start_dir)?;
    ensure_available(REQUIRED_PROGRAMS)?;

    match non_interactive_reason() {
        Some(reason) => {
            debug!(%reason, "questions will fail instead of prompting");
            execute(cli, &project, NonInteractiveProvider)
        }
        None => execute(cli, &project, TerminalInteractionProvider),
    }
}

fn execute<I: InteractionProvider>(
    cli: &Cli,
    project: &PackagingProject,
    interaction: I,
) -> Result<()> {
    let config = &project.config;
    let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner::new(&project.root));

    let providers = SnapshotProviders {
        git: ProcessGitProvider::new(Arc::clone(&runner)),
        quilt: ProcessQuiltProvider::new(Arc::clone(&runner), config.patches_dir()),
        reader: ParsedChangelogReader::new(Arc::clone(&runner), config.changelog()),
        writer: DchChangelogWriter::new(Arc::clone(&runner), &project.root, config.changelog()),
        patches: FileSystemPatchStore::new(&project.root, config.patches_dir()),
        distro: ProcessDistroInfo::new(runner),
        interaction,
    };

    let input = cli.snapshot_input(config.upstream_ref());
    info!(
        root = %project.root.display(),
        commitish = %input.commitish,
        "preparing upstream snapshot"
    );

    let output = SnapshotOperation::new(providers, config.clone()).execute(&input)?;
    println!("{}", output.release);
    Ok(())
}

fn resolve_start_dir(directory: Option<&Path>) -> Result<PathBuf> {
    match directory {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir().map_err(CliError::CurrentDir),
    }
}

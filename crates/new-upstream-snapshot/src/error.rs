use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Operation(#[from] snapshot_operations::OperationError),

    #[error(transparent)]
    Project(#[from] snapshot_project::ProjectError),

    #[error(transparent)]
    Tool(#[from] snapshot_tools::ToolError),

    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

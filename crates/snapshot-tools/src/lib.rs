mod debian;
mod error;
mod git;
mod process;
mod quilt;
#[cfg(any(test, feature = "testing"))]
mod scripted;

pub use debian::{Dch, DistroInfo, ParseChangelog};
pub use error::{ExitStatusText, ToolError};
pub use git::Git;
pub use process::{CommandOutput, CommandRunner, Invocation, SystemRunner, ensure_available};
pub use quilt::{QUILT_DIFF_ARGS, Quilt};
#[cfg(any(test, feature = "testing"))]
pub use scripted::ScriptedRunner;

pub type Result<T> = std::result::Result<T, ToolError>;

/// Programs the snapshot workflow shells out to.
pub const REQUIRED_PROGRAMS: &[&str] = &[
    "git",
    "quilt",
    "dch",
    "distro-info",
    "dpkg-parsechangelog",
];

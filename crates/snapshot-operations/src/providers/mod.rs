mod changelog;
mod distro_info;
mod git;
mod patch_store;
mod quilt;

pub use changelog::{DchChangelogWriter, ParsedChangelogReader};
pub use distro_info::ProcessDistroInfo;
pub use git::ProcessGitProvider;
pub use patch_store::FileSystemPatchStore;
pub use quilt::ProcessQuiltProvider;

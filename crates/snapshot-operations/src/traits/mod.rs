mod changelog;
mod distro_info;
mod git_provider;
mod interaction;
mod patch_store;
mod quilt_provider;

pub use changelog::{ChangelogReader, ChangelogWriter, DISTRIBUTION_SCAN_DEPTH};
pub use distro_info::DistroInfoProvider;
pub use git_provider::GitProvider;
pub use interaction::InteractionProvider;
pub use patch_store::PatchStore;
pub use quilt_provider::QuiltProvider;

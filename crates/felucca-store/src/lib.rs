//! Relocation of contract artifacts into a consuming project: locating
//! them, copying a filtered subset, rewriting imports and removing them
//! again.

pub mod filter;
pub mod installer;
pub mod metadata;
pub mod path_resolver;
pub mod remover;
pub mod repository;
pub mod rewrite;

pub use filter::CopyFilter;
pub use installer::{
    ArtifactInstaller, InstallOutcome, InstallRequest, describe_copied, install_artifacts,
};
pub use metadata::strip_installation_metadata;
pub use path_resolver::{PathResolver, resolve_from_index};
pub use remover::{RemovalReport, remove_locations};
pub use repository::{ClonedRepository, repository_url, resolve_from_repository};
pub use rewrite::ImportRewriter;

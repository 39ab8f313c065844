pub mod config;
pub mod io;
pub mod lockfile;
pub mod manifest;

pub use config::FeluccaConfig;
pub use io::write_atomic;
pub use lockfile::{LockedPackage, PoetryLock};
pub use manifest::{ArtifactType, Manifest, ManifestStore, PackageRecord};

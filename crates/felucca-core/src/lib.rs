pub mod init;
pub mod install;
pub mod list;
pub mod remove;
pub mod setup;
pub mod toolchain;

pub use init::InitManager;
pub use install::{InstallManager, merge_locations};
pub use list::ListManager;
pub use remove::RemoveManager;
pub use setup::SetupManager;
pub use toolchain::{ProjectLayout, Toolchain};

use std::path::Path;
use std::time::Duration;

use felucca_error::Result;
use felucca_project::{FeluccaConfig, PackageRecord};
use felucca_registry::PypiRegistry;
use felucca_runtime::{Git, Poetry};

fn with_toolchain<T>(
    project_dir: &Path,
    debug: bool,
    f: impl FnOnce(&FeluccaConfig, Toolchain<'_>) -> Result<T>,
) -> Result<T> {
    let config = FeluccaConfig::load(project_dir)?;
    felucca_logger::debug(&format!("Configuration: {config:?}"), debug);

    let poetry = Poetry::new(&config.poetry, config.site_packages.clone(), debug);
    let git = Git::new(&config.git, debug);
    let registry = PypiRegistry::new(&config.index_url, Duration::from_secs(config.timeout));

    f(
        &config,
        Toolchain {
            tool: &poetry,
            fetcher: &git,
            registry: &registry,
        },
    )
}

pub fn install_package(
    project_dir: &str,
    package: &str,
    version: Option<&str>,
    debug: bool,
) -> anyhow::Result<PackageRecord> {
    let project_dir = Path::new(project_dir);
    with_toolchain(project_dir, debug, |config, toolchain| {
        InstallManager::new(toolchain, &config.contracts_dir).install(
            project_dir,
            package,
            version,
            debug,
        )
    })
    .map_err(|e| anyhow::anyhow!(e))
}

pub fn uninstall_package(
    project_dir: &str,
    package: &str,
    debug: bool,
) -> anyhow::Result<PackageRecord> {
    let project_dir = Path::new(project_dir);
    with_toolchain(project_dir, debug, |_, toolchain| {
        RemoveManager::new(toolchain.tool).uninstall(project_dir, package, debug)
    })
    .map_err(|e| anyhow::anyhow!(e))
}

pub fn setup_project(project_dir: &str, debug: bool) -> anyhow::Result<ProjectLayout> {
    let project_dir = Path::new(project_dir);
    with_toolchain(project_dir, debug, |_, toolchain| {
        SetupManager::new(toolchain.tool).setup(project_dir, debug)
    })
    .map_err(|e| anyhow::anyhow!(e))
}

pub fn build_project(project_dir: &str, debug: bool) -> anyhow::Result<()> {
    let project_dir = Path::new(project_dir);
    with_toolchain(project_dir, debug, |_, toolchain| {
        SetupManager::new(toolchain.tool).build(project_dir)
    })
    .map_err(|e| anyhow::anyhow!(e))
}

pub fn new_project(
    parent_dir: &str,
    name: &str,
    description: Option<&str>,
) -> anyhow::Result<std::path::PathBuf> {
    InitManager::new_project(Path::new(parent_dir), name, description)
        .map_err(|e| anyhow::anyhow!(e))
}

pub fn list_packages(project_dir: &str) -> anyhow::Result<()> {
    ListManager::list_packages(Path::new(project_dir)).map_err(|e| anyhow::anyhow!(e))
}

use std::path::{Path, PathBuf};

use crate::command::{run_command, run_command_capture};
use felucca_error::{FeluccaError, Result};

/// The host package manager felucca drives for index packages.
pub trait DependencyTool {
    /// Adds `package` (optionally pinned) to the project's dependencies.
    fn add(&self, project_dir: &Path, package: &str, version: Option<&str>) -> Result<()>;
    fn remove(&self, project_dir: &Path, package: &str) -> Result<()>;
    /// Installs the project's declared dependencies.
    fn install(&self, project_dir: &Path) -> Result<()>;
    fn build(&self, project_dir: &Path) -> Result<()>;
    /// Directory the tool installs distributions into (site-packages).
    fn install_root(&self, project_dir: &Path) -> Result<PathBuf>;
}

const SITE_PACKAGES_SCRIPT: &str = "import site; print(site.getsitepackages()[0])";

#[derive(Debug, Clone)]
pub struct Poetry {
    executable: String,
    site_packages: Option<PathBuf>,
    debug: bool,
}

impl Poetry {
    #[must_use]
    pub fn new(executable: &str, site_packages: Option<PathBuf>, debug: bool) -> Self {
        Self {
            executable: executable.to_string(),
            site_packages,
            debug,
        }
    }

    fn run(&self, project_dir: &Path, args: &[&str]) -> Result<()> {
        run_command(&self.executable, args, project_dir, self.debug)
    }
}

impl DependencyTool for Poetry {
    fn add(&self, project_dir: &Path, package: &str, version: Option<&str>) -> Result<()> {
        let requirement = version.map_or_else(|| package.to_string(), |v| format!("{package}@{v}"));
        self.run(project_dir, &["add", &requirement, "--quiet"])
    }

    fn remove(&self, project_dir: &Path, package: &str) -> Result<()> {
        self.run(project_dir, &["remove", package, "--quiet"])
    }

    fn install(&self, project_dir: &Path) -> Result<()> {
        self.run(project_dir, &["install", "--quiet"])
    }

    fn build(&self, project_dir: &Path) -> Result<()> {
        self.run(project_dir, &["build"])
    }

    fn install_root(&self, project_dir: &Path) -> Result<PathBuf> {
        if let Some(dir) = &self.site_packages {
            return Ok(dir.clone());
        }

        let args = ["run", "python", "-c", SITE_PACKAGES_SCRIPT];
        let output = run_command_capture(&self.executable, &args, project_dir, self.debug)?;
        if !output.success() || output.stdout.is_empty() {
            felucca_logger::debug(&output.stderr, self.debug);
            return Err(FeluccaError::ExternalTool {
                command: format!("{} {}", self.executable, args.join(" ")),
                code: output.code,
            });
        }

        let line = output.stdout.lines().last().unwrap_or_default().trim();
        Ok(PathBuf::from(line))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    // A stand-in `poetry` that logs its arguments and answers the
    // site-packages query.
    fn fake_poetry(dir: &Path, exit_code: i32) -> PathBuf {
        let script = dir.join("poetry");
        fs::write(
            &script,
            format!(
                "#!/bin/sh\necho \"$@\" >> \"{}\"\nif [ \"$1\" = run ]; then echo /venv/site-packages; fi\nexit {exit_code}\n",
                dir.join("calls.log").display()
            ),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    #[test]
    fn test_add_pins_version() {
        let dir = tempdir().unwrap();
        let exe = fake_poetry(dir.path(), 0);
        let poetry = Poetry::new(exe.to_str().unwrap(), None, false);

        poetry.add(dir.path(), "cairo-math", Some("0.2.1")).unwrap();
        poetry.remove(dir.path(), "cairo-math").unwrap();

        let calls = fs::read_to_string(dir.path().join("calls.log")).unwrap();
        assert_eq!(
            calls,
            "add cairo-math@0.2.1 --quiet\nremove cairo-math --quiet\n"
        );
    }

    #[test]
    fn test_install_root_from_interpreter() {
        let dir = tempdir().unwrap();
        let exe = fake_poetry(dir.path(), 0);
        let poetry = Poetry::new(exe.to_str().unwrap(), None, false);
        assert_eq!(
            poetry.install_root(dir.path()).unwrap(),
            PathBuf::from("/venv/site-packages")
        );
    }

    #[test]
    fn test_install_root_override_skips_interpreter() {
        let poetry = Poetry::new("unused", Some(PathBuf::from("/custom")), false);
        assert_eq!(
            poetry.install_root(Path::new(".")).unwrap(),
            PathBuf::from("/custom")
        );
    }

    #[test]
    fn test_failed_build_reports_exit_code() {
        let dir = tempdir().unwrap();
        let exe = fake_poetry(dir.path(), 1);
        let poetry = Poetry::new(exe.to_str().unwrap(), None, false);
        assert!(matches!(
            poetry.build(dir.path()),
            Err(FeluccaError::ExternalTool { code: Some(1), .. })
        ));
    }
}

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use felucca_error::{FeluccaError, Result};

static REPOSITORY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<owner>[\w-]+)/(?P<repo>[\w-]+)(?:@(?P<tag>v\d+\.\d+\.\d+))?$")
        .unwrap_or_else(|e| panic!("invalid repository pattern: {e}"))
});

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v\d+\.\d+\.\d+$").unwrap_or_else(|e| panic!("invalid tag pattern: {e}"))
});

// PEP 508 distribution name.
static INDEX_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:[a-z0-9]|[a-z0-9][a-z0-9._-]*[a-z0-9])$")
        .unwrap_or_else(|e| panic!("invalid index name pattern: {e}"))
});

/// A package identifier as typed on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSpec {
    /// Distributed through the package index and installed as a wheel.
    Index {
        name: String,
        version: Option<String>,
    },
    /// A source repository cloned at a version tag.
    Repository {
        owner: String,
        repo: String,
        tag: Option<String>,
    },
}

impl PackageSpec {
    /// Key under which the package is recorded in the manifest.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Index { name, .. } => name.clone(),
            Self::Repository { owner, repo, .. } => format!("{owner}/{repo}"),
        }
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Index { version, .. } => version.as_deref(),
            Self::Repository { tag, .. } => tag.as_deref(),
        }
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version() {
            Some(version) => write!(f, "{}@{version}", self.name()),
            None => write!(f, "{}", self.name()),
        }
    }
}

/// Returns true when `spec` has the `owner/repo[@vX.Y.Z]` shape.
#[must_use]
pub fn is_repository_package(spec: &str) -> bool {
    REPOSITORY_PATTERN.is_match(spec)
}

/// Whether `name` is a valid distribution name on the package index.
#[must_use]
pub fn is_valid_index_name(name: &str) -> bool {
    INDEX_NAME_PATTERN.is_match(name)
}

/// Parses a command-line package identifier plus the optional version
/// argument that may follow it.
pub fn parse_pkg_spec(spec: &str, version: Option<&str>) -> Result<PackageSpec> {
    let spec = spec.trim();
    let version = version.map(str::trim).filter(|v| !v.is_empty());

    if let Some(caps) = REPOSITORY_PATTERN.captures(spec) {
        let owner = caps.name("owner").map_or("", |m| m.as_str()).to_string();
        let repo = caps.name("repo").map_or("", |m| m.as_str()).to_string();
        let inline_tag = caps.name("tag").map(|m| m.as_str().to_string());

        let tag = match (inline_tag, version) {
            (Some(inline), Some(arg)) if inline != arg => {
                return Err(FeluccaError::InvalidPackageSpec(format!(
                    "{spec} conflicts with version {arg}"
                )));
            }
            (Some(inline), _) => Some(inline),
            (None, Some(arg)) if TAG_PATTERN.is_match(arg) => Some(arg.to_string()),
            (None, Some(arg)) => {
                return Err(FeluccaError::InvalidPackageSpec(format!(
                    "repository tags must look like vMAJOR.MINOR.PATCH, got {arg}"
                )));
            }
            (None, None) => None,
        };

        return Ok(PackageSpec::Repository { owner, repo, tag });
    }

    let (name, inline_version) = match spec.split_once("==").or_else(|| spec.split_once('@')) {
        Some((n, v)) if !n.is_empty() => (n.to_string(), Some(v.to_string())),
        _ => (spec.to_string(), None),
    };

    if !is_valid_index_name(&name) {
        return Err(FeluccaError::InvalidPackageSpec(spec.to_string()));
    }

    let version = match (inline_version, version) {
        (Some(inline), Some(arg)) if inline != arg => {
            return Err(FeluccaError::InvalidPackageSpec(format!(
                "{spec} conflicts with version {arg}"
            )));
        }
        (Some(inline), _) => Some(inline),
        (None, arg) => arg.map(str::to_string),
    };

    Ok(PackageSpec::Index { name, version })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_with_tag_is_classified() {
        assert!(is_repository_package("octocat/hello-world@v1.2.3"));
        let spec = parse_pkg_spec("octocat/hello-world@v1.2.3", None).unwrap();
        assert_eq!(
            spec,
            PackageSpec::Repository {
                owner: "octocat".to_string(),
                repo: "hello-world".to_string(),
                tag: Some("v1.2.3".to_string()),
            }
        );
        assert_eq!(spec.name(), "octocat/hello-world");
    }

    #[test]
    fn test_plain_name_is_index_package() {
        assert!(!is_repository_package("requests"));
        let spec = parse_pkg_spec("requests", None).unwrap();
        assert_eq!(
            spec,
            PackageSpec::Index {
                name: "requests".to_string(),
                version: None
            }
        );
    }

    #[test]
    fn test_repository_without_tag() {
        let spec = parse_pkg_spec("OpenZeppelin/cairo-contracts", None).unwrap();
        assert!(matches!(spec, PackageSpec::Repository { tag: None, .. }));
        assert_eq!(spec.version(), None);
    }

    #[test]
    fn test_repository_tag_from_argument() {
        let spec = parse_pkg_spec("OpenZeppelin/cairo-contracts", Some("v0.4.0")).unwrap();
        assert_eq!(spec.version(), Some("v0.4.0"));
    }

    #[test]
    fn test_repository_tag_conflict_is_rejected() {
        let err = parse_pkg_spec("a/b@v1.0.0", Some("v2.0.0")).unwrap_err();
        assert!(matches!(err, FeluccaError::InvalidPackageSpec(_)));
    }

    #[test]
    fn test_repository_tag_must_be_semver_like() {
        assert!(parse_pkg_spec("a/b", Some("main")).is_err());
    }

    #[test]
    fn test_non_v_tag_is_not_a_repository() {
        // Falls through to the index branch and fails name validation.
        assert!(!is_repository_package("a/b@1.2.3"));
        assert!(parse_pkg_spec("a/b@1.2.3", None).is_err());
    }

    #[test]
    fn test_index_inline_versions() {
        let at = parse_pkg_spec("cairo-math@0.2.1", None).unwrap();
        assert_eq!(at.version(), Some("0.2.1"));
        let pinned = parse_pkg_spec("cairo-math==0.2.1", None).unwrap();
        assert_eq!(pinned.name(), "cairo-math");
        assert_eq!(pinned.version(), Some("0.2.1"));
    }

    #[test]
    fn test_index_version_argument() {
        let spec = parse_pkg_spec("cairo-math", Some("1.0.0")).unwrap();
        assert_eq!(spec.to_string(), "cairo-math@1.0.0");
    }

    #[test]
    fn test_invalid_index_names() {
        assert!(is_valid_index_name("my-contracts"));
        assert!(!is_valid_index_name("my contracts"));
        assert!(parse_pkg_spec("-leading", None).is_err());
        assert!(parse_pkg_spec("has space", None).is_err());
        assert!(parse_pkg_spec("", None).is_err());
    }
}

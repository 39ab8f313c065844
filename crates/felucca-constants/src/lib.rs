pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "A package manager for Cairo contracts";
pub const REPOSITORY_URL: &str = "https://pypi.org/project/felucca/";
pub const BIN_NAME: &str = "felucca";
pub const COMMANDS: &[(&str, &str, &[&str])] = &[
    (
        "install",
        "Installs a Cairo contracts package into the project",
        &["i", "add"],
    ),
    (
        "uninstall",
        "Removes an installed contracts package",
        &["rm", "remove"],
    ),
    ("setup", "Prepares an existing project for felucca", &[]),
    ("new", "Creates a new Cairo project", &["init"]),
    ("build", "Builds the project distribution", &[]),
    ("list", "Lists installed contracts packages", &["ls"]),
    (
        "help",
        "Shows help information for felucca or a specific command",
        &[],
    ),
];
pub const EXAMPLES: &[(&str, &str)] = &[
    ("felucca install openzeppelin-cairo-contracts", "Install from PyPI"),
    (
        "felucca install OpenZeppelin/cairo-contracts@v0.4.0",
        "Install from a repository tag",
    ),
    ("felucca uninstall openzeppelin-cairo-contracts", "Remove a package"),
    ("felucca new my-contracts", "Create a new project"),
    ("felucca setup", "Prepare the current project"),
    ("felucca list", "List installed packages"),
];

pub const USER_AGENT: &str = concat!("felucca/", env!("CARGO_PKG_VERSION"));
pub const MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/pypi";
pub const GITHUB_URL: &str = "https://github.com";
pub const COMPATIBILITY_KEYWORD: &str = "felucca";

pub const MANIFEST_FILE: &str = "pyproject.toml";
pub const LOCK_FILE: &str = "poetry.lock";
pub const MANIFEST_TABLE: &str = "felucca";
pub const CONTRACTS_TABLE: &str = "contracts";

pub const CONTRACT_EXTENSION: &str = "cairo";
pub const REPOSITORY_CONTRACTS_DIR: &str = "src";
pub const INSTALL_METADATA_SUFFIX: &str = ".dist-info";
pub const BYTECODE_CACHE_DIR: &str = "__pycache__";
pub const BYTECODE_EXTENSIONS: &[&str] = &["pyc", "pyo"];
pub const VCS_DIRS: &[&str] = &[".git"];

pub const DEFAULT_POETRY: &str = "poetry";
pub const DEFAULT_GIT: &str = "git";
pub const LATEST_VERSION: &str = "latest";

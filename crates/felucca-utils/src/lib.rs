pub mod package_spec;
pub mod path_utils;

pub use package_spec::{PackageSpec, is_repository_package, is_valid_index_name, parse_pkg_spec};
pub use path_utils::*;

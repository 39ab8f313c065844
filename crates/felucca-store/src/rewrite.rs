use std::borrow::Cow;
use std::fs;
use std::path::Path;

use regex::{Captures, Regex};

use felucca_error::{FeluccaError, Result};

/// Re-roots `import <module>.` and `from <module>.` references under the
/// consuming project's package.
///
/// This is a token-boundary text match, not a parse of the contract: the
/// module name must be followed by `.` so `import foo_extra.x` is left alone
/// when relocating `foo`.
#[derive(Debug, Clone)]
pub struct ImportRewriter {
    pattern: Regex,
    module: String,
    project_module: String,
}

impl ImportRewriter {
    pub fn new(module: &str, project_module: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"\b(?P<kw>from|import)(?P<ws>\s+){}\.",
            regex::escape(module)
        ))
        .map_err(|e| FeluccaError::InvalidPackageSpec(format!("{module}: {e}")))?;

        Ok(Self {
            pattern,
            module: module.to_string(),
            project_module: project_module.to_string(),
        })
    }

    #[must_use]
    pub fn rewrite<'a>(&self, source: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(source, |caps: &Captures<'_>| {
            format!(
                "{}{}{}.{}.",
                &caps["kw"], &caps["ws"], self.project_module, self.module
            )
        })
    }

    /// Rewrites `path` in place; returns whether anything changed.
    pub fn rewrite_file(&self, path: &Path) -> Result<bool> {
        let content = fs::read_to_string(path).map_err(|e| FeluccaError::from_io(e, path))?;
        match self.rewrite(&content) {
            Cow::Borrowed(_) => Ok(false),
            Cow::Owned(rewritten) => {
                fs::write(path, rewritten).map_err(|e| FeluccaError::from_io(e, path))?;
                Ok(true)
            }
        }
    }
}

//! Repository layout: where each compiler reads from and writes to.

use crate::docs::{FUNCTIONS_OUTPUT, NOTATION_OUTPUT};
use crate::index::INDEX_OUTPUT;
use crate::overlay::REWRITES_FILE;
use crate::source::SourceKind;
use std::path::{Path, PathBuf};

/// Environment variable overriding the documentation-extraction directory.
pub const DOCS_DIR_ENV: &str = "STRUDEL_DOCS_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub root: PathBuf,
    pub data_dir: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let data_dir = root.join("data");
        Self { root, data_dir }
    }

    pub fn source_dir(&self, kind: SourceKind) -> PathBuf {
        match kind {
            SourceKind::AntiPatterns => self.data_dir.join("anti-patterns"),
            SourceKind::Idioms => self.data_dir.join("idioms"),
            SourceKind::Snippets => self.root.join("snippets"),
        }
    }

    pub fn output_path(&self, kind: SourceKind) -> PathBuf {
        self.data_dir.join(kind.output_file())
    }

    /// Sibling checkout of the documentation-extraction project.
    pub fn default_docs_dir(&self) -> PathBuf {
        self.root.join("..").join("strudel-docs")
    }

    pub fn functions_path(&self) -> PathBuf {
        self.data_dir.join(FUNCTIONS_OUTPUT)
    }

    pub fn functions_index_path(&self) -> PathBuf {
        self.data_dir.join(INDEX_OUTPUT)
    }

    pub fn notation_path(&self) -> PathBuf {
        self.data_dir.join(NOTATION_OUTPUT)
    }

    pub fn rewrites_path(&self) -> PathBuf {
        self.data_dir.join(REWRITES_FILE)
    }
}

/// Expand a leading `~` with `$HOME` and make the path absolute.
///
/// Relative paths resolve against the current directory; if that cannot be
/// read the path is returned as given.
pub fn resolve_path(path: &Path) -> PathBuf {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    };

    if expanded.is_absolute() {
        return expanded;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&expanded))
        .unwrap_or(expanded)
}

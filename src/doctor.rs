//! Health check for a repository layout.
//!
//! The doctor command checks:
//! - Each directory-backed source exists and how many files it holds
//! - The documentation-extraction catalogs are present
//! - Which generated indexes and the rewrites overlay exist
//!
//! # Key Functions
//!
//! - [`run_doctor`]: Generate a diagnostic report

use crate::compile::discover;
use crate::config::Layout;
use crate::docs::DocsSource;
use crate::source::SourceKind;
use std::path::{Path, PathBuf};

#[derive(Debug, serde::Serialize)]
pub struct SourceCheck {
    pub kind: SourceKind,
    pub dir: PathBuf,
    pub dir_exists: bool,
    pub files: usize,
    pub output_exists: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct PathCheck {
    pub path: PathBuf,
    pub exists: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct DoctorReport {
    pub root: PathBuf,
    pub sources: Vec<SourceCheck>,
    pub docs_dir: PathBuf,
    pub docs: Vec<PathCheck>,
    pub outputs: Vec<PathCheck>,
}

impl DoctorReport {
    pub fn docs_ok(&self) -> bool {
        self.docs.iter().all(|check| check.exists)
    }
}

fn check(path: PathBuf) -> PathCheck {
    let exists = path.is_file();
    PathCheck { path, exists }
}

pub fn run_doctor(layout: &Layout, docs_dir: &Path) -> DoctorReport {
    let sources = SourceKind::ALL
        .iter()
        .map(|&kind| {
            let dir = layout.source_dir(kind);
            let dir_exists = dir.is_dir();
            let files = if dir_exists {
                discover(kind, &dir).map(|files| files.len()).unwrap_or(0)
            } else {
                0
            };
            SourceCheck {
                kind,
                dir_exists,
                files,
                output_exists: layout.output_path(kind).is_file(),
                dir,
            }
        })
        .collect();

    let docs = DocsSource::new(docs_dir);
    DoctorReport {
        root: layout.root.clone(),
        sources,
        docs_dir: docs_dir.to_path_buf(),
        docs: vec![
            check(docs.functions_path()),
            check(docs.sounds_path()),
            check(docs.patterns_path()),
        ],
        outputs: vec![
            check(layout.functions_path()),
            check(layout.functions_index_path()),
            check(layout.notation_path()),
            check(layout.rewrites_path()),
        ],
    }
}

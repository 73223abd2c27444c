//! Batch compiler for directory-backed sources.
//!
//! # Key Functions
//!
//! - [`discover`]: List matching source files in sorted filename order
//! - [`compile_dir`]: Normalize every file and write the JSONL index

use crate::jsonl::{JsonlError, write_jsonl};
use crate::model::Record;
use crate::source::{RejectReason, Rejection, SourceKind};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, serde::Serialize)]
pub struct CompileReport {
    pub kind: SourceKind,
    pub source: PathBuf,
    pub scanned: usize,
    pub written: usize,
    pub rejected: Vec<Rejection>,
    /// Set only when an output file was (re)written.
    pub output: Option<PathBuf>,
}

impl CompileReport {
    fn empty(kind: SourceKind, source: &Path) -> Self {
        Self {
            kind,
            source: source.to_path_buf(),
            scanned: 0,
            written: 0,
            rejected: Vec::new(),
            output: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("walk error: {source}")]
    Walk { source: walkdir::Error },
    #[error(transparent)]
    Jsonl(#[from] JsonlError),
}

impl From<walkdir::Error> for CompileError {
    fn from(source: walkdir::Error) -> Self {
        Self::Walk { source }
    }
}

/// Source files of `kind` directly inside `src_dir`, sorted by filename.
///
/// Symlinked files count as sources.
pub fn discover(kind: SourceKind, src_dir: &Path) -> Result<Vec<PathBuf>, CompileError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(src_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() && kind.matches(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Normalize one file, turning every failure into a rejection.
pub fn compile_file(kind: SourceKind, path: &Path) -> Result<Record, Rejection> {
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let contents = std::fs::read_to_string(path).map_err(|err| Rejection {
        file: file.clone(),
        reason: RejectReason::Unreadable {
            message: err.to_string(),
        },
    })?;

    kind.parse(path, &contents)
        .map_err(|reason| Rejection { file, reason })
}

/// Compile every `kind` source in `src_dir` into `out_dir/<kind>.jsonl`.
///
/// A missing source directory is created and yields an empty report; a
/// directory without matching files leaves any existing output untouched.
pub fn compile_dir(
    kind: SourceKind,
    src_dir: &Path,
    out_dir: &Path,
) -> Result<CompileReport, CompileError> {
    let mut report = CompileReport::empty(kind, src_dir);

    if !src_dir.is_dir() {
        tracing::info!(dir = %src_dir.display(), "creating missing source directory");
        std::fs::create_dir_all(src_dir).map_err(|source| CompileError::Io {
            path: src_dir.to_path_buf(),
            source,
        })?;
        return Ok(report);
    }

    let files = discover(kind, src_dir)?;
    report.scanned = files.len();
    if files.is_empty() {
        tracing::info!(
            kind = kind.label(),
            dir = %src_dir.display(),
            "no source files found"
        );
        return Ok(report);
    }

    let mut records = Vec::with_capacity(files.len());
    for path in &files {
        match compile_file(kind, path) {
            Ok(record) => {
                tracing::debug!(file = %path.display(), key = record.key(), "compiled");
                records.push(record);
            }
            Err(rejection) => {
                tracing::warn!("{} {}", rejection.file, rejection.reason);
                report.rejected.push(rejection);
            }
        }
    }

    std::fs::create_dir_all(out_dir).map_err(|source| CompileError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let out_path = out_dir.join(kind.output_file());
    report.written = write_jsonl(&out_path, &records)?;
    report.output = Some(out_path);
    Ok(report)
}

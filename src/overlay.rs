//! Overlay merge onto an already written JSONL index.
//!
//! The patch document maps join-key values to payloads, e.g.
//! `{"rewrites": {"~": {"alsoAccepts": ["-"]}}}`. Every record whose join
//! field matches a key gets the payload under the overlay field; all other
//! lines are written back with their original text, in their original order.

use crate::jsonl::{JsonlError, read_lines, write_lines};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const REWRITES_FILE: &str = "mini-notation-rewrites.json";

#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("{path} not found")]
    Missing { path: PathBuf },
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid patch document {path}: {source}")]
    InvalidPatch {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Jsonl(#[from] JsonlError),
}

/// Which field joins records to patches, and where the payload lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay<'a> {
    pub join_key: &'a str,
    pub field: &'a str,
}

/// Notation-token rewrites keyed by token.
pub const NOTATION_REWRITES: Overlay<'static> = Overlay {
    join_key: "token",
    field: "rewrites",
};

#[derive(Debug, Default, serde::Serialize)]
pub struct MergeReport {
    pub records: usize,
    pub merged: usize,
    pub rewritten: bool,
}

/// Attach the matching patch to `record` in place. Returns whether one matched.
pub fn patch_record(
    record: &mut Map<String, Value>,
    patches: &Map<String, Value>,
    overlay: Overlay<'_>,
) -> bool {
    let Some(patch) = record
        .get(overlay.join_key)
        .and_then(Value::as_str)
        .and_then(|key| patches.get(key))
    else {
        return false;
    };
    let patch = patch.clone();
    record.insert(overlay.field.to_string(), patch);
    true
}

/// Patch mapping stored under `overlay.field` in the patch document.
pub fn load_patches(path: &Path, overlay: Overlay<'_>) -> Result<Map<String, Value>, OverlayError> {
    let contents = std::fs::read_to_string(path).map_err(|source| OverlayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: Value = serde_json::from_str(&contents).map_err(|source| OverlayError::InvalidPatch {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(doc
        .get(overlay.field)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default())
}

/// Merge the patch document at `patch_path` into the JSONL file at `jsonl_path`.
///
/// Both files must exist. An empty patch mapping is a no-op and leaves the
/// target untouched. Otherwise the target is rewritten: patched records are
/// re-serialized and every other line keeps its original bytes.
/// Blank lines are dropped, so the line count is preserved only for targets
/// without them.
pub fn merge_overlay(
    jsonl_path: &Path,
    patch_path: &Path,
    overlay: Overlay<'_>,
) -> Result<MergeReport, OverlayError> {
    for path in [jsonl_path, patch_path] {
        if !path.is_file() {
            return Err(OverlayError::Missing {
                path: path.to_path_buf(),
            });
        }
    }

    let patches = load_patches(patch_path, overlay)?;
    if patches.is_empty() {
        tracing::info!(path = %patch_path.display(), "no patches found in overlay file");
        return Ok(MergeReport::default());
    }

    let mut lines = read_lines(jsonl_path)?;
    let mut merged = 0;
    for line in &mut lines {
        if !patch_record(&mut line.object, &patches, overlay) {
            continue;
        }
        line.raw = serde_json::to_string(&line.object).map_err(|source| JsonlError::Serialize {
            path: jsonl_path.to_path_buf(),
            source,
        })?;
        merged += 1;
    }
    write_lines(jsonl_path, lines.iter().map(|line| line.raw.as_str()))?;

    Ok(MergeReport {
        records: lines.len(),
        merged,
        rewritten: true,
    })
}

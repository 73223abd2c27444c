//! Function category index.
//!
//! Derived from `functions.jsonl`: one line per category holding only the
//! sorted function names, e.g. `{"cat":"Effects","names":["delay","lpf"]}`.

use crate::jsonl::{JsonlError, read_objects, write_jsonl};
use crate::model::FunctionCategory;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const INDEX_OUTPUT: &str = "functions-index.jsonl";

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("missing {path}")]
    Missing { path: PathBuf },
    #[error(transparent)]
    Jsonl(#[from] JsonlError),
}

#[derive(Debug, serde::Serialize)]
pub struct IndexReport {
    pub categories: usize,
    pub functions: usize,
    pub output: PathBuf,
}

/// Group function names by category; categories and names come out sorted.
///
/// Records without a non-empty `name` and `cat` are ignored.
pub fn build_index(records: &[Map<String, Value>]) -> Vec<FunctionCategory> {
    let mut grouped: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for record in records {
        let field = |key: &str| record.get(key).and_then(Value::as_str).filter(|s| !s.is_empty());
        let (Some(name), Some(cat)) = (field("name"), field("cat")) else {
            continue;
        };
        grouped.entry(cat).or_default().push(name.to_string());
    }

    grouped
        .into_iter()
        .map(|(cat, mut names)| {
            names.sort();
            FunctionCategory {
                cat: cat.to_string(),
                names,
            }
        })
        .collect()
}

/// Rebuild `out_path` from the function reference at `functions_path`.
pub fn generate_index(functions_path: &Path, out_path: &Path) -> Result<IndexReport, IndexError> {
    if !functions_path.is_file() {
        return Err(IndexError::Missing {
            path: functions_path.to_path_buf(),
        });
    }

    let records = read_objects(functions_path)?;
    let index = build_index(&records);
    let functions = index.iter().map(|entry| entry.names.len()).sum();
    let categories = write_jsonl(out_path, &index)?;

    Ok(IndexReport {
        categories,
        functions,
        output: out_path.to_path_buf(),
    })
}

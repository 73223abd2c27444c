//! Compilers for the documentation-extraction catalogs.
//!
//! The extraction directory holds three JSON documents:
//!
//! - `api/output/functions.json`: `{"categories": {cat: [function, ...]}}`
//! - `soundbank/output/sounds.json`: `{"categories": {cat: info}}`
//! - `patterns/output/patterns.json`: `{"miniNotation": {"tokens": [...]}}`
//!
//! All three must exist and parse before anything is written.

use crate::jsonl::{JsonlError, write_jsonl};
use crate::model::{FunctionRecord, NotationToken, SoundRecord};
use crate::normalize::{json_text, truthy_field};
use crate::sounds::split_categories;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const FUNCTIONS_OUTPUT: &str = "functions.jsonl";
pub const SOUNDS_OUTPUT: &str = "sounds.jsonl";
pub const NOTATION_OUTPUT: &str = "mini-notation.jsonl";

#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error("missing {path}")]
    Missing { path: PathBuf },
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid json in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unexpected layout in {path}: {message}")]
    Schema { path: PathBuf, message: String },
    #[error(transparent)]
    Jsonl(#[from] JsonlError),
}

/// Locations of the catalogs inside a documentation-extraction directory.
#[derive(Debug, Clone)]
pub struct DocsSource {
    pub root: PathBuf,
}

impl DocsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn functions_path(&self) -> PathBuf {
        self.root.join("api").join("output").join("functions.json")
    }

    pub fn sounds_path(&self) -> PathBuf {
        self.root.join("soundbank").join("output").join("sounds.json")
    }

    pub fn patterns_path(&self) -> PathBuf {
        self.root.join("patterns").join("output").join("patterns.json")
    }

    /// Fail on the first catalog file that does not exist.
    pub fn validate(&self) -> Result<(), DocsError> {
        for path in [
            self.functions_path(),
            self.sounds_path(),
            self.patterns_path(),
        ] {
            if !path.is_file() {
                return Err(DocsError::Missing { path });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, serde::Serialize)]
pub struct DocsReport {
    pub functions: usize,
    pub sound_lines: usize,
    pub tokens: usize,
    pub skipped: usize,
}

/// Compile all three catalogs from `source` into `out_dir`.
///
/// Every catalog is loaded before the first output is written, so a bad
/// catalog leaves all previous outputs in place.
pub fn generate_docs(source: &DocsSource, out_dir: &Path) -> Result<DocsReport, DocsError> {
    source.validate()?;
    let (functions, skipped_functions) = load_functions(&source.functions_path())?;
    let sounds = load_sounds(&source.sounds_path())?;
    let (tokens, skipped_tokens) = load_notation(&source.patterns_path())?;

    std::fs::create_dir_all(out_dir).map_err(|err| DocsError::Io {
        path: out_dir.to_path_buf(),
        source: err,
    })?;

    Ok(DocsReport {
        functions: write_jsonl(&out_dir.join(FUNCTIONS_OUTPUT), &functions)?,
        sound_lines: write_jsonl(&out_dir.join(SOUNDS_OUTPUT), &sounds)?,
        tokens: write_jsonl(&out_dir.join(NOTATION_OUTPUT), &tokens)?,
        skipped: skipped_functions + skipped_tokens,
    })
}

fn read_json(path: &Path) -> Result<Value, DocsError> {
    if !path.is_file() {
        return Err(DocsError::Missing {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|source| DocsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| DocsError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

fn categories<'a>(path: &Path, doc: &'a Value) -> Result<&'a Map<String, Value>, DocsError> {
    doc.get("categories")
        .and_then(Value::as_object)
        .ok_or_else(|| DocsError::Schema {
            path: path.to_path_buf(),
            message: "expected a `categories` object".to_string(),
        })
}

/// Function records in category order, plus the number of entries skipped.
pub fn load_functions(path: &Path) -> Result<(Vec<FunctionRecord>, usize), DocsError> {
    let doc = read_json(path)?;
    Ok(function_records(categories(path, &doc)?))
}

pub fn function_records(categories: &Map<String, Value>) -> (Vec<FunctionRecord>, usize) {
    let mut records = Vec::new();
    let mut skipped = 0;

    for (cat, functions) in categories {
        let Some(functions) = functions.as_array() else {
            tracing::warn!(cat = %cat, "function category is not a list");
            continue;
        };
        for entry in functions {
            let Some(entry) = entry.as_object() else {
                skipped += 1;
                continue;
            };
            let Some(name) = entry.get("name").and_then(Value::as_str).filter(|n| !n.is_empty())
            else {
                tracing::warn!(cat = %cat, "function entry missing required field: name");
                skipped += 1;
                continue;
            };
            records.push(FunctionRecord {
                name: name.to_string(),
                cat: cat.clone(),
                desc: truthy_field(entry, "description"),
                synonyms: truthy_field(entry, "synonyms"),
                params: truthy_field(entry, "parameters"),
                examples: truthy_field(entry, "examples"),
            });
        }
    }

    (records, skipped)
}

/// Sound catalog split into one record per output line.
pub fn load_sounds(path: &Path) -> Result<Vec<SoundRecord>, DocsError> {
    let doc = read_json(path)?;
    Ok(split_categories(categories(path, &doc)?))
}

/// Notation token records in document order, plus the number skipped.
pub fn load_notation(path: &Path) -> Result<(Vec<NotationToken>, usize), DocsError> {
    let doc = read_json(path)?;
    let tokens = doc
        .get("miniNotation")
        .and_then(|mini| mini.get("tokens"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    Ok(notation_records(tokens))
}

pub fn notation_records(tokens: &[Value]) -> (Vec<NotationToken>, usize) {
    let mut records = Vec::new();
    let mut skipped = 0;

    for entry in tokens {
        let token = entry.get("token").and_then(Value::as_str);
        let meaning = entry.get("meaning").filter(|v| !v.is_null());
        let (Some(token), Some(meaning)) = (token, meaning) else {
            tracing::warn!(entry = %entry, "notation token missing token or meaning");
            skipped += 1;
            continue;
        };
        records.push(NotationToken {
            token: token.to_string(),
            meaning: json_text(Some(meaning)),
            desc: json_text(entry.get("description")),
            example: entry
                .as_object()
                .and_then(|object| truthy_field(object, "example")),
        });
    }

    (records, skipped)
}

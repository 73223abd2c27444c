//! Line-delimited JSON reading and writing.
//!
//! Output is compact (no whitespace between tokens), UTF-8 with non-ASCII
//! characters left unescaped, one value per line, in the order supplied.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum JsonlError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize record for {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid jsonl in {path} at line {line}: {source}")]
    InvalidLine {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },
    #[error("line {line} of {path} is not a JSON object")]
    NotAnObject { path: PathBuf, line: usize },
}

impl JsonlError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// One parsed line together with the text it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonLine {
    pub raw: String,
    pub object: Map<String, Value>,
}

/// Overwrite `path` with one line per record and return how many were written.
pub fn write_jsonl<T, I>(path: &Path, records: I) -> Result<usize, JsonlError>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let file = File::create(path).map_err(|source| JsonlError::io(path, source))?;
    let mut out = BufWriter::new(file);
    let mut count = 0;

    for record in records {
        serde_json::to_writer(&mut out, &record).map_err(|source| JsonlError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        out.write_all(b"\n")
            .map_err(|source| JsonlError::io(path, source))?;
        count += 1;
    }

    out.flush().map_err(|source| JsonlError::io(path, source))?;
    Ok(count)
}

/// Overwrite `path` with already serialized lines, written verbatim.
pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<usize, JsonlError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let file = File::create(path).map_err(|source| JsonlError::io(path, source))?;
    let mut out = BufWriter::new(file);
    let mut count = 0;

    for line in lines {
        out.write_all(line.as_ref().as_bytes())
            .and_then(|()| out.write_all(b"\n"))
            .map_err(|source| JsonlError::io(path, source))?;
        count += 1;
    }

    out.flush().map_err(|source| JsonlError::io(path, source))?;
    Ok(count)
}

/// Read every non-blank line of a JSONL file as an object, in file order.
///
/// A line that is not valid JSON fails the whole read.
pub fn read_objects(path: &Path) -> Result<Vec<Map<String, Value>>, JsonlError> {
    Ok(read_lines(path)?
        .into_iter()
        .map(|line| line.object)
        .collect())
}

/// Like [`read_objects`], but keeps each line's original text next to its
/// parsed object. Blank lines are skipped.
pub fn read_lines(path: &Path) -> Result<Vec<JsonLine>, JsonlError> {
    let contents = std::fs::read_to_string(path).map_err(|source| JsonlError::io(path, source))?;
    let mut lines = Vec::new();

    for (idx, raw) in contents.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }

        let value: Value = serde_json::from_str(text).map_err(|source| JsonlError::InvalidLine {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        match value {
            Value::Object(object) => lines.push(JsonLine {
                raw: raw.to_string(),
                object,
            }),
            _ => {
                return Err(JsonlError::NotAnObject {
                    path: path.to_path_buf(),
                    line: idx + 1,
                });
            }
        }
    }

    Ok(lines)
}

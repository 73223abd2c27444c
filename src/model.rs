//! Output record shapes.
//!
//! Field declaration order is the serialized key order, so every struct here
//! lists required fields first and optional fields in their fixed position.
//! Optional fields are skipped entirely when absent or empty.

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AntiPattern {
    pub id: String,
    pub bad: String,
    pub why: String,
    pub good: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Idiom {
    pub name: String,
    pub cat: String,
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<String>,
    pub code: String,
}

/// Index-only entry; the snippet body stays in its source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    pub name: String,
    pub file: String,
    pub desc: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// One normalized record from a directory-backed source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    AntiPattern(AntiPattern),
    Idiom(Idiom),
    Snippet(Snippet),
}

impl Record {
    /// The identifier a reader greps for.
    pub fn key(&self) -> &str {
        match self {
            Record::AntiPattern(rec) => &rec.id,
            Record::Idiom(rec) => &rec.name,
            Record::Snippet(rec) => &rec.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionRecord {
    pub name: String,
    pub cat: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionCategory {
    pub cat: String,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotationToken {
    pub token: String,
    pub meaning: String,
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundCategory {
    pub cat: String,
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_counts: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_count: Option<Value>,
}

/// Category-level metadata for a composite-instrument category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentHeader {
    pub cat: String,
    pub desc: String,
    pub machines: Vec<String>,
    pub suffixes: Value,
}

/// The sounds of a single instrument prefix, name to sample count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentSounds {
    pub cat: String,
    pub machine: String,
    pub sounds: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasCategory {
    pub cat: String,
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_map: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_names: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SoundRecord {
    Category(SoundCategory),
    InstrumentHeader(InstrumentHeader),
    Instrument(InstrumentSounds),
    Aliases(AliasCategory),
}

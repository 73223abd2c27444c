//! Directory-backed source kinds and their normalization rules.
//!
//! Each [`SourceKind`] owns its file extensions, its required fields, and the
//! rule that turns one file into a [`Record`]. Adding a kind means adding a
//! variant here; the batch compiler only dispatches on the tag.

use crate::header::parse_header;
use crate::model::{AntiPattern, Idiom, Record, Snippet};
use crate::normalize::{is_falsy_yaml, split_list, yaml_text};
use serde_yaml::Value as YamlValue;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    AntiPatterns,
    Idioms,
    Snippets,
}

/// Why a single source file produced no record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    #[error("has invalid YAML: {message}")]
    InvalidYaml { message: String },
    #[error("is not a YAML mapping")]
    NotMapping,
    #[error("missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },
    #[error("has no code")]
    EmptyBody,
    #[error("could not be read: {message}")]
    Unreadable { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Rejection {
    pub file: String,
    pub reason: RejectReason,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [
        SourceKind::AntiPatterns,
        SourceKind::Idioms,
        SourceKind::Snippets,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SourceKind::AntiPatterns => "anti-patterns",
            SourceKind::Idioms => "idioms",
            SourceKind::Snippets => "snippets",
        }
    }

    pub fn output_file(self) -> &'static str {
        match self {
            SourceKind::AntiPatterns => "anti-patterns.jsonl",
            SourceKind::Idioms => "idioms.jsonl",
            SourceKind::Snippets => "snippets.jsonl",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            SourceKind::AntiPatterns => &["yaml"],
            SourceKind::Idioms => &["strudel"],
            SourceKind::Snippets => &["strudel", "str"],
        }
    }

    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            SourceKind::AntiPatterns => &["bad", "why", "good"],
            SourceKind::Idioms => &["name", "cat", "desc"],
            SourceKind::Snippets => &["name", "desc"],
        }
    }

    pub fn matches(self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }

    /// Normalize the contents of one source file into a record.
    pub fn parse(self, path: &Path, contents: &str) -> Result<Record, RejectReason> {
        match self {
            SourceKind::AntiPatterns => parse_anti_pattern(path, contents).map(Record::AntiPattern),
            SourceKind::Idioms => parse_idiom(contents).map(Record::Idiom),
            SourceKind::Snippets => parse_snippet(path, contents).map(Record::Snippet),
        }
    }
}

fn missing_error(missing: Vec<&str>) -> Result<(), RejectReason> {
    if missing.is_empty() {
        return Ok(());
    }
    Err(RejectReason::MissingFields {
        fields: missing.into_iter().map(str::to_string).collect(),
    })
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn parse_anti_pattern(path: &Path, contents: &str) -> Result<AntiPattern, RejectReason> {
    let doc: YamlValue =
        serde_yaml::from_str(contents).map_err(|err| RejectReason::InvalidYaml {
            message: err.to_string(),
        })?;
    let YamlValue::Mapping(map) = doc else {
        return Err(RejectReason::NotMapping);
    };

    let field = |key: &str| map.get(key).filter(|value| !is_falsy_yaml(value));
    let required = SourceKind::AntiPatterns.required_fields();
    missing_error(
        required
            .iter()
            .copied()
            .filter(|key| field(*key).is_none())
            .collect(),
    )?;

    let text = |key: &str| field(key).map(yaml_text).unwrap_or_default();
    Ok(AntiPattern {
        id: file_stem(path),
        bad: text("bad"),
        why: text("why"),
        good: text("good"),
    })
}

pub fn parse_idiom(contents: &str) -> Result<Idiom, RejectReason> {
    let header = parse_header(contents);
    missing_error(header.missing(SourceKind::Idioms.required_fields()))?;
    if header.body.is_empty() {
        return Err(RejectReason::EmptyBody);
    }

    let text = |key: &str| header.get(key).unwrap_or_default().to_string();
    Ok(Idiom {
        name: text("name"),
        cat: text("cat"),
        desc: text("desc"),
        notes: header
            .get("notes")
            .filter(|notes| !notes.is_empty())
            .map(str::to_string),
        tags: header.get("tags").map(split_list).unwrap_or_default(),
        functions: header.get("functions").map(split_list).unwrap_or_default(),
        code: header.body.clone(),
    })
}

/// Snippets are indexed by metadata only, so an empty body is accepted.
pub fn parse_snippet(path: &Path, contents: &str) -> Result<Snippet, RejectReason> {
    let header = parse_header(contents);
    missing_error(header.missing(SourceKind::Snippets.required_fields()))?;

    let text = |key: &str| header.get(key).unwrap_or_default().to_string();
    Ok(Snippet {
        name: text("name"),
        file: file_name(path),
        desc: text("desc"),
        tags: header.get("tags").map(split_list).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anti_pattern_id_comes_from_stem() {
        let rec = parse_anti_pattern(
            Path::new("data/anti-patterns/rest-repetition.yaml"),
            "bad: |\n  [5 ~ ~ ~ ~ ~ ~ ~]\nwhy: Verbose repetition of rests\ngood: |\n  [5 ~!7]\n",
        )
        .expect("parse");
        assert_eq!(rec.id, "rest-repetition");
        assert_eq!(rec.bad, "[5 ~ ~ ~ ~ ~ ~ ~]");
        assert_eq!(rec.good, "[5 ~!7]");
    }

    #[test]
    fn anti_pattern_reports_every_missing_field() {
        let err = parse_anti_pattern(Path::new("x.yaml"), "why: ''\nextra: 1\n").unwrap_err();
        assert_eq!(
            err,
            RejectReason::MissingFields {
                fields: vec!["bad".into(), "why".into(), "good".into()]
            }
        );
    }

    #[test]
    fn anti_pattern_rejects_non_mapping() {
        let err = parse_anti_pattern(Path::new("x.yaml"), "- a\n- b\n").unwrap_err();
        assert_eq!(err, RejectReason::NotMapping);
    }

    #[test]
    fn anti_pattern_rejects_bad_yaml() {
        let err = parse_anti_pattern(Path::new("x.yaml"), "bad: [unclosed\n").unwrap_err();
        assert!(matches!(err, RejectReason::InvalidYaml { .. }));
    }

    #[test]
    fn numeric_fields_are_stringified() {
        let rec = parse_anti_pattern(Path::new("n.yaml"), "bad: 1\nwhy: 2\ngood: 3.5\n")
            .expect("parse");
        assert_eq!((rec.bad.as_str(), rec.why.as_str()), ("1", "2"));
        assert_eq!(rec.good, "3.5");
    }

    #[test]
    fn boolean_fields_render_capitalized() {
        let rec = parse_anti_pattern(Path::new("b.yaml"), "bad: yes\nwhy: on\ngood: true\n")
            .expect("parse");
        assert_eq!(rec.bad, "yes");
        assert_eq!(rec.good, "True");
    }

    #[test]
    fn idiom_requires_code() {
        let err = parse_idiom("// @name: a\n// @cat: b\n// @desc: c\n\n\n").unwrap_err();
        assert_eq!(err, RejectReason::EmptyBody);
    }

    #[test]
    fn idiom_splits_list_fields() {
        let rec = parse_idiom(
            "// @name: a\n// @cat: b\n// @desc: c\n// @tags: drums, ,live\n// @functions: s,note\nsound(\"bd\")",
        )
        .expect("parse");
        assert_eq!(rec.tags, vec!["drums", "live"]);
        assert_eq!(rec.functions, vec!["s", "note"]);
        assert_eq!(rec.notes, None);
    }

    #[test]
    fn snippet_without_body_is_indexed() {
        let rec = parse_snippet(Path::new("dir/trance.str"), "// @name: trance\n// @desc: d\n")
            .expect("parse");
        assert_eq!(rec.file, "trance.str");
        assert!(rec.tags.is_empty());
    }

    #[test]
    fn kinds_match_their_extensions() {
        assert!(SourceKind::Snippets.matches(Path::new("a.str")));
        assert!(SourceKind::Snippets.matches(Path::new("a.strudel")));
        assert!(!SourceKind::Idioms.matches(Path::new("a.str")));
        assert!(!SourceKind::AntiPatterns.matches(Path::new("a.yml")));
    }
}

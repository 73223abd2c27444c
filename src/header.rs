//! Leading `// @key: value` annotation block parser.
//!
//! A source file starts with an optional run of blank lines and incidental
//! comments, then a block of metadata lines, then the verbatim body:
//!
//! ```text
//! // @name: beat-switcher
//! // @cat: live-performance
//! // @desc: Array of beat variations for live switching
//!
//! const beat = 0
//! ```
//!
//! Scanning is a two-state machine. Before any metadata key has been seen,
//! blank lines and plain comments are skipped. Once metadata has started, a
//! plain comment ends the block and is dropped; any other non-metadata line
//! ends the block and becomes the first body line.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

#[allow(clippy::expect_used)]
static META_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^//\s*@(\w+):\s*(.+)$").expect("metadata pattern compiles"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    /// Lowercased keys; a repeated key keeps its last value.
    pub metadata: HashMap<String, String>,
    /// Everything after the metadata block, outer blank lines removed.
    pub body: String,
}

impl Header {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Required keys that are absent or empty, in the order given.
    pub fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|key| self.get(key).is_none_or(str::is_empty))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforeMetadata,
    InMetadata,
}

pub fn parse_header(text: &str) -> Header {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut metadata = HashMap::new();
    let mut state = State::BeforeMetadata;
    let mut body_start = lines.len();

    for (idx, line) in lines.iter().enumerate() {
        let stripped = line.trim();

        if let Some(caps) = META_LINE.captures(stripped) {
            let key = caps[1].to_lowercase();
            let value = caps[2].trim().to_string();
            metadata.insert(key, value);
            state = State::InMetadata;
            continue;
        }

        let is_comment = stripped.starts_with("//");
        match state {
            State::BeforeMetadata if stripped.is_empty() || is_comment => continue,
            State::InMetadata if is_comment => {
                body_start = idx + 1;
                break;
            }
            _ => {
                body_start = idx;
                break;
            }
        }
    }

    Header {
        metadata,
        body: trim_blank_lines(&lines[body_start..]),
    }
}

fn trim_blank_lines(lines: &[&str]) -> String {
    let is_blank = |line: &&str| line.trim().is_empty();
    let start = lines.iter().position(|line| !is_blank(line));
    let end = lines.iter().rposition(|line| !is_blank(line));
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_leading_blanks_and_comments() {
        let header = parse_header("\n\n// scratch\n// @name: a\n// @desc: b\n\ncode\n");
        assert_eq!(header.get("name"), Some("a"));
        assert_eq!(header.get("desc"), Some("b"));
        assert_eq!(header.body, "code");
    }

    #[test]
    fn comment_after_metadata_ends_block_and_is_dropped() {
        let header = parse_header("// @name: a\n// plain note\n// @desc: late\nx()\n");
        assert_eq!(header.get("name"), Some("a"));
        assert_eq!(header.get("desc"), None);
        assert_eq!(header.body, "// @desc: late\nx()");
    }

    #[test]
    fn keys_are_lowercased_and_last_duplicate_wins() {
        let header = parse_header("// @NAME: first\n//@Name:   second  \nbody");
        assert_eq!(header.get("name"), Some("second"));
        assert_eq!(header.body, "body");
    }

    #[test]
    fn body_keeps_interior_blank_lines() {
        let header = parse_header("// @name: a\n\n\nline one\n\nline two\n\n\n");
        assert_eq!(header.body, "line one\n\nline two");
    }

    #[test]
    fn empty_value_is_not_metadata() {
        let header = parse_header("// @name: a\n// @desc:\nbody");
        assert_eq!(header.get("desc"), None);
        assert_eq!(header.body, "body");
        assert_eq!(header.missing(&["name", "desc"]), vec!["desc"]);
    }

    #[test]
    fn metadata_only_file_has_empty_body() {
        let header = parse_header("// @name: a\n// @desc: b\n");
        assert_eq!(header.body, "");
    }
}

//! Minimal key/value parser for frontmatter blocks.
//!
//! Only flat string fields are understood:
//!
//! ```text
//! name: my-skill
//! description:
//!   Spans several lines.
//!
//!   Blank lines inside the value are kept.
//! ```
//!
//! A key line starts at column 0 and matches `[a-z0-9_-]+:`. Anything after
//! the colon is the inline value. A key with no inline value collects the
//! following non-key lines (trimmed) until the next key line or the end of
//! the block. Lines that are neither key lines nor continuation lines are
//! skipped without error.

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use skillcheck_core::{Result, SkillError};
use std::sync::LazyLock;
use tracing::debug;

use crate::frontmatter;

static KEY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z0-9_-]+):\s*(.*)$").unwrap());

/// Parsed frontmatter fields.
///
/// Keys are unique; inserting an existing key replaces its value but keeps
/// its original position, so iteration follows first appearance in the
/// document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Parse a frontmatter block into fields. Never fails; unrecognized lines
/// are dropped.
pub fn parse_fields(block: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    let mut open_key: Option<&str> = None;
    let mut pending: Vec<&str> = Vec::new();

    for line in block.lines() {
        if line.trim().is_empty() {
            // Blank lines only count once a multi-line value has started.
            if open_key.is_some() && !pending.is_empty() {
                pending.push("");
            }
            continue;
        }

        if let Some(caps) = KEY_LINE.captures(line) {
            if let Some(key) = open_key.take() {
                flush(&mut fields, key, &mut pending);
            }

            let key = caps.get(1).map_or("", |m| m.as_str());
            let value = caps.get(2).map_or("", |m| m.as_str()).trim();
            if value.is_empty() {
                open_key = Some(key);
                pending.clear();
            } else {
                fields.insert(key, value);
            }
        } else if open_key.is_some() {
            pending.push(line.trim());
        } else {
            debug!(line, "skipping unrecognized frontmatter line");
        }
    }

    if let Some(key) = open_key {
        flush(&mut fields, key, &mut pending);
    }

    fields
}

/// Store a multi-line value. A key whose value never started produces no
/// field at all.
fn flush(fields: &mut FieldMap, key: &str, pending: &mut Vec<&str>) {
    if pending.is_empty() {
        debug!(key, "key has no value, not recorded");
        return;
    }
    fields.insert(key, pending.join("\n").trim());
    pending.clear();
}

/// Decode, extract and parse a whole SKILL.md document.
pub fn parse_document(bytes: &[u8]) -> Result<FieldMap> {
    let content = std::str::from_utf8(bytes).map_err(|e| SkillError::ParseError(e.to_string()))?;
    parse_str(content)
}

/// Extract and parse an already-decoded SKILL.md document.
pub fn parse_str(content: &str) -> Result<FieldMap> {
    let frontmatter = frontmatter::extract(content)?;
    Ok(parse_fields(frontmatter.block))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_pairs() {
        let fields = parse_fields("name: my-skill\ndescription: Does X\nlicense: MIT");
        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("name"), Some("my-skill"));
        assert_eq!(fields.get("description"), Some("Does X"));
        assert_eq!(fields.get("license"), Some("MIT"));
    }

    #[test]
    fn inline_value_is_trimmed_and_may_omit_space() {
        let fields = parse_fields("name:tight\ndescription:    padded   ");
        assert_eq!(fields.get("name"), Some("tight"));
        assert_eq!(fields.get("description"), Some("padded"));
    }

    #[test]
    fn value_keeps_later_colons() {
        let fields = parse_fields("metadata: source: https://example.com/a");
        assert_eq!(fields.get("metadata"), Some("source: https://example.com/a"));
    }

    #[test]
    fn multi_line_value() {
        let block = "description:\n  First line.\n\n  Second paragraph.\n\n\nname: x";
        let fields = parse_fields(block);
        assert_eq!(
            fields.get("description"),
            Some("First line.\n\nSecond paragraph.")
        );
        assert_eq!(fields.get("name"), Some("x"));
    }

    #[test]
    fn multi_line_value_at_end_of_block() {
        let fields = parse_fields("name: x\nmetadata:\n  a\n  b\n\n");
        assert_eq!(fields.get("metadata"), Some("a\nb"));
    }

    #[test]
    fn leading_blank_lines_after_open_key_are_dropped() {
        let fields = parse_fields("description:\n\n\n  text\n");
        assert_eq!(fields.get("description"), Some("text"));
    }

    #[test]
    fn open_key_without_lines_is_not_recorded() {
        let fields = parse_fields("description:\n\nname: x");
        assert!(!fields.contains_key("description"));
        assert_eq!(fields.get("name"), Some("x"));

        let fields = parse_fields("name: x\ndescription:");
        assert!(!fields.contains_key("description"));
    }

    #[test]
    fn inline_value_is_never_merged_with_following_lines() {
        let fields = parse_fields("description: short\n  dangling text\nname: x");
        assert_eq!(fields.get("description"), Some("short"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn indented_key_like_lines_are_continuations() {
        let fields = parse_fields("metadata:\n  author: someone\n  version: 2");
        assert_eq!(fields.get("metadata"), Some("author: someone\nversion: 2"));
        assert!(!fields.contains_key("author"));
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let fields = parse_fields("# comment\nName: Upper\nname: ok\n  stray\n- item\n");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("name"), Some("ok"));
    }

    #[test]
    fn later_key_overwrites_earlier_in_place() {
        let fields = parse_fields("name: first\ndescription: d\nname: second");
        assert_eq!(fields.get("name"), Some("second"));
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["name", "description"]);
    }

    #[test]
    fn keys_may_use_digits_and_underscores() {
        let fields = parse_fields("allowed-tools: Read\nextra_2: v");
        assert_eq!(fields.get("allowed-tools"), Some("Read"));
        assert_eq!(fields.get("extra_2"), Some("v"));
    }

    #[test]
    fn flat_pairs_round_trip() {
        let original: FieldMap = [
            ("name", "round-trip"),
            ("description", "A value with: colons, and commas"),
            ("license", "Apache-2.0"),
            ("allowed-tools", "Bash(git:*) Read"),
        ]
        .into_iter()
        .collect();

        let mut doc = String::from("---\n");
        for (k, v) in original.iter() {
            doc.push_str(&format!("{k}: {v}\n"));
        }
        doc.push_str("---\nbody\n");

        assert_eq!(parse_str(&doc).unwrap(), original);
    }

    #[test]
    fn parse_document_rejects_invalid_utf8() {
        let bytes = b"---\nname: \xff\xfe\n---\n";
        match parse_document(bytes) {
            Err(SkillError::ParseError(msg)) => assert!(msg.contains("utf-8")),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn parse_document_propagates_extraction_errors() {
        assert!(matches!(
            parse_document(b"no frontmatter"),
            Err(SkillError::MissingFrontmatter)
        ));
        assert!(matches!(
            parse_document(b"---\nname: x\n"),
            Err(SkillError::MalformedFrontmatter)
        ));
    }

    #[test]
    fn serializes_in_document_order() {
        let fields = parse_fields("name: x\ndescription: y");
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"name":"x","description":"y"}"#);
    }
}

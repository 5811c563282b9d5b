//! Locates the frontmatter block at the top of a SKILL.md document.

use skillcheck_core::{Result, SkillError};
use tracing::debug;

/// The delimiter line that opens and closes the frontmatter block.
pub const MARKER: &str = "---";

/// A document split into its frontmatter block and the content after it.
///
/// Both halves borrow from the original document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    /// Text strictly between the opening and closing marker lines.
    pub block: &'a str,
    /// Everything after the closing marker line.
    pub body: &'a str,
}

/// Split `document` into frontmatter block and body.
///
/// The document must begin with the marker at offset 0 and the marker must
/// be alone on its line. The block ends at the first later line that is
/// exactly the marker; lines such as `----` or `--- notes` do not close it.
/// A trailing `\r` on marker lines is tolerated.
pub fn extract(document: &str) -> Result<Frontmatter<'_>> {
    if !document.starts_with(MARKER) {
        return Err(SkillError::MissingFrontmatter);
    }

    let mut lines = document.split_inclusive('\n');
    let opening = lines.next().unwrap_or_default();
    if !opening.ends_with('\n') || !is_marker_line(opening) {
        debug!(line = %opening.trim_end(), "opening marker is not alone on its line");
        return Err(SkillError::MalformedFrontmatter);
    }

    let block_start = opening.len();
    let mut offset = block_start;
    for line in lines {
        if is_marker_line(line) {
            let block = strip_line_ending(&document[block_start..offset]);
            let body = &document[offset + line.len()..];
            return Ok(Frontmatter { block, body });
        }
        offset += line.len();
    }

    debug!("no closing marker found");
    Err(SkillError::MalformedFrontmatter)
}

fn is_marker_line(line: &str) -> bool {
    strip_line_ending(line) == MARKER
}

fn strip_line_ending(s: &str) -> &str {
    let s = s.strip_suffix('\n').unwrap_or(s);
    s.strip_suffix('\r').unwrap_or(s)
}

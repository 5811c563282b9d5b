use serde::Serialize;
use skillcheck_core::{Result, SkillError, ValidationOutcome};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::frontmatter;
use crate::parser::{self, FieldMap};
use crate::validator::Validator;

/// File name a skill directory must contain.
pub const SKILL_FILE: &str = "SKILL.md";

/// A SKILL.md document read from disk.
///
/// The content is decoded once and never modified; frontmatter and body
/// are derived from it on demand.
#[derive(Debug, Clone)]
pub struct SkillDocument {
    content: String,
    /// Absolute or caller-relative path to the SKILL.md file.
    pub file_path: PathBuf,
    /// Directory holding the SKILL.md file.
    pub base_dir: PathBuf,
}

impl SkillDocument {
    /// Read `<dir>/SKILL.md`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        Self::from_file(&dir.join(SKILL_FILE))
    }

    /// Read a SKILL.md file. A missing file is reported as
    /// [`SkillError::SkillFileNotFound`]; undecodable content as
    /// [`SkillError::ParseError`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SkillError::SkillFileNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        let content =
            String::from_utf8(bytes).map_err(|e| SkillError::ParseError(e.to_string()))?;
        debug!(path = %path.display(), bytes = content.len(), "read skill document");

        let base_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        Ok(Self::from_content(content, path.to_path_buf(), base_dir))
    }

    /// Wrap already-loaded content with known path info.
    pub fn from_content(content: String, file_path: PathBuf, base_dir: PathBuf) -> Self {
        Self {
            content,
            file_path,
            base_dir,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Parsed frontmatter fields.
    pub fn fields(&self) -> Result<FieldMap> {
        parser::parse_str(&self.content)
    }

    /// The Markdown after the frontmatter block.
    pub fn body(&self) -> Result<&str> {
        Ok(frontmatter::extract(&self.content)?.body)
    }

    pub fn validate(&self, validator: &Validator) -> ValidationOutcome {
        validator.validate_str(&self.content)
    }
}

/// Everything known about one skill after validation, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct SkillReport {
    pub skill_dir: PathBuf,
    #[serde(flatten)]
    pub outcome: ValidationOutcome,
}

/// Validate the skill in `dir`.
///
/// Document problems (missing SKILL.md, bad frontmatter, schema violations)
/// come back as an invalid outcome. Only environmental failures such as an
/// unreadable file are returned as errors.
pub fn validate_skill_dir(dir: &Path, validator: &Validator) -> Result<ValidationOutcome> {
    match SkillDocument::from_dir(dir) {
        Ok(doc) => Ok(doc.validate(validator)),
        Err(e) if e.is_validation() => Ok(ValidationOutcome::invalid(e.to_string())),
        Err(e) => Err(e),
    }
}

use serde::{Deserialize, Serialize};

use crate::error::SkillError;

/// Message reported for a document that passes every check.
pub const VALID_MESSAGE: &str = "Skill is valid!";

/// The `(valid, message)` pair produced by one validation run.
///
/// Exactly one message per run: the confirmation on success, otherwise the
/// first rule that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub message: String,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: VALID_MESSAGE.to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    /// Process exit status for this outcome: 0 when valid, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.valid { 0 } else { 1 }
    }
}

impl From<Result<(), SkillError>> for ValidationOutcome {
    fn from(result: Result<(), SkillError>) -> Self {
        match result {
            Ok(()) => Self::valid(),
            Err(e) => Self::invalid(e.to_string()),
        }
    }
}

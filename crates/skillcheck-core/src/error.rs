use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for skillcheck.
///
/// The frontmatter and schema variants are validation failures: their
/// `Display` text is the message reported to the user. The remaining
/// variants are environmental and propagate up to the binary.
#[derive(Error, Debug)]
pub enum SkillError {
    // ── Frontmatter errors ─────────────────────────────────────
    #[error("No YAML frontmatter found")]
    MissingFrontmatter,

    #[error("Invalid frontmatter format")]
    MalformedFrontmatter,

    #[error("Invalid YAML in frontmatter: {0}")]
    ParseError(String),

    // ── Schema errors ──────────────────────────────────────────
    #[error(
        "Unexpected key(s) in SKILL.md frontmatter: {}. Allowed properties are: {}",
        .keys.join(", "),
        .allowed.join(", ")
    )]
    UnexpectedKey {
        keys: Vec<String>,
        allowed: Vec<String>,
    },

    #[error("Missing '{field}' in frontmatter")]
    MissingRequiredField { field: String },

    #[error("{}", name_message(.value, .violation))]
    InvalidNameFormat {
        value: String,
        violation: NameViolation,
    },

    #[error("{violation}")]
    InvalidDescriptionFormat { violation: DescriptionViolation },

    // ── Input errors ───────────────────────────────────────────
    #[error("SKILL.md not found")]
    SkillFileNotFound(PathBuf),

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    #[error("config validation failed: {field}: {reason}")]
    ConfigValidation { field: String, reason: String },

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SkillError {
    /// True for failures that describe the document itself, as opposed to
    /// config or I/O problems in the surrounding tooling.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingFrontmatter
                | Self::MalformedFrontmatter
                | Self::ParseError(_)
                | Self::UnexpectedKey { .. }
                | Self::MissingRequiredField { .. }
                | Self::InvalidNameFormat { .. }
                | Self::InvalidDescriptionFormat { .. }
                | Self::SkillFileNotFound(_)
        )
    }
}

/// Which `name` rule was broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameViolation {
    /// Contains something other than lowercase letters, digits and hyphens.
    NotHyphenCase,
    /// Leading or trailing hyphen, or `--`.
    HyphenPlacement,
    TooLong { length: usize, max: usize },
}

fn name_message(value: &str, violation: &NameViolation) -> String {
    match violation {
        NameViolation::NotHyphenCase => format!(
            "Name '{value}' should be hyphen-case (lowercase letters, digits, and hyphens only)"
        ),
        NameViolation::HyphenPlacement => {
            format!("Name '{value}' cannot start/end with hyphen or contain consecutive hyphens")
        }
        NameViolation::TooLong { length, max } => {
            format!("Name is too long ({length} characters). Maximum is {max} characters.")
        }
    }
}

/// Which `description` rule was broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionViolation {
    /// Holds the full forbidden set, not just the character that was found.
    ForbiddenCharacters { forbidden: Vec<char> },
    TooLong { length: usize, max: usize },
}

impl fmt::Display for DescriptionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForbiddenCharacters { forbidden } => {
                let label = if forbidden[..] == ['<', '>'] {
                    "angle brackets"
                } else {
                    "forbidden characters"
                };
                let chars: Vec<String> = forbidden.iter().map(char::to_string).collect();
                write!(
                    f,
                    "Description cannot contain {label} ({})",
                    chars.join(" or ")
                )
            }
            Self::TooLong { length, max } => write!(
                f,
                "Description is too long ({length} characters). Maximum is {max} characters."
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, SkillError>;

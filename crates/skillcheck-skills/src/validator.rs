//! Schema validation for parsed frontmatter fields.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. every key is allowed
//! 2. every required key is present
//! 3. `name` is hyphen-case and short enough
//! 4. `description` has no forbidden characters and is short enough

use regex::Regex;
use skillcheck_config::SchemaConfig;
use skillcheck_core::error::{DescriptionViolation, NameViolation};
use skillcheck_core::{Result, SkillError, ValidationOutcome};
use std::sync::LazyLock;
use tracing::debug;

use crate::parser::{self, FieldMap};

static STANDARD: LazyLock<Validator> = LazyLock::new(|| {
    Validator::new(SchemaConfig::default()).expect("standard schema name pattern compiles")
});

/// A compiled schema, reusable across documents and threads.
#[derive(Debug, Clone)]
pub struct Validator {
    schema: SchemaConfig,
    name_pattern: Regex,
}

impl Validator {
    pub fn new(schema: SchemaConfig) -> Result<Self> {
        let name_pattern =
            Regex::new(&schema.name_pattern).map_err(|e| SkillError::ConfigValidation {
                field: "schema.name_pattern".into(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            schema,
            name_pattern,
        })
    }

    /// The validator for the standard skill schema.
    pub fn standard() -> &'static Validator {
        &STANDARD
    }

    pub fn schema(&self) -> &SchemaConfig {
        &self.schema
    }

    /// Run every check against `fields`, returning the first violation.
    pub fn validate(&self, fields: &FieldMap) -> Result<()> {
        self.check_allowed_keys(fields)?;
        self.check_required_keys(fields)?;

        if let Some(name) = fields.get("name") {
            self.check_name(name.trim())?;
        }
        if let Some(description) = fields.get("description") {
            self.check_description(description.trim())?;
        }

        Ok(())
    }

    /// [`Validator::validate`] folded into a `(valid, message)` outcome.
    pub fn outcome(&self, fields: &FieldMap) -> ValidationOutcome {
        self.validate(fields).into()
    }

    /// Extract, parse and validate a decoded document.
    pub fn validate_str(&self, content: &str) -> ValidationOutcome {
        parser::parse_str(content)
            .and_then(|fields| self.validate(&fields))
            .into()
    }

    /// Decode, extract, parse and validate raw document bytes.
    pub fn validate_bytes(&self, bytes: &[u8]) -> ValidationOutcome {
        parser::parse_document(bytes)
            .and_then(|fields| self.validate(&fields))
            .into()
    }

    fn check_allowed_keys(&self, fields: &FieldMap) -> Result<()> {
        let mut unexpected: Vec<String> = fields
            .keys()
            .filter(|k| !self.schema.is_allowed(k))
            .map(str::to_string)
            .collect();
        if unexpected.is_empty() {
            return Ok(());
        }
        unexpected.sort();
        Err(SkillError::UnexpectedKey {
            keys: unexpected,
            allowed: self.schema.sorted_allowed_keys(),
        })
    }

    fn check_required_keys(&self, fields: &FieldMap) -> Result<()> {
        match self
            .schema
            .required_keys
            .iter()
            .find(|k| !fields.contains_key(k))
        {
            Some(field) => Err(SkillError::MissingRequiredField {
                field: field.clone(),
            }),
            None => Ok(()),
        }
    }

    fn check_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            debug!("name is empty, skipping format checks");
            return Ok(());
        }

        let violation = if !self.name_pattern.is_match(name) {
            Some(NameViolation::NotHyphenCase)
        } else if name.starts_with('-') || name.ends_with('-') || name.contains("--") {
            Some(NameViolation::HyphenPlacement)
        } else {
            let length = name.chars().count();
            (length > self.schema.name_max_length).then_some(NameViolation::TooLong {
                length,
                max: self.schema.name_max_length,
            })
        };

        match violation {
            Some(violation) => Err(SkillError::InvalidNameFormat {
                value: name.to_string(),
                violation,
            }),
            None => Ok(()),
        }
    }

    fn check_description(&self, description: &str) -> Result<()> {
        if description.is_empty() {
            debug!("description is empty, skipping format checks");
            return Ok(());
        }

        let forbidden = &self.schema.description_forbidden_chars;
        if description.chars().any(|c| forbidden.contains(&c)) {
            return Err(SkillError::InvalidDescriptionFormat {
                violation: DescriptionViolation::ForbiddenCharacters {
                    forbidden: forbidden.clone(),
                },
            });
        }

        let length = description.chars().count();
        if length > self.schema.description_max_length {
            return Err(SkillError::InvalidDescriptionFormat {
                violation: DescriptionViolation::TooLong {
                    length,
                    max: self.schema.description_max_length,
                },
            });
        }

        Ok(())
    }
}

/// Validate parsed fields against the standard schema.
pub fn validate_fields(fields: &FieldMap) -> ValidationOutcome {
    Validator::standard().outcome(fields)
}

/// Validate a whole SKILL.md document against the standard schema.
pub fn validate_content(content: &str) -> ValidationOutcome {
    Validator::standard().validate_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FieldMap {
        pairs.iter().copied().collect()
    }

    fn error(pairs: &[(&str, &str)]) -> SkillError {
        Validator::standard().validate(&fields(pairs)).unwrap_err()
    }

    #[test]
    fn valid_minimal_skill() {
        let outcome = validate_fields(&fields(&[("name", "my-skill"), ("description", "Does X")]));
        assert!(outcome.valid);
        assert_eq!(outcome.message, "Skill is valid!");
    }

    #[test]
    fn valid_with_every_allowed_key() {
        let outcome = validate_fields(&fields(&[
            ("name", "pdf-tools-2"),
            ("description", "Fill PDF forms"),
            ("license", "MIT"),
            ("allowed-tools", "Read Write"),
            ("metadata", "owner: docs"),
        ]));
        assert!(outcome.valid, "{}", outcome.message);
    }

    #[test]
    fn unexpected_key_is_reported_sorted_with_allowed_set() {
        let err = error(&[
            ("name", "x"),
            ("description", "y"),
            ("version", "1"),
            ("author", "me"),
        ]);
        match &err {
            SkillError::UnexpectedKey { keys, allowed } => {
                assert_eq!(keys, &vec!["author".to_string(), "version".to_string()]);
                assert_eq!(allowed.len(), 5);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "Unexpected key(s) in SKILL.md frontmatter: author, version. \
             Allowed properties are: allowed-tools, description, license, metadata, name"
        );
    }

    #[test]
    fn unexpected_key_wins_over_missing_field() {
        let err = error(&[("author", "me")]);
        assert!(matches!(err, SkillError::UnexpectedKey { .. }));
    }

    #[test]
    fn missing_fields_reported_name_first() {
        let err = error(&[("license", "MIT")]);
        assert!(matches!(&err, SkillError::MissingRequiredField { field } if field == "name"));

        let err = error(&[("name", "my-skill")]);
        assert!(
            matches!(&err, SkillError::MissingRequiredField { field } if field == "description")
        );
        assert_eq!(err.to_string(), "Missing 'description' in frontmatter");
    }

    #[test]
    fn name_must_be_hyphen_case() {
        for bad in ["My_Skill", "my skill", "skill!", "Skill", "ünï"] {
            let err = error(&[("name", bad), ("description", "ok")]);
            assert!(
                matches!(
                    &err,
                    SkillError::InvalidNameFormat {
                        violation: NameViolation::NotHyphenCase,
                        ..
                    }
                ),
                "{bad}: {err:?}"
            );
        }
    }

    #[test]
    fn name_hyphen_placement() {
        for bad in ["a--b", "-lead", "trail-", "-"] {
            let err = error(&[("name", bad), ("description", "ok")]);
            assert!(
                matches!(
                    &err,
                    SkillError::InvalidNameFormat {
                        violation: NameViolation::HyphenPlacement,
                        ..
                    }
                ),
                "{bad}: {err:?}"
            );
        }
        assert_eq!(
            error(&[("name", "a--b"), ("description", "ok")]).to_string(),
            "Name 'a--b' cannot start/end with hyphen or contain consecutive hyphens"
        );
    }

    #[test]
    fn name_length_limit() {
        let at_limit = "a".repeat(64);
        assert!(validate_fields(&fields(&[("name", &at_limit), ("description", "ok")])).valid);

        let over = "a".repeat(65);
        let err = error(&[("name", &over), ("description", "ok")]);
        assert_eq!(
            err.to_string(),
            "Name is too long (65 characters). Maximum is 64 characters."
        );
    }

    #[test]
    fn description_rejects_angle_brackets() {
        for bad in ["<b>hi</b>", "a < b", "arrow ->"] {
            let err = error(&[("name", "ok"), ("description", bad)]);
            assert!(
                matches!(err, SkillError::InvalidDescriptionFormat { .. }),
                "{bad}"
            );
        }
    }

    #[test]
    fn description_length_limit_counts_characters() {
        let at_limit = "é".repeat(1024);
        assert!(validate_fields(&fields(&[("name", "ok"), ("description", &at_limit)])).valid);

        let over = "x".repeat(1025);
        let err = error(&[("name", "ok"), ("description", &over)]);
        assert_eq!(
            err.to_string(),
            "Description is too long (1025 characters). Maximum is 1024 characters."
        );
    }

    #[test]
    fn forbidden_characters_checked_before_length() {
        let text = format!("<{}", "x".repeat(2000));
        let err = error(&[("name", "ok"), ("description", &text)]);
        assert!(matches!(
            err,
            SkillError::InvalidDescriptionFormat {
                violation: DescriptionViolation::ForbiddenCharacters { .. }
            }
        ));
    }

    #[test]
    fn name_checked_before_description() {
        let err = error(&[("name", "Bad"), ("description", "<bad>")]);
        assert!(matches!(err, SkillError::InvalidNameFormat { .. }));
    }

    #[test]
    fn empty_values_skip_format_checks() {
        assert!(validate_fields(&fields(&[("name", ""), ("description", "  ")])).valid);
    }

    #[test]
    fn values_are_trimmed_before_checks() {
        let outcome = validate_fields(&fields(&[("name", "  my-skill  "), ("description", " ok ")]));
        assert!(outcome.valid);
    }

    #[test]
    fn validation_is_idempotent() {
        let input = fields(&[("name", "a--b"), ("description", "ok")]);
        let first = validate_fields(&input);
        let second = validate_fields(&input);
        assert_eq!(first, second);
        assert!(!first.valid);
    }

    #[test]
    fn custom_schema_limits() {
        let schema = SchemaConfig {
            allowed_keys: vec!["name".into(), "description".into(), "version".into()],
            name_max_length: 8,
            description_forbidden_chars: vec!['|'],
            ..SchemaConfig::default()
        };
        let validator = Validator::new(schema).unwrap();

        let ok = fields(&[("name", "short"), ("description", "<fine>"), ("version", "2")]);
        assert!(validator.outcome(&ok).valid);

        let long = fields(&[("name", "far-too-long"), ("description", "ok")]);
        assert!(matches!(
            validator.validate(&long),
            Err(SkillError::InvalidNameFormat {
                violation: NameViolation::TooLong { length: 12, max: 8 },
                ..
            })
        ));

        let piped = fields(&[("name", "short"), ("description", "a | b")]);
        assert_eq!(
            validator.outcome(&piped).message,
            "Description cannot contain forbidden characters (|)"
        );
    }

    #[test]
    fn invalid_name_pattern_is_a_config_error() {
        let schema = SchemaConfig {
            name_pattern: "(".into(),
            ..SchemaConfig::default()
        };
        let err = Validator::new(schema).unwrap_err();
        assert!(matches!(err, SkillError::ConfigValidation { .. }));
        assert!(!err.is_validation());
    }

    #[test]
    fn validate_content_runs_the_whole_pipeline() {
        let ok = validate_content("---\nname: my-skill\ndescription: Does X\n---\n# Body\n");
        assert!(ok.valid);

        let missing = validate_content("# Just markdown\n");
        assert_eq!(missing.message, "No YAML frontmatter found");

        let unclosed = validate_content("---\nname: my-skill\n");
        assert_eq!(unclosed.message, "Invalid frontmatter format");
    }

    #[test]
    fn validate_bytes_reports_decode_errors() {
        let outcome = Validator::standard().validate_bytes(b"---\nname: \xc3\x28\n---\n");
        assert!(!outcome.valid);
        assert!(outcome.message.starts_with("Invalid YAML in frontmatter: "));
    }
}

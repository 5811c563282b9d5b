use serde::{Deserialize, Serialize};

/// Root configuration — maps to `skillcheck.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillcheckConfig {
    pub schema: SchemaConfig,
    pub scan: ScanConfig,
    pub logging: LoggingConfig,
}

// ── Schema ─────────────────────────────────────────────────────

/// Hyphen-case: lowercase letters, digits and hyphens only.
pub const DEFAULT_NAME_PATTERN: &str = "^[a-z0-9-]+$";

/// The rules a SKILL.md frontmatter is checked against.
///
/// Read-only for the duration of a run. The defaults are the standard skill
/// schema; other validation contexts may override individual fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Every frontmatter key must be one of these.
    pub allowed_keys: Vec<String>,
    /// Keys that must be present, checked in this order.
    pub required_keys: Vec<String>,
    /// Regex the trimmed `name` must match.
    pub name_pattern: String,
    /// Maximum `name` length in characters.
    pub name_max_length: usize,
    /// Maximum `description` length in characters.
    pub description_max_length: usize,
    /// Characters that may not appear anywhere in `description`.
    pub description_forbidden_chars: Vec<char>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            allowed_keys: vec![
                "name".into(),
                "description".into(),
                "license".into(),
                "allowed-tools".into(),
                "metadata".into(),
            ],
            required_keys: vec!["name".into(), "description".into()],
            name_pattern: DEFAULT_NAME_PATTERN.into(),
            name_max_length: 64,
            description_max_length: 1024,
            description_forbidden_chars: vec!['<', '>'],
        }
    }
}

impl SchemaConfig {
    pub fn is_allowed(&self, key: &str) -> bool {
        self.allowed_keys.iter().any(|k| k == key)
    }

    /// Allowed keys in sorted order, as listed in error messages.
    pub fn sorted_allowed_keys(&self) -> Vec<String> {
        let mut keys = self.allowed_keys.clone();
        keys.sort();
        keys.dedup();
        keys
    }
}

// ── Scan ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// How many directory levels below the scan root are searched for SKILL.md.
    pub max_depth: usize,
    /// Parallel validations. 0 = number of available CPUs.
    pub jobs: usize,
    /// Directory names never descended into.
    pub skip_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            jobs: 0,
            skip_dirs: vec![".git".into(), "node_modules".into(), "target".into()],
        }
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Output format: "pretty", "json", "compact".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}

// ── Validation ─────────────────────────────────────────────────

/// A single config validation issue.
#[derive(Debug)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub severity: WarningSeverity,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let icon = match self.severity {
            WarningSeverity::Error => "❌",
            WarningSeverity::Warning => "⚠️ ",
            WarningSeverity::Info => "💡",
        };
        write!(f, "{} {}: {}", icon, self.field, self.message)?;
        if let Some(ref h) = self.hint {
            write!(f, "\n   ↳ {}", h)?;
        }
        Ok(())
    }
}

impl SkillcheckConfig {
    /// Validate the config and return a list of warnings/errors.
    /// Returns `Err` with all messages joined if any severity is Error.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, String> {
        let mut warnings = Vec::new();
        let schema = &self.schema;

        // ── Schema keys ───
        if schema.allowed_keys.is_empty() {
            warnings.push(ConfigWarning {
                field: "schema.allowed_keys".into(),
                message: "no keys are allowed — every frontmatter would be rejected".into(),
                severity: WarningSeverity::Error,
                hint: Some("Remove the override to use the standard five keys".into()),
            });
        }
        for key in &schema.required_keys {
            if !schema.is_allowed(key) {
                warnings.push(ConfigWarning {
                    field: "schema.required_keys".into(),
                    message: format!("required key '{key}' is not in allowed_keys"),
                    severity: WarningSeverity::Error,
                    hint: Some(format!("Add '{key}' to schema.allowed_keys")),
                });
            }
        }

        // ── Name rules ───
        if let Err(e) = regex::Regex::new(&schema.name_pattern) {
            warnings.push(ConfigWarning {
                field: "schema.name_pattern".into(),
                message: format!("invalid regex: {e}"),
                severity: WarningSeverity::Error,
                hint: Some(format!("The standard pattern is '{DEFAULT_NAME_PATTERN}'")),
            });
        } else if !schema.name_pattern.starts_with('^') || !schema.name_pattern.ends_with('$') {
            warnings.push(ConfigWarning {
                field: "schema.name_pattern".into(),
                message: "pattern is not anchored, it will match substrings of the name".into(),
                severity: WarningSeverity::Warning,
                hint: Some("Wrap the pattern in ^...$".into()),
            });
        }
        if schema.name_max_length == 0 {
            warnings.push(ConfigWarning {
                field: "schema.name_max_length".into(),
                message: "name_max_length is 0 — every name would be too long".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 64".into()),
            });
        }

        // ── Description rules ───
        if schema.description_max_length == 0 {
            warnings.push(ConfigWarning {
                field: "schema.description_max_length".into(),
                message: "description_max_length is 0 — every description would be too long"
                    .into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 1024".into()),
            });
        }
        if schema.description_forbidden_chars.is_empty() {
            warnings.push(ConfigWarning {
                field: "schema.description_forbidden_chars".into(),
                message: "no forbidden characters — markup in descriptions will pass".into(),
                severity: WarningSeverity::Info,
                hint: None,
            });
        }

        // ── Scan ───
        if self.scan.max_depth == 0 {
            warnings.push(ConfigWarning {
                field: "scan.max_depth".into(),
                message: "max_depth is 0 — only the scan root itself is checked".into(),
                severity: WarningSeverity::Warning,
                hint: None,
            });
        }

        // ── Logging ───
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.level".into(),
                message: format!("unknown log level '{}'", self.logging.level),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Use one of: {}", valid_levels.join(", "))),
            });
        }
        let valid_formats = ["pretty", "json", "compact"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.format".into(),
                message: format!("unknown log format '{}'", self.logging.format),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Use one of: {}", valid_formats.join(", "))),
            });
        }

        // Check for hard errors
        let errors: Vec<String> = warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::Error)
            .map(|w| w.to_string())
            .collect();

        if !errors.is_empty() {
            return Err(format!("Configuration errors:\n  • {}", errors.join("\n  • ")));
        }

        Ok(warnings)
    }
}

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::schema::SkillcheckConfig;

/// Loads the skillcheck configuration.
pub struct ConfigLoader {
    config: SkillcheckConfig,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > SKILLCHECK_CONFIG env > ~/.skillcheck/skillcheck.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("SKILLCHECK_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".skillcheck")
            .join("skillcheck.toml")
    }

    /// Load the config from disk, falling back to defaults.
    ///
    /// An explicitly requested file that does not exist is an error; a
    /// missing file at the default location is not.
    pub fn load(path: Option<&Path>) -> skillcheck_core::Result<Self> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            Self::parse(&raw, &config_path)?
        } else if path.is_some() {
            return Err(skillcheck_core::SkillError::Config(format!(
                "config file not found: {}",
                config_path.display()
            )));
        } else {
            warn!(?config_path, "config file not found, using defaults");
            SkillcheckConfig::default()
        };

        Self::finish(config, config_path)
    }

    /// Build a loader from TOML text, as if it had been read from `origin`.
    pub fn from_toml(raw: &str, origin: &Path) -> skillcheck_core::Result<Self> {
        let config = Self::parse(raw, origin)?;
        Self::finish(config, origin.to_path_buf())
    }

    fn parse(raw: &str, origin: &Path) -> skillcheck_core::Result<SkillcheckConfig> {
        toml::from_str::<SkillcheckConfig>(raw).map_err(|e| {
            skillcheck_core::SkillError::Config(format!(
                "failed to parse {}: {}",
                origin.display(),
                e
            ))
        })
    }

    fn finish(config: SkillcheckConfig, config_path: PathBuf) -> skillcheck_core::Result<Self> {
        // Apply environment variable overrides
        let config = Self::apply_env_overrides(config);

        // Validate config — log warnings, fail on errors
        match config.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
            }
            Err(e) => {
                return Err(skillcheck_core::SkillError::Config(e));
            }
        }

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Get a snapshot of the loaded config.
    pub fn get(&self) -> SkillcheckConfig {
        self.config.clone()
    }

    /// Path the config was (or would have been) read from.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Apply env var overrides (SKILLCHECK_LOG_LEVEL, SKILLCHECK_NAME_MAX_LENGTH, etc.)
    fn apply_env_overrides(mut config: SkillcheckConfig) -> SkillcheckConfig {
        if let Ok(v) = std::env::var("SKILLCHECK_LOG_LEVEL") {
            config.logging.level = v;
        }
        if let Ok(v) = std::env::var("SKILLCHECK_NAME_MAX_LENGTH") {
            match v.parse::<usize>() {
                Ok(n) => config.schema.name_max_length = n,
                Err(_) => warn!(value = %v, "ignoring non-numeric SKILLCHECK_NAME_MAX_LENGTH"),
            }
        }
        if let Ok(v) = std::env::var("SKILLCHECK_DESCRIPTION_MAX_LENGTH") {
            match v.parse::<usize>() {
                Ok(n) => config.schema.description_max_length = n,
                Err(_) => {
                    warn!(value = %v, "ignoring non-numeric SKILLCHECK_DESCRIPTION_MAX_LENGTH")
                }
            }
        }
        config
    }
}

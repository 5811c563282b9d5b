//! # skillcheck-config
//!
//! Configuration for skillcheck. Reads from `skillcheck.toml`, environment
//! variables, and CLI overrides — in that precedence order.
//!
//! The `[schema]` table describes what a valid SKILL.md frontmatter looks
//! like; its defaults are the standard skill schema.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{
    ConfigWarning, LoggingConfig, ScanConfig, SchemaConfig, SkillcheckConfig, WarningSeverity,
};

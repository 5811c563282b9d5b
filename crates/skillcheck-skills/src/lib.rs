//! # skillcheck-skills
//!
//! Parsing and validation of SKILL.md skill descriptors. A skill is a
//! directory containing a `SKILL.md` file: Markdown preceded by a small
//! frontmatter block of flat `key: value` fields.
//!
//! ## SKILL.md Format
//!
//! ```markdown
//! ---
//! name: server-management
//! description: Manage remote servers via SSH
//! license: MIT
//! allowed-tools: Bash(ssh:*) Read
//! ---
//!
//! # Server Management
//!
//! ## Instructions
//! 1. Check connectivity first
//! ```
//!
//! ## Pipeline
//!
//! 1. [`frontmatter::extract`] isolates the block between the `---` lines
//! 2. [`parser::parse_fields`] turns the block into a [`FieldMap`]
//! 3. [`Validator::validate`] checks the fields against the schema and
//!    reports the first violation
//!
//! No general YAML parser is involved; see [`parser`] for the exact grammar.

pub mod discovery;
pub mod document;
pub mod frontmatter;
pub mod parser;
pub mod validator;

pub use discovery::{SkillDiscovery, validate_all};
pub use document::{SKILL_FILE, SkillDocument, SkillReport, validate_skill_dir};
pub use frontmatter::{Frontmatter, extract};
pub use parser::{FieldMap, parse_document, parse_fields, parse_str};
pub use validator::{Validator, validate_content, validate_fields};

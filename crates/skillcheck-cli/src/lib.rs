//! # skillcheck-cli
//!
//! Command-line interface for skillcheck.
//!
//! ## Commands
//!
//! - `skillcheck validate <dir>` — Validate the SKILL.md in one skill directory
//! - `skillcheck scan <root>` — Find and validate every skill under a directory
//! - `skillcheck inspect <dir>` — Show the parsed frontmatter fields
//! - `skillcheck schema` — Show the effective validation schema
//! - `skillcheck completions <shell>` — Generate shell completions
//!
//! Exit status is 0 when everything validated, 1 otherwise.

pub mod commands;

pub use commands::Cli;

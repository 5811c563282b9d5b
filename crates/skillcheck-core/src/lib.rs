//! # skillcheck-core
//!
//! Shared vocabulary for the skillcheck workspace: the unified error type and
//! the `(valid, message)` outcome every validation run produces.

pub mod error;
pub mod outcome;

pub use error::{Result, SkillError};
pub use outcome::{ValidationOutcome, VALID_MESSAGE};

use console::style;
use std::path::Path;
use tracing::info;

use skillcheck_core::ValidationOutcome;
use skillcheck_skills::{SkillDocument, Validator, validate_skill_dir};

use super::{EXIT_INVALID, EXIT_VALID};

pub(super) fn cmd_validate(
    validator: &Validator,
    skill_dir: &Path,
    json: bool,
) -> skillcheck_core::Result<i32> {
    let outcome = validate_skill_dir(skill_dir, validator)?;
    info!(
        dir = %skill_dir.display(),
        valid = outcome.valid,
        "validated skill"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", render_outcome(&outcome));
    }
    Ok(outcome.exit_code())
}

pub(super) fn cmd_inspect(skill_dir: &Path, json: bool) -> skillcheck_core::Result<i32> {
    let doc = match SkillDocument::from_dir(skill_dir) {
        Ok(doc) => doc,
        Err(e) if e.is_validation() => {
            println!("{}", render_outcome(&ValidationOutcome::invalid(e.to_string())));
            return Ok(EXIT_INVALID);
        }
        Err(e) => return Err(e),
    };

    let fields = match doc.fields() {
        Ok(fields) => fields,
        Err(e) => {
            println!("{}", render_outcome(&ValidationOutcome::invalid(e.to_string())));
            return Ok(EXIT_INVALID);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
        return Ok(EXIT_VALID);
    }

    println!("{}", style(doc.file_path.display()).bold());
    if fields.is_empty() {
        println!("  (no fields)");
    }
    for (key, value) in fields.iter() {
        let mut lines = value.lines();
        println!("  {}: {}", style(key).cyan(), lines.next().unwrap_or_default());
        for line in lines {
            println!("  {:width$}  {line}", "", width = key.len());
        }
    }
    Ok(EXIT_VALID)
}

/// The plain message, coloured by result. Colour is dropped automatically
/// when stdout is not a terminal.
pub(super) fn render_outcome(outcome: &ValidationOutcome) -> String {
    if outcome.valid {
        style(&outcome.message).green().to_string()
    } else {
        style(&outcome.message).red().to_string()
    }
}

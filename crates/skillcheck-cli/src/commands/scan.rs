use console::style;
use std::path::Path;
use std::sync::Arc;

use skillcheck_config::SkillcheckConfig;
use skillcheck_skills::{SkillDiscovery, SkillReport, Validator, validate_all};

use super::check::render_outcome;
use super::{EXIT_INVALID, EXIT_VALID};

pub(super) async fn cmd_scan(
    config: &SkillcheckConfig,
    validator: Validator,
    root: &Path,
    jobs: Option<usize>,
    json: bool,
) -> skillcheck_core::Result<i32> {
    let dirs = SkillDiscovery::new(root, &config.scan).discover()?;
    let jobs = jobs.unwrap_or(config.scan.jobs);
    let reports = validate_all(dirs, Arc::new(validator), jobs).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_reports(root, &reports);
    }

    Ok(scan_exit_code(&reports))
}

fn print_reports(root: &Path, reports: &[SkillReport]) {
    if reports.is_empty() {
        println!("No skills found in {}", root.display());
        return;
    }

    for report in reports {
        let marker = if report.outcome.valid {
            style("✓").green()
        } else {
            style("✗").red()
        };
        let shown = report
            .skill_dir
            .strip_prefix(root)
            .ok()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(&report.skill_dir);
        println!(
            "{marker} {}: {}",
            style(shown.display()).bold(),
            render_outcome(&report.outcome)
        );
    }

    let invalid = reports.iter().filter(|r| !r.outcome.valid).count();
    println!(
        "\n{} skill(s) checked, {} valid, {} invalid",
        reports.len(),
        reports.len() - invalid,
        invalid
    );
}

/// Invalid if any single skill is invalid. An empty scan is valid.
fn scan_exit_code(reports: &[SkillReport]) -> i32 {
    if reports.iter().all(|r| r.outcome.valid) {
        EXIT_VALID
    } else {
        EXIT_INVALID
    }
}

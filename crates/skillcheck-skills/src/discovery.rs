use skillcheck_config::ScanConfig;
use skillcheck_core::{Result, SkillError, ValidationOutcome};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::document::{SKILL_FILE, SkillReport, validate_skill_dir};
use crate::validator::Validator;

/// Finds skill directories (directories containing a SKILL.md) under a root.
///
/// A directory that holds a SKILL.md is a skill; its subdirectories are
/// the skill's own resources and are not searched further.
pub struct SkillDiscovery {
    root: PathBuf,
    max_depth: usize,
    skip_dirs: Vec<String>,
}

impl SkillDiscovery {
    pub fn new(root: &Path, config: &ScanConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            max_depth: config.max_depth,
            skip_dirs: config.skip_dirs.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and return every skill directory, sorted by path.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(SkillError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("scan root is not a directory: {}", self.root.display()),
            )));
        }

        let mut found = Vec::new();
        self.walk(&self.root, 0, &mut found)?;
        found.sort();
        info!(root = %self.root.display(), count = found.len(), "discovered skills");
        Ok(found)
    }

    fn walk(&self, dir: &Path, depth: usize, found: &mut Vec<PathBuf>) -> Result<()> {
        if dir.join(SKILL_FILE).is_file() {
            debug!(dir = %dir.display(), "found skill");
            found.push(dir.to_path_buf());
            return Ok(());
        }
        if depth >= self.max_depth {
            return Ok(());
        }

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            // The root must be readable; nested directories are best-effort.
            Err(e) if depth > 0 => {
                warn!(dir = %dir.display(), error = %e, "cannot read directory, skipping");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let skipped = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| self.skip_dirs.iter().any(|s| s == n));
            if skipped {
                debug!(dir = %path.display(), "skipping excluded directory");
                continue;
            }
            self.walk(&path, depth + 1, found)?;
        }
        Ok(())
    }
}

/// Number of validations to run at once for a configured `jobs` value.
pub fn effective_jobs(jobs: usize) -> usize {
    if jobs > 0 {
        return jobs;
    }
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

/// Validate many skill directories in parallel.
///
/// Each directory is validated on the blocking pool with its own document
/// and fields; at most `jobs` run at once. Reports come back sorted by path.
/// A skill that cannot be read is reported as invalid rather than aborting
/// the batch.
pub async fn validate_all(
    dirs: Vec<PathBuf>,
    validator: Arc<Validator>,
    jobs: usize,
) -> Result<Vec<SkillReport>> {
    let limit = Arc::new(Semaphore::new(effective_jobs(jobs)));
    let mut tasks = JoinSet::new();

    for dir in dirs {
        let validator = Arc::clone(&validator);
        let permit = Arc::clone(&limit)
            .acquire_owned()
            .await
            .map_err(|e| SkillError::Io(std::io::Error::other(e)))?;
        tasks.spawn_blocking(move || {
            let _permit = permit;
            let outcome = validate_skill_dir(&dir, &validator).unwrap_or_else(|e| {
                warn!(dir = %dir.display(), error = %e, "failed to validate skill");
                ValidationOutcome::invalid(e.to_string())
            });
            SkillReport {
                skill_dir: dir,
                outcome,
            }
        });
    }

    let mut reports = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let report = joined.map_err(|e| SkillError::Io(std::io::Error::other(e)))?;
        reports.push(report);
    }
    reports.sort_by(|a, b| a.skill_dir.cmp(&b.skill_dir));
    Ok(reports)
}

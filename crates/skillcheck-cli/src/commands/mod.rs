use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use serde::Serialize;
use std::path::PathBuf;

use skillcheck_config::{ConfigLoader, SchemaConfig, SkillcheckConfig};
use skillcheck_skills::Validator;

mod check;
mod scan;

/// Exit status for a run where everything validated.
pub const EXIT_VALID: i32 = 0;
/// Exit status for a run where something failed validation.
pub const EXIT_INVALID: i32 = 1;

/// Skillcheck — validate SKILL.md frontmatter
#[derive(Parser)]
#[command(name = "skillcheck", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to skillcheck.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the SKILL.md in a skill directory
    Validate {
        /// Directory containing SKILL.md
        skill_dir: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find every skill under a directory and validate them all
    Scan {
        /// Directory to search
        root: PathBuf,
        /// Parallel validations (default from config, 0 = CPU count)
        #[arg(short, long)]
        jobs: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the frontmatter fields parsed from a skill's SKILL.md
    Inspect {
        /// Directory containing SKILL.md
        skill_dir: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the effective validation schema
    Schema {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show version and build info
    Version,
    /// Generate shell completions for bash, zsh, or fish
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Serialize)]
struct SchemaFile<'a> {
    schema: &'a SchemaConfig,
}

impl Cli {
    /// Run the selected command and return the process exit status.
    pub async fn run(self) -> skillcheck_core::Result<i32> {
        // Load config first so we can use it for log format
        let config_loader = ConfigLoader::load(self.config.as_deref())?;
        let config = config_loader.get();

        // Resolve log level: --verbose > --quiet > --log-level > config default
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            self.log_level.as_deref().unwrap_or(&config.logging.level)
        };
        init_tracing(log_level, &config.logging.format);

        let validator = Validator::new(config.schema.clone())?;

        match self.command {
            Commands::Validate { skill_dir, json } => {
                check::cmd_validate(&validator, &skill_dir, json)
            }
            Commands::Scan { root, jobs, json } => {
                scan::cmd_scan(&config, validator, &root, jobs, json).await
            }
            Commands::Inspect { skill_dir, json } => check::cmd_inspect(&skill_dir, json),
            Commands::Schema { json } => Self::cmd_schema(&config, json),
            Commands::Version => Self::cmd_version(),
            Commands::Completions { shell } => Self::cmd_completions(shell),
        }
    }

    fn cmd_schema(config: &SkillcheckConfig, json: bool) -> skillcheck_core::Result<i32> {
        if json {
            println!("{}", serde_json::to_string_pretty(&config.schema)?);
        } else {
            // Wrapped in a table so the output can be pasted into skillcheck.toml.
            let file = SchemaFile {
                schema: &config.schema,
            };
            println!(
                "{}",
                toml::to_string_pretty(&file)
                    .map_err(|e| skillcheck_core::SkillError::Config(e.to_string()))?
            );
        }
        Ok(EXIT_VALID)
    }

    fn cmd_version() -> skillcheck_core::Result<i32> {
        println!("skillcheck v{}", env!("CARGO_PKG_VERSION"));
        println!("   Target: {}", std::env::consts::ARCH);
        println!("   OS: {}", std::env::consts::OS);
        #[cfg(debug_assertions)]
        println!("   Profile: debug");
        #[cfg(not(debug_assertions))]
        println!("   Profile: release");
        Ok(EXIT_VALID)
    }

    fn cmd_completions(shell: Shell) -> skillcheck_core::Result<i32> {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "skillcheck", &mut std::io::stdout());
        Ok(EXIT_VALID)
    }
}

/// Logs go to stderr; stdout is reserved for validation results.
fn init_tracing(level: &str, format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // `try_init` so a second run in the same process (tests) doesn't panic.
    let _ = match format {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .try_init(),
        "compact" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .with_target(false)
            .try_init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init(),
    };
}

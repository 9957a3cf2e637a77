//! CLI that works out how to run a project's tests.
//!
//! The mutation-testing driver calls this once, before mutating anything,
//! and reads the stored command back on every test run.
//!
//! # Usage
//!
//! ```bash
//! # Print the test command for the current directory
//! testcmd show
//!
//! # Same, as JSON
//! testcmd -f json show ~/src/MyApp
//!
//! # Write testcmd.conf.json into the project
//! testcmd init ~/src/MyApp
//!
//! # Replace an existing testcmd.conf.json
//! testcmd init ~/src/MyApp --force
//!
//! # Only report which build system was detected (no probes run)
//! testcmd classify ~/src/MyApp
//! ```

mod store;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use testcmd_core::{classify, generate, Configuration, SystemProbe};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::store::{ProjectStore, DEFAULT_STORE_FILENAME};

/// Generate the test command for a Swift package or Xcode project.
#[derive(Parser)]
#[command(name = "testcmd")]
#[command(about = "Generate the command that runs a Swift or Xcode project's tests")]
#[command(version)]
struct Cli {
    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// File name of the per-project store written by `init`
    #[arg(long, default_value = DEFAULT_STORE_FILENAME, env = "TESTCMD_CONFIG")]
    config_name: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Print the generated test command
    Show {
        /// Project directory (defaults to the current directory)
        dir: Option<PathBuf>,
    },

    /// Generate the test command and store it in the project directory
    Init {
        /// Project directory (defaults to the current directory)
        dir: Option<PathBuf>,
        /// Overwrite an existing store
        #[arg(long)]
        force: bool,
    },

    /// Report the detected project kind without probing the host
    Classify {
        /// Project directory (defaults to the current directory)
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

#[derive(Debug)]
enum CliError {
    Generate(String),
    Listing(String),
    Store(String),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Generate(_) => ExitCode::from(1),
            CliError::Listing(_) => ExitCode::from(2),
            CliError::Store(_) => ExitCode::from(3),
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Generate(msg) => write!(f, "Generation failed: {}", msg),
            CliError::Listing(msg) => write!(f, "Listing error: {}", msg),
            CliError::Store(msg) => write!(f, "Store error: {}", msg),
        }
    }
}

fn project_dir(dir: Option<PathBuf>) -> Result<PathBuf, CliError> {
    let dir = match dir {
        Some(dir) => dir,
        None => std::env::current_dir()
            .map_err(|e| CliError::Listing(format!("Cannot read current directory: {}", e)))?,
    };
    if !dir.is_dir() {
        return Err(CliError::Listing(format!("{} is not a directory", dir.display())));
    }
    dir.canonicalize()
        .map_err(|e| CliError::Listing(format!("Cannot resolve {}: {}", dir.display(), e)))
}

/// Absolute paths of the top-level entries in `dir`, hidden ones included.
fn list_directory(dir: &Path) -> Result<Vec<String>, CliError> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{}/*", escaped.trim_end_matches('/'));
    let options = glob::MatchOptions {
        require_literal_leading_dot: false,
        ..Default::default()
    };

    let entries = glob::glob_with(&pattern, options)
        .map_err(|e| CliError::Listing(format!("Bad directory pattern: {}", e)))?;

    let paths: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    debug!(count = paths.len(), dir = %dir.display(), "listed project directory");
    Ok(paths)
}

fn generate_for(dir: &Path) -> Result<Configuration, CliError> {
    let listing = list_directory(dir)?;
    let probe = SystemProbe::new(dir);
    generate(&listing, &probe).map_err(|e| CliError::Generate(e.to_string()))
}

fn print_configuration(config: &Configuration, format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(config).map_err(|e| CliError::Store(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if config.is_empty() {
                eprintln!("No Swift package or Xcode project found");
            } else {
                println!("{} {}", config.executable, config.arguments.join(" "));
                for name in &config.exclude_list {
                    println!("exclude: {}", name);
                }
            }
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Show { dir } => {
            let dir = project_dir(dir)?;
            let config = generate_for(&dir)?;
            print_configuration(&config, cli.format)
        }
        Command::Init { dir, force } => {
            let dir = project_dir(dir)?;
            let path = ProjectStore::path_in(&dir, &cli.config_name);

            let existing = ProjectStore::load(&path)
                .map_err(|e| CliError::Store(format!("Cannot read {}: {}", path.display(), e)))?;
            if existing.is_some() && !force {
                return Err(CliError::Store(format!(
                    "{} already exists (use --force to replace it)",
                    path.display()
                )));
            }

            let config = generate_for(&dir)?;
            if config.is_empty() {
                eprintln!("No Swift package or Xcode project found; writing an empty test command");
            }
            ProjectStore::from(config.clone())
                .save(&path)
                .map_err(|e| CliError::Store(format!("Cannot write {}: {}", path.display(), e)))?;
            info!(path = %path.display(), "stored test command");

            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "path": path, "configuration": config }));
            } else {
                eprintln!("Wrote {}", path.display());
            }
            Ok(())
        }
        Command::Classify { dir } => {
            let dir = project_dir(dir)?;
            let listing = list_directory(&dir)?;
            let descriptor = classify(&listing);
            if cli.format == OutputFormat::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "kind": descriptor.kind,
                        "anchor": descriptor.anchor_path,
                        "scheme": descriptor.scheme_name,
                        "exclude_list": descriptor.exclude_list,
                    })
                );
            } else {
                match &descriptor.anchor_path {
                    Some(anchor) => println!("{} ({})", descriptor.kind, anchor),
                    None => println!("{}", descriptor.kind),
                }
            }
            Ok(())
        }
    }
}

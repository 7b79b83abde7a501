//! gpr-deps CLI tool.
//!
//! Usage:
//! ```bash
//! gpr-deps check [OPTIONS] [SNAPSHOT]
//! gpr-deps init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Reports project dependencies to add or remove, based on what the sources import
#[derive(Parser)]
#[command(name = "gpr-deps")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check declared project dependencies against actual imports
    Check {
        /// Project tree snapshot to analyze
        #[arg(default_value = "gpr-deps.snapshot.toml")]
        snapshot: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        #[command(flatten)]
        options: commands::check::CheckOptions,

        /// Exit with status 1 when dependencies should be added or removed
        #[arg(long)]
        fail_on_diff: bool,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for dependency reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per project and dependency.
    #[default]
    Text,
    /// Sorted two-column dependency tree.
    Tree,
    /// The markup document behind the tree.
    Xml,
    /// JSON output.
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            snapshot,
            format,
            options,
            fail_on_diff,
        } => {
            let project_dir = snapshot
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let source = config_resolver::resolve(project_dir, cli.config.as_deref());
            commands::check::run(&snapshot, format, &options, fail_on_diff, &source)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}

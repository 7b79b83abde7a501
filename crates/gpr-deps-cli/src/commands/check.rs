//! Check command implementation.

use anyhow::{Context, Result};
use gpr_deps_core::{Config, DependencyChecker};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Command-line overrides of the configuration file.
#[derive(Debug, Default, clap::Args)]
pub struct CheckOptions {
    /// Show the file imports explaining each project dependency
    #[arg(long)]
    pub show_source: bool,

    /// List every dependency, not only the ones to add or remove
    #[arg(long)]
    pub show_all: bool,

    /// Keep every justifying import instead of one per dependency (slower)
    #[arg(long)]
    pub full: bool,

    /// Comma-separated projects without sources, never reported as removable
    #[arg(long, value_name = "LIST")]
    pub no_source_projects: Option<String>,
}

impl CheckOptions {
    /// Applies the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut Config) {
        if self.show_source {
            config.report.show_source = true;
        }
        if self.show_all {
            config.report.show_diff = false;
        }
        if self.full {
            config.analysis.single_file = false;
        }
        if let Some(list) = &self.no_source_projects {
            config.analysis.no_source_projects.clone_from(list);
        }
    }
}

/// Runs the check command.
pub fn run(
    snapshot: &Path,
    format: OutputFormat,
    options: &CheckOptions,
    fail_on_diff: bool,
    source: &ConfigSource,
) -> Result<()> {
    let mut config = load_config(source)?;
    options.apply(&mut config);

    let model = gpr_deps_snapshot::load(snapshot)
        .with_context(|| format!("Failed to load snapshot: {}", snapshot.display()))?;

    let checker = DependencyChecker::builder().config(config.clone()).build();

    tracing::info!(
        "Checking {} project(s) from {}",
        model.project_count(),
        snapshot.display()
    );

    let stdout = std::io::stdout();
    let mut reporter = super::output::reporter(format, &config.report, stdout.lock());

    let summary = match checker.run(&model, reporter.as_mut()) {
        Ok(summary) => summary,
        Err(err) => {
            // Output already written stays on screen; the diagnostic follows it.
            drop(reporter);
            eprintln!("{:?}", miette::Report::new(err));
            anyhow::bail!("dependency check aborted");
        }
    };

    tracing::info!("{summary}");

    if fail_on_diff && summary.has_changes() {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file_values() {
        let mut config = Config::default();
        let options = CheckOptions {
            show_source: true,
            show_all: true,
            full: true,
            no_source_projects: Some("common".into()),
        };
        options.apply(&mut config);

        assert!(config.report.show_source);
        assert!(!config.report.show_diff);
        assert!(!config.analysis.single_file);
        assert_eq!(config.analysis.no_source_projects, "common");
    }

    #[test]
    fn absent_flags_keep_file_values() {
        let mut config = Config::default();
        config.report.show_source = true;
        CheckOptions::default().apply(&mut config);

        assert!(config.report.show_source);
        assert!(config.report.show_diff);
        assert_eq!(config.analysis.no_source_projects, "shared");
    }

    #[test]
    fn missing_config_file_is_reported() {
        let source = ConfigSource::Explicit("/nonexistent/gpr-deps.toml".into());
        let err = load_config(&source).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}

//! Pipeline entry point: build the graph, reconcile, report.

use miette::Diagnostic;
use tracing::{debug, info};

use crate::config::Config;
use crate::graph::{build_graph, EdgeMode};
use crate::model::{ModelError, ProjectModel};
use crate::reconcile::{reconcile, reconcile_project, NoSourceAllowlist};
use crate::report::{report_project, ReportError, Reporter};
use crate::types::{CheckSummary, ProjectReconciliation};

/// Errors that abort a dependency check.
///
/// A failed run leaves whatever the sink already received in place; the
/// sink is not finished.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum CheckError {
    /// The host model failed to answer a query.
    #[error("dependency analysis failed: {0}")]
    #[diagnostic(
        code(gpr_deps::model),
        help("compile the project tree first so that compiler artifacts are up to date")
    )]
    Model(#[from] ModelError),

    /// The report sink failed.
    #[error("{0}")]
    #[diagnostic(code(gpr_deps::report))]
    Report(#[from] ReportError),
}

/// Builder for configuring a [`DependencyChecker`].
#[derive(Debug, Default)]
pub struct DependencyCheckerBuilder {
    config: Option<Config>,
    edge_mode: Option<EdgeMode>,
    no_source_projects: Option<String>,
}

impl DependencyCheckerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the edge collection mode.
    #[must_use]
    pub fn edge_mode(mut self, mode: EdgeMode) -> Self {
        self.edge_mode = Some(mode);
        self
    }

    /// Overrides the comma-separated no-source allowlist.
    #[must_use]
    pub fn no_source_projects(mut self, list: impl Into<String>) -> Self {
        self.no_source_projects = Some(list.into());
        self
    }

    /// Builds the checker.
    #[must_use]
    pub fn build(self) -> DependencyChecker {
        let config = self.config.unwrap_or_default();
        let edge_mode = self.edge_mode.unwrap_or_else(|| config.edge_mode());
        let allowlist = self
            .no_source_projects
            .map_or_else(|| config.allowlist(), |l| NoSourceAllowlist::parse(&l));

        DependencyChecker {
            edge_mode,
            allowlist,
        }
    }
}

/// Runs the build, reconcile and report pipeline against a host model.
#[derive(Debug, Clone)]
pub struct DependencyChecker {
    edge_mode: EdgeMode,
    allowlist: NoSourceAllowlist,
}

impl DependencyChecker {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> DependencyCheckerBuilder {
        DependencyCheckerBuilder::new()
    }

    /// Edge collection mode in use.
    #[must_use]
    pub fn edge_mode(&self) -> EdgeMode {
        self.edge_mode
    }

    /// Computes the reconciliation without reporting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the model fails.
    pub fn analyze<M: ProjectModel + ?Sized>(
        &self,
        model: &M,
    ) -> Result<Vec<ProjectReconciliation>, CheckError> {
        let actual = build_graph(model, self.edge_mode)?;
        Ok(reconcile(&actual, model, &self.allowlist)?)
    }

    /// Runs the whole pipeline, streaming each project to `reporter`.
    ///
    /// Projects are reported as soon as they are reconciled, so a failure
    /// keeps the output of the projects before it.
    ///
    /// # Errors
    ///
    /// Returns an error if the model or the reporter fails.
    pub fn run<M, R>(&self, model: &M, reporter: &mut R) -> Result<CheckSummary, CheckError>
    where
        M: ProjectModel + ?Sized,
        R: Reporter + ?Sized,
    {
        let actual = build_graph(model, self.edge_mode)?;
        info!("Reconciling {} project(s)", actual.len());

        let mut summary = CheckSummary::default();
        for project in &actual {
            let result = reconcile_project(project, model, &self.allowlist)?;
            debug!(
                "{}: {} dependency entr(ies)",
                result.project,
                result.entries.len()
            );
            summary.record(&result);
            report_project(reporter, &result)?;
        }

        reporter.finish()?;
        Ok(summary)
    }
}

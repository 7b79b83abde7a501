//! Output sinks for reconciliation results.
//!
//! A [`Reporter`] receives results project by project through four calls.
//! The graph builder and reconciler never see which sink is in use.

mod json;
mod text;
mod tree;

pub use json::JsonReporter;
pub use text::TextReporter;
pub use tree::{NodeAction, TreeNode, TreeReporter, TreeView, TreeViewer};

use crate::types::{Classification, Project, ProjectReconciliation, SourceFile};

/// Errors raised while writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Writing to the output failed.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the report failed.
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// A dependency or explanation arrived before any project.
    #[error("{0} reported outside of a project")]
    NoCurrentProject(&'static str),

    /// The tree viewer rejected the view.
    #[error("tree viewer failed: {0}")]
    Viewer(String),
}

/// A sink for reconciliation results.
///
/// Calls arrive in the order `begin_project`, then for each dependency one
/// `emit_dependency` followed by its `explain_dependency` calls, and a single
/// `finish` once every project was reported.
pub trait Reporter {
    /// Starts the section of `project`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn begin_project(&mut self, project: &Project) -> Result<(), ReportError>;

    /// Reports a dependency of the current project.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn emit_dependency(
        &mut self,
        dependency: &Project,
        classification: Classification,
    ) -> Result<(), ReportError>;

    /// Explains the last dependency: `source` imports `imported`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn explain_dependency(
        &mut self,
        source: &SourceFile,
        imported: &SourceFile,
    ) -> Result<(), ReportError>;

    /// Completes the report.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written or displayed.
    fn finish(&mut self) -> Result<(), ReportError>;
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn begin_project(&mut self, project: &Project) -> Result<(), ReportError> {
        (**self).begin_project(project)
    }

    fn emit_dependency(
        &mut self,
        dependency: &Project,
        classification: Classification,
    ) -> Result<(), ReportError> {
        (**self).emit_dependency(dependency, classification)
    }

    fn explain_dependency(
        &mut self,
        source: &SourceFile,
        imported: &SourceFile,
    ) -> Result<(), ReportError> {
        (**self).explain_dependency(source, imported)
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        (**self).finish()
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn begin_project(&mut self, project: &Project) -> Result<(), ReportError> {
        (**self).begin_project(project)
    }

    fn emit_dependency(
        &mut self,
        dependency: &Project,
        classification: Classification,
    ) -> Result<(), ReportError> {
        (**self).emit_dependency(dependency, classification)
    }

    fn explain_dependency(
        &mut self,
        source: &SourceFile,
        imported: &SourceFile,
    ) -> Result<(), ReportError> {
        (**self).explain_dependency(source, imported)
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        (**self).finish()
    }
}

/// Feeds one project's results to `reporter`.
///
/// # Errors
///
/// Returns the first error raised by the reporter.
pub fn report_project<R: Reporter + ?Sized>(
    reporter: &mut R,
    result: &ProjectReconciliation,
) -> Result<(), ReportError> {
    reporter.begin_project(&result.project)?;
    for entry in &result.entries {
        reporter.emit_dependency(&entry.dependency, entry.classification)?;
        for edge in &entry.edges {
            reporter.explain_dependency(&edge.source, &edge.imported)?;
        }
    }
    Ok(())
}

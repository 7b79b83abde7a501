//! JSON sink.

use std::io::Write;

use super::{ReportError, Reporter};
use crate::types::{
    Classification, DependencyEntry, ImportEdge, Project, ProjectReconciliation, SourceFile,
};

/// Collects every result and writes them as a pretty JSON array on finish.
pub struct JsonReporter<W: Write> {
    out: W,
    projects: Vec<ProjectReconciliation>,
}

impl<W: Write> JsonReporter<W> {
    /// Creates a JSON reporter writing to `out`.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            projects: Vec::new(),
        }
    }

    /// Consumes the reporter and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn current(&mut self, what: &'static str) -> Result<&mut ProjectReconciliation, ReportError> {
        self.projects
            .last_mut()
            .ok_or(ReportError::NoCurrentProject(what))
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn begin_project(&mut self, project: &Project) -> Result<(), ReportError> {
        self.projects.push(ProjectReconciliation {
            project: project.clone(),
            entries: Vec::new(),
        });
        Ok(())
    }

    fn emit_dependency(
        &mut self,
        dependency: &Project,
        classification: Classification,
    ) -> Result<(), ReportError> {
        self.current("dependency")?.entries.push(DependencyEntry {
            dependency: dependency.clone(),
            classification,
            edges: Vec::new(),
        });
        Ok(())
    }

    fn explain_dependency(
        &mut self,
        source: &SourceFile,
        imported: &SourceFile,
    ) -> Result<(), ReportError> {
        self.current("explanation")?
            .entries
            .last_mut()
            .ok_or(ReportError::NoCurrentProject("explanation"))?
            .edges
            .push(ImportEdge::new(source.clone(), imported.clone()));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut self.out, &self.projects)?;
        writeln!(self.out)?;
        self.out.flush()?;
        self.projects.clear();
        Ok(())
    }
}

//! Plain text sink.

use std::io::Write;

use super::{ReportError, Reporter};
use crate::types::{Classification, Project, SourceFile};

/// Writes one line per project, dependency and (optionally) justification.
///
/// In diff mode only changes are listed: `+` for dependencies to add and
/// `-` for dependencies to remove. Otherwise every dependency is listed
/// with `+`. Justification lines follow `show_source` alone, so confirmed
/// dependencies still explain themselves in diff mode.
pub struct TextReporter<W: Write> {
    out: W,
    show_source: bool,
    show_diff: bool,
}

impl<W: Write> TextReporter<W> {
    /// Creates a text reporter writing to `out`.
    #[must_use]
    pub fn new(out: W, show_source: bool, show_diff: bool) -> Self {
        Self {
            out,
            show_source,
            show_diff,
        }
    }

    /// Consumes the reporter and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn begin_project(&mut self, project: &Project) -> Result<(), ReportError> {
        writeln!(self.out, "Project {} depends on:", project.name)?;
        Ok(())
    }

    fn emit_dependency(
        &mut self,
        dependency: &Project,
        classification: Classification,
    ) -> Result<(), ReportError> {
        let marker = match classification {
            Classification::ToRemove if self.show_diff => Some('-'),
            Classification::Confirmed if self.show_diff => None,
            _ => Some('+'),
        };

        if let Some(marker) = marker {
            writeln!(self.out, " {marker} {}", dependency.name)?;
        }
        Ok(())
    }

    fn explain_dependency(
        &mut self,
        source: &SourceFile,
        imported: &SourceFile,
    ) -> Result<(), ReportError> {
        if self.show_source {
            writeln!(
                self.out,
                "   => {} depends on {}",
                source.basename(),
                imported.basename()
            )?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        self.out.flush()?;
        Ok(())
    }
}

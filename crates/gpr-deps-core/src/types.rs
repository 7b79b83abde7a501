//! Core types for projects, import evidence, and reconciliation results.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Extension of project definition files.
pub const PROJECT_FILE_EXTENSION: &str = "gpr";

/// A project in the host project tree.
///
/// Projects are identified by name; the definition file is what a viewer
/// opens when the project is selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    /// Unique project name.
    pub name: String,
    /// Path of the project definition file.
    pub file: PathBuf,
}

impl Project {
    /// Creates a project whose definition file is `<name>.gpr`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let file = PathBuf::from(format!("{name}.{PROJECT_FILE_EXTENSION}"));
        Self { name, file }
    }

    /// Creates a project with an explicit definition file.
    #[must_use]
    pub fn with_file(name: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A source file owned by exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceFile {
    path: PathBuf,
}

impl SourceFile {
    /// Creates a source file handle.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Full path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without its directory.
    #[must_use]
    pub fn basename(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.to_string_lossy().into_owned(),
            |n| n.to_string_lossy().into_owned(),
        )
    }
}

impl std::fmt::Display for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// How an import was introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    /// Written in the source (a `with` clause).
    Explicit,
    /// Pulled in by the compiler (parent units, inlined bodies, ...).
    Implicit,
    /// Part of the compiler's runtime library.
    System,
}

/// An import of another source file, as returned by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportRef {
    /// The imported file.
    pub file: SourceFile,
    /// How the import was introduced.
    pub kind: ImportKind,
}

impl ImportRef {
    /// Creates an import reference.
    #[must_use]
    pub fn new(file: SourceFile, kind: ImportKind) -> Self {
        Self { file, kind }
    }
}

/// One piece of evidence that the owner of `source` depends on the owner of `imported`.
///
/// Only built when the two owning projects differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportEdge {
    /// The importing file.
    pub source: SourceFile,
    /// The imported file.
    pub imported: SourceFile,
}

impl ImportEdge {
    /// Creates a new edge.
    #[must_use]
    pub fn new(source: SourceFile, imported: SourceFile) -> Self {
        Self { source, imported }
    }
}

/// Outcome of comparing one dependency against the declared set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Declared and actually used.
    Confirmed,
    /// Used by the sources but not declared.
    ToAdd,
    /// Declared but never used.
    ToRemove,
}

impl Classification {
    /// Suffix shown next to a dependency in tree views.
    #[must_use]
    pub fn annotation(self) -> &'static str {
        match self {
            Self::Confirmed => "",
            Self::ToAdd => " (should be added)",
            Self::ToRemove => " (should be removed)",
        }
    }

    /// Whether this entry asks for a change to the project file.
    #[must_use]
    pub fn is_change(self) -> bool {
        !matches!(self, Self::Confirmed)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Confirmed => write!(f, "confirmed"),
            Self::ToAdd => write!(f, "to-add"),
            Self::ToRemove => write!(f, "to-remove"),
        }
    }
}

/// A classified dependency of one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEntry {
    /// The dependency project.
    pub dependency: Project,
    /// How it compares to the declared set.
    pub classification: Classification,
    /// Import edges justifying the dependency; empty for [`Classification::ToRemove`].
    pub edges: Vec<ImportEdge>,
}

/// Reconciliation result for a single project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReconciliation {
    /// The analyzed project.
    pub project: Project,
    /// Confirmed and to-add entries in discovery order, then to-remove entries.
    pub entries: Vec<DependencyEntry>,
}

impl ProjectReconciliation {
    /// Entries with the given classification.
    pub fn with_classification(
        &self,
        classification: Classification,
    ) -> impl Iterator<Item = &DependencyEntry> {
        self.entries
            .iter()
            .filter(move |e| e.classification == classification)
    }

    /// Looks up the entry for a dependency by name.
    #[must_use]
    pub fn entry(&self, dependency: &str) -> Option<&DependencyEntry> {
        self.entries.iter().find(|e| e.dependency.name == dependency)
    }
}

/// Counters for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    /// Number of projects analyzed.
    pub projects: usize,
    /// Dependencies both declared and used.
    pub confirmed: usize,
    /// Dependencies that should be added.
    pub to_add: usize,
    /// Dependencies that should be removed.
    pub to_remove: usize,
}

impl CheckSummary {
    /// Adds the counts of one project's reconciliation.
    pub fn record(&mut self, result: &ProjectReconciliation) {
        self.projects += 1;
        for entry in &result.entries {
            match entry.classification {
                Classification::Confirmed => self.confirmed += 1,
                Classification::ToAdd => self.to_add += 1,
                Classification::ToRemove => self.to_remove += 1,
            }
        }
    }

    /// Returns true if any project file needs editing.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.to_add > 0 || self.to_remove > 0
    }
}

impl std::fmt::Display for CheckSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} project(s): {} confirmed, {} to add, {} to remove",
            self.projects, self.confirmed, self.to_add, self.to_remove
        )
    }
}

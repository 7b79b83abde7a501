//! Host project model interfaces.
//!
//! The checker never reads project files or compiler artifacts itself. The
//! host environment (an IDE, a build tool, or a loaded snapshot) implements
//! these traits and the graph builder and reconciler only query them.

use std::path::PathBuf;

use crate::types::{ImportRef, Project, SourceFile};

/// Errors raised by a host model while answering queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The project is not part of the loaded tree.
    #[error("unknown project '{0}'")]
    UnknownProject(String),

    /// The compiler artifact for a source is missing (project not compiled?).
    #[error("missing compiler artifact for {path}")]
    MissingArtifact {
        /// Source file whose artifact was expected.
        path: PathBuf,
    },

    /// The compiler artifact could not be interpreted.
    #[error("malformed compiler artifact {path}: {message}")]
    MalformedArtifact {
        /// Artifact path.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// An import names a file the host cannot locate.
    #[error("{source_file}: cannot resolve import of {imported}")]
    UnresolvedImport {
        /// Importing file.
        source_file: PathBuf,
        /// Import that failed to resolve.
        imported: PathBuf,
    },
}

/// Source of explicitly declared project dependencies.
pub trait DeclaredDependencies {
    /// The root of the project tree.
    fn root(&self) -> Project;

    /// Projects declared as dependencies of `project`.
    ///
    /// With `recursive`, every project reachable through declared
    /// dependencies is returned, each once.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is unknown to the host.
    fn dependencies(&self, project: &Project, recursive: bool) -> Result<Vec<Project>, ModelError>;
}

/// Resolves sources and their imports to owning projects.
pub trait ImportResolver {
    /// Source files of `project`, optionally including those of its dependencies.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is unknown to the host.
    fn sources(&self, project: &Project, recursive: bool) -> Result<Vec<SourceFile>, ModelError>;

    /// Files imported by `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the compiler artifact for `source` is missing or
    /// malformed.
    fn imports(
        &self,
        source: &SourceFile,
        include_implicit: bool,
        include_system: bool,
    ) -> Result<Vec<ImportRef>, ModelError>;

    /// Project owning the imported file.
    ///
    /// Files outside the project tree resolve to `None`, or to the root
    /// project when `default_to_root` is set.
    fn owning_project(&self, import: &ImportRef, default_to_root: bool) -> Option<Project>;
}

/// A complete host model.
pub trait ProjectModel: DeclaredDependencies + ImportResolver {}

impl<T: DeclaredDependencies + ImportResolver + ?Sized> ProjectModel for T {}

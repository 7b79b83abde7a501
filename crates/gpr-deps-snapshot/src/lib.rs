//! # gpr-deps-snapshot
//!
//! Loads a TOML snapshot of a compiled project tree and turns it into an
//! [`InMemoryModel`] the dependency checker can query. This stands in for
//! an IDE or build tool when gpr-deps runs from the command line.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;

pub use config::{ProjectDef, Snapshot, SnapshotError, SourceDef};

use gpr_deps_core::{ImportKind, InMemoryModel, ModelError, Project, SourceSpec};
use std::path::Path;

impl Snapshot {
    /// Validates the snapshot and converts it into a queryable model.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn into_model(self) -> Result<InMemoryModel, SnapshotError> {
        self.validate()?;

        let mut builder = InMemoryModel::builder(self.root);
        for def in self.projects {
            let project = match def.file {
                Some(file) => Project::with_file(def.name, file),
                None => Project::new(def.name),
            };
            let sources = def.sources.into_iter().map(source_spec).collect();
            builder = builder.project_with(project, def.dependencies, sources);
        }

        builder.build().map_err(|e| match e {
            ModelError::UnknownProject(name) => {
                SnapshotError::Validation(format!("unknown project '{name}'"))
            }
            other => SnapshotError::Validation(other.to_string()),
        })
    }
}

fn source_spec(def: SourceDef) -> SourceSpec {
    if !def.compiled {
        return SourceSpec::uncompiled(def.path);
    }

    let mut spec = SourceSpec::new(def.path);
    for (paths, kind) in [
        (def.imports, ImportKind::Explicit),
        (def.implicit, ImportKind::Implicit),
        (def.system, ImportKind::System),
    ] {
        for path in paths {
            spec = spec.import(path, kind);
        }
    }
    spec
}

/// Reads, validates and converts the snapshot at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load(path: &Path) -> Result<InMemoryModel, SnapshotError> {
    let snapshot = Snapshot::from_file(path)?;
    tracing::debug!(
        "Loaded snapshot {} with {} project(s)",
        path.display(),
        snapshot.projects.len()
    );
    snapshot.into_model()
}

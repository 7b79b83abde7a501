//! TOML description of a compiled project tree.
//!
//! A snapshot lists every project with its declared dependencies and, for
//! each source, the files the compiler recorded as imported.
//!
//! ```toml
//! root = "app"
//!
//! [[projects]]
//! name = "app"
//! dependencies = ["lib"]
//!
//! [[projects.sources]]
//! path = "app/src/main.adb"
//! imports = ["lib/src/lib.ads"]
//! implicit = ["lib/src/lib.adb"]
//! ```

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// A whole project tree.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    /// Name of the root project.
    pub root: String,

    /// Every project of the tree.
    #[serde(default)]
    pub projects: Vec<ProjectDef>,
}

/// One project.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDef {
    /// Unique project name.
    pub name: String,

    /// Definition file; `<name>.gpr` when omitted.
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Declared (`with`ed) projects.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Source files owned by this project.
    #[serde(default)]
    pub sources: Vec<SourceDef>,
}

/// One source file and its recorded imports.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceDef {
    /// Path of the source.
    pub path: PathBuf,

    /// Files named in the source's `with` clauses.
    #[serde(default)]
    pub imports: Vec<PathBuf>,

    /// Files the compiler added on its own.
    #[serde(default)]
    pub implicit: Vec<PathBuf>,

    /// Runtime library files.
    #[serde(default)]
    pub system: Vec<PathBuf>,

    /// Whether compiler output exists for this source.
    #[serde(default = "default_true")]
    pub compiled: bool,
}

fn default_true() -> bool {
    true
}

/// Errors when loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Failed to read the snapshot file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML.
    #[error("invalid snapshot: {message}")]
    Parse {
        /// Parse error detail.
        message: String,
    },
    /// The snapshot is structurally invalid.
    #[error("snapshot validation: {0}")]
    Validation(String),
}

impl Snapshot {
    /// Load from a TOML file.
    ///
    /// Relative paths in the snapshot are resolved against the directory
    /// containing the file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut snapshot = Self::parse(&content)?;
        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            snapshot.rebase(base);
        }
        Ok(snapshot)
    }

    /// Parse from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, SnapshotError> {
        toml::from_str(content).map_err(|e| SnapshotError::Parse {
            message: e.to_string(),
        })
    }

    /// Makes every relative path relative to `base` instead.
    pub fn rebase(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        for project in &mut self.projects {
            let file = project
                .file
                .get_or_insert_with(|| PathBuf::from(format!("{}.gpr", project.name)));
            join(file);
            for source in &mut project.sources {
                join(&mut source.path);
                source
                    .imports
                    .iter_mut()
                    .chain(source.implicit.iter_mut())
                    .chain(source.system.iter_mut())
                    .for_each(join);
            }
        }
    }

    /// Validate snapshot consistency.
    ///
    /// # Errors
    ///
    /// Returns error describing the first problem found.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut names: HashSet<&str> = HashSet::new();
        for p in &self.projects {
            if !names.insert(p.name.as_str()) {
                return Err(SnapshotError::Validation(format!(
                    "project '{}' defined twice",
                    p.name
                )));
            }
        }

        if !names.contains(self.root.as_str()) {
            return Err(SnapshotError::Validation(format!(
                "root project '{}' is not defined",
                self.root
            )));
        }

        let mut owners: HashMap<&Path, &str> = HashMap::new();
        for p in &self.projects {
            for dep in &p.dependencies {
                if !names.contains(dep.as_str()) {
                    return Err(SnapshotError::Validation(format!(
                        "projects.{}: unknown dependency '{dep}'",
                        p.name
                    )));
                }
                if dep == &p.name {
                    return Err(SnapshotError::Validation(format!(
                        "projects.{}: self-dependency",
                        p.name
                    )));
                }
            }

            for s in &p.sources {
                if let Some(other) = owners.insert(&s.path, &p.name) {
                    return Err(SnapshotError::Validation(format!(
                        "source {} belongs to both '{other}' and '{}'",
                        s.path.display(),
                        p.name
                    )));
                }
            }
        }

        Ok(())
    }
}

//! # gpr-deps-core
//!
//! Reconciles the declared dependencies of a project tree with the
//! dependencies its sources actually have.
//!
//! The crate provides:
//!
//! - [`DeclaredDependencies`] and [`ImportResolver`], the queries a host
//!   project model must answer
//! - [`build_graph`] to derive actual project dependencies from imports
//! - [`reconcile`] to classify each dependency as confirmed, to add, or to remove
//! - [`Reporter`] with text, tree and JSON sinks
//! - [`DependencyChecker`] running the whole pipeline
//!
//! ## Example
//!
//! ```ignore
//! use gpr_deps_core::{DependencyChecker, TextReporter};
//!
//! let checker = DependencyChecker::builder().config(config).build();
//! let mut reporter = TextReporter::new(std::io::stdout(), false, true);
//! let summary = checker.run(&model, &mut reporter)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod config;
mod graph;
mod memory;
mod model;
mod reconcile;
mod types;

/// Output sinks.
pub mod report;

pub use checker::{CheckError, DependencyChecker, DependencyCheckerBuilder};
pub use config::{AnalysisConfig, Config, ConfigError, ReportConfig};
pub use graph::{
    build_graph, universe, ActualDependency, ActualDependencyMap, EdgeMode, ProjectDependencies,
};
pub use memory::{InMemoryModel, InMemoryModelBuilder, SourceSpec};
pub use model::{DeclaredDependencies, ImportResolver, ModelError, ProjectModel};
pub use reconcile::{reconcile, reconcile_project, NoSourceAllowlist};
pub use report::{
    JsonReporter, NodeAction, ReportError, Reporter, TextReporter, TreeReporter, TreeView,
    TreeViewer,
};
pub use types::{
    CheckSummary, Classification, DependencyEntry, ImportEdge, ImportKind, ImportRef, Project,
    ProjectReconciliation, SourceFile, PROJECT_FILE_EXTENSION,
};

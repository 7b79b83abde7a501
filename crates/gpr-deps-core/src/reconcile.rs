//! Comparison of actual dependencies against declared ones.

use std::collections::HashSet;

use crate::graph::{ActualDependencyMap, ProjectDependencies};
use crate::model::{DeclaredDependencies, ModelError};
use crate::types::{Classification, DependencyEntry, Project, ProjectReconciliation};

/// Project names never reported as removable.
///
/// Such projects hold shared settings and no sources, so no import can ever
/// justify depending on them. Matching is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoSourceAllowlist {
    names: HashSet<String>,
}

impl NoSourceAllowlist {
    /// Parses a comma-separated list of project names.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        list.split(',').collect()
    }

    /// Returns true if `project` is exempt from removal.
    #[must_use]
    pub fn contains(&self, project: &Project) -> bool {
        self.names.contains(&project.name.to_lowercase())
    }

    /// Number of names in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for NoSourceAllowlist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let names = iter
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { names }
    }
}

/// Reconciles one project's actual dependencies with its declared ones.
///
/// # Errors
///
/// Propagates errors from fetching the declared dependencies.
pub fn reconcile_project<D: DeclaredDependencies + ?Sized>(
    actual: &ProjectDependencies,
    declared: &D,
    allowlist: &NoSourceAllowlist,
) -> Result<ProjectReconciliation, ModelError> {
    let mut remaining = declared.dependencies(&actual.project, false)?;
    let mut entries = Vec::with_capacity(actual.dependencies.len() + remaining.len());

    for dep in &actual.dependencies {
        let classification = match remaining.iter().position(|d| d == &dep.project) {
            Some(index) => {
                remaining.remove(index);
                Classification::Confirmed
            }
            None => Classification::ToAdd,
        };
        entries.push(DependencyEntry {
            dependency: dep.project.clone(),
            classification,
            edges: dep.edges.clone(),
        });
    }

    entries.extend(
        remaining
            .into_iter()
            .filter(|d| !allowlist.contains(d))
            .map(|dependency| DependencyEntry {
                dependency,
                classification: Classification::ToRemove,
                edges: Vec::new(),
            }),
    );

    Ok(ProjectReconciliation {
        project: actual.project.clone(),
        entries,
    })
}

/// Reconciles every project of `actual`, preserving its order.
///
/// # Errors
///
/// Propagates errors from fetching the declared dependencies.
pub fn reconcile<D: DeclaredDependencies + ?Sized>(
    actual: &ActualDependencyMap,
    declared: &D,
    allowlist: &NoSourceAllowlist,
) -> Result<Vec<ProjectReconciliation>, ModelError> {
    actual
        .iter()
        .map(|p| reconcile_project(p, declared, allowlist))
        .collect()
}

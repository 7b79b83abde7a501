//! Actual dependency graph construction.
//!
//! Walks every project reachable from the root and derives which projects it
//! really depends on by mapping each imported file to its owning project.

use serde::Serialize;
use tracing::debug;

use crate::model::{ModelError, ProjectModel};
use crate::types::{ImportEdge, Project};

/// How many justifying edges are kept per dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeMode {
    /// Keep an edge only when the previous accepted import went to a
    /// different project. Usually one edge per dependency.
    #[default]
    SingleFile,
    /// Keep every edge.
    Full,
}

impl EdgeMode {
    /// Mode matching the `single_file` configuration switch.
    #[must_use]
    pub fn from_single_file(single_file: bool) -> Self {
        if single_file {
            Self::SingleFile
        } else {
            Self::Full
        }
    }
}

/// A dependency of one project and the edges justifying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActualDependency {
    /// The project depended upon.
    pub project: Project,
    /// Never empty.
    pub edges: Vec<ImportEdge>,
}

/// The actual dependencies of a single project, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDependencies {
    /// The analyzed project.
    pub project: Project,
    /// Dependencies in the order they were first seen.
    pub dependencies: Vec<ActualDependency>,
}

impl ProjectDependencies {
    fn new(project: Project) -> Self {
        Self {
            project,
            dependencies: Vec::new(),
        }
    }

    fn push_edge(&mut self, target: &Project, edge: ImportEdge) {
        match self.dependencies.iter_mut().find(|d| &d.project == target) {
            Some(dep) => dep.edges.push(edge),
            None => self.dependencies.push(ActualDependency {
                project: target.clone(),
                edges: vec![edge],
            }),
        }
    }

    /// Edges justifying the dependency on `target`, if any.
    #[must_use]
    pub fn edges(&self, target: &str) -> Option<&[ImportEdge]> {
        self.dependencies
            .iter()
            .find(|d| d.project.name == target)
            .map(|d| d.edges.as_slice())
    }
}

/// Actual dependencies of every project in the analyzed universe.
///
/// Iteration order is the order projects were scanned and is stable for an
/// unchanged model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActualDependencyMap {
    projects: Vec<ProjectDependencies>,
}

impl ActualDependencyMap {
    /// Number of analyzed projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Returns true if no project was analyzed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Iterates over projects in scan order.
    pub fn iter(&self) -> std::slice::Iter<'_, ProjectDependencies> {
        self.projects.iter()
    }

    /// Dependencies of a project by name.
    #[must_use]
    pub fn get(&self, project: &str) -> Option<&ProjectDependencies> {
        self.projects.iter().find(|p| p.project.name == project)
    }
}

impl<'a> IntoIterator for &'a ActualDependencyMap {
    type Item = &'a ProjectDependencies;
    type IntoIter = std::slice::Iter<'a, ProjectDependencies>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Projects analyzed for `model`: the root, then everything it reaches.
///
/// # Errors
///
/// Propagates model errors.
pub fn universe<M: ProjectModel + ?Sized>(model: &M) -> Result<Vec<Project>, ModelError> {
    let root = model.root();
    let mut projects = vec![root.clone()];
    for project in model.dependencies(&root, true)? {
        if !projects.contains(&project) {
            projects.push(project);
        }
    }
    Ok(projects)
}

/// Builds the actual dependency map for every project reachable from the root.
///
/// # Errors
///
/// Propagates resolver errors (missing or malformed artifacts) unchanged.
pub fn build_graph<M: ProjectModel + ?Sized>(
    model: &M,
    mode: EdgeMode,
) -> Result<ActualDependencyMap, ModelError> {
    let mut map = ActualDependencyMap::default();
    for project in universe(model)? {
        let deps = scan_project(model, project, mode)?;
        debug!(
            "Scanned {}: {} actual dependenc(ies)",
            deps.project,
            deps.dependencies.len()
        );
        map.projects.push(deps);
    }
    Ok(map)
}

fn scan_project<M: ProjectModel + ?Sized>(
    model: &M,
    project: Project,
    mode: EdgeMode,
) -> Result<ProjectDependencies, ModelError> {
    let sources = model.sources(&project, false)?;
    let mut deps = ProjectDependencies::new(project);
    // Owner of the last accepted import; carried across source files.
    let mut previous: Option<Project> = None;

    for source in sources {
        for import in model.imports(&source, true, false)? {
            let Some(owner) = model.owning_project(&import, false) else {
                continue;
            };
            if owner == deps.project {
                continue;
            }

            let record = match mode {
                EdgeMode::SingleFile => previous.as_ref() != Some(&owner),
                EdgeMode::Full => true,
            };
            if record {
                deps.push_edge(&owner, ImportEdge::new(source.clone(), import.file));
            }
            previous = Some(owner);
        }
    }

    Ok(deps)
}

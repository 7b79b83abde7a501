//! In-memory project model.
//!
//! Holds a fully resolved project tree. Used as the host for snapshot files
//! and as the model in tests.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::model::{DeclaredDependencies, ImportResolver, ModelError};
use crate::types::{ImportKind, ImportRef, Project, SourceFile};

#[derive(Debug, Clone)]
struct ProjectData {
    project: Project,
    dependencies: Vec<String>,
    sources: Vec<SourceFile>,
}

/// A project tree held entirely in memory.
#[derive(Debug, Clone)]
pub struct InMemoryModel {
    root: String,
    /// Projects in definition order.
    projects: Vec<ProjectData>,
    index: HashMap<String, usize>,
    owners: HashMap<SourceFile, String>,
    imports: HashMap<SourceFile, Vec<ImportRef>>,
}

impl InMemoryModel {
    /// Starts building a model rooted at `root`.
    #[must_use]
    pub fn builder(root: impl Into<String>) -> InMemoryModelBuilder {
        InMemoryModelBuilder {
            root: root.into(),
            projects: Vec::new(),
        }
    }

    /// Number of projects in the model.
    #[must_use]
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    /// Looks up a project by name.
    #[must_use]
    pub fn project(&self, name: &str) -> Option<&Project> {
        self.index.get(name).map(|&i| &self.projects[i].project)
    }

    fn data(&self, name: &str) -> Result<&ProjectData, ModelError> {
        self.index
            .get(name)
            .map(|&i| &self.projects[i])
            .ok_or_else(|| ModelError::UnknownProject(name.to_owned()))
    }

    /// Depth-first walk over declared dependencies, each project once.
    fn walk(
        &self,
        name: &str,
        seen: &mut HashSet<String>,
        out: &mut Vec<Project>,
    ) -> Result<(), ModelError> {
        for dep in &self.data(name)?.dependencies {
            if seen.insert(dep.clone()) {
                out.push(self.data(dep)?.project.clone());
                self.walk(dep, seen, out)?;
            }
        }
        Ok(())
    }
}

impl DeclaredDependencies for InMemoryModel {
    fn root(&self) -> Project {
        self.project(&self.root)
            .cloned()
            .unwrap_or_else(|| Project::new(self.root.clone()))
    }

    fn dependencies(&self, project: &Project, recursive: bool) -> Result<Vec<Project>, ModelError> {
        let data = self.data(&project.name)?;
        if !recursive {
            return data
                .dependencies
                .iter()
                .map(|d| self.data(d).map(|p| p.project.clone()))
                .collect();
        }

        let mut seen = HashSet::from([project.name.clone()]);
        let mut out = Vec::new();
        self.walk(&project.name, &mut seen, &mut out)?;
        Ok(out)
    }
}

impl ImportResolver for InMemoryModel {
    fn sources(&self, project: &Project, recursive: bool) -> Result<Vec<SourceFile>, ModelError> {
        let mut sources = self.data(&project.name)?.sources.clone();
        if recursive {
            for dep in self.dependencies(project, true)? {
                sources.extend(self.data(&dep.name)?.sources.iter().cloned());
            }
        }
        Ok(sources)
    }

    fn imports(
        &self,
        source: &SourceFile,
        include_implicit: bool,
        include_system: bool,
    ) -> Result<Vec<ImportRef>, ModelError> {
        let imports = self
            .imports
            .get(source)
            .ok_or_else(|| ModelError::MissingArtifact {
                path: source.path().to_path_buf(),
            })?;

        Ok(imports
            .iter()
            .filter(|i| match i.kind {
                ImportKind::Explicit => true,
                ImportKind::Implicit => include_implicit,
                ImportKind::System => include_system,
            })
            .cloned()
            .collect())
    }

    fn owning_project(&self, import: &ImportRef, default_to_root: bool) -> Option<Project> {
        match self.owners.get(&import.file) {
            Some(owner) => self.project(owner).cloned(),
            None if default_to_root => Some(self.root()),
            None => None,
        }
    }
}

/// A source file and its resolved imports, as handed to the builder.
#[derive(Debug, Clone)]
pub struct SourceSpec {
    file: SourceFile,
    imports: Option<Vec<ImportRef>>,
}

impl SourceSpec {
    /// A compiled source with no imports yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: SourceFile::new(path),
            imports: Some(Vec::new()),
        }
    }

    /// A source whose compiler artifact is missing.
    #[must_use]
    pub fn uncompiled(path: impl Into<PathBuf>) -> Self {
        Self {
            file: SourceFile::new(path),
            imports: None,
        }
    }

    /// Adds an import of the given kind.
    #[must_use]
    pub fn import(mut self, path: impl Into<PathBuf>, kind: ImportKind) -> Self {
        self.imports
            .get_or_insert_with(Vec::new)
            .push(ImportRef::new(SourceFile::new(path), kind));
        self
    }

    /// Adds an explicit import.
    #[must_use]
    pub fn with(self, path: impl Into<PathBuf>) -> Self {
        self.import(path, ImportKind::Explicit)
    }
}

/// Builder for [`InMemoryModel`].
#[derive(Debug, Clone)]
pub struct InMemoryModelBuilder {
    root: String,
    projects: Vec<(Project, Vec<String>, Vec<SourceSpec>)>,
}

impl InMemoryModelBuilder {
    /// Adds a project with `<name>.gpr` as definition file.
    #[must_use]
    pub fn project<I, S>(self, name: &str, dependencies: I, sources: Vec<SourceSpec>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.project_with(Project::new(name), dependencies, sources)
    }

    /// Adds a fully specified project.
    #[must_use]
    pub fn project_with<I, S>(
        mut self,
        project: Project,
        dependencies: I,
        sources: Vec<SourceSpec>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let deps = dependencies.into_iter().map(Into::into).collect();
        self.projects.push((project, deps, sources));
        self
    }

    /// Builds the model.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownProject`] if the root or a declared
    /// dependency names a project that was never added.
    pub fn build(self) -> Result<InMemoryModel, ModelError> {
        let mut model = InMemoryModel {
            root: self.root,
            projects: Vec::with_capacity(self.projects.len()),
            index: HashMap::new(),
            owners: HashMap::new(),
            imports: HashMap::new(),
        };

        for (project, dependencies, specs) in self.projects {
            let name = project.name.clone();
            let mut sources = Vec::with_capacity(specs.len());
            for spec in specs {
                model.owners.insert(spec.file.clone(), name.clone());
                if let Some(imports) = spec.imports {
                    model.imports.insert(spec.file.clone(), imports);
                }
                sources.push(spec.file);
            }
            model.index.insert(name, model.projects.len());
            model.projects.push(ProjectData {
                project,
                dependencies,
                sources,
            });
        }

        if !model.index.contains_key(&model.root) {
            return Err(ModelError::UnknownProject(model.root));
        }
        for data in &model.projects {
            if let Some(missing) = data
                .dependencies
                .iter()
                .find(|d| !model.index.contains_key(d.as_str()))
            {
                return Err(ModelError::UnknownProject(missing.clone()));
            }
        }

        Ok(model)
    }
}

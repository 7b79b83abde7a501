//! Integration test: graph builder, reconciler and sinks end-to-end.
//!
//! Uses an in-memory project tree shaped like a small Ada workspace.

use gpr_deps_core::{
    build_graph, CheckError, Classification, DeclaredDependencies, DependencyChecker, EdgeMode,
    ImportRef, ImportResolver, InMemoryModel, ModelError, Project, SourceFile, SourceSpec,
    TextReporter, TreeReporter, TreeView,
};

const NONE: [&str; 0] = [];

/// A declares B and D, imports from B and C.
fn scenario() -> InMemoryModel {
    InMemoryModel::builder("A")
        .project(
            "A",
            ["B", "D", "Shared"],
            vec![SourceSpec::new("/ws/a/a1.ads")
                .with("/ws/b/b1.ads")
                .with("/ws/c/c1.ads")],
        )
        .project(
            "B",
            ["C"],
            vec![SourceSpec::new("/ws/b/b1.ads").with("/ws/c/c1.ads")],
        )
        .project("C", NONE, vec![SourceSpec::new("/ws/c/c1.ads")])
        .project("D", NONE, vec![SourceSpec::new("/ws/d/d1.ads")])
        .project("Shared", NONE, vec![])
        .build()
        .expect("scenario model should build")
}

#[test]
fn scenario_classifies_each_dependency() {
    let model = scenario();
    let results = DependencyChecker::builder()
        .build()
        .analyze(&model)
        .expect("analysis should succeed");

    let a = &results[0];
    assert_eq!(a.project.name, "A");

    let b = a.entry("B").expect("B entry");
    assert_eq!(b.classification, Classification::Confirmed);
    assert_eq!(b.edges[0].source, SourceFile::new("/ws/a/a1.ads"));
    assert_eq!(b.edges[0].imported, SourceFile::new("/ws/b/b1.ads"));

    let c = a.entry("C").expect("C entry");
    assert_eq!(c.classification, Classification::ToAdd);
    assert_eq!(c.edges[0].imported, SourceFile::new("/ws/c/c1.ads"));

    assert_eq!(a.entry("D").expect("D entry").classification, Classification::ToRemove);
    assert!(a.entry("Shared").is_none(), "allowlisted project must not be removed");
}

#[test]
fn coalescing_counts_interleaved_imports() {
    let model = InMemoryModel::builder("A")
        .project(
            "A",
            NONE,
            vec![SourceSpec::new("a.adb")
                .with("b.ads")
                .with("c.ads")
                .with("b.ads")],
        )
        .project("B", NONE, vec![SourceSpec::new("b.ads")])
        .project("C", NONE, vec![SourceSpec::new("c.ads")])
        .build()
        .expect("model should build");

    let map = build_graph(&model, EdgeMode::SingleFile).expect("graph should build");
    let a = map.get("A").expect("A scanned");
    assert_eq!(a.edges("B").map(<[_]>::len), Some(2));
    assert_eq!(a.edges("C").map(<[_]>::len), Some(1));
}

#[test]
fn single_file_edges_are_a_subsequence_of_full_edges() {
    let model = InMemoryModel::builder("A")
        .project(
            "A",
            ["B", "C"],
            vec![
                SourceSpec::new("a1.adb")
                    .with("b1.ads")
                    .with("b2.ads")
                    .with("c1.ads"),
                SourceSpec::new("a2.adb")
                    .with("c1.ads")
                    .with("b2.ads")
                    .with("b1.ads"),
            ],
        )
        .project("B", NONE, vec![SourceSpec::new("b1.ads"), SourceSpec::new("b2.ads")])
        .project("C", NONE, vec![SourceSpec::new("c1.ads")])
        .build()
        .expect("model should build");

    let single = build_graph(&model, EdgeMode::SingleFile).expect("single-file graph");
    let full = build_graph(&model, EdgeMode::Full).expect("full graph");

    for project in &full {
        let reduced = single.get(&project.project.name).expect("same universe");
        for dep in &project.dependencies {
            let kept = reduced.edges(&dep.project.name).expect("same dependencies");
            assert!(!kept.is_empty());
            let mut all = dep.edges.iter();
            assert!(
                kept.iter().all(|edge| all.any(|e| e == edge)),
                "{} -> {}: {kept:?} is not a subsequence of {:?}",
                project.project,
                dep.project,
                dep.edges
            );
        }
    }
}

#[test]
fn diff_mode_still_explains_confirmed_dependencies() {
    let model = InMemoryModel::builder("A")
        .project(
            "A",
            ["B"],
            vec![SourceSpec::new("/ws/a/a1.ads")
                .with("/ws/b/b1.ads")
                .with("/ws/c/c1.ads")],
        )
        .project("B", NONE, vec![SourceSpec::new("/ws/b/b1.ads")])
        .project("C", NONE, vec![SourceSpec::new("/ws/c/c1.ads")])
        .build()
        .expect("model should build");
    let mut reporter = TextReporter::new(Vec::<u8>::new(), true, true);

    DependencyChecker::builder()
        .build()
        .run(&model, &mut reporter)
        .expect("run should succeed");

    let out = String::from_utf8(reporter.into_inner()).expect("utf-8 output");
    assert_eq!(
        out,
        concat!(
            "Project A depends on:\n",
            "   => a1.ads depends on b1.ads\n",
            " + C\n",
            "   => a1.ads depends on c1.ads\n",
            "Project B depends on:\n",
        )
    );
}

#[test]
fn repeated_runs_are_identical() {
    let model = scenario();
    let checker = DependencyChecker::builder().build();
    let first = checker.analyze(&model).expect("first run");
    let second = checker.analyze(&model).expect("second run");
    assert_eq!(first, second);
}

#[test]
fn tree_sink_displays_sorted_view() {
    let model = scenario();
    let mut views: Vec<TreeView> = Vec::new();
    let mut reporter = TreeReporter::new(&mut views);

    DependencyChecker::builder()
        .build()
        .run(&model, &mut reporter)
        .expect("run should succeed");

    let view = &views[0];
    let names: Vec<&str> = view.roots.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(names, ["A", "B", "C", "D", "Shared"]);
    assert!(view.find(&["A", "C (should be added)", "a1.ads"]).is_some());
    assert!(view.find(&["A", "D (should be removed)"]).is_some());
    assert!(view.markup.ends_with("</projects>\n"));
}

/// Wraps a model and fails when asked for the declared dependencies of one project.
struct FailingDeclarations {
    inner: InMemoryModel,
    fail_on: &'static str,
}

impl DeclaredDependencies for FailingDeclarations {
    fn root(&self) -> Project {
        self.inner.root()
    }

    fn dependencies(&self, project: &Project, recursive: bool) -> Result<Vec<Project>, ModelError> {
        if !recursive && project.name == self.fail_on {
            return Err(ModelError::MalformedArtifact {
                path: project.file.clone(),
                message: "truncated".into(),
            });
        }
        self.inner.dependencies(project, recursive)
    }
}

impl ImportResolver for FailingDeclarations {
    fn sources(&self, project: &Project, recursive: bool) -> Result<Vec<SourceFile>, ModelError> {
        self.inner.sources(project, recursive)
    }

    fn imports(
        &self,
        source: &SourceFile,
        include_implicit: bool,
        include_system: bool,
    ) -> Result<Vec<ImportRef>, ModelError> {
        self.inner.imports(source, include_implicit, include_system)
    }

    fn owning_project(&self, import: &ImportRef, default_to_root: bool) -> Option<Project> {
        self.inner.owning_project(import, default_to_root)
    }
}

#[test]
fn failure_keeps_partial_output() {
    let model = FailingDeclarations {
        inner: scenario(),
        fail_on: "B",
    };
    let mut reporter = TextReporter::new(Vec::<u8>::new(), false, true);

    let err = DependencyChecker::builder()
        .build()
        .run(&model, &mut reporter)
        .expect_err("run should fail on B");
    assert!(matches!(err, CheckError::Model(ModelError::MalformedArtifact { .. })));

    let out = String::from_utf8(reporter.into_inner()).expect("utf-8 output");
    assert_eq!(out, "Project A depends on:\n + C\n - D\n");
}

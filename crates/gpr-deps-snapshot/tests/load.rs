//! Integration test: snapshot file → model → dependency check.

use gpr_deps_core::{Classification, DependencyChecker, ImportResolver, ModelError, Project};
use gpr_deps_snapshot::{load, SnapshotError};
use std::fs;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"
root = "app"

[[projects]]
name = "app"
dependencies = ["lib", "shared", "unused"]

[[projects.sources]]
path = "app/main.adb"
imports = ["lib/lib.ads"]
implicit = ["util/util.ads"]
system = ["rts/a-textio.ads"]

[[projects]]
name = "lib"

[[projects.sources]]
path = "lib/lib.ads"

[[projects]]
name = "util"

[[projects.sources]]
path = "util/util.ads"

[[projects]]
name = "shared"

[[projects]]
name = "unused"
"#;

fn write_snapshot(content: &str) -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("snapshot.toml");
    fs::write(&path, content).unwrap();
    (tmp, path)
}

#[test]
fn loaded_snapshot_reconciles() {
    let (tmp, path) = write_snapshot(SNAPSHOT);
    let model = load(&path).expect("snapshot should load");
    assert_eq!(model.project_count(), 5);

    let results = DependencyChecker::builder()
        .build()
        .analyze(&model)
        .expect("analysis should succeed");

    let app = &results[0];
    assert_eq!(app.project.file, tmp.path().join("app.gpr"));

    let kinds: Vec<(&str, Classification)> = app
        .entries
        .iter()
        .map(|e| (e.dependency.name(), e.classification))
        .collect();
    assert_eq!(
        kinds,
        [
            ("lib", Classification::Confirmed),
            ("util", Classification::ToAdd),
            ("unused", Classification::ToRemove),
        ]
    );

    let util = app.entry("util").unwrap();
    assert_eq!(util.edges[0].source.path(), tmp.path().join("app/main.adb"));
}

#[test]
fn system_imports_resolve_to_no_project() {
    let (tmp, path) = write_snapshot(SNAPSHOT);
    let model = load(&path).unwrap();

    let main = gpr_deps_core::SourceFile::new(tmp.path().join("app/main.adb"));
    let imports = model.imports(&main, true, true).unwrap();
    assert_eq!(imports.len(), 3);
    let owners: Vec<Option<Project>> = imports
        .iter()
        .map(|i| model.owning_project(i, false))
        .collect();
    assert!(owners[2].is_none());
}

#[test]
fn uncompiled_source_fails_the_check() {
    let (_tmp, path) = write_snapshot(
        r#"
root = "app"

[[projects]]
name = "app"

[[projects.sources]]
path = "main.adb"
compiled = false
"#,
    );
    let model = load(&path).unwrap();
    let err = DependencyChecker::builder().build().analyze(&model).unwrap_err();
    assert!(matches!(
        err,
        gpr_deps_core::CheckError::Model(ModelError::MissingArtifact { .. })
    ));
}

#[test]
fn missing_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let err = load(&tmp.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, SnapshotError::Io { .. }));
}

#[test]
fn invalid_snapshot_is_rejected() {
    let (_tmp, path) = write_snapshot("root = \"app\"\n");
    let err = load(&path).unwrap_err();
    assert!(matches!(err, SnapshotError::Validation(_)));
}

#[test]
fn demo_workspace_snapshot() {
    let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos/ada-workspace/gpr-deps.snapshot.toml");
    let model = load(&path).expect("demo snapshot should load");

    let results = DependencyChecker::builder()
        .build()
        .analyze(&model)
        .expect("analysis should succeed");

    let names: Vec<&str> = results.iter().map(|r| r.project.name()).collect();
    assert_eq!(names, ["app", "gui", "core", "util", "shared"]);

    let app = &results[0];
    let core = app.entry("core").unwrap();
    assert_eq!(core.classification, Classification::Confirmed);
    // main.adb -> core, then app-config.ads -> core after an import of util.
    assert_eq!(core.edges.len(), 2);
    assert_eq!(app.entry("util").unwrap().classification, Classification::ToAdd);
    assert_eq!(app.entry("gui").unwrap().classification, Classification::ToRemove);
    assert!(app.entry("shared").is_none());

    let gui = &results[1];
    assert_eq!(gui.entry("core").unwrap().classification, Classification::ToRemove);
}

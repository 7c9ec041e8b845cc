//! End-to-end resolution tests over manifests loaded from disk.

use buildplan_core::{Error, Project, resolve};
use std::io::Write;

/// The worked example: a consumer that declares a web target its producer
/// never declared.
const PRODUCER_CONSUMER_TOML: &str = r#"
[[module]]
name = "producer"
targets = ["jvm", "linuxX64"]

[[module]]
name = "consumer"
targets = ["jvm", "linuxX64", "js"]
dependencies = [{ module = "producer", kind = "implementation" }]
"#;

fn write_manifest(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn resolves_shared_target_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(&dir, "build.toml", PRODUCER_CONSUMER_TOML);

    let project = Project::load(&path).unwrap();
    let plan = resolve(&project, "consumer", "jvm").unwrap();

    let order: Vec<&str> = plan.steps.iter().map(|step| step.module.as_str()).collect();
    assert_eq!(order, vec!["producer", "consumer"]);
    assert!(plan.steps.iter().all(|step| step.target.id == "jvm"));
}

#[test]
fn reports_target_mismatch_for_extra_consumer_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(&dir, "build.toml", PRODUCER_CONSUMER_TOML);

    let project = Project::load(&path).unwrap();
    let err = resolve(&project, "consumer", "js").unwrap_err();

    match err {
        Error::TargetMismatch { module, target } => {
            assert_eq!(module, "producer");
            assert_eq!(target, "js");
        }
        other => panic!("expected TargetMismatch, got {other:?}"),
    }
}

#[test]
fn resolves_equivalent_json_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(
        &dir,
        "build.json",
        r#"{
            "module": [
                { "name": "producer", "targets": ["jvm", "linuxX64"] },
                {
                    "name": "consumer",
                    "targets": ["jvm", "linuxX64", "js"],
                    "dependencies": [{ "module": "producer" }]
                }
            ]
        }"#,
    );

    let project = Project::load(&path).unwrap();
    assert!(resolve(&project, "consumer", "linuxX64").is_ok());
    assert!(resolve(&project, "consumer", "js").is_err());
}

#[test]
fn deep_chain_resolves_in_declaration_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(
        &dir,
        "build.toml",
        r#"
[[module]]
name = "base"
targets = ["jvm", "linuxX64"]

[[module]]
name = "platform"
targets = ["jvm", "linuxX64"]
dependencies = [{ module = "base", kind = "api" }]

[[module]]
name = "feature-a"
targets = ["jvm", "linuxX64"]
dependencies = [{ module = "platform" }]

[[module]]
name = "feature-b"
targets = ["jvm", "linuxX64"]
dependencies = [{ module = "platform" }]

[[module]]
name = "app"
targets = ["jvm", "linuxX64"]
dependencies = [{ module = "feature-a" }, { module = "feature-b" }]
"#,
    );

    let project = Project::load(&path).unwrap();
    let plan = resolve(&project, "app", "linuxX64").unwrap();

    let order: Vec<&str> = plan.steps.iter().map(|step| step.module.as_str()).collect();
    assert_eq!(
        order,
        vec!["base", "platform", "feature-a", "feature-b", "app"]
    );

    assert_eq!(plan.stages.len(), 4);
    assert_eq!(plan.stages[2], vec!["feature-a", "feature-b"]);
}

#[test]
fn cyclic_manifest_fails_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(
        &dir,
        "build.toml",
        r#"
[[module]]
name = "a"
targets = ["jvm"]
dependencies = [{ module = "b" }]

[[module]]
name = "b"
targets = ["jvm"]
dependencies = [{ module = "a" }]
"#,
    );

    let project = Project::load(&path).unwrap();
    let err = resolve(&project, "a", "jvm").unwrap_err();
    assert!(matches!(
        err,
        Error::Graph(buildplan_module_graph::Error::CycleDetected { .. })
    ));
}

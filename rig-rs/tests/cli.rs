//! CLI integration tests
//!
//! Runs the built binary against the two-joint arm fixture shipped with the
//! gltf-rig crate.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ARM_FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../file-formats/graphics/gltf-rig/tests/data/two_joint_arm.gltf"
);

fn rig_rs() -> Command {
    Command::cargo_bin("rig-rs").unwrap()
}

#[test]
fn test_cli_info() {
    rig_rs()
        .args(["info", ARM_FIXTURE])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nodes: 3"))
        .stdout(predicate::str::contains("Skins: 1"))
        .stdout(predicate::str::contains("Animations: 1"));
}

#[test]
fn test_cli_info_detailed() {
    rig_rs()
        .args(["info", "--detailed", ARM_FIXTURE])
        .assert()
        .success()
        .stdout(predicate::str::contains("bend"))
        .stdout(predicate::str::contains("arm_mesh"));
}

#[test]
fn test_cli_tree() {
    rig_rs()
        .args(["tree", "--no-color", ARM_FIXTURE])
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] shoulder"))
        .stdout(predicate::str::contains("[1] elbow"))
        .stdout(predicate::str::contains("[2] arm_mesh"));
}

#[test]
fn test_cli_tree_depth_limit() {
    rig_rs()
        .args(["tree", "--no-color", "--depth", "2", ARM_FIXTURE])
        .assert()
        .success()
        .stdout(predicate::str::contains("shoulder"))
        .stdout(predicate::str::contains("elbow").not());
}

#[test]
fn test_cli_validate() {
    rig_rs()
        .args(["validate", ARM_FIXTURE])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skin 0"))
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn test_cli_pose_table() {
    rig_rs()
        .args(["pose", "--time", "0.5", ARM_FIXTURE])
        .assert()
        .success()
        .stdout(predicate::str::contains("elbow"))
        .stdout(predicate::str::contains("0.500s"));
}

#[test]
fn test_cli_pose_json() {
    let output = rig_rs()
        .args(["pose", "--json", "--time", "1.0", ARM_FIXTURE])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let joints = value["joints"].as_array().unwrap();
    assert_eq!(joints.len(), 2);
    assert_eq!(joints[1]["name"], "elbow");
    assert_eq!(joints[1]["joint_matrix"].as_array().unwrap().len(), 16);
    assert_eq!(value["segments"].as_array().unwrap().len(), 1);
}

#[test]
fn test_cli_pose_speed_is_clamped() {
    let output = rig_rs()
        .args(["pose", "--json", "--speed", "0.5", "--time", "0.25", ARM_FIXTURE])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("clamped to 1"));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["time"], 0.25);

    rig_rs()
        .args(["pose", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("clamped to 1-10"));
}

#[test]
fn test_cli_pose_missing_skin() {
    rig_rs()
        .args(["pose", "--skin", "4", ARM_FIXTURE])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Skin 4 is not usable"));
}

#[test]
fn test_cli_broken_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.gltf");
    std::fs::write(&path, "{ \"asset\": ").unwrap();

    rig_rs()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read glTF file"));
}

#[test]
fn test_cli_completions() {
    rig_rs()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rig-rs"));
}

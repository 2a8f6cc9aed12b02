//! Integration tests for the bone-remap binary
//!
//! Writes rig and task files to a temp dir, runs the binary, checks its output.

use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::tempdir;

const RIG: &str = r#"
[[skeleton]]
name = "Armature"

[[skeleton.bone]]
name = "arm"
parent = "root"
head = [0.5, 0.0, 1.0]
rotation = [0.0, 0.0, 0.3826834, 0.9238795]
locked = true

[[skeleton.bone]]
name = "root"
head = [0.0, 0.0, 1.0]
ik = true
"#;

const TASKS: &str = r#"
[[task]]
bone = "arm"
direction = [1, 0, 0]

[[task]]
bone = "root"
direction = [0, 1, 0]

[[task]]
bone = "Foo"
direction = [0, 0, 1]
twist = 90
"#;

const IDENTITY_ROW: &str = "( 0.000f,  0.000f,  0.000f,  1.000f)";

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write input file");
    path
}

fn bone_remap(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_bone-remap"))
        .args(args)
        .output()
        .expect("Failed to run bone-remap")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is not UTF-8")
}

#[test]
fn test_remap_report_rows() {
    let dir = tempdir().expect("Failed to create temp dir");
    let rig = write(dir.path(), "rig.toml", RIG);
    let tasks = write(dir.path(), "tasks.toml", TASKS);

    let output = bone_remap(&[
        "remap",
        "--rig",
        rig.to_str().unwrap(),
        "--tasks",
        tasks.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "remap failed: {:?}", output);

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3, "one row per task:\n{text}");

    // Rows follow the task file, not the hierarchy
    assert!(lines[0].ends_with(" arm"), "{}", lines[0]);
    assert_eq!(
        lines[1],
        format!("{IDENTITY_ROW}, ( 0.000f, -0.707f,  0.707f,  0.000f) root")
    );
    assert_eq!(lines[2], format!("{IDENTITY_ROW}, {IDENTITY_ROW} Foo"));
}

#[test]
fn test_remap_csharp_style_and_output_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let rig = write(dir.path(), "rig.toml", RIG);
    let tasks = write(dir.path(), "tasks.toml", TASKS);
    let report = dir.path().join("report.txt");

    let output = bone_remap(&[
        "remap",
        "--rig",
        rig.to_str().unwrap(),
        "--tasks",
        tasks.to_str().unwrap(),
        "--style",
        "csharp",
        "-o",
        report.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "remap failed: {:?}", output);
    assert!(stdout(&output).is_empty(), "report must not go to stdout");

    let text = std::fs::read_to_string(&report).expect("Failed to read report");
    assert!(text.lines().all(|l| l.starts_with("new Quaternion(")), "{text}");
}

#[test]
fn test_remap_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let rig = write(dir.path(), "rig.toml", RIG);
    let tasks = write(dir.path(), "tasks.toml", TASKS);

    let output = bone_remap(&[
        "remap",
        "--rig",
        rig.to_str().unwrap(),
        "--tasks",
        tasks.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "remap failed: {:?}", output);

    let text = stdout(&output);
    assert!(text.trim_start().starts_with('['), "{text}");
    assert!(text.contains("\"bone\": \"root\""), "{text}");
    assert!(text.contains("\"rest_pose_correction\""), "{text}");
    assert!(text.contains("\"coordinate_conversion\""), "{text}");
}

#[test]
fn test_remap_default_table() {
    let dir = tempdir().expect("Failed to create temp dir");
    let rig = write(dir.path(), "rig.toml", RIG);

    let output = bone_remap(&["remap", "--rig", rig.to_str().unwrap()]);
    assert!(output.status.success(), "remap failed: {:?}", output);

    let text = stdout(&output);
    assert_eq!(text.lines().count(), 55);
    assert!(text.lines().next().unwrap().ends_with(" 全ての親"));
}

#[test]
fn test_missing_skeleton_fails() {
    let dir = tempdir().expect("Failed to create temp dir");
    let rig = write(dir.path(), "rig.toml", RIG);
    let tasks = write(dir.path(), "tasks.toml", TASKS);

    let output = bone_remap(&[
        "remap",
        "--rig",
        rig.to_str().unwrap(),
        "--tasks",
        tasks.to_str().unwrap(),
        "--skeleton",
        "Missing",
    ]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty(), "no rows on a fatal error");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no skeleton selected"), "{stderr}");
}

#[test]
fn test_order_lists_parents_first() {
    let dir = tempdir().expect("Failed to create temp dir");
    let rig = write(dir.path(), "rig.toml", RIG);
    let tasks = write(dir.path(), "tasks.toml", TASKS);

    let output = bone_remap(&[
        "order",
        "--rig",
        rig.to_str().unwrap(),
        "--tasks",
        tasks.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "order failed: {:?}", output);
    assert_eq!(
        stdout(&output),
        " 1. Foo (depth: 0)\n 2. root (depth: 1)\n 3. arm (depth: 2)\n"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("(depth:"), "listing printed once: {stderr}");
}

#[test]
fn test_check_reports_problems() {
    let dir = tempdir().expect("Failed to create temp dir");
    let rig = write(dir.path(), "rig.toml", RIG);
    let tasks = write(
        dir.path(),
        "tasks.toml",
        "[[task]]\nbone = \"arm\"\ndirection = [1, 1, 0]\n\n[[task]]\nbone = \"root\"\ndirection = [0, 0, -1]\n",
    );

    let output = bone_remap(&[
        "check",
        "--rig",
        rig.to_str().unwrap(),
        "--tasks",
        tasks.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.contains("unsupported direction"), "{text}");
    assert!(text.contains("'arm'"), "{text}");
    assert!(!text.contains("'root'"), "{text}");
}

#[test]
fn test_check_passes_clean_table() {
    let dir = tempdir().expect("Failed to create temp dir");
    let rig = write(dir.path(), "rig.toml", RIG);
    let tasks = write(
        dir.path(),
        "tasks.toml",
        "[[task]]\nbone = \"root\"\ndirection = [0, 0, 2]\n",
    );

    let output = bone_remap(&[
        "check",
        "--rig",
        rig.to_str().unwrap(),
        "--tasks",
        tasks.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "check failed: {:?}", output);
}

#[test]
fn test_remap_precision() {
    let dir = tempdir().expect("Failed to create temp dir");
    let rig = write(dir.path(), "rig.toml", RIG);
    let tasks = write(dir.path(), "tasks.toml", TASKS);

    let output = bone_remap(&[
        "remap",
        "--rig",
        rig.to_str().unwrap(),
        "--tasks",
        tasks.to_str().unwrap(),
        "--precision",
        "9",
    ]);
    assert!(output.status.success(), "remap failed: {:?}", output);

    let text = stdout(&output);
    assert_eq!(
        text.lines().nth(2).unwrap(),
        "( 0.000000000f,  0.000000000f,  0.000000000f,  1.000000000f), \
         ( 0.000000000f,  0.000000000f,  0.000000000f,  1.000000000f) Foo"
    );
}

#[test]
fn test_check_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let rig = write(dir.path(), "rig.toml", RIG);
    let tasks = write(dir.path(), "tasks.toml", TASKS);

    let output = bone_remap(&[
        "check",
        "--rig",
        rig.to_str().unwrap(),
        "--tasks",
        tasks.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.contains("\"kind\": \"unknown_bone_in_task\""), "{text}");
    assert!(text.contains("\"bone\": \"Foo\""), "{text}");
}

#[test]
fn test_zero_rotation_rig_is_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let rig = write(
        dir.path(),
        "rig.toml",
        "[[skeleton]]\nname = \"Armature\"\n\n[[skeleton.bone]]\nname = \"root\"\nrotation = [0, 0, 0, 0]\n",
    );
    let tasks = write(dir.path(), "tasks.toml", TASKS);

    let output = bone_remap(&[
        "remap",
        "--rig",
        rig.to_str().unwrap(),
        "--tasks",
        tasks.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(!stdout(&output).contains("NaN"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bone 'root' has a zero-length rotation"), "{stderr}");
}

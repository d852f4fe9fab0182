//! Integration tests for the `gradpath` binary.
//!
//! Each test writes the sample catalog into a temp dir and points both the
//! catalog and the config home at it, so no user config is read.

use std::path::Path;
use std::process::{Command, Output};

use gradpath_test_utils::write_sample_catalog;

fn gradpath(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gradpath"))
        .args(args)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env_remove("GRADPATH_CATALOG_DIR")
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run gradpath")
}

fn setup() -> (tempfile::TempDir, String) {
    let tmp = tempfile::TempDir::new().unwrap();
    let catalog = tmp.path().join("catalog");
    std::fs::create_dir_all(&catalog).unwrap();
    write_sample_catalog(&catalog).unwrap();
    let dir = catalog.to_string_lossy().into_owned();
    (tmp, dir)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn plan_prints_semester_table() {
    let (tmp, dir) = setup();
    let out = gradpath(
        tmp.path(),
        &["--catalog-dir", &dir, "plan", "CMSC216", "--completed", "CMSC131"],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Completed (4 credits)"), "got:\n{text}");
    assert!(text.contains("Semester 2 (4 credits)"), "got:\n{text}");
    assert!(text.contains("CMSC216"), "got:\n{text}");
}

#[test]
fn plan_json_is_machine_readable() {
    let (tmp, dir) = setup();
    let out = gradpath(tmp.path(), &["--catalog-dir", &dir, "plan", "STAT400", "--json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).expect("stdout is JSON");
    let nodes = json["layout"]["nodes"].as_array().unwrap();
    let ids: Vec<&str> = nodes.iter().map(|n| n["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["MATH140", "MATH141", "STAT400"]);
    assert_eq!(json["credits"]["total"], 11);
}

#[test]
fn plan_reads_plan_file() {
    let (tmp, dir) = setup();
    let plan = tmp.path().join("plan.toml");
    std::fs::write(
        &plan,
        "[plan]\nname = \"Data\"\nmin_credits = 100\n\n[courses]\nrequired = [\"CMSC320\"]\n",
    )
    .unwrap();

    let out = gradpath(
        tmp.path(),
        &["--catalog-dir", &dir, "plan", "--file", plan.to_str().unwrap()],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.starts_with("Plan: Data"), "got:\n{text}");
    assert!(text.contains("Minimum of 100 credits: not met"), "got:\n{text}");
}

#[test]
fn plan_without_courses_fails() {
    let (tmp, dir) = setup();
    let out = gradpath(tmp.path(), &["--catalog-dir", &dir, "plan"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("no courses given"), "stderr: {}", stderr(&out));
}

#[test]
fn closure_lists_transitive_prerequisites() {
    let (tmp, dir) = setup();
    let out = gradpath(tmp.path(), &["--catalog-dir", &dir, "closure", "STAT400"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let ids: Vec<String> = stdout(&out)
        .lines()
        .map(|l| l.split_whitespace().next().unwrap_or_default().to_string())
        .collect();
    assert_eq!(ids, vec!["MATH140", "MATH141", "STAT400"]);
}

#[test]
fn tree_reads_the_tree_table() {
    let (tmp, dir) = setup();
    let out = gradpath(
        tmp.path(),
        &["--catalog-dir", &dir, "tree", "ROOT", "--split", "--max-splits", "2"],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("course: courseG (p: courseF)"), "got:\n{text}");
    assert!(text.contains("  2. "), "got:\n{text}");
    assert!(text.contains("(showing first 2)"), "got:\n{text}");
}

#[test]
fn init_writes_config_used_by_later_commands() {
    let (tmp, dir) = setup();
    let out = gradpath(tmp.path(), &["--catalog-dir", &dir, "init"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(tmp.path().join("config/gradpath/config.toml").exists());

    // Second init without --force refuses.
    let out = gradpath(tmp.path(), &["init"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("already exists"), "stderr: {}", stderr(&out));

    // No --catalog-dir: the config file supplies it.
    let out = gradpath(tmp.path(), &["closure", "MATH141"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("MATH140"));
}

#[test]
fn courses_search_filters_by_name() {
    let (tmp, dir) = setup();
    let out = gradpath(tmp.path(), &["--catalog-dir", &dir, "courses", "vision"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("CMSC426"), "got:\n{text}");
    assert_eq!(text.lines().count(), 1, "got:\n{text}");
}

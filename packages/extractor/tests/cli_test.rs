//! Command-line tests for the `uksi-extractor` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("uksi_2017_766.xml")
}

/// The single file written to an output directory.
fn only_output(dir: &std::path::Path) -> PathBuf {
    let entries: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1, "expected one output file, got {entries:?}");
    entries.into_iter().next().unwrap()
}

#[test]
fn test_schedules_command_lists_schedules() {
    let mut cmd = cargo_bin_cmd!("uksi-extractor");
    cmd.arg("schedules").arg(fixture_path());

    cmd.assert().success().stdout(
        predicate::str::contains("Transitional Provisions")
            .and(predicate::str::contains("Revocations"))
            .and(predicate::str::contains("Forms")),
    );
}

#[test]
fn test_extract_all_schedules_to_json() {
    let out = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("uksi-extractor");
    cmd.arg("extract")
        .arg(fixture_path())
        .arg("--all-schedules")
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(out.path());

    cmd.assert().success().stdout(
        predicate::str::contains("Saved to:")
            .and(predicate::str::contains("Body provisions: 3"))
            .and(predicate::str::contains("Schedule provisions: 4"))
            .and(predicate::str::contains("Skipped: 1"))
            .and(predicate::str::contains("Schedule 3 has no content")),
    );

    let path = only_output(out.path());
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("2017_766_"));
    assert!(name.ends_with(".json"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["provisions"].as_array().map(Vec::len), Some(7));
}

#[test]
fn test_extract_selected_schedule_to_csv() {
    let out = tempdir().unwrap();
    let selection = out.path().join("selection.yaml");
    fs::write(&selection, "schedules:\n  \"1\": true\n").unwrap();
    let output_dir = out.path().join("records");

    let mut cmd = cargo_bin_cmd!("uksi-extractor");
    cmd.arg("extract")
        .arg(fixture_path())
        .arg("--selection")
        .arg(&selection)
        .arg("--format")
        .arg("csv")
        .arg("--output")
        .arg(&output_dir);

    cmd.assert().success();

    let path = only_output(&output_dir);
    assert!(path.to_string_lossy().ends_with(".csv"));

    let content = fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("order_title,year,number,title,article_label,paragraphs,schedule_number,schedule_name,part_number,part_title,link")
    );
    assert!(content.contains(",1,Transitional Provisions,PART 2,Pending applications,"));
    assert!(content.contains("/uksi/2017/766/schedule/1/part/2/made"));
}

#[test]
fn test_extract_body_only_to_yaml() {
    let out = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("uksi-extractor");
    cmd.arg("extract")
        .arg(fixture_path())
        .arg("--no-schedules")
        .arg("--output")
        .arg(out.path());

    cmd.assert().success().stdout(
        predicate::str::contains("Schedule provisions: 0")
            .and(predicate::str::contains("Skipped: 3"))
            .and(predicate::str::contains("Warnings").not()),
    );

    let content = fs::read_to_string(only_output(out.path())).unwrap();
    assert!(content.starts_with("---\n"));
    assert!(!content.contains("schedule_name: Revocations"));
}

#[test]
fn test_extract_with_selection_file() {
    let out = tempdir().unwrap();
    let selection = out.path().join("selection.yaml");
    fs::write(&selection, "schedules:\n  \"2\": true\n").unwrap();
    let output_dir = out.path().join("records");

    let mut cmd = cargo_bin_cmd!("uksi-extractor");
    cmd.arg("extract")
        .arg(fixture_path())
        .arg("--selection")
        .arg(&selection)
        .arg("--output")
        .arg(&output_dir);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Schedule provisions: 2"));
    assert!(only_output(&output_dir).exists());
}

#[test]
fn test_extract_interactive_prompt() {
    let out = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("uksi-extractor");
    cmd.arg("extract")
        .arg(fixture_path())
        .arg("--output")
        .arg(out.path())
        .write_stdin("y\nx\nn\nn\n");

    cmd.assert().success().stdout(
        predicate::str::contains("Include Schedule 1 (Transitional Provisions)? (Y/N):")
            .and(predicate::str::contains("Please enter Y or N."))
            .and(predicate::str::contains("Schedule provisions: 2")),
    );
}

#[test]
fn test_extract_custom_base_url() {
    let out = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("uksi-extractor");
    cmd.arg("extract")
        .arg(fixture_path())
        .arg("--no-schedules")
        .arg("--format")
        .arg("json")
        .arg("--base-url")
        .arg("http://mirror.local/")
        .arg("--output")
        .arg(out.path());

    cmd.assert().success();

    let content = fs::read_to_string(only_output(out.path())).unwrap();
    assert!(content.contains("http://mirror.local/uksi/2017/766/article/1/made"));
}

#[test]
fn test_extract_invalid_base_url() {
    let mut cmd = cargo_bin_cmd!("uksi-extractor");
    cmd.arg("extract")
        .arg(fixture_path())
        .arg("--no-schedules")
        .arg("--base-url")
        .arg("ftp://mirror.local");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base URL"));
}

#[test]
fn test_extract_conflicting_selection_flags() {
    let mut cmd = cargo_bin_cmd!("uksi-extractor");
    cmd.arg("extract")
        .arg(fixture_path())
        .arg("--all-schedules")
        .arg("--no-schedules");

    cmd.assert().failure();
}

#[test]
fn test_extract_missing_file() {
    let mut cmd = cargo_bin_cmd!("uksi-extractor");
    cmd.arg("extract")
        .arg("/nonexistent/uksi.xml")
        .arg("--no-schedules");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_extract_missing_metadata() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.xml");
    fs::write(&input, "<Legislation><Body/></Legislation>").unwrap();

    let mut cmd = cargo_bin_cmd!("uksi-extractor");
    cmd.arg("extract")
        .arg(&input)
        .arg("--no-schedules")
        .arg("--output")
        .arg(dir.path().join("out"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("SecondaryMetadata"));
}

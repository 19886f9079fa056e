//! # CLI Workflow Tests
//!
//! Runs the `ldgen` binary end to end: template generation, filling the
//! template in, bulk upload, and single-record builds, checking exit codes
//! and files.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

fn ldgen(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ldgen"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("ldgen binary should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn template_then_bulk_upload() {
    let dir = tempfile::tempdir().unwrap();

    let out = ldgen(
        dir.path(),
        &["template", "--type", "Event", "--tiers", "required,common", "--output-dir", "."],
    );
    assert_eq!(out.status.code(), Some(0), "{}", stdout(&out));
    assert!(stdout(&out).starts_with("OK: wrote "));

    let template = std::fs::read_to_string(dir.path().join("template_event.csv")).unwrap();
    let header = template.lines().next().unwrap().to_string();
    assert!(header.starts_with("name,startDate,location,description"));

    // Fill in two rows, leaving the second without a location.
    let columns = header.split(',').count();
    let pad = ",".repeat(columns - 3);
    let filled = format!(
        "{header}\nLaunch,2025-01-01,Hall A{pad}\nParty,2025-01-02,{pad}\n"
    );
    std::fs::write(dir.path().join("events.csv"), filled).unwrap();

    let out = ldgen(
        dir.path(),
        &["bulk", "--type", "Event", "--input", "events.csv", "--format", "archive"],
    );
    let text = stdout(&out);
    assert_eq!(out.status.code(), Some(1), "{text}");
    assert!(text.contains("Rows: 1/2 built"), "{text}");
    assert!(text.contains("FAIL: row 2: Event is missing required field(s): location"), "{text}");
    assert!(dir.path().join("bulk_schemas_event.zip").is_file());
}

#[test]
fn build_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let out = ldgen(
        dir.path(),
        &[
            "build", "--type", "Event",
            "--field", "name=Launch",
            "--field", "startDate=2025-01-01",
            "--field", "location=Hall A",
            "--stdout",
        ],
    );
    assert_eq!(out.status.code(), Some(0));
    let value: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["@context"], "https://schema.org");
    assert_eq!(value["@type"], "Event");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn build_missing_field_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = ldgen(
        dir.path(),
        &["build", "--type", "Recipe", "--field", "name=Bread"],
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("recipeIngredient, recipeInstructions"));
}

#[test]
fn config_file_sets_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ldgen.yaml"), "output_dir: exports\npretty: true\n").unwrap();
    let out = ldgen(
        dir.path(),
        &["build", "--type", "Person", "--field", "name=Ada"],
    );
    assert_eq!(out.status.code(), Some(0));
    let text = std::fs::read_to_string(dir.path().join("exports").join("schema_person.json")).unwrap();
    assert!(text.contains("\n  \"name\": \"Ada\""));
}

#[test]
fn operational_errors_exit_two() {
    let dir = tempfile::tempdir().unwrap();

    let out = ldgen(dir.path(), &["bulk", "--type", "Event", "--input", "nope.csv"]);
    assert_eq!(out.status.code(), Some(2));

    std::fs::write(dir.path().join("ldgen.yaml"), "colour: blue\n").unwrap();
    let out = ldgen(dir.path(), &["build", "--type", "Person", "--field", "name=Ada"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn types_ignores_broken_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ldgen.yaml"), "colour: blue\n").unwrap();
    let out = ldgen(dir.path(), &["types"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out).lines().count(), ldgen_core::SCHEMA_TYPE_COUNT);
}

#[test]
fn bulk_archive_members_match_failed_row_numbers() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("events.csv"),
        "name,startDate,location\nLaunch,2025-01-01,Hall A\nParty,2025-01-02,\nClose,2025-01-03,Hall B\n",
    )
    .unwrap();

    let out = ldgen(
        dir.path(),
        &["bulk", "--type", "Event", "--input", "events.csv", "--format", "archive"],
    );
    let text = stdout(&out);
    assert_eq!(out.status.code(), Some(1), "{text}");
    assert!(text.contains("FAIL: row 2: "), "{text}");

    let file = std::fs::File::open(dir.path().join("bulk_schemas_event.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert_eq!(names, vec!["schema_1_event.json", "schema_3_event.json"]);
}

#[test]
fn types_lists_every_type() {
    let dir = tempfile::tempdir().unwrap();
    let out = ldgen(dir.path(), &["types"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out).lines().count(), ldgen_core::SCHEMA_TYPE_COUNT);
}

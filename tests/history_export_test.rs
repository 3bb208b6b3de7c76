mod common;

use assert_fs::prelude::*;
use common::{adtrail, sample_server};
use predicates::prelude::*;

// ─── History ─────────────────────────────────────────────────────

#[test]
fn history_shows_typed_changes() {
    let home = assert_fs::TempDir::new().unwrap();
    let server = sample_server();

    adtrail(&server, home.path())
        .args(["history", "17"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Change history"))
        .stdout(predicate::str::contains("luis changed Alcance"))
        .stdout(predicate::str::contains("1,000 → 1,250"))
        .stdout(predicate::str::contains("\"Campaña archivada\""))
        .stdout(predicate::str::contains("3 changes found"));

    assert_eq!(server.requests()[0].target, "/api/logging/entidad/17");
}

#[test]
fn history_filters_by_category() {
    let home = assert_fs::TempDir::new().unwrap();
    let server = sample_server();

    adtrail(&server, home.path())
        .args(["history", "17", "--category", "archived"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived"))
        .stdout(predicate::str::contains("1 change found"));
}

#[test]
fn history_date_range_is_inclusive() {
    let home = assert_fs::TempDir::new().unwrap();
    let server = sample_server();

    adtrail(&server, home.path())
        .args(["history", "17", "--from", "2024-01-10", "--to", "2024-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 changes found"));
}

#[test]
fn history_with_no_match_says_so() {
    let home = assert_fs::TempDir::new().unwrap();
    let server = sample_server();

    adtrail(&server, home.path())
        .args(["history", "17", "--user", "pedro"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes found"));
}

// ─── Export ──────────────────────────────────────────────────────

#[test]
fn export_csv_quotes_fields() {
    let home = assert_fs::TempDir::new().unwrap();
    let server = sample_server();
    let out = home.child("logs.csv");

    adtrail(&server, home.path())
        .args(["export", "--format", "csv", "-o", out.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 4 logs"))
        .stdout(predicate::str::contains("text/csv"));

    let content = std::fs::read_to_string(out.path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "Fecha,Usuario,Rol,Acción,Entidad,ID,Descripción");
    assert!(content.contains(r#""Nueva campaña, ""Verano""""#));
}

#[test]
fn export_json_to_stdout_keeps_backend_fields() {
    let home = assert_fs::TempDir::new().unwrap();
    let server = sample_server();

    let output = adtrail(&server, home.path())
        .args(["export", "--user", "luis", "-o", "-"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["usuario"], "luis");
    assert_eq!(items[0]["entidadId"], "17");
}

#[test]
fn export_defaults_to_dated_file_in_export_directory() {
    let home = assert_fs::TempDir::new().unwrap();
    let server = sample_server();
    let exports = home.child("exports");

    let config = home.child("adtrail.toml");
    config
        .write_str(&format!(
            "[export]\ndirectory = \"{}\"\n",
            exports.path().display()
        ))
        .unwrap();

    adtrail(&server, home.path())
        .args([
            "--config",
            config.path().to_str().unwrap(),
            "export",
            "--format",
            "csv",
        ])
        .assert()
        .success();

    let names: Vec<String> = std::fs::read_dir(exports.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("historial_cambios_"), "got {names:?}");
    assert!(names[0].ends_with(".csv"), "got {names:?}");
}

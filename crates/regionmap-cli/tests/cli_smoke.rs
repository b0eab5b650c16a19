use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn venue_fixture(name: &str) -> PathBuf {
    repo_root().join("fixtures").join("venue").join(name)
}

/// A temp dir laid out like a deployment: `image1.jpg` and `spaces.csv` side by side.
fn venue_workdir() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().expect("tempdir");
    fs::copy(venue_fixture("spaces.csv"), tmp.path().join("spaces.csv")).expect("copy csv");
    image::RgbImage::from_pixel(64, 48, image::Rgb([10, 20, 30]))
        .save(tmp.path().join("image1.jpg"))
        .expect("write jpg");
    tmp
}

#[test]
fn cli_renders_map_from_default_inputs() {
    let tmp = venue_workdir();

    let exe = assert_cmd::cargo_bin!("regionmap-cli");
    let output = Command::new(exe)
        .current_dir(tmp.path())
        .args([
            "--config",
            venue_fixture("regionmap.json").to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let html = String::from_utf8(output.stdout).expect("utf8");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"viewBox="0 0 64 48""#));
    assert!(html.contains("data:image/jpeg;base64,"));
    assert_eq!(html.matches("<polygon ").count(), 4);
}

#[test]
fn cli_writes_out_file() {
    let tmp = venue_workdir();
    let out = tmp.path().join("map.html");

    let exe = assert_cmd::cargo_bin!("regionmap-cli");
    Command::new(exe)
        .current_dir(tmp.path())
        .args([
            "render",
            "--config",
            venue_fixture("regionmap.json").to_string_lossy().as_ref(),
            "--embed-height",
            "700",
            "--out",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let html = fs::read_to_string(&out).expect("read html");
    assert!(html.contains("body { height: 700px; overflow: hidden; }"));
}

#[test]
fn cli_missing_image_still_writes_error_document() {
    let tmp = venue_workdir();
    fs::remove_file(tmp.path().join("image1.jpg")).expect("rm");

    let exe = assert_cmd::cargo_bin!("regionmap-cli");
    let output = Command::new(exe)
        .current_dir(tmp.path())
        .args([
            "--config",
            venue_fixture("regionmap.json").to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run");

    assert_eq!(output.status.code(), Some(4));
    let html = String::from_utf8(output.stdout).expect("utf8");
    assert!(html.contains("Background image not found"));
}

#[test]
fn cli_check_reports_missing_columns() {
    let exe = assert_cmd::cargo_bin!("regionmap-cli");
    let output = Command::new(exe)
        .args([
            "check",
            "--table",
            venue_fixture("broken_headers.csv").to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run");

    assert_eq!(output.status.code(), Some(3));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(report["missing"], serde_json::json!(["description", "preview"]));
    assert_eq!(
        report["headers"],
        serde_json::json!(["coordinates", "link_url", "name"])
    );
    assert_eq!(report["rows"], 1);
}

#[test]
fn cli_check_passes_with_config() {
    let exe = assert_cmd::cargo_bin!("regionmap-cli");
    Command::new(exe)
        .args([
            "check",
            "--table",
            venue_fixture("spaces.csv").to_string_lossy().as_ref(),
            "--config",
            venue_fixture("regionmap.json").to_string_lossy().as_ref(),
        ])
        .assert()
        .success();
}

#[test]
fn cli_usage_error_exits_2() {
    let exe = assert_cmd::cargo_bin!("regionmap-cli");
    Command::new(exe).args(["--bogus"]).assert().code(2);
}

use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;

fn run_vhsl<I, S>(root: &Path, args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_vhsl"))
        .arg("--regions-dir").arg(root.join("regions"))
        .arg("--out-dir").arg(root.join("dist"))
        .arg("--app-dir").arg(root.join("app"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("vhsl command should execute")
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_code(output: &Output, code: i32) {
    assert_eq!(
        output.status.code(),
        Some(code),
        "stdout:\n{}\nstderr:\n{}",
        stdout_text(output),
        String::from_utf8_lossy(&output.stderr),
    );
}

/// A complete statewide region set; `Region 6D` optionally left out.
fn fixture(skip_6d: bool) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let regions = dir.path().join("regions");
    fs::create_dir_all(&regions).unwrap();
    for class in 1..=6 {
        for letter in ['A', 'B', 'C', 'D'] {
            if skip_6d && class == 6 && letter == 'D' {
                continue;
            }
            let doc = json!({ "type": "FeatureCollection", "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-78.0, 37.5] },
                "properties": { "name": format!("School {class}{letter}"), "district": "Dist", "region": format!("Region {letter}") },
            }]});
            fs::write(regions.join(format!("Region {class}{letter}.geojson")), doc.to_string()).unwrap();
        }
    }
    dir
}

#[test]
fn run_passes_on_complete_dataset() {
    let dir = fixture(false);
    let output = run_vhsl(dir.path(), ["run"]);
    assert_code(&output, 0);
    let text = stdout_text(&output);
    assert!(text.contains("merge: PASS"));
    assert!(text.contains("validate: PASS"));
    assert!(text.trim_end().ends_with("run: PASS"));
    assert!(dir.path().join("dist/all_schools.geojson").is_file());
    assert!(dir.path().join("dist/school_lookup.json").is_file());
}

#[test]
fn validate_fails_on_missing_region() {
    let dir = fixture(true);
    assert_code(&run_vhsl(dir.path(), ["merge"]), 0);
    assert_code(&run_vhsl(dir.path(), ["reconcile"]), 0);

    let output = run_vhsl(dir.path(), ["validate", "--json"]);
    assert_code(&output, 1);
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["missing_regions"], json!(["Region 6D"]));
    assert_eq!(report["total_schools"], json!(23));
}

#[test]
fn strict_turns_warnings_into_failure() {
    let dir = fixture(true);
    assert_code(&run_vhsl(dir.path(), ["merge"]), 0);
    assert_code(&run_vhsl(dir.path(), ["--strict", "merge"]), 1);
}

#[test]
fn missing_collection_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_vhsl(dir.path(), ["validate"]);
    assert_code(&output, 2);
    assert!(String::from_utf8_lossy(&output.stderr).contains("all_schools.geojson"));
}

#[test]
fn propose_writes_updated_files() {
    let dir = fixture(false);
    assert_code(&run_vhsl(dir.path(), ["run"]), 0);
    assert_code(&run_vhsl(dir.path(), ["propose"]), 0);
    for file in ["va_schools_geocodes_updated.json", "vhsl_classes_regions_updated.json", "vhsl_districts_updated.json"] {
        assert!(dir.path().join("app").join(file).is_file(), "{file}");
    }
    let districts: Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("app/vhsl_districts_updated.json")).unwrap(),
    ).unwrap();
    assert_eq!(districts["districts"][0]["id"], "dist");
    assert_eq!(districts["districts"][0]["schools"].as_array().unwrap().len(), 24);
}

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::Write;

const REQUEST: &str = r#"{
    "mass1": 5000, "mass2": 3000, "mass3": 1000,
    "mass4": 5000, "mass5": 3000, "mass6": 1000,
    "length1": 5, "length2": 3, "length3": 2,
    "length4": 5, "length5": 3, "length6": 2,
    "mode": "mass"
}"#;

#[test]
fn optimize_reads_request_from_stdin() {
    let output = Command::cargo_bin("optimize")
        .expect("optimize bin")
        .write_stdin(REQUEST)
        .output()
        .expect("run optimize");
    assert!(output.status.success());

    let response: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json response");
    let dv = response["three_stage"]["delta_v"].as_f64().unwrap();
    assert!((dv - 4_995.981_652_565_026).abs() < 1e-6, "dv = {dv}");
    assert_eq!(response["pop_out"]["mass_fractions"].as_array().unwrap().len(), 3);
}

#[test]
fn optimize_reads_request_file_and_settings() {
    let dir = tempfile::tempdir().expect("tempdir");
    let request_path = dir.path().join("request.json");
    fs::write(&request_path, REQUEST).unwrap();
    let config_path = dir.path().join("staging.toml");
    fs::write(&config_path, "[constants]\nspecific_impulse_s = 300.0\n").unwrap();

    let output = Command::cargo_bin("optimize")
        .expect("optimize bin")
        .args([
            "--input",
            request_path.to_str().unwrap(),
            "--config",
            config_path.to_str().unwrap(),
        ])
        .output()
        .expect("run optimize");
    assert!(output.status.success());

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let dv = response["three_stage"]["delta_v"].as_f64().unwrap();
    assert!(dv > 4_995.981_652_565_026 + 100.0, "dv = {dv}");
}

#[test]
fn optimize_rejects_missing_fields() {
    Command::cargo_bin("optimize")
        .expect("optimize bin")
        .write_stdin(r#"{"mass1": 1, "mode": "mass"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("mass2"));
}

#[test]
fn strict_optimize_fails_on_infeasible_stages() {
    let request = REQUEST
        .replace("\"mass1\": 5000", "\"mass1\": 1")
        .replace("\"mass2\": 3000", "\"mass2\": 1")
        .replace("\"mass3\": 1000", "\"mass3\": 1");

    Command::cargo_bin("optimize")
        .expect("optimize bin")
        .write_stdin(request.clone())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"feasible\":false"));

    Command::cargo_bin("optimize")
        .expect("optimize bin")
        .arg("--strict")
        .write_stdin(request)
        .assert()
        .failure()
        .stderr(predicate::str::contains("infeasible"));
}

#[test]
fn adaptive_flag_drops_empty_boosters() {
    let request = REQUEST
        .replace("\"mass5\": 3000", "\"mass5\": 0")
        .replace("\"mass6\": 1000", "\"mass6\": 0");

    let output = Command::cargo_bin("optimize")
        .expect("optimize bin")
        .arg("--adaptive")
        .write_stdin(request)
        .output()
        .expect("run optimize");
    assert!(output.status.success());

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response["pop_out"]["mass_fractions"].as_array().unwrap().len(), 1);
    assert_eq!(response["pop_out"]["feasible"], true);
}

#[test]
fn optimize_evaluates_negative_fields() {
    let request = REQUEST.replace("\"mass6\": 1000", "\"mass6\": -1");
    let output = Command::cargo_bin("optimize")
        .expect("optimize bin")
        .write_stdin(request)
        .output()
        .expect("run optimize");
    assert!(output.status.success());

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let dv = response["three_stage"]["delta_v"].as_f64().unwrap();
    assert!((dv - 4_995.981_652_565_026).abs() < 1e-6, "dv = {dv}");
}

#[test]
fn ratio_search_prints_rankings() {
    Command::cargo_bin("ratio_search")
        .expect("ratio_search bin")
        .args(["--top", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Candidates evaluated: 4005"))
        .stdout(predicate::str::contains("Top 10 delta-v values:"))
        .stdout(predicate::str::contains("5289.965"));
}

#[test]
fn ratio_search_exports_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("out/ranking.csv");

    Command::cargo_bin("ratio_search")
        .expect("ratio_search bin")
        .args(["--top", "25", "--output", csv_path.to_str().unwrap()])
        .assert()
        .success();

    let mut reader = csv::Reader::from_path(&csv_path).expect("csv reader");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(&headers[0], "rank");
    assert_eq!(&headers[13], "dv_total_m_s");

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), 25);
    let totals: Vec<f64> = rows.iter().map(|r| r[13].parse().unwrap()).collect();
    assert!(totals.windows(2).all(|w| w[0] >= w[1]));
    assert!(rows.iter().all(|r| &r[14] == "true"));
}

#[test]
fn ratio_search_exports_json_with_envelope() {
    let dir = tempfile::tempdir().expect("tempdir");
    let json_path = dir.path().join("ranking.json");

    Command::cargo_bin("ratio_search")
        .expect("ratio_search bin")
        .args([
            "--points",
            "10",
            "--top",
            "3",
            "--envelope",
            "--format",
            "json",
            "--output",
            json_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Launch weight: 24409.498 lbs"))
        .stdout(predicate::str::contains("Candidates evaluated: 45"));

    let doc: serde_json::Value =
        serde_json::from_reader(File::open(&json_path).unwrap()).expect("json document");
    assert_eq!(doc["candidates_evaluated"], 45);
    assert_eq!(doc["entries"].as_array().unwrap().len(), 3);
}

#[test]
fn ratio_search_rejects_invalid_settings() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("bad.yaml");
    let mut file = File::create(&config_path).unwrap();
    writeln!(file, "search:\n  diameter_m: -1.0").unwrap();

    Command::cargo_bin("ratio_search")
        .expect("ratio_search bin")
        .args(["--config", config_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("diameter_m"));
}

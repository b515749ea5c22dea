use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn partition_edit() -> Command {
    Command::cargo_bin("partition-edit").unwrap()
}

#[test]
fn test_pair_distance() {
    partition_edit()
        .args(["pair", "1,1,2,2", "1,2,1,2"])
        .assert()
        .success()
        .stdout("2\n");

    partition_edit()
        .args(["pair", "1,1,1,1", "1,2,3,4"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn test_pair_relative() {
    partition_edit()
        .args(["pair", "1,1,2,2", "2,2,1,1", "--relative"])
        .assert()
        .success()
        .stdout("1,1,2,2\n");
}

#[test]
fn test_pair_json() {
    partition_edit()
        .args(["--format", "json", "pair", "1,1,1,1", "1,2,3,4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"distance\": 3"))
        .stdout(predicate::str::contains("\"relative_membership\""));
}

#[test]
fn test_pair_from_files() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("membership1");
    let second = dir.path().join("membership2");
    fs::write(&first, "1\n1\n2\n2\n").unwrap();
    fs::write(&second, "2\n2\n1\n1\n\n").unwrap();

    partition_edit()
        .arg("pair")
        .arg(&first)
        .arg(&second)
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_pair_weighted_identity() {
    let dir = TempDir::new().unwrap();
    let weights = dir.path().join("weights.csv");
    fs::write(&weights, "0,0,5,5\n0,0,5,5\n5,5,0,0\n5,5,0,0\n").unwrap();

    partition_edit()
        .arg("--weights")
        .arg(&weights)
        .args(["pair", "1,1,2,2", "1,1,2,2"])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_pair_weights_break_ties() {
    let dir = TempDir::new().unwrap();
    let weights = dir.path().join("weights.csv");
    fs::write(&weights, "0,0,0,5\n0,0,0,0\n0,0,0,0\n5,0,0,0\n").unwrap();

    partition_edit()
        .args(["pair", "1,1,2,2", "1,2,1,2", "--relative"])
        .assert()
        .success()
        .stdout("1,2,1,2\n");

    partition_edit()
        .arg("--weights")
        .arg(&weights)
        .args(["pair", "1,1,2,2", "1,2,1,2", "--relative"])
        .assert()
        .success()
        .stdout("2,1,2,1\n");
}

#[test]
fn test_pair_relative_tie_break() {
    // both correspondences keep 3 items; cluster 1 keeps target 1
    partition_edit()
        .args(["pair", "1,1,2,1,2,2", "2,1,2,2,1,2", "--relative"])
        .assert()
        .success()
        .stdout("2,1,2,2,1,2\n");

    partition_edit()
        .args(["--solver", "exact", "pair", "1,1,2,1,2,2", "2,1,2,2,1,2"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn test_pair_label_out_of_range() {
    partition_edit()
        .args(["pair", "1,9223372036854775807", "1,1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));

    partition_edit()
        .args(["pair", "4000000000,1,1", "1,1,1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));

    partition_edit()
        .args(["--compact-labels", "pair", "1,9223372036854775807", "1,1"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_pair_invalid_label() {
    partition_edit()
        .args(["pair", "1,x,2", "1,1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an integer"));
}

#[test]
fn test_pair_gap_needs_compact_labels() {
    partition_edit()
        .args(["pair", "1,3,3", "1,1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cluster 2 is empty"));

    partition_edit()
        .args(["--compact-labels", "pair", "1,3,3", "1,1,2"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_pair_length_mismatch() {
    partition_edit()
        .args(["pair", "1,1,2", "1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("different sizes"));
}

#[test]
fn test_batch_directory() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("runs");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("membership0"), "1\n1\n2\n").unwrap();
    fs::write(input.join("membership1"), "1\n2\n2\n").unwrap();
    fs::write(input.join("membership2"), "1\n1\n2\n").unwrap();
    fs::write(input.join("notes.txt"), "ignored\n").unwrap();
    let output = dir.path().join("out");

    partition_edit()
        .arg("batch")
        .arg("--input-dir")
        .arg(&input)
        .arg("--output-dir")
        .arg(&output)
        .args(["--threads", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dist-matrix-Edit.csv"));

    let csv = fs::read_to_string(output.join("dist-matrix-Edit.csv")).unwrap();
    assert_eq!(
        csv,
        ",sol0,sol1,sol2\nsol0,0,1,0\nsol1,1,0,1\nsol2,0,1,0\n"
    );
}

#[test]
fn test_batch_solutions_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b10.txt"), "1\n2\n").unwrap();
    fs::write(dir.path().join("b2.txt"), "1\n1\n").unwrap();
    let list = dir.path().join("solutions.txt");
    fs::write(&list, "b10.txt\nb2.txt\n").unwrap();
    let output = dir.path().join("out");

    partition_edit()
        .arg("batch")
        .arg("--solutions-file")
        .arg(&list)
        .arg("--base-dir")
        .arg(dir.path())
        .arg("--output-dir")
        .arg(&output)
        .assert()
        .success();

    let csv = fs::read_to_string(output.join("dist-matrix-Edit.csv")).unwrap();
    assert_eq!(csv, ",sol0,sol1\nsol0,0,1\nsol1,1,0\n");
}

#[test]
fn test_batch_missing_source() {
    let dir = TempDir::new().unwrap();
    partition_edit()
        .arg("batch")
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input-dir or --solutions-file"));
}

#[test]
fn test_batch_nothing_discovered() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out");
    partition_edit()
        .arg("batch")
        .arg("--input-dir")
        .arg(dir.path())
        .arg("--output-dir")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
    assert!(!output.exists());
}

#[test]
fn test_batch_trailing_content() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("membership1"), "1\n2\n").unwrap();
    fs::write(dir.path().join("membership2"), "1\n2\n1\n").unwrap();
    let output = dir.path().join("out");

    partition_edit()
        .arg("batch")
        .arg("--input-dir")
        .arg(dir.path())
        .arg("--output-dir")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("more labels than the expected 2"));
    assert!(!output.exists());
}

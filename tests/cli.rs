//! End-to-end tests of the compare-subprograms binary

#[path = "integration/helpers.rs"]
#[allow(dead_code)]
mod helpers;

use helpers::listing_pair;
use std::path::Path;
use std::process::{Command, Output};

fn run_cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_compare-subprograms"))
        .args(args)
        .current_dir(dir)
        .env_remove("SUBPROGRAM_REFERENCE")
        .env_remove("SUBPROGRAM_CANDIDATE")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run compare-subprograms")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn identical_files_exit_zero() {
    let pair = listing_pair(&["1000 foo", "2000 bar"], &["1000 foo", "2000 bar"]);
    let dir = pair.reference.parent().unwrap();
    let output = run_cli(
        dir,
        &["--reference", "reference.txt", "--candidate", "candidate.txt"],
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("comparing [ reference.txt ] with [ candidate.txt ]\n"));
}

#[test]
fn failing_comparison_exits_one() {
    let pair = listing_pair(&["1000 foo"], &["1000 bar"]);
    let dir = pair.reference.parent().unwrap();
    let output = run_cli(
        dir,
        &["--reference", "reference.txt", "--pindwarf", "candidate.txt"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains(" => FAIL : 0x1000 : "));
}

#[test]
fn missing_reference_option() {
    let pair = listing_pair(&["1000 foo"], &["1000 foo"]);
    let dir = pair.reference.parent().unwrap();
    let output = run_cli(dir, &["--candidate", "candidate.txt"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "Missing --reference\n");
}

#[test]
fn missing_candidate_option() {
    let pair = listing_pair(&["1000 foo"], &["1000 foo"]);
    let dir = pair.reference.parent().unwrap();
    let output = run_cli(dir, &["--reference", "reference.txt"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "Missing --candidate\n");
}

#[test]
fn nonexistent_file() {
    let pair = listing_pair(&["1000 foo"], &["1000 foo"]);
    let dir = pair.reference.parent().unwrap();
    let output = run_cli(
        dir,
        &["--reference", "reference.txt", "--candidate", "nope.txt"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "File does not exist (nope.txt)\n");
}

#[test]
fn unknown_option_exits_one() {
    let pair = listing_pair(&["1000 foo"], &["1000 foo"]);
    let dir = pair.reference.parent().unwrap();
    let output = run_cli(dir, &["--no-such-flag"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn paths_from_environment() {
    let pair = listing_pair(&["2000 foo", "2000 lambda1"], &["2000 foo"]);
    let dir = pair.reference.parent().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_compare-subprograms"))
        .current_dir(dir)
        .env("SUBPROGRAM_REFERENCE", "reference.txt")
        .env("SUBPROGRAM_CANDIDATE", "candidate.txt")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run compare-subprograms");
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains(" => PASS : 0x2000 : "));
}

#[test]
fn env_file_in_working_directory() {
    let pair = listing_pair(&["2000 foo", "2000 lambda1"], &["2000 foo"]);
    let dir = pair.reference.parent().unwrap();
    std::fs::write(
        dir.join(".env"),
        "SUBPROGRAM_REFERENCE=reference.txt\nSUBPROGRAM_CANDIDATE=candidate.txt\n",
    )
    .unwrap();
    let output = run_cli(dir, &[]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains(" => PASS : 0x2000 : "));
}

#[test]
fn env_file_in_parent_directory_is_ignored() {
    let pair = listing_pair(&["1000 foo"], &["1000 foo"]);
    let dir = pair.reference.parent().unwrap();
    std::fs::write(
        dir.join(".env"),
        "SUBPROGRAM_REFERENCE=reference.txt\nSUBPROGRAM_CANDIDATE=candidate.txt\n",
    )
    .unwrap();
    let nested = dir.join("nested");
    std::fs::create_dir(&nested).unwrap();
    let output = run_cli(&nested, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "Missing --reference\n");
}

#[test]
fn fatal_error_output_matches_across_modes() {
    let pair = listing_pair(&["1000 foo", ""], &["1000 foo"]);
    let dir = pair.reference.parent().unwrap();
    let args = ["--reference", "reference.txt", "--candidate", "candidate.txt"];
    let sequential = run_cli(dir, &args);
    let mut parallel_args = args.to_vec();
    parallel_args.push("--parallel");
    let parallel = run_cli(dir, &parallel_args);

    for output in [&sequential, &parallel] {
        assert_eq!(output.status.code(), Some(1));
        assert_eq!(
            stdout(output),
            "comparing [ reference.txt ] with [ candidate.txt ]\n"
        );
        assert!(String::from_utf8_lossy(&output.stderr).contains("no address token"));
    }
}

#[test]
fn parallel_text_report_matches_sequential() {
    let reference: Vec<String> = (0..64).map(|i| format!("{:04x} f{}", i, i)).collect();
    let candidate: Vec<String> = (0..64)
        .map(|i| format!("{:04x} f{}", i, if i % 5 == 0 { 999 } else { i }))
        .collect();
    let reference: Vec<&str> = reference.iter().map(String::as_str).collect();
    let candidate: Vec<&str> = candidate.iter().map(String::as_str).collect();
    let pair = listing_pair(&reference, &candidate);
    let dir = pair.reference.parent().unwrap();

    let args = ["--reference", "reference.txt", "--candidate", "candidate.txt"];
    let sequential = run_cli(dir, &args);
    let mut parallel_args = args.to_vec();
    parallel_args.push("--parallel");
    let parallel = run_cli(dir, &parallel_args);

    assert_eq!(sequential.status.code(), Some(1));
    assert_eq!(parallel.status.code(), Some(1));
    assert_eq!(stdout(&sequential), stdout(&parallel));
}

#[test]
fn json_report() {
    let pair = listing_pair(&["3000 foo"], &["3000 foo", "3000 bar"]);
    let dir = pair.reference.parent().unwrap();
    let output = run_cli(
        dir,
        &[
            "--reference",
            "reference.txt",
            "--candidate",
            "candidate.txt",
            "--format",
            "json",
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["passed"], false);
    assert_eq!(value["addresses"][0]["address"], "3000");
    assert_eq!(value["addresses"][0]["reason"], "candidate_not_subset");
}

//! Test helpers for listing comparisons

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A reference and a candidate listing written into a temporary directory
pub struct ListingPair {
    _dir: TempDir,
    pub reference: PathBuf,
    pub candidate: PathBuf,
}

/// Write both listings, one record per line
pub fn listing_pair(reference: &[&str], candidate: &[&str]) -> ListingPair {
    let dir = tempfile::tempdir().expect("tempdir");
    let reference_path = dir.path().join("reference.txt");
    let candidate_path = dir.path().join("candidate.txt");
    fs::write(&reference_path, join_lines(reference)).expect("write reference");
    fs::write(&candidate_path, join_lines(candidate)).expect("write candidate");
    ListingPair {
        _dir: dir,
        reference: reference_path,
        candidate: candidate_path,
    }
}

fn join_lines(lines: &[&str]) -> String {
    lines.iter().map(|l| format!("{}\n", l)).collect()
}

/// Run `compare_to` and return the verdict with the report text
pub fn compare_report(pair: &ListingPair) -> (bool, String) {
    let mut out = Vec::new();
    let passed = subprogram_compare::compare_to(&pair.reference, &pair.candidate, &mut out)
        .expect("comparison should not error");
    (passed, String::from_utf8(out).expect("utf8 report"))
}

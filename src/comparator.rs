//! Subprogram listing comparator
//!
//! Compares a candidate listing against a reference listing:
//! 1. line-diff the two files,
//! 2. collect the addresses of every marked line,
//! 3. classify each address from all lines carrying it in both files.
//!
//! An address with exactly one line on each side is a mismatch. Otherwise the
//! candidate may omit records the reference has (an address can carry several
//! inlined/lambda names) but may not assert a record the reference lacks.

use crate::error::Result;
use crate::line_diff::{differing_addresses, differing_lines, Sides};
use crate::listing::Listing;
use crate::report;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Per-address outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
        }
    }
}

/// Why an address got its verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// One line on each side and they differ
    AttributesDiffer,
    /// Every candidate line is also a reference line
    CandidateSubset,
    /// Some candidate line is absent from the reference
    CandidateNotSubset,
}

impl Reason {
    pub fn verdict(self) -> Verdict {
        match self {
            Reason::CandidateSubset => Verdict::Pass,
            Reason::AttributesDiffer | Reason::CandidateNotSubset => Verdict::Fail,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Reason::AttributesDiffer => {
                "some attributes for the function in this address are different"
            }
            Reason::CandidateSubset => {
                "candidate functions are a subset of the reference functions for this address"
            }
            Reason::CandidateNotSubset => {
                "candidate functions have an item that is missing in the reference functions for this address"
            }
        }
    }
}

/// Classification of one differing address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressReport {
    pub address: String,
    pub verdict: Verdict,
    pub reason: Reason,
    pub reference_lines: Vec<String>,
    pub candidate_lines: Vec<String>,
}

/// Classify an address from every line carrying it on each side.
///
/// The rule is asymmetric on purpose: the reference may carry extra entries
/// for an address, the candidate may not.
pub fn classify(address: &str, reference_lines: &[&str], candidate_lines: &[&str]) -> AddressReport {
    let reason = if reference_lines.len() == 1 && candidate_lines.len() == 1 {
        Reason::AttributesDiffer
    } else {
        let reference: HashSet<&str> = reference_lines.iter().copied().collect();
        if candidate_lines.iter().all(|line| reference.contains(line)) {
            Reason::CandidateSubset
        } else {
            Reason::CandidateNotSubset
        }
    };

    AddressReport {
        address: address.to_owned(),
        verdict: reason.verdict(),
        reason,
        reference_lines: reference_lines.iter().map(|l| l.to_string()).collect(),
        candidate_lines: candidate_lines.iter().map(|l| l.to_string()).collect(),
    }
}

/// Result of comparing two listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub reference: PathBuf,
    pub candidate: PathBuf,
    /// Sorted by address
    pub addresses: Vec<AddressReport>,
    pub passed: bool,
}

impl Comparison {
    pub fn passed_count(&self) -> usize {
        self.addresses
            .iter()
            .filter(|a| a.verdict == Verdict::Pass)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.addresses.len() - self.passed_count()
    }
}

/// Comparison settings
#[derive(Debug, Clone, Copy, Default)]
pub struct Comparator {
    parallel: bool,
}

impl Comparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify addresses on the rayon pool. Output order is unchanged.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Load both files and compare them
    pub fn run(&self, reference: impl AsRef<Path>, candidate: impl AsRef<Path>) -> Result<Comparison> {
        let reference = Listing::load(reference)?;
        let candidate = Listing::load(candidate)?;
        self.compare_listings(&reference, &candidate)
    }

    /// Compare two listings already in memory
    pub fn compare_listings(&self, reference: &Listing, candidate: &Listing) -> Result<Comparison> {
        let marked = differing_lines(reference, candidate);
        let addresses = differing_addresses(&marked)?;
        debug!(
            marked_lines = marked.len(),
            addresses = addresses.len(),
            "diffed listings"
        );

        let work: Vec<(&String, &Sides)> = addresses.iter().collect();
        let classify_one =
            |&(address, sides): &(&String, &Sides)| resolve(address, *sides, reference, candidate);
        let reports: Vec<AddressReport> = if self.parallel {
            work.par_iter().map(classify_one).collect()
        } else {
            work.iter().map(classify_one).collect()
        };

        let passed = reports.iter().all(|r| r.verdict == Verdict::Pass);
        let comparison = Comparison {
            reference: reference.path().to_path_buf(),
            candidate: candidate.path().to_path_buf(),
            addresses: reports,
            passed,
        };
        info!(
            addresses = comparison.addresses.len(),
            failed = comparison.failed_count(),
            passed = comparison.passed,
            "comparison finished"
        );
        Ok(comparison)
    }
}

/// Look an address up in both listings and classify it
fn resolve(address: &str, sides: Sides, reference: &Listing, candidate: &Listing) -> AddressReport {
    let reference_lines = reference.lines_containing(address);
    let candidate_lines = candidate.lines_containing(address);

    // The address is a substring of a marked line of the same in-memory listing.
    debug_assert!(!sides.reference || !reference_lines.is_empty());
    debug_assert!(!sides.candidate || !candidate_lines.is_empty());

    let report = classify(address, &reference_lines, &candidate_lines);
    debug!(
        address,
        reference_lines = reference_lines.len(),
        candidate_lines = candidate_lines.len(),
        verdict = report.verdict.as_str(),
        "classified address"
    );
    report
}

/// Compare two listing files and print the text report to stdout.
///
/// Returns `true` iff no address failed.
pub fn compare(reference: impl AsRef<Path>, candidate: impl AsRef<Path>) -> Result<bool> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    compare_to(reference, candidate, &mut out)
}

/// Same as [`compare`], writing the report to `out`
pub fn compare_to<W: Write>(
    reference: impl AsRef<Path>,
    candidate: impl AsRef<Path>,
    out: &mut W,
) -> Result<bool> {
    let reference = reference.as_ref();
    let candidate = candidate.as_ref();
    report::write_header(out, reference, candidate)?;
    let comparison = Comparator::new().run(reference, candidate)?;
    report::write_verdicts(out, &comparison)?;
    Ok(comparison.passed)
}

//! In-process line diff
//!
//! Produces the lines a classic `diff reference candidate` would mark with
//! `<` or `>`, then reduces them to the set of differing addresses. The diff
//! is Myers O(ND), so memory stays linear in the listing length.

use crate::address::extract_address;
use crate::error::Result;
use crate::listing::Listing;
use serde::Serialize;
use similar::{capture_diff_slices, Algorithm, DiffOp};
use std::collections::BTreeMap;
use std::fmt;

/// Which file a diff line exists in exclusively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffSide {
    Reference,
    Candidate,
}

impl DiffSide {
    /// The marker a diff tool prefixes the line with
    pub fn marker(self) -> char {
        match self {
            DiffSide::Reference => '<',
            DiffSide::Candidate => '>',
        }
    }
}

impl fmt::Display for DiffSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffSide::Reference => f.write_str("reference"),
            DiffSide::Candidate => f.write_str("candidate"),
        }
    }
}

/// A line present in only one of the two listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine<'a> {
    pub side: DiffSide,
    /// 1-based line number in the file named by `side`
    pub line_number: usize,
    pub text: &'a str,
}

impl DiffLine<'_> {
    /// The line as `diff` prints it: `< text` or `> text`
    pub fn echoed(&self) -> String {
        format!("{} {}", self.side.marker(), self.text)
    }
}

/// Which diff sides mentioned an address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sides {
    pub reference: bool,
    pub candidate: bool,
}

impl Sides {
    fn mark(&mut self, side: DiffSide) {
        match side {
            DiffSide::Reference => self.reference = true,
            DiffSide::Candidate => self.candidate = true,
        }
    }
}

/// Lines marked by a Myers line diff, in diff order. Unchanged lines are dropped.
pub fn differing_lines<'a>(reference: &'a Listing, candidate: &'a Listing) -> Vec<DiffLine<'a>> {
    let old = line_keys(reference);
    let new = line_keys(candidate);
    let mut marked = Vec::new();

    for op in capture_diff_slices(Algorithm::Myers, &old, &new) {
        match op {
            DiffOp::Equal { .. } => {}
            DiffOp::Delete {
                old_index, old_len, ..
            } => mark_range(&mut marked, DiffSide::Reference, &old, old_index, old_len),
            DiffOp::Insert {
                new_index, new_len, ..
            } => mark_range(&mut marked, DiffSide::Candidate, &new, new_index, new_len),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                mark_range(&mut marked, DiffSide::Reference, &old, old_index, old_len);
                mark_range(&mut marked, DiffSide::Candidate, &new, new_index, new_len);
            }
        }
    }

    marked
}

/// Diff keys: the line text plus whether it is an unterminated last line
fn line_keys(listing: &Listing) -> Vec<(&str, bool)> {
    listing
        .lines()
        .iter()
        .enumerate()
        .map(|(i, line)| (line.as_str(), listing.is_unterminated(i)))
        .collect()
}

fn mark_range<'a>(
    marked: &mut Vec<DiffLine<'a>>,
    side: DiffSide,
    keys: &[(&'a str, bool)],
    start: usize,
    len: usize,
) {
    for (offset, &(text, _)) in keys[start..start + len].iter().enumerate() {
        marked.push(DiffLine {
            side,
            line_number: start + offset + 1,
            text,
        });
    }
}

/// Distinct addresses of the marked lines, sorted ascending as strings.
pub fn differing_addresses(lines: &[DiffLine<'_>]) -> Result<BTreeMap<String, Sides>> {
    let mut addresses: BTreeMap<String, Sides> = BTreeMap::new();
    for line in lines {
        let address = extract_address(line)?;
        addresses.entry(address).or_default().mark(line.side);
    }
    Ok(addresses)
}

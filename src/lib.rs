//! subprogram-compare - verify a debug-info subprogram listing against a reference
//!
//! Two producers (a trusted reference extractor and a tool under test) each
//! write a text listing with one subprogram record per line, keyed by
//! address. This crate diffs the listings line by line, resolves every
//! differing address in both files, and classifies it PASS or FAIL.

pub mod address;
pub mod comparator;
pub mod error;
pub mod line_diff;
pub mod listing;
pub mod report;

pub use comparator::{
    classify, compare, compare_to, AddressReport, Comparator, Comparison, Reason, Verdict,
};
pub use error::{CompareError, Result};
pub use listing::Listing;

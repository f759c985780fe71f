//! Console and JSON rendering of a comparison

use crate::comparator::{Comparison, Reason};
use crate::error::Result;
use std::io::Write;
use std::path::Path;

/// Width the file path is padded to in mismatch detail lines
const DETAIL_PATH_WIDTH: usize = 30;

/// `comparing [ <reference> ] with [ <candidate> ]`
pub fn write_header<W: Write>(out: &mut W, reference: &Path, candidate: &Path) -> Result<()> {
    writeln!(
        out,
        "comparing [ {} ] with [ {} ]",
        reference.display(),
        candidate.display()
    )?;
    Ok(())
}

/// One line per address, mismatch details, then the summary
pub fn write_verdicts<W: Write>(out: &mut W, comparison: &Comparison) -> Result<()> {
    for entry in &comparison.addresses {
        writeln!(
            out,
            " => {} : 0x{} : {}",
            entry.verdict.as_str(),
            entry.address,
            entry.reason.description()
        )?;

        if entry.reason == Reason::AttributesDiffer {
            write_detail(out, &comparison.reference, &entry.reference_lines)?;
            write_detail(out, &comparison.candidate, &entry.candidate_lines)?;
        }
    }

    write_summary(out, comparison)
}

fn write_detail<W: Write>(out: &mut W, path: &Path, lines: &[String]) -> Result<()> {
    let path = path.display().to_string();
    for line in lines {
        writeln!(out, "\t\t{:<width$}: {}", path, line, width = DETAIL_PATH_WIDTH)?;
    }
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, comparison: &Comparison) -> Result<()> {
    match comparison.addresses.len() {
        0 => writeln!(out, "no differing addresses")?,
        1 => writeln!(
            out,
            "1 differing address: {} passed, {} failed",
            comparison.passed_count(),
            comparison.failed_count()
        )?,
        n => writeln!(
            out,
            "{} differing addresses: {} passed, {} failed",
            n,
            comparison.passed_count(),
            comparison.failed_count()
        )?,
    }
    writeln!(
        out,
        "RESULT: {}",
        if comparison.passed { "PASS" } else { "FAIL" }
    )?;
    Ok(())
}

/// Full text report: header, verdicts, summary
pub fn write_text<W: Write>(out: &mut W, comparison: &Comparison) -> Result<()> {
    write_header(out, &comparison.reference, &comparison.candidate)?;
    write_verdicts(out, comparison)
}

/// Pretty-printed JSON of the whole comparison
pub fn write_json<W: Write>(out: &mut W, comparison: &Comparison) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, comparison)?;
    writeln!(out)?;
    Ok(())
}

//! Address extraction from echoed diff lines
//!
//! In the echoed form `< 0x401000 main ...` the address is the second
//! whitespace-separated token. Angle brackets glued to it are stripped, so
//! `<401000>` and `401000` name the same record.

use crate::error::{CompareError, Result};
use crate::line_diff::DiffLine;

/// Address of a marked diff line, as an opaque string
pub fn extract_address(line: &DiffLine<'_>) -> Result<String> {
    let echoed = line.echoed();
    address_token(&echoed)
        .map(str::to_owned)
        .ok_or_else(|| CompareError::MalformedLine {
            side: line.side,
            line_number: line.line_number,
            line: line.text.to_owned(),
        })
}

/// Second whitespace token with `<`, `>` and whitespace trimmed from both ends.
/// A token made only of brackets carries no address.
fn address_token(echoed: &str) -> Option<&str> {
    let token = echoed.split_whitespace().nth(1)?;
    let address = token.trim_matches(|c: char| c == '<' || c == '>' || c.is_whitespace());
    (!address.is_empty()).then_some(address)
}

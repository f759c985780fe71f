//! Subprogram listings loaded into memory
//!
//! A listing is the text file one producer (the reference extractor or the
//! tool under test) wrote: one subprogram record per line. Lookups are literal
//! substring matches over whole lines, the way `grep -F` would answer them.
//!
//! Lines are split on `\n` only. A `\r` before it stays part of the line, and
//! a last line without a terminating newline is remembered, so both differ
//! from their LF-terminated counterparts exactly as they would under `diff`.

use crate::error::{CompareError, Result};
use memchr::memmem;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Listing {
    path: PathBuf,
    lines: Vec<String>,
    /// The file ends without `\n` after its last line
    unterminated: bool,
}

impl Listing {
    /// Read a listing from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CompareError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let listing = Self::from_text(path, &text);
        debug!(path = %path.display(), lines = listing.len(), "loaded listing");
        Ok(listing)
    }

    /// Build a listing from text already in memory
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        let mut lines: Vec<String> = text.split('\n').map(str::to_owned).collect();
        let unterminated = !text.is_empty() && !text.ends_with('\n');
        if !unterminated {
            // the empty piece after the final newline (or of an empty file)
            lines.pop();
        }
        Self {
            path: path.into(),
            lines,
            unterminated,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether line `index` is the last line and lacks a newline
    pub fn is_unterminated(&self, index: usize) -> bool {
        self.unterminated && index + 1 == self.lines.len()
    }

    /// All lines containing `needle`, in file order, duplicates kept.
    ///
    /// An empty needle matches nothing.
    pub fn lines_containing(&self, needle: &str) -> Vec<&str> {
        if needle.is_empty() {
            return Vec::new();
        }
        let finder = memmem::Finder::new(needle);
        self.lines
            .iter()
            .filter(|line| finder.find(line.as_bytes()).is_some())
            .map(String::as_str)
            .collect()
    }
}

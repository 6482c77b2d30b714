//! Delimited text helpers
//!
//! Tokenizing and parsing of comma-separated sample data, shared by the
//! delimited-file and delimited-string sources.

use std::path::Path;

use log::warn;

use crate::error::{ConvError, Result};

/// Separator between samples
pub const DELIMITER: char = ',';

/// File extensions treated as delimited text, without the leading dot
pub const DELIMITED_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// Extension of `reference` without the leading dot, if it has one
pub fn extension(reference: &str) -> Option<String> {
    Path::new(reference)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_string)
}

/// Whether `reference` names a file with a delimited-text extension
pub fn has_delimited_extension(reference: &str) -> bool {
    extension(reference).is_some_and(|ext| DELIMITED_EXTENSIONS.contains(&ext.as_str()))
}

/// Split text into non-empty tokens
///
/// Line breaks separate tokens as well as the delimiter, so both a single
/// CSV row and a one-value-per-line column parse the same way. Runs of
/// separators collapse; a token holding only whitespace is kept.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == DELIMITER || c == '\n' || c == '\r')
        .filter(|token| !token.is_empty())
}

/// Number of tokens in `text`
pub fn count_tokens(text: &str) -> usize {
    tokenize(text).count()
}

/// Number of delimiter-separated tokens in inline text
///
/// Only the delimiter counts here; a line break does not make a literal
/// into data.
pub fn count_delimited_tokens(text: &str) -> usize {
    text.split(DELIMITER).filter(|token| !token.is_empty()).count()
}

/// Parse every token as `f64`
///
/// Tokens that are not numbers become `0.0`.
pub fn parse_samples(text: &str) -> Vec<f64> {
    let mut samples = Vec::with_capacity(count_tokens(text));

    for token in tokenize(text) {
        let token = token.trim();
        let value = token.parse::<f64>().unwrap_or_else(|_| {
            warn!("Token '{}' is not a number, using 0.0", token);
            0.0
        });
        samples.push(value);
    }

    samples
}

/// Read a whole delimited file into memory
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ConvError::storage(path.display().to_string(), e))
}

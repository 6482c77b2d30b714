//! Output file naming
//!
//! When no output path is given, file sinks write to
//! `conv-<x>-<h>-<ddmmyyHHMMSS>.<ext>` in the working directory.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::sink::SinkFormat;
use crate::source::{delimited, SourceDescriptor, SourceKind};

/// Stem used for inline inputs
const STRING_STEM: &str = "stringcsv";

/// Build the default output path for a run
pub fn synthesize_output_path(
    x: &SourceDescriptor,
    h: &SourceDescriptor,
    format: SinkFormat,
    timestamp: NaiveDateTime,
) -> PathBuf {
    let name = format!(
        "conv-{}-{}-{}",
        stem(x),
        stem(h),
        timestamp.format("%d%m%y%H%M%S")
    );

    match extension_for(x, h, format) {
        Some(ext) => PathBuf::from(format!("{}.{}", name, ext)),
        None => PathBuf::from(name),
    }
}

fn stem(source: &SourceDescriptor) -> String {
    match source.kind() {
        SourceKind::DelimitedString => STRING_STEM.to_string(),
        SourceKind::Audio | SourceKind::DelimitedFile => Path::new(source.reference())
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("input")
            .to_string(),
    }
}

fn extension_for(x: &SourceDescriptor, h: &SourceDescriptor, format: SinkFormat) -> Option<String> {
    match format {
        SinkFormat::Audio => [x, h]
            .into_iter()
            .filter(|s| s.kind() == SourceKind::Audio)
            .find_map(|s| delimited::extension(s.reference()))
            .or_else(|| Some("wav".to_string())),
        SinkFormat::DelimitedFile => Some("csv".to_string()),
        SinkFormat::ColumnFile => Some("txt".to_string()),
        SinkFormat::RawText | SinkFormat::DelimitedText => None,
    }
}

//! Input Sources
//!
//! Classifies an input reference (a path or literal text) into one of three
//! source kinds and reads it into a [`Signal`].
//!
//! Classification order, first match wins:
//! 1. Audio - the reference opens as a WAV stream
//! 2. DelimitedFile - the reference ends in `.csv` or `.txt`; the content is
//!    not inspected
//! 3. DelimitedString - the reference itself holds more than one
//!    comma-separated token
//!
//! Anything else is rejected with `UnrecognizedInput`.

pub mod delimited;

use std::fmt;
use std::path::Path;

use log::debug;

use crate::config::Limits;
use crate::engine::{io, Signal};
use crate::error::{ConvError, Result};

/// Kind of an input reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// WAV audio file
    Audio,
    /// File holding comma-separated samples
    DelimitedFile,
    /// Comma-separated samples given inline
    DelimitedString,
}

impl SourceKind {
    /// Every source kind, in classification order
    pub const ALL: [SourceKind; 3] = [
        SourceKind::Audio,
        SourceKind::DelimitedFile,
        SourceKind::DelimitedString,
    ];

    /// Whether the reference names a file on disk
    pub fn is_file(&self) -> bool {
        !matches!(self, SourceKind::DelimitedString)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Audio => "Audio File",
            SourceKind::DelimitedFile => "CSV File",
            SourceKind::DelimitedString => "CSV String",
        };
        f.write_str(name)
    }
}

/// Determine the kind of `reference`
///
/// # Errors
/// * `InputTooLarge` - If the reference exceeds `limits.max_reference_len`
/// * `UnrecognizedInput` - If no source kind matches
pub fn classify(reference: &str, limits: &Limits) -> Result<SourceKind> {
    limits.check_reference(reference)?;

    let kind = if io::probe_audio(reference) {
        SourceKind::Audio
    } else if delimited::has_delimited_extension(reference) {
        SourceKind::DelimitedFile
    } else if delimited::count_delimited_tokens(reference) > 1 {
        SourceKind::DelimitedString
    } else {
        return Err(ConvError::UnrecognizedInput {
            reference: reference.to_string(),
        });
    };

    debug!("Classified '{}' as {:?}", reference, kind);
    Ok(kind)
}

/// A classified input reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    reference: String,
    kind: SourceKind,
}

impl SourceDescriptor {
    /// Classify `reference` and wrap it in a descriptor
    pub fn classify(reference: impl Into<String>, limits: &Limits) -> Result<Self> {
        let reference = reference.into();
        let kind = classify(&reference, limits)?;
        Ok(SourceDescriptor { reference, kind })
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Read the referenced input into a signal
    ///
    /// # Errors
    /// * `Storage` - If a referenced file cannot be read
    /// * `AudioFormat` - If an audio file cannot be decoded
    /// * `InputTooLarge` - If the signal exceeds `limits.max_samples`
    /// * `EmptyInput` - If the input holds no samples
    pub fn read(&self, limits: &Limits) -> Result<Signal> {
        let signal = match self.kind {
            SourceKind::Audio => io::read_audio(Path::new(&self.reference))?,
            SourceKind::DelimitedFile => {
                let text = delimited::read_file(Path::new(&self.reference))?;
                Signal::new(delimited::parse_samples(&text))
            }
            SourceKind::DelimitedString => Signal::new(delimited::parse_samples(&self.reference)),
        };

        limits.check_samples(&self.reference, signal.len())?;

        if signal.is_empty() {
            return Err(ConvError::EmptyInput {
                reference: self.reference.clone(),
            });
        }

        debug!("Read {} samples from '{}'", signal.len(), self.reference);
        Ok(signal)
    }
}

//! Error handling for conv
//!
//! Every failure is terminal: the run stops at the first error and the
//! binary exits with status 1.

use thiserror::Error;

/// Result type alias for conv operations
pub type Result<T> = std::result::Result<T, ConvError>;

/// Main error type for conv operations
#[derive(Error, Debug)]
pub enum ConvError {
    // Input Errors
    #[error("Input '{reference}' is not an audio file or a CSV file/string")]
    UnrecognizedInput { reference: String },

    #[error("{what} is too large: {len} exceeds the maximum of {max}")]
    InputTooLarge {
        what: String,
        len: usize,
        max: usize,
    },

    #[error("Input '{reference}' contains no samples")]
    EmptyInput { reference: String },

    // Argument Errors
    #[error("Invalid argument: {reason}")]
    Argument { reason: String },

    // Storage Errors
    #[error("Unable to access '{path}': {source}")]
    Storage {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // Audio Errors
    #[error("Audio format error: {reason}")]
    AudioFormat {
        reason: String,
        #[source]
        source: Option<hound::Error>,
    },

    // Processing Errors
    #[error("Processing error: {reason}")]
    ProcessingError { reason: String },
}

impl ConvError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ConvError::UnrecognizedInput { .. } => "UNRECOGNIZED_INPUT",
            ConvError::InputTooLarge { .. } => "INPUT_TOO_LARGE",
            ConvError::EmptyInput { .. } => "EMPTY_INPUT",
            ConvError::Argument { .. } => "ARGUMENT_ERROR",
            ConvError::Storage { .. } => "STORAGE_ERROR",
            ConvError::AudioFormat { .. } => "AUDIO_FORMAT_ERROR",
            ConvError::ProcessingError { .. } => "PROCESSING_ERROR",
        }
    }

    /// Wrap an I/O failure on `path`
    pub fn storage(path: impl Into<String>, source: std::io::Error) -> Self {
        ConvError::Storage {
            path: path.into(),
            source,
        }
    }

    /// Wrap a codec failure with a short description of what was attempted
    pub fn audio(reason: impl Into<String>, source: hound::Error) -> Self {
        ConvError::AudioFormat {
            reason: format!("{}: {}", reason.into(), source),
            source: Some(source),
        }
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            ConvError::UnrecognizedInput { .. } => vec![
                "Check the file path is correct",
                "Separate inline values with commas, e.g. 1,0,0,1",
                "CSV files must use the .csv or .txt extension",
            ],
            ConvError::Argument { .. } => vec![
                "Output formats: audio, stdout, stdout-csv, columns, csv",
                "Use '--help' for the list of options",
            ],
            ConvError::AudioFormat { .. } => vec![
                "Only WAV audio is supported",
                "The audio output format is taken from an audio input",
            ],
            ConvError::Storage { .. } => vec![
                "Check the file exists and is readable",
                "Check the output directory is writable",
            ],
            _ => vec![],
        }
    }
}

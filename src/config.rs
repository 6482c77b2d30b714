//! Run configuration
//!
//! `ConvConfig` is the validated form of the command line: two ordered input
//! references plus output and formatting options.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{ConvError, Result};
use crate::sink::SinkFormat;

/// Number of inputs a convolution takes
pub const INPUT_COUNT: usize = 2;

/// Default number of decimal places for text output
pub const DEFAULT_PRECISION: u8 = 6;

/// Size bounds applied while reading inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum length in bytes of an input reference (path or inline data)
    pub max_reference_len: usize,
    /// Maximum number of samples in a parsed input
    pub max_samples: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_reference_len: 4096,
            max_samples: 1 << 27,
        }
    }
}

impl Limits {
    /// Reject a reference longer than `max_reference_len`
    pub fn check_reference(&self, reference: &str) -> Result<()> {
        if reference.len() > self.max_reference_len {
            return Err(ConvError::InputTooLarge {
                what: "Input reference".to_string(),
                len: reference.len(),
                max: self.max_reference_len,
            });
        }
        Ok(())
    }

    /// Reject a signal longer than `max_samples`
    pub fn check_samples(&self, reference: &str, len: usize) -> Result<()> {
        if len > self.max_samples {
            return Err(ConvError::InputTooLarge {
                what: format!("Sample count of '{}'", reference),
                len,
                max: self.max_samples,
            });
        }
        Ok(())
    }
}

/// Validated configuration for one convolution run
#[derive(Debug, Clone)]
pub struct ConvConfig {
    /// Input references, x first then h
    pub inputs: [String; INPUT_COUNT],
    /// Output path; synthesized from the inputs when absent
    pub output: Option<PathBuf>,
    /// Explicit sink; auto-selected from the input kinds when absent
    pub format: Option<SinkFormat>,
    pub precision: u8,
    pub info: bool,
    pub quiet: bool,
    pub timer: bool,
    pub normalize: bool,
    pub limits: Limits,
}

impl ConvConfig {
    /// Create a configuration with default options for two inputs
    pub fn new(x: impl Into<String>, h: impl Into<String>) -> Self {
        ConvConfig {
            inputs: [x.into(), h.into()],
            output: None,
            format: None,
            precision: DEFAULT_PRECISION,
            info: false,
            quiet: false,
            timer: false,
            normalize: false,
            limits: Limits::default(),
        }
    }

    /// Build a configuration from parsed arguments
    ///
    /// # Errors
    /// * `Argument` - If there are not exactly two inputs or the output
    ///   format name is unknown
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let all_inputs: Vec<String> = cli.inputs.into_iter().chain(cli.input_options).collect();
        let inputs: [String; INPUT_COUNT] =
            all_inputs.try_into().map_err(|inputs: Vec<String>| ConvError::Argument {
                reason: format!(
                    "exactly {} inputs are needed, got {}",
                    INPUT_COUNT,
                    inputs.len()
                ),
            })?;

        let format = cli
            .output_format
            .as_deref()
            .map(str::parse::<SinkFormat>)
            .transpose()?;

        let limits = Limits::default();
        for input in &inputs {
            limits.check_reference(input)?;
        }

        Ok(ConvConfig {
            inputs,
            output: cli.output,
            format,
            precision: cli.precision,
            info: cli.info,
            quiet: cli.quiet,
            timer: cli.timer,
            normalize: cli.normalize,
            limits,
        })
    }

    pub fn with_format(mut self, format: SinkFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn normalized(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(inputs: &[&str]) -> Cli {
        Cli {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            input_options: Vec::new(),
            output: None,
            output_format: None,
            precision: DEFAULT_PRECISION,
            info: false,
            timer: false,
            normalize: false,
            quiet: false,
        }
    }

    #[test]
    fn test_from_cli_defaults() {
        let config = ConvConfig::from_cli(cli(&["a.wav", "1,2"])).unwrap();
        assert_eq!(config.inputs, ["a.wav".to_string(), "1,2".to_string()]);
        assert_eq!(config.precision, 6);
        assert!(config.format.is_none());
        assert!(!config.quiet);
    }

    #[test]
    fn test_from_cli_requires_two_inputs() {
        let err = ConvConfig::from_cli(cli(&["a.wav"])).unwrap_err();
        assert_eq!(err.error_code(), "ARGUMENT_ERROR");

        let err = ConvConfig::from_cli(cli(&["a", "b", "c"])).unwrap_err();
        assert!(err.to_string().contains("got 3"));
    }

    #[test]
    fn test_from_cli_parses_format() {
        let mut args = cli(&["1,2", "3,4"]);
        args.output_format = Some("stdout-csv".to_string());
        let config = ConvConfig::from_cli(args).unwrap();
        assert_eq!(config.format, Some(SinkFormat::DelimitedText));

        let mut args = cli(&["1,2", "3,4"]);
        args.output_format = Some("mp3".to_string());
        assert_eq!(
            ConvConfig::from_cli(args).unwrap_err().error_code(),
            "ARGUMENT_ERROR"
        );
    }

    #[test]
    fn test_reference_too_large() {
        let long = "1,".repeat(4096);
        let err = ConvConfig::from_cli(cli(&[&long, "1,2"])).unwrap_err();
        assert_eq!(err.error_code(), "INPUT_TOO_LARGE");
    }

    #[test]
    fn test_sample_limit() {
        let limits = Limits {
            max_reference_len: 16,
            max_samples: 3,
        };
        assert!(limits.check_samples("x", 3).is_ok());
        assert!(limits.check_samples("x", 4).is_err());
        assert!(limits.check_reference("0123456789abcdefg").is_err());
    }
}

//! CLI Module
//!
//! Command-line interface for conv.

pub mod commands;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};

use crate::config::DEFAULT_PRECISION;

/// Convolution tool: convolve two signals read from audio files, CSV files
/// or CSV strings
#[derive(Parser, Debug)]
#[command(name = "conv")]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Input audio file, CSV file or CSV string (e.g. 1,0,0,1)
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<String>,

    /// Input given as an option; useful for data starting with '-'
    #[arg(short = 'i', long = "input", value_name = "FILE/STRING", allow_hyphen_values = true)]
    pub input_options: Vec<String>,

    /// Path or name of the output file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format: audio, stdout, stdout-csv, columns or csv
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub output_format: Option<String>,

    /// Number of decimal places in text output
    #[arg(short, long, value_name = "NUMBER", default_value_t = DEFAULT_PRECISION)]
    pub precision: u8,

    /// Print information about the inputs
    #[arg(long)]
    pub info: bool,

    /// Time the convolution
    #[arg(long)]
    pub timer: bool,

    /// Normalise the result to a peak magnitude of 1
    #[arg(long = "norm", visible_alias = "normalise")]
    pub normalize: bool,

    /// Silence status messages
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse arguments, merging positional and `-i` inputs in the order they
    /// appear on the command line
    pub fn try_parse_ordered<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Cli::command().try_get_matches_from(args)?;
        let mut cli = Cli::from_arg_matches(&matches)?;
        cli.inputs = ordered_inputs(&matches);
        cli.input_options.clear();
        Ok(cli)
    }
}

fn ordered_inputs(matches: &ArgMatches) -> Vec<String> {
    let mut indexed: Vec<(usize, String)> = Vec::new();

    for id in ["inputs", "input_options"] {
        if let (Some(values), Some(indices)) =
            (matches.get_many::<String>(id), matches.indices_of(id))
        {
            indexed.extend(indices.zip(values.cloned()));
        }
    }

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, value)| value).collect()
}

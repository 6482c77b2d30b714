//! conv CLI - Convolution Tool
//!
//! Command-line interface for the conv convolution pipeline.

use std::process::ExitCode;

use env_logger::Env;
use log::debug;

use conv::cli::{commands, Cli};
use conv::{ConvConfig, ConvError};

fn main() -> ExitCode {
    // Initialize logger; stdout is reserved for data
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse_ordered(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Help and version requests are not failures
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    debug!("conv v{}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(conv_err) = e.downcast_ref::<ConvError>() {
                for suggestion in conv_err.recovery_suggestions() {
                    eprintln!("  - {}", suggestion);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ConvConfig::from_cli(cli)?;
    let report = commands::run(&config)?;

    debug!(
        "Wrote {} samples as '{}' to {}",
        report.result_len, report.sink.format, report.sink.destination
    );

    Ok(())
}

//! CLI Command Implementations
//!
//! Runs one convolution end to end: classify and read both inputs, convolve,
//! optionally normalise, then resolve and render the sink.

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Local;
use log::{debug, info};

use crate::config::ConvConfig;
use crate::engine::{convolve_signals, Signal};
use crate::error::{ConvError, Result};
use crate::sink::{self, naming, SinkDescriptor};
use crate::source::{SourceDescriptor, SourceKind};

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub x: SourceDescriptor,
    pub h: SourceDescriptor,
    pub sink: SinkDescriptor,
    /// Number of samples in the convolution result
    pub result_len: usize,
    /// Time spent in the convolution itself
    pub elapsed: Duration,
    /// Whether the result was rescaled by its peak
    pub normalized: bool,
}

/// Convolve the two configured inputs and render the result.
pub fn run(config: &ConvConfig) -> Result<RunReport> {
    let limits = &config.limits;
    let [x_ref, h_ref] = &config.inputs;

    let x_source = SourceDescriptor::classify(x_ref.as_str(), limits)?;
    let h_source = SourceDescriptor::classify(h_ref.as_str(), limits)?;

    let x = x_source.read(limits)?;
    let h = h_source.read(limits)?;

    if config.info && !config.quiet {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        write_info(&mut out, &x_source, &x, &h_source, &h)
            .map_err(|e| ConvError::storage("<stdout>", e))?;
    }

    status(config, "Executing convolution...");
    info!(
        "Convolving {} x {} samples into {}",
        x.len(),
        h.len(),
        x.len() + h.len() - 1
    );

    let started = Instant::now();
    let mut y = convolve_signals(&x, &h)?;
    let elapsed = started.elapsed();

    if config.timer {
        status(
            config,
            &format!("Time taken: {:.9} seconds", elapsed.as_secs_f64()),
        );
    }
    status(config, "Convolution finished.");

    let format = sink::resolve(config.format, x_source.kind(), h_source.kind());
    debug!("Selected output format '{}'", format);

    let normalized = config.normalize && y.normalize();

    y.set_format(x.format().or(h.format()).copied());

    let output = if format.writes_file() {
        Some(output_path(config, &x_source, &h_source, format))
    } else {
        None
    };

    let sink = SinkDescriptor::new(format, output, config.precision, config.quiet);
    sink.render(&y)?;

    Ok(RunReport {
        x: x_source,
        h: h_source,
        sink,
        result_len: y.len(),
        elapsed,
        normalized,
    })
}

fn output_path(
    config: &ConvConfig,
    x: &SourceDescriptor,
    h: &SourceDescriptor,
    format: sink::SinkFormat,
) -> PathBuf {
    config.output.clone().unwrap_or_else(|| {
        naming::synthesize_output_path(x, h, format, Local::now().naive_local())
    })
}

/// Print a status line to stderr unless quiet
fn status(config: &ConvConfig, message: &str) {
    if !config.quiet {
        eprintln!("{}", message);
    }
}

/// Write the `--info` report for both inputs
pub fn write_info<W: Write>(
    out: &mut W,
    x_source: &SourceDescriptor,
    x: &Signal,
    h_source: &SourceDescriptor,
    h: &Signal,
) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--INFO--")?;
    writeln!(out, "\t=X INPUT=")?;
    write_input_info(out, x_source, x)?;
    writeln!(out)?;
    writeln!(out, "\t=H INPUT=")?;
    write_input_info(out, h_source, h)?;
    writeln!(out, "---")?;
    writeln!(out)
}

fn write_input_info<W: Write>(
    out: &mut W,
    source: &SourceDescriptor,
    signal: &Signal,
) -> std::io::Result<()> {
    match (source.kind(), signal.format()) {
        (SourceKind::Audio, Some(format)) => {
            writeln!(out, "File Name: {}", source.reference())?;
            writeln!(out, "Sample Rate: {}", format.sample_rate)?;
            writeln!(out, "Samples: {}", signal.frames())?;
            writeln!(out, "Channels: {}", signal.channels())?;
            writeln!(out, "Format: {}", format.container())?;
            writeln!(out, "Subtype: {}", format.subtype())
        }
        (kind, _) => {
            let label = if kind.is_file() {
                "File Name"
            } else {
                "Input String"
            };
            writeln!(out, "{}: {}", label, source.reference())?;
            writeln!(out, "Samples: {}", signal.len())?;
            writeln!(out, "Format: {}", kind)
        }
    }
}

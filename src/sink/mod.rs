//! Output Sinks
//!
//! Selects where the convolution result goes and renders it there.
//!
//! | Name         | Format          | Destination            |
//! |--------------|-----------------|------------------------|
//! | `audio`      | `Audio`         | WAV file               |
//! | `stdout`     | `RawText`       | stdout, one per line   |
//! | `stdout-csv` | `DelimitedText` | stdout, comma-joined   |
//! | `columns`    | `ColumnFile`    | text file, one per line|
//! | `csv`        | `DelimitedFile` | text file, comma-joined|

pub mod naming;
pub mod text;

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;

use crate::engine::{io, Signal};
use crate::error::{ConvError, Result};
use crate::source::SourceKind;

/// Output format of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkFormat {
    Audio,
    RawText,
    DelimitedText,
    ColumnFile,
    DelimitedFile,
}

impl SinkFormat {
    pub const ALL: [SinkFormat; 5] = [
        SinkFormat::Audio,
        SinkFormat::RawText,
        SinkFormat::DelimitedText,
        SinkFormat::ColumnFile,
        SinkFormat::DelimitedFile,
    ];

    /// Name accepted by `--output-format`
    pub fn name(&self) -> &'static str {
        match self {
            SinkFormat::Audio => "audio",
            SinkFormat::RawText => "stdout",
            SinkFormat::DelimitedText => "stdout-csv",
            SinkFormat::ColumnFile => "columns",
            SinkFormat::DelimitedFile => "csv",
        }
    }

    /// Whether this sink writes to a file rather than standard output
    pub fn writes_file(&self) -> bool {
        matches!(
            self,
            SinkFormat::Audio | SinkFormat::ColumnFile | SinkFormat::DelimitedFile
        )
    }
}

impl fmt::Display for SinkFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SinkFormat {
    type Err = ConvError;

    fn from_str(s: &str) -> Result<Self> {
        SinkFormat::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| ConvError::Argument {
                reason: format!("output format '{}' not available", s),
            })
    }
}

/// Pick the output format
///
/// An explicit format always wins. Otherwise audio beats delimited files,
/// and two inline strings print to standard output.
pub fn resolve(
    explicit: Option<SinkFormat>,
    kind_x: SourceKind,
    kind_h: SourceKind,
) -> SinkFormat {
    if let Some(format) = explicit {
        return format;
    }

    let either = |kind: SourceKind| kind_x == kind || kind_h == kind;

    if either(SourceKind::Audio) {
        SinkFormat::Audio
    } else if either(SourceKind::DelimitedFile) {
        SinkFormat::DelimitedFile
    } else {
        SinkFormat::RawText
    }
}

/// Where rendered output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => f.write_str("<stdout>"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A resolved sink, ready to render one signal
#[derive(Debug, Clone)]
pub struct SinkDescriptor {
    pub destination: Destination,
    pub format: SinkFormat,
    pub precision: u8,
    pub quiet: bool,
}

impl SinkDescriptor {
    /// Create a sink; `output` is used only by formats that write a file
    pub fn new(format: SinkFormat, output: Option<PathBuf>, precision: u8, quiet: bool) -> Self {
        let destination = match (format.writes_file(), output) {
            (true, Some(path)) => Destination::File(path),
            _ => Destination::Stdout,
        };

        SinkDescriptor {
            destination,
            format,
            precision,
            quiet,
        }
    }

    /// Render `signal` to the destination
    ///
    /// # Errors
    /// * `Storage` - If the destination cannot be created or written
    /// * `AudioFormat` - If an audio sink has no format to write with, or
    ///   the encoder fails
    /// * `Argument` - If a file sink has no destination path
    pub fn render(&self, signal: &Signal) -> Result<()> {
        debug!(
            "Rendering {} samples as {} to {}",
            signal.len(),
            self.format,
            self.destination
        );

        let samples = signal.samples();

        match self.format {
            SinkFormat::RawText | SinkFormat::DelimitedText => {
                let stdout = std::io::stdout();
                let mut out = stdout.lock();
                self.render_to(&mut out, signal)
            }
            SinkFormat::ColumnFile => {
                let path = self.file_path()?;
                write_text_file(path, |out| text::write_columns(out, samples, self.precision))?;
                self.report(&format!("Outputted data to '{}'.", path.display()));
                Ok(())
            }
            SinkFormat::DelimitedFile => {
                let path = self.file_path()?;
                write_text_file(path, |out| text::write_delimited(out, samples, self.precision))?;
                self.report(&format!("Outputted data to '{}'.", path.display()));
                Ok(())
            }
            SinkFormat::Audio => {
                let path = self.file_path()?;
                let format = signal.format().ok_or_else(|| ConvError::AudioFormat {
                    reason: "audio output needs at least one audio input to take its format from"
                        .to_string(),
                    source: None,
                })?;
                io::write_audio(path, samples, format)?;
                self.report(&format!("Saved result to '{}'.", path.display()));
                Ok(())
            }
        }
    }

    fn file_path(&self) -> Result<&Path> {
        match &self.destination {
            Destination::File(path) => Ok(path),
            Destination::Stdout => Err(ConvError::Argument {
                reason: format!("output format '{}' needs an output file", self.format),
            }),
        }
    }

    /// Render a standard-output format to `out`
    ///
    /// # Errors
    /// * `Storage` - If writing to `out` fails
    /// * `Argument` - If the format writes a file instead
    pub fn render_to<W: Write + ?Sized>(&self, out: &mut W, signal: &Signal) -> Result<()> {
        let samples = signal.samples();

        let written = match self.format {
            SinkFormat::RawText => self
                .write_leading_line(out)
                .and_then(|_| text::write_columns(out, samples, self.precision)),
            SinkFormat::DelimitedText => self
                .write_leading_line(out)
                .and_then(|_| text::write_delimited(out, samples, self.precision))
                .and_then(|_| writeln!(out)),
            SinkFormat::Audio | SinkFormat::ColumnFile | SinkFormat::DelimitedFile => {
                return Err(ConvError::Argument {
                    reason: format!("output format '{}' writes to a file", self.format),
                });
            }
        };

        written
            .and_then(|_| out.flush())
            .map_err(|e| ConvError::storage(Destination::Stdout.to_string(), e))
    }

    fn write_leading_line<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        if self.quiet {
            Ok(())
        } else {
            writeln!(out)
        }
    }

    fn report(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }
}

/// Create (truncating) `path` and fill it through a buffered writer
fn write_text_file<F>(path: &Path, render: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let storage_err = |e| ConvError::storage(path.display().to_string(), e);

    let file = File::create(path).map_err(storage_err)?;
    let mut out = BufWriter::new(file);
    render(&mut out).map_err(storage_err)?;
    out.flush().map_err(storage_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{AudioFormat, SampleEncoding};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;
    use test_case::test_case;

    use crate::source::SourceKind::{Audio, DelimitedFile, DelimitedString};

    #[test_case(Audio, Audio, SinkFormat::Audio)]
    #[test_case(Audio, DelimitedFile, SinkFormat::Audio)]
    #[test_case(Audio, DelimitedString, SinkFormat::Audio)]
    #[test_case(DelimitedFile, Audio, SinkFormat::Audio)]
    #[test_case(DelimitedFile, DelimitedFile, SinkFormat::DelimitedFile)]
    #[test_case(DelimitedFile, DelimitedString, SinkFormat::DelimitedFile)]
    #[test_case(DelimitedString, Audio, SinkFormat::Audio)]
    #[test_case(DelimitedString, DelimitedFile, SinkFormat::DelimitedFile)]
    #[test_case(DelimitedString, DelimitedString, SinkFormat::RawText)]
    fn test_auto_resolution(kind_x: SourceKind, kind_h: SourceKind, expected: SinkFormat) {
        assert_eq!(resolve(None, kind_x, kind_h), expected);
    }

    #[test]
    fn test_explicit_format_wins() {
        for format in SinkFormat::ALL {
            for kind_x in SourceKind::ALL {
                for kind_h in SourceKind::ALL {
                    assert_eq!(resolve(Some(format), kind_x, kind_h), format);
                }
            }
        }
    }

    #[test]
    fn test_format_names_round_trip() {
        for format in SinkFormat::ALL {
            assert_eq!(format.name().parse::<SinkFormat>().unwrap(), format);
        }
        let err = "wav".parse::<SinkFormat>().unwrap_err();
        assert_eq!(err.error_code(), "ARGUMENT_ERROR");
    }

    #[test]
    fn test_stdout_sinks_ignore_output_path() {
        let sink = SinkDescriptor::new(SinkFormat::RawText, Some("out.txt".into()), 6, true);
        assert_eq!(sink.destination, Destination::Stdout);

        let sink = SinkDescriptor::new(SinkFormat::ColumnFile, Some("out.txt".into()), 6, true);
        assert_eq!(sink.destination, Destination::File("out.txt".into()));
    }

    fn render_stdout(format: SinkFormat, quiet: bool, samples: Vec<f64>) -> String {
        let sink = SinkDescriptor::new(format, None, 2, quiet);
        let mut out = Vec::new();
        sink.render_to(&mut out, &Signal::new(samples)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test_case(SinkFormat::DelimitedText, false, "\n1.50,2.25\n"; "stdout csv with blank line")]
    #[test_case(SinkFormat::DelimitedText, true, "1.50,2.25\n"; "stdout csv quiet")]
    #[test_case(SinkFormat::RawText, false, "\n1.50\n2.25\n"; "stdout with blank line")]
    #[test_case(SinkFormat::RawText, true, "1.50\n2.25\n"; "stdout quiet")]
    fn test_stdout_rendering(format: SinkFormat, quiet: bool, expected: &str) {
        assert_eq!(render_stdout(format, quiet, vec![1.5, 2.25]), expected);
    }

    #[test]
    fn test_file_formats_refuse_writer_rendering() {
        let sink = SinkDescriptor::new(SinkFormat::DelimitedFile, Some("out.csv".into()), 2, true);
        let mut out = Vec::new();

        let err = sink.render_to(&mut out, &Signal::new(vec![1.0])).unwrap_err();
        assert_eq!(err.error_code(), "ARGUMENT_ERROR");
        assert!(out.is_empty());
    }

    #[test]
    fn test_delimited_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let sink = SinkDescriptor::new(SinkFormat::DelimitedFile, Some(path.clone()), 2, true);

        sink.render(&Signal::new(vec![1.5, 2.25])).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1.50,2.25");
    }

    #[test]
    fn test_column_file_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "stale content that is longer than the result\n").unwrap();

        let sink = SinkDescriptor::new(SinkFormat::ColumnFile, Some(path.clone()), 1, true);
        sink.render(&Signal::new(vec![0.3, -3.0])).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "0.3\n-3.0\n");
    }

    #[test]
    fn test_unwritable_destination() {
        let sink = SinkDescriptor::new(
            SinkFormat::DelimitedFile,
            Some("/nonexistent/dir/out.csv".into()),
            6,
            true,
        );
        let err = sink.render(&Signal::new(vec![1.0])).unwrap_err();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_file_sink_without_path() {
        let sink = SinkDescriptor::new(SinkFormat::ColumnFile, None, 6, true);
        let err = sink.render(&Signal::new(vec![1.0])).unwrap_err();
        assert_eq!(err.error_code(), "ARGUMENT_ERROR");
    }

    #[test]
    fn test_audio_sink_requires_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let sink = SinkDescriptor::new(SinkFormat::Audio, Some(path.clone()), 6, true);

        let err = sink.render(&Signal::new(vec![0.5])).unwrap_err();
        assert_eq!(err.error_code(), "AUDIO_FORMAT_ERROR");
        assert!(!path.exists());

        let mut signal = Signal::new(vec![0.5, -0.5]);
        signal.set_format(Some(AudioFormat {
            sample_rate: 22050,
            channels: 1,
            bits_per_sample: 32,
            encoding: SampleEncoding::Float,
        }));
        sink.render(&signal).unwrap();

        let written = io::read_audio(&path).unwrap();
        assert_eq!(written.samples(), &[0.5, -0.5]);
        assert_eq!(written.format().unwrap().sample_rate, 22050);
    }
}

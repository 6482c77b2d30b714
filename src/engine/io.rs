//! Audio file I/O for conv
//!
//! WAV decoding and encoding through `hound`. Samples are exchanged as
//! interleaved `f64` in [-1, 1); integer PCM is scaled by its bit depth on
//! the way in and clamped back to it on the way out.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavWriter};
use log::debug;

use crate::engine::signal::{AudioFormat, SampleEncoding, Signal};
use crate::error::{ConvError, Result};

/// Check whether `reference` opens as an audio stream
///
/// Only the header is parsed; the file is closed again immediately.
pub fn probe_audio(reference: &str) -> bool {
    match WavReader::open(reference) {
        Ok(reader) => {
            debug!("'{}' opened as audio ({:?})", reference, reader.spec());
            true
        }
        Err(_) => false,
    }
}

/// Decode an audio file into an interleaved signal
///
/// # Errors
/// * `Storage` - If the file cannot be opened or read
/// * `AudioFormat` - If the file is not a valid WAV file or uses an
///   unsupported bit depth
pub fn read_audio(path: &Path) -> Result<Signal> {
    let reader = WavReader::open(path).map_err(|e| codec_error(path, "Failed to open", e))?;

    let spec = reader.spec();
    let format = AudioFormat::from(spec);
    let samples = read_samples_as_f64(reader, path, spec.bits_per_sample, spec.sample_format)?;

    debug!(
        "Read {} samples ({} channels, {} Hz) from '{}'",
        samples.len(),
        format.channels,
        format.sample_rate,
        path.display()
    );

    Ok(Signal::from_audio(samples, format))
}

/// Encode `samples` as a WAV file using `format`
///
/// A trailing partial frame is padded with silence so the file always holds
/// a whole number of frames.
pub fn write_audio(path: &Path, samples: &[f64], format: &AudioFormat) -> Result<()> {
    if !format.is_supported() {
        return Err(ConvError::AudioFormat {
            reason: format!(
                "{}-bit {:?} audio is not supported",
                format.bits_per_sample, format.encoding
            ),
            source: None,
        });
    }

    let spec = format.to_wav_spec();
    let channels = spec.channels.max(1) as usize;

    let padding = (channels - samples.len() % channels) % channels;
    let padded = samples
        .iter()
        .copied()
        .chain(std::iter::repeat(0.0).take(padding));

    let mut writer =
        WavWriter::create(path, spec).map_err(|e| codec_error(path, "Failed to create", e))?;

    match (format.encoding, format.bits_per_sample) {
        (SampleEncoding::Int, 8) => {
            for sample in padded {
                let scaled = (sample * 127.0).clamp(-128.0, 127.0) as i8;
                writer
                    .write_sample(scaled)
                    .map_err(|e| codec_error(path, "Failed to write", e))?;
            }
        }
        (SampleEncoding::Int, 16) => {
            for sample in padded {
                let scaled = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
                writer
                    .write_sample(scaled)
                    .map_err(|e| codec_error(path, "Failed to write", e))?;
            }
        }
        (SampleEncoding::Int, 24) => {
            for sample in padded {
                // 24-bit stored as i32 in hound
                let scaled = (sample * 8388607.0).clamp(-8388608.0, 8388607.0) as i32;
                writer
                    .write_sample(scaled)
                    .map_err(|e| codec_error(path, "Failed to write", e))?;
            }
        }
        (SampleEncoding::Int, 32) => {
            for sample in padded {
                let scaled = (sample * 2147483647.0).clamp(-2147483648.0, 2147483647.0) as i32;
                writer
                    .write_sample(scaled)
                    .map_err(|e| codec_error(path, "Failed to write", e))?;
            }
        }
        (SampleEncoding::Float, 32) => {
            for sample in padded {
                writer
                    .write_sample(sample as f32)
                    .map_err(|e| codec_error(path, "Failed to write", e))?;
            }
        }
        (encoding, bits) => {
            return Err(ConvError::AudioFormat {
                reason: format!("{}-bit {:?} audio is not supported", bits, encoding),
                source: None,
            });
        }
    }

    writer
        .finalize()
        .map_err(|e| codec_error(path, "Failed to finalize", e))?;

    debug!(
        "Wrote {} samples ({} padding) to '{}'",
        samples.len() + padding,
        padding,
        path.display()
    );

    Ok(())
}

// ============================================================================
// Internal helper functions
// ============================================================================

/// Map a codec failure, keeping plain I/O failures as storage errors
fn codec_error(path: &Path, action: &str, error: hound::Error) -> ConvError {
    match error {
        hound::Error::IoError(io) => ConvError::storage(path.display().to_string(), io),
        other => ConvError::audio(format!("{} '{}'", action, path.display()), other),
    }
}

/// Read samples from WAV reader and convert to f64
fn read_samples_as_f64<R: std::io::Read>(
    mut reader: WavReader<R>,
    path: &Path,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f64>> {
    let read_err = |e| codec_error(path, "Failed to read samples from", e);

    match sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(read_err),
        SampleFormat::Int => {
            let scale = match bits_per_sample {
                8 => 128.0,
                16 => 32768.0,
                24 => 8388608.0,
                32 => 2147483648.0,
                _ => {
                    return Err(ConvError::AudioFormat {
                        reason: format!("{}-bit integer audio is not supported", bits_per_sample),
                        source: None,
                    })
                }
            };

            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<std::result::Result<Vec<f64>, _>>()
                .map_err(read_err)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Signal type
//!
//! An owned sequence of `f64` samples plus the metadata carried alongside it:
//! an informational channel count and, for audio sources, the WAV format the
//! samples were decoded from.

use hound::{SampleFormat, WavSpec};
use log::warn;

/// Sample encoding of an audio stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEncoding {
    /// Signed integer PCM (8-bit is stored unsigned on disk)
    Int,
    /// IEEE-754 float
    Float,
}

/// Format descriptor of an audio source
///
/// Reused verbatim when the convolution result is written back as audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub encoding: SampleEncoding,
}

impl AudioFormat {
    /// Container name, as shown by `--info`
    pub fn container(&self) -> &'static str {
        "WAV (Microsoft)"
    }

    /// Sample subtype name, as shown by `--info`
    pub fn subtype(&self) -> &'static str {
        match (self.encoding, self.bits_per_sample) {
            (SampleEncoding::Int, 8) => "Unsigned 8 bit PCM",
            (SampleEncoding::Int, 16) => "Signed 16 bit PCM",
            (SampleEncoding::Int, 24) => "Signed 24 bit PCM",
            (SampleEncoding::Int, 32) => "Signed 32 bit PCM",
            (SampleEncoding::Float, 32) => "32 bit float",
            _ => "N/A",
        }
    }

    /// Whether samples in this format can be encoded
    pub fn is_supported(&self) -> bool {
        matches!(
            (self.encoding, self.bits_per_sample),
            (SampleEncoding::Int, 8 | 16 | 24 | 32) | (SampleEncoding::Float, 32)
        )
    }

    pub fn to_wav_spec(&self) -> WavSpec {
        WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: match self.encoding {
                SampleEncoding::Int => SampleFormat::Int,
                SampleEncoding::Float => SampleFormat::Float,
            },
        }
    }
}

impl From<WavSpec> for AudioFormat {
    fn from(spec: WavSpec) -> Self {
        AudioFormat {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
            encoding: match spec.sample_format {
                SampleFormat::Int => SampleEncoding::Int,
                SampleFormat::Float => SampleEncoding::Float,
            },
        }
    }
}

/// Ordered sample sequence with channel and format metadata
///
/// Multi-channel audio stays interleaved; the channel count is carried for
/// reporting and for writing the result back out, never for processing.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    channels: u16,
    format: Option<AudioFormat>,
}

impl Signal {
    /// Create a single-channel signal with no audio format
    pub fn new(samples: Vec<f64>) -> Self {
        Signal {
            samples,
            channels: 1,
            format: None,
        }
    }

    /// Create a signal decoded from an audio stream
    pub fn from_audio(samples: Vec<f64>, format: AudioFormat) -> Self {
        Signal {
            samples,
            channels: format.channels.max(1),
            format: Some(format),
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn set_channels(&mut self, channels: u16) {
        self.channels = channels.max(1);
    }

    /// Number of whole frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn format(&self) -> Option<&AudioFormat> {
        self.format.as_ref()
    }

    pub fn set_format(&mut self, format: Option<AudioFormat>) {
        self.format = format;
    }

    /// Largest absolute sample value, 0.0 for an empty signal
    pub fn peak(&self) -> f64 {
        self.samples.iter().map(|s| s.abs()).fold(0.0_f64, f64::max)
    }

    /// Scale every sample by the reciprocal of the peak magnitude
    ///
    /// A signal whose peak is zero is left untouched. Returns whether any
    /// scaling was applied.
    pub fn normalize(&mut self) -> bool {
        let peak = self.peak();
        if peak == 0.0 {
            warn!(
                "Signal of {} samples has a zero peak, skipping normalisation",
                self.samples.len()
            );
            return false;
        }

        let scale = 1.0 / peak;
        for sample in self.samples.iter_mut() {
            *sample *= scale;
        }

        true
    }
}

//! Signal Engine Module
//!
//! Core numeric pipeline:
//! - Signal type and peak normalisation
//! - Direct-form linear convolution
//! - WAV file I/O

pub mod convolution;
pub mod io;
pub mod signal;

pub use convolution::{convolve, convolve_into, convolve_signals, output_len};
pub use io::{probe_audio, read_audio, write_audio};
pub use signal::{AudioFormat, SampleEncoding, Signal};

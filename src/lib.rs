//! conv - Linear Convolution Tool
//!
//! Convolves two signals read from heterogeneous sources and writes the
//! result to a selectable sink.
//!
//! # Architecture
//!
//! The run is a strictly sequential pipeline:
//! - Source: classify each input reference (audio file, CSV file, CSV
//!   string) and read it into a [`Signal`]
//! - Engine: direct-form linear convolution, optional peak normalisation
//! - Sink: pick an output format (explicit, or from the input kinds) and
//!   render the result to stdout or a file

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod sink;
pub mod source;

pub use config::{ConvConfig, Limits};
pub use engine::{convolve, AudioFormat, Signal};
pub use error::{ConvError, Result};
pub use sink::{SinkDescriptor, SinkFormat};
pub use source::{SourceDescriptor, SourceKind};

//! Synthesis of smooth, random complex calibration gains.
//!
//! Random complex gains are drawn over an (antenna, spectral window,
//! frequency, time, polarization) grid, low-pass filtered along frequency and
//! boxcar smoothed along time. The result is packaged into a calibration file
//! for downstream pipelines to consume.

pub mod calfile;
pub mod constants;
pub mod error;
pub mod pipeline;
pub mod smoother;
pub mod types;
pub mod validate;

pub use calfile::{CalibrationAttributes, CalibrationFile};
pub use error::{
    ComputationError, ConfigurationError, RangeError, SynthesisError, SynthesisResult, WriteError,
};
pub use pipeline::{Synthesis, synthesize};
pub use smoother::Smoother;
pub use validate::{ResolvedWindow, SynthesisParams, ValidatedParams, WindowSpec};

//! Error types for gain synthesis

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::constants::Float;

/// Result type for the synthesis pipeline
pub type SynthesisResult<T> = Result<T, SynthesisError>;

/// Missing, conflicting or malformed parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("both a sample count and a duration were given for the smoothing window; pick one")]
    ConflictingWindow,

    #[error("no smoothing window given (need a sample count or a duration)")]
    MissingWindow,

    #[error("no low-pass cutoff frequency given")]
    MissingCutoff,

    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: Float },

    #[error("invalid dimension context: {0}")]
    InvalidContext(String),
}

/// Parameters outside the domain covered by the dataset
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    #[error("window of {size} samples is too big (must be <= {timestep_count}, the number of times)")]
    WindowTooBig { size: usize, timestep_count: usize },

    #[error("window of {size} samples is too small (must be >= 2)")]
    WindowTooSmall { size: usize },

    #[error("cutoff {cutoff} Hz is too small (must be between {min} and {max})")]
    CutoffTooSmall { cutoff: Float, min: Float, max: Float },

    #[error("cutoff {cutoff} Hz is too big (must be between {min} and {max})")]
    CutoffTooBig { cutoff: Float, min: Float, max: Float },
}

/// A transform stage produced a value that is not finite
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationError {
    #[error("{stage} produced a non-finite gain at index {index:?}")]
    NonFinite {
        stage: &'static str,
        index: (usize, usize, usize, usize, usize),
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthesisError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Computation(#[from] ComputationError),
}

/// Failure persisting a calibration file
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("cannot write to '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write npz archive '{path}': {source}")]
    Npz {
        path: PathBuf,
        #[source]
        source: ndarray_npy::WriteNpzError,
    },
}

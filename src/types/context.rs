use ndarray::prelude::*;

use crate::{
    constants::Float,
    error::ConfigurationError,
    types::{FrequencyArray, TimeArray},
};

/// Shape and axes of the dataset the gains are synthesized for.
///
/// Frequencies are in hertz, times and the integration time in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionContext {
    antenna_count: usize,
    spw_count: usize,
    frequencies: FrequencyArray,
    times: TimeArray,
    integration_time: Float,
    polarizations: Array1<i64>,
}

impl DimensionContext {
    pub fn new(
        antenna_count: usize,
        spw_count: usize,
        frequencies: FrequencyArray,
        times: TimeArray,
        integration_time: Float,
        polarizations: Array1<i64>,
    ) -> Result<Self, ConfigurationError> {
        let invalid = |msg: String| Err(ConfigurationError::InvalidContext(msg));

        if antenna_count == 0 {
            return invalid("antenna count must be positive".into());
        }
        if spw_count == 0 {
            return invalid("spectral window count must be positive".into());
        }
        if polarizations.is_empty() {
            return invalid("at least one polarization is required".into());
        }
        if frequencies.is_empty() {
            return invalid("frequency axis is empty".into());
        }
        if times.is_empty() {
            return invalid("time axis is empty".into());
        }
        if frequencies.iter().any(|f| !f.is_finite()) {
            return invalid("frequency axis contains non-finite values".into());
        }
        if times.iter().any(|t| !t.is_finite()) {
            return invalid("time axis contains non-finite values".into());
        }
        if let Some(i) = first_violation(&frequencies, |a, b| a <= b) {
            return invalid(format!("frequency axis decreases at channel {i}"));
        }
        if let Some(i) = first_violation(&times, |a, b| a < b) {
            return invalid(format!("time axis is not strictly ascending at sample {i}"));
        }
        if !(integration_time.is_finite() && integration_time > 0.0) {
            return invalid(format!(
                "integration time must be positive, got {integration_time}"
            ));
        }

        Ok(Self {
            antenna_count,
            spw_count,
            frequencies,
            times,
            integration_time,
            polarizations,
        })
    }

    pub fn antenna_count(&self) -> usize {
        self.antenna_count
    }

    pub fn spw_count(&self) -> usize {
        self.spw_count
    }

    pub fn channel_count(&self) -> usize {
        self.frequencies.len()
    }

    pub fn timestep_count(&self) -> usize {
        self.times.len()
    }

    pub fn jones_count(&self) -> usize {
        self.polarizations.len()
    }

    /// Gain tensor shape: (antenna, spw, frequency, time, polarization)
    pub fn shape(&self) -> (usize, usize, usize, usize, usize) {
        (
            self.antenna_count,
            self.spw_count,
            self.channel_count(),
            self.timestep_count(),
            self.jones_count(),
        )
    }

    pub fn frequencies(&self) -> &FrequencyArray {
        &self.frequencies
    }

    pub fn times(&self) -> &TimeArray {
        &self.times
    }

    pub fn integration_time(&self) -> Float {
        self.integration_time
    }

    pub fn polarizations(&self) -> &Array1<i64> {
        &self.polarizations
    }

    pub fn antennas(&self) -> Array1<i64> {
        Array::from_iter(0..self.antenna_count as i64)
    }

    /// Time span covered by the data, padded by half an integration on
    /// either side.
    pub fn time_range(&self) -> [Float; 2] {
        let half = self.integration_time / 2.0;
        // Non-empty and ascending, checked in `new`.
        [self.times[0] - half, self.times[self.times.len() - 1] + half]
    }
}

fn first_violation(axis: &Array1<Float>, ordered: impl Fn(Float, Float) -> bool) -> Option<usize> {
    axis.windows(2)
        .into_iter()
        .position(|pair| !ordered(pair[0], pair[1]))
        .map(|i| i + 1)
}

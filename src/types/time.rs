use std::path::Path;

use ndarray::prelude::*;

use crate::constants::Float;

/// Sample timestamps in seconds.
pub type TimeArray = Array1<Float>;

pub trait TimeArrayExtension {
    fn integrations(start_time: Float, integration_time: Float, timestep_count: u32) -> Self;
    fn read_times(path: &Path) -> Result<Self, ndarray_npy::ReadNpyError>
    where
        Self: Sized;
    fn unique(&self) -> Self;
    fn nearest_index(&self, target: Float) -> usize;
    fn samples_in(&self, duration: Float) -> usize;
}

impl TimeArrayExtension for TimeArray {
    /// Generate evenly spaced timestamps, one per integration.
    fn integrations(start_time: Float, integration_time: Float, timestep_count: u32) -> Self {
        Array::from_shape_fn(timestep_count as usize, |t| {
            start_time + t as Float * integration_time
        })
    }

    /// Read raw timestamps from npy file. Visibility data repeats each
    /// timestamp once per baseline, so callers usually want [`unique`] next.
    ///
    /// [`unique`]: TimeArrayExtension::unique
    fn read_times(path: &Path) -> Result<Self, ndarray_npy::ReadNpyError>
    where
        Self: Sized,
    {
        ndarray_npy::read_npy(path)
    }

    /// Sorted timestamps with duplicates removed.
    fn unique(&self) -> Self {
        let mut times = self.to_vec();
        times.sort_by(|a, b| a.total_cmp(b));
        times.dedup();
        Array::from(times)
    }

    /// Index of the timestamp closest to `target`. Ties go to the lower index.
    fn nearest_index(&self, target: Float) -> usize {
        let mut best = (0, Float::INFINITY);
        for (index, time) in self.iter().enumerate() {
            let distance = (time - target).abs();
            if distance < best.1 {
                best = (index, distance);
            }
        }
        best.0
    }

    /// Number of samples from the first timestamp up to and including the one
    /// nearest to `first + duration`.
    fn samples_in(&self, duration: Float) -> usize {
        let first = self.fold(Float::INFINITY, |acc, &t| acc.min(t));
        self.nearest_index(first + duration) + 1
    }
}

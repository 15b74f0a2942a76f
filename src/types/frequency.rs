use std::path::Path;

use ndarray::prelude::*;

use crate::{constants::Float, error::RangeError};

pub type FrequencyArray = Array1<Float>;

pub trait FrequencyArrayExtension {
    fn channels(start_frequency: Float, frequency_increment: Float, channel_count: u32) -> Self;
    fn read_frequencies(path: &Path) -> Result<Self, ndarray_npy::ReadNpyError>
    where
        Self: Sized;
    fn cutoff_index(&self, cutoff: Float) -> Result<usize, RangeError>;
}

impl FrequencyArrayExtension for FrequencyArray {
    /// Generate array of frequencies for each channel.
    ///
    /// Returns frequencies array, shape (`channel_count`)
    fn channels(start_frequency: Float, frequency_increment: Float, channel_count: u32) -> Self {
        Array::from_shape_fn(channel_count as usize, |channel| {
            start_frequency + channel as Float * frequency_increment
        })
    }

    /// Read frequency data from npy file
    ///
    /// ## Parameters
    /// - `path`: Path to the npy file
    ///
    ///  Returns a frequency array, shape (`channel_count`)
    fn read_frequencies(path: &Path) -> Result<Self, ndarray_npy::ReadNpyError>
    where
        Self: Sized,
    {
        ndarray_npy::read_npy(path)
    }

    /// Index of the first channel whose frequency is at or above `cutoff`.
    ///
    /// Channels strictly below the cutoff are never selected, so a cutoff
    /// equal to the first channel frequency gives index 0.
    fn cutoff_index(&self, cutoff: Float) -> Result<usize, RangeError> {
        let min = self.fold(Float::INFINITY, |acc, &f| acc.min(f));
        let max = self.fold(Float::NEG_INFINITY, |acc, &f| acc.max(f));

        if cutoff < min {
            return Err(RangeError::CutoffTooSmall { cutoff, min, max });
        }

        self.iter()
            .position(|&frequency| frequency >= cutoff)
            .ok_or(RangeError::CutoffTooBig { cutoff, min, max })
    }
}

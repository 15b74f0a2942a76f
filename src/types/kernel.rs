use std::ops::Range;

use ndarray::prelude::*;

use crate::constants::Float;

/// Normalized moving-average window over the time axis.
pub type BoxcarKernel = Array1<Float>;

pub trait BoxcarKernelExtension {
    fn boxcar(size: usize, timestep_count: usize) -> Self;
}

impl BoxcarKernelExtension for BoxcarKernel {
    /// A length-`timestep_count` kernel that is `1 / size` over the centered
    /// [`boxcar_span`] and zero elsewhere.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= size <= timestep_count`. Window sizes coming out of
    /// [`SynthesisParams::validate`](crate::SynthesisParams::validate) always
    /// satisfy this.
    fn boxcar(size: usize, timestep_count: usize) -> Self {
        assert!(
            (1..=timestep_count).contains(&size),
            "boxcar of {size} samples does not fit in {timestep_count} times"
        );

        let mut kernel = Array1::zeros(timestep_count);
        kernel
            .slice_mut(s![boxcar_span(size, timestep_count)])
            .fill(1.0 / size as Float);
        kernel
    }
}

/// Indices covered by a boxcar of `size` samples centered in
/// `timestep_count` samples. Odd sizes get the extra sample above center.
pub fn boxcar_span(size: usize, timestep_count: usize) -> Range<usize> {
    let center = timestep_count / 2;
    let radius = size / 2;
    let parity = size & 1;
    center - radius..center + radius + parity
}

use std::sync::Arc;

use ndarray::{Zip, prelude::*};
use num_traits::Zero;
use rustfft::{Fft, FftPlanner};

use crate::{
    constants::{Complex, Float},
    error::ComputationError,
    types::{BoxcarKernel, GainArray, GainArrayExtension},
};

const FREQUENCY_AXIS: Axis = Axis(2);
const TIME_AXIS: Axis = Axis(3);

/// FFT-based low-pass filter along frequency and boxcar smoother along time.
///
/// Plans and the kernel spectrum are built once and shared by every lane, so
/// a single `Smoother` can process all (antenna, spw, polarization) slices in
/// parallel.
pub struct Smoother {
    channel_count: usize,
    timestep_count: usize,
    padded_length: usize,
    channel_forward: Arc<dyn Fft<Float>>,
    channel_inverse: Arc<dyn Fft<Float>>,
    time_forward: Arc<dyn Fft<Float>>,
    time_inverse: Arc<dyn Fft<Float>>,
    kernel_spectrum: Vec<Complex>,
}

impl Smoother {
    /// # Panics
    ///
    /// Panics if `kernel` is empty; its length sets the time axis length.
    pub fn new(channel_count: usize, kernel: &BoxcarKernel) -> Self {
        assert!(!kernel.is_empty(), "boxcar kernel must cover at least one time");
        let timestep_count = kernel.len();
        // Long enough that the linear convolution of two length-`timestep_count`
        // sequences does not wrap around.
        let padded_length = 2 * timestep_count - 1;

        let mut planner = FftPlanner::<Float>::new();
        let channel_forward = planner.plan_fft_forward(channel_count);
        let channel_inverse = planner.plan_fft_inverse(channel_count);
        let time_forward = planner.plan_fft_forward(padded_length);
        let time_inverse = planner.plan_fft_inverse(padded_length);

        let mut kernel_spectrum = vec![Complex::zero(); padded_length];
        for (dst, src) in kernel_spectrum.iter_mut().zip(kernel.iter()) {
            *dst = Complex::new(*src, 0.0);
        }
        time_forward.process(&mut kernel_spectrum);

        Self {
            channel_count,
            timestep_count,
            padded_length,
            channel_forward,
            channel_inverse,
            time_forward,
            time_inverse,
            kernel_spectrum,
        }
    }

    pub fn padded_length(&self) -> usize {
        self.padded_length
    }

    /// Zero every frequency-domain coefficient from `f0index` up, for each
    /// (antenna, spw, time, polarization) lane.
    pub fn low_pass(&self, gains: &mut GainArray, f0index: usize) -> Result<(), ComputationError> {
        assert_eq!(self.channel_count, gains.len_of(FREQUENCY_AXIS));

        Zip::from(gains.lanes_mut(FREQUENCY_AXIS))
            .par_for_each(|lane| self.low_pass_lane(lane, f0index));

        check_finite(gains, "low-pass filter")
    }

    /// Convolve each (antenna, spw, frequency, polarization) lane with the
    /// boxcar kernel.
    pub fn smooth(&self, gains: &mut GainArray) -> Result<(), ComputationError> {
        assert_eq!(self.timestep_count, gains.len_of(TIME_AXIS));

        Zip::from(gains.lanes_mut(TIME_AXIS)).par_for_each(|lane| self.smooth_lane(lane));

        check_finite(gains, "boxcar smoothing")
    }

    pub fn low_pass_lane(&self, mut lane: ArrayViewMut1<Complex>, f0index: usize) {
        assert_eq!(self.channel_count, lane.len());

        let mut buffer = lane.to_vec();
        self.channel_forward.process(&mut buffer);
        let cut = f0index.min(buffer.len());
        buffer[cut..].fill(Complex::zero());
        self.channel_inverse.process(&mut buffer);

        let norm = 1.0 / self.channel_count as Float;
        for (dst, src) in lane.iter_mut().zip(buffer.iter()) {
            *dst = *src * norm;
        }
    }

    pub fn smooth_lane(&self, mut lane: ArrayViewMut1<Complex>) {
        assert_eq!(self.timestep_count, lane.len());

        let mut buffer = vec![Complex::zero(); self.padded_length];
        for (dst, src) in buffer.iter_mut().zip(lane.iter()) {
            *dst = *src;
        }

        self.time_forward.process(&mut buffer);
        for (value, weight) in buffer.iter_mut().zip(self.kernel_spectrum.iter()) {
            *value *= *weight;
        }
        self.time_inverse.process(&mut buffer);

        // Centered window of the full convolution
        let offset = self.padded_length / 2 - self.timestep_count / 2;
        let norm = 1.0 / self.padded_length as Float;
        for (dst, src) in lane.iter_mut().zip(buffer[offset..].iter()) {
            *dst = *src * norm;
        }
    }
}

fn check_finite(gains: &GainArray, stage: &'static str) -> Result<(), ComputationError> {
    match gains.first_non_finite() {
        None => Ok(()),
        Some(index) => Err(ComputationError::NonFinite { stage, index }),
    }
}

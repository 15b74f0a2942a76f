use ndarray::{Zip, prelude::*};
use ndarray_rand::{RandomExt, rand::Rng, rand_distr::Uniform};

use crate::constants::{Complex, Float, MAX_BOUND_RANGE};

/// Complex gains, shape (antenna, spw, frequency, time, polarization)
pub type GainArray = Array5<Complex>;

/// Range the real and imaginary parts of the initial gains are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GainBounds {
    pub min: u32,
    pub max: u32,
}

impl GainBounds {
    /// Draw the upper bound first, then a lower bound strictly below it.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let max = rng.gen_range(MAX_BOUND_RANGE);
        let min = rng.gen_range(0..max - 1);
        Self { min, max }
    }
}

pub trait GainArrayExtension {
    fn draw<R: Rng + ?Sized>(
        shape: (usize, usize, usize, usize, usize),
        bounds: GainBounds,
        rng: &mut R,
    ) -> Self;
    fn first_non_finite(&self) -> Option<(usize, usize, usize, usize, usize)>;
}

impl GainArrayExtension for GainArray {
    /// Unfiltered gains with real and imaginary parts independently uniform
    /// on `[bounds.min, bounds.max)`.
    fn draw<R: Rng + ?Sized>(
        shape: (usize, usize, usize, usize, usize),
        bounds: GainBounds,
        rng: &mut R,
    ) -> Self {
        let distribution = Uniform::new(bounds.min as Float, bounds.max as Float);
        let real: Array5<Float> = Array5::random_using(shape, &distribution, rng);
        let imag: Array5<Float> = Array5::random_using(shape, &distribution, rng);

        Zip::from(&real)
            .and(&imag)
            .map_collect(|&re, &im| Complex::new(re, im))
    }

    fn first_non_finite(&self) -> Option<(usize, usize, usize, usize, usize)> {
        self.indexed_iter()
            .find(|(_, gain)| !gain.is_finite())
            .map(|(index, _)| index)
    }
}

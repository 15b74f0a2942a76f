use log::{debug, info};
use ndarray_rand::rand::Rng;

use crate::{
    error::SynthesisResult,
    smoother::Smoother,
    types::{
        BoxcarKernel, BoxcarKernelExtension, DimensionContext, GainArray, GainArrayExtension,
        GainBounds,
    },
    validate::{SynthesisParams, ValidatedParams},
};

/// Output of a successful synthesis run.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub gains: GainArray,
    pub bounds: GainBounds,
    pub params: ValidatedParams,
}

/// Draw random gains for `context` and smooth them along frequency and time.
///
/// Parameters are validated before anything is drawn, and the first error
/// aborts the run without returning partial gains.
pub fn synthesize<R: Rng + ?Sized>(
    context: &DimensionContext,
    params: &SynthesisParams,
    rng: &mut R,
) -> SynthesisResult<Synthesis> {
    let validated = params.validate(context)?;
    debug!(
        "window of {} samples, zeroing channels from {}",
        validated.window_size, validated.f0index
    );

    let bounds = GainBounds::draw(rng);
    info!("min value: {}", bounds.min);
    info!("max value: {}", bounds.max);
    let mut gains = GainArray::draw(context.shape(), bounds, rng);

    let kernel = BoxcarKernel::boxcar(validated.window_size, context.timestep_count());
    let smoother = Smoother::new(context.channel_count(), &kernel);

    smoother.low_pass(&mut gains, validated.f0index)?;
    smoother.smooth(&mut gains)?;

    Ok(Synthesis {
        gains,
        bounds,
        params: validated,
    })
}

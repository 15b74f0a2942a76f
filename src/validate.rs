use log::{info, warn};

use crate::{
    constants::Float,
    error::{ConfigurationError, RangeError, SynthesisResult},
    types::{DimensionContext, FrequencyArrayExtension, TimeArrayExtension},
};

/// Smoothing and filtering parameters as supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SynthesisParams {
    /// Boxcar width in integrations
    pub samples: Option<usize>,
    /// Boxcar width in seconds
    pub duration: Option<Float>,
    /// Low-pass cutoff frequency in hertz
    pub cutoff: Option<Float>,
}

/// How the boxcar width was requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowSpec {
    Samples(usize),
    Duration(Float),
}

impl WindowSpec {
    pub fn from_options(
        samples: Option<usize>,
        duration: Option<Float>,
    ) -> Result<Self, ConfigurationError> {
        match (samples, duration) {
            (Some(_), Some(_)) => Err(ConfigurationError::ConflictingWindow),
            (None, None) => Err(ConfigurationError::MissingWindow),
            (Some(samples), None) => Ok(Self::Samples(samples)),
            (None, Some(duration)) => {
                positive("duration", duration)?;
                Ok(Self::Duration(duration))
            }
        }
    }

    /// Window width in samples, checked against the time axis.
    pub fn resolve(self, context: &DimensionContext) -> Result<ResolvedWindow, RangeError> {
        let timestep_count = context.timestep_count();
        let mut overruns = false;

        let size = match self {
            Self::Samples(size) => {
                if size > timestep_count {
                    return Err(RangeError::WindowTooBig {
                        size,
                        timestep_count,
                    });
                }
                size
            }
            Self::Duration(duration) => {
                let times = context.times();
                let end = times[0] + duration;
                let upper = context.time_range()[1];
                if end > upper {
                    overruns = true;
                    warn!(
                        "boxcar duration of {duration} s runs past the end of the data \
                         ({end} > {upper}); clamping to the last integration"
                    );
                }
                let size = times.samples_in(duration);
                info!("boxcar size: {size} integrations");
                size
            }
        };

        if size < 2 {
            return Err(RangeError::WindowTooSmall { size });
        }
        Ok(ResolvedWindow { size, overruns })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWindow {
    pub size: usize,
    /// The requested duration reached past the last integration and the
    /// window was clamped to the data.
    pub overruns: bool,
}

/// Parameters resolved against a [`DimensionContext`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedParams {
    pub window_size: usize,
    pub f0index: usize,
    pub window_overruns: bool,
}

impl SynthesisParams {
    /// Resolve the boxcar width and the first channel to zero out.
    ///
    /// Every check happens here, before any gains are drawn or transformed.
    pub fn validate(&self, context: &DimensionContext) -> SynthesisResult<ValidatedParams> {
        let window = WindowSpec::from_options(self.samples, self.duration)?;
        let cutoff = self.cutoff.ok_or(ConfigurationError::MissingCutoff)?;
        positive("cutoff", cutoff)?;

        let window = window.resolve(context)?;
        let f0index = context.frequencies().cutoff_index(cutoff)?;

        Ok(ValidatedParams {
            window_size: window.size,
            f0index,
            window_overruns: window.overruns,
        })
    }
}

fn positive(name: &'static str, value: Float) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NotPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use ndarray::prelude::*;

    use super::*;
    use crate::{
        constants::POL_XX,
        error::SynthesisError,
        types::{FrequencyArray, TimeArray},
    };

    /// Ten one-second integrations, channels at 10, 20, ..., 80 Hz.
    fn context() -> DimensionContext {
        DimensionContext::new(
            2,
            1,
            FrequencyArray::channels(10.0, 10.0, 8),
            TimeArray::integrations(0.0, 1.0, 10),
            1.0,
            array![POL_XX],
        )
        .unwrap()
    }

    fn params(samples: Option<usize>, duration: Option<Float>, cutoff: Option<Float>) -> SynthesisParams {
        SynthesisParams {
            samples,
            duration,
            cutoff,
        }
    }

    #[test]
    fn duration_resolves_to_inclusive_sample_count() {
        let validated = params(None, Some(3.0), Some(45.0))
            .validate(&context())
            .unwrap();
        assert_eq!(
            validated,
            ValidatedParams {
                window_size: 4,
                f0index: 4,
                window_overruns: false,
            }
        );
    }

    #[test]
    fn explicit_samples_pass_through() {
        let validated = params(Some(7), None, Some(10.0))
            .validate(&context())
            .unwrap();
        assert_eq!(validated.window_size, 7);
        assert_eq!(validated.f0index, 0);
    }

    #[test]
    fn window_may_span_all_times() {
        let validated = params(Some(10), None, Some(80.0))
            .validate(&context())
            .unwrap();
        assert_eq!(validated.window_size, 10);
        assert_eq!(validated.f0index, 7);
        assert!(!validated.window_overruns);
    }

    #[test]
    fn long_duration_is_clamped_not_rejected() {
        let validated = params(None, Some(1e4), Some(30.0))
            .validate(&context())
            .unwrap();
        assert_eq!(validated.window_size, 10);
        assert!(validated.window_overruns);
    }

    #[test]
    fn duration_reaching_the_padded_edge_does_not_overrun() {
        // Data ends at 9 s plus half an integration
        let exact = WindowSpec::Duration(9.5).resolve(&context()).unwrap();
        assert_eq!(exact, ResolvedWindow { size: 10, overruns: false });

        let past = WindowSpec::Duration(9.6).resolve(&context()).unwrap();
        assert_eq!(past, ResolvedWindow { size: 10, overruns: true });
    }

    #[test]
    fn sample_windows_never_overrun() {
        let window = WindowSpec::Samples(10).resolve(&context()).unwrap();
        assert!(!window.overruns);
    }

    #[test]
    fn both_window_forms_is_a_configuration_error() {
        assert_eq!(
            params(Some(3), Some(3.0), Some(45.0)).validate(&context()),
            Err(SynthesisError::Configuration(
                ConfigurationError::ConflictingWindow
            ))
        );
    }

    #[test]
    fn no_window_is_a_configuration_error() {
        assert_eq!(
            params(None, None, Some(45.0)).validate(&context()),
            Err(SynthesisError::Configuration(
                ConfigurationError::MissingWindow
            ))
        );
    }

    #[test]
    fn missing_cutoff_is_a_configuration_error() {
        assert_eq!(
            params(Some(3), None, None).validate(&context()),
            Err(SynthesisError::Configuration(
                ConfigurationError::MissingCutoff
            ))
        );
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        assert!(matches!(
            params(None, Some(-1.0), Some(45.0)).validate(&context()),
            Err(SynthesisError::Configuration(
                ConfigurationError::NotPositive { name: "duration", .. }
            ))
        ));
        assert!(matches!(
            params(None, Some(Float::NAN), Some(45.0)).validate(&context()),
            Err(SynthesisError::Configuration(_))
        ));
    }

    #[test]
    fn window_larger_than_data_is_a_range_error() {
        assert_eq!(
            params(Some(11), None, Some(45.0)).validate(&context()),
            Err(SynthesisError::Range(RangeError::WindowTooBig {
                size: 11,
                timestep_count: 10
            }))
        );
    }

    #[test]
    fn single_sample_window_is_a_range_error() {
        assert_eq!(
            params(Some(1), None, Some(45.0)).validate(&context()),
            Err(SynthesisError::Range(RangeError::WindowTooSmall { size: 1 }))
        );
        // 0.4 s is nearest to the first sample
        assert_eq!(
            params(None, Some(0.4), Some(45.0)).validate(&context()),
            Err(SynthesisError::Range(RangeError::WindowTooSmall { size: 1 }))
        );
    }

    #[test]
    fn cutoff_outside_band_is_a_range_error() {
        assert!(matches!(
            params(Some(3), None, Some(5.0)).validate(&context()),
            Err(SynthesisError::Range(RangeError::CutoffTooSmall { .. }))
        ));
        assert!(matches!(
            params(Some(3), None, Some(85.0)).validate(&context()),
            Err(SynthesisError::Range(RangeError::CutoffTooBig { .. }))
        ));
    }

    #[test]
    fn configuration_errors_win_over_range_errors() {
        assert_eq!(
            params(Some(100), Some(3.0), Some(1e9)).validate(&context()),
            Err(SynthesisError::Configuration(
                ConfigurationError::ConflictingWindow
            ))
        );
    }
}

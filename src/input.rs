use std::path::PathBuf;

use anyhow::{Context, Result};
use ndarray::prelude::*;

use mkgains::{
    SynthesisParams,
    constants::{Float, SECONDS_PER_DAY},
    types::*,
};

use crate::{
    cli::{Cli, Commands},
    util::{print_header, print_param, time_function},
};

const DEFAULT_OUTPUT_BASE: &str = "mkgains";

pub struct Input {
    pub context: DimensionContext,
    pub params: SynthesisParams,
    pub output_base: PathBuf,
}

impl Input {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let synthesis = cli.command.synthesis();
        let params = SynthesisParams {
            samples: synthesis.samples,
            duration: synthesis.duration,
            cutoff: synthesis.cutoff,
        };

        match &cli.command {
            Commands::Generate {
                antenna_count,
                spw_count,
                channel_count,
                start_frequency,
                frequency_increment,
                timestep_count,
                start_time,
                integration_time,
                polarizations,
                ..
            } => {
                print_header!("GENERATING AXES");

                let frequencies: FrequencyArray = time_function!(
                    "generate frequencies",
                    FrequencyArray::channels(*start_frequency, *frequency_increment, *channel_count)
                );
                let times: TimeArray = time_function!(
                    "generate times",
                    TimeArray::integrations(*start_time, *integration_time, *timestep_count)
                );

                let context = DimensionContext::new(
                    *antenna_count,
                    *spw_count,
                    frequencies,
                    times,
                    *integration_time,
                    Array::from(polarizations.clone()),
                )?;

                Ok(Self {
                    context,
                    params,
                    output_base: synthesis
                        .output
                        .clone()
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_BASE)),
                })
            }
            Commands::Load {
                data_dir,
                frequencies_file,
                times_file,
                julian_days,
                antenna_count,
                spw_count,
                integration_time,
                polarizations,
                ..
            } => {
                print_header!("READING AXES");

                let data_dir = data_dir.clone().unwrap_or(std::env::current_dir()?);
                let data_dir = std::fs::canonicalize(&data_dir)
                    .with_context(|| format!("cannot access '{}'", data_dir.display()))?;

                let frequencies_path = data_dir.join(frequencies_file);
                let frequencies: FrequencyArray = time_function!(
                    "load frequencies",
                    FrequencyArray::read_frequencies(&frequencies_path).with_context(|| format!(
                        "failed to read frequencies from '{}'",
                        frequencies_path.display()
                    ))?
                );

                let times_path = data_dir.join(times_file);
                let raw_times: TimeArray = time_function!(
                    "load times",
                    TimeArray::read_times(&times_path).with_context(|| format!(
                        "failed to read times from '{}'",
                        times_path.display()
                    ))?
                );
                let mut times = raw_times.unique();
                if *julian_days {
                    times *= SECONDS_PER_DAY;
                }

                let integration_time = integration_time.unwrap_or_else(|| default_integration(&times));

                let context = DimensionContext::new(
                    *antenna_count,
                    *spw_count,
                    frequencies,
                    times,
                    integration_time,
                    Array::from(polarizations.clone()),
                )?;

                Ok(Self {
                    context,
                    params,
                    output_base: synthesis.output.clone().unwrap_or(data_dir),
                })
            }
        }
    }

    pub fn print_parameters(&self) {
        print_header!("PARAMETERS");

        let ctx = &self.context;
        print_param!("nr_antennas", ctx.antenna_count());
        print_param!("nr_spws", ctx.spw_count());
        print_param!("nr_channels", ctx.channel_count());
        print_param!("nr_timesteps", ctx.timestep_count());
        print_param!("nr_jones", ctx.jones_count());
        print_param!("start_frequency", ctx.frequencies()[0] * 1e-6);
        print_param!("end_frequency", ctx.frequencies()[ctx.channel_count() - 1] * 1e-6);
        print_param!("integration_time", ctx.integration_time());
        print_param!("polarizations", ctx.polarizations());
        if let Some(samples) = self.params.samples {
            print_param!("boxcar_samples", samples);
        }
        if let Some(duration) = self.params.duration {
            print_param!("boxcar_duration", duration);
        }
        if let Some(cutoff) = self.params.cutoff {
            print_param!("cutoff_frequency", cutoff * 1e-6);
        }
    }
}

/// Spacing of the first two unique times, or one second for a single time.
fn default_integration(times: &TimeArray) -> Float {
    match times.len() {
        0 | 1 => 1.0,
        _ => times[1] - times[0],
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mkgains::constants::{Float, POL_XX, POL_YY};

/// Command-line options
#[derive(Parser)]
#[command(
    version,
    about,
    long_about = Some("mkgains creates fake, smoothly varying calibration gains")
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Random seed for RNG
    #[arg(long, global = true)]
    pub random_seed: Option<u64>,

    /// Also write the bare gain tensor as a numpy file
    #[arg(long, global = true, value_name = "OUTPUT_PATH")]
    pub numpy_output: Option<PathBuf>,
}

/// Smoothing options shared by every input mode
#[derive(Args)]
pub struct SynthesisArgs {
    /// Width of the boxcar in integrations
    #[arg(long)]
    pub samples: Option<usize>,

    /// Width of the boxcar in seconds
    #[arg(long)]
    pub duration: Option<Float>,

    /// Lowest frequency in hertz to zero out in the low-pass filter
    #[arg(long)]
    pub cutoff: Option<Float>,

    /// Base path of the calibration file, `.cal.npz` is appended
    #[arg(long, value_name = "OUTPUT_BASE")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synthesize gains for a generated set of axes
    Generate {
        /// Number of antennas
        #[arg(long, default_value = "8")]
        antenna_count: usize,

        /// Number of spectral windows
        #[arg(long, default_value = "1")]
        spw_count: usize,

        /// Number of frequency channels
        #[arg(long, default_value = "64")]
        channel_count: u32,

        /// Starting frequency in hertz
        #[arg(long, default_value = "100e6")]
        start_frequency: Float,

        /// Frequency increment in hertz
        #[arg(long, default_value = "1e6")]
        frequency_increment: Float,

        /// Number of integrations
        #[arg(long, default_value = "60")]
        timestep_count: u32,

        /// Time of the first integration in seconds
        #[arg(long, default_value = "0.0")]
        start_time: Float,

        /// Length of one integration in seconds
        #[arg(long, default_value = "10.0")]
        integration_time: Float,

        /// Polarization codes, comma separated
        #[arg(
            long,
            value_delimiter = ',',
            allow_negative_numbers = true,
            default_values_t = [POL_XX, POL_YY]
        )]
        polarizations: Vec<i64>,

        #[command(flatten)]
        synthesis: SynthesisArgs,
    },

    /// Synthesize gains for the axes of an existing dataset
    Load {
        /// Directory containing the axis files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Channel frequencies in hertz, relative to `data_dir`
        #[arg(long, default_value = "frequencies.npy")]
        frequencies_file: PathBuf,

        /// Timestamps, relative to `data_dir`; repeats are collapsed
        #[arg(long, default_value = "times.npy")]
        times_file: PathBuf,

        /// Timestamps are Julian dates rather than seconds
        #[arg(long)]
        julian_days: bool,

        /// Number of antennas
        #[arg(long)]
        antenna_count: usize,

        /// Number of spectral windows
        #[arg(long, default_value = "1")]
        spw_count: usize,

        /// Length of one integration in seconds [default: spacing of the first two times]
        #[arg(long)]
        integration_time: Option<Float>,

        /// Polarization codes, comma separated
        #[arg(
            long,
            value_delimiter = ',',
            allow_negative_numbers = true,
            default_values_t = [POL_XX, POL_YY]
        )]
        polarizations: Vec<i64>,

        #[command(flatten)]
        synthesis: SynthesisArgs,
    },
}

impl Commands {
    pub fn synthesis(&self) -> &SynthesisArgs {
        match self {
            Commands::Generate { synthesis, .. } | Commands::Load { synthesis, .. } => synthesis,
        }
    }
}

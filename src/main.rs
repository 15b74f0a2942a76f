use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use ndarray_rand::rand::{self, SeedableRng, rngs::StdRng};

use mkgains::{CalibrationFile, synthesize};

use crate::{
    cli::Cli,
    input::Input,
    util::{print_header, print_param, time_function},
};

mod cli;
mod input;
mod util;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let input = Input::from_cli(&cli)?;
    input.print_parameters();

    let seed = cli.random_seed.unwrap_or_else(rand::random);
    info!("random seed: {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    print_header!("MAIN");
    let synthesis = time_function!(
        "synthesize gains",
        synthesize(&input.context, &input.params, &mut rng)?
    );
    print_param!("boxcar_size", synthesis.params.window_size);
    print_param!("f0_index", synthesis.params.f0index);
    print_param!("min_value", synthesis.bounds.min);
    print_param!("max_value", synthesis.bounds.max);

    print_header!("OUTPUT");
    if let Some(path) = &cli.numpy_output {
        ndarray_npy::write_npy(path, &synthesis.gains)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        println!("gains written to '{}'", path.display());
    }

    let calfile = CalibrationFile::new(&input.context, synthesis.gains);
    let path = time_function!(
        "write calibration file",
        calfile.write_unique(&input.output_base)?
    );
    println!("calibration file written to '{}'", path.display());

    Ok(())
}

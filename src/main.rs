use std::fs;
use std::process;

use log::{debug, info, warn};
use simplelog::LevelFilter;
use structopt::StructOpt;

use sbox_ddt::error::Result;
use sbox_ddt::options::DdtOptions;
use sbox_ddt::settings::Settings;
use sbox_ddt::watch::ExecutionWatch;
use sbox_ddt::{generator, logger, validator, DifferenceTable, Sbox};

fn main() {
    if let Err(err) = run(DdtOptions::from_args()) {
        eprintln!("An error has occurred: {}", err);
        process::exit(1);
    }
}

fn run(options: DdtOptions) -> Result<()> {
    let mut watch = ExecutionWatch::new();
    watch.all_program.start();

    let mut settings = Settings::from_file(&options.settings)?;

    if let Some(input) = options.input {
        settings.input_file = input;
    }

    if let Some(output) = options.output {
        settings.output_file = output;
    }

    if let Some(threads) = options.threads {
        settings.threads_count = threads;
    }

    let level = if options.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    logger::init(&settings, level)?;
    info!("Start\n{}", settings);

    // Read the S-box
    watch.input_preparation.start();

    if settings.generate_function {
        generator::write_permutation(&settings.input_file,
                                     settings.variable_count,
                                     &mut rand::thread_rng())?;
        info!("The permutation is written to {}", settings.input_file.display());
    }

    let text = fs::read_to_string(&settings.input_file)?;
    let rows: Vec<&str> = text.lines().collect();
    watch.input_preparation.stop();

    watch.input_check.start();
    validator::validate(&rows, settings.variable_count)?;
    watch.input_check.stop();
    debug!("{} input rows are valid", rows.len());

    let mut sequential: Option<DifferenceTable> = None;

    if settings.calculate_sequential {
        watch.input_preparation.start();
        let mut sbox = Sbox::new(&rows, settings.variable_count)?;
        watch.input_preparation.stop();

        watch.sequential_algorithm.start();
        sbox.compute_sequential();
        watch.sequential_algorithm.stop();
        info!("Sequential algorithm finished in {:.3} seconds",
              watch.sequential_algorithm.elapsed().as_secs_f64());

        write_result(&settings, sbox.ddt())?;
        sequential = Some(sbox.into_ddt());
    }

    if settings.calculate_parallel {
        watch.input_preparation.start();
        let mut sbox = Sbox::new(&rows, settings.variable_count)?;
        watch.input_preparation.stop();

        watch.parallel_algorithm.start();
        sbox.compute_parallel(settings.threads_count)?;
        watch.parallel_algorithm.stop();
        info!("Parallel algorithm with {} threads finished in {:.3} seconds",
              settings.threads_count,
              watch.parallel_algorithm.elapsed().as_secs_f64());

        write_result(&settings, sbox.ddt())?;

        if let Some(sequential) = &sequential {
            if sequential == sbox.ddt() {
                info!("Sequential and parallel tables agree");
            } else {
                warn!("Sequential and parallel tables differ");
            }
        }
    }

    watch.stop_all();
    info!("\n{}", watch);

    Ok(())
}

fn write_result(settings: &Settings, ddt: &DifferenceTable) -> Result<()> {
    if settings.write_result {
        ddt.write_to_file(&settings.output_file, settings.write_buffer)?;
        info!("The table is written to {}", settings.output_file.display());
    }

    Ok(())
}

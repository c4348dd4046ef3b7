use std::process;

use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

use sbox_ddt::generator;
use sbox_ddt::options::GenerateOptions;

fn main() {
    let options = GenerateOptions::from_args();

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match generator::write_permutation(&options.output, options.variables, &mut rng) {
        Ok(()) => println!("The permutation is written to {}", options.output.display()),
        Err(err) => {
            eprintln!("An error has occurred: {}", err);
            process::exit(1);
        }
    }
}

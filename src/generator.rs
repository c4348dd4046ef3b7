//! Random bijective S-boxes for testing and benchmarking.

use std::fs;
use std::path::Path;

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::sbox::MAX_VARIABLES;

/// Returns all `variables` bit strings in a uniformly random order, i.e. the table of a
/// random permutation.
pub fn permutation<R: Rng + ?Sized>(variables: usize, rng: &mut R) -> Result<Vec<String>> {
    if variables == 0 || variables > MAX_VARIABLES {
        return Err(Error::Configuration(format!(
            "the number of variables must be between 1 and {}, got {}",
            MAX_VARIABLES, variables
        )));
    }

    let mut table: Vec<String> = (0..1usize << variables)
        .map(|i| format!("{:0width$b}", i, width = variables))
        .collect();

    table.shuffle(rng);
    Ok(table)
}

/// Writes a random permutation on `variables` bits to `path`, one output per line.
pub fn write_permutation<P: AsRef<Path>, R: Rng + ?Sized>(path: P,
                                                          variables: usize,
                                                          rng: &mut R)
                                                          -> Result<()> {
    let table = permutation(variables, rng)?;
    fs::write(path, table.iter().join("\n") + "\n")?;

    Ok(())
}

//! Type representing an S-box given by its table of output vectors.

use std::ops::Range;
use std::sync::mpsc;

use crossbeam_utils::thread;

use crate::ddt::{split_rows, DifferenceTable};
use crate::error::{Error, Result};
use crate::vector::BooleanVector;

/// The largest number of variables accepted. The table alone takes 2<sup>2n</sup> counters.
pub const MAX_VARIABLES: usize = 16;

/// A structure that represents an S-box together with its difference distribution table.
#[derive(Clone, Debug)]
pub struct Sbox {
    variables: usize,
    inputs: Vec<BooleanVector>,
    outputs: Vec<BooleanVector>,
    ddt: DifferenceTable,
}

/// A view of an S-box restricted to a block of input rows. Used by the workers of
/// [`Sbox::compute_parallel`], each accumulating into a private table.
#[derive(Debug)]
pub(crate) struct SboxSlice<'a> {
    inputs: &'a [BooleanVector],
    outputs: &'a [BooleanVector],
    rows: Range<usize>,
    ddt: DifferenceTable,
}

impl Sbox {
    /// Creates a new S-box from its output vectors, where `outputs[i]` is the image of the
    /// input with integer encoding `i`. `variables` is the bit size of the S-box.
    pub fn new<S: AsRef<str>>(outputs: &[S], variables: usize) -> Result<Sbox> {
        if variables == 0 || variables > MAX_VARIABLES {
            return Err(Error::Configuration(format!(
                "the number of variables must be between 1 and {}, got {}",
                MAX_VARIABLES, variables
            )));
        }

        let len = 1 << variables;

        if outputs.len() != len {
            return Err(Error::Dimension {
                expected: len,
                found: outputs.len(),
            });
        }

        let outputs = outputs
            .iter()
            .enumerate()
            .map(|(row, s)| {
                let s = s.as_ref();
                match BooleanVector::from_binary_str(s) {
                    Ok(vector) if vector.width() == variables => Ok(vector),
                    _ => Err(Error::Format {
                        row: Some(row),
                        value: s.to_string(),
                    }),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let inputs = (0..len)
            .map(|i| BooleanVector::from_index(i, variables))
            .collect();

        Ok(Sbox {
            variables,
            inputs,
            outputs,
            ddt: DifferenceTable::new(variables),
        })
    }

    /// Returns a view of the rows `rows` that shares the input and output vectors.
    pub(crate) fn slice(&self, rows: Range<usize>) -> Result<SboxSlice<'_>> {
        if rows.start > rows.end || rows.end > self.inputs.len() {
            return Err(Error::Dimension {
                expected: self.inputs.len(),
                found: rows.end,
            });
        }

        Ok(SboxSlice {
            inputs: &self.inputs,
            outputs: &self.outputs,
            rows,
            ddt: DifferenceTable::new(self.variables),
        })
    }

    /// Fills the difference distribution table by visiting every pair of inputs once.
    pub fn compute_sequential(&mut self) {
        self.ddt.clear();
        self.ddt.seed_diagonal(self.inputs.len());
        self.ddt.accumulate(&self.inputs, &self.outputs, 0..self.inputs.len());
    }

    /// Fills the difference distribution table using `threads` scoped worker threads,
    /// each responsible for a contiguous block of input rows. The partial tables are
    /// summed once all workers are done.
    ///
    /// On error the current table is left untouched.
    pub fn compute_parallel(&mut self, threads: usize) -> Result<()> {
        self.compute_parallel_with(threads, |mut slice| {
            slice.compute_granular();
            Ok(slice.into_ddt())
        })
    }

    /// Runs `worker` on one slice per block of rows and replaces the table with the sum
    /// of the partial tables. A panicking worker fails the call with `Error::Worker`, a
    /// worker error is returned as is.
    pub(crate) fn compute_parallel_with<F>(&mut self, threads: usize, worker: F) -> Result<()>
    where
        F: Fn(SboxSlice<'_>) -> Result<DifferenceTable> + Sync,
    {
        let blocks = split_rows(self.inputs.len(), threads)?;
        let (result_tx, result_rx) = mpsc::channel();
        let sbox: &Sbox = self;
        let worker = &worker;

        // Start scoped worker threads
        thread::scope(|scope| {
            for rows in blocks {
                let result_tx = result_tx.clone();

                scope.spawn(move |_| {
                    let partial = sbox.slice(rows).and_then(worker);

                    // The receiver outlives the scope
                    let _ = result_tx.send(partial);
                });
            }
        })
        .map_err(|_| Error::Worker)?;

        drop(result_tx);

        // Collect partial tables from all threads
        let mut ddt = DifferenceTable::new(self.variables);

        for partial in result_rx.iter() {
            ddt.merge(&partial?)?;
        }

        ddt.seed_diagonal(self.inputs.len());
        self.ddt = ddt;

        Ok(())
    }

    /// Returns the output vector at `index`.
    pub fn output(&self, index: usize) -> Option<&BooleanVector> {
        self.outputs.get(index)
    }

    /// Applies the S-box to the input with integer encoding `x`.
    pub fn apply(&self, x: usize) -> Option<usize> {
        self.output(x).map(BooleanVector::value)
    }

    /// Applies the S-box to an input vector.
    pub fn apply_vector(&self, input: &BooleanVector) -> Option<&BooleanVector> {
        if input.width() != self.variables {
            return None;
        }

        self.output(input.value())
    }

    /// Returns the output at `index` as a string of `0` and `1`.
    pub fn output_string(&self, index: usize) -> Option<String> {
        self.output(index).map(BooleanVector::to_string)
    }

    /// Returns the number of variables of the S-box.
    pub fn variables(&self) -> usize {
        self.variables
    }

    /// Returns the number of inputs, 2<sup>`variables`</sup>.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn inputs(&self) -> &[BooleanVector] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[BooleanVector] {
        &self.outputs
    }

    /// Returns a reference to the DDT of the S-box.
    pub fn ddt(&self) -> &DifferenceTable {
        &self.ddt
    }

    pub fn into_ddt(self) -> DifferenceTable {
        self.ddt
    }
}

impl<'a> SboxSlice<'a> {
    pub(crate) fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    /// Accumulates the pairs starting in this slice's rows. Every later input is paired,
    /// not only those inside the slice. The trivial entry is not seeded.
    pub(crate) fn compute_granular(&mut self) {
        self.ddt.accumulate(self.inputs, self.outputs, self.rows.clone());
    }

    pub(crate) fn into_ddt(self) -> DifferenceTable {
        self.ddt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator;
    use quickcheck_macros::quickcheck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // A 3-bit S-box with the table below computed once by a reference run
    const SBOX_3: [&str; 8] = ["011", "110", "000", "101", "111", "001", "100", "010"];
    const DDT_3: [[usize; 8]; 8] = [
        [8, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 4, 4, 0],
        [0, 0, 0, 8, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 4, 4, 0],
        [0, 0, 0, 0, 4, 0, 0, 4],
        [0, 4, 4, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 4, 0, 0, 4],
        [0, 4, 4, 0, 0, 0, 0, 0],
    ];

    const PRESENT: [&str; 16] = [
        "1100", "0101", "0110", "1011", "1001", "0000", "1010", "1101",
        "0011", "1110", "1111", "1000", "0100", "0111", "0001", "0010",
    ];

    fn random_sbox(variables: usize, seed: u64) -> Sbox {
        let mut rng = StdRng::seed_from_u64(seed);
        let table = generator::permutation(variables, &mut rng).unwrap();

        Sbox::new(&table, variables).unwrap()
    }

    /// The textbook definition: count `x` with `S(x) ^ S(x ^ dx) == dy`.
    fn reference_ddt(sbox: &Sbox) -> Vec<Vec<usize>> {
        let size = sbox.len();
        let mut ddt = vec![vec![0; size]; size];

        for x in 0..size {
            let y = sbox.apply(x).unwrap();

            for (in_diff, ddt_row) in ddt.iter_mut().enumerate() {
                ddt_row[y ^ sbox.apply(x ^ in_diff).unwrap()] += 1;
            }
        }

        ddt
    }

    #[test]
    fn identity_two_variables() {
        let mut sbox = Sbox::new(&["00", "01", "10", "11"], 2).unwrap();
        sbox.compute_sequential();

        let ddt = sbox.ddt();
        assert_eq!(ddt.get(0, 0), 4);
        assert_eq!(ddt.get(1, 1), 4);
        assert_eq!(ddt.get(2, 2), 4);
        assert_eq!(ddt.get(3, 3), 4);
        assert_eq!(ddt.total(), 16);
    }

    #[test]
    fn pinned_three_variables() {
        let mut sbox = Sbox::new(&SBOX_3, 3).unwrap();
        sbox.compute_sequential();

        for (row, expected) in sbox.ddt().rows().iter().zip(DDT_3.iter()) {
            assert_eq!(&row[..], &expected[..]);
        }

        for threads in 1..=8 {
            let mut parallel = Sbox::new(&SBOX_3, 3).unwrap();
            parallel.compute_parallel(threads).unwrap();
            assert_eq!(parallel.ddt(), sbox.ddt(), "threads = {}", threads);
        }
    }

    #[test]
    fn present_matches_reference() {
        let mut sbox = Sbox::new(&PRESENT, 4).unwrap();
        sbox.compute_sequential();

        assert_eq!(sbox.ddt().rows(), &reference_ddt(&sbox)[..]);
        assert_eq!(sbox.ddt().rows().iter().flatten().skip(1).max(), Some(&4));
    }

    #[test]
    fn parallel_matches_sequential_for_every_thread_count() {
        let mut sequential = random_sbox(5, 7);
        sequential.compute_sequential();

        for threads in 1..=sequential.len() + 3 {
            let mut parallel = random_sbox(5, 7);
            parallel.compute_parallel(threads).unwrap();
            assert_eq!(parallel.ddt(), sequential.ddt(), "threads = {}", threads);
        }
    }

    #[test]
    fn parallel_rejects_zero_threads() {
        let mut sbox = random_sbox(3, 1);
        sbox.compute_sequential();
        let before = sbox.ddt().clone();

        assert!(matches!(sbox.compute_parallel(0), Err(Error::Configuration(_))));
        assert_eq!(sbox.ddt(), &before);
    }

    #[test]
    fn panicking_worker_fails_whole_call() {
        let mut sbox = random_sbox(4, 13);
        sbox.compute_sequential();
        let before = sbox.ddt().clone();

        let result = sbox.compute_parallel_with(4, |mut slice| {
            if slice.rows().start == 8 {
                panic!("worker for rows {:?} failed", slice.rows());
            }

            slice.compute_granular();
            Ok(slice.into_ddt())
        });

        assert!(matches!(result, Err(Error::Worker)));
        assert_eq!(sbox.ddt(), &before);
    }

    #[test]
    fn worker_error_reaches_caller() {
        let mut sbox = random_sbox(4, 13);
        sbox.compute_parallel(2).unwrap();
        let before = sbox.ddt().clone();

        let result = sbox.compute_parallel_with(3, |mut slice| {
            if slice.rows().start == 0 {
                return Err(Error::Dimension { expected: 16, found: 17 });
            }

            slice.compute_granular();
            Ok(slice.into_ddt())
        });

        assert!(matches!(result, Err(Error::Dimension { expected: 16, found: 17 })));
        assert_eq!(sbox.ddt(), &before);
    }

    #[test]
    fn recompute_does_not_accumulate() {
        let mut sbox = random_sbox(4, 3);
        sbox.compute_sequential();
        sbox.compute_sequential();
        assert_eq!(sbox.ddt().total(), 256);

        sbox.compute_parallel(3).unwrap();
        assert_eq!(sbox.ddt().total(), 256);
    }

    #[test]
    fn lookups() {
        let sbox = Sbox::new(&PRESENT, 4).unwrap();

        assert_eq!(sbox.apply(0), Some(0xc));
        assert_eq!(sbox.apply(0xf), Some(0x2));
        assert_eq!(sbox.apply(16), None);
        assert_eq!(sbox.output_string(3).as_deref(), Some("1011"));
        assert_eq!(sbox.output(1).map(BooleanVector::bits),
                   Some(vec![false, true, false, true]));

        let input = BooleanVector::from_binary_str("0001").unwrap();
        assert_eq!(sbox.apply_vector(&input).map(BooleanVector::value), Some(0x5));

        let narrow = BooleanVector::from_binary_str("01").unwrap();
        assert_eq!(sbox.apply_vector(&narrow), None);
    }

    #[test]
    fn inputs_are_the_canonical_enumeration() {
        let sbox = random_sbox(4, 11);

        for (i, input) in sbox.inputs().iter().enumerate() {
            assert_eq!(input.value(), i);
            assert_eq!(input.width(), 4);
        }
    }

    #[test]
    fn wrong_row_count() {
        assert!(matches!(
            Sbox::new(&["00", "01", "10"], 2),
            Err(Error::Dimension { expected: 4, found: 3 })
        ));
    }

    #[test]
    fn wrong_row_format() {
        assert!(matches!(
            Sbox::new(&["00", "01", "1x", "11"], 2),
            Err(Error::Format { row: Some(2), .. })
        ));
        assert!(matches!(
            Sbox::new(&["00", "01", "100", "11"], 2),
            Err(Error::Format { row: Some(2), .. })
        ));
    }

    #[test]
    fn variable_count_out_of_range() {
        let empty: [&str; 0] = [];

        assert!(matches!(Sbox::new(&empty, 0), Err(Error::Configuration(_))));
        assert!(matches!(Sbox::new(&empty, MAX_VARIABLES + 1), Err(Error::Configuration(_))));
    }

    #[test]
    fn slice_bounds() {
        let sbox = random_sbox(3, 5);

        assert!(sbox.slice(0..8).is_ok());
        assert!(sbox.slice(8..8).is_ok());
        assert!(matches!(sbox.slice(4..9), Err(Error::Dimension { .. })));
    }

    #[test]
    fn slice_skips_trivial_entry() {
        let sbox = random_sbox(3, 5);
        let mut slice = sbox.slice(0..8).unwrap();
        slice.compute_granular();

        assert_eq!(slice.into_ddt().total(), 8 * 7);
    }

    #[quickcheck]
    fn table_invariants(seed: u64, variables: u8, threads: u8) -> bool {
        let variables = 1 + variables as usize % 6;
        let threads = 1 + threads as usize % 70;
        let n = 1 << variables;

        let mut sequential = random_sbox(variables, seed);
        sequential.compute_sequential();
        let mut parallel = random_sbox(variables, seed);
        parallel.compute_parallel(threads).unwrap();

        let ddt = sequential.ddt();
        let first_row = ddt.get(0, 0) == n && ddt.rows()[0][1..].iter().all(|&e| e == 0);
        let rows_even = ddt.rows()[1..].iter().all(|row| row.iter().sum::<usize>() % 2 == 0);

        ddt.total() == n * n && first_row && rows_even && parallel.ddt() == ddt
    }
}

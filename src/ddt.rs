//! The difference distribution table and the pairwise accumulation behind it.

use std::io;
use std::ops::Range;
use std::path::Path;

use crate::error::{Error, Result};
use crate::render;
use crate::vector::BooleanVector;

/// A square table counting, for every input difference `dx` and output difference `dy`,
/// the number of ordered input pairs realising the transition `dx -> dy`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DifferenceTable {
    matrix: Vec<Vec<usize>>,
    padding: usize,
}

impl DifferenceTable {
    /// Creates an all zero table of side 2<sup>`variables`</sup>.
    pub fn new(variables: usize) -> DifferenceTable {
        let side = 1 << variables;

        DifferenceTable {
            matrix: vec![vec![0; side]; side],
            // +1 for the separator column
            padding: count_digits(side) + 1,
        }
    }

    /// Returns the number of rows (and columns) of the table.
    pub fn side(&self) -> usize {
        self.matrix.len()
    }

    /// Returns the character width of a rendered cell.
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Returns the rows of the table, indexed by input difference.
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.matrix
    }

    /// Returns the number of ordered pairs with input difference `dx` and output
    /// difference `dy`.
    pub fn get(&self, dx: usize, dy: usize) -> usize {
        self.matrix[dx][dy]
    }

    /// Adds `by` to the entry `(dx, dy)`.
    #[inline(always)]
    pub fn increment(&mut self, dx: usize, dy: usize, by: usize) {
        self.matrix[dx][dy] += by;
    }

    /// Sum of all entries. For a filled table this is `side^2`.
    pub fn total(&self) -> usize {
        self.matrix.iter().map(|row| row.iter().sum::<usize>()).sum()
    }

    /// Resets every entry to zero.
    pub fn clear(&mut self) {
        for row in self.matrix.iter_mut() {
            for entry in row.iter_mut() {
                *entry = 0;
            }
        }
    }

    /// Sets the trivial entry `(0, 0)`, which counts each input paired with itself.
    ///
    /// # Panics
    /// Panics if `inputs` is not the full enumeration the table was sized for.
    pub fn seed_diagonal(&mut self, inputs: usize) {
        assert_eq!(inputs, self.side(), "input enumeration does not match the table side");
        self.matrix[0][0] = inputs;
    }

    /// Adds the contribution of every unordered pair `(i, j)` with `i` in `rows` and
    /// `i < j < inputs.len()`. Each pair is counted twice, once per ordering. The
    /// entry `(0, 0)` is left alone.
    pub fn accumulate(&mut self,
                      inputs: &[BooleanVector],
                      outputs: &[BooleanVector],
                      rows: Range<usize>) {
        let len = inputs.len();

        for i in rows {
            let (input_i, output_i) = (&inputs[i], &outputs[i]);

            for j in (i + 1)..len {
                let in_diff = input_i.xor_value(&inputs[j]);
                let out_diff = output_i.xor_value(&outputs[j]);

                self.increment(in_diff, out_diff, 2);
            }
        }
    }

    /// Adds `other` to the table entry by entry.
    pub fn merge(&mut self, other: &DifferenceTable) -> Result<()> {
        if other.side() != self.side() {
            return Err(Error::Dimension {
                expected: self.side(),
                found: other.side(),
            });
        }

        for (row, other_row) in self.matrix.iter_mut().zip(other.matrix.iter()) {
            for (entry, other_entry) in row.iter_mut().zip(other_row.iter()) {
                *entry += other_entry;
            }
        }

        Ok(())
    }

    /// Writes the rendered table to `path`, see [`render::write_table`].
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P, buffer: usize) -> Result<()> {
        render::write_table_to_file(self, path, buffer)
    }

    /// Writes the rendered table to `sink`, see [`render::write_table`].
    pub fn write_to<W: io::Write>(&self, sink: W, buffer: usize) -> io::Result<()> {
        render::write_table(self, sink, buffer)
    }
}

/// Splits `0..len` into `parts` contiguous blocks of `len / parts` rows. The last block
/// also takes the remaining `len % parts` rows.
pub fn split_rows(len: usize, parts: usize) -> Result<Vec<Range<usize>>> {
    if parts == 0 {
        return Err(Error::Configuration(format!(
            "the number of threads must be greater than 0, {} <= 0",
            parts
        )));
    }

    let part_len = len / parts;
    let remainder = len % parts;

    Ok((0..parts)
        .map(|i| {
            let start = i * part_len;
            let end = start + part_len + if i == parts - 1 { remainder } else { 0 };
            start..end
        })
        .collect())
}

/// Number of decimal digits of `number`.
fn count_digits(number: usize) -> usize {
    number.to_string().len()
}

//! Rendering of difference distribution tables as a text grid.
//!
//! ```text
//! --+--+--+
//! dy| 0| 1|
//! dx|  |  |
//! --+--+--+
//!  0| 2  0
//!  1| 0  2
//! --+--+--+
//! ```

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::ddt::DifferenceTable;
use crate::error::Result;

/// Writes `ddt` to `sink`. Rows are collected in memory and handed to the sink each time
/// more than `buffer` bytes are pending, and once more at the end.
pub fn write_table<W: Write>(ddt: &DifferenceTable, mut sink: W, buffer: usize) -> io::Result<()> {
    let padding = ddt.padding();
    let num_cols = ddt.side();
    let mut result = String::new();

    // Upper border and the column indices
    push_delimiter(&mut result, num_cols, padding);
    result.push('\n');
    push_column_indices(&mut result, num_cols, padding);
    result.push('\n');
    sink.write_all(result.as_bytes())?;
    result.clear();

    for (i, row) in ddt.rows().iter().enumerate() {
        let _ = write!(result, "{:>width$}|", i, width = padding);

        for entry in row {
            let _ = write!(result, "{:>width$} ", entry, width = padding);
        }

        result.push('\n');

        if result.len() > buffer {
            sink.write_all(result.as_bytes())?;
            result.clear();
        }
    }

    push_delimiter(&mut result, num_cols, padding);
    sink.write_all(result.as_bytes())?;
    sink.flush()
}

/// Creates (or truncates) the file at `path` and writes `ddt` to it.
pub fn write_table_to_file<P: AsRef<Path>>(ddt: &DifferenceTable, path: P, buffer: usize) -> Result<()> {
    let file = File::create(path)?;
    write_table(ddt, BufWriter::new(file), buffer)?;

    Ok(())
}

fn push_delimiter(result: &mut String, num_cols: usize, padding: usize) {
    for _ in 0..=num_cols {
        result.extend(std::iter::repeat('-').take(padding));
        result.push('+');
    }
}

fn push_column_indices(result: &mut String, num_cols: usize, padding: usize) {
    let _ = write!(result, "{:>width$}|", "dy", width = padding);
    for j in 0..num_cols {
        let _ = write!(result, "{:>width$}|", j, width = padding);
    }

    result.push('\n');

    let _ = write!(result, "{:>width$}|", "dx", width = padding);
    for _ in 0..num_cols {
        let _ = write!(result, "{:>width$}|", "", width = padding);
    }

    result.push('\n');
    push_delimiter(result, num_cols, padding);
}

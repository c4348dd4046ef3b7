//! Checks on the raw input rows before an S-box is built from them.

use fnv::FnvHashSet;

use crate::error::{Error, Result};

/// Checks that `rows` holds exactly 2<sup>`variables`</sup> pairwise distinct strings, each
/// made of `variables` characters `0` or `1`.
pub fn validate<S: AsRef<str>>(rows: &[S], variables: usize) -> Result<()> {
    let expected = 1usize
        .checked_shl(variables as u32)
        .ok_or_else(|| Error::Configuration(format!("{} variables is too many", variables)))?;

    if rows.len() != expected {
        return Err(Error::Dimension {
            expected,
            found: rows.len(),
        });
    }

    let mut unique = FnvHashSet::default();

    for (row, value) in rows.iter().map(|s| s.as_ref()).enumerate() {
        if !is_binary_vector(value, variables) {
            return Err(Error::Format {
                row: Some(row),
                value: value.to_string(),
            });
        }

        if !unique.insert(value) {
            return Err(Error::Duplicate {
                row,
                value: value.to_string(),
            });
        }
    }

    Ok(())
}

fn is_binary_vector(value: &str, variables: usize) -> bool {
    value.len() == variables && value.bytes().all(|b| b == b'0' || b == b'1')
}

//! Type representing a fixed-width boolean vector.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A boolean vector of `width` bits, stored as its integer encoding with the
/// first bit as the most significant one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BooleanVector {
    value: usize,
    width: usize,
}

impl BooleanVector {
    /// Parses a string of `0` and `1` characters. The length of `s` is the width of the vector.
    pub fn from_binary_str(s: &str) -> Result<BooleanVector> {
        let format_error = || Error::Format {
            row: None,
            value: s.to_string(),
        };

        if s.is_empty() || s.len() > usize::BITS as usize {
            return Err(format_error());
        }

        let mut value = 0;

        for c in s.chars() {
            let bit = match c {
                '0' => 0,
                '1' => 1,
                _ => return Err(format_error()),
            };

            value = (value << 1) | bit;
        }

        Ok(BooleanVector {
            value,
            width: s.len(),
        })
    }

    /// The `width` bit zero padded expansion of `index`.
    pub fn from_index(index: usize, width: usize) -> BooleanVector {
        debug_assert!(width >= usize::BITS as usize || index < (1 << width));

        BooleanVector {
            value: index,
            width,
        }
    }

    /// Returns the integer encoding of the vector.
    #[inline(always)]
    pub fn value(&self) -> usize {
        self.value
    }

    /// Returns the number of bits in the vector.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the bits of the vector, most significant first.
    pub fn bits(&self) -> Vec<bool> {
        (0..self.width)
            .rev()
            .map(|shift| (self.value >> shift) & 1 == 1)
            .collect()
    }

    /// The integer encoding of the difference `self ^ other`.
    #[inline(always)]
    pub fn xor_value(&self, other: &BooleanVector) -> usize {
        self.value ^ other.value
    }
}

impl FromStr for BooleanVector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BooleanVector::from_binary_str(s)
    }
}

impl fmt::Display for BooleanVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }

        Ok(())
    }
}

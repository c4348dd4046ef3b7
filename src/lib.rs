//! Difference distribution tables of S-boxes, computed sequentially or with a pool of
//! scoped worker threads, and rendered as a text grid.

#[macro_use] extern crate lazy_static;

pub mod ddt;
pub mod error;
pub mod generator;
pub mod logger;
pub mod options;
pub mod render;
pub mod sbox;
pub mod settings;
pub mod validator;
pub mod vector;
pub mod watch;

pub use crate::ddt::DifferenceTable;
pub use crate::error::{Error, Result};
pub use crate::sbox::Sbox;
pub use crate::vector::BooleanVector;

//! Run settings read from a TOML file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

// Worker threads used when the settings do not name a count
lazy_static! {
    static ref THREADS: usize = num_cpus::get();
}

fn default_threads() -> usize {
    *THREADS
}

fn default_write_buffer() -> usize {
    1 << 16
}

fn default_log_file() -> PathBuf {
    PathBuf::from("log.txt")
}

fn enabled() -> bool {
    true
}

/// Parameters of a run.
///
/// ```toml
/// input_file = "sbox.txt"
/// output_file = "ddt.txt"
/// variable_count = 8
/// threads_count = 4
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// File holding the S-box, one output vector per line.
    pub input_file: PathBuf,
    /// File the rendered table is written to.
    pub output_file: PathBuf,
    #[serde(default = "enabled")]
    pub write_result: bool,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Number of variables of the S-box.
    pub variable_count: usize,
    #[serde(default = "enabled")]
    pub log_to_console: bool,
    #[serde(default)]
    pub log_to_file: bool,
    #[serde(default = "enabled")]
    pub calculate_sequential: bool,
    #[serde(default = "enabled")]
    pub calculate_parallel: bool,
    #[serde(default = "default_threads")]
    pub threads_count: usize,
    /// Write a random S-box to `input_file` before reading it.
    #[serde(default)]
    pub generate_function: bool,
    /// Pending bytes after which rendered rows are written out.
    #[serde(default = "default_write_buffer")]
    pub write_buffer: usize,
}

impl Settings {
    /// Reads settings from the TOML file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let text = fs::read_to_string(path)?;

        Settings::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Settings> {
        Ok(toml::from_str(text)?)
    }

    /// Number of inputs of the S-box, 2<sup>`variable_count`</sup>.
    pub fn inputs_count(&self) -> usize {
        1usize.checked_shl(self.variable_count as u32).unwrap_or(0)
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "variables: {}; inputs: {};", self.variable_count, self.inputs_count())?;
        writeln!(f, "calculate sequential: {};", self.calculate_sequential)?;
        writeln!(f, "calculate parallel: {}; threads: {};",
                 self.calculate_parallel, self.threads_count)?;
        write!(f, "function generation: {};", self.generate_function)
    }
}

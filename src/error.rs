//! Error type shared by the table engine and its collaborators.

use std::error;
use std::fmt;
use std::io;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All the ways building or writing a difference distribution table can fail.
#[derive(Debug)]
pub enum Error {
    /// A row is not a string of `0` and `1` of the expected width. `row` is `None` when
    /// a single vector was parsed on its own.
    Format {
        row: Option<usize>,
        value: String,
    },
    /// A collection does not have the size the variable count demands.
    Dimension {
        expected: usize,
        found: usize,
    },
    /// A parameter such as the thread count or variable count is out of range.
    Configuration(String),
    /// The same output row occurs twice.
    Duplicate {
        row: usize,
        value: String,
    },
    /// A worker thread of the parallel computation panicked.
    Worker,
    Io(io::Error),
    Settings(toml::de::Error),
    Logger(log::SetLoggerError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Format { row: Some(row), value } => write!(
                f,
                "row {} ('{}') is not a binary vector of the expected width",
                row, value
            ),
            Error::Format { row: None, value } => {
                write!(f, "'{}' is not a binary vector", value)
            }
            Error::Dimension { expected, found } => {
                write!(f, "expected {} elements, found {}", expected, found)
            }
            Error::Configuration(msg) => write!(f, "invalid configuration: {}", msg),
            Error::Duplicate { row, value } => {
                write!(f, "row {} ('{}') is not unique", row, value)
            }
            Error::Worker => write!(f, "a worker thread failed during the parallel computation"),
            Error::Io(err) => write!(f, "i/o error: {}", err),
            Error::Settings(err) => write!(f, "could not parse settings: {}", err),
            Error::Logger(err) => write!(f, "could not set up logging: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Settings(err) => Some(err),
            Error::Logger(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Error {
        Error::Settings(err)
    }
}

impl From<log::SetLoggerError> for Error {
    fn from(err: log::SetLoggerError) -> Error {
        Error::Logger(err)
    }
}

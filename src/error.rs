//! Error types for CSV emission.
//!
//! The emitter itself never fails once it is running: every event handler
//! degrades to "write less" instead of returning an error. Errors only surface
//! at the construction and convenience boundaries:
//!
//! - **Invalid options**: an empty delimiter, an empty line terminator, or a
//!   replacement string that would reintroduce the delimiter
//! - **I/O errors**: the sink rejected a write, reported by [`crate::to_writer`]
//!   and friends after the stream has been closed
//!
//! ## Examples
//!
//! ```rust
//! use report_csv::{CsvOptions, Error};
//!
//! let result = CsvOptions::new().with_delimiter("").validate();
//! assert!(matches!(result, Err(Error::InvalidOption { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised at the edges of the CSV emitter.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error while writing to the sink
    #[error("IO error: {0}")]
    Io(String),

    /// A render option holds a value the emitter cannot work with
    #[error("Invalid option '{option}': {reason}")]
    InvalidOption { option: String, reason: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an invalid option error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use report_csv::Error;
    ///
    /// let err = Error::invalid_option("delimiter", "must not be empty");
    /// assert!(err.to_string().contains("delimiter"));
    /// ```
    pub fn invalid_option(option: &str, reason: &str) -> Self {
        Error::InvalidOption {
            option: option.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

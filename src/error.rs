//! Error types for the crate.
//!
//! Internally everything is an `anyhow::Error`. When an error crosses the command boundary it is
//! tagged with an `ErrorType` so that the user can tell what kind of problem occurred, and so that
//! tests can check for it with `downcast_ref::<ErrorType>()`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The broad category of an error that is reported to the user.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The home directory or `config.json` is missing or invalid.
    Config,
    /// A CSV file could not be opened, read or written.
    File,
    /// An edit or delete was requested without a valid row selected.
    Selection,
    /// The user supplied something we cannot use.
    Input,
}

impl Display for ErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorType::Config => "Configuration error",
            ErrorType::File => "File error",
            ErrorType::Selection => "No selection",
            ErrorType::Input => "Invalid input",
        };
        f.write_str(s)
    }
}

/// Tags a result's error with an `ErrorType` before it is handed back to the user.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| {
            let e: Error = e.into();
            e.context(error_type)
        })
    }
}

/// Returns the `ErrorType` an error was tagged with, if any.
pub fn error_type(e: &Error) -> Option<ErrorType> {
    e.downcast_ref::<ErrorType>().copied()
}

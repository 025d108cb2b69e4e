//! Error types.
//!
//! [`Error`] is fatal and reaches the caller of [`crate::generate`].
//! [`DataError`] never does: [`crate::data::acquire`] turns every one of
//! them into the built-in dataset.

use std::io;

use polars::error::PolarsError;
use pyo3::{
    exceptions::{PyFileNotFoundError, PyPermissionError},
    PyErr, Python,
};

/// Possible errors while drawing or writing the figure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Python library "matplotlib" was not found.
    #[error(
        "The matplotlib library has not been found.\n\
         Please install it.  See https://matplotlib.org/\n\
         If you use Anaconda, see https://github.com/PyO3/pyo3/issues/1554"
    )]
    NoMatplotlib,
    /// The path contains an element that is not a directory or does
    /// not exist.
    #[error("A path contains an element that is not a directory or does not exist")]
    FileNotFoundError,
    /// Permission denied to access or create the filesystem path.
    #[error("Permission denied to access or create the filesystem path")]
    PermissionError,
    /// Other Python errors.
    #[error("Python error: {0}")]
    Python(PyErr),
    /// Other I/O errors while writing an image.
    #[error("I/O error: {0}")]
    Io(io::Error),
}

impl From<PyErr> for Error {
    fn from(e: PyErr) -> Self {
        Python::with_gil(|py| {
            if e.is_instance_of::<PyFileNotFoundError>(py) {
                Error::FileNotFoundError
            } else if e.is_instance_of::<PyPermissionError>(py) {
                Error::PermissionError
            } else {
                Error::Python(e)
            }
        })
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => Error::FileNotFoundError,
            io::ErrorKind::PermissionDenied => Error::PermissionError,
            _ => Error::Io(e),
        }
    }
}

/// Why a table could not provide three records.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Reading, parsing or casting the table failed.
    #[error("cannot read table: {0}")]
    Polars(#[from] PolarsError),
    /// A target name has no word to look for.
    #[error("target {index} is blank")]
    EmptyTarget { index: usize },
    /// A fixed row position lies past the end of the table.
    #[error("row {row} is out of range for a table of {height} rows")]
    RowOutOfRange { row: usize, height: usize },
    /// A cell needed for a record is null.
    #[error("missing value in column {column:?} at row {row}")]
    MissingValue { column: &'static str, row: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_fold_into_path_variants() {
        let e: Error = io::Error::new(io::ErrorKind::NotFound, "x").into();
        assert!(matches!(e, Error::FileNotFoundError));
        let e: Error = io::Error::new(io::ErrorKind::PermissionDenied, "x").into();
        assert!(matches!(e, Error::PermissionError));
        let e: Error = io::Error::new(io::ErrorKind::WriteZero, "x").into();
        assert!(matches!(e, Error::Io(_)));
    }

    #[test]
    fn data_error_messages() {
        let e = DataError::RowOutOfRange { row: 42, height: 5 };
        assert_eq!(e.to_string(), "row 42 is out of range for a table of 5 rows");
        let e = DataError::MissingValue { column: "Name", row: 3 };
        assert_eq!(e.to_string(), "missing value in column \"Name\" at row 3");
    }
}

//! Error types for Galaxy3D bounding volumes
//!
//! Geometric queries never fail: malformed volumes are answered
//! conservatively and reported through the logger. Errors only come out of
//! the fallible edges of the crate, i.e. reading shapes back from a stream.

use std::fmt;

/// Result type for bounding volume operations
pub type Result<T> = std::result::Result<T, Error>;

/// Bounding volume errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Underlying stream failure (short read, closed writer, ...)
    Io(String),

    /// Bytes were read but do not describe a usable shape
    InvalidData(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
            Error::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

/// Build an [`Error`] and log it at ERROR severity with file:line.
///
/// ```ignore
/// return Err(bounds_err!("galaxy3d::bounds::Cone", InvalidData, "bad flag {}", flag));
/// ```
#[macro_export]
macro_rules! bounds_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::bounds_error!($source, "{}", message);
        $crate::galaxy3d::Error::$variant(message)
    }};
}

/// Log and return an [`Error`] from the enclosing function.
#[macro_export]
macro_rules! bounds_bail {
    ($source:expr, $variant:ident, $($arg:tt)*) => {
        return Err($crate::bounds_err!($source, $variant, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

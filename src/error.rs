//! Types for working with errors produced by the conversions in this crate.

use std::num::ParseIntError;
use std::result::Result as StdResult;
use std::str::Utf8Error;

/// A specialized `Result` type for zeronull.
pub type Result<T> = StdResult<T, Error>;

/// Represents all the ways a conversion can fail.
///
/// None of these are ever swallowed: a conversion that fails returns the error and produces
/// no value, so whatever the caller was about to overwrite stays as it was.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The driver handed us a kind of value this wrapper cannot be read from.
    #[error("unable to scan {found} as {target}")]
    TypeMismatch {
        found: &'static str,
        target: &'static str,
    },

    /// A scanned payload claimed to be JSON but did not parse.
    #[error("scanned JSON isn't valid")]
    InvalidJson(#[source] serde_json::Error),

    /// Error occurred while decoding or encoding JSON.
    #[error("error occurred while processing JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The integer does not fit in the destination type.
    #[error("integer {value} is out of range for {target}")]
    OutOfRange { value: i64, target: &'static str },

    /// Text from the driver could not be read as an integer.
    #[error("unable to parse {input:?} as an integer: {source}")]
    ParseInt {
        input: String,

        #[source]
        source: ParseIntError,
    },

    /// Bytes from the driver were not valid UTF-8 where text was required.
    #[error("scanned bytes are not valid UTF-8: {0}")]
    Utf8(#[from] Utf8Error),
}

impl Error {
    pub(crate) fn mismatch(found: &'static str, target: &'static str) -> Self {
        Error::TypeMismatch { found, target }
    }
}

//! All error types for the localizable crate.
//!
//! These are returned from all fallible operations (parsing, table access,
//! file I/O, etc.). Nothing is logged or swallowed internally; every failure
//! surfaces synchronously to the immediate caller.

use std::fmt;

// `Display` and `std::error::Error` are implemented by hand below instead of
// via `#[derive(thiserror::Error)]`: the derive unconditionally treats the
// field named `source` in `KeyMismatch` as an error-source, which `String`
// cannot be.
#[derive(Debug)]
pub enum Error {
    /// An entry was constructed with an empty source string. The source is
    /// the identity key of an entry and must never be empty.
    EmptySource,

    /// A line that looked like an assignment (`"…" = "…";`) did not
    /// tokenize into exactly `"source" = "translation"`. Carries the
    /// offending raw line for diagnostics.
    MalformedLine(String),

    /// A direct assignment used a key different from the entry's source.
    KeyMismatch { key: String, source: String },

    /// Lookup or deletion by a key that is not in the table.
    KeyNotFound(String),

    /// Bytes could not be decoded under the selected character encoding.
    Decode(&'static str),

    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptySource => write!(f, "source string must not be empty"),
            Error::MalformedLine(line) => write!(f, "failed to parse line: {line}"),
            Error::KeyMismatch { key, source } => {
                write!(f, "key `{key}` does not match entry source `{source}`")
            }
            Error::KeyNotFound(key) => write!(f, "no entry for key `{key}`"),
            Error::Decode(encoding) => write!(f, "malformed {encoding} byte sequence"),
            Error::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

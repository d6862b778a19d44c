//! Error types for the public interface of the library.
//!
//! Internally we use `anyhow` everywhere (`Res<T>`). When a result crosses the public boundary,
//! i.e. is returned from a command, it is converted with `IntoResult::pub_result` so that the
//! caller can tell what kind of thing went wrong.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// The internal result type.
pub(crate) type Res<T> = anyhow::Result<T>;

/// The public result type.
pub type Result<T> = std::result::Result<T, Error>;

/// The broad category of an error returned from a command.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The home directory or config file is missing or invalid.
    Config,
    /// The transaction file could not be read, parsed or written.
    Data,
    /// The request itself is invalid, e.g. an unknown transaction ID.
    Request,
    /// Anything else.
    Internal,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// The public error type. It wraps an `anyhow::Error` and remembers its `ErrorType`.
pub struct Error {
    error_type: ErrorType,
    inner: anyhow::Error,
}

impl Error {
    pub fn new(error_type: ErrorType, inner: impl Into<anyhow::Error>) -> Self {
        Self {
            error_type,
            inner: inner.into(),
        }
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    pub fn inner(&self) -> &anyhow::Error {
        &self.inner
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:?}", self.error_type, self.inner)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // The alternate form prints the whole context chain on one line.
        write!(f, "{} error: {:#}", self.error_type, self.inner)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

impl From<anyhow::Error> for Error {
    fn from(value: anyhow::Error) -> Self {
        Error::new(ErrorType::Internal, value)
    }
}

/// Converts an internal result into a public `Result` with the given `ErrorType`.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(error_type, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn test_pub_result_keeps_type_and_context() {
        let res: Res<()> = Err(anyhow!("file not found")).context("Unable to load transactions");
        let err = res.pub_result(ErrorType::Data).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Data);
        let message = err.to_string();
        assert!(message.starts_with("data error:"), "{message}");
        assert!(message.contains("Unable to load transactions"), "{message}");
        assert!(message.contains("file not found"), "{message}");
    }

    #[test]
    fn test_anyhow_converts_to_internal() {
        let err: Error = anyhow!("boom").into();
        assert_eq!(err.error_type(), ErrorType::Internal);
    }

    #[test]
    fn test_error_type_display() {
        assert_eq!(ErrorType::Request.to_string(), "request");
        assert_eq!(ErrorType::Config.to_string(), "config");
    }
}

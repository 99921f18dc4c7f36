//! Error types for catastro

use thiserror::Error;

use crate::validate::ValidationErrors;

pub type Result<T> = std::result::Result<T, Error>;

/// The two failure kinds a request can surface.
///
/// `Validation` is recoverable by the caller and maps to a 400 response with
/// the accumulated per-field messages. `Store` is a persistence/connectivity
/// failure and maps to a 500 response carrying the underlying error text.
#[derive(Error, Debug)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("store error: {0}")]
    Store(String),
}

impl Error {
    pub fn store(msg: impl Into<String>) -> Self {
        Error::Store(msg.into())
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Store(err.to_string())
    }
}

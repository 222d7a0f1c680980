//! Policy error types.

use crate::Response;
use thiserror::Error;

/// Message used when a denial carries none of its own.
pub const DEFAULT_DENIAL_MESSAGE: &str = "This action is unauthorized.";

/// Boxed error produced by an ability callback, hook or policy method.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Policy errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An authorization check was denied.
    ///
    /// Carries the denying [`Response`] so the host can translate it into a
    /// protocol-level reply (message, application code, status).
    #[error("{}", .response.message().unwrap_or(DEFAULT_DENIAL_MESSAGE))]
    Denied { response: Response },

    /// A callback failed while deciding.
    #[error("callback failed: {0}")]
    Callback(#[source] BoxError),
}

impl Error {
    /// Wrap any error raised inside a callback.
    pub fn callback(err: impl Into<BoxError>) -> Self {
        Self::Callback(err.into())
    }

    /// The denying response, if this is a denial.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Denied { response } => Some(response),
            Self::Callback(_) => None,
        }
    }

    /// The HTTP-style status carried by a denial, if one was set.
    pub fn status(&self) -> Option<u16> {
        self.response().and_then(Response::status)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Transport seam.
//!
//! The REST layer performs exactly one [`HttpClient::execute`] per call and
//! leaves timeouts, pooling and TLS to the implementation. Non-2xx statuses
//! are ordinary [`Response`]s; only a missing response is a
//! [`TransportError`].

use std::future::Future;
use std::sync::Arc;

use derive_more::{Display, Error};

use crate::{Request, Response};

/// Why no response was received.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum TransportError {
    /// Network/connection errors (refused, reset, DNS).
    #[display("connection error: {_0}")]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    Tls(#[error(not(source))] String),

    /// The request did not complete in time.
    #[display("request timeout")]
    Timeout,

    /// The request could not be turned into a wire request.
    #[display("invalid request: {_0}")]
    InvalidRequest(#[error(not(source))] String),
}

impl TransportError {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

/// Core HTTP client trait.
///
/// Implement it to plug another transport, or an in-memory fake in tests.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error when no response was received.
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send;
}

impl<C: HttpClient> HttpClient for Arc<C> {
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send {
        (**self).execute(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_display() {
        assert_eq!(TransportError::Timeout.to_string(), "request timeout");
        assert_eq!(
            TransportError::connection("refused").to_string(),
            "connection error: refused"
        );
        assert_eq!(TransportError::tls("bad cert").to_string(), "TLS error: bad cert");
    }

    #[test]
    fn transport_error_is_timeout() {
        assert!(TransportError::Timeout.is_timeout());
        assert!(!TransportError::connection("refused").is_timeout());
    }
}

//! Error types for restpath.
//!
//! Every failure, whether it comes from validation, the transport, an HTTP status or a
//! malformed response, surfaces as one [`Error`] carrying a stable
//! [`ErrorCode`].

use std::fmt;
use std::str::FromStr;

use derive_more::Display;
use serde_json::{Map, Value};

use crate::RequestDescriptor;

// ============================================================================
// Error Codes
// ============================================================================

/// Closed taxonomy of error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorCode {
    /// The endpoint URL given to `connect` is not a valid base URL.
    #[display("invalidEndpoint")]
    InvalidEndpoint,
    /// The server rejected the request (400).
    #[display("badRequest")]
    BadRequest,
    /// The operation needs an object argument and got none.
    #[display("badRequest.objectRequired")]
    ObjectRequired,
    /// Authentication required (401).
    #[display("unauthorized")]
    Unauthorized,
    /// Not allowed (403).
    #[display("forbidden")]
    Forbidden,
    /// Resource not found (404).
    #[display("notFound")]
    NotFound,
    /// Method not allowed (405).
    #[display("methodNotAllowed")]
    MethodNotAllowed,
    /// Any other failing status.
    #[display("internal")]
    Internal,
    /// No response at all: connection refused, timeout, DNS failure.
    #[display("requestError")]
    RequestError,
    /// The response does not have the expected shape.
    #[display("responseError")]
    ResponseError,
    /// The response has no body but the operation expects one.
    #[display("responseError.noBody")]
    NoBody,
    /// The response body has no `id` but the operation expects one.
    #[display("responseError.noId")]
    NoId,
}

impl ErrorCode {
    /// Every code of the taxonomy.
    pub const ALL: [Self; 12] = [
        Self::InvalidEndpoint,
        Self::BadRequest,
        Self::ObjectRequired,
        Self::Unauthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::MethodNotAllowed,
        Self::Internal,
        Self::RequestError,
        Self::ResponseError,
        Self::NoBody,
        Self::NoId,
    ];

    /// Dotted identifier, e.g. `responseError.noId`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidEndpoint => "invalidEndpoint",
            Self::BadRequest => "badRequest",
            Self::ObjectRequired => "badRequest.objectRequired",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "notFound",
            Self::MethodNotAllowed => "methodNotAllowed",
            Self::Internal => "internal",
            Self::RequestError => "requestError",
            Self::ResponseError => "responseError",
            Self::NoBody => "responseError.noBody",
            Self::NoId => "responseError.noId",
        }
    }

    /// Human message used when nothing more specific is known.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::InvalidEndpoint => "The endpoint URL is not valid.",
            Self::BadRequest => "The server reported an error in the request.",
            Self::ObjectRequired => "This operation requires an object argument.",
            Self::Unauthorized => "Authentication is required to perform this operation.",
            Self::Forbidden => "You are not allowed to perform this operation.",
            Self::NotFound => "The object was not found.",
            Self::MethodNotAllowed => "This operation is not allowed.",
            Self::Internal => "Internal server error.",
            Self::RequestError => "The operation could not be performed.",
            Self::ResponseError => "The response is not valid.",
            Self::NoBody => "The response has no body.",
            Self::NoId => "This operation expected an id but none was received.",
        }
    }

    /// Code for a failing HTTP status.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            405 => Self::MethodNotAllowed,
            _ => Self::Internal,
        }
    }
}

/// Error returned when parsing a code outside the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Display, derive_more::Error)]
#[display("unknown error code: {_0}")]
pub struct UnknownErrorCode(#[error(not(source))] pub String);

impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownErrorCode(s.to_string()))
    }
}

// ============================================================================
// Error Type
// ============================================================================

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Structured error: code, message, contextual info and optional cause.
#[derive(Display)]
#[display("{message} ({code})")]
pub struct Error {
    code: ErrorCode,
    message: String,
    info: Map<String, Value>,
    request: Option<String>,
    cause: Option<BoxError>,
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error with the default message of `code`.
    #[must_use]
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
            info: Map::new(),
            request: None,
            cause: None,
        }
    }

    /// Replace the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add one entry to `info`.
    #[must_use]
    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.info.insert(key.into(), value.into());
        self
    }

    /// Replace `info` as a whole.
    #[must_use]
    pub fn with_info_map(mut self, info: Map<String, Value>) -> Self {
        self.info = info;
        self
    }

    /// Attach the underlying cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Record the originating request description, leaving `info` alone.
    #[must_use]
    pub fn with_request(mut self, request: &RequestDescriptor) -> Self {
        self.request = Some(request.description().to_string());
        self
    }

    /// Record the originating request and add its `method` and `url` to `info`.
    #[must_use]
    pub fn with_request_info(self, request: &RequestDescriptor) -> Self {
        self.with_request(request)
            .with_info("method", request.method().to_string())
            .with_info("url", request.url())
    }

    /// Stable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Contextual information.
    #[must_use]
    pub fn info(&self) -> &Map<String, Value> {
        &self.info
    }

    /// Description (`"<METHOD> <url>"`) of the request that failed, if any.
    #[must_use]
    pub fn request(&self) -> Option<&str> {
        self.request.as_deref()
    }

    /// HTTP status, when the error comes from a failing status.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.info
            .get("status")
            .and_then(Value::as_u64)
            .and_then(|status| u16::try_from(status).ok())
    }

    /// Returns `true` if the error has the given code.
    #[must_use]
    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("code", &self.code.as_str())
            .field("message", &self.message)
            .field("info", &self.info)
            .field("request", &self.request)
            .field("cause", &self.cause)
            .finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use serde_json::json;

    use super::*;

    #[test]
    fn code_strings() {
        assert_eq!(ErrorCode::ObjectRequired.as_str(), "badRequest.objectRequired");
        assert_eq!(ErrorCode::NoId.to_string(), "responseError.noId");
        for code in ErrorCode::ALL {
            assert_eq!(code.as_str(), code.to_string());
        }
    }

    #[test]
    fn code_parse() {
        for code in ErrorCode::ALL {
            assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(code));
        }
        assert!("teapot".parse::<ErrorCode>().is_err());
    }

    #[test]
    fn code_from_status() {
        assert_eq!(ErrorCode::from_status(400), ErrorCode::BadRequest);
        assert_eq!(ErrorCode::from_status(401), ErrorCode::Unauthorized);
        assert_eq!(ErrorCode::from_status(403), ErrorCode::Forbidden);
        assert_eq!(ErrorCode::from_status(404), ErrorCode::NotFound);
        assert_eq!(ErrorCode::from_status(405), ErrorCode::MethodNotAllowed);
        assert_eq!(ErrorCode::from_status(500), ErrorCode::Internal);
        assert_eq!(ErrorCode::from_status(418), ErrorCode::Internal);
        assert_eq!(ErrorCode::from_status(503), ErrorCode::Internal);
    }

    #[test]
    fn error_display() {
        let err = Error::new(ErrorCode::NotFound);
        assert_eq!(err.to_string(), "The object was not found. (notFound)");

        let err = Error::new(ErrorCode::BadRequest).with_message("nope");
        assert_eq!(err.to_string(), "nope (badRequest)");
    }

    #[test]
    fn error_info_and_status() {
        let err = Error::new(ErrorCode::NotFound).with_info("status", 404);
        assert_eq!(err.info().get("status"), Some(&json!(404)));
        assert_eq!(err.status(), Some(404));
        assert!(err.is(ErrorCode::NotFound));

        assert_eq!(Error::new(ErrorCode::RequestError).status(), None);
    }

    #[test]
    fn error_source() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::new(ErrorCode::RequestError).with_cause(cause);
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "refused");

        assert!(Error::new(ErrorCode::Internal).source().is_none());
    }
}

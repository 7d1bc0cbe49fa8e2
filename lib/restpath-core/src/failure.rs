//! Failed exchanges to structured errors.

use serde_json::{Map, Value};

use crate::{Error, ErrorCode, RequestDescriptor, TransportError};

/// What went wrong with an exchange.
#[derive(Debug)]
pub enum Failure {
    /// A response came back with a non-2xx status.
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, when it is JSON.
        body: Option<Value>,
    },
    /// No response came back at all.
    Transport(TransportError),
}

/// Build the [`Error`] for a failed exchange of `request`.
///
/// For a failing status the code and message default from the status, then
/// the server's own `{message, code, info}` body wins: `message` if it is a non-empty
/// string, `code` if it names a known code, `info` if it is an object.
/// `info` is `{status}` otherwise. A transport failure is a `requestError`
/// whose `info` holds the request `method` and `url`.
#[must_use]
pub fn map_error(failure: Failure, request: &RequestDescriptor) -> Error {
    match failure {
        Failure::Status { status, body } => {
            let server = match body {
                Some(Value::Object(map)) => map,
                _ => Map::new(),
            };

            let code = server
                .get("code")
                .and_then(Value::as_str)
                .and_then(|code| code.parse::<ErrorCode>().ok())
                .unwrap_or(ErrorCode::from_status(status));

            let message = server
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .map_or_else(|| code.default_message().to_string(), str::to_string);

            let info = match server.get("info") {
                Some(Value::Object(info)) => info.clone(),
                _ => Map::from_iter([("status".to_string(), Value::from(status))]),
            };

            Error::new(code)
                .with_message(message)
                .with_info_map(info)
                .with_request(request)
        }
        Failure::Transport(cause) => Error::new(ErrorCode::RequestError)
            .with_request_info(request)
            .with_cause(cause),
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use serde_json::json;

    use super::*;
    use crate::{OperationKind, Path, build_request};

    fn request() -> RequestDescriptor {
        build_request(OperationKind::Get, &Path::root().child("people").child(1), None, None)
    }

    fn status(status: u16, body: Option<Value>) -> Error {
        map_error(Failure::Status { status, body }, &request())
    }

    #[test]
    fn not_found_defaults() {
        let err = status(404, Some(json!({})));

        check!(err.code() == ErrorCode::NotFound);
        check!(err.message() == ErrorCode::NotFound.default_message());
        check!(Value::Object(err.info().clone()) == json!({"status": 404}));
        check!(err.request() == Some("GET /people/1"));
    }

    #[test]
    fn status_table() {
        for (code, expected) in [
            (400, ErrorCode::BadRequest),
            (401, ErrorCode::Unauthorized),
            (403, ErrorCode::Forbidden),
            (404, ErrorCode::NotFound),
            (405, ErrorCode::MethodNotAllowed),
            (409, ErrorCode::Internal),
            (500, ErrorCode::Internal),
            (502, ErrorCode::Internal),
        ] {
            check!(status(code, None).code() == expected);
        }
    }

    #[test]
    fn server_error_shape_wins() {
        let err = status(
            400,
            Some(json!({
                "message": "name is invalid",
                "code": "badRequest.objectRequired",
                "info": {"field": "name"},
            })),
        );

        check!(err.code() == ErrorCode::ObjectRequired);
        check!(err.message() == "name is invalid");
        check!(Value::Object(err.info().clone()) == json!({"field": "name"}));
    }

    #[test]
    fn unknown_server_code_keeps_status_code() {
        let err = status(403, Some(json!({"code": "INVALID_NAME", "message": "nope"})));

        check!(err.code() == ErrorCode::Forbidden);
        check!(err.message() == "nope");
        check!(err.status() == Some(403));
    }

    #[test]
    fn empty_server_message_keeps_default() {
        let err = status(404, Some(json!({"message": ""})));

        check!(err.code() == ErrorCode::NotFound);
        check!(err.message() == ErrorCode::NotFound.default_message());
    }

    #[test]
    fn non_object_body_is_ignored() {
        let err = status(500, Some(json!("boom")));
        check!(err.code() == ErrorCode::Internal);
        check!(err.message() == ErrorCode::Internal.default_message());
    }

    #[test]
    fn connection_failure() {
        let err = map_error(
            Failure::Transport(TransportError::connection("connection refused")),
            &request(),
        );

        check!(err.code() == ErrorCode::RequestError);
        check!(err.message() == ErrorCode::RequestError.default_message());
        check!(Value::Object(err.info().clone()) == json!({"method": "GET", "url": "/people/1"}));
        check!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn timeout_is_a_request_error() {
        let err = map_error(Failure::Transport(TransportError::Timeout), &request());
        check!(err.code() == ErrorCode::RequestError);
    }
}

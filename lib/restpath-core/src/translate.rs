//! Response bodies to results.

use serde_json::Value;

use crate::{Error, ErrorCode, Operation, Result};

/// Turn the body of a successful response into the operation's result.
///
/// - operations expecting nothing resolve to [`Value::Null`], whatever the body;
/// - an absent or `null` body fails with `responseError.noBody` otherwise;
/// - result operations unwrap `{"result": x}` to `x` and return any other body as is;
/// - identifier operations return the `id` field, or fail with
///   `responseError.noId` carrying the body as `info.data`.
///
/// Errors carry no request context; the caller attaches it.
pub fn translate(operation: Operation, body: Option<Value>) -> Result<Value> {
    if !operation.expects_body() {
        return Ok(Value::Null);
    }

    let body = match body {
        None | Some(Value::Null) => return Err(Error::new(ErrorCode::NoBody)),
        Some(body) => body,
    };

    if operation.expects_id() {
        return extract_id(body);
    }
    Ok(unwrap_result(body))
}

fn unwrap_result(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("result") => {
            map.remove("result").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn extract_id(body: Value) -> Result<Value> {
    match body {
        Value::Object(mut map) if map.contains_key("id") => {
            Ok(map.remove("id").unwrap_or(Value::Null))
        }
        other => Err(Error::new(ErrorCode::NoId).with_info("data", other)),
    }
}

/// Decode a result into a typed value.
///
/// Failures are `responseError`s whose `info.path` points at the offending
/// field.
pub fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        let message = err.inner().to_string();
        Error::new(ErrorCode::ResponseError)
            .with_message(format!("response could not be decoded at '{path}': {message}"))
            .with_info("path", path)
            .with_cause(err.into_inner())
    })
}

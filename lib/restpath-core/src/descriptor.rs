//! Resolved REST requests.

use serde_json::Value;

use crate::{Method, Operation, OperationKind, Path, QueryOptions};

/// A fully resolved request, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    kind: OperationKind,
    url: String,
    body: Option<Value>,
    description: String,
}

impl RequestDescriptor {
    /// Name of the operation.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Wire semantics of the operation.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.kind.operation()
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.kind.method()
    }

    /// URL relative to the endpoint, always starting with `/`.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// JSON body to send, if the operation sends one.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// `"<METHOD> <url>"`, for logs and error context.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Build the request for `kind` against `path`.
///
/// The body is only kept for operations that send one; those always send an
/// object, `{}` when `body` is absent or `null`. Non-empty `options` become
/// the query string.
#[must_use]
pub fn build_request(
    kind: OperationKind,
    path: &Path,
    body: Option<Value>,
    options: Option<&QueryOptions>,
) -> RequestDescriptor {
    let mut url = path.to_url_path();
    if let Some(options) = options.filter(|options| !options.is_empty()) {
        url.push('?');
        url.push_str(&options.encode());
    }

    let body = kind.operation().requires_body().then(|| match body {
        None | Some(Value::Null) => Value::Object(serde_json::Map::new()),
        Some(body) => body,
    });

    let description = format!("{} {url}", kind.method());

    RequestDescriptor {
        kind,
        url,
        body,
        description,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn people_phones() -> Path {
        Path::root().child("people").child(123).child("phones")
    }

    #[test]
    fn url_and_description() {
        let request = build_request(OperationKind::List, &people_phones(), None, None);

        assert_eq!(request.url(), "/people/123/phones");
        assert_eq!(request.description(), "GET /people/123/phones");
        assert_eq!(request.method(), Method::Get);
        assert!(request.body().is_none());
    }

    #[test]
    fn root_url() {
        let request = build_request(OperationKind::Invoke, &Path::root(), None, None);
        assert_eq!(request.url(), "/");
        assert_eq!(request.description(), "POST /");
    }

    #[test]
    fn with_options() {
        let options = QueryOptions::new().with("skip", 6);
        let request = build_request(OperationKind::List, &people_phones(), None, Some(&options));

        assert_eq!(request.url(), "/people/123/phones?skip=6");
        assert_eq!(request.description(), "GET /people/123/phones?skip=6");
    }

    #[test]
    fn empty_options_add_no_query() {
        let options = QueryOptions::new();
        let request = build_request(OperationKind::Get, &people_phones(), None, Some(&options));
        assert_eq!(request.url(), "/people/123/phones");
    }

    #[test]
    fn body_is_dropped_for_bodiless_operations() {
        let request = build_request(
            OperationKind::Remove,
            &people_phones(),
            Some(json!({"foo": "bar"})),
            None,
        );
        assert!(request.body().is_none());
        assert_eq!(request.description(), "DELETE /people/123/phones");
    }

    #[test]
    fn body_defaults_to_empty_object() {
        let request = build_request(OperationKind::Create, &people_phones(), None, None);
        assert_eq!(request.body(), Some(&json!({})));

        let request = build_request(OperationKind::Invoke, &people_phones(), Some(Value::Null), None);
        assert_eq!(request.body(), Some(&json!({})));
    }

    #[test]
    fn body_is_forwarded() {
        let request = build_request(
            OperationKind::Update,
            &people_phones(),
            Some(json!({"foo": "bar"})),
            None,
        );
        assert_eq!(request.method(), Method::Patch);
        assert_eq!(request.body(), Some(&json!({"foo": "bar"})));
    }

    #[test]
    fn build_is_deterministic() {
        let options = QueryOptions::new().with("a", json!([1, 2])).with("b", "x y");
        let first = build_request(OperationKind::Replace, &people_phones(), None, Some(&options));
        let second = build_request(OperationKind::Replace, &people_phones(), None, Some(&options));
        assert_eq!(first, second);
    }
}

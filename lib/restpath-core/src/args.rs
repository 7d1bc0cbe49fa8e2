//! Call arguments of the REST operations.
//!
//! Each operation takes one of these; the `From` conversions let callers pass
//! plain values: `()`, an id, [`QueryOptions`], a JSON body or a
//! `(body, options)` pair.

use serde_json::Value;

use crate::{Error, ErrorCode, QueryOptions, Result, Segment};

/// Argument of `get` and `remove`: nothing, an identifier appended to the
/// path, or query options.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Target {
    /// The path as it is.
    #[default]
    Collection,
    /// One more path segment.
    Id(Segment),
    /// The path as it is, with query options.
    Options(QueryOptions),
}

impl Target {
    /// Split into the extra segment and the options.
    #[must_use]
    pub fn into_parts(self) -> (Option<Segment>, Option<QueryOptions>) {
        match self {
            Self::Collection => (None, None),
            Self::Id(id) => (Some(id), None),
            Self::Options(options) => (None, Some(options)),
        }
    }
}

impl From<()> for Target {
    fn from((): ()) -> Self {
        Self::Collection
    }
}

impl From<QueryOptions> for Target {
    fn from(options: QueryOptions) -> Self {
        Self::Options(options)
    }
}

impl From<Segment> for Target {
    fn from(id: Segment) -> Self {
        Self::Id(id)
    }
}

macro_rules! target_from_id {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Target {
                fn from(id: $ty) -> Self {
                    Self::Id(Segment::from(id))
                }
            }
        )*
    };
}

target_from_id!(
    &str, String, &String, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
);

/// Argument of `list`: optional query options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query(pub Option<QueryOptions>);

impl From<()> for Query {
    fn from((): ()) -> Self {
        Self(None)
    }
}

impl From<QueryOptions> for Query {
    fn from(options: QueryOptions) -> Self {
        Self(Some(options))
    }
}

impl From<Option<QueryOptions>> for Query {
    fn from(options: Option<QueryOptions>) -> Self {
        Self(options)
    }
}

/// Argument of `create`, `update`, `replace` and `invoke`: a JSON body and
/// optional query options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    body: Option<Value>,
    options: Option<QueryOptions>,
}

impl Payload {
    /// No body, no options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload with a JSON body.
    #[must_use]
    pub fn body(body: impl Into<Value>) -> Self {
        Self {
            body: Some(body.into()),
            options: None,
        }
    }

    /// Payload with any serializable body.
    pub fn json<T: serde::Serialize + ?Sized>(body: &T) -> Result<Self> {
        let body = serde_json::to_value(body).map_err(|err| {
            Error::new(ErrorCode::BadRequest)
                .with_message("request body could not be serialized")
                .with_cause(err)
        })?;
        Ok(Self::body(body))
    }

    /// Set the query options.
    #[must_use]
    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// The body, if any.
    #[must_use]
    pub fn get_body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Returns `true` when the body is absent or `null`.
    #[must_use]
    pub fn is_missing_body(&self) -> bool {
        matches!(self.body, None | Some(Value::Null))
    }

    /// Split into body and options.
    #[must_use]
    pub fn into_parts(self) -> (Option<Value>, Option<QueryOptions>) {
        (self.body, self.options)
    }
}

impl From<()> for Payload {
    fn from((): ()) -> Self {
        Self::new()
    }
}

impl From<Value> for Payload {
    fn from(body: Value) -> Self {
        Self::body(body)
    }
}

impl From<(Value, QueryOptions)> for Payload {
    fn from((body, options): (Value, QueryOptions)) -> Self {
        Self::body(body).with_options(options)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn primitives_are_ids() {
        assert_eq!(Target::from(123), Target::Id(Segment::from("123")));
        assert_eq!(Target::from("abc"), Target::Id(Segment::from("abc")));
        assert_eq!(Target::from(7_u64).into_parts(), (Some(Segment::from(7)), None));
    }

    #[test]
    fn options_are_not_ids() {
        let options = QueryOptions::new().with("skip", 6);
        assert_eq!(
            Target::from(options.clone()).into_parts(),
            (None, Some(options))
        );
        assert_eq!(Target::from(()).into_parts(), (None, None));
    }

    #[test]
    fn payload_conversions() {
        let payload = Payload::from(json!({"foo": "bar"}));
        assert_eq!(payload.get_body(), Some(&json!({"foo": "bar"})));
        assert!(!payload.is_missing_body());

        let options = QueryOptions::new().with("skip", 6);
        let (body, opts) = Payload::from((json!({"arg": 123}), options.clone())).into_parts();
        assert_eq!(body, Some(json!({"arg": 123})));
        assert_eq!(opts, Some(options));
    }

    #[test]
    fn missing_body() {
        assert!(Payload::from(()).is_missing_body());
        assert!(Payload::from(Value::Null).is_missing_body());
    }

    #[test]
    fn payload_from_struct() {
        #[derive(serde::Serialize)]
        struct Phone {
            number: String,
        }

        let payload = Payload::json(&Phone {
            number: "555".to_string(),
        })
        .expect("serialize");
        assert_eq!(payload.get_body(), Some(&json!({"number": "555"})));
    }

    #[test]
    fn query_conversions() {
        assert_eq!(Query::from(()), Query(None));
        let options = QueryOptions::new().with("type", "mobile");
        assert_eq!(Query::from(options.clone()), Query(Some(options)));
    }
}

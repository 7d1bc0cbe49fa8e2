//! The supported REST operations and what each expects on the wire.

use derive_more::Display;

use crate::Method;

/// Wire semantics of a REST operation.
///
/// At most one of [`expects_result`](Self::expects_result) and
/// [`expects_id`](Self::expects_id) is set; when neither is, the operation
/// resolves to nothing and the response body is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    method: Method,
    requires_body: bool,
    expects_result: bool,
    expects_id: bool,
}

impl Operation {
    const fn new(
        method: Method,
        requires_body: bool,
        expects_result: bool,
        expects_id: bool,
    ) -> Self {
        Self {
            method,
            requires_body,
            expects_result,
            expects_id,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// A body is always sent, `{}` when the caller supplied none.
    #[must_use]
    pub const fn requires_body(&self) -> bool {
        self.requires_body
    }

    /// The (possibly `{"result": ..}` wrapped) response body is the result.
    #[must_use]
    pub const fn expects_result(&self) -> bool {
        self.expects_result
    }

    /// The response body must carry an `id` that becomes the result.
    #[must_use]
    pub const fn expects_id(&self) -> bool {
        self.expects_id
    }

    /// Returns `true` if the operation needs a response body at all.
    #[must_use]
    pub const fn expects_body(&self) -> bool {
        self.expects_result || self.expects_id
    }
}

/// Name of a supported operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum OperationKind {
    /// Retrieve a single resource.
    #[display("get")]
    Get,
    /// Retrieve a collection.
    #[display("list")]
    List,
    /// Create a resource, resolving to its identifier.
    #[display("create")]
    Create,
    /// Partially update a resource.
    #[display("update")]
    Update,
    /// Replace a resource, resolving to the stored representation.
    #[display("replace")]
    Replace,
    /// Delete a resource.
    #[display("remove")]
    Remove,
    /// RPC-style call.
    #[display("invoke")]
    Invoke,
}

impl OperationKind {
    /// Every operation, in table order.
    pub const ALL: [Self; 7] = [
        Self::Get,
        Self::List,
        Self::Create,
        Self::Update,
        Self::Replace,
        Self::Remove,
        Self::Invoke,
    ];

    /// The fixed [`Operation`] for this name.
    #[must_use]
    pub const fn operation(self) -> Operation {
        match self {
            Self::Get | Self::List => Operation::new(Method::Get, false, true, false),
            Self::Create => Operation::new(Method::Post, true, false, true),
            Self::Update => Operation::new(Method::Patch, true, false, false),
            Self::Replace => Operation::new(Method::Put, true, true, false),
            Self::Remove => Operation::new(Method::Delete, false, false, false),
            Self::Invoke => Operation::new(Method::Post, true, true, false),
        }
    }

    /// HTTP method of the operation.
    #[must_use]
    pub const fn method(self) -> Method {
        self.operation().method()
    }
}

//! Fluent client for resource-oriented REST APIs.
//!
//! Resource paths are written as chains on a per-operation proxy and sent
//! when the chain is called. Every failure, from the network, the HTTP
//! status or the response shape, comes back as one [`Error`] with a stable
//! [`ErrorCode`].
//!
//! # Example
//!
//! ```ignore
//! use restpath::prelude::*;
//!
//! let client = restpath::connect("https://api.example.com", None)?;
//!
//! // GET /people/123
//! let person = client.get.at("people").call(123).await?;
//!
//! // GET /people/123/phones?type=mobile
//! let phones = path!(client.list, people[123].phones)
//!     .call(QueryOptions::new().with("type", "mobile"))
//!     .await?;
//!
//! // PATCH /people/123
//! (&client.update / "people" / 123).call(json!({"name": "Ada"})).await?;
//!
//! // Typed results
//! #[derive(Deserialize)]
//! struct Person { name: String }
//! let person: Person = decode(client.get.at("people").call(123).await?)?;
//! ```

mod client;
mod config;
mod connector;
pub mod prelude;
mod rest_client;

// Re-export client types
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_TIMEOUT};
pub use rest_client::{
    Create, Get, Invoke, List, Remove, Replace, Reply, RestClient, Update, connect,
};

// Re-export tower for layer composition
pub use tower;

// Re-export core types
pub use restpath_core::{
    Error, ErrorCode, Failure, HandlerFn, HttpClient, Method, Operation, OperationKind, Path,
    PathHandler, PathProxy, Payload, Query, QueryOptions, Request, RequestBuilder, RequestContext,
    RequestDescriptor, Response, Result, Segment, TXID_HEADER, Target, TransportError,
    UnknownErrorCode, build_request, decode, handler_fn, map_error, translate,
};

// Re-export JSON values, the currency of bodies and results
pub use serde_json::{Value, json};

// Re-export macros
pub use restpath_macro::path;

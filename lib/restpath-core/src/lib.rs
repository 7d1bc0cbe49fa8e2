//! Core types for the restpath fluent REST client.
//!
//! This crate holds everything that does not touch the network:
//! - [`Path`], [`Segment`] and the [`PathProxy`] engine that accumulates them
//! - [`Operation`] and the [`OperationKind`] table
//! - [`QueryOptions`] and their deterministic query-string encoding
//! - [`RequestDescriptor`] and [`build_request`]
//! - [`translate`] for response bodies and [`map_error`] for failures
//! - [`Error`], [`ErrorCode`] and [`Result`]
//! - [`HttpClient`], the transport seam, with its [`Request`] and [`Response`]
//! - [`RequestContext`] for transaction id and header propagation
//! - [`Target`], [`Query`] and [`Payload`] call arguments

mod args;
mod client;
mod context;
mod descriptor;
mod error;
mod failure;
mod method;
mod operation;
mod path;
pub mod prelude;
mod proxy;
mod query;
mod request;
mod response;
mod translate;

pub use args::{Payload, Query, Target};
pub use client::{HttpClient, TransportError};
pub use context::{RequestContext, TXID_HEADER};
pub use descriptor::{RequestDescriptor, build_request};
pub use error::{Error, ErrorCode, Result, UnknownErrorCode};
pub use failure::{Failure, map_error};
pub use method::Method;
pub use operation::{Operation, OperationKind};
pub use path::{Path, Segment};
pub use proxy::{HandlerFn, PathHandler, PathProxy, handler_fn};
pub use query::QueryOptions;
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use translate::{decode, translate};

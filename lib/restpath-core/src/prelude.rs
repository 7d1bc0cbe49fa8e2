//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use restpath_core::prelude::*;
//! ```

pub use crate::{
    Error, ErrorCode, HttpClient, Method, Path, PathHandler, PathProxy, Payload, Query,
    QueryOptions, Request, RequestContext, Response, Result, Segment, Target, decode, handler_fn,
};

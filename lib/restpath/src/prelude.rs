//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types, functions, and macros
//! for easy glob importing:
//!
//! ```ignore
//! use restpath::prelude::*;
//! ```

pub use crate::{
    Error, ErrorCode, HttpClient, HyperClient, Payload, Query, QueryOptions, RequestContext,
    RestClient, Result, Target, Value, connect, decode, json, path,
};
pub use serde::{Deserialize, Serialize};

//! Procedural macros for the restpath fluent REST client.
//!
//! - `path!` - write a resource path as member/index access on a proxy
//!
//! # Example
//!
//! ```ignore
//! use restpath::path;
//!
//! let phones = path!(client.list, people[123].phones);
//! // same as: client.list.at("people").at(123).at("phones")
//! let all = phones.call(()).await?;
//! ```

mod expand;

use proc_macro::TokenStream;

/// Extend a path proxy with a chain of member and index accesses.
///
/// `path!(base, a.b[expr].c)` expands to `(base).at("a").at("b").at(expr).at("c")`.
///
/// - names become string segments; raw identifiers lose their `r#`, so
///   `r#type` is the segment `"type"`
/// - brackets take any expression convertible to a segment: integer
///   literals, variables, or string literals for names that are not
///   identifiers (`["x-y"]`)
/// - tuple members (`a.0`) become `"0"`
///
/// # Example
///
/// ```ignore
/// let id = 123;
/// let kinds = path!(client.get, people[id].phones.r#type);
/// let mobile = path!(client.get, config["feature-flags"].mobile);
/// ```
#[proc_macro]
pub fn path(input: TokenStream) -> TokenStream {
    expand::expand_path(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

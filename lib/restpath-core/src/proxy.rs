//! Path-proxy dispatch.
//!
//! A [`PathProxy`] pairs a terminal [`PathHandler`] with the path accumulated
//! so far. Member access is [`PathProxy::at`] (or `/`, or the `path!` macro
//! in `restpath`), and [`PathProxy::call`] hands the path plus the call
//! arguments to the handler:
//!
//! ```
//! use restpath_core::{Path, PathProxy, handler_fn};
//!
//! let echo = PathProxy::new(handler_fn(|path: Path, n: u32| (path.to_string(), n)));
//!
//! let people = echo.at("people");
//! assert_eq!(people.at(123).at("phones").call(7u32), ("/people/123/phones".to_string(), 7));
//! assert_eq!(people.call(1u32), ("/people".to_string(), 1));
//! assert_eq!((&echo / "type" / 2).call(0u32), ("/type/2".to_string(), 0));
//! ```
//!
//! Proxies hold no mutable state, so a proxy can be stored, cloned and
//! invoked any number of times, from any number of tasks.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Div;
use std::sync::Arc;

use crate::{Path, Segment};

/// Terminal handler invoked with the accumulated path.
pub trait PathHandler {
    /// Call arguments.
    type Args;
    /// What an invocation returns.
    type Output;

    /// Handle one invocation.
    fn handle(&self, path: Path, args: Self::Args) -> Self::Output;
}

/// [`PathHandler`] built from a closure, see [`handler_fn`].
pub struct HandlerFn<F, A, R> {
    f: F,
    _signature: PhantomData<fn(A) -> R>,
}

/// Build a [`PathHandler`] from a closure taking the path and the arguments.
pub fn handler_fn<F, A, R>(f: F) -> HandlerFn<F, A, R>
where
    F: Fn(Path, A) -> R,
{
    HandlerFn {
        f,
        _signature: PhantomData,
    }
}

impl<F, A, R> PathHandler for HandlerFn<F, A, R>
where
    F: Fn(Path, A) -> R,
{
    type Args = A;
    type Output = R;

    fn handle(&self, path: Path, args: A) -> R {
        (self.f)(path, args)
    }
}

impl<F, A, R> fmt::Debug for HandlerFn<F, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}

/// Reusable handle on a handler and an accumulated path.
pub struct PathProxy<H> {
    handler: Arc<H>,
    path: Path,
}

impl<H> PathProxy<H> {
    /// Root proxy (empty path) over `handler`.
    #[must_use]
    pub fn new(handler: H) -> Self {
        Self::from_shared(Arc::new(handler))
    }

    /// Root proxy over an already shared handler.
    #[must_use]
    pub fn from_shared(handler: Arc<H>) -> Self {
        Self {
            handler,
            path: Path::root(),
        }
    }

    /// Child proxy with `segment` appended to the path.
    #[must_use]
    pub fn at(&self, segment: impl Into<Segment>) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            path: self.path.child(segment),
        }
    }

    /// Path accumulated so far.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The terminal handler.
    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }
}

impl<H: PathHandler> PathProxy<H> {
    /// Invoke the handler with the accumulated path and `args`.
    pub fn call(&self, args: impl Into<H::Args>) -> H::Output {
        self.handler.handle(self.path.clone(), args.into())
    }
}

impl<H> Clone for PathProxy<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            path: self.path.clone(),
        }
    }
}

impl<H> fmt::Debug for PathProxy<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathProxy")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl<H, S: Into<Segment>> Div<S> for &PathProxy<H> {
    type Output = PathProxy<H>;

    fn div(self, segment: S) -> PathProxy<H> {
        self.at(segment)
    }
}

impl<H, S: Into<Segment>> Div<S> for PathProxy<H> {
    type Output = Self;

    fn div(self, segment: S) -> Self {
        Self {
            path: self.path.child(segment),
            handler: self.handler,
        }
    }
}

//! The fluent REST client.
//!
//! [`RestClient`] exposes one [`PathProxy`] per operation. Each handler
//! builds a [`RequestDescriptor`], performs exactly one exchange through the
//! [`HttpClient`], then translates the response or maps the failure.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use restpath_core::{
    Error, ErrorCode, Failure, HttpClient, OperationKind, Path, PathHandler, PathProxy, Payload,
    Query, QueryOptions, Request, RequestContext, RequestDescriptor, Result, Target, build_request,
    map_error, translate,
};
use serde_json::Value;
use tracing::{Instrument, debug, debug_span, error};
use url::Url;

use crate::{ClientConfig, HyperClient};

/// Future returned by every operation.
pub type Reply<T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'static>>;

/// What the handlers of one client share.
struct Shared<C> {
    client: C,
    base_url: Url,
    context: RequestContext,
}

impl<C> Shared<C> {
    /// Transport request for `descriptor`: endpoint URL joined with the
    /// descriptor URL, context headers, JSON `Accept`, and the JSON body.
    fn prepare(&self, descriptor: &RequestDescriptor) -> Result<Request> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = Url::parse(&format!("{base}{}", descriptor.url())).map_err(|err| {
            Error::new(ErrorCode::RequestError)
                .with_message(format!("invalid request URL: {err}"))
                .with_request_info(descriptor)
                .with_cause(err)
        })?;

        let mut builder = Request::builder(descriptor.method(), url)
            .headers(self.context.to_headers())
            .header("Accept", "application/json");

        if let Some(body) = descriptor.body() {
            builder = builder
                .json(body)
                .map_err(|err| err.with_request_info(descriptor))?;
        }

        Ok(builder.build())
    }
}

impl<C: HttpClient> Shared<C> {
    /// Run one request, logging its outcome.
    async fn perform(&self, descriptor: RequestDescriptor) -> Result<Value> {
        let span = debug_span!("rest_request", request = %descriptor.description());

        async {
            debug!(request = %descriptor.description(), "sending request");
            let start = Instant::now();

            let result = self.exchange(&descriptor).await;
            let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(_) => debug!(elapsed_ms, "request completed"),
                Err(err) => log_failure(&descriptor, err),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn exchange(&self, descriptor: &RequestDescriptor) -> Result<Value> {
        let request = self.prepare(descriptor)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|err| map_error(Failure::Transport(err), descriptor))?;

        let status = response.status();
        if !response.is_success() {
            // Error bodies that are not JSON fall back to the status defaults
            let body = response.json_body().ok().flatten();
            return Err(map_error(Failure::Status { status, body }, descriptor));
        }
        debug!(status, "response received");

        let body = response.json_body().map_err(|err| {
            Error::new(ErrorCode::ResponseError)
                .with_message("the response body is not valid JSON")
                .with_request_info(descriptor)
                .with_cause(err)
        })?;

        translate(descriptor.operation(), body).map_err(|err| err.with_request_info(descriptor))
    }
}

/// The single place a failed request is logged.
fn log_failure(descriptor: &RequestDescriptor, err: &Error) {
    error!(
        request = %descriptor.description(),
        code = %err.code(),
        error = %err,
        "request failed"
    );
}

/// Failed [`Reply`] for an error found before any exchange.
fn reject<T: Send + 'static>(descriptor: &RequestDescriptor, err: Error) -> Reply<T> {
    log_failure(descriptor, &err);
    Box::pin(std::future::ready(Err(err)))
}

fn run<C: HttpClient + 'static>(
    shared: &Arc<Shared<C>>,
    descriptor: RequestDescriptor,
) -> Reply<Value> {
    let shared = Arc::clone(shared);
    Box::pin(async move { shared.perform(descriptor).await })
}

fn run_void<C: HttpClient + 'static>(
    shared: &Arc<Shared<C>>,
    descriptor: RequestDescriptor,
) -> Reply<()> {
    let shared = Arc::clone(shared);
    Box::pin(async move { shared.perform(descriptor).await.map(|_| ()) })
}

/// `path` with the identifier of `target` appended, and its options.
fn resolve_target(path: Path, target: Target) -> (Path, Option<QueryOptions>) {
    let (id, options) = target.into_parts();
    let path = match id {
        Some(id) => path.child(id),
        None => path,
    };
    (path, options)
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET` a resource; an identifier argument is appended to the path.
pub struct Get<C>(Arc<Shared<C>>);

impl<C: HttpClient + 'static> PathHandler for Get<C> {
    type Args = Target;
    type Output = Reply<Value>;

    fn handle(&self, path: Path, target: Target) -> Reply<Value> {
        let (path, options) = resolve_target(path, target);
        run(&self.0, build_request(OperationKind::Get, &path, None, options.as_ref()))
    }
}

/// `GET` a collection.
pub struct List<C>(Arc<Shared<C>>);

impl<C: HttpClient + 'static> PathHandler for List<C> {
    type Args = Query;
    type Output = Reply<Value>;

    fn handle(&self, path: Path, Query(options): Query) -> Reply<Value> {
        run(&self.0, build_request(OperationKind::List, &path, None, options.as_ref()))
    }
}

/// `POST` a new resource, resolving to its identifier.
pub struct Create<C>(Arc<Shared<C>>);

impl<C: HttpClient + 'static> PathHandler for Create<C> {
    type Args = Payload;
    type Output = Reply<Value>;

    fn handle(&self, path: Path, payload: Payload) -> Reply<Value> {
        let (body, options) = payload.into_parts();
        run(&self.0, build_request(OperationKind::Create, &path, body, options.as_ref()))
    }
}

/// `PATCH` some properties of a resource.
///
/// Fails with `badRequest.objectRequired`, without any exchange, when the
/// body is absent or `null`.
pub struct Update<C>(Arc<Shared<C>>);

impl<C: HttpClient + 'static> PathHandler for Update<C> {
    type Args = Payload;
    type Output = Reply<()>;

    fn handle(&self, path: Path, payload: Payload) -> Reply<()> {
        let missing = payload.is_missing_body();
        let (body, options) = payload.into_parts();
        let descriptor = build_request(OperationKind::Update, &path, body, options.as_ref());

        if missing {
            let err = Error::new(ErrorCode::ObjectRequired).with_request_info(&descriptor);
            return reject(&descriptor, err);
        }
        run_void(&self.0, descriptor)
    }
}

/// `PUT` a whole resource, resolving to the stored resource.
pub struct Replace<C>(Arc<Shared<C>>);

impl<C: HttpClient + 'static> PathHandler for Replace<C> {
    type Args = Payload;
    type Output = Reply<Value>;

    fn handle(&self, path: Path, payload: Payload) -> Reply<Value> {
        let (body, options) = payload.into_parts();
        run(&self.0, build_request(OperationKind::Replace, &path, body, options.as_ref()))
    }
}

/// `DELETE` a resource; an identifier argument is appended to the path.
pub struct Remove<C>(Arc<Shared<C>>);

impl<C: HttpClient + 'static> PathHandler for Remove<C> {
    type Args = Target;
    type Output = Reply<()>;

    fn handle(&self, path: Path, target: Target) -> Reply<()> {
        let (path, options) = resolve_target(path, target);
        run_void(&self.0, build_request(OperationKind::Remove, &path, None, options.as_ref()))
    }
}

/// `POST` an RPC-style call, resolving to its unwrapped result.
pub struct Invoke<C>(Arc<Shared<C>>);

impl<C: HttpClient + 'static> PathHandler for Invoke<C> {
    type Args = Payload;
    type Output = Reply<Value>;

    fn handle(&self, path: Path, payload: Payload) -> Reply<Value> {
        let (body, options) = payload.into_parts();
        run(&self.0, build_request(OperationKind::Invoke, &path, body, options.as_ref()))
    }
}

// ============================================================================
// Client
// ============================================================================

/// Fluent client over a REST endpoint.
///
/// Every field is a root [`PathProxy`]: extend it with `at`, `/` or
/// [`path!`](crate::path), then `call` it.
///
/// | field     | method | argument  | resolves to        |
/// |-----------|--------|-----------|--------------------|
/// | `get`     | GET    | [`Target`]  | the resource       |
/// | `list`    | GET    | [`Query`]   | the collection     |
/// | `create`  | POST   | [`Payload`] | the new `id`       |
/// | `update`  | PATCH  | [`Payload`] | `()`               |
/// | `replace` | PUT    | [`Payload`] | the resource       |
/// | `remove`  | DELETE | [`Target`]  | `()`               |
/// | `invoke`  | POST   | [`Payload`] | the call result    |
///
/// # Example
///
/// ```ignore
/// use restpath::{QueryOptions, json, path};
///
/// let client = restpath::connect("https://api.example.com", None)?;
///
/// let person = client.get.at("people").call(123).await?;
/// let phones = path!(client.list, people[123].phones).call(()).await?;
/// let id = (&client.create / "people").call(json!({"name": "Ada"})).await?;
/// let page = client.list.at("people").call(QueryOptions::new().with("skip", 20)).await?;
/// ```
pub struct RestClient<C> {
    /// Read one resource.
    pub get: PathProxy<Get<C>>,
    /// Read a collection.
    pub list: PathProxy<List<C>>,
    /// Create a resource.
    pub create: PathProxy<Create<C>>,
    /// Patch a resource.
    pub update: PathProxy<Update<C>>,
    /// Replace a resource.
    pub replace: PathProxy<Replace<C>>,
    /// Delete a resource.
    pub remove: PathProxy<Remove<C>>,
    /// Call a remote procedure.
    pub invoke: PathProxy<Invoke<C>>,
    shared: Arc<Shared<C>>,
}

impl<C> RestClient<C> {
    /// Create a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an `invalidEndpoint` error, with the endpoint as
    /// `info.endpointUrl`, if it is not an absolute URL that can hold a path,
    /// or if it carries a query or a fragment.
    pub fn new(client: C, endpoint: impl AsRef<str>) -> Result<Self> {
        let base_url = parse_endpoint(endpoint.as_ref())?;
        Ok(Self::with_url(client, base_url))
    }

    /// Create a client for an already parsed endpoint.
    #[must_use]
    pub fn with_url(client: C, base_url: Url) -> Self {
        Self::from_shared(Shared {
            client,
            base_url,
            context: RequestContext::default(),
        })
    }

    fn from_shared(shared: Shared<C>) -> Self {
        let shared = Arc::new(shared);
        Self {
            get: PathProxy::new(Get(Arc::clone(&shared))),
            list: PathProxy::new(List(Arc::clone(&shared))),
            create: PathProxy::new(Create(Arc::clone(&shared))),
            update: PathProxy::new(Update(Arc::clone(&shared))),
            replace: PathProxy::new(Replace(Arc::clone(&shared))),
            remove: PathProxy::new(Remove(Arc::clone(&shared))),
            invoke: PathProxy::new(Invoke(Arc::clone(&shared))),
            shared,
        }
    }

    /// Same endpoint and transport, sending `context` with every request.
    #[must_use]
    pub fn with_context(&self, context: RequestContext) -> Self
    where
        C: Clone,
    {
        Self::from_shared(Shared {
            client: self.shared.client.clone(),
            base_url: self.shared.base_url.clone(),
            context,
        })
    }

    /// The endpoint.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.shared.base_url
    }

    /// Metadata sent with every request.
    #[must_use]
    pub fn context(&self) -> &RequestContext {
        &self.shared.context
    }

    /// The transport.
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.shared.client
    }
}

impl<C> Clone for RestClient<C> {
    fn clone(&self) -> Self {
        Self {
            get: self.get.clone(),
            list: self.list.clone(),
            create: self.create.clone(),
            update: self.update.clone(),
            replace: self.replace.clone(),
            remove: self.remove.clone(),
            invoke: self.invoke.clone(),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C> fmt::Debug for RestClient<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.shared.base_url.as_str())
            .field("context", &self.shared.context)
            .finish_non_exhaustive()
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let invalid = || Error::new(ErrorCode::InvalidEndpoint).with_info("endpointUrl", endpoint);

    let base_url = Url::parse(endpoint).map_err(|err| invalid().with_cause(err))?;
    // Resource paths are appended to the endpoint, so it cannot carry a
    // query or a fragment
    if base_url.cannot_be_a_base() || base_url.query().is_some() || base_url.fragment().is_some()
    {
        return Err(invalid());
    }
    Ok(base_url)
}

/// Connect to `endpoint` over a [`HyperClient`].
///
/// `timeout` bounds each request, [`DEFAULT_TIMEOUT`](crate::DEFAULT_TIMEOUT)
/// when `None`.
///
/// # Errors
///
/// Returns an `invalidEndpoint` error if `endpoint` is not a valid base URL.
pub fn connect(
    endpoint: impl AsRef<str>,
    timeout: Option<Duration>,
) -> Result<RestClient<HyperClient>> {
    let base_url = parse_endpoint(endpoint.as_ref())?;

    let mut config = ClientConfig::builder();
    if let Some(timeout) = timeout {
        config = config.timeout(timeout);
    }
    Ok(RestClient::with_url(HyperClient::with_config(config.build()), base_url))
}

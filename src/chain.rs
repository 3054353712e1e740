//! Chain builder and entry point.
//!
//! The [`ChainBuilder`] collects handlers in order; [`Chain`] is the built
//! entry point. Building never runs a handler. Each call to the entry point
//! starts a new execution with its own [`RequestStore`]:
//! 1. Start at the first handler
//! 2. Hand it the request, a [`Next`] bound to the following handler, and the store
//! 3. Return whatever it returns
//! 4. If the chain runs out of handlers, return [`Response::no_handler`]
//!
//! # Example
//!
//! ```ignore
//! use handler_chain::{Chain, Response};
//!
//! let get = Chain::builder()
//!     .name("GET /data")
//!     .handler(|req: Request, next, store| async move {
//!         store.set_value("user", req.user.clone());
//!         next.run().await
//!     })
//!     .handler(|_req: Request, _next, store| async move {
//!         Ok(Response::json(store.get_value("user").unwrap_or_default()))
//!     })
//!     .build();
//!
//! let res = get.call(request).await?;
//! ```

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::Instrument;

use crate::handler::{
    BoxFuture, Execution, FnHandler, Handler, HandlerResult, Next, Params, RequestStore,
};

/// Default chain label used in log spans.
pub const DEFAULT_CHAIN_NAME: &str = "chain";

/// Builder for composing handlers into a [`Chain`].
pub struct ChainBuilder<Req> {
    name: String,
    handlers: Vec<Box<dyn Handler<Req>>>,
}

impl<Req> ChainBuilder<Req>
where
    Req: Clone + Send + Sync + 'static,
{
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self {
            name: DEFAULT_CHAIN_NAME.to_string(),
            handlers: Vec::new(),
        }
    }

    /// Set the label used for this chain in logs.
    ///
    /// Default: `"chain"`
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append an async closure handler.
    pub fn handler<F, Fut>(self, handler: F) -> Self
    where
        F: Fn(Req, Next<Req>, RequestStore) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.with_handler(FnHandler::new(handler))
    }

    /// Append any [`Handler`] implementation.
    pub fn with_handler<H: Handler<Req>>(mut self, handler: H) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Append an already boxed handler.
    pub fn boxed(mut self, handler: Box<dyn Handler<Req>>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Build the entry point.
    pub fn build(self) -> Chain<Req> {
        Chain {
            name: Arc::from(self.name),
            handlers: self.handlers.into(),
            executions: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl<Req> Default for ChainBuilder<Req>
where
    Req: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// A built chain of handlers.
///
/// The handler sequence is fixed once built. Cloning a `Chain` is cheap and
/// the clones share the same handlers.
pub struct Chain<Req> {
    /// Label for logs.
    name: Arc<str>,
    /// Handlers in execution order.
    handlers: Arc<[Box<dyn Handler<Req>>]>,
    /// Count of started executions, used as the execution id in logs.
    executions: Arc<AtomicU64>,
}

impl<Req> Chain<Req>
where
    Req: Clone + Send + Sync + 'static,
{
    /// Create a new chain builder.
    pub fn builder() -> ChainBuilder<Req> {
        ChainBuilder::new()
    }

    /// Build a chain directly from boxed handlers, in iteration order.
    pub fn from_handlers<I>(handlers: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Handler<Req>>>,
    {
        handlers
            .into_iter()
            .fold(ChainBuilder::new(), ChainBuilder::boxed)
            .build()
    }

    /// Invoke the chain with empty params.
    pub fn call(&self, req: Req) -> BoxFuture<'static, HandlerResult> {
        self.call_with(req, Params::new())
    }

    /// Invoke the chain with a params record.
    ///
    /// Every handler sees `params` through [`Next::params`].
    pub fn call_with(&self, req: Req, params: Params) -> BoxFuture<'static, HandlerResult> {
        let execution = self.executions.fetch_add(1, Ordering::Relaxed);
        let span = tracing::debug_span!("chain", name = %self.name, execution);

        let exec = Arc::new(Execution {
            name: self.name.clone(),
            handlers: self.handlers.clone(),
            request: req,
            params,
            store: RequestStore::new(),
        });

        Box::pin(exec.start().instrument(span))
    }

    /// Turn the chain into a plain closure entry point.
    pub fn into_fn(self) -> impl Fn(Req) -> BoxFuture<'static, HandlerResult> + Clone + Send + Sync {
        move |req| self.call(req)
    }
}

impl<Req> Chain<Req> {
    /// Get the chain label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the chain has no handlers.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<Req> Clone for Chain<Req> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            handlers: self.handlers.clone(),
            executions: self.executions.clone(),
        }
    }
}

impl<Req> std::fmt::Debug for Chain<Req> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("name", &self.name)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Compose handlers into a [`Chain`], in the order given.
///
/// ```ignore
/// let get = chain![auth, load_user, get_data];
/// ```
#[macro_export]
macro_rules! chain {
    ($($handler:expr),* $(,)?) => {
        $crate::Chain::builder()
            $(.handler($handler))*
            .build()
    };
}

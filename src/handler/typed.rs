//! Handler trait and the adapter that turns async closures into handlers.
//!
//! Every handler in a chain has the same shape:
//!
//! ```ignore
//! async fn handler(req: Req, next: Next<Req>, store: RequestStore) -> HandlerResult
//! ```
//!
//! Handlers that do not need the continuation or the store simply ignore
//! those arguments.

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;

use super::{Next, RequestStore};
use crate::error::Result;
use crate::response::Response;

/// Result type for handler functions.
pub type HandlerResult = Result<Response>;

/// Boxed future for handler results.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait for chain handlers.
///
/// Implement this directly for handlers that carry their own state, or pass
/// an async closure to [`ChainBuilder::handler`](crate::ChainBuilder::handler)
/// and let [`FnHandler`] do the boxing.
pub trait Handler<Req>: Send + Sync + 'static {
    /// Handle a request.
    ///
    /// Return a response to stop the chain here, or return the result of
    /// [`Next::run`] to defer to the rest of it.
    fn call(&self, req: Req, next: Next<Req>, store: RequestStore) -> BoxFuture<'static, HandlerResult>;
}

/// Wrapper that adapts an async closure to [`Handler`].
pub struct FnHandler<F, Req, Fut>
where
    F: Fn(Req, Next<Req>, RequestStore) -> Fut + Send + Sync + 'static,
    Req: Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    handler: F,
    _phantom: PhantomData<fn(Req) -> Fut>,
}

impl<F, Req, Fut> FnHandler<F, Req, Fut>
where
    F: Fn(Req, Next<Req>, RequestStore) -> Fut + Send + Sync + 'static,
    Req: Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    /// Create a new closure handler.
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }
}

impl<F, Req, Fut> Handler<Req> for FnHandler<F, Req, Fut>
where
    F: Fn(Req, Next<Req>, RequestStore) -> Fut + Send + Sync + 'static,
    Req: Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn call(&self, req: Req, next: Next<Req>, store: RequestStore) -> BoxFuture<'static, HandlerResult> {
        Box::pin((self.handler)(req, next, store))
    }
}

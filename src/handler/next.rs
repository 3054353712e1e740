//! Continuation passed to each handler.
//!
//! A [`Next`] is bound to one position in one execution. Running it invokes
//! the handler after the current one and resolves to whatever that handler
//! (and everything after it) produces. Each step builds a fresh `Next` for
//! the step after it, so a continuation can neither skip nor repeat a
//! handler.
//!
//! `run` and `run_with` take `self` by value: a handler can hand control to
//! the rest of the chain at most once.
//!
//! ```compile_fail
//! use handler_chain::{HandlerResult, Next, RequestStore};
//!
//! async fn twice(_req: (), next: Next<()>, _store: RequestStore) -> HandlerResult {
//!     let _first = next.run().await?;
//!     next.run().await
//! }
//! ```

use std::sync::Arc;

use serde_json::{Map, Value};

use super::{BoxFuture, Handler, HandlerResult, RequestStore};
use crate::response::Response;

/// Params record accepted as the second positional value of an entry point.
pub type Params = Map<String, Value>;

/// State shared by every step of one chain invocation.
pub(crate) struct Execution<Req> {
    /// Chain label, for logging.
    pub(crate) name: Arc<str>,
    /// Handlers of the chain, in execution order.
    pub(crate) handlers: Arc<[Box<dyn Handler<Req>>]>,
    /// Request value handed to every handler.
    pub(crate) request: Req,
    /// Params given to the entry point (empty by default).
    pub(crate) params: Params,
    /// Store for this invocation only.
    pub(crate) store: RequestStore,
}

impl<Req> Execution<Req>
where
    Req: Clone + Send + Sync + 'static,
{
    /// Run the chain from its first handler.
    pub(crate) fn start(self: Arc<Self>) -> BoxFuture<'static, HandlerResult> {
        step(self, 0, None)
    }
}

/// Invoke the handler at `index`, or produce the not-found response if the
/// chain has no handler there.
fn step<Req>(
    exec: Arc<Execution<Req>>,
    index: usize,
    forwarded: Option<Value>,
) -> BoxFuture<'static, HandlerResult>
where
    Req: Clone + Send + Sync + 'static,
{
    let Some(handler) = exec.handlers.get(index) else {
        tracing::debug!(
            "Chain '{}' exhausted after {} handler(s), no handler found",
            exec.name,
            exec.handlers.len()
        );
        return Box::pin(async { Ok(Response::no_handler()) });
    };

    tracing::debug!("Chain '{}' entering handler {}", exec.name, index);

    let next = Next {
        exec: exec.clone(),
        index: index + 1,
        forwarded,
    };
    handler.call(exec.request.clone(), next, exec.store.clone())
}

/// Continuation bound to the step after the current handler.
pub struct Next<Req> {
    exec: Arc<Execution<Req>>,
    /// Index of the handler this continuation runs.
    index: usize,
    /// Data forwarded by the previous handler via [`Next::run_with`].
    forwarded: Option<Value>,
}

impl<Req> Next<Req>
where
    Req: Clone + Send + Sync + 'static,
{
    /// Run the rest of the chain.
    pub fn run(self) -> BoxFuture<'static, HandlerResult> {
        step(self.exec, self.index, None)
    }

    /// Run the rest of the chain, handing `data` to the next handler.
    ///
    /// The next handler reads it through [`Next::forwarded`]. Unlike the
    /// [`RequestStore`], forwarded data reaches only that one handler.
    pub fn run_with(self, data: impl Into<Value>) -> BoxFuture<'static, HandlerResult> {
        step(self.exec, self.index, Some(data.into()))
    }
}

impl<Req> Next<Req> {
    /// Data the previous handler passed to [`Next::run_with`], if any.
    pub fn forwarded(&self) -> Option<&Value> {
        self.forwarded.as_ref()
    }

    /// Params the entry point was invoked with.
    pub fn params(&self) -> &Params {
        &self.exec.params
    }

    /// Position of the handler holding this continuation.
    #[inline]
    pub fn index(&self) -> usize {
        self.index - 1
    }

    /// Number of handlers after the current one.
    pub fn remaining(&self) -> usize {
        self.exec.handlers.len().saturating_sub(self.index)
    }
}

impl<Req> std::fmt::Debug for Next<Req> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Next")
            .field("chain", &self.exec.name)
            .field("index", &self.index)
            .field("forwarded", &self.forwarded)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::FnHandler;
    use serde_json::json;

    fn execution(handlers: Vec<Box<dyn Handler<u32>>>, params: Params) -> Arc<Execution<u32>> {
        Arc::new(Execution {
            name: Arc::from("test"),
            handlers: handlers.into(),
            request: 7,
            params,
            store: RequestStore::new(),
        })
    }

    fn boxed<F, Fut>(f: F) -> Box<dyn Handler<u32>>
    where
        F: Fn(u32, Next<u32>, RequestStore) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = HandlerResult> + Send + 'static,
    {
        Box::new(FnHandler::new(f))
    }

    #[tokio::test]
    async fn test_step_past_end_is_not_found() {
        let exec = execution(Vec::new(), Params::new());
        let res = exec.start().await.unwrap();
        assert_eq!(res, Response::no_handler());
    }

    #[tokio::test]
    async fn test_positions_are_one_step_apart() {
        let exec = execution(
            vec![
                boxed(|_, next, store| async move {
                    store.set_value("first", next.index());
                    store.set_value("first_remaining", next.remaining());
                    next.run().await
                }),
                boxed(|_, next, store| async move {
                    store.set_value("second", next.index());
                    store.set_value("second_remaining", next.remaining());
                    next.run().await
                }),
            ],
            Params::new(),
        );
        let store = exec.store.clone();

        let res = exec.start().await.unwrap();

        assert_eq!(res.status(), 404);
        assert_eq!(store.get_value("first"), Some(json!(0)));
        assert_eq!(store.get_value("first_remaining"), Some(json!(1)));
        assert_eq!(store.get_value("second"), Some(json!(1)));
        assert_eq!(store.get_value("second_remaining"), Some(json!(0)));
    }

    #[tokio::test]
    async fn test_forwarded_reaches_only_next_handler() {
        let exec = execution(
            vec![
                boxed(|_, next, _| async move {
                    assert!(next.forwarded().is_none());
                    next.run_with(json!({ "token": "abc" })).await
                }),
                boxed(|_, next, store| async move {
                    store.set_value("seen", next.forwarded().cloned().unwrap_or_default());
                    next.run().await
                }),
                boxed(|_, next, _| async move {
                    Ok(Response::json(json!({ "third_saw": next.forwarded().is_some() })))
                }),
            ],
            Params::new(),
        );
        let store = exec.store.clone();

        let res = exec.start().await.unwrap();

        assert_eq!(store.get_value("seen"), Some(json!({ "token": "abc" })));
        assert_eq!(res.body(), &json!({ "third_saw": false }));
    }

    #[tokio::test]
    async fn test_params_and_request_visible() {
        let mut params = Params::new();
        params.insert("slug".to_string(), json!("hello"));
        let exec = execution(
            vec![boxed(|req, next, _| async move {
                Ok(Response::json(json!({
                    "req": req,
                    "slug": next.params().get("slug").cloned(),
                })))
            })],
            params,
        );

        let res = exec.start().await.unwrap();
        assert_eq!(res.body(), &json!({ "req": 7, "slug": "hello" }));
    }
}

//! # handler-chain
//!
//! Compose async request handlers into a single entry point.
//!
//! A [`Chain`] runs its handlers in order. Each handler either returns a
//! [`Response`] (and the chain stops there) or defers to the rest of the
//! chain through its [`Next`] continuation. Handlers of one invocation share
//! a fresh [`RequestStore`]. A chain that runs out of handlers answers with
//! [`Response::no_handler`]: status `404`, body `{"error": "No handler found"}`.
//!
//! ## Architecture
//!
//! - **Composition**: [`ChainBuilder`] / [`chain!`] fix the handler order; nothing runs
//! - **Execution**: [`Chain::call`] walks the handlers one continuation at a time
//!
//! Handler errors are never caught: they come back from [`Chain::call`]
//! exactly as the handler returned them.
//!
//! ## Example
//!
//! ```ignore
//! use handler_chain::{chain, HandlerResult, Next, RequestStore, Response};
//! use serde_json::json;
//!
//! async fn auth(authenticated: bool, next: Next<bool>, _store: RequestStore) -> HandlerResult {
//!     if authenticated {
//!         return next.run().await;
//!     }
//!     Ok(Response::with_status(401, json!({ "message": "Not Authenticated!!" })))
//! }
//!
//! async fn get_data(_: bool, _next: Next<bool>, _store: RequestStore) -> HandlerResult {
//!     Ok(Response::json(json!({ "message": "Got It!!" })))
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let get = chain![auth, get_data];
//!     let res = get.call(false).await.unwrap();
//!     assert_eq!(res.status(), 401);
//! }
//! ```

pub mod error;
pub mod handler;
pub mod response;

mod chain;

pub use chain::{Chain, ChainBuilder, DEFAULT_CHAIN_NAME};
pub use error::{ChainError, Result};
pub use handler::{BoxFuture, FnHandler, Handler, HandlerResult, Next, Params, RequestStore};
pub use response::Response;

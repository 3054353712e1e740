//! Handler module - the pieces a handler sees while a chain runs.
//!
//! Provides:
//! - [`Handler`] / [`FnHandler`] - the single handler signature and the closure adapter
//! - [`Next`] - the continuation that runs the remainder of the chain
//! - [`RequestStore`] - key/value state scoped to one chain execution
//!
//! # Example
//!
//! ```ignore
//! use handler_chain::{chain, HandlerResult, Next, RequestStore, Response};
//!
//! async fn auth(authenticated: bool, next: Next<bool>, _store: RequestStore) -> HandlerResult {
//!     if authenticated {
//!         return next.run().await;
//!     }
//!     Ok(Response::with_status(401, serde_json::json!({ "message": "Not Authenticated!!" })))
//! }
//!
//! async fn get_data(_: bool, _next: Next<bool>, _store: RequestStore) -> HandlerResult {
//!     Ok(Response::json(serde_json::json!({ "message": "Got It!!" })))
//! }
//!
//! let get = chain![auth, get_data];
//! ```

mod next;
mod store;
mod typed;

pub(crate) use next::Execution;
pub use next::{Next, Params};
pub use store::RequestStore;
pub use typed::{BoxFuture, FnHandler, Handler, HandlerResult};

//! Response value produced by a chain.
//!
//! The transport that sits in front of a [`Chain`](crate::Chain) decides how a
//! response is written out. The chain only needs a status code and a JSON
//! body, and it must be able to build exactly one response on its own: the
//! not-found result returned when every handler defers.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::Result;

/// Default status for [`Response::json`].
pub const STATUS_OK: u16 = 200;

/// Status returned when the chain runs past its last handler.
pub const STATUS_NOT_FOUND: u16 = 404;

/// Error message in the body of [`Response::no_handler`].
pub const NO_HANDLER_MESSAGE: &str = "No handler found";

/// A status code plus a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: u16,
    body: Value,
}

impl Response {
    /// Create a `200` response with the given body.
    pub fn json(body: impl Into<Value>) -> Self {
        Self::with_status(STATUS_OK, body)
    }

    /// Create a response with an explicit status.
    pub fn with_status(status: u16, body: impl Into<Value>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The terminal result of an exhausted chain.
    ///
    /// Always `404` with body `{"error": "No handler found"}`.
    pub fn no_handler() -> Self {
        Self::with_status(STATUS_NOT_FOUND, json!({ "error": NO_HANDLER_MESSAGE }))
    }

    /// Get the status code.
    #[inline]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get the body.
    #[inline]
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Into the body.
    pub fn into_body(self) -> Value {
        self.body
    }

    /// Whether the status is in the `2xx` range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the body into `T`.
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}

//! Request-scoped key/value store.
//!
//! A fresh [`RequestStore`] is created for every invocation of a
//! [`Chain`](crate::Chain) and handed to each handler of that invocation.
//! Earlier handlers use it to pass data to later ones without threading it
//! through every handler in between.
//!
//! # Example
//!
//! ```ignore
//! async fn load_user(req: Request, next: Next<Request>, store: RequestStore) -> Result<Response> {
//!     store.set_value("user_id", req.user_id);
//!     next.run().await
//! }
//!
//! async fn show_user(_req: Request, _next: Next<Request>, store: RequestStore) -> Result<Response> {
//!     let id = store.get_value("user_id").unwrap_or_default();
//!     Ok(Response::json(id))
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Shared key/value state for one chain execution.
///
/// Values are dynamically typed JSON. Keeping values under one key
/// consistent is up to the handlers; the store does not check.
///
/// # Thread Safety
///
/// `RequestStore` is `Clone`; clones point at the same map. Handlers of one
/// execution run strictly one after another, so the lock is never contended
/// within an execution, and separate executions never share a map.
#[derive(Clone, Default)]
pub struct RequestStore {
    values: Arc<Mutex<HashMap<String, Value>>>,
}

impl RequestStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn set_value(&self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        tracing::trace!("store set {}", key);
        self.values.lock().insert(key, value.into());
    }

    /// Get a copy of the value under `key`.
    ///
    /// Returns `None` if the key was never set or has been removed.
    pub fn get_value(&self, key: &str) -> Option<Value> {
        self.values.lock().get(key).cloned()
    }

    /// Remove `key`. Returns whether it was present.
    pub fn remove_value(&self, key: &str) -> bool {
        let existed = self.values.lock().remove(key).is_some();
        tracing::trace!("store remove {} (existed: {})", key, existed);
        existed
    }

    /// Serialize `value` and store it under `key`.
    pub fn set_as<T: Serialize>(&self, key: impl Into<String>, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.set_value(key, value);
        Ok(())
    }

    /// Get the value under `key` deserialized as `T`.
    ///
    /// `Ok(None)` when the key is absent, `Err` when the stored value does
    /// not have the shape of `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_value(key) {
            Some(v) => Ok(Some(serde_json::from_value(v)?)),
            None => Ok(None),
        }
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.lock().contains_key(key)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }

    /// Snapshot of the stored keys, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.values.lock().keys().cloned().collect()
    }
}

impl std::fmt::Debug for RequestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.values.lock().iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_set_and_get() {
        let store = RequestStore::new();
        store.set_value("test_one", json!({ "id": "test_one" }));

        assert_eq!(store.get_value("test_one"), Some(json!({ "id": "test_one" })));
        assert!(store.contains_key("test_one"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_missing_is_none() {
        let store = RequestStore::new();
        assert_eq!(store.get_value("nope"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_overwrite_replaces() {
        let store = RequestStore::new();
        store.set_value("k", 1);
        store.set_value("k", "two");

        assert_eq!(store.get_value("k"), Some(json!("two")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_reports_existence() {
        let store = RequestStore::new();
        store.set_value("k", true);

        assert!(store.remove_value("k"));
        assert!(!store.remove_value("k"));
        assert_eq!(store.get_value("k"), None);
    }

    #[test]
    fn test_clones_share_state() {
        let store = RequestStore::new();
        let other = store.clone();
        other.set_value("shared", 42);

        assert_eq!(store.get_value("shared"), Some(json!(42)));
    }

    #[test]
    fn test_separate_stores_are_independent() {
        let a = RequestStore::new();
        let b = RequestStore::new();
        a.set_value("k", 1);

        assert!(b.get_value("k").is_none());
    }

    #[test]
    fn test_typed_access() {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct User {
            id: u64,
            name: String,
        }

        let store = RequestStore::new();
        let user = User {
            id: 9,
            name: "ada".to_string(),
        };
        store.set_as("user", &user).unwrap();

        assert_eq!(store.get_as::<User>("user").unwrap(), Some(user));
        assert_eq!(store.get_as::<User>("missing").unwrap(), None);
        assert!(store.get_as::<u64>("user").is_err());
    }

    #[test]
    fn test_keys_snapshot() {
        let store = RequestStore::new();
        store.set_value("a", 1);
        store.set_value("b", 2);

        let mut keys = store.keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }
}

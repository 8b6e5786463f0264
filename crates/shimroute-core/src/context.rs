//! Call context types.
//!
//! The [`Context`] carries data discovered by middleware (parsed arguments,
//! timestamps, identity) forward to later middleware and the handler.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// A unique identifier for each dispatched call, using UUID v7.
///
/// # Example
///
/// ```
/// use shimroute_core::CallId;
///
/// let id = CallId::new();
/// println!("Call ID: {}", id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallId(Uuid);

impl CallId {
    /// Creates a new time-ordered call ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CallId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// How long a router keeps a [`Context`] alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextScope {
    /// A fresh context per call, dropped when the call returns.
    #[default]
    PerCall,
    /// One context for the router's lifetime.
    ///
    /// Values written by one call are visible to the next. The router
    /// serialises calls while this scope is active.
    Shared,
}

/// String-keyed scratch space for a single call.
///
/// Values of any `Send + Sync` type can be stored; readers name the type
/// they expect. Asking for the wrong type yields `None`.
///
/// # Example
///
/// ```
/// use shimroute_core::Context;
///
/// let mut ctx = Context::new();
/// ctx.insert("owner", "alice".to_string());
///
/// assert_eq!(ctx.get::<String>("owner").map(String::as_str), Some("alice"));
/// assert!(ctx.get::<u64>("owner").is_none());
/// ```
pub struct Context {
    call_id: CallId,
    values: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl Context {
    /// Creates an empty context with a fresh call ID.
    #[must_use]
    pub fn new() -> Self {
        Self::with_call_id(CallId::new())
    }

    /// Creates an empty context for a specific call.
    #[must_use]
    pub fn with_call_id(call_id: CallId) -> Self {
        Self {
            call_id,
            values: HashMap::new(),
        }
    }

    /// Returns the ID of the call this context belongs to.
    #[must_use]
    pub fn call_id(&self) -> CallId {
        self.call_id
    }

    /// Moves the context to a new call.
    ///
    /// Used by shared-scope routers, which reuse one context for many calls.
    pub fn set_call_id(&mut self, call_id: CallId) {
        self.call_id = call_id;
    }

    /// Stores a value, replacing whatever was under `key`.
    pub fn insert<T: Send + Sync + 'static>(&mut self, key: impl Into<String>, value: T) {
        self.values.insert(key.into(), Box::new(value));
    }

    /// Returns the value under `key` if it exists and has type `T`.
    #[must_use]
    pub fn get<T: Send + Sync + 'static>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|v| v.downcast_ref())
    }

    /// Returns a mutable reference to the value under `key` if it has type `T`.
    pub fn get_mut<T: Send + Sync + 'static>(&mut self, key: &str) -> Option<&mut T> {
        self.values.get_mut(key).and_then(|v| v.downcast_mut())
    }

    /// Returns the value under `key`, inserting `T::default()` first if absent.
    ///
    /// Returns `None` if the key holds a value of another type.
    pub fn get_or_default<T: Default + Send + Sync + 'static>(
        &mut self,
        key: &str,
    ) -> Option<&mut T> {
        self.values
            .entry(key.to_string())
            .or_insert_with(|| Box::new(T::default()))
            .downcast_mut()
    }

    /// Removes and returns the value under `key` if it has type `T`.
    ///
    /// A value of another type is left in place.
    pub fn remove<T: Send + Sync + 'static>(&mut self, key: &str) -> Option<T> {
        if !self.values.get(key)?.is::<T>() {
            return None;
        }
        self.values
            .remove(key)
            .and_then(|v| v.downcast().ok())
            .map(|b| *b)
    }

    /// Returns true if anything is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the stored keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Removes every stored value.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("Context")
            .field("call_id", &self.call_id)
            .field("keys", &keys)
            .finish()
    }
}

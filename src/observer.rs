//! Diagnostic observers for factory invocations.
//!
//! The container itself only emits `tracing` events. Observers are an opt-in
//! hook for callers that want structured notifications about every object the
//! container constructs: timing, construction order, failures.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;
use crate::key::Key;

/// Observer trait for construction events.
///
/// Called synchronously around every factory invocation. Cached objects never
/// trigger a notification, so each key is reported as `resolved` at most once
/// per container.
///
/// # Examples
///
/// ```
/// use tokenwire::{Context, DiObserver, Key};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct ConstructionLog {
///     order: Mutex<Vec<String>>,
/// }
///
/// impl DiObserver for ConstructionLog {
///     fn resolving(&self, _key: &Key) {}
///
///     fn resolved(&self, key: &Key, _duration: Duration) {
///         self.order.lock().unwrap().push(key.name().to_string());
///     }
/// }
///
/// let mut context = Context::new();
/// context.add_observer(Arc::new(ConstructionLog::default()));
/// ```
pub trait DiObserver: Send + Sync {
    /// Called right before the factory of `key` is invoked.
    fn resolving(&self, key: &Key);

    /// Called after the factory of `key` produced its object.
    fn resolved(&self, key: &Key, duration: Duration);

    /// Called when the factory of `key` failed. The error still propagates.
    fn failed(&self, key: &Key, error: &DiError) {
        let _ = (key, error);
    }
}

/// Observer forwarding every event to `tracing`.
pub struct TracingObserver {
    prefix: String,
}

impl TracingObserver {
    /// Creates a new tracing observer with default prefix.
    pub fn new() -> Self {
        Self {
            prefix: "[tokenwire]".to_string(),
        }
    }

    /// Creates a new tracing observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for TracingObserver {
    fn resolving(&self, key: &Key) {
        tracing::debug!(key = %key, "{} Constructing", self.prefix);
    }

    fn resolved(&self, key: &Key, duration: Duration) {
        tracing::debug!(key = %key, ?duration, "{} Constructed", self.prefix);
    }

    fn failed(&self, key: &Key, error: &DiError) {
        tracing::warn!(key = %key, %error, "{} Construction failed", self.prefix);
    }
}

/// Collection of observers, notified in registration order.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    pub(crate) fn resolving(&self, key: &Key) {
        for observer in &self.observers {
            observer.resolving(key);
        }
    }

    pub(crate) fn resolved(&self, key: &Key, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(key, duration);
        }
    }

    pub(crate) fn failed(&self, key: &Key, error: &DiError) {
        for observer in &self.observers {
            observer.failed(key, error);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers").field("count", &self.len()).finish()
    }
}

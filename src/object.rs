//! Type-erased objects and the dependency tuple handed to factories.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::Key;

// Type-erased Arc for storage. The erased value is always an `Arc<T>`,
// which lets `T` be unsized (`dyn Trait`).
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

/// One produced object, shared by reference.
///
/// Cloning an `Object` only bumps a reference count. Two clones of the same
/// object are [`Object::ptr_eq`], and every `Arc<T>` obtained from them points
/// at the same value.
///
/// # Examples
///
/// ```rust
/// use tokenwire::Object;
/// use std::sync::Arc;
///
/// let object = Object::new(Arc::new(8080u16));
/// let port = object.downcast::<u16>().unwrap();
/// assert_eq!(*port, 8080);
/// assert!(object.downcast::<String>().is_none());
/// ```
#[derive(Clone)]
pub struct Object {
    type_name: &'static str,
    value: AnyArc,
}

impl Object {
    /// Wraps a shared value.
    pub fn new<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            value: Arc::new(value),
        }
    }

    /// Returns the value as `Arc<T>` if it was created from an `Arc<T>`.
    pub fn downcast<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.value.downcast_ref::<Arc<T>>().cloned()
    }

    /// Like [`Object::downcast`], with an error naming `key` on mismatch.
    pub fn downcast_for<T: ?Sized + Send + Sync + 'static>(&self, key: &Key) -> DiResult<Arc<T>> {
        self.downcast::<T>().ok_or_else(|| DiError::TypeMismatch {
            key: key.name().to_string(),
            expected: std::any::type_name::<T>(),
            found: self.type_name,
        })
    }

    /// Name of the type the object was created from.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether both handles refer to the same object.
    pub fn ptr_eq(a: &Object, b: &Object) -> bool {
        Arc::ptr_eq(&a.value, &b.value)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Resolved dependencies of one consumer, in parameter order.
#[derive(Debug, Clone, Default)]
pub struct Dependencies {
    resolved: Vec<(Key, Object)>,
}

impl Dependencies {
    /// Creates an empty tuple.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            resolved: Vec::with_capacity(capacity),
        }
    }

    /// Appends the next parameter.
    pub fn push(&mut self, key: Key, object: Object) {
        self.resolved.push((key, object));
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// The parameter at `index`, downcast to `T`.
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self, index: usize) -> DiResult<Arc<T>> {
        let (key, object) = self.entry(index)?;
        object.downcast_for::<T>(key)
    }

    /// The untyped parameter at `index`.
    pub fn object(&self, index: usize) -> DiResult<&Object> {
        self.entry(index).map(|(_, object)| object)
    }

    /// Key that filled the parameter at `index`.
    pub fn key(&self, index: usize) -> DiResult<&Key> {
        self.entry(index).map(|(key, _)| key)
    }

    /// Iterates over `(key, object)` pairs in parameter order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Object)> {
        self.resolved.iter().map(|(key, object)| (key, object))
    }

    fn entry(&self, index: usize) -> DiResult<&(Key, Object)> {
        self.resolved.get(index).ok_or(DiError::DependencyOutOfRange {
            index,
            len: self.resolved.len(),
        })
    }
}

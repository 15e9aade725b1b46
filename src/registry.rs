//! Creator registry: factories and the singleton object cache.

use std::collections::HashMap;
use std::time::Instant;

use crate::creator::Creator;
use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::object::{Dependencies, Object};
use crate::observer::Observers;

/// Factories by key, and at most one produced object per key.
///
/// Objects are written once: preparing a key that already holds an object is
/// an error, never a silent overwrite. A factory that fails leaves the slot
/// empty, so preparing the key again later is allowed.
///
/// # Examples
///
/// ```
/// use tokenwire::{Creator, CreatorRegistry, Dependencies, Key, Object};
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), tokenwire::DiError> {
/// let port = Key::token("port");
/// let mut registry = CreatorRegistry::new();
/// registry.add_creator(port.clone(), Creator::sync(|_| Ok(Object::new(Arc::new(8080u16)))))?;
///
/// registry.prepare_object(&port, Dependencies::new()).await?;
/// let object = registry.get_object(&port)?;
/// assert_eq!(*object.downcast::<u16>().unwrap(), 8080);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct CreatorRegistry {
    creators: HashMap<Key, Creator>,
    objects: HashMap<Key, Object>,
    observers: Observers,
}

impl CreatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a factory is registered for `key`.
    pub fn has_creator(&self, key: &Key) -> bool {
        self.creators.contains_key(key)
    }

    /// Registers the factory for `key`.
    pub fn add_creator(&mut self, key: Key, creator: Creator) -> DiResult<()> {
        if self.has_creator(&key) {
            return Err(DiError::DuplicateCreator(key.name().to_string()));
        }

        self.creators.insert(key, creator);
        Ok(())
    }

    /// Swaps the factory of an already registered key.
    ///
    /// Objects that were already prepared are kept.
    pub fn replace_creator(&mut self, key: &Key, creator: Creator) -> DiResult<()> {
        match self.creators.get_mut(key) {
            Some(slot) => {
                *slot = creator;
                Ok(())
            }
            None => Err(DiError::MissingCreator(key.name().to_string())),
        }
    }

    /// Whether an object is cached for `key`.
    pub fn has_object(&self, key: &Key) -> bool {
        self.objects.contains_key(key)
    }

    /// Runs the factory of `key` with `dependencies` and caches the result.
    ///
    /// Not idempotent: a second call for the same key fails with
    /// [`DiError::AlreadyPrepared`].
    pub async fn prepare_object(&mut self, key: &Key, dependencies: Dependencies) -> DiResult<()> {
        if self.has_object(key) {
            return Err(DiError::AlreadyPrepared(key.name().to_string()));
        }

        let creator = self
            .creators
            .get(key)
            .cloned()
            .ok_or_else(|| DiError::MissingCreator(key.name().to_string()))?;

        self.observers.resolving(key);
        let start = Instant::now();

        let object = match creator.call(dependencies).await {
            Ok(object) => object,
            Err(source) => {
                let error = DiError::creator_failed(key, source);
                self.observers.failed(key, &error);
                return Err(error);
            }
        };

        self.observers.resolved(key, start.elapsed());
        self.objects.insert(key.clone(), object);
        Ok(())
    }

    /// The cached object for `key`.
    pub fn get_object(&self, key: &Key) -> DiResult<Object> {
        self.objects
            .get(key)
            .cloned()
            .ok_or_else(|| DiError::NotPrepared(key.name().to_string()))
    }

    /// Number of registered factories.
    pub fn creator_count(&self) -> usize {
        self.creators.len()
    }

    /// Number of cached objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub(crate) fn observers_mut(&mut self) -> &mut Observers {
        &mut self.observers
    }
}

//! The context: registration, injection and replacement declarations, and
//! resolution of object graphs.
//!
//! Setup happens through `&mut self` calls from a composition root. Resolution
//! also takes `&mut self`, so nothing can mutate a context while one of its
//! resolutions is in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::ContextOptions;
use crate::creator::{Creator, Entity};
use crate::error::{DiError, DiResult};
use crate::injection::InjectionTable;
use crate::key::Key;
use crate::observer::DiObserver;
use crate::registry::CreatorRegistry;
use crate::replacement::ReplacementTable;

mod bootstrap;
mod plan;
mod resolve;

pub use bootstrap::Program;

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Dependency injection context.
///
/// Owns the [`CreatorRegistry`], the [`InjectionTable`] and the
/// [`ReplacementTable`]. Every object it builds is a singleton for the lifetime
/// of the context.
///
/// # Examples
///
/// ```
/// use tokenwire::{BoxError, Context, Dependencies, Entity};
/// use async_trait::async_trait;
/// use std::sync::Arc;
///
/// struct Logger;
/// struct Server {
///     logger: Arc<Logger>,
/// }
///
/// #[async_trait]
/// impl Entity for Logger {
///     type Output = Logger;
///     async fn construct(_: Dependencies) -> Result<Arc<Logger>, BoxError> {
///         Ok(Arc::new(Logger))
///     }
/// }
///
/// #[async_trait]
/// impl Entity for Server {
///     type Output = Server;
///     async fn construct(dependencies: Dependencies) -> Result<Arc<Server>, BoxError> {
///         Ok(Arc::new(Server { logger: dependencies.get(0)? }))
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), tokenwire::DiError> {
/// let mut context = Context::new();
/// context
///     .register::<Logger>()?
///     .register::<Server>()?
///     .inject::<Server, Logger>(0)?;
///
/// let server = context.resolve::<Server>().await?;
/// let logger = context.resolve::<Logger>().await?;
/// assert!(Arc::ptr_eq(&server.logger, &logger));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Context {
    id: u64,
    options: ContextOptions,
    registry: CreatorRegistry,
    injections: InjectionTable,
    replacements: ReplacementTable,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context with default options.
    pub fn new() -> Self {
        Self::with_options(ContextOptions::default())
    }

    /// Creates a context with the given options.
    pub fn with_options(options: ContextOptions) -> Self {
        Self::with_registry(CreatorRegistry::new(), options)
    }

    /// Creates a context around an existing registry.
    pub fn with_registry(registry: CreatorRegistry, options: ContextOptions) -> Self {
        let id = NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(context = id, name = ?options.name, "Creating context");

        Self {
            id,
            options,
            registry,
            injections: InjectionTable::new(),
            replacements: ReplacementTable::new(),
        }
    }

    /// Process-unique id of this context.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Label used in log events.
    pub fn name(&self) -> String {
        match &self.options.name {
            Some(name) => name.clone(),
            None => format!("context-{}", self.id),
        }
    }

    /// The options this context was created with.
    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    /// The underlying registry.
    pub fn registry(&self) -> &CreatorRegistry {
        &self.registry
    }

    /// Adds an observer notified around every factory invocation.
    pub fn add_observer(&mut self, observer: Arc<dyn DiObserver>) -> &mut Self {
        self.registry.observers_mut().add(observer);
        self
    }

    // ----- Registration -----

    /// Registers `T` with its own [`Entity::construct`] as factory.
    ///
    /// Registering an already registered key is a no-op unless
    /// [`ContextOptions::strict_registration`] is set.
    pub fn register<T: Entity>(&mut self) -> DiResult<&mut Self> {
        self.register_creator(Key::of::<T>(), Creator::for_entity::<T>())
    }

    /// Registers `key` with an explicit factory.
    pub fn register_creator(&mut self, key: Key, creator: Creator) -> DiResult<&mut Self> {
        tracing::debug!(context = self.id, key = %key, "Registering");

        if self.registry.has_creator(&key) {
            if self.options.strict_registration {
                return Err(DiError::DuplicateCreator(key.name().to_string()));
            }
            tracing::debug!(context = self.id, key = %key, "Already registered, keeping the first creator");
            return Ok(self);
        }

        self.registry.add_creator(key, creator)?;
        Ok(self)
    }

    // ----- Injection -----

    /// Declares that parameter `index` of `C` is filled by `D`.
    pub fn inject<C: Entity, D: Entity>(&mut self, index: usize) -> DiResult<&mut Self> {
        self.inject_key(&Key::of::<C>(), index, Key::of::<D>())
    }

    /// Declares that parameter `index` of `consumer` is filled by `dependency`.
    pub fn inject_key(&mut self, consumer: &Key, index: usize, dependency: Key) -> DiResult<&mut Self> {
        tracing::debug!(
            context = self.id,
            consumer = %consumer,
            dependency = %dependency,
            index,
            "Injecting"
        );

        self.injections.set_injection(consumer, index, dependency)?;
        Ok(self)
    }

    // ----- Replacement -----

    /// Replaces `O` with `R`, registering `R` if it is not registered yet.
    ///
    /// `R` must hand consumers the same type as `O`; this is checked at compile
    /// time. `R` inherits the injections declared for `O`.
    pub fn replace<O, R>(&mut self) -> DiResult<&mut Self>
    where
        O: Entity,
        R: Entity<Output = O::Output>,
    {
        self.replace_with(&Key::of::<O>(), Key::of::<R>(), Creator::for_entity::<R>())
    }

    /// Replaces `original` with `replacement`, registering `creator` for the
    /// replacement if it has no factory yet.
    pub fn replace_with(&mut self, original: &Key, replacement: Key, creator: Creator) -> DiResult<&mut Self> {
        self.replace_key(original, replacement.clone())?;

        if !self.registry.has_creator(&replacement) {
            self.registry.add_creator(replacement, creator)?;
        }

        Ok(self)
    }

    /// Replaces `original` with an already registered `replacement`.
    pub fn replace_key(&mut self, original: &Key, replacement: Key) -> DiResult<&mut Self> {
        tracing::debug!(
            context = self.id,
            original = %original,
            replacement = %replacement,
            "Replacing"
        );

        self.replacements.set_replacement(original.clone(), replacement.clone())?;

        if let Some(dropped) = self.injections.link(replacement.clone(), original) {
            if dropped.iter().any(Option::is_some) {
                tracing::warn!(
                    context = self.id,
                    replacement = %replacement,
                    "Injections declared for the replacement itself are dropped in favor of the original's"
                );
            }
        }

        Ok(self)
    }

    // ----- Queries -----

    /// Whether a factory is registered for `key`.
    pub fn has_creator(&self, key: &Key) -> bool {
        self.registry.has_creator(key)
    }

    /// Whether an object is cached for `key` (not following replacements).
    pub fn has_object(&self, key: &Key) -> bool {
        self.registry.has_object(key)
    }

    /// Parameter slots declared for `consumer`.
    pub fn injections_of(&self, consumer: &Key) -> Option<&[Option<Key>]> {
        self.injections.injections(consumer)
    }

    /// The replacement declared for `original`.
    pub fn replacement_of(&self, original: &Key) -> Option<&Key> {
        self.replacements.get(original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::object::{Dependencies, Object};
    use async_trait::async_trait;

    struct Config;

    #[async_trait]
    impl Entity for Config {
        type Output = Config;

        async fn construct(_: Dependencies) -> Result<Arc<Config>, BoxError> {
            Ok(Arc::new(Config))
        }
    }

    struct DevConfig;

    #[async_trait]
    impl Entity for DevConfig {
        type Output = Config;

        async fn construct(_: Dependencies) -> Result<Arc<Config>, BoxError> {
            Ok(Arc::new(Config))
        }
    }

    #[test]
    fn lenient_registration_is_a_noop() {
        let mut context = Context::new();
        context.register::<Config>().unwrap();
        context.register::<Config>().unwrap();
        assert_eq!(context.registry().creator_count(), 1);
    }

    #[test]
    fn strict_registration_rejects_duplicates() {
        let mut context = Context::with_options(ContextOptions::default().strict(true));
        context.register::<Config>().unwrap();

        match context.register::<Config>() {
            Err(DiError::DuplicateCreator(name)) => assert!(name.contains("Config")),
            other => panic!("Expected DuplicateCreator, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn replace_registers_replacement() {
        let mut context = Context::new();
        context.register::<Config>().unwrap().replace::<Config, DevConfig>().unwrap();

        assert!(context.has_creator(&Key::of::<DevConfig>()));
        assert_eq!(context.replacement_of(&Key::of::<Config>()), Some(&Key::of::<DevConfig>()));
    }

    #[test]
    fn failed_replace_registers_nothing() {
        let original = Key::token("Config");
        let mut context = Context::new();
        context.replace_key(&original, Key::token("DevConfig")).unwrap();

        let late = Key::token("LateConfig");
        let creator = Creator::sync(|_| Ok(Object::new(Arc::new(Config))));
        assert!(matches!(
            context.replace_with(&original, late.clone(), creator),
            Err(DiError::DuplicateReplacement { .. })
        ));
        assert!(!context.has_creator(&late));
    }

    #[test]
    fn replacement_inherits_injections() {
        let original = Key::token("Config");
        let replacement = Key::token("DevConfig");
        let env = Key::token("Env");
        let mut context = Context::new();

        context.inject_key(&original, 0, env.clone()).unwrap();
        context.replace_key(&original, replacement.clone()).unwrap();

        assert_eq!(context.injections_of(&replacement).unwrap()[0].as_ref(), Some(&env));
    }

    #[test]
    fn names_default_to_id() {
        let context = Context::new();
        assert_eq!(context.name(), format!("context-{}", context.id()));
        assert_ne!(Context::new().id(), context.id());
    }
}

//! Factories: the functions that turn resolved dependencies into an object.
//!
//! A [`Creator`] is bound to exactly one key in the
//! [`CreatorRegistry`](crate::CreatorRegistry). It may finish synchronously or
//! suspend; the registry awaits it either way.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BoxError;
use crate::internal::BoxFuture;
use crate::object::{Dependencies, Object};

/// Future returned by a [`Creator`].
pub type CreatorFuture = BoxFuture<'static, Result<Object, BoxError>>;

type CreateFn = dyn Fn(Dependencies) -> CreatorFuture + Send + Sync;

/// A type whose objects the container can construct.
///
/// The key of an entity is [`Key::of::<Self>()`](crate::Key::of). `Output` is what
/// consumers receive; it is usually `Self`, but may be a trait object or, for a
/// replacement, the output type of the entity being replaced.
///
/// # Examples
///
/// ```
/// use tokenwire::{BoxError, Dependencies, Entity};
/// use async_trait::async_trait;
/// use std::sync::Arc;
///
/// struct Logger;
///
/// struct Server {
///     logger: Arc<Logger>,
/// }
///
/// #[async_trait]
/// impl Entity for Logger {
///     type Output = Logger;
///
///     async fn construct(_dependencies: Dependencies) -> Result<Arc<Logger>, BoxError> {
///         Ok(Arc::new(Logger))
///     }
/// }
///
/// #[async_trait]
/// impl Entity for Server {
///     type Output = Server;
///
///     async fn construct(dependencies: Dependencies) -> Result<Arc<Server>, BoxError> {
///         Ok(Arc::new(Server { logger: dependencies.get(0)? }))
///     }
/// }
/// ```
#[async_trait]
pub trait Entity: Send + Sync + 'static {
    /// The type handed to consumers.
    type Output: ?Sized + Send + Sync + 'static;

    /// Builds the object from its dependencies, in parameter order.
    async fn construct(dependencies: Dependencies) -> Result<Arc<Self::Output>, BoxError>;
}

/// Factory producing one object from its resolved dependencies.
#[derive(Clone)]
pub struct Creator {
    create: Arc<CreateFn>,
}

impl Creator {
    /// Creates a factory from an async closure.
    pub fn new<F, Fut>(create: F) -> Self
    where
        F: Fn(Dependencies) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Object, BoxError>> + Send + 'static,
    {
        Self {
            create: Arc::new(move |dependencies: Dependencies| -> CreatorFuture { Box::pin(create(dependencies)) }),
        }
    }

    /// Creates a factory from a closure that never suspends.
    pub fn sync<F>(create: F) -> Self
    where
        F: Fn(Dependencies) -> Result<Object, BoxError> + Send + Sync + 'static,
    {
        Self::new(move |dependencies| std::future::ready(create(dependencies)))
    }

    /// Factory that hands out an already built object.
    pub fn instance(object: Object) -> Self {
        Self::sync(move |_| Ok(object.clone()))
    }

    /// The default factory of an entity: its own `construct`.
    pub fn for_entity<T: Entity>() -> Self {
        Self::new(|dependencies| async move { T::construct(dependencies).await.map(Object::new) })
    }

    pub(crate) fn call(&self, dependencies: Dependencies) -> CreatorFuture {
        (self.create)(dependencies)
    }
}

impl fmt::Debug for Creator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Creator").finish_non_exhaustive()
    }
}

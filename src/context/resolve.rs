//! Recursive, memoizing resolution of object graphs.

use std::sync::Arc;

use super::Context;
use crate::creator::Entity;
use crate::error::{DiError, DiResult};
use crate::internal::{BoxFuture, ResolutionPath};
use crate::key::Key;
use crate::object::{Dependencies, Object};

impl Context {
    /// Resolves `T`, building it and everything it depends on as needed.
    ///
    /// If `T` was replaced, the replacement's object is returned.
    pub async fn resolve<T: Entity>(&mut self) -> DiResult<Arc<T::Output>> {
        let key = Key::of::<T>();
        let object = self.resolve_key(&key).await?;
        object.downcast_for::<T::Output>(&key)
    }

    /// Resolves `key` into its object.
    ///
    /// Dependencies are resolved depth-first and strictly in parameter order.
    /// Objects built before a failure stay cached; the failing key does not,
    /// so resolving again retries it.
    pub async fn resolve_key(&mut self, key: &Key) -> DiResult<Object> {
        let mut path = ResolutionPath::new(self.options.max_depth);
        let result = self.resolve_object(key.clone(), &mut path).await;

        if let Err(error) = &result {
            tracing::debug!(context = self.id, key = %key, %error, "Resolution failed");
        }

        result
    }

    fn resolve_object<'a>(&'a mut self, key: Key, path: &'a mut ResolutionPath) -> BoxFuture<'a, DiResult<Object>> {
        Box::pin(async move {
            tracing::trace!(context = self.id, key = %key, "Resolving");

            let key = match self.replacements.get(&key) {
                Some(replacement) => {
                    tracing::trace!(
                        context = self.id,
                        key = %key,
                        replacement = %replacement,
                        "Found a replacement"
                    );
                    replacement.clone()
                }
                None => key,
            };

            if self.registry.has_object(&key) {
                return self.registry.get_object(&key);
            }

            path.enter(&key)?;
            let dependencies = self.resolve_dependencies(&key, path).await?;

            tracing::trace!(context = self.id, key = %key, "Preparing object");
            self.registry.prepare_object(&key, dependencies).await?;
            path.leave(&key);

            self.registry.get_object(&key)
        })
    }

    async fn resolve_dependencies(&mut self, consumer: &Key, path: &mut ResolutionPath) -> DiResult<Dependencies> {
        tracing::trace!(context = self.id, consumer = %consumer, "Resolving dependencies");

        let injections = self.injections.get_or_create_injections(consumer).clone();
        let mut dependencies = Dependencies::with_capacity(injections.len());

        // One at a time and in order: factories may have ordering-sensitive side effects
        for (index, injection) in injections.into_iter().enumerate() {
            let dependency = injection.ok_or_else(|| DiError::MissingInjection {
                consumer: consumer.name().to_string(),
                index,
            })?;

            let object = self.resolve_object(dependency.clone(), path).await?;
            dependencies.push(dependency, object);
        }

        Ok(dependencies)
    }
}

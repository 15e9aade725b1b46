//! Dry-run resolution: the construction order without running any factory.

use std::collections::HashSet;

use super::Context;
use crate::creator::Entity;
use crate::error::{DiError, DiResult};
use crate::internal::ResolutionPath;
use crate::key::Key;

impl Context {
    /// Keys whose factories `resolve::<T>()` would run, in the order it would
    /// run them.
    ///
    /// Nothing is constructed. Holes, missing factories and cycles are
    /// reported with the same errors the real resolution would return.
    pub fn plan<T: Entity>(&self) -> DiResult<Vec<Key>> {
        self.plan_key(&Key::of::<T>())
    }

    /// Like [`Context::plan`], for any key.
    pub fn plan_key(&self, key: &Key) -> DiResult<Vec<Key>> {
        let mut planner = Planner {
            context: self,
            path: ResolutionPath::new(self.options.max_depth),
            planned: HashSet::new(),
            order: Vec::new(),
        };

        planner.visit(key)?;
        Ok(planner.order)
    }
}

struct Planner<'a> {
    context: &'a Context,
    path: ResolutionPath,
    planned: HashSet<Key>,
    order: Vec<Key>,
}

impl Planner<'_> {
    fn visit(&mut self, key: &Key) -> DiResult<()> {
        let context = self.context;
        let key = context.replacements.substitute(key);

        if context.registry.has_object(key) || self.planned.contains(key) {
            return Ok(());
        }

        self.path.enter(key)?;

        if let Some(injections) = context.injections.injections(key) {
            for (index, injection) in injections.iter().enumerate() {
                let dependency = injection.as_ref().ok_or_else(|| DiError::MissingInjection {
                    consumer: key.name().to_string(),
                    index,
                })?;
                self.visit(dependency)?;
            }
        }

        if !context.registry.has_creator(key) {
            return Err(DiError::MissingCreator(key.name().to_string()));
        }

        self.path.leave(key);
        self.planned.insert(key.clone());
        self.order.push(key.clone());
        Ok(())
    }
}

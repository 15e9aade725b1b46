//! Injection table: which key fills which constructor parameter.

use std::collections::HashMap;

use crate::error::{DiError, DiResult};
use crate::key::Key;

/// Ordered, sparse parameter slots of one consumer.
///
/// `None` is a hole: a position below the highest injected index that nothing
/// was injected into yet.
pub type Injections = Vec<Option<Key>>;

/// Injection entries by consumer key.
///
/// A consumer may be *linked* to another consumer, in which case both share one
/// entry: reads and writes through either key land in the same slots. This is
/// how a replacement inherits the wiring of the key it replaces.
#[derive(Debug, Default, Clone)]
pub struct InjectionTable {
    entries: HashMap<Key, Injections>,
    links: HashMap<Key, Key>,
}

impl InjectionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    // Links never form a cycle: `link` refuses to point a key at itself
    fn owner<'a>(&'a self, consumer: &'a Key) -> &'a Key {
        let mut owner = consumer;
        while let Some(next) = self.links.get(owner) {
            owner = next;
        }
        owner
    }

    /// The entry of `consumer`, created empty on first access.
    pub fn get_or_create_injections(&mut self, consumer: &Key) -> &mut Injections {
        let owner = self.owner(consumer).clone();
        self.entries.entry(owner).or_default()
    }

    /// The entry of `consumer`, if one was ever created.
    pub fn injections(&self, consumer: &Key) -> Option<&[Option<Key>]> {
        self.entries.get(self.owner(consumer)).map(Vec::as_slice)
    }

    /// Fills parameter `index` of `consumer` with `dependency`.
    ///
    /// Positions between the previous end of the entry and `index` become holes.
    pub fn set_injection(&mut self, consumer: &Key, index: usize, dependency: Key) -> DiResult<()> {
        let injections = self.get_or_create_injections(consumer);

        if let Some(Some(existing)) = injections.get(index) {
            return Err(DiError::DuplicateInjection {
                consumer: consumer.name().to_string(),
                existing: existing.name().to_string(),
                injected: dependency.name().to_string(),
                index,
            });
        }

        if injections.len() <= index {
            injections.resize(index + 1, None);
        }
        injections[index] = Some(dependency);
        Ok(())
    }

    /// Makes `consumer` share the entry of `owner`.
    ///
    /// Keys already linked to `consumer` keep the entry they shared with it.
    /// Returns the entry `consumer` had of its own when nothing else shared it;
    /// that entry is dropped.
    pub fn link(&mut self, consumer: Key, owner: &Key) -> Option<Injections> {
        let owner = self.owner(owner).clone();
        self.entries.entry(owner.clone()).or_default();

        if consumer == owner {
            return None;
        }

        let dependents: Vec<Key> = self
            .links
            .iter()
            .filter(|(_, next)| **next == consumer)
            .map(|(dependent, _)| dependent.clone())
            .collect();

        let previous = match self.links.get(&consumer).cloned() {
            // Dependents skip `consumer` and point straight at what it links to
            Some(next) => {
                for dependent in dependents {
                    self.links.insert(dependent, next.clone());
                }
                None
            }
            None => {
                let entry = self.entries.remove(&consumer);
                match dependents.split_first() {
                    // One dependent inherits the entry, the others link to it
                    Some((heir, rest)) => {
                        self.links.remove(heir);
                        self.entries.insert(heir.clone(), entry.unwrap_or_default());
                        for dependent in rest {
                            self.links.insert(dependent.clone(), heir.clone());
                        }
                        None
                    }
                    None => entry,
                }
            }
        };

        self.links.insert(consumer, owner);
        previous
    }
}

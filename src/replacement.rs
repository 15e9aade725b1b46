//! Replacement table: keys that stand in for other keys.

use std::collections::HashMap;

use crate::error::{DiError, DiResult};
use crate::key::Key;

/// At most one replacement key per original key.
///
/// Lookups are a single hop: a replacement of a replacement is not followed.
#[derive(Debug, Default, Clone)]
pub struct ReplacementTable {
    replacements: HashMap<Key, Key>,
}

impl ReplacementTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `replacement` as the stand-in for `original`.
    pub fn set_replacement(&mut self, original: Key, replacement: Key) -> DiResult<()> {
        if let Some(existing) = self.replacements.get(&original) {
            return Err(DiError::DuplicateReplacement {
                original: original.name().to_string(),
                existing: existing.name().to_string(),
            });
        }

        self.replacements.insert(original, replacement);
        Ok(())
    }

    /// The replacement of `original`, if any.
    pub fn get(&self, original: &Key) -> Option<&Key> {
        self.replacements.get(original)
    }

    /// `key` itself, or its replacement.
    pub fn substitute<'a>(&'a self, key: &'a Key) -> &'a Key {
        self.get(key).unwrap_or(key)
    }

    /// Number of replacements.
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    /// Whether no replacement was declared.
    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }
}

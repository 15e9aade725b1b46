//! Circular dependency detection infrastructure.

use crate::error::{DiError, DiResult};
use crate::key::Key;

pub(crate) const DEFAULT_MAX_DEPTH: usize = 1024;

/// Keys currently being constructed by one resolution, outermost first.
///
/// Cached keys never enter the path, so a key shows up twice only when it
/// (transitively) depends on itself.
pub(crate) struct ResolutionPath {
    stack: Vec<Key>,
    max_depth: usize,
}

impl ResolutionPath {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            stack: Vec::new(),
            max_depth,
        }
    }

    /// Pushes `key`, failing if it is already on the path.
    pub(crate) fn enter(&mut self, key: &Key) -> DiResult<()> {
        // Circular detection BEFORE pushing the new key
        if self.stack.iter().any(|k| k == key) {
            let mut path: Vec<String> = self.stack.iter().map(|k| k.name().to_string()).collect();
            path.push(key.name().to_string());
            return Err(DiError::Circular(path));
        }

        if self.stack.len() >= self.max_depth {
            return Err(DiError::DepthExceeded(self.stack.len()));
        }

        self.stack.push(key.clone());
        Ok(())
    }

    pub(crate) fn leave(&mut self, key: &Key) {
        let last = self.stack.pop();
        debug_assert!(last.as_ref() == Some(key));
    }
}

//! Internal implementation details.

use std::future::Future;
use std::pin::Pin;

pub(crate) mod circular;

pub(crate) use circular::ResolutionPath;

/// Boxed, sendable future used for factories and recursive resolution.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

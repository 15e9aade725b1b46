//! Error types for the dependency injection container.

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

/// Boxed error returned by factories and programs.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Shared form of [`BoxError`], so that [`DiError`] stays `Clone`.
pub type SharedError = Arc<dyn StdError + Send + Sync>;

/// Dependency injection errors
///
/// Every error names the key(s) involved so that a bootstrap layer can render
/// an actionable message. None of them is recovered from inside the container:
/// the `resolve` call that hit one fails as a whole.
///
/// # Examples
///
/// ```rust
/// use tokenwire::DiError;
///
/// let error = DiError::MissingInjection { consumer: "App".into(), index: 1 };
/// assert_eq!(
///     error.to_string(),
///     "Cannot resolve dependencies: consumer \"App\" has no injection at parameter index 1",
/// );
/// ```
#[derive(Debug, Clone, Error)]
pub enum DiError {
    /// A factory is already registered for the key
    #[error("Cannot add creator: creator for \"{0}\" already added")]
    DuplicateCreator(String),

    /// The parameter position already has a dependency assigned
    #[error("Cannot inject \"{injected}\": consumer \"{consumer}\" already injects \"{existing}\" at index {index}")]
    DuplicateInjection {
        consumer: String,
        existing: String,
        injected: String,
        index: usize,
    },

    /// The key already has a replacement
    #[error("Cannot replace \"{original}\": it is already replaced by \"{existing}\"")]
    DuplicateReplacement { original: String, existing: String },

    /// A consumer was resolved while one of its parameter positions is a hole
    #[error("Cannot resolve dependencies: consumer \"{consumer}\" has no injection at parameter index {index}")]
    MissingInjection { consumer: String, index: usize },

    /// Resolution reached a key without a factory
    #[error("Cannot prepare object: creator for \"{0}\" was not added")]
    MissingCreator(String),

    /// An object was prepared twice for the same key
    #[error("Cannot prepare object: \"{0}\" is already prepared")]
    AlreadyPrepared(String),

    /// An object was requested before it was prepared
    #[error("Cannot get object: \"{0}\" was not prepared")]
    NotPrepared(String),

    /// The factory of a key returned an error
    #[error("Creator for \"{key}\" failed: {source}")]
    CreatorFailed { key: String, source: SharedError },

    /// The program run by `bootstrap` returned an error
    #[error("Program \"{program}\" failed: {source}")]
    ProgramFailed { program: String, source: SharedError },

    /// The object stored for a key is not of the requested type
    #[error("Type mismatch for \"{key}\": expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A factory asked for a dependency position it was not given
    #[error("Dependency index {index} is out of range ({len} dependencies)")]
    DependencyOutOfRange { index: usize, len: usize },

    /// Circular dependency detected (includes path)
    #[error("Circular dependency: {}", .0.join(" -> "))]
    Circular(Vec<String>),

    /// Maximum resolution depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),

    /// A context option could not be parsed
    #[error("Invalid option \"{name}\": {reason}")]
    InvalidOption { name: String, reason: String },
}

impl DiError {
    pub(crate) fn creator_failed(key: &crate::Key, source: BoxError) -> Self {
        DiError::CreatorFailed {
            key: key.name().to_string(),
            source: Arc::from(source),
        }
    }
}

/// Result type for DI operations
pub type DiResult<T> = Result<T, DiError>;

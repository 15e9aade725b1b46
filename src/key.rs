//! Key types identifying registrable and injectable entities.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Key for factory, injection and object lookup.
///
/// Keys are compared by identity, never by name. The name only exists for
/// diagnostics.
///
/// - **Type**: the identity of a Rust type, the usual key of an [`Entity`](crate::Entity)
/// - **Token**: a generated handle, for things that are not a type of their own
///
/// # Examples
///
/// ```rust
/// use tokenwire::Key;
///
/// struct Config;
///
/// assert_eq!(Key::of::<Config>(), Key::of::<Config>());
///
/// // Tokens with the same name are still different keys
/// let primary = Key::token("database");
/// let replica = Key::token("database");
/// assert_ne!(primary, replica);
/// assert_eq!(primary.name(), replica.name());
/// ```
#[derive(Debug, Clone)]
pub enum Key {
    /// Type key with TypeId and name for diagnostics
    Type(TypeId, &'static str),
    /// Generated token with a unique id and a name for diagnostics
    Token(u64, Arc<str>),
}

impl Key {
    /// Key of the type `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Key {
        Key::Type(TypeId::of::<T>(), std::any::type_name::<T>())
    }

    /// Creates a new token key. Every call yields a distinct key.
    pub fn token(name: impl Into<Arc<str>>) -> Key {
        Key::Token(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed), name.into())
    }

    /// Human-readable name used in diagnostics.
    pub fn name(&self) -> &str {
        match self {
            Key::Type(_, name) => name,
            Key::Token(_, name) => name,
        }
    }

    /// Whether this key identifies a type rather than a token.
    pub fn is_type(&self) -> bool {
        matches!(self, Key::Type(..))
    }
}

// Identity only: names are ignored
impl PartialEq for Key {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Type(a, _), Key::Type(b, _)) => a == b,
            (Key::Token(a, _), Key::Token(b, _)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Key::Type(id, _) => {
                0u8.hash(state);
                id.hash(state);
            }
            Key::Token(id, _) => {
                1u8.hash(state);
                id.hash(state);
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Helper for creating type keys
#[inline]
pub fn key_of_type<T: ?Sized + 'static>() -> Key {
    Key::of::<T>()
}

//! Context options and how to load them from the environment.

use std::env;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::{DiError, DiResult};
use crate::internal::circular::DEFAULT_MAX_DEPTH;

/// Default prefix of the environment variables read by [`ContextOptions::from_env`].
pub const DEFAULT_ENV_PREFIX: &str = "TOKENWIRE";

/// Behavior switches of a [`Context`](crate::Context).
///
/// # Examples
///
/// ```rust
/// use tokenwire::{Context, ContextOptions};
///
/// let options = ContextOptions::default()
///     .with_name("app")
///     .strict(true);
///
/// let context = Context::with_options(options);
/// assert_eq!(context.name(), "app");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContextOptions {
    /// Label attached to log events; defaults to `context-<id>`
    pub name: Option<String>,
    /// Registering an already registered key fails instead of being a no-op
    pub strict_registration: bool,
    /// Maximum depth of one resolution
    pub max_depth: usize,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            name: None,
            strict_registration: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ContextOptions {
    /// Sets the context label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets strict registration.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_registration = strict;
        self
    }

    /// Sets the maximum resolution depth. Values below 1 are raised to 1.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Reads options from `TOKENWIRE_*` environment variables.
    pub fn from_env() -> DiResult<Self> {
        Self::from_env_with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Reads `<PREFIX>_NAME`, `<PREFIX>_STRICT_REGISTRATION` and
    /// `<PREFIX>_MAX_DEPTH`. Unset variables keep their defaults.
    pub fn from_env_with_prefix(prefix: &str) -> DiResult<Self> {
        let mut options = Self::default();
        let var = |name: &str| {
            let env_key = format!("{}_{}", prefix.to_uppercase(), name);
            env::var(&env_key).ok().map(|value| (env_key, value))
        };

        if let Some((_, name)) = var("NAME") {
            options.name = Some(name);
        }

        if let Some((env_key, value)) = var("STRICT_REGISTRATION") {
            options.strict_registration = parse_bool(&env_key, &value)?;
        }

        if let Some((env_key, value)) = var("MAX_DEPTH") {
            options.max_depth = parse_depth(&env_key, &value)?;
        }

        Ok(options)
    }

    /// Parses options from JSON. Missing fields keep their defaults.
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> DiResult<Self> {
        let options: Self = serde_json::from_str(json).map_err(|e| DiError::InvalidOption {
            name: "json".to_string(),
            reason: e.to_string(),
        })?;

        if options.max_depth == 0 {
            return Err(invalid("max_depth", "must be greater than zero"));
        }

        Ok(options)
    }
}

fn invalid(name: &str, reason: impl Into<String>) -> DiError {
    DiError::InvalidOption {
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn parse_bool(name: &str, value: &str) -> DiResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(invalid(name, format!("expected a boolean, got \"{}\"", other))),
    }
}

fn parse_depth(name: &str, value: &str) -> DiResult<usize> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(invalid(name, "must be greater than zero")),
        Ok(depth) => Ok(depth),
        Err(e) => Err(invalid(name, e.to_string())),
    }
}

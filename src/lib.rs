//! # tokenwire
//!
//! Explicitly wired, asynchronous dependency injection for Rust.
//!
//! ## Features
//!
//! - **Explicit wiring**: dependencies are declared per constructor parameter, never inferred
//! - **Async factories**: a factory may suspend; dependencies are built strictly one after another
//! - **Singletons**: every key yields at most one object per [`Context`]
//! - **Replacements**: swap an entity for another one that hands out the same type
//! - **Diagnostics**: every error names the keys involved; cycles are reported with their path
//!
//! ## Quick Start
//!
//! ```rust
//! use tokenwire::{BoxError, Context, Dependencies, Entity};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct Config {
//!     port: u16,
//! }
//!
//! struct Server {
//!     config: Arc<Config>,
//! }
//!
//! #[async_trait]
//! impl Entity for Config {
//!     type Output = Config;
//!
//!     async fn construct(_: Dependencies) -> Result<Arc<Config>, BoxError> {
//!         Ok(Arc::new(Config { port: 8080 }))
//!     }
//! }
//!
//! #[async_trait]
//! impl Entity for Server {
//!     type Output = Server;
//!
//!     async fn construct(dependencies: Dependencies) -> Result<Arc<Server>, BoxError> {
//!         Ok(Arc::new(Server { config: dependencies.get(0)? }))
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), tokenwire::DiError> {
//! let mut context = Context::new();
//! context
//!     .register::<Config>()?
//!     .register::<Server>()?
//!     .inject::<Server, Config>(0)?;
//!
//! let server = context.resolve::<Server>().await?;
//! assert_eq!(server.config.port, 8080);
//! # Ok(())
//! # }
//! ```
//!
//! ## Replacements
//!
//! A replacement must produce the same [`Entity::Output`] as the entity it
//! replaces. Consumers keep injecting the original and receive the
//! replacement's object.
//!
//! ```rust
//! use tokenwire::{BoxError, Context, Dependencies, Entity};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct Config {
//!     debug: bool,
//! }
//!
//! struct DevConfig;
//!
//! #[async_trait]
//! impl Entity for Config {
//!     type Output = Config;
//!
//!     async fn construct(_: Dependencies) -> Result<Arc<Config>, BoxError> {
//!         Ok(Arc::new(Config { debug: false }))
//!     }
//! }
//!
//! #[async_trait]
//! impl Entity for DevConfig {
//!     type Output = Config;
//!
//!     async fn construct(_: Dependencies) -> Result<Arc<Config>, BoxError> {
//!         Ok(Arc::new(Config { debug: true }))
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), tokenwire::DiError> {
//! let mut context = Context::new();
//! context.register::<Config>()?.replace::<Config, DevConfig>()?;
//!
//! assert!(context.resolve::<Config>().await?.debug);
//! # Ok(())
//! # }
//! ```
//!
//! ## Tokens
//!
//! Anything that is not a type of its own is keyed by a [`Key::token`] and
//! wired through the key-based methods (`register_creator`, `inject_key`,
//! `resolve_key`).

pub mod config;
pub mod context;
pub mod creator;
pub mod error;
pub mod injection;
pub mod key;
pub mod object;
pub mod observer;
pub mod registry;
pub mod replacement;

mod internal;

pub use config::{ContextOptions, DEFAULT_ENV_PREFIX};
pub use context::{Context, Program};
pub use creator::{Creator, CreatorFuture, Entity};
pub use error::{BoxError, DiError, DiResult, SharedError};
pub use injection::{InjectionTable, Injections};
pub use internal::BoxFuture;
pub use key::{key_of_type, Key};
pub use object::{Dependencies, Object};
pub use observer::{DiObserver, TracingObserver};
pub use registry::CreatorRegistry;
pub use replacement::ReplacementTable;

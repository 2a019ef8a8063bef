//! Configuration types, sources and the process-wide store

pub mod env;
pub mod error;
pub mod host;
pub mod raw;
mod rules;
pub mod secret;
pub mod source;
pub mod store;
pub mod toml;
pub mod types;

pub use error::{ConfigError, Field};
pub use host::DataHost;
pub use raw::RawConfig;
pub use secret::Secret;
pub use source::{load, CompiledIn, ConfigSource, EnvSource, TomlSource, VarsSource};
#[cfg(feature = "serde")]
pub use source::PostcardSource;
pub use store::{ConfigStore, StoreState};
pub use types::*;

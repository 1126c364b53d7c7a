//! # Pruner Config
//!
//! TOML configuration for Playlist Pruner: browser endpoint, timing
//! thresholds, matching vocabulary, host-page selectors and logging.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};

//! Configuration for the lodestone weighting engine.
//!
//! The engine's electrical and geometry constants (design-unit scale, wire
//! capacitance and resistance per micron, the fixed primary-output load, and
//! the incremental delay tolerance) are consumed as configuration rather
//! than hardcoded. They load from a `lodestone.toml` file; every field is
//! defaulted, so an absent file is not an error for callers that prefer
//! [`RcConfig::default`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{EngineConfig, RcConfig};

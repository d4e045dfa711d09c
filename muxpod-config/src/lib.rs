//! Configuration system for muxpod.
//!
//! Settings live in `~/.config/muxpod/config.yaml`. Every field has a serde
//! default, so a partial (or empty) file is always valid input; semantic
//! checks happen in [`Config::validate`].

pub mod config;
pub mod defaults;
mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::LogLevel;

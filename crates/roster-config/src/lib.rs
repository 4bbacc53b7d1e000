//! # Roster Config
//!
//! Configuration management for Roster.
//! Supports layered configuration from TOML files, `.env` files, and
//! environment variables, validated once at startup.

mod app_config;
mod environment;
mod loader;
mod validation;

pub use app_config::*;
pub use environment::*;
pub use loader::*;
pub use validation::*;

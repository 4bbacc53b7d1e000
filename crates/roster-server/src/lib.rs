//! # Roster Server Library
//!
//! Wires configuration, persistence, services and the HTTP router into a
//! runnable application.

pub mod app;
pub mod logging;
pub mod startup;

pub use app::Application;

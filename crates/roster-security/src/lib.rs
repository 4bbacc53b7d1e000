//! # Roster Security
//!
//! Password hashing for stored user credentials. Plain-text passwords never
//! reach the persistence adapter.

pub mod password;

pub use password::*;

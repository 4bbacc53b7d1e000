//! # Roster Core
//!
//! Core types, traits, and error definitions for Roster.
//! This crate provides the foundational abstractions shared by the
//! persistence adapter, the user mapper, and the HTTP layer.

pub mod error;
pub mod id;
pub mod result;
pub mod traits;
pub mod user;
pub mod validation;

pub use error::*;
pub use id::*;
pub use result::*;
pub use traits::*;
pub use user::*;
pub use validation::*;

//! # Roster Service
//!
//! Maps validated requests onto the persistence adapter and adapter
//! results back onto response DTOs.

pub mod dto;
pub mod r#impl;
pub mod user_service;

pub use dto::*;
pub use r#impl::UserServiceImpl;
pub use user_service::*;

//! # Roster Repository
//!
//! Persistence adapters for users.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>
//! MySqlUserRepository      (mysql://  SQLx pool + migrations)
//! InMemoryUserRepository   (memory:// process-local Vec)
//! ```
//!
//! [`Persistence::open`] picks the adapter from the database URL scheme.

pub mod memory;
pub mod mysql;
pub mod persistence;
pub mod pool;
pub mod traits;

pub use memory::*;
pub use mysql::*;
pub use persistence::*;
pub use pool::*;
pub use traits::*;

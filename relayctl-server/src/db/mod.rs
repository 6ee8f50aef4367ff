//! Database layer - connection pool and repositories
//!
//! - Connection pool handed to handlers explicitly, no global handle
//! - Upserts via ON CONFLICT, no check-then-insert
//! - One transaction per scan; rollback on any failed step

pub mod pool;
pub mod repos;

pub use pool::{connect_options, create_pool};
pub use repos::*;

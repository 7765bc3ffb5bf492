//! Database layer - lazily connected Postgres pool

pub mod pool;

pub use pool::{create_pool, verify_connection};

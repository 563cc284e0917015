//! Database access: pool construction, schema migrations, repositories

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};

//! # relay-db
//!
//! PostgreSQL persistence: pool management, row models, and the
//! repository implementations backing the relay's durable state.

pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig};
pub use repositories::{PgMessageRepository, PgUserRepository};
pub use sqlx::PgPool;

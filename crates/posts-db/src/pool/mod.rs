//! Database connection pool management

mod postgres;

pub use postgres::{create_pool, ping, run_migrations, run_migrations_from, PoolConfig, PoolError};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;

//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in posts-core.

mod error;
mod post;
mod user;

pub use post::PgPostRepository;
pub use user::PgUserRepository;

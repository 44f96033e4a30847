//! Database models - SQLx-compatible structs for PostgreSQL tables

mod post;
mod reaction;
mod user;

pub use post::{PostModel, PostWithCreatorModel};
pub use reaction::ReactionModel;
pub use user::UserModel;

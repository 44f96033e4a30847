//! # posts-core
//!
//! Domain layer containing entities, the like/dislike state machine, value objects,
//! and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Post, PostWithCreator, Reaction, ReactionKind, ReactionState, ReactionTransition, User,
    UserRole,
};
pub use error::DomainError;
pub use traits::{PostRepository, RepoResult, UserRepository};
pub use value_objects::{IdGenerator, UuidGenerator};

//! Domain entities - core business objects

mod post;
mod reaction;
mod user;

pub use post::{Post, PostWithCreator};
pub use reaction::{Reaction, ReactionKind, ReactionState, ReactionTransition};
pub use user::{User, UserRole};

//! Entity <-> model mappers
//!
//! - `From<Model> for Entity` where the conversion cannot fail
//! - `TryFrom<UserModel> for User`, since the stored role is free text

mod post;
mod reaction;
mod user;

pub use post::PostInsert;

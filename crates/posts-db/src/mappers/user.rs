//! User entity <-> model mapper

use posts_core::{DomainError, User, UserRole};

use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let role = model
            .role
            .parse::<UserRole>()
            .map_err(|_| DomainError::DatabaseError(format!("corrupt role for user {}", model.id)))?;

        Ok(User {
            id: model.id,
            name: model.name,
            email: model.email,
            role,
            created_at: model.created_at,
        })
    }
}

//! Reaction entity <-> model mapper

use posts_core::Reaction;

use crate::models::ReactionModel;

impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        Reaction {
            user_id: model.user_id,
            post_id: model.post_id,
            like: model.like,
        }
    }
}

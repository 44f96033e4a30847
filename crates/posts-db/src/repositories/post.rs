//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use posts_core::{
    DomainError, Post, PostRepository, PostWithCreator, Reaction, ReactionKind, ReactionState,
    ReactionTransition, RepoResult,
};

use crate::mappers::PostInsert;
use crate::models::{PostModel, PostWithCreatorModel, ReactionModel};

use super::error::{map_db_error, map_unique_violation, post_not_found};

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build an `ILIKE` pattern matching `query` literally anywhere in the text.
///
/// Returns `None` for a blank query so that every post matches.
fn contains_pattern(query: Option<&str>) -> Option<String> {
    let query = query.map(str::trim).filter(|q| !q.is_empty())?;

    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_all(&self, query: Option<&str>) -> RepoResult<Vec<PostWithCreator>> {
        let results = sqlx::query_as::<_, PostWithCreatorModel>(
            r"
            SELECT p.id, p.creator_id, p.content, p.likes, p.dislikes,
                   p.created_at, p.updated_at, u.name AS creator_name
            FROM posts p
            JOIN users u ON u.id = p.creator_id
            WHERE $1::TEXT IS NULL OR p.content ILIKE $1
            ORDER BY p.created_at DESC, p.id
            ",
        )
        .bind(contains_pattern(query))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PostWithCreator::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, creator_id, content, likes, dislikes, created_at, updated_at
            FROM posts
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        let insert = PostInsert::new(post);

        sqlx::query(
            r"
            INSERT INTO posts (id, creator_id, content, likes, dislikes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(insert.id)
        .bind(insert.creator_id)
        .bind(insert.content)
        .bind(insert.likes)
        .bind(insert.dislikes)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::PostIdCollision(post.id.clone())))?;

        Ok(())
    }

    #[instrument(skip(self, content))]
    async fn update_content(
        &self,
        id: &str,
        creator_id: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET content = $3, updated_at = $4
            WHERE id = $1 AND creator_id = $2
            ",
        )
        .bind(id)
        .bind(creator_id)
        .bind(content)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str, creator_id: &str) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND creator_id = $2")
            .bind(id)
            .bind(creator_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_reaction(&self, user_id: &str, post_id: &str) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT user_id, post_id, "like"
            FROM likes_dislikes
            WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Reaction::from))
    }

    #[instrument(skip(self))]
    async fn apply_reaction(
        &self,
        user_id: &str,
        post_id: &str,
        requested: ReactionKind,
    ) -> RepoResult<ReactionTransition> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Row lock on the post serializes reactions to it until commit
        let creator_id = sqlx::query_scalar::<_, String>(
            "SELECT creator_id FROM posts WHERE id = $1 FOR UPDATE",
        )
        .bind(post_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| post_not_found(post_id))?;

        if creator_id == user_id {
            return Err(DomainError::SelfReaction);
        }

        let existing = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT user_id, post_id, "like"
            FROM likes_dislikes
            WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .map(Reaction::from);

        let transition = ReactionState::of(existing.as_ref()).transition(requested);

        match transition.stored_like() {
            Some(like) => {
                sqlx::query(
                    r#"
                    INSERT INTO likes_dislikes (user_id, post_id, "like")
                    VALUES ($1, $2, $3)
                    ON CONFLICT (user_id, post_id) DO UPDATE SET "like" = EXCLUDED."like"
                    "#,
                )
                .bind(user_id)
                .bind(post_id)
                .bind(like)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
            None => {
                sqlx::query("DELETE FROM likes_dislikes WHERE user_id = $1 AND post_id = $2")
                    .bind(user_id)
                    .bind(post_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;
            }
        }

        let (likes_delta, dislikes_delta) = transition.counter_delta();
        sqlx::query(
            r"
            UPDATE posts
            SET likes = likes + $2, dislikes = dislikes + $3
            WHERE id = $1
            ",
        )
        .bind(post_id)
        .bind(likes_delta)
        .bind(dislikes_delta)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(action = transition.action(), likes_delta, dislikes_delta, "Reaction applied");
        Ok(transition)
    }
}

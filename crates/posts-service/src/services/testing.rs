//! In-memory repositories and fixtures for service tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use posts_common::auth::{JwtService, TokenPayload};
use posts_core::{
    DomainError, IdGenerator, Post, PostRepository, PostWithCreator, Reaction, ReactionKind,
    ReactionState, ReactionTransition, RepoResult, User, UserRepository, UserRole,
};

use super::context::{ServiceContext, ServiceContextBuilder};

const SECRET: &str = "service-test-secret-long-enough";

pub(crate) fn jwt() -> JwtService {
    JwtService::new(SECRET, 3600)
}

pub(crate) fn token_for(id: &str, name: &str) -> String {
    jwt()
        .generate_token(&TokenPayload {
            id: id.to_string(),
            name: name.to_string(),
            role: UserRole::Normal,
        })
        .unwrap()
}

#[derive(Default)]
struct State {
    /// user id -> (user, password hash)
    users: HashMap<String, (User, String)>,
    /// insertion order doubles as creation order
    posts: Vec<Post>,
    /// (user id, post id) -> like
    reactions: HashMap<(String, String), bool>,
}

/// Single-lock store implementing both repositories
#[derive(Default)]
pub(crate) struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Seed a user directly, bypassing signup
    pub(crate) fn add_user(&self, id: &str, name: &str) -> User {
        let user = User::new(id.to_string(), name.to_string(), format!("{id}@email.com"));
        self.state
            .lock()
            .users
            .insert(user.id.clone(), (user.clone(), "unused".to_string()));
        user
    }

    pub(crate) fn post(&self, id: &str) -> Option<Post> {
        self.state.lock().posts.iter().find(|p| p.id == id).cloned()
    }

    pub(crate) fn post_count(&self) -> usize {
        self.state.lock().posts.len()
    }

    pub(crate) fn reaction(&self, user_id: &str, post_id: &str) -> Option<bool> {
        self.state
            .lock()
            .reactions
            .get(&(user_id.to_string(), post_id.to_string()))
            .copied()
    }

    /// Count stored reaction rows for a post as `(likes, dislikes)`
    pub(crate) fn reaction_counts(&self, post_id: &str) -> (i64, i64) {
        let state = self.state.lock();
        state
            .reactions
            .iter()
            .filter(|((_, p), _)| p == post_id)
            .fold((0, 0), |(l, d), (_, like)| if *like { (l + 1, d) } else { (l, d + 1) })
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        Ok(self.state.lock().users.get(id).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .users
            .values()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.state.lock().users.values().any(|(u, _)| u.email == email))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.users.values().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        state
            .users
            .insert(user.id.clone(), (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn get_password_hash(&self, id: &str) -> RepoResult<Option<String>> {
        Ok(self.state.lock().users.get(id).map(|(_, h)| h.clone()))
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_all(&self, query: Option<&str>) -> RepoResult<Vec<PostWithCreator>> {
        let state = self.state.lock();
        let needle = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        Ok(state
            .posts
            .iter()
            .rev()
            .filter(|p| {
                needle
                    .as_ref()
                    .map_or(true, |n| p.content.to_lowercase().contains(n))
            })
            .map(|p| PostWithCreator {
                post: p.clone(),
                creator_name: state
                    .users
                    .get(&p.creator_id)
                    .map(|(u, _)| u.name.clone())
                    .unwrap_or_default(),
            })
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Post>> {
        Ok(self.post(id))
    }

    async fn exists(&self, id: &str) -> RepoResult<bool> {
        Ok(self.state.lock().posts.iter().any(|p| p.id == id))
    }

    async fn create(&self, post: &Post) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.posts.iter().any(|p| p.id == post.id) {
            return Err(DomainError::PostIdCollision(post.id.clone()));
        }
        state.posts.push(post.clone());
        Ok(())
    }

    async fn update_content(
        &self,
        id: &str,
        creator_id: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let mut state = self.state.lock();
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == id && p.creator_id == creator_id)
            .ok_or_else(|| DomainError::PostNotFound(id.to_string()))?;
        post.content = content.to_string();
        post.updated_at = updated_at;
        Ok(())
    }

    async fn delete(&self, id: &str, creator_id: &str) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.posts.len();
        state.posts.retain(|p| !(p.id == id && p.creator_id == creator_id));
        if state.posts.len() == before {
            return Err(DomainError::PostNotFound(id.to_string()));
        }
        state.reactions.retain(|(_, p), _| p != id);
        Ok(())
    }

    async fn find_reaction(&self, user_id: &str, post_id: &str) -> RepoResult<Option<Reaction>> {
        Ok(self.reaction(user_id, post_id).map(|like| Reaction {
            user_id: user_id.to_string(),
            post_id: post_id.to_string(),
            like,
        }))
    }

    async fn apply_reaction(
        &self,
        user_id: &str,
        post_id: &str,
        requested: ReactionKind,
    ) -> RepoResult<ReactionTransition> {
        let mut state = self.state.lock();
        let key = (user_id.to_string(), post_id.to_string());

        let creator_id = state
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .map(|p| p.creator_id.clone())
            .ok_or_else(|| DomainError::PostNotFound(post_id.to_string()))?;
        if creator_id == user_id {
            return Err(DomainError::SelfReaction);
        }

        let existing = state.reactions.get(&key).map(|like| Reaction {
            user_id: user_id.to_string(),
            post_id: post_id.to_string(),
            like: *like,
        });
        let transition = ReactionState::of(existing.as_ref()).transition(requested);

        match transition.stored_like() {
            Some(like) => {
                state.reactions.insert(key, like);
            }
            None => {
                state.reactions.remove(&key);
            }
        }

        let (likes, dislikes) = transition.counter_delta();
        if let Some(post) = state.posts.iter_mut().find(|p| p.id == post_id) {
            post.likes += likes;
            post.dislikes += dislikes;
        }

        Ok(transition)
    }
}

/// Always returns the same id, to provoke collisions
pub(crate) struct FixedIdGenerator(pub &'static str);

impl IdGenerator for FixedIdGenerator {
    fn next_id(&self) -> String {
        self.0.to_string()
    }
}

/// Sequential ids `p001`, `p002`, ...
#[derive(Default)]
pub(crate) struct SequentialIdGenerator(AtomicUsize);

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        format!("p{:03}", self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Context over a fresh store with sequential ids
pub(crate) fn context() -> (ServiceContext, Arc<InMemoryStore>) {
    context_with_ids(Arc::new(SequentialIdGenerator::default()))
}

pub(crate) fn context_with_ids(ids: Arc<dyn IdGenerator>) -> (ServiceContext, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let ctx = ServiceContextBuilder::new()
        .user_repo(store.clone())
        .post_repo(store.clone())
        .jwt_service(Arc::new(jwt()))
        .id_generator(ids)
        .build()
        .unwrap();
    (ctx, store)
}

//! Reaction entity - a user's like or dislike on a post
//!
//! A (user, post) pair is always in exactly one of three states:
//!
//! | Current    | Requested | Action                          | Next       |
//! |------------|-----------|---------------------------------|------------|
//! | NoReaction | like/dis  | insert row, counter +1          | Liked/Dis. |
//! | Liked      | like      | delete row, likes -1            | NoReaction |
//! | Disliked   | dislike   | delete row, dislikes -1         | NoReaction |
//! | Liked      | dislike   | flip row, likes -1, dislikes +1 | Disliked   |
//! | Disliked   | like      | flip row, dislikes -1, likes +1 | Liked      |

use std::fmt;

/// Reaction row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub user_id: String,
    pub post_id: String,
    pub like: bool,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(user_id: String, post_id: String, kind: ReactionKind) -> Self {
        Self {
            user_id,
            post_id,
            like: kind.is_like(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ReactionKind {
        ReactionKind::from_like(self.like)
    }
}

/// Like or dislike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    /// Map the wire `like` flag (true = like, false = dislike)
    #[inline]
    pub const fn from_like(like: bool) -> Self {
        if like {
            Self::Like
        } else {
            Self::Dislike
        }
    }

    #[inline]
    pub const fn is_like(self) -> bool {
        matches!(self, Self::Like)
    }

    /// Counter delta `(likes, dislikes)` for adding one reaction of this kind
    const fn unit(self) -> (i64, i64) {
        match self {
            Self::Like => (1, 0),
            Self::Dislike => (0, 1),
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Like => f.write_str("like"),
            Self::Dislike => f.write_str("dislike"),
        }
    }
}

/// Reaction state of a single (user, post) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReactionState {
    #[default]
    NoReaction,
    Liked,
    Disliked,
}

impl ReactionState {
    /// State for an optional existing reaction row
    pub fn of(existing: Option<&Reaction>) -> Self {
        match existing.map(Reaction::kind) {
            None => Self::NoReaction,
            Some(ReactionKind::Like) => Self::Liked,
            Some(ReactionKind::Dislike) => Self::Disliked,
        }
    }

    /// Current reaction kind, if any
    pub const fn kind(self) -> Option<ReactionKind> {
        match self {
            Self::NoReaction => None,
            Self::Liked => Some(ReactionKind::Like),
            Self::Disliked => Some(ReactionKind::Dislike),
        }
    }

    const fn holding(kind: ReactionKind) -> Self {
        match kind {
            ReactionKind::Like => Self::Liked,
            ReactionKind::Dislike => Self::Disliked,
        }
    }

    /// Transition triggered by requesting `requested` from this state
    pub const fn transition(self, requested: ReactionKind) -> ReactionTransition {
        match (self.kind(), requested) {
            (None, kind) => ReactionTransition::Sent(kind),
            (Some(ReactionKind::Like), ReactionKind::Like) => {
                ReactionTransition::Removed(ReactionKind::Like)
            }
            (Some(ReactionKind::Dislike), ReactionKind::Dislike) => {
                ReactionTransition::Removed(ReactionKind::Dislike)
            }
            (Some(ReactionKind::Like), ReactionKind::Dislike) => ReactionTransition::Changed {
                from: ReactionKind::Like,
                to: ReactionKind::Dislike,
            },
            (Some(ReactionKind::Dislike), ReactionKind::Like) => ReactionTransition::Changed {
                from: ReactionKind::Dislike,
                to: ReactionKind::Like,
            },
        }
    }
}

/// Outcome of a put-like request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionTransition {
    /// No reaction existed; one was inserted
    Sent(ReactionKind),
    /// The same reaction existed; it was deleted
    Removed(ReactionKind),
    /// The opposite reaction existed; it was overwritten
    Changed { from: ReactionKind, to: ReactionKind },
}

impl ReactionTransition {
    /// State after the transition is applied
    pub const fn next_state(self) -> ReactionState {
        match self {
            Self::Sent(kind) | Self::Changed { to: kind, .. } => ReactionState::holding(kind),
            Self::Removed(_) => ReactionState::NoReaction,
        }
    }

    /// Counter delta `(likes, dislikes)` that keeps post counters equal to row counts
    pub const fn counter_delta(self) -> (i64, i64) {
        match self {
            Self::Sent(kind) => kind.unit(),
            Self::Removed(kind) => {
                let (l, d) = kind.unit();
                (-l, -d)
            }
            Self::Changed { from, to } => {
                let (fl, fd) = from.unit();
                let (tl, td) = to.unit();
                (tl - fl, td - fd)
            }
        }
    }

    /// Row value to persist, `None` when the row must be deleted
    pub fn stored_like(self) -> Option<bool> {
        self.next_state().kind().map(ReactionKind::is_like)
    }

    /// Human-readable confirmation for the API response
    pub fn message(self) -> String {
        match self {
            Self::Sent(kind) => format!("{} sent", capitalize(kind)),
            Self::Removed(kind) => format!("{} removed", capitalize(kind)),
            Self::Changed { from, to } => format!("{} changed to {to}", capitalize(from)),
        }
    }

    /// Short action name for logs: `sent`, `removed` or `changed`
    pub const fn action(self) -> &'static str {
        match self {
            Self::Sent(_) => "sent",
            Self::Removed(_) => "removed",
            Self::Changed { .. } => "changed",
        }
    }
}

fn capitalize(kind: ReactionKind) -> &'static str {
    match kind {
        ReactionKind::Like => "Like",
        ReactionKind::Dislike => "Dislike",
    }
}

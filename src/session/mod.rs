//! Boundary to the external session and high-score services.
//!
//! The engine never awaits these. It emits a [`ScoreSubmission`] when a run
//! ends, the host hands it to a [`ScoreReporter`], and the outcome comes back
//! tagged with the run it belongs to so stale answers can be dropped.

pub mod profile;
pub mod reporter;

pub use profile::{LocalProfile, ProfileRecord};
pub use reporter::{ScoreReporter, ScoreResult};

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// Identifies one game run; bumped on every restart
pub type RunId = u64;

/// Signed-in player as seen by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub highest_score: u32,
}

/// Source of the current session
pub trait SessionProvider: Send + Sync {
    /// `None` when nobody is signed in
    fn current_user(&self) -> Option<UserProfile>;
}

/// Remote high-score store
pub trait ScoreService: Send + Sync {
    /// Resolves to `true` when `score` is a new personal best for the current user
    fn update_score(&self, score: u32) -> BoxFuture<'static, Result<bool, ScoreError>>;
}

/// Failures reported by a [`ScoreService`]
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("not signed in")]
    Unauthorized,

    #[error("profile storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("profile format error: {0}")]
    Format(#[from] serde_json::Error),

    #[error("score task failed: {0}")]
    Task(String),
}

/// Request to record the final score of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSubmission {
    pub run_id: RunId,
    pub score: u32,
}

/// Session provider for anonymous play; never submits scores
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl SessionProvider for Anonymous {
    fn current_user(&self) -> Option<UserProfile> {
        None
    }
}

//! File-backed player profile.
//!
//! Stands in for a remote account: it is both the session (the profile is
//! always signed in) and the score store, keeping the personal best in a small
//! JSON file.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ScoreError, ScoreService, SessionProvider, UserProfile};

/// Persisted profile contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: String,
    pub highest_score: u32,
    #[serde(default)]
    pub games_recorded: u32,
}

struct Inner {
    path: PathBuf,
    record: Mutex<ProfileRecord>,
    /// Held from update to write so files land in update order
    writer: tokio::sync::Mutex<()>,
}

#[derive(Clone)]
pub struct LocalProfile {
    inner: Arc<Inner>,
}

impl LocalProfile {
    /// Open the profile at `path`, creating a fresh one named `id` if the file does not exist
    pub fn open(path: &Path, id: &str) -> Result<Self, ScoreError> {
        let record = match std::fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ProfileRecord {
                id: id.to_string(),
                highest_score: 0,
                games_recorded: 0,
            },
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            inner: Arc::new(Inner {
                path: path.to_path_buf(),
                record: Mutex::new(record),
                writer: tokio::sync::Mutex::new(()),
            }),
        })
    }

    pub fn record(&self) -> ProfileRecord {
        self.inner
            .record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

impl SessionProvider for LocalProfile {
    fn current_user(&self) -> Option<UserProfile> {
        let record = self.record();
        Some(UserProfile {
            id: record.id,
            highest_score: record.highest_score,
        })
    }
}

impl ScoreService for LocalProfile {
    fn update_score(&self, score: u32) -> BoxFuture<'static, Result<bool, ScoreError>> {
        let inner = Arc::clone(&self.inner);

        async move {
            let _writer = inner.writer.lock().await;

            let (is_best, json) = {
                let mut record = inner.record.lock().unwrap_or_else(PoisonError::into_inner);
                let is_best = score > record.highest_score;
                if is_best {
                    record.highest_score = score;
                }
                record.games_recorded += 1;
                (is_best, serde_json::to_string_pretty(&*record)?)
            };

            if let Some(parent) = inner.path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
            tokio::fs::write(&inner.path, json).await?;

            if is_best {
                info!(score, "new personal best recorded");
            }
            Ok(is_best)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_fresh_profile() {
        let dir = TempDir::new().unwrap();
        let profile = LocalProfile::open(&dir.path().join("profile.json"), "alice").unwrap();

        let user = profile.current_user().unwrap();
        assert_eq!(user.id, "alice");
        assert_eq!(user.highest_score, 0);
    }

    #[tokio::test]
    async fn test_only_higher_scores_are_new_bests() {
        let dir = TempDir::new().unwrap();
        let profile = LocalProfile::open(&dir.path().join("profile.json"), "bob").unwrap();

        assert!(profile.update_score(40).await.unwrap());
        assert!(!profile.update_score(30).await.unwrap());
        assert!(!profile.update_score(40).await.unwrap());
        assert!(profile.update_score(50).await.unwrap());

        let record = profile.record();
        assert_eq!(record.highest_score, 50);
        assert_eq!(record.games_recorded, 4);
    }

    #[tokio::test]
    async fn test_best_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("profile.json");

        let profile = LocalProfile::open(&path, "carol").unwrap();
        profile.update_score(70).await.unwrap();

        let reopened = LocalProfile::open(&path, "ignored").unwrap();
        assert_eq!(reopened.record().id, "carol");
        assert_eq!(reopened.current_user().unwrap().highest_score, 70);
    }

    #[tokio::test]
    async fn test_concurrent_updates_keep_best_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.json");
        let profile = LocalProfile::open(&path, "erin").unwrap();

        let (first, second, third) = tokio::join!(
            profile.update_score(90),
            profile.update_score(40),
            profile.update_score(60)
        );
        assert!(first.unwrap());
        assert!(!second.unwrap());
        assert!(!third.unwrap());

        let reopened = LocalProfile::open(&path, "ignored").unwrap();
        assert_eq!(reopened.record(), profile.record());
        assert_eq!(reopened.record().highest_score, 90);
        assert_eq!(reopened.record().games_recorded, 3);
    }

    #[test]
    fn test_corrupt_profile_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, "{ nope").unwrap();

        assert!(matches!(
            LocalProfile::open(&path, "dave"),
            Err(ScoreError::Format(_))
        ));
    }
}

//! Identity loading and the local profile cache.
//!
//! The identity feeds a side display only; it never enters the analytics
//! view model. Each successful fetch mirrors the raw `user` record to disk
//! so the next start can paint something before the network answers.

use std::path::PathBuf;

use folio_core::UserProfile;
use serde_json::Value;

use crate::client::{decode, DashboardClient};
use crate::endpoint::Endpoint;
use crate::error::{CacheError, SourceError, SourceResult};
use crate::types::UserEnvelope;

/// Fixed key the user record is stored under.
pub const PROFILE_CACHE_KEY: &str = "user";

impl DashboardClient {
    /// Fetches the raw `user` record of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the fetch fails or the body has no `user`.
    pub async fn fetch_current_user(&self) -> SourceResult<Value> {
        let endpoint = Endpoint::CurrentUser;
        let body = self.fetch(endpoint).await?;
        let envelope: UserEnvelope = decode(endpoint, body)?;
        envelope.user.ok_or(SourceError::MissingField {
            context: endpoint.name().to_string(),
            field: "user",
        })
    }
}

/// Durable local mirror of the last fetched user record.
///
/// Not a source of truth: a missing or unreadable entry simply means there
/// is nothing to show until the next fetch.
#[derive(Debug, Clone)]
pub struct ProfileCache {
    dir: PathBuf,
}

impl ProfileCache {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{PROFILE_CACHE_KEY}.json"))
    }

    /// Writes the record, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the directory cannot be created or the file
    /// cannot be written.
    pub async fn store(&self, record: &Value) -> Result<(), CacheError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec_pretty(record)?;
        let path = self.path();
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Reads the cached profile, if any.
    pub async fn load(&self) -> Option<UserProfile> {
        let path = self.path();
        let bytes = match tokio::fs::read(&path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "profile cache unreadable");
                return None;
            }
        };
        match serde_json::from_slice::<UserProfile>(&bytes) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "profile cache is corrupt; ignoring");
                None
            }
        }
    }
}

/// Loads the signed-in user's identity and mirrors it into the cache.
pub struct ProfileLoader<'a> {
    client: &'a DashboardClient,
    cache: &'a ProfileCache,
}

impl<'a> ProfileLoader<'a> {
    #[must_use]
    pub fn new(client: &'a DashboardClient, cache: &'a ProfileCache) -> Self {
        Self { client, cache }
    }

    /// Fetches the current user and caches the raw record.
    ///
    /// A cache write failure is logged and does not fail the load.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the fetch fails or the `user` record does
    /// not match the profile shape.
    pub async fn load(&self) -> SourceResult<UserProfile> {
        let record = self.client.fetch_current_user().await?;
        let profile: UserProfile = decode(Endpoint::CurrentUser, record.clone())?;

        if let Err(e) = self.cache.store(&record).await {
            tracing::warn!(
                path = %self.cache.path().display(),
                error = %e,
                "failed to mirror user record to cache"
            );
        }
        Ok(profile)
    }

    /// Returns a fresh profile when the fetch succeeds, otherwise whatever
    /// the cache holds.
    pub async fn load_or_cached(&self) -> Option<UserProfile> {
        match self.load().await {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!(kind = %e.kind(), error = %e, "profile fetch failed; using cache");
                self.cache.load().await
            }
        }
    }
}

//! Project listing and the navigation-driven projects loader.

use chrono::Utc;
use folio_core::{AnalyticsSnapshot, ProjectSummary};
use serde::Serialize;
use tokio::sync::watch;

use crate::client::{decode, DashboardClient};
use crate::endpoint::Endpoint;
use crate::error::{SourceError, SourceResult};
use crate::normalize::{normalize_project, select_published};
use crate::types::{ProjectsEnvelope, RawProject};

/// Published projects derived from one projects fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectsDigest {
    /// First published projects in source order, at most five.
    pub recent: Vec<ProjectSummary>,
    /// Size of the whole published subset.
    pub published_count: u64,
}

impl ProjectsDigest {
    /// Overwrites the fields this loader owns; every other field is untouched.
    pub fn apply_to(&self, snapshot: &mut AnalyticsSnapshot) {
        snapshot.set_projects(self.recent.clone(), self.published_count);
    }
}

impl DashboardClient {
    /// Fetches the raw project list.
    ///
    /// Entries that fail to deserialize are skipped with a warning rather
    /// than failing the whole list.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the fetch fails or the body has no
    /// `data.projects` array.
    pub async fn fetch_projects(&self) -> SourceResult<Vec<RawProject>> {
        let endpoint = Endpoint::Projects;
        let body = self.fetch(endpoint).await?;
        let envelope: ProjectsEnvelope = decode(endpoint, body)?;
        let entries = envelope
            .data
            .and_then(|d| d.projects)
            .ok_or(SourceError::MissingField {
                context: endpoint.name().to_string(),
                field: "data.projects",
            })?;

        let total = entries.len();
        let projects: Vec<RawProject> = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<RawProject>(entry) {
                Ok(project) => Some(project),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed project record");
                    None
                }
            })
            .collect();

        if projects.len() != total {
            tracing::debug!(
                total,
                kept = projects.len(),
                "some project records were skipped"
            );
        }
        Ok(projects)
    }
}

/// Loads the published-projects digest, independently of the polling cycle.
pub struct ProjectsLoader<'a> {
    client: &'a DashboardClient,
}

impl<'a> ProjectsLoader<'a> {
    #[must_use]
    pub fn new(client: &'a DashboardClient) -> Self {
        Self { client }
    }

    /// Fetches, normalizes, and filters the project list once.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the projects fetch fails.
    pub async fn load(&self) -> SourceResult<ProjectsDigest> {
        let fetched_at = Utc::now();
        let raw = self.client.fetch_projects().await?;
        let summaries = raw
            .into_iter()
            .map(|p| normalize_project(p, fetched_at))
            .collect();
        let digest = select_published(summaries);
        tracing::debug!(
            published = digest.published_count,
            shown = digest.recent.len(),
            "projects loaded"
        );
        Ok(digest)
    }

    /// Loads once for the current location, then again whenever the location
    /// changes, handing each digest to `on_digest`.
    ///
    /// Repeated notifications for the same location do not refetch. A failed
    /// load is logged and skipped so the previous digest stays in place.
    /// Returns when the location sender is dropped.
    pub async fn follow_navigation<F>(&self, mut locations: watch::Receiver<String>, mut on_digest: F)
    where
        F: FnMut(ProjectsDigest),
    {
        let mut current = locations.borrow_and_update().clone();
        self.load_for(&current, &mut on_digest).await;

        while locations.changed().await.is_ok() {
            let next = locations.borrow_and_update().clone();
            if next == current {
                continue;
            }
            current = next;
            self.load_for(&current, &mut on_digest).await;
        }
        tracing::debug!("navigation channel closed; projects loader stopping");
    }

    async fn load_for<F>(&self, location: &str, on_digest: &mut F)
    where
        F: FnMut(ProjectsDigest),
    {
        match self.load().await {
            Ok(digest) => on_digest(digest),
            Err(e) => {
                tracing::warn!(location, error = %e, "projects load failed; keeping previous list");
            }
        }
    }
}

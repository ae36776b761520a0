//! View-model types rendered by the dashboard.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of published projects kept in
/// [`AnalyticsSnapshot::recent_projects`].
pub const RECENT_PROJECTS_LIMIT: usize = 5;

/// Aggregate analytics view model.
///
/// Built once from [`Default`] and then mutated in place by merge rounds and
/// project loads. All numeric fields stay non-negative and finite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub total_reach: f64,
    pub engagement: f64,
    pub total_views: f64,
    pub recent_projects: Vec<ProjectSummary>,
    pub published_projects: u64,
    pub social_media_posts: f64,
    pub social_media_reach: f64,
}

impl AnalyticsSnapshot {
    /// Overwrites the two project-owned fields.
    ///
    /// `recent` is truncated to [`RECENT_PROJECTS_LIMIT`] entries in case a
    /// caller hands over more than the display holds.
    pub fn set_projects(&mut self, mut recent: Vec<ProjectSummary>, published_count: u64) {
        recent.truncate(RECENT_PROJECTS_LIMIT);
        self.recent_projects = recent;
        self.published_projects = published_count;
    }
}

/// Canonical shape of a project record after alias normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Lowercased; `None` when the source record carried no status.
    pub status: Option<String>,
    /// Lowercased; `None` when the source record carried no visibility.
    pub visibility: Option<String>,
    pub technologies: BTreeSet<String>,
    pub github_url: String,
    pub live_url: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectSummary {
    /// A project is shown on the dashboard when it is published, has no
    /// status at all, or is publicly visible.
    #[must_use]
    pub fn is_published(&self) -> bool {
        match self.status.as_deref() {
            None | Some("published") => true,
            Some(_) => self.visibility.as_deref() == Some("public"),
        }
    }
}

/// One post from the published-posts feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedPost {
    #[serde(alias = "_id")]
    pub id: String,
    pub project_name: String,
    #[serde(default)]
    pub project_image: Option<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub results: Vec<PostResult>,
}

/// Per-platform outcome of a published post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResult {
    pub platform: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Identity of the signed-in user, shown beside the analytics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub tech_stack: Option<Vec<String>>,
    #[serde(default)]
    pub platform_preferences: Option<Vec<String>>,
}

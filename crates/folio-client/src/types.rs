//! Wire types for the dashboard backend.
//!
//! Numeric fields are all optional: a missing or `null` value means "no new
//! information" and the merger keeps the previous value.

use folio_core::PublishedPost;
use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// /api/dashboard/portfolio-metrics
// ---------------------------------------------------------------------------

/// `{ "data": { ... } }` envelope of the portfolio-metrics endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct MetricsEnvelope {
    #[serde(default)]
    pub data: Option<PortfolioMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMetrics {
    #[serde(default)]
    pub total_reach: Option<f64>,
    #[serde(default)]
    pub engagement_rate: Option<f64>,
    #[serde(default)]
    pub profile_views: Option<f64>,
    /// Present only when the backend has social-media figures to report.
    #[serde(default)]
    pub social_media: Option<SocialMediaMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaMetrics {
    #[serde(default)]
    pub total_reach: Option<f64>,
    #[serde(default)]
    pub total_posts: Option<f64>,
}

// ---------------------------------------------------------------------------
// /api/analytics/social-media-overview
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct OverviewEnvelope {
    #[serde(default)]
    pub overview: Option<SocialOverview>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialOverview {
    #[serde(default)]
    pub total_reach: Option<f64>,
    #[serde(default)]
    pub total_posts: Option<f64>,
}

// ---------------------------------------------------------------------------
// /api/analytics/published-posts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct PostsEnvelope {
    #[serde(default)]
    pub posts: Option<Vec<PublishedPost>>,
}

// ---------------------------------------------------------------------------
// /api/projects
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectsEnvelope {
    #[serde(default)]
    pub data: Option<ProjectsData>,
}

/// Project entries are kept as raw JSON so one malformed record does not
/// fail the whole list.
#[derive(Debug, Deserialize)]
pub(crate) struct ProjectsData {
    #[serde(default)]
    pub projects: Option<Vec<Value>>,
}

/// A project record as the backend sends it.
///
/// Records come from more than one storage shape, so identifiers and names
/// appear under different keys; [`crate::normalize_project`] resolves them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProject {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, rename = "_id")]
    pub underscore_id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub technologies: Option<Vec<String>>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// ---------------------------------------------------------------------------
// /api/auth/me
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    #[serde(default)]
    pub user: Option<Value>,
}

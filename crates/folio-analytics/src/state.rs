use folio_core::{AnalyticsSnapshot, PublishedPost};
use serde::Serialize;

/// Everything the polling loop owns: the aggregate snapshot plus the
/// published-posts list, which is replaced rather than merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub analytics: AnalyticsSnapshot,
    pub published_posts: Vec<PublishedPost>,
}

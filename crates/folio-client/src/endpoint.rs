//! Named backend endpoints consumed by the dashboard.

/// Which base a path is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The configurable API base (`FOLIO_API_BASE_URL`).
    ApiBase,
    /// The dashboard's own origin; analytics paths are fixed relative paths.
    App,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    CurrentUser,
    Projects,
    PortfolioMetrics,
    SocialMediaOverview,
    PublishedPosts { limit: u32 },
}

impl Endpoint {
    /// Short stable name used in logs and error contexts.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::CurrentUser => "auth_me",
            Endpoint::Projects => "projects",
            Endpoint::PortfolioMetrics => "portfolio_metrics",
            Endpoint::SocialMediaOverview => "social_media_overview",
            Endpoint::PublishedPosts { .. } => "published_posts",
        }
    }

    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::CurrentUser => "/api/auth/me",
            Endpoint::Projects => "/api/projects",
            Endpoint::PortfolioMetrics => "/api/dashboard/portfolio-metrics",
            Endpoint::SocialMediaOverview => "/api/analytics/social-media-overview",
            Endpoint::PublishedPosts { .. } => "/api/analytics/published-posts",
        }
    }

    #[must_use]
    pub fn origin(&self) -> Origin {
        match self {
            Endpoint::CurrentUser | Endpoint::Projects => Origin::ApiBase,
            Endpoint::PortfolioMetrics
            | Endpoint::SocialMediaOverview
            | Endpoint::PublishedPosts { .. } => Origin::App,
        }
    }

    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::PublishedPosts { limit } => vec![("limit", limit.to_string())],
            _ => Vec::new(),
        }
    }

    /// Whether the envelope must carry a true-ish `success` flag.
    ///
    /// The portfolio-metrics envelope has no `success` field; it only fails
    /// the check when the flag is present and false-ish.
    #[must_use]
    pub fn requires_success_flag(&self) -> bool {
        !matches!(self, Endpoint::PortfolioMetrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_and_projects_use_api_base() {
        assert_eq!(Endpoint::CurrentUser.origin(), Origin::ApiBase);
        assert_eq!(Endpoint::Projects.origin(), Origin::ApiBase);
    }

    #[test]
    fn analytics_endpoints_use_app_origin() {
        assert_eq!(Endpoint::PortfolioMetrics.origin(), Origin::App);
        assert_eq!(Endpoint::SocialMediaOverview.origin(), Origin::App);
        assert_eq!(Endpoint::PublishedPosts { limit: 10 }.origin(), Origin::App);
    }

    #[test]
    fn published_posts_carries_limit_query() {
        let endpoint = Endpoint::PublishedPosts { limit: 10 };
        assert_eq!(endpoint.query(), vec![("limit", "10".to_string())]);
        assert!(Endpoint::Projects.query().is_empty());
    }

    #[test]
    fn only_metrics_tolerates_missing_success_flag() {
        assert!(!Endpoint::PortfolioMetrics.requires_success_flag());
        assert!(Endpoint::SocialMediaOverview.requires_success_flag());
        assert!(Endpoint::CurrentUser.requires_success_flag());
    }
}

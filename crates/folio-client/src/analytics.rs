//! Typed fetches for the three polled analytics sources.

use folio_core::PublishedPost;

use crate::client::{decode, DashboardClient};
use crate::endpoint::Endpoint;
use crate::error::{SourceError, SourceResult};
use crate::types::{MetricsEnvelope, OverviewEnvelope, PortfolioMetrics, PostsEnvelope, SocialOverview};

impl DashboardClient {
    /// Fetches aggregate portfolio metrics.
    ///
    /// A body without `data` yields empty metrics, which leave every field
    /// unchanged when merged.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on any fetch or shape failure.
    pub async fn fetch_portfolio_metrics(&self) -> SourceResult<PortfolioMetrics> {
        let endpoint = Endpoint::PortfolioMetrics;
        let body = self.fetch(endpoint).await?;
        let envelope: MetricsEnvelope = decode(endpoint, body)?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Fetches the social-media overview.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on any fetch or shape failure, including a
    /// missing or false `success` flag.
    pub async fn fetch_social_overview(&self) -> SourceResult<SocialOverview> {
        let endpoint = Endpoint::SocialMediaOverview;
        let body = self.fetch(endpoint).await?;
        let envelope: OverviewEnvelope = decode(endpoint, body)?;
        Ok(envelope.overview.unwrap_or_default())
    }

    /// Fetches the most recent published posts, up to the configured limit.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on any fetch or shape failure, or if the body
    /// carries no `posts` array.
    pub async fn fetch_published_posts(&self) -> SourceResult<Vec<PublishedPost>> {
        let endpoint = Endpoint::PublishedPosts {
            limit: self.published_posts_limit(),
        };
        let body = self.fetch(endpoint).await?;
        let envelope: PostsEnvelope = decode(endpoint, body)?;
        envelope.posts.ok_or(SourceError::MissingField {
            context: endpoint.name().to_string(),
            field: "posts",
        })
    }
}

//! Settle-all fan-out over the polled analytics sources.

use std::future::Future;

use folio_client::{DashboardClient, PortfolioMetrics, SocialOverview, SourceResult};
use folio_core::PublishedPost;

/// The sources polled every round, in merge precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyticsSource {
    PortfolioMetrics,
    SocialOverview,
    PublishedPosts,
}

impl AnalyticsSource {
    /// All polled sources in the order their merge rules apply.
    pub const ALL: [AnalyticsSource; 3] = [
        AnalyticsSource::PortfolioMetrics,
        AnalyticsSource::SocialOverview,
        AnalyticsSource::PublishedPosts,
    ];

    /// Lower values merge first; later sources win overwrite conflicts.
    #[must_use]
    pub fn precedence(self) -> u8 {
        match self {
            AnalyticsSource::PortfolioMetrics => 0,
            AnalyticsSource::SocialOverview => 1,
            AnalyticsSource::PublishedPosts => 2,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AnalyticsSource::PortfolioMetrics => "portfolio_metrics",
            AnalyticsSource::SocialOverview => "social_media_overview",
            AnalyticsSource::PublishedPosts => "published_posts",
        }
    }
}

/// Parsed payload of one polled source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourcePayload {
    Metrics(PortfolioMetrics),
    SocialOverview(SocialOverview),
    PublishedPosts(Vec<PublishedPost>),
}

/// One source's outcome from a fan-out round.
#[derive(Debug)]
pub struct SettledSource {
    pub source: AnalyticsSource,
    pub result: SourceResult<SourcePayload>,
}

/// Something that can fetch the polled sources.
///
/// [`DashboardClient`] is the production implementation; tests substitute
/// scripted feeds with controlled latency and failures.
pub trait AnalyticsFeed: Send + Sync + 'static {
    fn fetch_source(
        &self,
        source: AnalyticsSource,
    ) -> impl Future<Output = SourceResult<SourcePayload>> + Send;
}

impl AnalyticsFeed for DashboardClient {
    async fn fetch_source(&self, source: AnalyticsSource) -> SourceResult<SourcePayload> {
        match source {
            AnalyticsSource::PortfolioMetrics => self
                .fetch_portfolio_metrics()
                .await
                .map(SourcePayload::Metrics),
            AnalyticsSource::SocialOverview => self
                .fetch_social_overview()
                .await
                .map(SourcePayload::SocialOverview),
            AnalyticsSource::PublishedPosts => self
                .fetch_published_posts()
                .await
                .map(SourcePayload::PublishedPosts),
        }
    }
}

/// Drives every future concurrently and waits for all of them, whatever
/// each one resolves to. Outputs keep the input order.
pub async fn settle_all<I>(futures: I) -> Vec<<I::Item as Future>::Output>
where
    I: IntoIterator,
    I::Item: Future,
{
    futures::future::join_all(futures).await
}

/// Fetches the given sources concurrently and returns one [`SettledSource`]
/// per input, in input order. A failed source never cancels the others.
pub async fn fetch_round<F: AnalyticsFeed>(
    feed: &F,
    sources: &[AnalyticsSource],
) -> Vec<SettledSource> {
    settle_all(sources.iter().copied().map(|source| async move {
        SettledSource {
            source,
            result: feed.fetch_source(source).await,
        }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::{sleep, Instant};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn settle_all_costs_the_slowest_latency_not_the_sum() {
        let start = Instant::now();
        let latencies = [100_u64, 400, 50];

        let outputs = settle_all(latencies.iter().map(|&ms| async move {
            sleep(Duration::from_millis(ms)).await;
            ms
        }))
        .await;

        assert_eq!(start.elapsed(), Duration::from_millis(400));
        assert_eq!(outputs, vec![100, 400, 50]);
    }

    #[tokio::test(start_paused = true)]
    async fn settle_all_waits_for_every_future_after_an_early_failure() {
        let outputs = settle_all((0..3_u64).map(|i| async move {
            if i == 0 {
                return Err(i);
            }
            sleep(Duration::from_millis(i * 100)).await;
            Ok(i)
        }))
        .await;

        assert_eq!(outputs, vec![Err(0), Ok(1), Ok(2)]);
    }

    struct EmptyFeed;

    impl AnalyticsFeed for EmptyFeed {
        async fn fetch_source(&self, _source: AnalyticsSource) -> SourceResult<SourcePayload> {
            Ok(SourcePayload::PublishedPosts(Vec::new()))
        }
    }

    #[tokio::test]
    async fn fetch_round_can_run_on_a_spawned_task() {
        let feed = std::sync::Arc::new(EmptyFeed);
        let sources: std::sync::Arc<[AnalyticsSource]> = std::sync::Arc::from(AnalyticsSource::ALL);

        let round = tokio::spawn(async move { fetch_round(feed.as_ref(), &sources).await })
            .await
            .expect("round task should not panic");

        let order: Vec<AnalyticsSource> = round.iter().map(|s| s.source).collect();
        assert_eq!(order, AnalyticsSource::ALL.to_vec());
        assert!(round.iter().all(|s| s.result.is_ok()));
    }

    #[test]
    fn precedence_follows_declared_order() {
        let order: Vec<u8> = AnalyticsSource::ALL.iter().map(|s| s.precedence()).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }
}

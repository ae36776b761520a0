//! Scripted analytics feed shared by the scheduler tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use folio_analytics::{AnalyticsFeed, AnalyticsSource, SourcePayload};
use folio_client::{SocialOverview, SourceError, SourceResult};

type Responder = Box<dyn Fn() -> SourceResult<SourcePayload> + Send + Sync>;

struct Script {
    latency: Duration,
    respond: Responder,
}

/// Feed whose per-source latency and response are fixed up front.
///
/// Sources without a script fail immediately with a 503.
pub struct ScriptedFeed {
    scripts: HashMap<AnalyticsSource, Script>,
    calls: [AtomicUsize; 3],
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            calls: Default::default(),
        }
    }

    pub fn respond<R>(mut self, source: AnalyticsSource, latency: Duration, respond: R) -> Self
    where
        R: Fn() -> SourceResult<SourcePayload> + Send + Sync + 'static,
    {
        self.scripts.insert(
            source,
            Script {
                latency,
                respond: Box::new(respond),
            },
        );
        self
    }

    /// Number of fetches started for `source`.
    pub fn calls(&self, source: AnalyticsSource) -> usize {
        self.calls[slot(source)].load(Ordering::SeqCst)
    }
}

impl AnalyticsFeed for ScriptedFeed {
    async fn fetch_source(&self, source: AnalyticsSource) -> SourceResult<SourcePayload> {
        self.calls[slot(source)].fetch_add(1, Ordering::SeqCst);
        match self.scripts.get(&source) {
            Some(script) => {
                tokio::time::sleep(script.latency).await;
                (script.respond)()
            }
            None => Err(unavailable(source)),
        }
    }
}

fn slot(source: AnalyticsSource) -> usize {
    usize::from(source.precedence())
}

pub fn unavailable(source: AnalyticsSource) -> SourceError {
    SourceError::HttpStatus {
        status: 503,
        url: format!("http://app.local/{}", source.name()),
    }
}

pub fn overview(reach: f64, posts: f64) -> SourcePayload {
    SourcePayload::SocialOverview(SocialOverview {
        total_reach: Some(reach),
        total_posts: Some(posts),
    })
}

//! Folding one round of settled sources into the dashboard state.
//!
//! Rules, applied in [`AnalyticsSource::precedence`] order:
//!
//! - portfolio metrics overwrite `total_reach`, `engagement`, and
//!   `total_views`, plus `social_media_reach` / `social_media_posts` when the
//!   nested `socialMedia` object is present;
//! - the social overview **adds** its reach to `total_reach` (the two sources
//!   report different reach components) and overwrites `social_media_posts`;
//! - published posts replace the post list wholesale.
//!
//! Failed sources leave their fields untouched. A missing, negative, or
//! non-finite number is treated as "no new value".

use folio_client::{PortfolioMetrics, SocialOverview};
use folio_core::{AnalyticsSnapshot, PublishedPost};

use crate::fanout::{SettledSource, SourcePayload};
use crate::state::DashboardState;

/// Applies every successful result of one round and returns the new state.
#[must_use]
pub fn merge_round(mut state: DashboardState, round: &[SettledSource]) -> DashboardState {
    let mut ordered: Vec<&SettledSource> = round.iter().collect();
    ordered.sort_by_key(|settled| settled.source.precedence());

    for settled in ordered {
        match &settled.result {
            Ok(payload) => apply_payload(&mut state, payload),
            Err(e) => {
                tracing::warn!(
                    source = settled.source.name(),
                    kind = %e.kind(),
                    error = %e,
                    "source failed; keeping previous values"
                );
            }
        }
    }
    state
}

fn apply_payload(state: &mut DashboardState, payload: &SourcePayload) {
    match payload {
        SourcePayload::Metrics(metrics) => apply_metrics(&mut state.analytics, metrics),
        SourcePayload::SocialOverview(overview) => {
            apply_social_overview(&mut state.analytics, overview);
        }
        SourcePayload::PublishedPosts(posts) => replace_posts(&mut state.published_posts, posts),
    }
}

fn apply_metrics(snapshot: &mut AnalyticsSnapshot, metrics: &PortfolioMetrics) {
    overwrite(&mut snapshot.total_reach, metrics.total_reach);
    overwrite(&mut snapshot.engagement, metrics.engagement_rate);
    overwrite(&mut snapshot.total_views, metrics.profile_views);
    if let Some(social) = &metrics.social_media {
        overwrite(&mut snapshot.social_media_reach, social.total_reach);
        overwrite(&mut snapshot.social_media_posts, social.total_posts);
    }
}

fn apply_social_overview(snapshot: &mut AnalyticsSnapshot, overview: &SocialOverview) {
    if let Some(reach) = usable(overview.total_reach) {
        let combined = snapshot.total_reach + reach;
        if combined.is_finite() {
            snapshot.total_reach = combined;
        }
    }
    overwrite(&mut snapshot.social_media_posts, overview.total_posts);
}

fn replace_posts(current: &mut Vec<PublishedPost>, incoming: &[PublishedPost]) {
    current.clear();
    current.extend_from_slice(incoming);
}

fn overwrite(field: &mut f64, incoming: Option<f64>) {
    if let Some(value) = usable(incoming) {
        *field = value;
    }
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
#[path = "merge_test.rs"]
mod tests;

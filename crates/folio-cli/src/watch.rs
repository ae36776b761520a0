//! `folio watch`: the live dashboard loop.
//!
//! The scheduler starts first and polls analytics on its own timer. Identity
//! and projects load alongside it: identity once, projects up front and again
//! whenever a new location arrives on stdin. Projects feed the scheduler's
//! driver task, and this loop only renders what it publishes.

use std::future::Future;
use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use folio_analytics::{DashboardState, PollingScheduler};
use folio_client::{DashboardClient, ProfileCache, ProfileLoader, ProjectsLoader};
use folio_core::{identity_badge, AppConfig};
use tokio::sync::watch;

use crate::render;

const INITIAL_LOCATION: &str = "/dashboard";

pub(crate) async fn run_watch(config: &AppConfig, interval: Option<u64>) -> anyhow::Result<()> {
    let client = Arc::new(DashboardClient::new(config)?);
    let cache = ProfileCache::new(config.cache_dir.clone());
    let period = interval.map_or_else(|| config.poll_interval(), Duration::from_secs);

    let (location_tx, location_rx) = watch::channel(INITIAL_LOCATION.to_string());
    spawn_navigation_reader(location_tx);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c; stopping");
        }
    };

    let final_state = run_dashboard(client, &cache, period, location_rx, shutdown).await;
    println!("Final state:");
    render::print_dashboard(&final_state);
    Ok(())
}

/// Polls until `shutdown` resolves or the scheduler goes away, printing the
/// dashboard after every update, and returns the final state.
///
/// Polling never waits on the identity fetch.
pub(crate) async fn run_dashboard<S>(
    client: Arc<DashboardClient>,
    cache: &ProfileCache,
    period: Duration,
    locations: watch::Receiver<String>,
    shutdown: S,
) -> DashboardState
where
    S: Future<Output = ()>,
{
    tracing::info!(period_secs = period.as_secs(), "starting analytics polling");
    let handle = PollingScheduler::new(Arc::clone(&client))
        .with_period(period)
        .start(DashboardState::default());
    let mut states = handle.subscribe();

    {
        let identity = show_identity(&client, cache);
        tokio::pin!(identity);
        let projects = ProjectsLoader::new(&client);
        let follow = projects.follow_navigation(locations, |digest| handle.apply_projects(digest));
        tokio::pin!(follow);
        tokio::pin!(shutdown);
        let mut identity_pending = true;
        let mut following = true;

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                changed = states.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = states.borrow_and_update().clone();
                    render::print_dashboard(&state);
                }
                () = &mut identity, if identity_pending => {
                    identity_pending = false;
                }
                () = &mut follow, if following => {
                    following = false;
                }
            }
        }
    }

    tracing::info!("stopping analytics polling");
    handle.stop().await
}

/// Paints the cached identity first, then the fresh one if it differs.
async fn show_identity(client: &DashboardClient, cache: &ProfileCache) {
    let cached = cache.load().await;
    if let Some(profile) = &cached {
        render::print_identity(&identity_badge(profile));
    }

    match ProfileLoader::new(client, cache).load().await {
        Ok(profile) if cached.as_ref() != Some(&profile) => {
            render::print_identity(&identity_badge(&profile));
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(kind = %e.kind(), error = %e, "profile fetch failed; keeping cached identity");
        }
    }
}

/// Publishes each non-empty stdin line as the current location from a
/// detached thread, so a pending read never holds up runtime shutdown. End of
/// input drops the sender, which ends the projects follower.
fn spawn_navigation_reader(locations: watch::Sender<String>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    let location = line.trim();
                    if !location.is_empty() {
                        tracing::debug!(location, "navigation");
                        locations.send_replace(location.to_string());
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read stdin; navigation disabled");
                    break;
                }
            }
        }
    });
}

#[cfg(test)]
#[path = "watch_test.rs"]
mod tests;

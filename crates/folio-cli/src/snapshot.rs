//! `folio snapshot`: one merge round plus one projects load, printed as JSON.

use folio_analytics::{fetch_round, merge_round, AnalyticsSource, DashboardState};
use folio_client::{DashboardClient, ProjectsLoader};
use folio_core::AppConfig;

pub(crate) async fn run_snapshot(config: &AppConfig, pretty: bool) -> anyhow::Result<()> {
    let client = DashboardClient::new(config)?;
    let projects = ProjectsLoader::new(&client);

    let (round, digest) = tokio::join!(
        fetch_round(&client, &AnalyticsSource::ALL),
        projects.load()
    );

    let mut state = merge_round(DashboardState::default(), &round);
    match digest {
        Ok(digest) => digest.apply_to(&mut state.analytics),
        Err(e) => tracing::warn!(kind = %e.kind(), error = %e, "projects load failed"),
    }

    let json = if pretty {
        serde_json::to_string_pretty(&state)?
    } else {
        serde_json::to_string(&state)?
    };
    println!("{json}");
    Ok(())
}

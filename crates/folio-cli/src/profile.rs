//! `folio profile`: the identity badge, fresh or from the local cache.

use anyhow::bail;
use folio_client::{DashboardClient, ProfileCache, ProfileLoader};
use folio_core::{identity_badge, AppConfig};

use crate::render;

pub(crate) async fn run_profile(config: &AppConfig, cached: bool) -> anyhow::Result<()> {
    let cache = ProfileCache::new(config.cache_dir.clone());

    let profile = if cached {
        cache.load().await
    } else {
        let client = DashboardClient::new(config)?;
        ProfileLoader::new(&client, &cache).load_or_cached().await
    };

    let Some(profile) = profile else {
        bail!(
            "no profile available: nothing fetched and no cached record at {}",
            cache.path().display()
        );
    };
    render::print_identity(&identity_badge(&profile));
    Ok(())
}

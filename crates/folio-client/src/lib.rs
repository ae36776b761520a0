//! HTTP client for the dashboard's backend sources.
//!
//! Every source is fetched through [`DashboardClient::fetch`], which converts
//! transport errors, non-2xx statuses, malformed bodies, and `success: false`
//! envelopes into a [`SourceError`] so nothing escapes the fetch boundary.
//! Project records are normalized here; identity is loaded and cached
//! separately from the analytics sources.

pub mod analytics;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod normalize;
pub mod profile;
pub mod projects;
pub mod types;

pub use client::DashboardClient;
pub use endpoint::Endpoint;
pub use error::{CacheError, ClientError, FailureKind, SourceError, SourceResult};
pub use normalize::{normalize_project, select_published};
pub use profile::{ProfileCache, ProfileLoader, PROFILE_CACHE_KEY};
pub use projects::{ProjectsDigest, ProjectsLoader};
pub use types::{PortfolioMetrics, RawProject, SocialMediaMetrics, SocialOverview};

//! Core types and configuration for the folio dashboard.
//!
//! Holds the aggregate view model shared by the client and analytics crates,
//! the environment-driven [`AppConfig`], and the display derivations the
//! dashboard renders from the view model.

pub mod app_config;
pub mod config;
pub mod display;
pub mod snapshot;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use display::{identity_badge, stat_cards, IdentityBadge, StatCard};
pub use snapshot::{
    AnalyticsSnapshot, PostResult, ProjectSummary, PublishedPost, UserProfile,
    RECENT_PROJECTS_LIMIT,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

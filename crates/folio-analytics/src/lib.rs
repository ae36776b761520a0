//! Analytics aggregation for the folio dashboard.
//!
//! One merge round fans out to the polled sources, waits for every request
//! to settle, and folds the successful results into the owned
//! [`DashboardState`] in fixed source order. The [`PollingScheduler`] repeats
//! rounds on a fixed period and is the only code that mutates the state.

pub mod fanout;
pub mod merge;
pub mod scheduler;
pub mod state;

pub use fanout::{fetch_round, settle_all, AnalyticsFeed, AnalyticsSource, SettledSource, SourcePayload};
pub use merge::merge_round;
pub use scheduler::{PollingScheduler, SchedulerHandle, SchedulerStatus, DEFAULT_POLL_INTERVAL};
pub use state::DashboardState;

//! Fixed-period polling of the analytics sources.
//!
//! [`PollingScheduler::start`] moves the [`DashboardState`] into a driver task,
//! which becomes its only mutator. Each tick spawns one fan-out round; rounds
//! report back over a channel and are merged one at a time, in completion
//! order. Rounds are not serialized against each other, so a period shorter
//! than network latency yields overlapping rounds, each merged on its own.
//!
//! Stopping cancels future ticks. Rounds already in flight run to completion,
//! but their results land in a closed channel and are dropped.

use std::sync::Arc;
use std::time::Duration;

use folio_client::ProjectsDigest;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::fanout::{fetch_round, AnalyticsFeed, AnalyticsSource, SettledSource};
use crate::merge::merge_round;
use crate::state::DashboardState;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Position in the `Idle → Running(n) → … → Stopped` lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerStatus {
    Idle,
    /// `cycle` is the most recently started round, counting from 0.
    Running { cycle: u64 },
    Stopped,
}

enum Command {
    ApplyProjects(ProjectsDigest),
    Stop,
}

/// Configured but not yet running poller.
pub struct PollingScheduler<F> {
    feed: Arc<F>,
    period: Duration,
    sources: Vec<AnalyticsSource>,
}

impl<F: AnalyticsFeed> PollingScheduler<F> {
    #[must_use]
    pub fn new(feed: Arc<F>) -> Self {
        Self {
            feed,
            period: DEFAULT_POLL_INTERVAL,
            sources: AnalyticsSource::ALL.to_vec(),
        }
    }

    /// Sets the polling period. A zero period is bumped to one millisecond,
    /// since `tokio::time::interval` rejects zero.
    #[must_use]
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period.max(Duration::from_millis(1));
        self
    }

    /// Starts polling, running cycle 0 immediately.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn start(self, initial: DashboardState) -> SchedulerHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(initial.clone());
        let (status_tx, status_rx) = watch::channel(SchedulerStatus::Idle);

        let driver = Driver {
            feed: self.feed,
            period: self.period,
            sources: Arc::from(self.sources),
            state_tx,
            status_tx,
        };
        let task = tokio::spawn(driver.run(initial, command_rx));

        SchedulerHandle {
            commands: command_tx,
            state_rx,
            status_rx,
            task,
        }
    }
}

/// Handle to a running scheduler.
///
/// Dropping the handle stops the scheduler as well; [`SchedulerHandle::stop`]
/// additionally hands back the final state.
pub struct SchedulerHandle {
    commands: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<DashboardState>,
    status_rx: watch::Receiver<SchedulerStatus>,
    task: JoinHandle<DashboardState>,
}

impl SchedulerHandle {
    /// Receiver that sees a new value after every merge.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state_rx.clone()
    }

    #[must_use]
    pub fn status(&self) -> SchedulerStatus {
        *self.status_rx.borrow()
    }

    #[must_use]
    pub fn status_receiver(&self) -> watch::Receiver<SchedulerStatus> {
        self.status_rx.clone()
    }

    /// Hands a projects digest to the driver, which overwrites the two
    /// project-owned snapshot fields. Ignored once the scheduler has stopped.
    pub fn apply_projects(&self, digest: ProjectsDigest) {
        if self.commands.send(Command::ApplyProjects(digest)).is_err() {
            tracing::debug!("scheduler stopped; dropping projects digest");
        }
    }

    /// Stops polling and returns the final state.
    ///
    /// In-flight rounds are not awaited; whatever they return is discarded.
    pub async fn stop(self) -> DashboardState {
        let _ = self.commands.send(Command::Stop);
        match self.task.await {
            Ok(state) => state,
            Err(e) => {
                tracing::error!(error = %e, "scheduler driver task failed");
                self.state_rx.borrow().clone()
            }
        }
    }
}

struct Driver<F> {
    feed: Arc<F>,
    period: Duration,
    sources: Arc<[AnalyticsSource]>,
    state_tx: watch::Sender<DashboardState>,
    status_tx: watch::Sender<SchedulerStatus>,
}

impl<F: AnalyticsFeed> Driver<F> {
    async fn run(
        self,
        mut state: DashboardState,
        mut commands: mpsc::UnboundedReceiver<Command>,
    ) -> DashboardState {
        let (round_tx, mut round_rx) = mpsc::unbounded_channel::<(u64, Vec<SettledSource>)>();
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut next_cycle: u64 = 0;

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(Command::ApplyProjects(digest)) => {
                        digest.apply_to(&mut state.analytics);
                        self.state_tx.send_replace(state.clone());
                    }
                    Some(Command::Stop) | None => break,
                },

                Some((cycle, round)) = round_rx.recv() => {
                    let failed = round.iter().filter(|s| s.result.is_err()).count();
                    state = merge_round(state, &round);
                    self.state_tx.send_replace(state.clone());
                    tracing::debug!(cycle, sources = round.len(), failed, "merge round applied");
                }

                _ = ticker.tick() => {
                    let cycle = next_cycle;
                    next_cycle += 1;
                    self.status_tx.send_replace(SchedulerStatus::Running { cycle });
                    self.spawn_round(cycle, round_tx.clone());
                }
            }
        }

        self.status_tx.send_replace(SchedulerStatus::Stopped);
        tracing::debug!(cycles = next_cycle, "polling scheduler stopped");
        state
    }

    fn spawn_round(&self, cycle: u64, results: mpsc::UnboundedSender<(u64, Vec<SettledSource>)>) {
        let feed = Arc::clone(&self.feed);
        let sources = Arc::clone(&self.sources);
        tokio::spawn(async move {
            let round = fetch_round(feed.as_ref(), &sources).await;
            if results.send((cycle, round)).is_err() {
                tracing::debug!(cycle, "scheduler stopped; discarding round result");
            }
        });
    }
}

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::warn;

use crate::gateway::HttpGateway;
use crate::store::SnapshotStore;

/// Matches the cadence the service is tuned for.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(120);

/// Where the next tick's round trip goes.
///
/// `advance` both evolves and fetches in one round trip, so it is the steady
/// state. When it fails the loop degrades to the cheaper read-only fetch for
/// one tick: the view freezes briefly, re-syncs, and advancing resumes. The
/// loop never stops itself on transient failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    Recovering,
}

/// Timer-driven controller that keeps [`SnapshotStore`] in sync with the
/// remote simulation.
pub struct SyncLoop {
    gateway: HttpGateway,
    store: SnapshotStore,
    period: Duration,
}

impl SyncLoop {
    pub fn new(gateway: HttpGateway, store: SnapshotStore) -> Self {
        Self {
            gateway,
            store,
            period: DEFAULT_PERIOD,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Start ticking on the current runtime. One initial read-only fetch runs
    /// before the first tick so the view has content immediately instead of
    /// waiting one full period.
    pub fn spawn(self) -> SyncHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(stop_rx));
        SyncHandle {
            stop: stop_tx,
            task,
        }
    }

    async fn run(self, mut stop: watch::Receiver<bool>) {
        tokio::select! {
            _ = stop.changed() => return,
            fetched = self.gateway.fetch_snapshot() => match fetched {
                Ok(snapshot) => self.store.set(snapshot),
                Err(err) => warn!(error = %err, "initial snapshot fetch failed"),
            },
        }

        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval fires immediately; the initial fetch already covered that.
        ticker.tick().await;

        let mut phase = Phase::Running;
        loop {
            tokio::select! {
                _ = stop.changed() => return,
                _ = ticker.tick() => {}
            }
            // Teardown while a round trip is pending abandons it here; the
            // response is discarded without touching the store.
            tokio::select! {
                _ = stop.changed() => return,
                next = self.tick(phase) => phase = next,
            }
        }
    }

    /// One scheduled round trip. Exactly one remote call per tick.
    async fn tick(&self, phase: Phase) -> Phase {
        match phase {
            Phase::Running => match self.gateway.advance().await {
                Ok(snapshot) => {
                    self.store.set(snapshot);
                    Phase::Running
                }
                Err(err) => {
                    warn!(error = %err, "advance failed; degrading to read-only fetch");
                    Phase::Recovering
                }
            },
            Phase::Recovering => {
                match self.gateway.fetch_snapshot().await {
                    Ok(snapshot) => self.store.set(snapshot),
                    Err(err) => {
                        warn!(error = %err, "recovery fetch failed; keeping last known snapshot");
                    }
                }
                Phase::Running
            }
        }
    }
}

/// Owns the loop's lifetime. Stopping is terminal: re-entering a running
/// state requires a fresh [`SyncLoop::spawn`], not a resume. Dropping the
/// handle also tears the loop down (the stop channel closes).
pub struct SyncHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Stop scheduling ticks and wait for the loop task to exit. An in-flight
    /// request is abandoned and its response discarded silently.
    pub async fn shutdown(self) {
        let _ = self.stop.send(true);
        let _ = self.task.await;
    }
}

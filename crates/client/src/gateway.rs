use anyhow::Context;
use dronedeck_protocol::{
    Ack, AssignTaskRequest, CellLabel, Snapshot, ToggleObstacleRequest,
};
use tracing::debug;

use crate::intent::Intent;
use crate::store::SnapshotStore;

/// HTTP surface of the remote simulation service.
///
/// The base URL is resolved once at startup; there is no runtime
/// reconfiguration. Mutation acknowledgments are service-defined and parsed
/// leniently: whatever they say, the view is refreshed from `/state`
/// afterwards, so a rejected mutation simply shows up as unchanged state.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base: String,
}

impl HttpGateway {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Evolve the simulation by one tick and return the resulting snapshot.
    pub async fn advance(&self) -> anyhow::Result<Snapshot> {
        let resp = self
            .http
            .post(self.url("/step"))
            .send()
            .await
            .context("POST /step")?
            .error_for_status()
            .context("POST /step")?;
        resp.json().await.context("decode /step snapshot")
    }

    /// Read the current snapshot without evolving the simulation.
    pub async fn fetch_snapshot(&self) -> anyhow::Result<Snapshot> {
        let resp = self
            .http
            .get(self.url("/state"))
            .send()
            .await
            .context("GET /state")?
            .error_for_status()
            .context("GET /state")?;
        resp.json().await.context("decode /state snapshot")
    }

    pub async fn toggle_obstacle(&self, label: CellLabel) -> anyhow::Result<()> {
        let resp = self
            .http
            .post(self.url("/toggle_obstacle"))
            .json(&ToggleObstacleRequest {
                label: label.to_string(),
            })
            .send()
            .await
            .context("POST /toggle_obstacle")?
            .error_for_status()
            .context("POST /toggle_obstacle")?;
        self.log_ack("toggle_obstacle", resp).await;
        Ok(())
    }

    pub async fn assign_task(&self, pickup: CellLabel, drop: CellLabel) -> anyhow::Result<()> {
        let resp = self
            .http
            .post(self.url("/assign_task"))
            .json(&AssignTaskRequest {
                pickup: pickup.to_string(),
                drop: drop.to_string(),
            })
            .send()
            .await
            .context("POST /assign_task")?
            .error_for_status()
            .context("POST /assign_task")?;
        self.log_ack("assign_task", resp).await;
        Ok(())
    }

    pub async fn reset(&self) -> anyhow::Result<()> {
        self.http
            .post(self.url("/reset"))
            .send()
            .await
            .context("POST /reset")?
            .error_for_status()
            .context("POST /reset")?;
        Ok(())
    }

    /// Acks are informational only. Whether the service can signal rejection
    /// distinctly from success is unspecified upstream, so nothing here
    /// treats any ack shape as an error.
    async fn log_ack(&self, op: &str, resp: reqwest::Response) {
        match resp.json::<Ack>().await {
            Ok(ack) => debug!(op, ?ack, "mutation acknowledged"),
            Err(err) => debug!(op, %err, "unreadable ack body ignored"),
        }
    }
}

/// Pairs a gateway with the snapshot store and enforces fire-and-refresh:
/// every mutation is followed by an independent `/state` read, and only that
/// read updates the view. The mutation response is never trusted as the new
/// view, so the client cannot drift into an optimistic local guess.
#[derive(Debug, Clone)]
pub struct Commander {
    gateway: HttpGateway,
    store: SnapshotStore,
}

impl Commander {
    pub fn new(gateway: HttpGateway, store: SnapshotStore) -> Self {
        Self { gateway, store }
    }

    /// Fetch the current snapshot and make it the view.
    pub async fn refresh(&self) -> anyhow::Result<()> {
        let snapshot = self.gateway.fetch_snapshot().await?;
        self.store.set(snapshot);
        Ok(())
    }

    pub async fn dispatch(&self, intent: Intent) -> anyhow::Result<()> {
        match intent {
            Intent::ToggleObstacle(label) => self.gateway.toggle_obstacle(label).await?,
            Intent::AssignTask { pickup, drop } => {
                self.gateway.assign_task(pickup, drop).await?
            }
            Intent::Reset => self.gateway.reset().await?,
            Intent::Refresh => {}
        }
        self.refresh().await
    }
}

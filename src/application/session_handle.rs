// Session handle - Drives a telemetry session on a fixed interval
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::application::clock::Clock;
use crate::application::telemetry_session::{SessionConfig, TelemetrySession};
use crate::domain::snapshot::TelemetrySnapshot;
use crate::error::ConfigError;

/// Shared handle to a running session. Cloning shares the same session.
#[derive(Clone)]
pub struct SessionHandle {
    session: Arc<Mutex<TelemetrySession>>,
    snapshots: Arc<watch::Sender<TelemetrySnapshot>>,
    shutdown: Arc<watch::Sender<bool>>,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

/// Create a session and start ticking it. Must be called inside a tokio runtime.
pub fn create_session(
    config: SessionConfig,
    clock: Arc<dyn Clock>,
) -> Result<SessionHandle, ConfigError> {
    let poll_interval = config.poll_interval;
    let session = TelemetrySession::new(config, clock)?;
    let (snapshots, _) = watch::channel(session.snapshot());
    let (shutdown, shutdown_rx) = watch::channel(false);

    let handle = SessionHandle {
        session: Arc::new(Mutex::new(session)),
        snapshots: Arc::new(snapshots),
        shutdown: Arc::new(shutdown),
        task: Arc::new(Mutex::new(None)),
    };

    let task = tokio::spawn(run_ticker(
        handle.session.clone(),
        handle.snapshots.clone(),
        poll_interval,
        shutdown_rx,
    ));
    *handle.task.lock() = Some(task);

    tracing::info!(poll_interval_ms = poll_interval.as_millis() as u64, "telemetry session started");
    Ok(handle)
}

impl SessionHandle {
    pub fn current_snapshot(&self) -> TelemetrySnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that observes every committed tick and acknowledgment.
    pub fn subscribe(&self) -> watch::Receiver<TelemetrySnapshot> {
        self.snapshots.subscribe()
    }

    /// Acknowledge an alert by id. Unknown ids are ignored.
    pub fn acknowledge(&self, alert_id: &str) {
        let mut session = self.session.lock();
        if session.acknowledge(alert_id) {
            self.snapshots.send_replace(session.snapshot());
            tracing::info!(alert_id, "alert acknowledged");
        } else {
            tracing::debug!(alert_id, "acknowledge ignored, no such alert");
        }
    }

    /// Stop ticking. The last snapshot stays readable.
    pub fn stop(&self) {
        if self.shutdown.send_replace(true) {
            return;
        }
        tracing::info!("telemetry session stopping");
    }

    pub fn is_stopped(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Resolves once `stop` has been called, immediately if it already was.
    pub async fn stopped(&self) {
        let mut shutdown = self.shutdown.subscribe();
        // The sender lives as long as `self`, so an error cannot happen here.
        let _ = shutdown.wait_for(|stopped| *stopped).await;
    }

    /// Stop and wait for the ticker task to exit.
    pub async fn shutdown(&self) {
        self.stop();
        let task = self.task.lock().take();
        if let Some(task) = task {
            if let Err(err) = task.await {
                tracing::warn!(error = %err, "ticker task ended abnormally");
            }
        }
    }
}

async fn run_ticker(
    session: Arc<Mutex<TelemetrySession>>,
    snapshots: Arc<watch::Sender<TelemetrySnapshot>>,
    poll_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let start = tokio::time::Instant::now() + poll_interval;
    let mut interval = tokio::time::interval_at(start, poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => apply_tick(&session, &snapshots),
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    tracing::debug!("ticker task exited");
}

fn apply_tick(session: &Mutex<TelemetrySession>, snapshots: &watch::Sender<TelemetrySnapshot>) {
    // Publish under the session lock so an acknowledgment cannot be
    // overwritten by an older snapshot.
    let mut session = session.lock();
    match session.tick() {
        Ok(tick) => {
            let snapshot = session.snapshot();
            tracing::trace!(
                tick,
                open_alerts = snapshot.unacknowledged_alerts(),
                "tick applied"
            );
            snapshots.send_replace(snapshot);
        }
        Err(err) => {
            tracing::warn!(error = %err, "tick skipped, keeping previous snapshot");
        }
    }
}

// Streaming snapshot service - Pushes one snapshot per committed tick
use crate::application::session_handle::SessionHandle;
use crate::domain::snapshot::TelemetrySnapshot;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::WatchStream;

const STREAM_BUFFER: usize = 16;

#[derive(Clone)]
pub struct SnapshotStreamingService {
    session: SessionHandle,
}

impl SnapshotStreamingService {
    pub fn new(session: SessionHandle) -> Self {
        Self { session }
    }

    /// Current snapshot first, then every update until the client goes away
    /// or the session is stopped.
    pub fn stream_snapshots(&self) -> mpsc::Receiver<TelemetrySnapshot> {
        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        let mut updates = WatchStream::new(self.session.subscribe());
        let session = self.session.clone();

        tokio::spawn(async move {
            let mut sent = 0u64;
            loop {
                let snapshot = tokio::select! {
                    biased;
                    _ = tx.closed() => {
                        tracing::debug!(sent, "snapshot stream closed by client");
                        return;
                    }
                    next = updates.next() => match next {
                        Some(snapshot) => snapshot,
                        None => break,
                    },
                    _ = session.stopped() => break,
                };
                if tx.send(snapshot).await.is_err() {
                    tracing::debug!(sent, "snapshot stream closed by client");
                    return;
                }
                sent += 1;
                if session.is_stopped() {
                    break;
                }
            }
            tracing::debug!(sent, "snapshot stream finished");
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::clock::SystemClock;
    use crate::application::session_handle::create_session;
    use crate::application::telemetry_session::SessionConfig;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_stream_yields_current_then_ticks() {
        let session =
            create_session(SessionConfig::new(2_000, 45.0).with_seed(6), Arc::new(SystemClock))
                .unwrap();
        let service = SnapshotStreamingService::new(session.clone());
        let mut rx = service.stream_snapshots();

        let first = rx.recv().await.unwrap();
        assert_eq!(first.tick, 0);

        let second = rx.recv().await.unwrap();
        assert!(second.tick >= 1);
        assert_eq!(second.history.len() as u64, second.tick);

        session.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_ends_once_session_stops() {
        let session =
            create_session(SessionConfig::new(2_000, 45.0).with_seed(6), Arc::new(SystemClock))
                .unwrap();
        let service = SnapshotStreamingService::new(session.clone());
        let mut rx = service.stream_snapshots();
        assert_eq!(rx.recv().await.unwrap().tick, 0);

        session.shutdown().await;

        let remaining = tokio::time::timeout(Duration::from_secs(3_600), async {
            let mut ticks = Vec::new();
            while let Some(snapshot) = rx.recv().await {
                ticks.push(snapshot.tick);
            }
            ticks
        })
        .await
        .expect("snapshot stream still open after stop");
        assert!(remaining.len() <= 1, "received {:?} after stop", remaining);
    }
}

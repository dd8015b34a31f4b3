//! Synthetic process telemetry for a batch chemical reactor.
//!
//! A [`TelemetrySession`] walks a batch through its phases, synthesizes
//! sensor and equipment readings for each tick and keeps a bounded history
//! and an alert feed. [`create_session`] runs one on a tokio interval and
//! hands back a [`SessionHandle`] for snapshots, acknowledgments and shutdown.
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

pub use application::clock::{Clock, ManualClock, SystemClock};
pub use application::session_handle::{SessionHandle, create_session};
pub use application::telemetry_session::{SessionConfig, TelemetrySession};
pub use domain::snapshot::TelemetrySnapshot;
pub use error::{ConfigError, TickError};

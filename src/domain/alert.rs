// Alert feed domain model
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

const ALERT_WINDOW_MS: f64 = 3_600_000.0;
const ACKNOWLEDGED_ABOVE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvent {
    pub id: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub severity: AlertSeverity,
    pub source: String,
    pub message: String,
    pub acknowledged: bool,
}

struct AlertTemplate {
    severity: AlertSeverity,
    source: &'static str,
    message: &'static str,
}

static TEMPLATES: [AlertTemplate; 8] = [
    AlertTemplate {
        severity: AlertSeverity::Critical,
        source: "Agitation Motor",
        message: "Motor vibration above critical threshold (4.2 mm/s)",
    },
    AlertTemplate {
        severity: AlertSeverity::Warning,
        source: "Power Supply",
        message: "Voltage fluctuation detected (372V - threshold: 370V)",
    },
    AlertTemplate {
        severity: AlertSeverity::Warning,
        source: "Temperature",
        message: "Reactor temperature 82.3C - close to high limit (85C)",
    },
    AlertTemplate {
        severity: AlertSeverity::Info,
        source: "Batch",
        message: "Reaction phase started - Batch BG-2026-0047",
    },
    AlertTemplate {
        severity: AlertSeverity::Info,
        source: "PLC",
        message: "OPC UA connection re-established after timeout",
    },
    AlertTemplate {
        severity: AlertSeverity::Critical,
        source: "Pressure",
        message: "Reactor pressure 3.8 bar - critical threshold exceeded (3.5 bar)",
    },
    AlertTemplate {
        severity: AlertSeverity::Warning,
        source: "Conductivity",
        message: "Conductivity drift detected - check reagents",
    },
    AlertTemplate {
        severity: AlertSeverity::Info,
        source: "Maintenance",
        message: "Next preventive motor maintenance due in 48h",
    },
];

pub fn alert_id(index: usize) -> String {
    format!("ALR-{:03}", index + 1)
}

/// Generate a fresh alert pool, most recent first.
///
/// Ids restart at `ALR-001` on every call; a new pool replaces the old one.
pub fn generate_alerts<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    now: DateTime<Utc>,
) -> Vec<AlertEvent> {
    let now_ms = now.timestamp_millis();
    let mut alerts: Vec<AlertEvent> = (0..count)
        .map(|i| {
            let template = &TEMPLATES[i % TEMPLATES.len()];
            let age_ms = (rng.r#gen::<f64>() * ALERT_WINDOW_MS) as i64;
            AlertEvent {
                id: alert_id(i),
                timestamp: now_ms - age_ms,
                severity: template.severity,
                source: template.source.to_string(),
                message: template.message.to_string(),
                acknowledged: rng.r#gen::<f64>() > ACKNOWLEDGED_ABOVE,
            }
        })
        .collect();

    alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    alerts
}

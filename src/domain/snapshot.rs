// Read-only view of a telemetry session
use serde::{Deserialize, Serialize};

use super::alert::AlertEvent;
use super::batch::BatchState;
use super::equipment::{MotorHealth, PowerSupply};
use super::plc::PlcLinkStatus;
use super::sensor::{SampleLevels, SensorSample};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshot {
    pub tick: u64,
    pub latest_sample: Option<SensorSample>,
    /// Alarm levels of `latest_sample`.
    pub latest_levels: Option<SampleLevels>,
    /// Oldest first.
    pub history: Vec<SensorSample>,
    pub batch_state: BatchState,
    pub motor_health: MotorHealth,
    pub power_supply: PowerSupply,
    pub plc_status: PlcLinkStatus,
    pub alerts: Vec<AlertEvent>,
}

impl TelemetrySnapshot {
    pub fn unacknowledged_alerts(&self) -> usize {
        self.alerts.iter().filter(|alert| !alert.acknowledged).count()
    }
}

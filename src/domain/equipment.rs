// Agitation motor and power supply health models
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::sensor::ReadingLevel;
use super::signal::{SignalProfile, centered_noise};

const MOTOR_VIBRATION: SignalProfile = SignalProfile::new(2.5, 1.0, 0.1, 0.5, 2);
const MOTOR_TEMPERATURE: SignalProfile = SignalProfile::new(55.0, 8.0, 0.05, 3.0, 1);
const MOTOR_CURRENT_DRAW: SignalProfile = SignalProfile::new(12.0, 2.0, 0.06, 1.0, 1);
const INSULATION_RESISTANCE: SignalProfile = SignalProfile::new(150.0, 20.0, 0.02, 10.0, 1);

const SUPPLY_VOLTAGE: SignalProfile = SignalProfile::new(380.0, 8.0, 0.03, 4.0, 1);
const SUPPLY_CURRENT: SignalProfile = SignalProfile::new(18.0, 3.0, 0.04, 1.5, 1);
const SUPPLY_FREQUENCY: SignalProfile = SignalProfile::new(50.0, 0.2, 0.02, 0.1, 2);
const POWER_FACTOR: SignalProfile = SignalProfile::new(0.92, 0.03, 0.01, 0.02, 3);
const TOTAL_HARMONIC_DISTORTION: SignalProfile = SignalProfile::new(3.5, 1.0, 0.05, 0.5, 1);

const BASE_RUNTIME_HOURS: f64 = 2456.0;

/// Equipment channels run on wall-clock time, not batch time.
pub fn equipment_time_axis(now: DateTime<Utc>) -> f64 {
    now.timestamp_millis() as f64 / 10_000.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotorStatus {
    Healthy,
    Warning,
    Critical,
}

impl MotorStatus {
    pub fn from_vibration(vibration_level: f64) -> Self {
        if vibration_level > 4.0 {
            MotorStatus::Critical
        } else if vibration_level > 3.0 {
            MotorStatus::Warning
        } else {
            MotorStatus::Healthy
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotorHealth {
    /// Winding temperature, °C
    pub temperature: f64,
    pub current_draw: f64,
    /// mm/s
    pub vibration_level: f64,
    /// Percent, within [60, 100]
    pub bearing_condition: f64,
    /// MOhm
    pub insulation_resistance: f64,
    /// Hours
    pub runtime: f64,
    pub status: MotorStatus,
}

impl MotorHealth {
    pub fn temperature_level(&self) -> ReadingLevel {
        ReadingLevel::above(self.temperature, 60.0, 70.0)
    }

    /// Current draw only ever warns.
    pub fn current_level(&self) -> ReadingLevel {
        ReadingLevel::above(self.current_draw, 15.0, f64::INFINITY)
    }

    pub fn bearing_level(&self) -> ReadingLevel {
        ReadingLevel::below(self.bearing_condition, 80.0, 70.0)
    }
}

pub fn synthesize_motor_health<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> MotorHealth {
    let t = equipment_time_axis(now);
    let vibration_level = MOTOR_VIBRATION.sample(rng, t);
    let bearing_condition = (85.0 + centered_noise(rng, 10.0)).clamp(60.0, 100.0).round();

    MotorHealth {
        temperature: MOTOR_TEMPERATURE.sample(rng, t),
        current_draw: MOTOR_CURRENT_DRAW.sample(rng, t),
        vibration_level,
        bearing_condition,
        insulation_resistance: INSULATION_RESISTANCE.sample(rng, t),
        runtime: (BASE_RUNTIME_HOURS + rng.r#gen::<f64>() * 10.0).round(),
        status: MotorStatus::from_vibration(vibration_level),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerStatus {
    Stable,
    Fluctuating,
    Critical,
}

impl PowerStatus {
    pub fn from_voltage(voltage: f64) -> Self {
        if !(360.0..=400.0).contains(&voltage) {
            PowerStatus::Critical
        } else if !(370.0..=390.0).contains(&voltage) {
            PowerStatus::Fluctuating
        } else {
            PowerStatus::Stable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerSupply {
    pub voltage: f64,
    pub current: f64,
    /// Hz
    pub frequency: f64,
    pub power_factor: f64,
    /// Total harmonic distortion, percent
    pub thd: f64,
    pub status: PowerStatus,
}

pub fn synthesize_power_supply<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> PowerSupply {
    let t = equipment_time_axis(now);
    let voltage = SUPPLY_VOLTAGE.sample(rng, t);

    PowerSupply {
        voltage,
        current: SUPPLY_CURRENT.sample(rng, t),
        frequency: SUPPLY_FREQUENCY.sample(rng, t),
        power_factor: POWER_FACTOR.sample(rng, t),
        thd: TOTAL_HARMONIC_DISTORTION.sample(rng, t),
        status: PowerStatus::from_voltage(voltage),
    }
}

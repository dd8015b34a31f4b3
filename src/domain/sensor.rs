// Reactor sensor sample domain model
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::batch::BatchState;
use super::phase::phase_temperature;
use super::signal::{SignalProfile, round_to};

pub const PRESSURE: SignalProfile = SignalProfile::new(2.5, 0.5, 0.03, 0.2, 2);
pub const CONDUCTIVITY: SignalProfile = SignalProfile::new(4.2, 0.8, 0.02, 0.3, 2);
pub const AGITATION_SPEED: SignalProfile = SignalProfile::new(250.0, 15.0, 0.04, 8.0, 0);
pub const MOTOR_CURRENT: SignalProfile = SignalProfile::new(12.0, 2.0, 0.06, 1.0, 1);
pub const MOTOR_VOLTAGE: SignalProfile = SignalProfile::new(380.0, 5.0, 0.02, 3.0, 1);
pub const VIBRATION: SignalProfile = SignalProfile::new(2.5, 0.8, 0.08, 0.4, 2);
pub const PH_LEVEL: SignalProfile = SignalProfile::new(7.0, 0.5, 0.01, 0.2, 1);
pub const TRANSFER_FLOW_RATE: SignalProfile = SignalProfile::new(15.0, 3.0, 0.05, 1.0, 1);
pub const PROCESS_FLOW_RATE: SignalProfile = SignalProfile::new(2.0, 0.5, 0.05, 0.3, 1);

const TEMPERATURE_PRECISION: u32 = 1;

/// One telemetry reading across all reactor channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSample {
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// Pt100, °C
    pub temperature: f64,
    /// bar
    pub pressure: f64,
    /// mS/cm
    pub conductivity: f64,
    /// RPM
    pub agitation_speed: f64,
    /// A
    pub motor_current: f64,
    /// V
    pub motor_voltage: f64,
    /// mm/s RMS
    pub vibration: f64,
    pub ph_level: f64,
    /// L/min
    pub flow_rate: f64,
}

impl SensorSample {
    pub fn channels(&self) -> [(&'static str, f64); 9] {
        [
            ("temperature", self.temperature),
            ("pressure", self.pressure),
            ("conductivity", self.conductivity),
            ("agitationSpeed", self.agitation_speed),
            ("motorCurrent", self.motor_current),
            ("motorVoltage", self.motor_voltage),
            ("vibration", self.vibration),
            ("phLevel", self.ph_level),
            ("flowRate", self.flow_rate),
        ]
    }

    /// First channel holding a NaN or infinite value.
    pub fn non_finite_channel(&self) -> Option<&'static str> {
        self.channels()
            .into_iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(name, _)| name)
    }

    pub fn temperature_level(&self) -> ReadingLevel {
        ReadingLevel::above(self.temperature, 75.0, 85.0)
    }

    pub fn pressure_level(&self) -> ReadingLevel {
        ReadingLevel::above(self.pressure, 3.0, 3.5)
    }

    pub fn vibration_level(&self) -> ReadingLevel {
        ReadingLevel::above(self.vibration, 3.0, 4.0)
    }

    pub fn levels(&self) -> SampleLevels {
        SampleLevels {
            temperature: self.temperature_level(),
            pressure: self.pressure_level(),
            vibration: self.vibration_level(),
        }
    }
}

/// Alarm levels of the channels operators watch on the overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleLevels {
    pub temperature: ReadingLevel,
    pub pressure: ReadingLevel,
    pub vibration: ReadingLevel,
}

impl SampleLevels {
    pub fn worst(&self) -> ReadingLevel {
        self.temperature.max(self.pressure).max(self.vibration)
    }
}

/// Alarm level of a single reading against its operating limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReadingLevel {
    Normal,
    Warning,
    Critical,
}

impl ReadingLevel {
    /// Classify a reading that is only dangerous when high.
    pub fn above(value: f64, warning: f64, critical: f64) -> Self {
        if value > critical {
            ReadingLevel::Critical
        } else if value > warning {
            ReadingLevel::Warning
        } else {
            ReadingLevel::Normal
        }
    }

    /// Classify a reading that is only dangerous when low.
    pub fn below(value: f64, warning: f64, critical: f64) -> Self {
        if value < critical {
            ReadingLevel::Critical
        } else if value < warning {
            ReadingLevel::Warning
        } else {
            ReadingLevel::Normal
        }
    }
}

/// Synthesize the sample for the current batch state.
///
/// Every channel except temperature and flow is a fixed profile over the
/// batch elapsed time.
pub fn synthesize_sample<R: Rng + ?Sized>(
    rng: &mut R,
    batch: &BatchState,
    now: DateTime<Utc>,
) -> SensorSample {
    let t = batch.elapsed_minutes;
    let temperature = phase_temperature(rng, batch.phase, t, batch.total_minutes);
    let flow = if batch.phase.is_transfer() {
        TRANSFER_FLOW_RATE
    } else {
        PROCESS_FLOW_RATE
    };

    SensorSample {
        timestamp: now.timestamp_millis(),
        temperature: round_to(temperature, TEMPERATURE_PRECISION),
        pressure: PRESSURE.sample(rng, t),
        conductivity: CONDUCTIVITY.sample(rng, t),
        agitation_speed: AGITATION_SPEED.sample(rng, t),
        motor_current: MOTOR_CURRENT.sample(rng, t),
        motor_voltage: MOTOR_VOLTAGE.sample(rng, t),
        vibration: VIBRATION.sample(rng, t),
        ph_level: PH_LEVEL.sample(rng, t),
        flow_rate: flow.sample(rng, t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::batch::advance_batch;
    use crate::domain::phase::BatchPhase;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    fn within(profile: SignalProfile, value: f64) -> bool {
        let slack = 0.5 / 10f64.powi(profile.precision as i32);
        (value - profile.base).abs() <= profile.max_deviation() + slack
    }

    #[test]
    fn test_channels_stay_in_profile_envelopes() {
        let mut rng = StdRng::seed_from_u64(21);
        for step in 0..360 {
            let batch = advance_batch(&mut rng, step as f64 * 0.5, fixed_now());
            let sample = synthesize_sample(&mut rng, &batch, fixed_now());

            assert!(within(PRESSURE, sample.pressure));
            assert!(within(CONDUCTIVITY, sample.conductivity));
            assert!(within(AGITATION_SPEED, sample.agitation_speed));
            assert!(within(MOTOR_CURRENT, sample.motor_current));
            assert!(within(MOTOR_VOLTAGE, sample.motor_voltage));
            assert!(within(VIBRATION, sample.vibration));
            assert!(within(PH_LEVEL, sample.ph_level));
            assert_eq!(sample.agitation_speed.fract(), 0.0);
            assert!(sample.non_finite_channel().is_none());
        }
    }

    #[test]
    fn test_flow_rate_follows_transfer_phases() {
        let mut rng = StdRng::seed_from_u64(8);
        for offset in [5.0, 170.0] {
            let batch = advance_batch(&mut rng, offset, fixed_now());
            assert!(batch.phase.is_transfer());
            let sample = synthesize_sample(&mut rng, &batch, fixed_now());
            assert!(sample.flow_rate >= 11.0, "transfer flow {}", sample.flow_rate);
        }
        let batch = advance_batch(&mut rng, 90.0, fixed_now());
        assert_eq!(batch.phase, BatchPhase::Reaction);
        let sample = synthesize_sample(&mut rng, &batch, fixed_now());
        assert!(sample.flow_rate <= 2.7, "process flow {}", sample.flow_rate);
    }

    #[test]
    fn test_timestamp_comes_from_clock() {
        let mut rng = StdRng::seed_from_u64(2);
        let batch = advance_batch(&mut rng, 45.0, fixed_now());
        let sample = synthesize_sample(&mut rng, &batch, fixed_now());
        assert_eq!(sample.timestamp, fixed_now().timestamp_millis());
    }

    #[test]
    fn test_reading_levels() {
        assert_eq!(ReadingLevel::above(75.0, 75.0, 85.0), ReadingLevel::Normal);
        assert_eq!(ReadingLevel::above(75.1, 75.0, 85.0), ReadingLevel::Warning);
        assert_eq!(ReadingLevel::above(85.1, 75.0, 85.0), ReadingLevel::Critical);
        assert_eq!(ReadingLevel::below(69.0, 80.0, 70.0), ReadingLevel::Critical);
        assert_eq!(ReadingLevel::below(75.0, 80.0, 70.0), ReadingLevel::Warning);
        assert_eq!(ReadingLevel::below(80.0, 80.0, 70.0), ReadingLevel::Normal);
    }

    #[test]
    fn test_sample_levels() {
        let mut rng = StdRng::seed_from_u64(2);
        let batch = advance_batch(&mut rng, 90.0, fixed_now());
        let mut sample = synthesize_sample(&mut rng, &batch, fixed_now());

        sample.temperature = 86.0;
        sample.pressure = 3.2;
        sample.vibration = 2.0;
        let levels = sample.levels();
        assert_eq!(levels.temperature, ReadingLevel::Critical);
        assert_eq!(levels.pressure, ReadingLevel::Warning);
        assert_eq!(levels.vibration, ReadingLevel::Normal);
        assert_eq!(levels.worst(), ReadingLevel::Critical);

        sample.temperature = 70.0;
        assert_eq!(sample.levels().worst(), ReadingLevel::Warning);
    }

    #[test]
    fn test_non_finite_channel_is_reported() {
        let mut rng = StdRng::seed_from_u64(2);
        let batch = advance_batch(&mut rng, 45.0, fixed_now());
        let mut sample = synthesize_sample(&mut rng, &batch, fixed_now());
        sample.ph_level = f64::NAN;
        assert_eq!(sample.non_finite_channel(), Some("phLevel"));
    }
}

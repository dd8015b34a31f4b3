// Telemetry session - Owns the simulated reactor state and advances it per tick
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::application::clock::Clock;
use crate::domain::alert::{AlertEvent, generate_alerts};
use crate::domain::batch::{BatchState, advance_batch};
use crate::domain::equipment::{
    MotorHealth, PowerSupply, synthesize_motor_health, synthesize_power_supply,
};
use crate::domain::plc::{PlcLinkStatus, synthesize_link_status};
use crate::domain::sensor::{SensorSample, synthesize_sample};
use crate::domain::snapshot::TelemetrySnapshot;
use crate::error::{ConfigError, TickError};

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;
pub const DEFAULT_INITIAL_MINUTE_OFFSET: f64 = 45.0;
pub const DEFAULT_MINUTES_PER_TICK: f64 = 0.5;
pub const DEFAULT_HISTORY_CAPACITY: usize = 60;
pub const DEFAULT_ALERT_POOL_SIZE: usize = 8;
pub const DEFAULT_ALERT_REFRESH_EVERY: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub poll_interval: Duration,
    pub initial_minute_offset: f64,
    /// Simulated batch minutes that pass per tick.
    pub minutes_per_tick: f64,
    pub history_capacity: usize,
    pub alert_pool_size: usize,
    /// Replace the alert pool every N ticks.
    pub alert_refresh_every: u64,
    /// Fixed RNG seed; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            initial_minute_offset: DEFAULT_INITIAL_MINUTE_OFFSET,
            minutes_per_tick: DEFAULT_MINUTES_PER_TICK,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            alert_pool_size: DEFAULT_ALERT_POOL_SIZE,
            alert_refresh_every: DEFAULT_ALERT_REFRESH_EVERY,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn new(poll_interval_ms: u64, initial_minute_offset: f64) -> Self {
        Self {
            poll_interval: Duration::from_millis(poll_interval_ms),
            initial_minute_offset,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::NonPositivePollInterval);
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        if self.alert_pool_size == 0 {
            return Err(ConfigError::ZeroAlertPool);
        }
        if self.alert_refresh_every == 0 {
            return Err(ConfigError::ZeroAlertRefresh);
        }
        if !self.initial_minute_offset.is_finite() || self.initial_minute_offset < 0.0 {
            return Err(ConfigError::InvalidMinuteOffset(self.initial_minute_offset));
        }
        if !self.minutes_per_tick.is_finite() || self.minutes_per_tick <= 0.0 {
            return Err(ConfigError::InvalidMinutesPerTick(self.minutes_per_tick));
        }
        Ok(())
    }

    fn poll_interval_ms(&self) -> u64 {
        self.poll_interval.as_millis() as u64
    }
}

/// Everything one tick changes, computed before any of it is applied.
#[derive(Debug, Clone)]
pub(crate) struct TickUpdate {
    pub(crate) tick: u64,
    pub(crate) batch_state: BatchState,
    pub(crate) sample: SensorSample,
    pub(crate) motor_health: MotorHealth,
    pub(crate) power_supply: PowerSupply,
    pub(crate) plc_status: PlcLinkStatus,
    pub(crate) alerts: Option<Vec<AlertEvent>>,
}

pub struct TelemetrySession {
    config: SessionConfig,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    tick: u64,
    batch_state: BatchState,
    history: VecDeque<SensorSample>,
    motor_health: MotorHealth,
    power_supply: PowerSupply,
    plc_status: PlcLinkStatus,
    alerts: Vec<AlertEvent>,
    #[cfg(test)]
    faulty_ticks: u32,
}

impl TelemetrySession {
    pub fn new(config: SessionConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let now = clock.now();

        let batch_state = advance_batch(&mut rng, config.initial_minute_offset, now);
        let alerts = generate_alerts(&mut rng, config.alert_pool_size, now);
        let motor_health = synthesize_motor_health(&mut rng, now);
        let power_supply = synthesize_power_supply(&mut rng, now);
        let plc_status = synthesize_link_status(&mut rng, config.poll_interval_ms(), now);
        let history = VecDeque::with_capacity(config.history_capacity);

        Ok(Self {
            config,
            clock,
            rng,
            tick: 0,
            batch_state,
            history,
            motor_health,
            power_supply,
            plc_status,
            alerts,
            #[cfg(test)]
            faulty_ticks: 0,
        })
    }

    /// Make the next `count` ticks produce a non-finite reading.
    #[cfg(test)]
    pub(crate) fn inject_faulty_ticks(&mut self, count: u32) {
        self.faulty_ticks = count;
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn batch_state(&self) -> &BatchState {
        &self.batch_state
    }

    pub fn history(&self) -> impl ExactSizeIterator<Item = &SensorSample> {
        self.history.iter()
    }

    pub fn latest_sample(&self) -> Option<&SensorSample> {
        self.history.back()
    }

    pub fn motor_health(&self) -> &MotorHealth {
        &self.motor_health
    }

    pub fn power_supply(&self) -> &PowerSupply {
        &self.power_supply
    }

    pub fn alerts(&self) -> &[AlertEvent] {
        &self.alerts
    }

    /// Simulation minute the given tick maps to.
    pub fn minute_offset_at(&self, tick: u64) -> f64 {
        self.config.initial_minute_offset + tick as f64 * self.config.minutes_per_tick
    }

    /// Advance the simulation by one tick. On error nothing is applied.
    pub fn tick(&mut self) -> Result<u64, TickError> {
        let update = self.prepare_tick();
        self.commit(update)
    }

    pub(crate) fn prepare_tick(&mut self) -> TickUpdate {
        let tick = self.tick + 1;
        let minute_offset = self.minute_offset_at(tick);
        let now = self.clock.now();
        let rng = &mut self.rng;

        let batch_state = advance_batch(rng, minute_offset, now);
        let mut sample = synthesize_sample(rng, &batch_state, now);
        if let Some(last) = self.history.back() {
            sample.timestamp = sample.timestamp.max(last.timestamp);
        }
        #[cfg(test)]
        if self.faulty_ticks > 0 {
            self.faulty_ticks -= 1;
            sample.ph_level = f64::NAN;
        }

        let motor_health = synthesize_motor_health(rng, now);
        let power_supply = synthesize_power_supply(rng, now);
        let plc_status = synthesize_link_status(rng, self.config.poll_interval_ms(), now);
        let alerts = (tick % self.config.alert_refresh_every == 0)
            .then(|| generate_alerts(rng, self.config.alert_pool_size, now));

        TickUpdate {
            tick,
            batch_state,
            sample,
            motor_health,
            power_supply,
            plc_status,
            alerts,
        }
    }

    pub(crate) fn commit(&mut self, update: TickUpdate) -> Result<u64, TickError> {
        if let Some(channel) = update.sample.non_finite_channel() {
            return Err(TickError::NonFiniteReading {
                channel,
                tick: update.tick,
            });
        }

        while self.history.len() >= self.config.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(update.sample);

        self.tick = update.tick;
        self.batch_state = update.batch_state;
        self.motor_health = update.motor_health;
        self.power_supply = update.power_supply;
        self.plc_status = update.plc_status;
        if let Some(alerts) = update.alerts {
            tracing::debug!(tick = self.tick, count = alerts.len(), "alert pool regenerated");
            self.alerts = alerts;
        }

        Ok(self.tick)
    }

    /// Mark an alert as acknowledged. Returns whether the id was found.
    pub fn acknowledge(&mut self, alert_id: &str) -> bool {
        match self.alerts.iter_mut().find(|alert| alert.id == alert_id) {
            Some(alert) => {
                alert.acknowledged = true;
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            tick: self.tick,
            latest_sample: self.history.back().cloned(),
            latest_levels: self.history.back().map(SensorSample::levels),
            history: self.history.iter().cloned().collect(),
            batch_state: self.batch_state.clone(),
            motor_health: self.motor_health.clone(),
            power_supply: self.power_supply.clone(),
            plc_status: self.plc_status.clone(),
            alerts: self.alerts.clone(),
        }
    }
}

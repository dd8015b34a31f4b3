use serde::Deserialize;
use std::time::Duration;

use crate::application::telemetry_session::{
    DEFAULT_ALERT_POOL_SIZE, DEFAULT_ALERT_REFRESH_EVERY, DEFAULT_HISTORY_CAPACITY,
    DEFAULT_INITIAL_MINUTE_OFFSET, DEFAULT_MINUTES_PER_TICK, DEFAULT_POLL_INTERVAL_MS,
    SessionConfig,
};

const CONFIG_FILE: &str = "config/reactor";
const ENV_PREFIX: &str = "REACTOR";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub simulation: SimulationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_bind_addr")]
    pub bind_addr: String,
}

impl ServerSettings {
    fn default_bind_addr() -> String {
        "0.0.0.0:8080".to_string()
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: Self::default_bind_addr(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimulationSettings {
    pub poll_interval_ms: u64,
    pub initial_minute_offset: f64,
    pub minutes_per_tick: f64,
    pub history_capacity: usize,
    pub alert_pool_size: usize,
    pub alert_refresh_every: u64,
    pub seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            initial_minute_offset: DEFAULT_INITIAL_MINUTE_OFFSET,
            minutes_per_tick: DEFAULT_MINUTES_PER_TICK,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            alert_pool_size: DEFAULT_ALERT_POOL_SIZE,
            alert_refresh_every: DEFAULT_ALERT_REFRESH_EVERY,
            seed: None,
        }
    }
}

impl SimulationSettings {
    /// Validation happens when the session is created.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            initial_minute_offset: self.initial_minute_offset,
            minutes_per_tick: self.minutes_per_tick,
            history_capacity: self.history_capacity,
            alert_pool_size: self.alert_pool_size,
            alert_refresh_every: self.alert_refresh_every,
            seed: self.seed,
        }
    }
}

/// Load `config/reactor.{toml,json,yaml}` if present, then `REACTOR__*` env overrides.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

// Error types for session configuration and ticking
use thiserror::Error;

/// Rejected session settings. Raised once, at session creation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("poll interval must be positive")]
    NonPositivePollInterval,
    #[error("history capacity must be positive")]
    ZeroHistoryCapacity,
    #[error("alert pool size must be positive")]
    ZeroAlertPool,
    #[error("alert refresh period must be at least one tick")]
    ZeroAlertRefresh,
    #[error("initial minute offset must be finite and non-negative, got {0}")]
    InvalidMinuteOffset(f64),
    #[error("minutes per tick must be finite and positive, got {0}")]
    InvalidMinutesPerTick(f64),
}

/// A tick that could not be applied. The session keeps its previous state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TickError {
    #[error("synthesized {channel} reading is not finite at tick {tick}")]
    NonFiniteReading { channel: &'static str, tick: u64 },
}

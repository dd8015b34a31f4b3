// Domain layer - Synthetic reactor telemetry models and generators
pub mod alert;
pub mod batch;
pub mod equipment;
pub mod history;
pub mod maintenance;
pub mod phase;
pub mod plc;
pub mod sensor;
pub mod signal;
pub mod snapshot;

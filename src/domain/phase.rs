// Batch phase model and phase temperature profiles
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::signal::{centered_noise, noisy_signal};

/// The five ordered stages of a reactor batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchPhase {
    Loading,
    Heating,
    Reaction,
    Cooling,
    Unloading,
}

const HEATING_START: f64 = 0.10;
const REACTION_START: f64 = 0.30;
const COOLING_START: f64 = 0.70;
const UNLOADING_START: f64 = 0.90;

const AMBIENT_C: f64 = 25.0;
const REACTION_PEAK_C: f64 = 80.0;
const DISCHARGE_C: f64 = 30.0;

impl BatchPhase {
    pub fn from_progress(progress: f64) -> Self {
        if progress < HEATING_START {
            BatchPhase::Loading
        } else if progress < REACTION_START {
            BatchPhase::Heating
        } else if progress < COOLING_START {
            BatchPhase::Reaction
        } else if progress < UNLOADING_START {
            BatchPhase::Cooling
        } else {
            BatchPhase::Unloading
        }
    }

    pub fn from_elapsed(elapsed_minutes: f64, total_minutes: f64) -> Self {
        Self::from_progress(elapsed_minutes / total_minutes)
    }

    /// 1-based position in the batch cycle.
    pub fn ordinal(self) -> u8 {
        match self {
            BatchPhase::Loading => 1,
            BatchPhase::Heating => 2,
            BatchPhase::Reaction => 3,
            BatchPhase::Cooling => 4,
            BatchPhase::Unloading => 5,
        }
    }

    /// Load and discharge move material, so flow runs high.
    pub fn is_transfer(self) -> bool {
        matches!(self, BatchPhase::Loading | BatchPhase::Unloading)
    }

    /// Progress window `[start, end)` covered by this phase.
    pub fn window(self) -> (f64, f64) {
        match self {
            BatchPhase::Loading => (0.0, HEATING_START),
            BatchPhase::Heating => (HEATING_START, REACTION_START),
            BatchPhase::Reaction => (REACTION_START, COOLING_START),
            BatchPhase::Cooling => (COOLING_START, UNLOADING_START),
            BatchPhase::Unloading => (UNLOADING_START, 1.0),
        }
    }
}

/// Reactor temperature (°C) for a phase at a point in the batch, unrounded.
///
/// Heating and Cooling ramp linearly across their own progress window, so the
/// profile joins the neighbouring plateaus instead of jumping at the boundary.
pub fn phase_temperature<R: Rng + ?Sized>(
    rng: &mut R,
    phase: BatchPhase,
    elapsed_minutes: f64,
    total_minutes: f64,
) -> f64 {
    let progress = elapsed_minutes / total_minutes;
    match phase {
        BatchPhase::Loading => noisy_signal(rng, AMBIENT_C, 2.0, 0.1, elapsed_minutes, 1.0),
        BatchPhase::Heating => {
            let ramp = window_fraction(phase, progress);
            AMBIENT_C + ramp * (REACTION_PEAK_C - AMBIENT_C) + centered_noise(rng, 3.0)
        }
        BatchPhase::Reaction => noisy_signal(rng, 78.0, 3.0, 0.05, elapsed_minutes, 2.0),
        BatchPhase::Cooling => {
            let ramp = window_fraction(phase, progress);
            REACTION_PEAK_C - ramp * (REACTION_PEAK_C - DISCHARGE_C) + centered_noise(rng, 2.0)
        }
        BatchPhase::Unloading => noisy_signal(rng, DISCHARGE_C, 1.0, 0.1, elapsed_minutes, 0.5),
    }
}

fn window_fraction(phase: BatchPhase, progress: f64) -> f64 {
    let (start, end) = phase.window();
    ((progress - start) / (end - start)).clamp(0.0, 1.0)
}

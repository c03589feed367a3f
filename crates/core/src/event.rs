//! Host-facing simulation events.
//!
//! The simulation communicates with its host (UI layer, CLI, tests) only
//! through these values: periodic step reports at a reduced cadence, a
//! single minimum-found signal per run, and reset notifications. All
//! variants serialize as tagged JSON objects so hosts can stream them.

use serde::{Deserialize, Serialize};

/// Why the particle was reset to a fresh random start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetCause {
    /// Velocity stayed under the stuck threshold for the whole window.
    Stuck,
    /// The celebration delay after reaching the global basin elapsed.
    Converged,
    /// The host requested a fresh run (transport start, landscape swap).
    Manual,
}

/// An observable simulation event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    /// Periodic state report: position, loss, and the raw (pre-noise)
    /// gradient at the position the step started from. Emitted every
    /// few ticks, not every tick, to limit update pressure on the host.
    Step {
        tick: u64,
        x: f64,
        z: f64,
        loss: f64,
        dx: f64,
        dz: f64,
    },
    /// The particle entered the global basin's radius for the first time
    /// this run. Emitted at most once per run.
    MinimumFound { tick: u64, x: f64, z: f64, loss: f64 },
    /// The particle was reset to a fresh random start.
    Reset { tick: u64, cause: ResetCause },
}

impl SimEvent {
    /// The tick at which the event was produced.
    pub fn tick(&self) -> u64 {
        match self {
            SimEvent::Step { tick, .. }
            | SimEvent::MinimumFound { tick, .. }
            | SimEvent::Reset { tick, .. } => *tick,
        }
    }
}

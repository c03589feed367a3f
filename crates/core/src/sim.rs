//! The core `Simulation` trait that host loops drive.
//!
//! The trait is object-safe so hosts (the frame scheduler, the CLI, tests)
//! can hold a `&mut dyn Simulation` without knowing the concrete engine.

use crate::error::SimError;
use crate::event::SimEvent;
use serde_json::Value;

/// A tick-based simulation driven by an external scheduler.
///
/// Ticks are strictly sequential: one `step()` call's writes are fully
/// visible before the next begins. Hosts call `step()` unconditionally at
/// their chosen cadence; a simulation that is not running treats the call
/// as a no-op, so there is nothing in flight to cancel when pausing.
pub trait Simulation {
    /// Advance the simulation by one tick.
    fn step(&mut self) -> Result<(), SimError>;

    /// Whether the transport is running (steps advance state).
    fn running(&self) -> bool;

    /// The logical tick counter. Only advances while running.
    fn tick(&self) -> u64;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing the tunable parameters: type, default, range, step.
    fn param_schema(&self) -> Value;

    /// Drains and returns the events produced since the last poll.
    fn poll_events(&mut self) -> Vec<SimEvent>;
}

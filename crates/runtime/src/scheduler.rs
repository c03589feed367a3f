//! Per-frame driver decoupling render rate from physics rate.
//!
//! Hosts call [`FrameLoop::advance`] once per rendered frame; the loop steps
//! the simulation only on every Nth frame so motion stays visually legible
//! regardless of the display's frame rate. Ticks are strictly sequential:
//! everything happens on the caller's thread, and a step completes before
//! `advance` returns.

use descent_engine_core::error::SimError;
use descent_engine_core::sim::Simulation;

/// Default sub-tick stride: physics advances on every 6th rendered frame.
pub const DEFAULT_STRIDE: u32 = 6;

/// Frame counter with a physics stride.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    frame: u64,
    stride: u32,
}

impl FrameLoop {
    /// Creates a frame loop stepping physics every `stride` frames.
    /// A stride of 0 is floored to 1 (step every frame).
    pub fn new(stride: u32) -> Self {
        Self {
            frame: 0,
            stride: stride.max(1),
        }
    }

    /// Frames seen so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The configured stride.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Registers one rendered frame, stepping the simulation when the frame
    /// count lands on the stride. Returns whether a physics step ran.
    pub fn advance(&mut self, sim: &mut dyn Simulation) -> Result<bool, SimError> {
        self.frame += 1;
        if self.frame % u64::from(self.stride) == 0 {
            sim.step()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(DEFAULT_STRIDE)
    }
}

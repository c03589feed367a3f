//! The user-facing control surface: tunable parameters and transport.
//!
//! A `ControlSurface` owns the descent engine, the frame loop, and the PRNG
//! used for landscape regeneration. Hosts bind sliders to the setters (which
//! clamp into the declared ranges) and call [`ControlSurface::frame`] once
//! per rendered frame, consuming the events it returns. The engine's state
//! is never handed out mutably: hosts read snapshots and events only.

use descent_engine_core::clock::Schedule;
use descent_engine_core::error::SimError;
use descent_engine_core::event::SimEvent;
use descent_engine_core::prng::Splitmix64;
use descent_engine_core::sim::Simulation;
use descent_engine_landscape::Landscape;
use descent_engine_optim::{Descent, DescentConfig, OptimParams};

use crate::scheduler::FrameLoop;

/// Frames between a regenerate request and the landscape swap
/// (~80 ms at 60 fps).
const REGEN_DELAY_FRAMES: u64 = 5;

/// Transport and parameter controls around a [`Descent`] engine.
pub struct ControlSurface {
    sim: Descent,
    frames: FrameLoop,
    rng: Splitmix64,
    pending_swap: Schedule<()>,
}

impl ControlSurface {
    /// Creates a control surface with default parameters and config.
    /// The landscape and all later randomness derive from `seed`.
    pub fn new(seed: u64) -> Result<Self, SimError> {
        Self::with_settings(seed, OptimParams::default(), DescentConfig::default())
    }

    /// Creates a control surface with explicit parameters and config.
    pub fn with_settings(
        seed: u64,
        params: OptimParams,
        cfg: DescentConfig,
    ) -> Result<Self, SimError> {
        let mut rng = Splitmix64::new(seed);
        let landscape = Landscape::generate(&mut rng);
        let engine_seed = rng.next_u64();
        let sim = Descent::new(landscape, params, cfg, engine_seed)?;
        Ok(Self {
            sim,
            frames: FrameLoop::default(),
            rng,
            pending_swap: Schedule::new(),
        })
    }

    /// Sets the learning rate, clamped into its declared range.
    pub fn set_learning_rate(&mut self, value: f64) {
        let mut p = self.sim.optim_params();
        p.learning_rate = value;
        self.sim.set_params(p);
    }

    /// Sets the momentum coefficient, clamped into its declared range.
    pub fn set_momentum(&mut self, value: f64) {
        let mut p = self.sim.optim_params();
        p.momentum = value;
        self.sim.set_params(p);
    }

    /// Sets the noise amplitude, clamped into its declared range.
    pub fn set_noise(&mut self, value: f64) {
        let mut p = self.sim.optim_params();
        p.noise = value;
        self.sim.set_params(p);
    }

    /// Start/pause toggle. Starting always begins a fresh particle state.
    pub fn toggle_run(&mut self) {
        self.sim.toggle();
    }

    /// Requests a new landscape: stops the run immediately and swaps in a
    /// freshly generated landscape after a short frame-keyed delay, then
    /// starts a fresh run. A second request supersedes a pending one.
    pub fn regenerate(&mut self) {
        self.sim.pause();
        self.pending_swap.cancel_all();
        self.pending_swap
            .schedule_at(self.frames.frame() + REGEN_DELAY_FRAMES, ());
        tracing::debug!(frame = self.frames.frame(), "landscape regeneration requested");
    }

    /// Advances one rendered frame: performs a due landscape swap, steps the
    /// physics when the frame lands on the stride, and returns the events
    /// produced.
    pub fn frame(&mut self) -> Result<Vec<SimEvent>, SimError> {
        self.frames.advance(&mut self.sim)?;
        if !self.pending_swap.take_due(self.frames.frame()).is_empty() {
            let landscape = Landscape::generate(&mut self.rng);
            self.sim.set_landscape(landscape)?;
            self.sim.start();
            tracing::debug!(frame = self.frames.frame(), "landscape swapped");
        }
        Ok(self.sim.poll_events())
    }

    /// Read-only access to the engine for snapshots (position, trail,
    /// landscape, phase).
    pub fn simulation(&self) -> &Descent {
        &self.sim
    }

    /// Current optimizer parameters.
    pub fn params(&self) -> OptimParams {
        self.sim.optim_params()
    }

    /// Whether the transport is running.
    pub fn running(&self) -> bool {
        self.sim.running()
    }

    /// Rendered frames seen so far.
    pub fn frame_count(&self) -> u64 {
        self.frames.frame()
    }
}

//! The momentum gradient-descent state machine.
//!
//! A single particle rolls across a [`Landscape`] under the update rule
//! `v ← momentum·v − lr·(∇L + n)`, `p ← clamp(p + v)`. Each tick the engine
//! checks, in order: a due scheduled reset, convergence into the global
//! basin, and the stuck window. Convergence and stuck both short-circuit
//! the rest of the tick, so a reset tick never also pushes a trail point.
//!
//! All delayed transitions (the celebration pause before a post-convergence
//! reset) are scheduled on the engine's own tick clock, never on wall-clock
//! timers, so runs are reproducible tick-for-tick.

use descent_engine_core::clock::Schedule;
use descent_engine_core::error::SimError;
use descent_engine_core::event::{ResetCause, SimEvent};
use descent_engine_core::params::{param_f64, param_u64};
use descent_engine_core::prng::Splitmix64;
use descent_engine_core::sim::Simulation;
use descent_engine_landscape::Landscape;
use glam::{DVec2, DVec3};
use serde_json::Value;

use crate::params::OptimParams;
use crate::trail::{Trail, TRAIL_CAP};

/// Half-extent of the reachable domain; positions are clamped to ±this.
pub const DOMAIN_RADIUS: f64 = 2.85;
/// Fresh particles spawn uniformly in (−START_SPAN, START_SPAN) per axis.
pub const START_SPAN: f64 = 2.4;

/// Default speed below which a tick counts toward the stuck window.
const STUCK_SPEED: f64 = 0.0003;
/// Default stuck window length in ticks.
const STUCK_TICKS: u32 = 100;
/// Default radius around the global basin center that counts as found.
const GLOBAL_RADIUS: f64 = 0.45;
/// Default celebration delay before the post-convergence reset, in ticks
/// (3.6 s at the 10 Hz tick cadence of a 60 fps host with stride 6).
const CELEBRATION_TICKS: u64 = 36;
/// Default step-report cadence: emit every Nth tick.
const REPORT_INTERVAL: u64 = 3;

/// Tuned-by-feel thresholds, exposed as configuration rather than semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescentConfig {
    /// Velocity magnitude below which a tick counts as stuck.
    pub stuck_speed: f64,
    /// Consecutive stuck ticks that force a reset.
    pub stuck_ticks: u32,
    /// Distance to the global basin center that counts as convergence.
    pub global_radius: f64,
    /// Ticks between convergence and the celebratory reset.
    pub celebration_ticks: u64,
    /// Emit a step report every Nth tick (minimum 1).
    pub report_interval: u64,
    /// Trail capacity in points.
    pub trail_cap: usize,
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            stuck_speed: STUCK_SPEED,
            stuck_ticks: STUCK_TICKS,
            global_radius: GLOBAL_RADIUS,
            celebration_ticks: CELEBRATION_TICKS,
            report_interval: REPORT_INTERVAL,
            trail_cap: TRAIL_CAP,
        }
    }
}

impl DescentConfig {
    /// Extracts a config from a JSON object, falling back to defaults.
    /// `report_interval` is floored at 1.
    pub fn from_json(params: &Value) -> Self {
        Self {
            stuck_speed: param_f64(params, "stuck_speed", STUCK_SPEED),
            stuck_ticks: param_u64(params, "stuck_ticks", u64::from(STUCK_TICKS)) as u32,
            global_radius: param_f64(params, "global_radius", GLOBAL_RADIUS),
            celebration_ticks: param_u64(params, "celebration_ticks", CELEBRATION_TICKS),
            report_interval: param_u64(params, "report_interval", REPORT_INTERVAL).max(1),
            trail_cap: param_u64(params, "trail_cap", TRAIL_CAP as u64) as usize,
        }
    }
}

/// Observable transport state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not running; steps are no-ops.
    Idle,
    /// Running normally.
    Running,
    /// Global minimum found; a celebratory reset is pending.
    Converged,
}

/// The simulated particle. Single-writer: only the tick mutates it.
#[derive(Debug, Clone, Copy)]
struct Particle {
    pos: DVec2,
    vel: DVec2,
    stuck: u32,
    alerted: bool,
    steps: u64,
}

impl Particle {
    /// A fresh particle at a random start with zero velocity.
    fn spawn(rng: &mut Splitmix64) -> Self {
        Self {
            pos: DVec2::new(rng.next_bilateral(START_SPAN), rng.next_bilateral(START_SPAN)),
            vel: DVec2::ZERO,
            stuck: 0,
            alerted: false,
            steps: 0,
        }
    }
}

/// Momentum gradient-descent engine over a loss landscape.
pub struct Descent {
    landscape: Landscape,
    params: OptimParams,
    cfg: DescentConfig,
    rng: Splitmix64,
    particle: Particle,
    trail: Trail,
    tick: u64,
    running: bool,
    pending_resets: Schedule<ResetCause>,
    events: Vec<SimEvent>,
}

impl Descent {
    /// Creates an idle engine over a validated landscape.
    pub fn new(
        landscape: Landscape,
        params: OptimParams,
        cfg: DescentConfig,
        seed: u64,
    ) -> Result<Self, SimError> {
        landscape.validate()?;
        let mut rng = Splitmix64::new(seed);
        let particle = Particle::spawn(&mut rng);
        Ok(Self {
            landscape,
            params: params.clamped(),
            cfg,
            rng,
            particle,
            trail: Trail::new(cfg.trail_cap),
            tick: 0,
            running: false,
            pending_resets: Schedule::new(),
            events: Vec::new(),
        })
    }

    /// Creates an engine from JSON parameter and config objects.
    pub fn from_json(
        landscape: Landscape,
        params: &Value,
        config: &Value,
        seed: u64,
    ) -> Result<Self, SimError> {
        Self::new(
            landscape,
            OptimParams::from_json(params),
            DescentConfig::from_json(config),
            seed,
        )
    }

    /// Starts a fresh run: new random particle, cleared trail, cancelled
    /// schedules. Starting always begins from scratch, never resumes.
    pub fn start(&mut self) {
        self.do_reset(ResetCause::Manual);
        self.running = true;
        tracing::debug!(tick = self.tick, "run started");
    }

    /// Pauses the transport. Ticks are atomic, so there is nothing in
    /// flight to cancel; pending scheduled resets simply wait.
    pub fn pause(&mut self) {
        self.running = false;
        tracing::debug!(tick = self.tick, "run paused");
    }

    /// Toggles between running and idle. Starting begins a fresh run.
    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Replaces the current parameters, clamped into their declared ranges.
    pub fn set_params(&mut self, params: OptimParams) {
        self.params = params.clamped();
    }

    /// Atomically swaps in a new landscape and resets the run. Pending
    /// celebration resets are cancelled; the transport state is unchanged.
    pub fn set_landscape(&mut self, landscape: Landscape) -> Result<(), SimError> {
        landscape.validate()?;
        self.landscape = landscape;
        self.do_reset(ResetCause::Manual);
        Ok(())
    }

    /// The current landscape definition, for surface rendering.
    pub fn landscape(&self) -> &Landscape {
        &self.landscape
    }

    /// Current particle position in landscape space.
    pub fn position(&self) -> DVec2 {
        self.particle.pos
    }

    /// Current particle velocity.
    pub fn velocity(&self) -> DVec2 {
        self.particle.vel
    }

    /// Whether the global minimum has been celebrated this run.
    pub fn alerted(&self) -> bool {
        self.particle.alerted
    }

    /// Read-only trail for rendering.
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Current optimizer parameters.
    pub fn optim_params(&self) -> OptimParams {
        self.params
    }

    /// Engine configuration.
    pub fn config(&self) -> DescentConfig {
        self.cfg
    }

    /// Observable transport phase.
    pub fn phase(&self) -> Phase {
        if !self.running {
            Phase::Idle
        } else if !self.pending_resets.is_empty() {
            Phase::Converged
        } else {
            Phase::Running
        }
    }

    /// Discards the particle and starts over: fresh random position, zero
    /// velocity, cleared stuck counter and alert flag, emptied trail, and
    /// no outstanding scheduled resets.
    fn do_reset(&mut self, cause: ResetCause) {
        self.particle = Particle::spawn(&mut self.rng);
        self.trail.clear();
        self.pending_resets.cancel_all();
        self.events.push(SimEvent::Reset {
            tick: self.tick,
            cause,
        });
        tracing::debug!(tick = self.tick, ?cause, "particle reset");
    }
}

impl Simulation for Descent {
    fn step(&mut self) -> Result<(), SimError> {
        if !self.running {
            return Ok(());
        }
        self.tick += 1;

        // A due celebration reset consumes the whole tick; motion resumes
        // on the next one.
        if let Some(cause) = self.pending_resets.take_due(self.tick).into_iter().next() {
            self.do_reset(cause);
            return Ok(());
        }

        let grad = self.landscape.gradient(self.particle.pos);
        // Perturbation is uniform in (−noise/2, +noise/2) per axis.
        let half_noise = 0.5 * self.params.noise;
        let noise = DVec2::new(
            self.rng.next_bilateral(half_noise),
            self.rng.next_bilateral(half_noise),
        );

        let vel = self.params.momentum * self.particle.vel
            - self.params.learning_rate * (grad + noise);
        let pos = (self.particle.pos + vel).clamp(
            DVec2::splat(-DOMAIN_RADIUS),
            DVec2::splat(DOMAIN_RADIUS),
        );
        self.particle.vel = vel;
        self.particle.pos = pos;
        self.particle.steps += 1;

        let loss = self.landscape.loss(pos.x, pos.y);
        if self.particle.steps % self.cfg.report_interval == 0 {
            self.events.push(SimEvent::Step {
                tick: self.tick,
                x: pos.x,
                z: pos.y,
                loss,
                dx: grad.x,
                dz: grad.y,
            });
        }

        if vel.length() < self.cfg.stuck_speed {
            self.particle.stuck += 1;
        } else {
            self.particle.stuck = 0;
        }

        if let Some(center) = self.landscape.global_basin().map(|b| b.center()) {
            if !self.particle.alerted && pos.distance(center) < self.cfg.global_radius {
                self.particle.alerted = true;
                self.events.push(SimEvent::MinimumFound {
                    tick: self.tick,
                    x: pos.x,
                    z: pos.y,
                    loss,
                });
                self.pending_resets.schedule_at(
                    self.tick.saturating_add(self.cfg.celebration_ticks),
                    ResetCause::Converged,
                );
                tracing::debug!(tick = self.tick, loss, "global minimum found");
                return Ok(());
            }
        }

        if self.particle.stuck >= self.cfg.stuck_ticks {
            self.do_reset(ResetCause::Stuck);
            return Ok(());
        }

        self.trail.push(DVec3::new(pos.x, loss, pos.y));
        Ok(())
    }

    fn running(&self) -> bool {
        self.running
    }

    fn tick(&self) -> u64 {
        self.tick
    }

    fn params(&self) -> Value {
        self.params.to_json()
    }

    fn param_schema(&self) -> Value {
        OptimParams::schema()
    }

    fn poll_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

//! Tunable optimizer parameters.
//!
//! The three continuous parameters the control surface exposes, with their
//! declared ranges and slider step granularities. The ranges are the
//! contract: setters clamp into them. The step values are schema metadata
//! for UI hosts, not enforced by quantization.

use descent_engine_core::params::param_f64;
use serde_json::{json, Value};

/// Learning rate range, step, and default.
pub const LR_MIN: f64 = 0.002;
pub const LR_MAX: f64 = 0.055;
pub const LR_STEP: f64 = 0.001;
pub const LR_DEFAULT: f64 = 0.018;

/// Momentum coefficient range, step, and default.
pub const MOMENTUM_MIN: f64 = 0.0;
pub const MOMENTUM_MAX: f64 = 0.98;
pub const MOMENTUM_STEP: f64 = 0.01;
pub const MOMENTUM_DEFAULT: f64 = 0.88;

/// Gradient noise amplitude range, step, and default.
pub const NOISE_MIN: f64 = 0.0;
pub const NOISE_MAX: f64 = 0.18;
pub const NOISE_STEP: f64 = 0.005;
pub const NOISE_DEFAULT: f64 = 0.04;

/// Optimizer parameters, read by the simulation each tick and mutated only
/// by the control surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimParams {
    /// Step size scaling the gradient contribution to velocity.
    pub learning_rate: f64,
    /// Fraction of prior velocity retained each tick.
    pub momentum: f64,
    /// Amplitude of the per-tick random gradient perturbation.
    pub noise: f64,
}

impl Default for OptimParams {
    fn default() -> Self {
        Self {
            learning_rate: LR_DEFAULT,
            momentum: MOMENTUM_DEFAULT,
            noise: NOISE_DEFAULT,
        }
    }
}

impl OptimParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            learning_rate: param_f64(params, "learning_rate", LR_DEFAULT),
            momentum: param_f64(params, "momentum", MOMENTUM_DEFAULT),
            noise: param_f64(params, "noise", NOISE_DEFAULT),
        }
    }

    /// Returns a copy with every parameter clamped into its declared range.
    pub fn clamped(self) -> Self {
        Self {
            learning_rate: self.learning_rate.clamp(LR_MIN, LR_MAX),
            momentum: self.momentum.clamp(MOMENTUM_MIN, MOMENTUM_MAX),
            noise: self.noise.clamp(NOISE_MIN, NOISE_MAX),
        }
    }

    /// Current values as a JSON object.
    pub fn to_json(&self) -> Value {
        json!({
            "learning_rate": self.learning_rate,
            "momentum": self.momentum,
            "noise": self.noise,
        })
    }

    /// Schema describing the three parameters: type, default, range, step.
    pub fn schema() -> Value {
        json!({
            "learning_rate": {
                "type": "number",
                "default": LR_DEFAULT,
                "min": LR_MIN,
                "max": LR_MAX,
                "step": LR_STEP,
                "description": "Step size scaling the gradient contribution to velocity"
            },
            "momentum": {
                "type": "number",
                "default": MOMENTUM_DEFAULT,
                "min": MOMENTUM_MIN,
                "max": MOMENTUM_MAX,
                "step": MOMENTUM_STEP,
                "description": "Fraction of prior velocity retained each tick"
            },
            "noise": {
                "type": "number",
                "default": NOISE_DEFAULT,
                "min": NOISE_MIN,
                "max": NOISE_MAX,
                "step": NOISE_STEP,
                "description": "Amplitude of the per-tick random gradient perturbation"
            }
        })
    }
}

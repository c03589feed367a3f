//! Reproducible description of a simulation run.
//!
//! A [`RunRecipe`] captures everything needed to replay a run exactly:
//! PRNG seed, tick count, and optimizer parameter overrides. Two identical
//! recipes fed to the same binary produce identical event streams.

use crate::error::SimError;
use serde::{Deserialize, Serialize};

/// Reproducible description of a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunRecipe {
    /// Seed for landscape generation, start positions, and per-tick noise.
    pub seed: u64,
    /// Number of physics ticks to advance.
    pub ticks: u64,
    /// Optimizer parameter overrides as a JSON object.
    pub params: serde_json::Value,
}

impl RunRecipe {
    /// Creates a recipe with no parameter overrides and zero ticks.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ticks: 0,
            params: serde_json::Value::Object(serde_json::Map::new()),
        }
    }

    /// Parses a recipe from a JSON string and validates it.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let recipe: RunRecipe =
            serde_json::from_str(json).map_err(|e| SimError::InvalidRecipe(e.to_string()))?;
        recipe.validate()?;
        Ok(recipe)
    }

    /// Validates that `params` is a JSON object.
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.params.is_object() {
            return Err(SimError::InvalidRecipe(
                "params must be a JSON object".into(),
            ));
        }
        Ok(())
    }
}

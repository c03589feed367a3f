#![deny(unsafe_code)]
//! Procedurally generated loss landscape.
//!
//! A landscape is a scalar field over the (x, z) plane: a shallow quadratic
//! bowl, minus a handful of anisotropic Gaussian basins (exactly one of which
//! is the global minimum), plus two fixed-form trigonometric perturbation
//! terms. The perturbation is deterministic — the same landscape evaluates
//! identically every time; randomness exists only at generation.
//!
//! Gradients are estimated by central finite differences rather than an
//! analytic formula, keeping the evaluator generic over future field shapes
//! at the cost of four extra evaluations per call.

use descent_engine_core::error::SimError;
use descent_engine_core::heightmap::HeightMap;
use descent_engine_core::prng::Splitmix64;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Minimum number of basins per landscape.
const BASIN_COUNT_MIN: usize = 3;
/// Basin count is drawn uniformly from {3, 4, 5}.
const BASIN_COUNT_CHOICES: usize = 3;
/// Basin centers are sampled from (-CENTER_SPAN, CENTER_SPAN) on both axes.
const CENTER_SPAN: f64 = 2.1;
/// Regular basin depth range.
const DEPTH_MIN: f64 = 0.9;
const DEPTH_MAX: f64 = 1.6;
/// Regular basin spread range, per axis.
const SPREAD_MIN: f64 = 0.45;
const SPREAD_MAX: f64 = 0.80;
/// Global basin depth range — deep enough to dominate every regular basin.
const GLOBAL_DEPTH_MIN: f64 = 2.5;
const GLOBAL_DEPTH_MAX: f64 = 3.0;
/// Global basin spread range — wider than any regular basin can be.
const GLOBAL_SPREAD_MIN: f64 = 0.75;
const GLOBAL_SPREAD_MAX: f64 = 1.0;
/// First perturbation term amplitude range.
const NOISE_A_MIN: f64 = 0.07;
const NOISE_A_MAX: f64 = 0.14;
/// Second perturbation term amplitude range.
const NOISE_B_MIN: f64 = 0.06;
const NOISE_B_MAX: f64 = 0.11;
/// Shared perturbation frequency range.
const NOISE_FREQ_MIN: f64 = 1.6;
const NOISE_FREQ_MAX: f64 = 2.4;
/// Quadratic bowl coefficients.
const BOWL_X: f64 = 0.09;
const BOWL_Z: f64 = 0.07;
/// Central-difference step for gradient estimation.
const GRAD_EPS: f64 = 0.009;
/// Half-extent of the render domain sampled by [`Landscape::sample_heightmap`].
const RENDER_SPAN: f64 = 3.0;

/// One Gaussian basin: an anisotropic depression in the loss surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Basin {
    /// Center x coordinate.
    pub cx: f64,
    /// Center z coordinate.
    pub cz: f64,
    /// Depth of the depression at its center.
    pub depth: f64,
    /// Spread along the x axis.
    pub sx: f64,
    /// Spread along the z axis.
    pub sz: f64,
    /// Whether this basin is the landscape's global minimum.
    #[serde(default)]
    pub is_global: bool,
}

impl Basin {
    /// The basin's contribution at `(x, z)`: an anisotropic Gaussian bump.
    fn gauss(&self, x: f64, z: f64) -> f64 {
        let dx = x - self.cx;
        let dz = z - self.cz;
        let exponent =
            -(dx * dx) / (2.0 * self.sx * self.sx) - (dz * dz) / (2.0 * self.sz * self.sz);
        self.depth * exponent.exp()
    }

    /// Center as a vector.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.cx, self.cz)
    }
}

/// An immutable loss landscape: basins plus deterministic perturbation.
///
/// Generated once per run era and replaced atomically when the host requests
/// a new one. Exactly one basin carries `is_global`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landscape {
    pub basins: Vec<Basin>,
    /// Amplitude of the `sin(x·f)·cos(z·f)` perturbation term.
    pub noise_a: f64,
    /// Amplitude of the fixed-phase `sin(3.1x + 0.5)·sin(2.8z − 0.3)` term.
    pub noise_b: f64,
    /// Shared frequency of the first perturbation term.
    pub noise_freq: f64,
}

impl Landscape {
    /// Generates a randomized landscape from the given PRNG.
    ///
    /// Guarantees: basin count in {3, 4, 5}; exactly one global basin, with
    /// depth and spreads drawn from ranges strictly above the regular ones;
    /// all depths and spreads strictly positive; centers within ±2.1.
    pub fn generate(rng: &mut Splitmix64) -> Self {
        let count = BASIN_COUNT_MIN + rng.next_usize(BASIN_COUNT_CHOICES);
        let mut basins = Vec::with_capacity(count);
        for _ in 0..count {
            basins.push(Basin {
                cx: rng.next_bilateral(CENTER_SPAN),
                cz: rng.next_bilateral(CENTER_SPAN),
                depth: rng.next_range(DEPTH_MIN, DEPTH_MAX),
                sx: rng.next_range(SPREAD_MIN, SPREAD_MAX),
                sz: rng.next_range(SPREAD_MIN, SPREAD_MAX),
                is_global: false,
            });
        }

        let g = rng.next_usize(basins.len());
        basins[g].depth = rng.next_range(GLOBAL_DEPTH_MIN, GLOBAL_DEPTH_MAX);
        basins[g].sx = rng.next_range(GLOBAL_SPREAD_MIN, GLOBAL_SPREAD_MAX);
        basins[g].sz = rng.next_range(GLOBAL_SPREAD_MIN, GLOBAL_SPREAD_MAX);
        basins[g].is_global = true;

        Self {
            basins,
            noise_a: rng.next_range(NOISE_A_MIN, NOISE_A_MAX),
            noise_b: rng.next_range(NOISE_B_MIN, NOISE_B_MAX),
            noise_freq: rng.next_range(NOISE_FREQ_MIN, NOISE_FREQ_MAX),
        }
    }

    /// Validates the landscape invariants.
    ///
    /// Exactly one global basin; strictly positive depths and spreads;
    /// centers inside the generation domain.
    pub fn validate(&self) -> Result<(), SimError> {
        let globals = self.basins.iter().filter(|b| b.is_global).count();
        if globals != 1 {
            return Err(SimError::InvalidLandscape(format!(
                "expected exactly one global basin, found {globals}"
            )));
        }
        for (i, b) in self.basins.iter().enumerate() {
            if b.depth <= 0.0 || b.sx <= 0.0 || b.sz <= 0.0 {
                return Err(SimError::InvalidLandscape(format!(
                    "basin {i} has non-positive depth or spread"
                )));
            }
            if b.cx.abs() > CENTER_SPAN || b.cz.abs() > CENTER_SPAN {
                return Err(SimError::InvalidLandscape(format!(
                    "basin {i} center ({}, {}) outside ±{CENTER_SPAN}",
                    b.cx, b.cz
                )));
            }
        }
        Ok(())
    }

    /// The basin flagged as the global minimum, if present.
    pub fn global_basin(&self) -> Option<&Basin> {
        self.basins.iter().find(|b| b.is_global)
    }

    /// Evaluates the loss at `(x, z)`.
    pub fn loss(&self, x: f64, z: f64) -> f64 {
        let mut y = BOWL_X * x * x + BOWL_Z * z * z;
        for b in &self.basins {
            y -= b.gauss(x, z);
        }
        y += self.noise_a * (x * self.noise_freq).sin() * (z * self.noise_freq).cos();
        y += self.noise_b * (3.1 * x + 0.5).sin() * (2.8 * z - 0.3).sin();
        y
    }

    /// Estimates the gradient at `p` by central finite differences.
    pub fn gradient(&self, p: DVec2) -> DVec2 {
        let dx = (self.loss(p.x + GRAD_EPS, p.y) - self.loss(p.x - GRAD_EPS, p.y)) / (2.0 * GRAD_EPS);
        let dz = (self.loss(p.x, p.y + GRAD_EPS) - self.loss(p.x, p.y - GRAD_EPS)) / (2.0 * GRAD_EPS);
        DVec2::new(dx, dz)
    }

    /// Samples the loss over the render domain `[-3, 3]²` into a height map.
    ///
    /// Row `y` maps to z and column `x` maps to x, both linearly across the
    /// domain. Dimensions follow [`HeightMap::new`] validation.
    pub fn sample_heightmap(&self, width: usize, height: usize) -> Result<HeightMap, SimError> {
        HeightMap::from_fn(width, height, |x, y| {
            let tx = if width > 1 {
                x as f64 / (width - 1) as f64
            } else {
                0.5
            };
            let tz = if height > 1 {
                y as f64 / (height - 1) as f64
            } else {
                0.5
            };
            let wx = -RENDER_SPAN + 2.0 * RENDER_SPAN * tx;
            let wz = -RENDER_SPAN + 2.0 * RENDER_SPAN * tz;
            self.loss(wx, wz)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: a bare landscape with the given basins and no perturbation.
    fn flat_noise(basins: Vec<Basin>) -> Landscape {
        Landscape {
            basins,
            noise_a: 0.0,
            noise_b: 0.0,
            noise_freq: 1.0,
        }
    }

    /// Helper: a single global basin at the origin.
    fn origin_basin(depth: f64, spread: f64) -> Basin {
        Basin {
            cx: 0.0,
            cz: 0.0,
            depth,
            sx: spread,
            sz: spread,
            is_global: true,
        }
    }

    // ---- Generation tests ----

    #[test]
    fn generate_is_deterministic_for_same_seed() {
        let a = Landscape::generate(&mut Splitmix64::new(42));
        let b = Landscape::generate(&mut Splitmix64::new(42));
        assert_eq!(a, b);
    }

    #[test]
    fn generate_differs_across_seeds() {
        let a = Landscape::generate(&mut Splitmix64::new(1));
        let b = Landscape::generate(&mut Splitmix64::new(2));
        assert_ne!(a, b);
    }

    #[test]
    fn generated_basin_count_in_three_to_five() {
        for seed in 0..200 {
            let l = Landscape::generate(&mut Splitmix64::new(seed));
            assert!(
                (3..=5).contains(&l.basins.len()),
                "seed {seed}: {} basins",
                l.basins.len()
            );
        }
    }

    #[test]
    fn generated_landscape_has_exactly_one_global_basin() {
        for seed in 0..200 {
            let l = Landscape::generate(&mut Splitmix64::new(seed));
            let globals = l.basins.iter().filter(|b| b.is_global).count();
            assert_eq!(globals, 1, "seed {seed}");
        }
    }

    #[test]
    fn global_basin_is_deeper_than_every_regular_basin() {
        for seed in 0..200 {
            let l = Landscape::generate(&mut Splitmix64::new(seed));
            let global = l.global_basin().unwrap();
            assert!(global.depth >= GLOBAL_DEPTH_MIN, "seed {seed}");
            for b in l.basins.iter().filter(|b| !b.is_global) {
                assert!(b.depth < global.depth, "seed {seed}");
            }
        }
    }

    #[test]
    fn generated_values_respect_declared_ranges() {
        for seed in 0..100 {
            let l = Landscape::generate(&mut Splitmix64::new(seed));
            for b in &l.basins {
                assert!(b.cx.abs() <= CENTER_SPAN && b.cz.abs() <= CENTER_SPAN);
                if b.is_global {
                    assert!((GLOBAL_DEPTH_MIN..GLOBAL_DEPTH_MAX).contains(&b.depth));
                    assert!((GLOBAL_SPREAD_MIN..GLOBAL_SPREAD_MAX).contains(&b.sx));
                    assert!((GLOBAL_SPREAD_MIN..GLOBAL_SPREAD_MAX).contains(&b.sz));
                } else {
                    assert!((DEPTH_MIN..DEPTH_MAX).contains(&b.depth));
                    assert!((SPREAD_MIN..SPREAD_MAX).contains(&b.sx));
                    assert!((SPREAD_MIN..SPREAD_MAX).contains(&b.sz));
                }
            }
            assert!((NOISE_A_MIN..NOISE_A_MAX).contains(&l.noise_a));
            assert!((NOISE_B_MIN..NOISE_B_MAX).contains(&l.noise_b));
            assert!((NOISE_FREQ_MIN..NOISE_FREQ_MAX).contains(&l.noise_freq));
        }
    }

    // ---- Validation tests ----

    #[test]
    fn validate_accepts_generated_landscapes() {
        for seed in 0..100 {
            let l = Landscape::generate(&mut Splitmix64::new(seed));
            assert!(l.validate().is_ok(), "seed {seed}");
        }
    }

    #[test]
    fn validate_rejects_missing_global_basin() {
        let mut basin = origin_basin(1.0, 0.5);
        basin.is_global = false;
        let l = flat_noise(vec![basin]);
        assert!(l.validate().is_err());
    }

    #[test]
    fn validate_rejects_two_global_basins() {
        let l = flat_noise(vec![origin_basin(1.0, 0.5), origin_basin(2.0, 0.5)]);
        assert!(l.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_spread() {
        let mut basin = origin_basin(1.0, 0.5);
        basin.sx = 0.0;
        let l = flat_noise(vec![basin]);
        assert!(l.validate().is_err());
    }

    #[test]
    fn validate_rejects_center_outside_domain() {
        let mut basin = origin_basin(1.0, 0.5);
        basin.cx = 2.5;
        let l = flat_noise(vec![basin]);
        assert!(l.validate().is_err());
    }

    // ---- Evaluator tests ----

    #[test]
    fn loss_at_single_origin_basin_center_is_minus_depth() {
        let l = flat_noise(vec![origin_basin(3.0, 1.0)]);
        assert!((l.loss(0.0, 0.0) - (-3.0)).abs() < 1e-12);
    }

    #[test]
    fn loss_without_basins_is_the_quadratic_bowl() {
        let l = flat_noise(vec![]);
        assert!((l.loss(2.0, -1.0) - 0.43).abs() < 1e-12);
        assert!(l.loss(0.0, 0.0).abs() < 1e-12);
    }

    #[test]
    fn perturbation_terms_vanish_at_axis_origin_for_first_term() {
        // sin(0)·cos(0) = 0, so only the fixed-phase term contributes at the origin.
        let l = Landscape {
            basins: vec![],
            noise_a: 0.5,
            noise_b: 0.0,
            noise_freq: 2.0,
        };
        assert!(l.loss(0.0, 0.0).abs() < 1e-12);
    }

    #[test]
    fn gradient_matches_manual_central_difference() {
        let l = flat_noise(vec![origin_basin(3.0, 1.0)]);
        for &(x, z) in &[(1.0, 0.5), (-0.7, 1.3), (2.0, 2.0), (0.0, -1.0)] {
            let g = l.gradient(DVec2::new(x, z));
            let eps = 0.009;
            let dx = (l.loss(x + eps, z) - l.loss(x - eps, z)) / (2.0 * eps);
            let dz = (l.loss(x, z + eps) - l.loss(x, z - eps)) / (2.0 * eps);
            assert!((g.x - dx).abs() < 1e-12, "dx mismatch at ({x}, {z})");
            assert!((g.y - dz).abs() < 1e-12, "dz mismatch at ({x}, {z})");
        }
    }

    #[test]
    fn gradient_points_uphill_away_from_a_dominant_basin() {
        // Descent (−gradient) from (1, 0) must head back toward the origin.
        let l = flat_noise(vec![origin_basin(3.0, 1.0)]);
        let g = l.gradient(DVec2::new(1.0, 0.0));
        assert!(g.x > 0.0, "expected positive dx, got {}", g.x);
        assert!(g.y.abs() < 1e-9, "expected zero dz on axis, got {}", g.y);
        let g = l.gradient(DVec2::new(-1.0, 0.0));
        assert!(g.x < 0.0, "expected negative dx, got {}", g.x);
    }

    #[test]
    fn loss_is_finite_over_the_domain_for_generated_landscapes() {
        let l = Landscape::generate(&mut Splitmix64::new(7));
        let mut x = -3.0;
        while x <= 3.0 {
            let mut z = -3.0;
            while z <= 3.0 {
                assert!(l.loss(x, z).is_finite(), "loss not finite at ({x}, {z})");
                z += 0.25;
            }
            x += 0.25;
        }
    }

    // ---- Height map tests ----

    #[test]
    fn sample_heightmap_has_requested_dimensions() {
        let l = Landscape::generate(&mut Splitmix64::new(42));
        let map = l.sample_heightmap(64, 48).unwrap();
        assert_eq!(map.width(), 64);
        assert_eq!(map.height(), 48);
    }

    #[test]
    fn sample_heightmap_rejects_zero_dimensions() {
        let l = Landscape::generate(&mut Splitmix64::new(42));
        assert!(l.sample_heightmap(0, 32).is_err());
    }

    #[test]
    fn sample_heightmap_center_cell_sits_in_an_origin_basin() {
        let l = flat_noise(vec![origin_basin(3.0, 1.0)]);
        let map = l.sample_heightmap(65, 65).unwrap();
        let center = map.get(32, 32).unwrap();
        let corner = map.get(0, 0).unwrap();
        assert!((center - (-3.0)).abs() < 1e-12);
        assert!(corner > center, "corner {corner} should be above center {center}");
    }

    #[test]
    fn sample_heightmap_corners_cover_the_render_domain() {
        let l = flat_noise(vec![]);
        let map = l.sample_heightmap(3, 3).unwrap();
        // Corner (0, 0) is (−3, −3): bowl = 0.09·9 + 0.07·9.
        assert!((map.get(0, 0).unwrap() - (0.09 * 9.0 + 0.07 * 9.0)).abs() < 1e-12);
        assert!(map.get(1, 1).unwrap().abs() < 1e-12);
    }

    // ---- Serialization tests ----

    #[test]
    fn landscape_round_trips_through_json() {
        let l = Landscape::generate(&mut Splitmix64::new(42));
        let json = serde_json::to_string(&l).unwrap();
        let restored: Landscape = serde_json::from_str(&json).unwrap();
        assert_eq!(l, restored);
    }

    #[test]
    fn basin_is_global_defaults_to_false_when_absent() {
        let b: Basin = serde_json::from_str(
            r#"{"cx": 0.5, "cz": -0.5, "depth": 1.2, "sx": 0.6, "sz": 0.7}"#,
        )
        .unwrap();
        assert!(!b.is_global);
    }

    // ---- Property-based tests ----

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn generated_landscapes_always_validate(seed: u64) {
                let l = Landscape::generate(&mut Splitmix64::new(seed));
                prop_assert!(l.validate().is_ok());
            }

            #[test]
            fn exactly_one_global_basin_for_any_seed(seed: u64) {
                let l = Landscape::generate(&mut Splitmix64::new(seed));
                prop_assert_eq!(l.basins.iter().filter(|b| b.is_global).count(), 1);
            }

            #[test]
            fn gradient_is_finite_in_domain(
                seed: u64,
                x in -2.85_f64..2.85,
                z in -2.85_f64..2.85,
            ) {
                let l = Landscape::generate(&mut Splitmix64::new(seed));
                let g = l.gradient(DVec2::new(x, z));
                prop_assert!(g.x.is_finite() && g.y.is_finite());
            }

            #[test]
            fn finite_difference_identity_for_any_point(
                seed: u64,
                x in -2.85_f64..2.85,
                z in -2.85_f64..2.85,
            ) {
                let l = Landscape::generate(&mut Splitmix64::new(seed));
                let g = l.gradient(DVec2::new(x, z));
                let eps = 0.009;
                let dx = (l.loss(x + eps, z) - l.loss(x - eps, z)) / (2.0 * eps);
                prop_assert!((g.x - dx).abs() < 1e-12);
            }
        }
    }
}

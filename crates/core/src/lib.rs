#![deny(unsafe_code)]
//! Core types and traits for the descent-engine simulation system.
//!
//! Provides the `Simulation` trait, the host-facing `SimEvent` vocabulary,
//! the `Splitmix64` PRNG, the logical-clock `Schedule`, the `HeightMap`
//! sample grid, `Palette` color ramps, the `RunRecipe` replay description,
//! and parameter helpers.

pub mod clock;
pub mod error;
pub mod event;
pub mod heightmap;
pub mod palette;
pub mod params;
pub mod prng;
pub mod recipe;
pub mod sim;

pub use clock::Schedule;
pub use error::SimError;
pub use event::{ResetCause, SimEvent};
pub use heightmap::HeightMap;
pub use palette::{Palette, Srgb};
pub use prng::Splitmix64;
pub use recipe::RunRecipe;
pub use sim::Simulation;

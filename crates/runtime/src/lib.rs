#![deny(unsafe_code)]
//! Host glue for the descent-engine simulation.
//!
//! This crate sits between `descent-engine-core` (which defines the
//! `Simulation` trait) and the hosts that drive it. It provides the
//! per-frame scheduler that throttles physics to a sub-tick stride, the
//! control surface a UI or CLI binds to, and CPU-side PNG snapshots of a
//! landscape height map.

pub mod controls;
pub mod scheduler;
pub mod snapshot;

pub use controls::ControlSurface;
pub use scheduler::{FrameLoop, DEFAULT_STRIDE};

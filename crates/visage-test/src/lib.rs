//! Visage Test Harness - Deterministic simulation of the avatar shell
//!
//! This crate provides:
//! - A fixed-step frame simulator with per-frame invariant checks
//! - Timed control scripts, hand-written or randomized
//! - Scenario runs for the documented animation behaviors
//! - Criterion benches for the frame update and rasterization

pub mod scenarios;
pub mod simulator;

pub use scenarios::*;
pub use simulator::*;

//! Visage Face - The animated avatar face
//!
//! The face is a fixed scene graph (disc, border ring, two decorative rings,
//! a state pulse ring, two eyes, a mouth, circuit ornaments and six accent
//! dots) whose transforms and materials are mutated once per rendered frame.
//!
//! # Frame update
//!
//! Every frame runs, in order:
//! 1. Blink: randomized interval, 150 ms close, smoothed eye scale
//! 2. State branch: mouth, ring rotation and pulse ring per avatar state
//! 3. Head sway: slow rotation of the whole face
//! 4. Accent shimmer: per-dot opacity oscillation
//!
//! The only inputs are the avatar state, the resolved palette and the host
//! frame clock. Everything else is closed-form arithmetic.

pub mod blink;
pub mod config;
pub mod motion;
pub mod renderer;
pub mod rig;

pub use blink::*;
pub use config::*;
pub use motion::*;
pub use renderer::*;
pub use rig::*;

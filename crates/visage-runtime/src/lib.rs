//! Visage Runtime - The presentation shell
//!
//! The shell owns the avatar state and the theme, forwards both to the face
//! renderer, and produces a `ViewFrame` per frame:
//! 1. Advance the face (blink, state motion, head sway, shimmer)
//! 2. Snapshot the animated values
//! 3. Derive header, status indicator, visualizer and control panel
//!
//! Configuration and tracing setup live here too.

pub mod config;
pub mod overlay;
pub mod panel;
pub mod shell;
pub mod telemetry;

pub use config::*;
pub use overlay::*;
pub use panel::*;
pub use shell::*;
pub use telemetry::*;

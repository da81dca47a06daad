//! Visage Time - Frame clocks and deferred tasks
//!
//! This crate implements the host side of the animation clock:
//! - `FrameClock`: wall-clock driven, monotonic, with delta clamping
//! - `FixedStepClock`: deterministic fixed-rate clock for simulation
//! - `Scheduler`: cancellable deferred tasks polled against frame time

pub mod clock;
pub mod scheduler;

pub use clock::*;
pub use scheduler::*;

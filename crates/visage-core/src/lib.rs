//! Visage Core - Fundamental types shared by every Visage crate
//!
//! This crate defines:
//! - Avatar display states (idle, speaking, listening)
//! - Theme names, palettes and palette resolution with validation
//! - Colors (RGB + alpha) parsed from and formatted to hex notation
//! - Frame time samples supplied by the host clock
//! - The Visage error type

pub mod color;
pub mod error;
pub mod state;
pub mod theme;
pub mod time;

pub use color::*;
pub use error::*;
pub use state::*;
pub use theme::*;
pub use time::*;

//! Visage Term - Terminal render target
//!
//! Draws a `ViewFrame` into a true-color character grid:
//! - `Rasterizer`: forward-samples the scene graph with depth ordering
//! - `layout`: places header, status, visualizer, control panel and decor
//! - `Presenter`: writes the canvas with crossterm
//! - `input`: maps keys and mouse events to shell commands

pub mod canvas;
pub mod input;
pub mod layout;
pub mod presenter;
pub mod raster;

pub use canvas::*;
pub use input::*;
pub use layout::*;
pub use presenter::*;
pub use raster::*;

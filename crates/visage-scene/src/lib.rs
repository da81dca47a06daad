//! Visage Scene - The render-target side of the avatar
//!
//! A scene is a hierarchy of groups and meshes. Meshes pair a primitive
//! geometry (circle, ring, capsule, box) with a material (color, opacity,
//! metalness, roughness, emissive). Nodes are addressed by stable `NodeId`s
//! handed out at declaration time; animation mutates transforms and
//! materials through those ids every frame.
//!
//! Coordinates: x right, y up, z toward the viewer. Rotations are Euler
//! angles in radians applied in X, Y, Z order.

pub mod geometry;
pub mod graph;
pub mod material;
pub mod transform;

pub use geometry::*;
pub use graph::*;
pub use material::*;
pub use transform::*;

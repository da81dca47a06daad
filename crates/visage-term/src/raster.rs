//! Scene rasterizer
//!
//! Forward sampling: every visible mesh is sampled in its local plane, the
//! samples are mapped to world space through the node hierarchy and then to
//! cells with an orthographic projection. Meshes are painted back to front
//! by world depth; a translucent mesh is blended at most once per cell.

use tracing::trace;
use visage_core::{Rgba, VisageResult};
use visage_scene::{NodeId, SceneGraph, Vec3};

use crate::Canvas;

/// Orthographic view of the scene plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// World units covered by the region height
    pub world_height: f32,
    /// Cell height divided by cell width
    pub cell_aspect: f32,
    /// Samples per cell along the narrower axis
    pub oversample: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        // A camera 5 units out with a 50 degree vertical field of view
        Viewport {
            world_height: 2.0 * 5.0 * 25f32.to_radians().tan(),
            cell_aspect: 2.0,
            oversample: 2.0,
        }
    }
}

/// Canvas rectangle the scene is drawn into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Counters for one rasterization pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    pub meshes: usize,
    pub samples: usize,
    pub cells: usize,
}

/// Reusable rasterizer with its depth and coverage buffers
#[derive(Debug, Clone, Default)]
pub struct Rasterizer {
    viewport: Viewport,
    depth: Vec<f32>,
    stamp: Vec<u32>,
}

impl Rasterizer {
    pub fn new(viewport: Viewport) -> Self {
        Rasterizer {
            viewport,
            depth: Vec::new(),
            stamp: Vec::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// World units per cell as (column, row)
    pub fn cell_size(&self, region: Rect) -> (f32, f32) {
        let row = self.viewport.world_height / region.height.max(1) as f32;
        (row / self.viewport.cell_aspect, row)
    }

    /// Cell containing a world point, relative to the canvas
    pub fn project(&self, region: Rect, p: Vec3) -> (i32, i32) {
        let (unit_x, unit_y) = self.cell_size(region);
        let cx = region.x as i32 + region.width as i32 / 2;
        let cy = region.y as i32 + region.height as i32 / 2;
        (
            cx + (p.x / unit_x).round() as i32,
            cy - (p.y / unit_y).round() as i32,
        )
    }

    /// Paint every visible mesh of `scene` into `region` of `canvas`
    pub fn render(
        &mut self,
        scene: &SceneGraph,
        canvas: &mut Canvas,
        region: Rect,
    ) -> VisageResult<RasterStats> {
        let mut stats = RasterStats::default();
        if region.area() == 0 {
            return Ok(stats);
        }

        self.depth.clear();
        self.depth.resize(region.area(), f32::NEG_INFINITY);
        self.stamp.clear();
        self.stamp.resize(region.area(), 0);

        let mut order: Vec<(f32, NodeId)> = Vec::new();
        for (node, _) in scene.meshes() {
            if scene.is_visible(node.id)? {
                order.push((scene.to_world(node.id, Vec3::ZERO)?.z, node.id));
            }
        }
        // Stable: equal depths keep declaration order
        order.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (unit_x, unit_y) = self.cell_size(region);
        let world_step = unit_x.min(unit_y) / self.viewport.oversample.max(1.0);

        for (k, (_, id)) in order.into_iter().enumerate() {
            let stamp = k as u32 + 1;
            let material = scene.material(id)?;
            let opacity = material.effective_opacity();
            if opacity <= 0.0 {
                continue;
            }
            let paint = Rgba::new(material.shaded_color(), opacity);
            let Some(mesh) = scene.node(id)?.mesh() else {
                continue;
            };

            let origin = scene.to_world(id, Vec3::ZERO)?;
            let ex = scene.to_world(id, Vec3::new(1.0, 0.0, 0.0))? - origin;
            let ey = scene.to_world(id, Vec3::new(0.0, 1.0, 0.0))? - origin;
            let stretch = ex.length().max(ey.length());
            if stretch <= f32::EPSILON {
                continue;
            }

            stats.meshes += 1;
            for (lx, ly) in mesh.geometry.samples(world_step / stretch) {
                stats.samples += 1;
                let p = scene.to_world(id, Vec3::new(lx, ly, 0.0))?;
                let (col, row) = self.project(region, p);
                let (rx, ry) = (col - region.x as i32, row - region.y as i32);
                if rx < 0 || ry < 0 || rx >= region.width as i32 || ry >= region.height as i32 {
                    continue;
                }
                let idx = ry as usize * region.width as usize + rx as usize;
                if self.stamp[idx] == stamp || p.z + 1e-4 < self.depth[idx] {
                    continue;
                }
                self.stamp[idx] = stamp;
                self.depth[idx] = self.depth[idx].max(p.z);
                canvas.blend(col, row, paint);
                stats.cells += 1;
            }
        }

        trace!(?stats, "rasterized scene");
        Ok(stats)
    }
}

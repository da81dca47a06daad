//! Frame layout
//!
//! Places the face and the overlays of a `ViewFrame` on the canvas:
//!
//! ```text
//! ┌─                  VISAGE                  ─┐
//!            Animated Avatar Interface       ● STANDBY
//!
//!                   (face)
//!
//!               ▁▂▃▄▅▆▇█▇▆▅▄
//! [◯ IDLE] [◉ SPEAK] [◎ LISTEN] │ ● RUBY  ●●● SPECTRUM │ Current State: IDLE
//! └─                 hint text                ─┘
//! ```

use visage_core::{Color, Rgba, VisageResult};
use visage_runtime::{ButtonStyle, ControlId, Corner, ViewFrame, GRID_SPACING};

use crate::{Canvas, RasterStats, Rasterizer, Rect};

/// Nominal pixel size of a cell, used to scale pixel-based decor
pub const CELL_PX: (f32, f32) = (6.25, 12.5);

const BAR_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Rows reserved above and below the face
const HEADER_ROWS: u16 = 3;
const FOOTER_ROWS: u16 = 4;

/// Result of composing one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composed {
    pub raster: RasterStats,
    /// Clickable control rectangles
    pub controls: Vec<(Rect, ControlId)>,
}

impl Composed {
    /// Control under a canvas position
    pub fn hit(&self, x: u16, y: u16) -> Option<ControlId> {
        self.controls
            .iter()
            .find(|(r, _)| x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height)
            .map(|(_, id)| *id)
    }
}

/// Region the face is rasterized into
pub fn scene_region(width: u16, height: u16) -> Rect {
    let h = height.saturating_sub(HEADER_ROWS + FOOTER_ROWS);
    Rect::new(0, HEADER_ROWS.min(height), width, h)
}

/// Glyph for a bar of fractional height
pub fn bar_glyph(height: f32) -> char {
    let i = (height.clamp(0.0, 1.0) * (BAR_GLYPHS.len() - 1) as f32).round() as usize;
    BAR_GLYPHS[i]
}

/// Draw the whole frame
pub fn compose(
    view: &ViewFrame<'_>,
    canvas: &mut Canvas,
    raster: &mut Rasterizer,
) -> VisageResult<Composed> {
    let (w, h) = (canvas.width(), canvas.height());
    canvas.clear(view.palette.off_white);
    draw_background(view, canvas);

    let region = scene_region(w, h);
    let stats = raster.render(view.scene, canvas, region)?;

    draw_header(view, canvas);
    draw_status(view, canvas);
    draw_visualizer(view, canvas, region);
    let controls = draw_panel(view, canvas);
    draw_corners(view, canvas);

    Ok(Composed {
        raster: stats,
        controls,
    })
}

fn draw_background(view: &ViewFrame<'_>, canvas: &mut Canvas) {
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    let grid_x = (GRID_SPACING / CELL_PX.0).round().max(1.0) as i32;
    let grid_y = (GRID_SPACING / CELL_PX.1).round().max(1.0) as i32;

    for y in 0..h {
        for x in 0..w {
            let (fx, fy) = (x as f32 / w.max(1) as f32, y as f32 / h.max(1) as f32);
            for glow in &view.decor.glows {
                let d = ((fx - glow.center.0).powi(2) + (fy - glow.center.1).powi(2)).sqrt();
                // Fades out halfway to the far corner
                let falloff = (1.0 - d / 0.5).max(0.0);
                if falloff > 0.0 {
                    canvas.blend(x, y, Rgba::new(glow.color.color, glow.color.alpha * falloff));
                }
            }
            if x % grid_x == 0 || y % grid_y == 0 {
                canvas.blend(x, y, view.decor.grid);
            }
        }
    }
}

fn draw_header(view: &ViewFrame<'_>, canvas: &mut Canvas) {
    let cx = canvas.width() as i32 / 2;
    canvas.put_str_centered(cx, 0, view.header.title, view.header.title_color);
    canvas.put_str_centered(cx, 1, view.header.subtitle, view.header.accent);
}

fn draw_status(view: &ViewFrame<'_>, canvas: &mut Canvas) {
    let status = &view.status;
    let len = status.label.chars().count() as i32 + 2;
    let x = canvas.width() as i32 - len - 2;
    let bg = canvas.get(x, 1).map(|c| c.bg).unwrap_or(view.palette.off_white);
    let dot = Rgba::new(status.color, status.opacity).over(&bg);
    canvas.put_char(x, 1, '●', dot);
    canvas.put_str(x + 2, 1, status.label, status.color);
}

fn draw_visualizer(view: &ViewFrame<'_>, canvas: &mut Canvas, region: Rect) {
    if region.height == 0 {
        return;
    }
    let y = (region.y + region.height - 1) as i32;
    let n = view.visualizer.bars.len() as i32;
    let x0 = canvas.width() as i32 / 2 - n;
    for (i, bar) in view.visualizer.bars.iter().enumerate() {
        canvas.put_char(x0 + 2 * i as i32, y, bar_glyph(bar.height), bar.color);
    }
}

/// Paint a button and return its hit rectangle and the row it was drawn on.
/// A lifted button still answers on its resting row so hover stays put.
fn paint_button(
    canvas: &mut Canvas,
    x: i32,
    rest: i32,
    text: &str,
    style: &ButtonStyle,
) -> (Rect, i32) {
    let y = if style.lift > 0.0 { rest - 1 } else { rest };
    let start = x;
    let end = canvas.put_str(x, y, text, style.text);
    for col in start..end {
        canvas.blend(col, y, style.background);
    }
    if let Some(glow) = style.glow {
        canvas.blend(start - 1, y, glow);
        canvas.blend(end, y, glow);
    }
    let top = y.max(0);
    let rect = Rect::new(
        start.max(0) as u16,
        top as u16,
        (end - start).max(0) as u16,
        (rest - top + 1).max(1) as u16,
    );
    (rect, y)
}

fn draw_panel(view: &ViewFrame<'_>, canvas: &mut Canvas) -> Vec<(Rect, ControlId)> {
    let panel = &view.panel;
    let y = canvas.height() as i32 - 2;
    let mut controls = Vec::new();
    let mut x = 2;

    for button in &panel.state_buttons {
        let text = format!(" {} {} ", button.icon, button.label);
        let (rect, _) = paint_button(canvas, x, y, &text, &button.style);
        controls.push((rect, ControlId::State(button.state)));
        x += rect.width as i32 + 1;
    }

    x = canvas.put_str(x, y, "│ ", panel.outline.over(&view.palette.off_white));
    for button in &panel.theme_buttons {
        let swatches: String = button.swatches.iter().map(|_| '●').collect();
        let text = format!(" {} {} ", swatches, button.label);
        let (rect, row) = paint_button(canvas, x, y, &text, &button.style);
        // Recolor the swatch dots
        for (i, color) in button.swatches.iter().enumerate() {
            canvas.put_char(rect.x as i32 + 1 + i as i32, row, '●', *color);
        }
        if button.style.border.alpha > 0.0 {
            let edge = button.style.border.color;
            canvas.put_char(rect.x as i32, row, '[', edge);
            canvas.put_char((rect.x + rect.width) as i32 - 1, row, ']', edge);
        }
        controls.push((rect, ControlId::Theme(button.theme)));
        x += rect.width as i32 + 1;
    }

    let info = &panel.info;
    x = canvas.put_str(x, y, "│ ", panel.outline.over(&view.palette.off_white));
    x = canvas.put_str(x, y, info.heading, Color::from_rgb8(0x4A, 0x4A, 0x4A));
    canvas.put_str(x + 1, y, &info.value, info.value_color);
    canvas.put_str_centered(canvas.width() as i32 / 2, y + 1, info.hint, info.hint_color);

    controls
}

fn draw_corners(view: &ViewFrame<'_>, canvas: &mut Canvas) {
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    if w < 4 || h < 4 {
        return;
    }
    for bracket in &view.decor.corners {
        let (x, y, glyph, dx, dy) = match bracket.corner {
            Corner::TopLeft => (0, 0, '┌', 1, 1),
            Corner::TopRight => (w - 1, 0, '┐', -1, 1),
            Corner::BottomLeft => (0, h - 1, '└', 1, -1),
            Corner::BottomRight => (w - 1, h - 1, '┘', -1, -1),
        };
        canvas.put_char(x, y, glyph, bracket.horizontal);
        canvas.put_char(x + dx, y, '─', bracket.horizontal);
        canvas.put_char(x, y + dy, '│', bracket.vertical);
    }
}

//! Character canvas
//!
//! A grid of cells, each a glyph with foreground and background color. The
//! rasterizer paints backgrounds; overlays write glyphs on top.

use visage_core::{Color, Rgba};

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    pub fn blank(bg: Color) -> Self {
        Cell {
            ch: ' ',
            fg: Color::black(),
            bg,
        }
    }
}

/// Fixed-size cell grid, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16, bg: Color) -> Self {
        Canvas {
            width,
            height,
            cells: vec![Cell::blank(bg); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Reset every cell to a blank of `bg`
    pub fn clear(&mut self, bg: Color) {
        self.cells.fill(Cell::blank(bg));
    }

    /// Resize, discarding content
    pub fn resize(&mut self, width: u16, height: u16, bg: Color) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::blank(bg); width as usize * height as usize];
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Composite `color` over the cell background. Off-canvas writes are
    /// dropped.
    pub fn blend(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(cell) = self.get_mut(x, y) {
            cell.bg = color.over(&cell.bg);
        }
    }

    /// Set a glyph, keeping the background
    pub fn put_char(&mut self, x: i32, y: i32, ch: char, fg: Color) {
        if let Some(cell) = self.get_mut(x, y) {
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    /// Write text left to right, clipped at the edge. Returns the column
    /// after the last glyph.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, fg: Color) -> i32 {
        let mut col = x;
        for ch in text.chars() {
            self.put_char(col, y, ch, fg);
            col += 1;
        }
        col
    }

    /// Write text centered on `cx`
    pub fn put_str_centered(&mut self, cx: i32, y: i32, text: &str, fg: Color) {
        let len = text.chars().count() as i32;
        self.put_str(cx - len / 2, y, text, fg);
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Glyphs only, one line per row
    pub fn to_text(&self) -> String {
        self.rows()
            .map(|row| row.iter().map(|c| c.ch).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

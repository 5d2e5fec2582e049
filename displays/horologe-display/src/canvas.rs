//! Character-grid drawing surface
//!
//! Snaps every text run to a fixed grid of cells so a face can be rendered
//! to a terminal or inspected in tests.

use crate::backend::{DisplayError, DrawSurface, TextMeasure};
use crate::geometry::{Rect, TextBounds};
use crate::paint::{Color, Paint};

/// Number of character rows on the canvas
pub const CANVAS_ROWS: usize = 12;

/// Number of character columns on the canvas
pub const CANVAS_COLS: usize = 24;

const BLANK: u8 = b' ';

/// Character-grid surface
///
/// Each cell covers `cell_width` x `cell_height` surface pixels. Text is
/// ASCII only; it is placed on the row holding the pixel just above its
/// baseline and clipped at the canvas edges.
#[derive(Clone)]
pub struct TextCanvas {
    /// Cell contents, one ASCII byte per cell
    cells: [[u8; CANVAS_COLS]; CANVAS_ROWS],
    /// Paint of the last text drawn on each row
    paints: [Option<Paint>; CANVAS_ROWS],
    /// Last fill color
    background: Color,
    cell_width: u16,
    cell_height: u16,
    /// Whether anything was drawn since the last `mark_clean`
    dirty: bool,
}

impl TextCanvas {
    /// Create a blank canvas with the given cell size in pixels
    pub fn new(cell_width: u16, cell_height: u16) -> Self {
        Self {
            cells: [[BLANK; CANVAS_COLS]; CANVAS_ROWS],
            paints: [None; CANVAS_ROWS],
            background: Color::BLACK,
            cell_width: cell_width.max(1),
            cell_height: cell_height.max(1),
            dirty: true,
        }
    }

    /// Clear every cell
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            *row = [BLANK; CANVAS_COLS];
        }
        self.paints = [None; CANVAS_ROWS];
        self.dirty = true;
    }

    /// Get the content of a row, trailing blanks included
    pub fn get_line(&self, row: usize) -> Option<&str> {
        // Only ASCII is ever written to a cell
        self.cells
            .get(row)
            .map(|cells| core::str::from_utf8(cells).unwrap_or(""))
    }

    /// Get the content of a row with surrounding blanks trimmed
    pub fn text_at(&self, row: usize) -> &str {
        self.get_line(row).map(str::trim).unwrap_or("")
    }

    /// Paint used for the last text drawn on a row
    pub fn paint_at(&self, row: usize) -> Option<Paint> {
        self.paints.get(row).copied().flatten()
    }

    /// Last fill color
    pub fn background(&self) -> Color {
        self.background
    }

    /// Get all rows as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.cells
            .iter()
            .map(|cells| core::str::from_utf8(cells).unwrap_or(""))
    }

    /// Row holding the baseline `y`, if it lands on the canvas
    pub fn row_for_baseline(&self, y: f32) -> Option<usize> {
        let row = floor_div(y - 1.0, self.cell_height as f32);
        usize::try_from(row).ok().filter(|r| *r < CANVAS_ROWS)
    }

    /// Check if the canvas changed since it was last shown
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark canvas as clean (after showing it)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub const fn rows(&self) -> usize {
        CANVAS_ROWS
    }

    pub const fn cols(&self) -> usize {
        CANVAS_COLS
    }

    fn clear_cells(&mut self, rows: core::ops::Range<usize>, cols: core::ops::Range<usize>) {
        for row in rows {
            for col in cols.clone() {
                self.cells[row][col] = BLANK;
            }
        }
    }
}

impl Default for TextCanvas {
    fn default() -> Self {
        Self::new(16, 16)
    }
}

impl TextMeasure for TextCanvas {
    fn text_bounds(&self, text: &str, _paint: &Paint) -> TextBounds {
        // Every character takes exactly one cell regardless of text size
        let chars = text.chars().count() as f32;
        TextBounds {
            left: 0.0,
            width: chars * self.cell_width as f32,
            height: if text.is_empty() {
                0.0
            } else {
                self.cell_height as f32
            },
        }
    }
}

impl DrawSurface for TextCanvas {
    fn fill(&mut self, color: Color) -> Result<(), DisplayError> {
        self.clear();
        self.background = color;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DisplayError> {
        let bounds = self.clip_bounds();
        if rect.left <= bounds.left
            && rect.top <= bounds.top
            && rect.right >= bounds.right
            && rect.bottom >= bounds.bottom
        {
            return self.fill(color);
        }

        let cw = self.cell_width as i32;
        let ch = self.cell_height as i32;
        let col_start = (rect.left.max(0) / cw) as usize;
        let col_end = ((rect.right.max(0) + cw - 1) / cw).min(CANVAS_COLS as i32) as usize;
        let row_start = (rect.top.max(0) / ch) as usize;
        let row_end = ((rect.bottom.max(0) + ch - 1) / ch).min(CANVAS_ROWS as i32) as usize;
        if col_start < col_end && row_start < row_end {
            self.clear_cells(row_start..row_end, col_start..col_end);
        }
        self.dirty = true;
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        paint: &Paint,
    ) -> Result<(), DisplayError> {
        if !text.is_ascii() {
            return Err(DisplayError::UnsupportedText);
        }
        if x.is_nan() || y.is_nan() {
            return Err(DisplayError::InvalidCoordinates);
        }
        let row = self
            .row_for_baseline(y)
            .ok_or(DisplayError::InvalidCoordinates)?;

        let cw = self.cell_width as f32;
        let start = floor_div(x + cw / 2.0, cw);
        for (i, byte) in text.bytes().enumerate() {
            let col = start + i as i32;
            if (0..CANVAS_COLS as i32).contains(&col) {
                self.cells[row][col as usize] = byte;
            }
        }
        self.paints[row] = Some(*paint);
        self.dirty = true;
        Ok(())
    }

    fn clip_bounds(&self) -> Rect {
        Rect::from_size(
            CANVAS_COLS as i32 * self.cell_width as i32,
            CANVAS_ROWS as i32 * self.cell_height as i32,
        )
    }
}

/// Floor of `value / divisor` without `std` float intrinsics
fn floor_div(value: f32, divisor: f32) -> i32 {
    let q = value / divisor;
    let t = q as i32;
    if (t as f32) > q {
        t - 1
    } else {
        t
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TextCanvas {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "TextCanvas[");
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.trim_end());
        }
        defmt::write!(f, "]");
    }
}

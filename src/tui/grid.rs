//! Pixel ↔ cell mapping.
//!
//! Core geometry is in pixels; the terminal draws in cells. A `Grid` knows
//! the pixel size of one cell and converts both ways. Panels may sit partly
//! (or wholly) off-screen, so cell rectangles use signed coordinates and are
//! clipped to the frame only when drawn.

use ratatui::layout::Rect;

use crate::core::geometry::{Bounds, Viewport};

/// Width of the `[□]` button drawn at the right end of the title row.
pub const MAXIMIZE_BUTTON_WIDTH: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cell_width: i32,
    cell_height: i32,
}

impl Grid {
    pub fn new(cell_size: (u16, u16)) -> Self {
        Self {
            cell_width: i32::from(cell_size.0.max(1)),
            cell_height: i32::from(cell_size.1.max(1)),
        }
    }

    pub fn viewport(&self, cols: u16, rows: u16) -> Viewport {
        Viewport::new(
            i32::from(cols).saturating_mul(self.cell_width),
            i32::from(rows).saturating_mul(self.cell_height),
        )
    }

    /// Pixel position of the top-left corner of a cell.
    pub fn pointer(&self, col: u16, row: u16) -> (i32, i32) {
        (
            i32::from(col).saturating_mul(self.cell_width),
            i32::from(row).saturating_mul(self.cell_height),
        )
    }

    pub fn cells(&self, bounds: Bounds) -> CellRect {
        CellRect {
            x: bounds.x.div_euclid(self.cell_width),
            y: bounds.y.div_euclid(self.cell_height),
            width: (bounds.width / self.cell_width).max(1),
            height: (bounds.height / self.cell_height).max(1),
        }
    }
}

/// A panel's footprint in cells. May extend past any edge of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CellRect {
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn contains(&self, col: i32, row: i32) -> bool {
        col >= self.x && col < self.right() && row >= self.y && row < self.bottom()
    }

    /// Title row, excluding the maximize button when there is one.
    pub fn title_contains(&self, col: i32, row: i32, has_button: bool) -> bool {
        let end = if has_button {
            self.right() - 1 - MAXIMIZE_BUTTON_WIDTH
        } else {
            self.right()
        };
        row == self.y && col >= self.x && col < end
    }

    pub fn maximize_button_contains(&self, col: i32, row: i32) -> bool {
        let start = self.right() - 1 - MAXIMIZE_BUTTON_WIDTH;
        row == self.y && col >= start && col < self.right() - 1
    }

    pub fn resize_handle_contains(&self, col: i32, row: i32) -> bool {
        col == self.right() - 1 && row == self.bottom() - 1
    }

    /// The visible part of this rectangle within `area`.
    pub fn clip(&self, area: Rect) -> Option<Rect> {
        let left = self.x.max(i32::from(area.x));
        let top = self.y.max(i32::from(area.y));
        let right = self.right().min(i32::from(area.right()));
        let bottom = self.bottom().min(i32::from(area.bottom()));
        if left >= right || top >= bottom {
            return None;
        }
        Some(Rect::new(
            u16::try_from(left).ok()?,
            u16::try_from(top).ok()?,
            u16::try_from(right - left).ok()?,
            u16::try_from(bottom - top).ok()?,
        ))
    }
}

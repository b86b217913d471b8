//! Packed framebuffer - one byte per character cell
//!
//! Each byte holds a 2x2 quadrant occupancy mask in the low nibble and a colour
//! index in the high nibble. Rows are allocated on first write so a mostly-empty
//! sky costs nothing.
//!
//! Coordinates: `(row, col)` over the character grid, row 0 at the top.

use crate::types::{Color, DrawMode, QUAD_BOTTOM_LEFT, QUAD_FULL, QUAD_TOP_LEFT};

/// Decoded view of a packed byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PackedCell {
    /// Quadrant occupancy (0-15)
    pub mask: u8,
    /// Colour index (high nibble)
    pub color: u8,
}

impl PackedCell {
    pub const EMPTY: PackedCell = PackedCell { mask: 0, color: 0 };

    #[inline(always)]
    pub fn unpack(byte: u8) -> Self {
        Self {
            mask: byte & QUAD_FULL,
            color: byte >> 4,
        }
    }

    #[inline(always)]
    pub fn pack(self) -> u8 {
        (self.mask & QUAD_FULL) | (self.color << 4)
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }
}

/// Quadrant bit addressed by a half-cell position
///
/// Even/odd column picks left/right, even/odd row picks top/bottom. The
/// rasterizer (writer) and the collision sensor (reader) both go through this.
#[inline(always)]
pub fn quadrant_bit(half_x: i64, half_y: i64) -> u8 {
    let base = if half_y.rem_euclid(2) == 0 {
        QUAD_TOP_LEFT
    } else {
        QUAD_BOTTOM_LEFT
    };
    if half_x.rem_euclid(2) == 0 {
        base
    } else {
        base << 1
    }
}

/// Character cell containing a half-cell coordinate
#[inline(always)]
pub fn cell_of(half: i64) -> i64 {
    half.div_euclid(2)
}

/// Sparse 2D grid of packed cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedFrameBuffer {
    width: u16,
    height: u16,
    rows: Vec<Option<Box<[u8]>>>,
}

impl PackedFrameBuffer {
    /// Create an empty buffer; no row storage is allocated yet.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            rows: vec![None; height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Width of the field in half-cells
    pub fn half_width(&self) -> f64 {
        f64::from(self.width) * 2.0
    }

    /// Height of the field in half-cells
    pub fn half_height(&self) -> f64 {
        f64::from(self.height) * 2.0
    }

    /// Write quadrant bits into a cell.
    ///
    /// `Merge` stores `old | mask | color << 4`; `Toggle` stores `old ^ mask`.
    /// Indices outside the grid are ignored.
    pub fn set(&mut self, row: usize, col: usize, mask: u8, color: Color, mode: DrawMode) {
        if row >= self.height as usize || col >= self.width as usize {
            return;
        }
        let width = self.width as usize;
        let cells = self.rows[row].get_or_insert_with(|| vec![0u8; width].into_boxed_slice());
        let old = PackedCell::unpack(cells[col]);
        let new = match mode {
            DrawMode::Merge => PackedCell {
                mask: old.mask | (mask & QUAD_FULL),
                color: old.color | color.index(),
            },
            DrawMode::Toggle => PackedCell {
                mask: old.mask ^ (mask & QUAD_FULL),
                ..old
            },
        };
        cells[col] = new.pack();
    }

    /// Read a cell. Unallocated rows and out-of-range indices read as empty.
    pub fn get(&self, row: usize, col: usize) -> PackedCell {
        PackedCell::unpack(self.raw(row, col))
    }

    /// Raw stored byte, 0 when nothing was ever written there.
    #[inline(always)]
    pub(crate) fn raw(&self, row: usize, col: usize) -> u8 {
        self.row(row)
            .and_then(|cells| cells.get(col).copied())
            .unwrap_or(0)
    }

    /// A row's bytes, or `None` if the row was never written.
    pub(crate) fn row(&self, row: usize) -> Option<&[u8]> {
        self.rows.get(row).and_then(|r| r.as_deref())
    }

    /// Decoded cells of a row, or `None` if the row was never written.
    pub fn row_cells(&self, row: usize) -> Option<impl Iterator<Item = PackedCell> + '_> {
        self.row(row)
            .map(|cells| cells.iter().map(|&byte| PackedCell::unpack(byte)))
    }

    /// Number of rows that have storage.
    pub fn allocated_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }
}

//! Quadrant glyphs: packed cells to block characters
//!
//! Bit layout matches the packed buffer: top-left 1, top-right 2,
//! bottom-left 4, bottom-right 8.

use std::iter::repeat;

use log::warn;

use crate::core::{PackedCell, PackedFrameBuffer};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::Color;

/// Block character for every 4-bit quadrant mask
pub const GLYPHS: [char; 16] = [
    ' ', '▘', '▝', '▀', '▖', '▌', '▞', '▛', '▗', '▚', '▐', '▜', '▄', '▙', '▟', '█',
];

/// Shown in place of anything the table cannot render
pub const UNKNOWN_GLYPH: char = '?';

pub fn glyph_for(mask: u8) -> Option<char> {
    GLYPHS.get(mask as usize).copied()
}

/// Foreground colour for each colour index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub terrain: Rgb,
    pub accent_a: Rgb,
    pub accent_b: Rgb,
    pub black: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            terrain: Rgb::GREEN,
            accent_a: Rgb::YELLOW,
            accent_b: Rgb::RED,
            black: Rgb::BLACK,
        }
    }
}

impl Palette {
    pub fn rgb(&self, color: Color) -> Rgb {
        match color {
            Color::Terrain => self.terrain,
            Color::AccentA => self.accent_a,
            Color::AccentB => self.accent_b,
            Color::Black => self.black,
        }
    }

    /// Styled character for one packed cell.
    pub fn cell(&self, packed: PackedCell) -> Cell {
        let ch = glyph_for(packed.mask).unwrap_or_else(|| {
            warn!("no glyph for quadrant mask {:#04x}", packed.mask);
            UNKNOWN_GLYPH
        });
        let fg = match Color::from_index(packed.color) {
            // Accent-A and accent-B stripes merged into one cell.
            Some(Color::Black) if !packed.is_empty() => self.accent_b,
            Some(color) => self.rgb(color),
            None => {
                warn!("unknown colour index {}", packed.color);
                self.terrain
            }
        };
        Cell {
            ch,
            style: CellStyle::fg(fg),
        }
    }
}

/// Render `packed` into `fb`, with `decor` showing through wherever the packed
/// cell is empty. Empty cells are left untouched.
pub fn compose(
    packed: &PackedFrameBuffer,
    decor: Option<&PackedFrameBuffer>,
    fb: &mut FrameBuffer,
    palette: &Palette,
) {
    let rows = packed.height().min(fb.height());
    let cols = packed.width().min(fb.width());
    for y in 0..rows {
        let row = packed.row_cells(y as usize);
        let decor_row = decor.and_then(|d| d.row_cells(y as usize));
        if row.is_none() && decor_row.is_none() {
            continue;
        }
        let row = row.into_iter().flatten().chain(repeat(PackedCell::EMPTY));
        let decor_row = decor_row.into_iter().flatten().chain(repeat(PackedCell::EMPTY));
        for (x, (cell, under)) in (0..cols).zip(row.zip(decor_row)) {
            let cell = if cell.is_empty() { under } else { cell };
            if !cell.is_empty() {
                fb.set(x, y, palette.cell(cell));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DrawMode, QUAD_BOTTOM_HALF, QUAD_FULL, QUAD_TOP_LEFT};

    #[test]
    fn test_table_matches_quadrant_bits() {
        assert_eq!(glyph_for(0), Some(' '));
        assert_eq!(glyph_for(1), Some('▘'));
        assert_eq!(glyph_for(2), Some('▝'));
        assert_eq!(glyph_for(4), Some('▖'));
        assert_eq!(glyph_for(8), Some('▗'));
        assert_eq!(glyph_for(3), Some('▀'));
        assert_eq!(glyph_for(12), Some('▄'));
        assert_eq!(glyph_for(5), Some('▌'));
        assert_eq!(glyph_for(10), Some('▐'));
        assert_eq!(glyph_for(15), Some('█'));
        assert_eq!(glyph_for(16), None);
    }

    #[test]
    fn test_defects_render_placeholder_or_fallback_colour() {
        let palette = Palette::default();
        let cell = palette.cell(PackedCell { mask: 3, color: 9 });
        assert_eq!((cell.ch, cell.style.fg), ('▀', palette.terrain));
        let cell = palette.cell(PackedCell { mask: 16, color: 1 });
        assert_eq!((cell.ch, cell.style.fg), (UNKNOWN_GLYPH, palette.accent_a));
    }

    #[test]
    fn test_merged_marker_stripes_stay_visible() {
        let palette = Palette::default();
        let merged = Color::AccentA.index() | Color::AccentB.index();
        let cell = palette.cell(PackedCell { mask: QUAD_FULL, color: merged });
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, palette.accent_b);
        assert_ne!(cell.style.fg, cell.style.bg);
    }

    #[test]
    fn test_compose_colours_and_decor() {
        let mut packed = PackedFrameBuffer::new(4, 3);
        packed.set(1, 1, QUAD_BOTTOM_HALF, Color::Terrain, DrawMode::Merge);
        packed.set(2, 3, QUAD_TOP_LEFT, Color::AccentB, DrawMode::Merge);
        let mut decor = PackedFrameBuffer::new(4, 3);
        decor.set(1, 1, QUAD_FULL, Color::AccentA, DrawMode::Merge);
        decor.set(0, 0, QUAD_FULL, Color::AccentA, DrawMode::Merge);

        let mut fb = FrameBuffer::new(4, 3);
        compose(&packed, Some(&decor), &mut fb, &Palette::default());

        let c = fb.get(1, 1).unwrap_or_default();
        assert_eq!(c.ch, '▄');
        assert_eq!(c.style.fg, Rgb::GREEN);
        let c = fb.get(3, 2).unwrap_or_default();
        assert_eq!((c.ch, c.style.fg), ('▘', Rgb::RED));
        // Decor only where the collision layer is empty.
        let c = fb.get(0, 0).unwrap_or_default();
        assert_eq!((c.ch, c.style.fg), ('█', Rgb::YELLOW));
        assert_eq!(fb.get(2, 2).unwrap_or_default(), Cell::default());
    }
}

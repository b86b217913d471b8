//! Sub-cell line rasterizer
//!
//! Draws straight segments in half-cell space directly into a
//! [`PackedFrameBuffer`]. The walk is a parametric DDA: the axis with the larger
//! span advances by exactly one half-cell per step and the other axis by the
//! span ratio.
//!
//! Endpoints are normalised per axis (`x1 <= x2`, `y1 <= y2`), so a segment is
//! always walked as the rising diagonal of its bounding box. That makes A->B and
//! B->A touch identical quadrants, which is what lets `Toggle` erase a shape by
//! replaying it. The end point is exclusive and anything leaving the field
//! stops the walk without error.

use crate::packed::{cell_of, quadrant_bit, PackedFrameBuffer};
use crate::types::{Color, DrawMode};

/// A line segment in half-cell coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn draw(&self, fb: &mut PackedFrameBuffer, color: Color, mode: DrawMode) -> usize {
        draw_line(fb, self.x1, self.y1, self.x2, self.y2, color, mode)
    }
}

/// Rasterize a segment and return the number of cell writes issued.
pub fn draw_line(
    fb: &mut PackedFrameBuffer,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: Color,
    mode: DrawMode,
) -> usize {
    let (x1, x2) = if x2 < x1 { (x2, x1) } else { (x1, x2) };
    let (y1, y2) = if y2 < y1 { (y2, y1) } else { (y1, y2) };

    let (step_x, step_y) = steps(x2 - x1, y2 - y1);
    let max_x = fb.half_width();
    let max_y = fb.half_height();

    let mut x = x1;
    let mut y = y1;
    let mut prev: Option<(i64, i64, u8)> = None;
    let mut writes = 0;

    loop {
        if (x >= x2 && y >= y2) || x <= 0.0 || x >= max_x || y <= 0.0 || y >= max_y {
            break;
        }

        let hx = x.floor() as i64;
        let hy = y.floor() as i64;
        let target = (cell_of(hy), cell_of(hx), quadrant_bit(hx, hy));

        // Writing the same bit twice would cancel itself in toggle mode.
        if prev != Some(target) {
            let (row, col, bit) = target;
            fb.set(row as usize, col as usize, bit, color, mode);
            writes += 1;
        }
        prev = Some(target);

        x += step_x;
        y += step_y;
    }

    writes
}

/// Per-step advance for each axis. Zero-span axes never move.
fn steps(span_x: f64, span_y: f64) -> (f64, f64) {
    let (mut step_x, mut step_y) = if span_y > span_x {
        (span_x / span_y, 1.0)
    } else if span_x > 0.0 {
        (1.0, span_y / span_x)
    } else {
        (1.0, 0.0)
    };
    if span_x == 0.0 {
        step_x = 0.0;
    }
    if span_y == 0.0 {
        step_y = 0.0;
    }
    (step_x, step_y)
}

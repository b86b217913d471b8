//! Terrain contact sensors
//!
//! Collision reads the packed framebuffer directly. Each character cell holds
//! two half-rows, so "the half-row just below the craft" is sometimes the bottom
//! half of the craft's own cell and sometimes the top half of the next cell
//! down. The parity of the craft's integer Y picks the cell and the two-bit
//! sub-mask to test.

use crate::packed::{cell_of, PackedFrameBuffer};
use crate::terrain::Terrain;
use crate::types::{QUAD_BOTTOM_HALF, QUAD_TOP_HALF};

/// One cell row and the half of it to test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sensor {
    pub row: i64,
    pub mask: u8,
}

impl Sensor {
    /// Bits of the sensed half that are occupied at half-cell column `x`.
    /// Rows outside the buffer read as empty.
    pub fn read(&self, fb: &PackedFrameBuffer, x: f64) -> u8 {
        if self.row < 0 || x < 0.0 {
            return 0;
        }
        let col = cell_of(x.floor() as i64);
        fb.get(self.row as usize, col as usize).mask & self.mask
    }
}

/// What the craft is resting on after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Full-width contact over a recorded landing site
    Pad,
    /// Anything else: slopes, walls, partial pads, overhangs
    Terrain,
}

/// 1 when the craft's integer Y is even, 0 when odd.
fn odd_even(y: f64) -> i64 {
    (y.floor() as i64 + 1).rem_euclid(2)
}

/// Sensor for the half-row under the craft's feet.
pub fn below_sensor(y: f64) -> Sensor {
    let fy = y.floor() as i64;
    if odd_even(y) == 1 {
        Sensor {
            row: fy.div_euclid(2),
            mask: QUAD_BOTTOM_HALF,
        }
    } else {
        Sensor {
            row: (fy + 1).div_euclid(2),
            mask: QUAD_TOP_HALF,
        }
    }
}

/// Sensor for the half-row above the craft's cabin.
pub fn above_sensor(y: f64) -> Sensor {
    let fy = y.floor() as i64;
    if odd_even(y) == 0 {
        Sensor {
            row: (fy - 2).div_euclid(2),
            mask: QUAD_TOP_HALF,
        }
    } else {
        Sensor {
            row: (fy - 3).div_euclid(2),
            mask: QUAD_BOTTOM_HALF,
        }
    }
}

/// Classify contact under a craft at `(x, y)`.
///
/// Only a fully occupied half over a landing site counts as a pad; every other
/// nonzero read is terrain.
pub fn contact_below(fb: &PackedFrameBuffer, terrain: &Terrain, x: f64, y: f64) -> Option<Contact> {
    let sensor = below_sensor(y);
    let bits = sensor.read(fb, x);
    if bits == 0 {
        return None;
    }
    if bits == sensor.mask && terrain.site_at(x, y).is_some() {
        Some(Contact::Pad)
    } else {
        Some(Contact::Terrain)
    }
}

/// Whether anything overhangs the craft at `(x, y)`.
pub fn contact_above(fb: &PackedFrameBuffer, x: f64, y: f64) -> bool {
    above_sensor(y).read(fb, x) != 0
}

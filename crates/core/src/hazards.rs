//! Falling meteors
//!
//! Meteors live in cell coordinates (not half-cells) and fall straight down.
//! The level only sees them through [`HazardField`], so a headless run or a
//! test can pass [`NoHazards`] instead.

use log::debug;

use crate::rng::SimpleRng;
use crate::types::METEOR_MIN_COUNT;

/// Something that can hit the craft
pub trait HazardField {
    /// Move everything one tick forward.
    fn advance(&mut self);

    /// Test the craft at half-cell `(x, y)`; a hit consumes whatever struck it.
    fn strike(&mut self, x: f64, y: f64) -> bool;

    /// Live meteors, for drawing.
    fn meteors(&self) -> &[Meteor] {
        &[]
    }
}

/// Empty sky
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHazards;

impl HazardField for NoHazards {
    fn advance(&mut self) {}

    fn strike(&mut self, _x: f64, _y: f64) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meteor {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    /// Cells per tick
    pub speed: f64,
    /// Ticks left before the meteor burns out
    pub ttl: f64,
}

impl Meteor {
    /// Overlap with a craft at cell `(cx, cy)`.
    fn overlaps(&self, cx: f64, cy: f64) -> bool {
        cx + 0.75 >= self.x
            && cx <= self.x + self.size
            && cy + 1.0 >= self.y
            && cy - 1.0 <= self.y + self.size
    }
}

/// Meteor shower over a `width x height` cell field
#[derive(Debug, Clone)]
pub struct MeteorField {
    meteors: Vec<Meteor>,
    rng: SimpleRng,
    width: u16,
    height: u16,
}

impl MeteorField {
    pub fn new(width: u16, height: u16, seed: u32) -> Self {
        Self {
            meteors: Vec::new(),
            rng: SimpleRng::new(seed),
            width,
            height,
        }
    }

    fn spawn(&mut self) {
        let x = self.rng.next_f64() * f64::from(self.width) + 3.0;
        let size = self.rng.next_f64() * 2.0 + 1.0;
        let speed = self.rng.next_f64() * 0.01 + 0.02;
        let ttl = f64::from(self.height) * self.rng.next_f64() * 100.0;
        self.meteors.push(Meteor {
            x,
            y: 0.0,
            size,
            speed,
            ttl,
        });
    }
}

impl HazardField for MeteorField {
    fn advance(&mut self) {
        for meteor in &mut self.meteors {
            meteor.y += meteor.speed;
            meteor.ttl -= 1.0;
        }
        self.meteors.retain(|m| m.ttl >= 0.0);

        if self.meteors.len() < METEOR_MIN_COUNT || self.rng.next_f64() > 0.99 {
            self.spawn();
        }
    }

    fn strike(&mut self, x: f64, y: f64) -> bool {
        let (cx, cy) = (x / 2.0, y / 2.0);
        match self.meteors.iter().position(|m| m.overlaps(cx, cy)) {
            Some(idx) => {
                let meteor = self.meteors.remove(idx);
                debug!(
                    "meteor at ({:.1}, {:.1}) size {:.1} struck craft at ({x:.1}, {y:.1})",
                    meteor.x, meteor.y, meteor.size
                );
                true
            }
            None => false,
        }
    }

    fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }
}

//! Explosion particles
//!
//! The explosion is a countdown rather than a one-shot: while it is positive,
//! each tick emits one particle from the craft. It keeps counting down past
//! zero so the level can hold the wreck on screen until it reaches
//! [`EFFECT_FINISH_TICK`](crate::types::EFFECT_FINISH_TICK).

use crate::rng::SimpleRng;
use crate::types::EFFECT_FINISH_TICK;

/// Top particle speed in cells per tick
pub const PARTICLE_SPEED: f64 = 0.05;

/// Unit diagonals visited in turn by successive particles
const DIRECTIONS: [(f64, f64); 4] = [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)];

/// Cells a meteor-strike burst is pushed away from the craft
const STRIKE_OFFSET: f64 = 2.0;

/// One spark, in cell coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub ttl: f64,
}

#[derive(Debug, Clone)]
pub struct Explosion {
    countdown: i64,
    meteor_hit: bool,
    direction: usize,
    particles: Vec<Particle>,
}

impl Default for Explosion {
    fn default() -> Self {
        Self::new()
    }
}

impl Explosion {
    pub fn new() -> Self {
        Self {
            countdown: 0,
            meteor_hit: false,
            direction: 0,
            particles: Vec::new(),
        }
    }

    /// Restart the countdown at `ticks`. A meteor strike offsets new
    /// particles away from the craft.
    pub fn arm(&mut self, ticks: i64, meteor_hit: bool) {
        self.countdown = ticks;
        self.meteor_hit = meteor_hit;
    }

    pub fn countdown(&self) -> i64 {
        self.countdown
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn finished(&self) -> bool {
        self.countdown <= EFFECT_FINISH_TICK
    }

    /// Advance one tick with the craft at cell `(x, y)`.
    pub fn tick(&mut self, x: f64, y: f64, rng: &mut SimpleRng) {
        if self.countdown > 0 {
            self.direction = (self.direction + 1) % DIRECTIONS.len();
            let (ux, uy) = DIRECTIONS[self.direction];
            let mut spark = Particle {
                x,
                y,
                dx: ux * PARTICLE_SPEED * rng.next_f64(),
                dy: uy * PARTICLE_SPEED * rng.next_f64(),
                ttl: rng.next_range_f64(100.0, 600.0),
            };
            if self.meteor_hit {
                spark.x += STRIKE_OFFSET;
                spark.y += STRIKE_OFFSET;
            }
            self.particles.push(spark);
        }

        for p in &mut self.particles {
            p.x += p.dx;
            p.y += p.dy;
            p.ttl -= 1.0;
        }
        self.particles.retain(|p| p.ttl > 0.0);

        if self.finished() {
            self.particles.clear();
        }
        self.countdown = self.countdown.saturating_sub(1);
    }
}

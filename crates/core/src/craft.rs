//! Craft state and flight physics
//!
//! Positions are half-cell coordinates with y growing downward; `speed` is the
//! vertical speed in half-cells per tick (positive = falling).

use crate::packed::PackedFrameBuffer;
use crate::raster::Segment;
use crate::types::{
    Color, ControlInput, DrawMode, FuelRule, Resolution, BASE_GRAVITY, FUEL_BURN, GRAVITY_RAMP,
    LANDING_SPEED_DIVISOR, MAX_GRAVITY_FACTOR, START_FUEL, THRUST_FRACTION,
};

/// Physics tunables derived from the field height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    pub gravity_start: f64,
    pub gravity_increase: f64,
    /// Ceiling for the gravity accumulator and for falling speed
    pub max_gravity: f64,
    /// Ceiling for rising speed
    pub max_speed: f64,
    pub thrust_impulse: f64,
    pub max_landing_speed: f64,
    pub fuel_burn: f64,
    pub start_fuel: f64,
}

impl PhysicsConfig {
    /// Taller fields fall faster so a descent takes about the same time.
    pub fn for_height(height: u16) -> Self {
        let h = f64::from(height.max(1));
        let max_gravity = BASE_GRAVITY * h / 2.0 * MAX_GRAVITY_FACTOR;
        Self {
            gravity_start: BASE_GRAVITY,
            gravity_increase: BASE_GRAVITY / h * GRAVITY_RAMP,
            max_gravity,
            max_speed: max_gravity,
            thrust_impulse: max_gravity * THRUST_FRACTION,
            max_landing_speed: max_gravity / LANDING_SPEED_DIVISOR,
            fuel_burn: FUEL_BURN,
            start_fuel: START_FUEL,
        }
    }
}

/// Complete craft state for one flight
#[derive(Debug, Clone, PartialEq)]
pub struct CraftState {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub gravity: f64,
    pub fuel: f64,
    pub hits: u32,
    pub landed: bool,
    pub crashed: bool,
    /// Set by the first resolution; later ones are ignored
    pub resolved: bool,
}

impl CraftState {
    pub fn new(x: f64, y: f64, physics: &PhysicsConfig) -> Self {
        Self {
            x,
            y,
            speed: 0.0,
            gravity: physics.gravity_start,
            fuel: physics.start_fuel,
            hits: 0,
            landed: false,
            crashed: false,
            resolved: false,
        }
    }

    pub fn resolution(&self) -> Option<Resolution> {
        if self.landed {
            Some(Resolution::Landed)
        } else if self.crashed {
            Some(Resolution::Crashed)
        } else {
            None
        }
    }

    /// Latch a crash. Returns `Some` only if this call resolved the flight.
    pub fn crash(&mut self) -> Option<Resolution> {
        if self.resolved {
            return None;
        }
        self.resolved = true;
        self.crashed = true;
        Some(Resolution::Crashed)
    }

    /// Latch a touchdown: landed when slower than `max_landing_speed`,
    /// otherwise crashed.
    pub fn touch_down(&mut self, max_landing_speed: f64) -> Option<Resolution> {
        if self.resolved {
            return None;
        }
        if self.speed.abs() < max_landing_speed {
            self.resolved = true;
            self.landed = true;
            Some(Resolution::Landed)
        } else {
            self.crash()
        }
    }

    /// Whether thrust would fire this tick under `rule`.
    pub fn can_thrust(&self, rule: FuelRule) -> bool {
        match rule {
            FuelRule::Gated => self.fuel > 0.0,
            FuelRule::Ungated => true,
        }
    }

    /// One physics step. Returns whether thrust fired.
    ///
    /// A move that would leave `[0, half_w) x [0, half_h)` is undone as a whole.
    pub fn integrate(
        &mut self,
        input: ControlInput,
        physics: &PhysicsConfig,
        rule: FuelRule,
        half_w: f64,
        half_h: f64,
    ) -> bool {
        let (old_x, old_y) = (self.x, self.y);

        let fired = input.thrust && self.can_thrust(rule);
        if fired {
            self.fuel = (self.fuel - physics.fuel_burn).max(0.0);
            self.gravity = 0.0;
            self.speed = (self.speed - physics.thrust_impulse).max(-physics.max_speed);
        } else {
            self.gravity = (self.gravity + physics.gravity_increase).min(physics.max_gravity);
            self.speed = (self.speed + self.gravity).min(physics.max_gravity);
        }

        self.y += self.speed;
        self.x += f64::from(input.dx);

        if !in_field(self.x, self.y, half_w, half_h) {
            self.x = old_x;
            self.y = old_y;
        }
        fired
    }

    /// Debug flight: move by the raw input deltas, no gravity.
    pub fn free_move(&mut self, input: ControlInput, half_w: f64, half_h: f64) {
        let x = self.x + f64::from(input.dx);
        let y = self.y + f64::from(input.dy);
        if in_field(x, y, half_w, half_h) {
            self.x = x;
            self.y = y;
        }
    }

    /// Landing score: fuel left, discounted by speed and meteor hits.
    pub fn score(&self) -> f64 {
        (self.fuel + 1.0) / (self.speed + 1.0) / f64::from(self.hits + 1)
    }
}

fn in_field(x: f64, y: f64, half_w: f64, half_h: f64) -> bool {
    x >= 0.0 && x < half_w && y >= 0.0 && y < half_h
}

/// Craft outline anchored at the integer part of `(x, y)`: two legs, a body
/// line and a cabin line above it.
pub fn outline(x: f64, y: f64) -> [Segment; 4] {
    let x = x.trunc();
    let y = y.trunc();
    [
        Segment::new(x - 1.0, y - 1.0, x - 1.0, y + 1.0),
        Segment::new(x + 1.0, y - 1.0, x + 1.0, y + 1.0),
        Segment::new(x, y - 1.0, x + 1.0, y - 1.0),
        Segment::new(x, y - 2.0, x + 1.0, y - 2.0),
    ]
}

/// Draw (`Merge`) or erase (`Toggle`) the craft outline.
pub fn draw_craft(fb: &mut PackedFrameBuffer, x: f64, y: f64, mode: DrawMode) {
    for seg in outline(x, y) {
        seg.draw(fb, Color::AccentA, mode);
    }
}

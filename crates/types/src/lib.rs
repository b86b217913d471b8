//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core simulation, terminal rendering, input mapping).
//!
//! # Half-Cell Space
//!
//! The world is simulated at twice the resolution of the character grid on both
//! axes. A terminal of `width x height` cells is a field of
//! `width*2 x height*2` half-cells. Each character cell packs its four
//! half-cells ("quadrants") into the low nibble of one byte:
//!
//! | Quadrant | Bit |
//! |----------|-----|
//! | top-left | `1` |
//! | top-right | `2` |
//! | bottom-left | `4` |
//! | bottom-right | `8` |
//!
//! # Physics Constants
//!
//! Speeds are in half-cells per tick. Gravity values scale with the field
//! height (see `PhysicsConfig::for_height` in the core crate):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BASE_GRAVITY` | 0.000017 | Starting gravity accumulator |
//! | `GRAVITY_RAMP` | 0.005 | Per-tick gravity growth factor (divided by height) |
//! | `MAX_GRAVITY_FACTOR` | 50 | Terminal speed multiplier |
//! | `THRUST_FRACTION` | 0.01 | Thrust impulse as a fraction of terminal speed |
//! | `LANDING_SPEED_DIVISOR` | 4 | Safe landing speed is terminal speed / 4 |
//! | `START_FUEL` | 100 | Fuel at level start |
//! | `FUEL_BURN` | 0.5 | Fuel burned per thrust tick |
//!
//! # Examples
//!
//! ```
//! use lunar_lander_types::{Color, Difficulty, DrawMode, QUAD_BOTTOM_HALF};
//!
//! assert_eq!(Color::AccentB.index(), 2);
//! assert_eq!(Difficulty::from_str("structured"), Some(Difficulty::Structured));
//! assert_ne!(DrawMode::Merge, DrawMode::Toggle);
//! assert_eq!(QUAD_BOTTOM_HALF, 0b1100);
//! ```

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Top-left quadrant bit
pub const QUAD_TOP_LEFT: u8 = 1;

/// Top-right quadrant bit
pub const QUAD_TOP_RIGHT: u8 = 2;

/// Bottom-left quadrant bit
pub const QUAD_BOTTOM_LEFT: u8 = 4;

/// Bottom-right quadrant bit
pub const QUAD_BOTTOM_RIGHT: u8 = 8;

/// Both top quadrants
pub const QUAD_TOP_HALF: u8 = QUAD_TOP_LEFT | QUAD_TOP_RIGHT;

/// Both bottom quadrants
pub const QUAD_BOTTOM_HALF: u8 = QUAD_BOTTOM_LEFT | QUAD_BOTTOM_RIGHT;

/// All four quadrants
pub const QUAD_FULL: u8 = 0x0f;

/// Craft spawn position (half-cells)
pub const START_X: f64 = 10.0;
pub const START_Y: f64 = 10.0;

/// Starting gravity accumulator (half-cells per tick²)
pub const BASE_GRAVITY: f64 = 0.000017;

/// Gravity growth per tick is `BASE_GRAVITY / height * GRAVITY_RAMP`
pub const GRAVITY_RAMP: f64 = 0.005;

/// Terminal speed is `BASE_GRAVITY * height / 2 * MAX_GRAVITY_FACTOR`
pub const MAX_GRAVITY_FACTOR: f64 = 50.0;

/// Thrust impulse as a fraction of terminal speed
pub const THRUST_FRACTION: f64 = 0.01;

/// Safe landing speed is terminal speed divided by this
pub const LANDING_SPEED_DIVISOR: f64 = 4.0;

/// Fuel at level start
pub const START_FUEL: f64 = 100.0;

/// Fuel burned per thrust tick
pub const FUEL_BURN: f64 = 0.5;

/// Meteor strikes tolerated before the craft is lost
pub const PERMITTED_HITS: u32 = 3;

/// Speeds are shown multiplied by this in the HUD
pub const SPEED_DISPLAY_MULTIPLIER: f64 = 100_000.0;

/// Craft closer than this to the top or bottom edge (half-cells) is lost
pub const EDGE_MARGIN: f64 = 2.0;

/// A flat run must span at least this many columns to become a landing site
pub const MIN_LANDING_RUN: u32 = 7;

/// Rows of striped marker drawn beneath a landing site
pub const LANDING_MARKER_ROWS: i32 = 5;

/// Maximum vertical distance (half-cells) between craft and site level
pub const LANDING_PROXIMITY: f64 = 2.0;

/// Explosion countdown armed on a crash
pub const CRASH_BURST_TICKS: i64 = 40;

/// Explosion countdown armed on a meteor strike
pub const METEOR_BURST_TICKS: i64 = 10;

/// Countdown value at which a resolved level is finished
pub const EFFECT_FINISH_TICK: i64 = -200;

/// Ticks the thrust flame stays visible after a thrust input
pub const THRUST_DISPLAY_TICKS: u32 = 200;

/// Meteors are topped up while fewer than this exist
pub const METEOR_MIN_COUNT: usize = 5;

/// Colour index stored in the high nibble of a packed cell
///
/// - **Terrain**: landscape lines (green)
/// - **AccentA**: craft outline and landing stripes (yellow)
/// - **AccentB**: landing stripes (red)
/// - **Black**: erased / invisible
///
/// Merging ORs colour indices together, so `AccentA | AccentB` reads back as
/// `Black`. Where two landing stripes share a cell that is what gets stored;
/// the compositor draws such occupied cells in the accent-B colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Terrain,
    AccentA,
    AccentB,
    Black,
}

impl Color {
    /// Palette index (0-3)
    pub fn index(&self) -> u8 {
        match self {
            Color::Terrain => 0,
            Color::AccentA => 1,
            Color::AccentB => 2,
            Color::Black => 3,
        }
    }

    /// Inverse of [`Color::index`]
    ///
    /// ```
    /// use lunar_lander_types::Color;
    ///
    /// assert_eq!(Color::from_index(1), Some(Color::AccentA));
    /// assert_eq!(Color::from_index(4), None);
    /// ```
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Color::Terrain),
            1 => Some(Color::AccentA),
            2 => Some(Color::AccentB),
            3 => Some(Color::Black),
            _ => None,
        }
    }
}

/// Framebuffer write semantics
///
/// - **Merge**: OR the quadrant bits and colour into the cell
/// - **Toggle**: XOR the quadrant bits, leaving colour alone; replaying the
///   same geometry erases it exactly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Merge,
    Toggle,
}

/// Terrain layout selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    /// Single sine landscape, landing sites anywhere
    #[default]
    Easy,
    /// Sine landscape with sites only on the right and a decorative second ridge
    Rolling,
    /// Hand-placed walls and ledges with one pad
    Structured,
}

impl Difficulty {
    /// Parse difficulty from string (case-insensitive)
    ///
    /// ```
    /// use lunar_lander_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
    /// assert_eq!(Difficulty::from_str("hard"), Some(Difficulty::Structured));
    /// assert_eq!(Difficulty::from_str("nope"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "rolling" => Some(Difficulty::Rolling),
            "structured" | "hard" => Some(Difficulty::Structured),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Rolling => "rolling",
            Difficulty::Structured => "structured",
        }
    }
}

/// Whether thrust requires fuel in the tank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FuelRule {
    /// Thrust only fires while fuel remains
    #[default]
    Gated,
    /// Thrust always fires; fuel still drains to zero
    Ungated,
}

impl FuelRule {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gated" => Some(FuelRule::Gated),
            "ungated" => Some(FuelRule::Ungated),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelRule::Gated => "gated",
            FuelRule::Ungated => "ungated",
        }
    }
}

/// A discrete control event produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Fire the thruster
    Thrust,
    /// Thrust while also drifting left (shift+left)
    ThrustLeft,
    /// Thrust while also drifting right (shift+right)
    ThrustRight,
    /// Drift one half-cell left
    Left,
    /// Drift one half-cell right
    Right,
    /// Debug flight: move up
    Up,
    /// Debug flight: move down
    Down,
    /// Leave the level
    Menu,
}

/// Control input for a single tick
///
/// `Default` is the neutral input used when no event is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlInput {
    pub thrust: bool,
    /// Horizontal delta in half-cells (-1, 0 or +1)
    pub dx: i8,
    /// Vertical delta in half-cells, honoured only in debug flight
    pub dy: i8,
    pub menu: bool,
}

impl ControlInput {
    /// Fold a discrete event into this tick's input
    ///
    /// ```
    /// use lunar_lander_types::{ControlEvent, ControlInput};
    ///
    /// let mut input = ControlInput::default();
    /// input.apply(ControlEvent::ThrustLeft);
    /// assert!(input.thrust);
    /// assert_eq!(input.dx, -1);
    /// ```
    pub fn apply(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::Thrust => self.thrust = true,
            ControlEvent::ThrustLeft => {
                self.thrust = true;
                self.dx = -1;
            }
            ControlEvent::ThrustRight => {
                self.thrust = true;
                self.dx = 1;
            }
            ControlEvent::Left => self.dx = -1,
            ControlEvent::Right => self.dx = 1,
            ControlEvent::Up => self.dy = -1,
            ControlEvent::Down => self.dy = 1,
            ControlEvent::Menu => self.menu = true,
        }
    }
}

/// Terminal outcome of a flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Landed,
    Crashed,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Landed => "landed",
            Resolution::Crashed => "crashed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrant_bits_partition_the_cell() {
        assert_eq!(QUAD_TOP_HALF | QUAD_BOTTOM_HALF, QUAD_FULL);
        assert_eq!(QUAD_TOP_HALF & QUAD_BOTTOM_HALF, 0);
        for bit in [QUAD_TOP_LEFT, QUAD_TOP_RIGHT, QUAD_BOTTOM_LEFT, QUAD_BOTTOM_RIGHT] {
            assert_eq!(bit.count_ones(), 1);
        }
    }

    #[test]
    fn test_landing_run_threshold_is_more_than_six() {
        assert_eq!(MIN_LANDING_RUN, 7);
    }
}

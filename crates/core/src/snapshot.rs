use crate::collision::Contact;
use crate::types::{Resolution, SPEED_DISPLAY_MULTIPLIER};

/// Flight readout for the HUD, copied out of a [`Level`](crate::level::Level)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelSnapshot {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub max_landing_speed: f64,
    pub fuel: f64,
    pub hits: u32,
    pub permitted_hits: u32,
    pub resolution: Option<Resolution>,
    /// Only set after a landing
    pub score: Option<f64>,
    pub thrust_display: u32,
    pub contact: Option<Contact>,
    pub debug_flight: bool,
    pub finished: bool,
}

impl LevelSnapshot {
    /// Speed in display units
    pub fn display_speed(&self) -> f64 {
        self.speed * SPEED_DISPLAY_MULTIPLIER
    }

    /// Landing speed limit in display units
    pub fn display_max_landing_speed(&self) -> f64 {
        self.max_landing_speed * SPEED_DISPLAY_MULTIPLIER
    }
}

//! One level: terrain, craft and the per-tick flight loop
//!
//! [`Level::tick`] is the only entry point that advances time. It integrates
//! the craft, keeps its outline in the packed buffer, classifies contact with
//! the terrain and feeds meteor strikes into the craft state. Once the flight
//! is resolved the craft freezes and only the explosion keeps running, until
//! [`Level::finished`] reports that the wreck has been on screen long enough.

use log::{debug, info};

use crate::collision::{contact_above, contact_below, Contact};
use crate::craft::{draw_craft, CraftState, PhysicsConfig};
use crate::effects::Explosion;
use crate::hazards::HazardField;
use crate::packed::PackedFrameBuffer;
use crate::rng::SimpleRng;
use crate::snapshot::LevelSnapshot;
use crate::terrain::Terrain;
use crate::types::{
    ControlInput, Difficulty, DrawMode, FuelRule, Resolution, CRASH_BURST_TICKS, EDGE_MARGIN,
    METEOR_BURST_TICKS, PERMITTED_HITS, START_X, START_Y, THRUST_DISPLAY_TICKS,
};

/// Per-level settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelConfig {
    pub difficulty: Difficulty,
    pub fuel_rule: FuelRule,
    pub permitted_hits: u32,
    pub seed: u32,
    /// Gravity off, free vertical movement, contacts reported but not latched
    pub debug_flight: bool,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            fuel_rule: FuelRule::default(),
            permitted_hits: PERMITTED_HITS,
            seed: 1,
            debug_flight: false,
        }
    }
}

impl LevelConfig {
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_fuel_rule(mut self, fuel_rule: FuelRule) -> Self {
        self.fuel_rule = fuel_rule;
        self
    }

    pub fn with_permitted_hits(mut self, hits: u32) -> Self {
        self.permitted_hits = hits.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_debug_flight(mut self, on: bool) -> Self {
        self.debug_flight = on;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Level {
    config: LevelConfig,
    physics: PhysicsConfig,
    buffer: PackedFrameBuffer,
    terrain: Terrain,
    craft: CraftState,
    /// Where the outline currently sits in `buffer`
    drawn_at: Option<(f64, f64)>,
    explosion: Explosion,
    rng: SimpleRng,
    thrust_display: u32,
    ticks: u64,
    last_contact: Option<Contact>,
}

impl Level {
    /// Generate terrain for a `width x height` cell field and place the craft
    /// at its start position.
    pub fn new(width: u16, height: u16, config: LevelConfig) -> Self {
        let mut buffer = PackedFrameBuffer::new(width, height);
        let terrain = Terrain::generate(&mut buffer, config.difficulty);
        Self::from_parts(config, buffer, terrain)
    }

    /// Build a level over an already drawn buffer.
    pub fn from_parts(config: LevelConfig, buffer: PackedFrameBuffer, terrain: Terrain) -> Self {
        let physics = PhysicsConfig::for_height(buffer.height());
        info!(
            "level {}x{} difficulty={} fuel_rule={} hits={} seed={} debug_flight={}",
            buffer.width(),
            buffer.height(),
            config.difficulty.as_str(),
            config.fuel_rule.as_str(),
            config.permitted_hits,
            config.seed,
            config.debug_flight
        );
        Self {
            craft: CraftState::new(START_X, START_Y, &physics),
            physics,
            buffer,
            terrain,
            drawn_at: None,
            explosion: Explosion::new(),
            rng: SimpleRng::new(config.seed),
            thrust_display: 0,
            ticks: 0,
            last_contact: None,
            config,
        }
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    pub fn buffer(&self) -> &PackedFrameBuffer {
        &self.buffer
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn craft(&self) -> &CraftState {
        &self.craft
    }

    /// Direct access to the craft, for scripted starts.
    pub fn craft_mut(&mut self) -> &mut CraftState {
        &mut self.craft
    }

    pub fn explosion(&self) -> &Explosion {
        &self.explosion
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Resolved, and the explosion has run down to its finish mark.
    pub fn finished(&self) -> bool {
        self.craft.resolved && self.explosion.finished()
    }

    /// Advance one tick. Returns the resolution if this tick produced it.
    pub fn tick<H: HazardField>(&mut self, input: ControlInput, hazards: &mut H) -> Option<Resolution> {
        self.ticks += 1;
        hazards.advance();
        self.thrust_display = self.thrust_display.saturating_sub(1);

        let resolved = if self.craft.resolved {
            None
        } else if self.config.debug_flight {
            self.fly_debug(input);
            None
        } else {
            self.fly(input, hazards)
        };

        match resolved {
            Some(Resolution::Crashed) => self.explosion.arm(CRASH_BURST_TICKS, false),
            Some(Resolution::Landed) => self.explosion.arm(0, false),
            None => {}
        }
        if let Some(resolution) = resolved {
            info!(
                "craft {} at ({:.1}, {:.1}) speed={:.6} fuel={:.1} hits={} after {} ticks",
                resolution.as_str(),
                self.craft.x,
                self.craft.y,
                self.craft.speed,
                self.craft.fuel,
                self.craft.hits,
                self.ticks
            );
        }

        self.explosion
            .tick(self.craft.x / 2.0, self.craft.y / 2.0, &mut self.rng);
        resolved
    }

    fn fly<H: HazardField>(&mut self, input: ControlInput, hazards: &mut H) -> Option<Resolution> {
        let half_w = self.buffer.half_width();
        let half_h = self.buffer.half_height();

        if input.thrust {
            self.thrust_display = THRUST_DISPLAY_TICKS;
        }
        self.craft
            .integrate(input, &self.physics, self.config.fuel_rule, half_w, half_h);

        let (x, y) = (self.craft.x, self.craft.y);
        let mut resolved = None;

        if y >= half_h - EDGE_MARGIN || y <= EDGE_MARGIN {
            debug!("craft left the safe band at y={y:.2}");
            resolved = resolved.or(self.craft.crash());
        }

        // The outline must be gone before probing or the craft hits itself.
        if !self.craft.crashed {
            self.erase_outline();
        }

        match contact_below(&self.buffer, &self.terrain, x, y) {
            Some(Contact::Pad) => {
                debug!("pad contact at ({x:.1}, {y:.1}) speed={:.6}", self.craft.speed);
                resolved = resolved.or(self.craft.touch_down(self.physics.max_landing_speed));
            }
            Some(Contact::Terrain) => {
                debug!("terrain contact below ({x:.1}, {y:.1})");
                resolved = resolved.or(self.craft.crash());
            }
            None => {}
        }
        if contact_above(&self.buffer, x, y) {
            debug!("terrain contact above ({x:.1}, {y:.1})");
            resolved = resolved.or(self.craft.crash());
        }

        if !self.craft.crashed {
            self.draw_outline();
        }

        if !self.craft.resolved && hazards.strike(x, y) {
            self.craft.hits += 1;
            self.explosion.arm(METEOR_BURST_TICKS, true);
            debug!("meteor hit {}/{}", self.craft.hits, self.config.permitted_hits);
            if self.craft.hits >= self.config.permitted_hits {
                resolved = resolved.or(self.craft.crash());
            }
        }

        resolved
    }

    fn fly_debug(&mut self, input: ControlInput) {
        let half_w = self.buffer.half_width();
        let half_h = self.buffer.half_height();
        self.craft.free_move(input, half_w, half_h);
        self.erase_outline();

        let (x, y) = (self.craft.x, self.craft.y);
        let below = contact_below(&self.buffer, &self.terrain, x, y);
        let above = contact_above(&self.buffer, x, y).then_some(Contact::Terrain);
        let contact = below.or(above);
        if contact != self.last_contact {
            debug!("debug flight contact {:?} at ({x:.1}, {y:.1})", contact);
        }
        self.last_contact = contact;

        self.draw_outline();
    }

    fn erase_outline(&mut self) {
        if let Some((x, y)) = self.drawn_at.take() {
            draw_craft(&mut self.buffer, x, y, DrawMode::Toggle);
        }
    }

    fn draw_outline(&mut self) {
        draw_craft(&mut self.buffer, self.craft.x, self.craft.y, DrawMode::Merge);
        self.drawn_at = Some((self.craft.x, self.craft.y));
    }

    pub fn snapshot(&self) -> LevelSnapshot {
        LevelSnapshot {
            x: self.craft.x,
            y: self.craft.y,
            speed: self.craft.speed,
            max_landing_speed: self.physics.max_landing_speed,
            fuel: self.craft.fuel,
            hits: self.craft.hits,
            permitted_hits: self.config.permitted_hits,
            resolution: self.craft.resolution(),
            score: self.craft.landed.then(|| self.craft.score()),
            thrust_display: self.thrust_display,
            contact: self.last_contact,
            debug_flight: self.config.debug_flight,
            finished: self.finished(),
        }
    }
}

//! Core lander logic - pure, deterministic, and testable
//!
//! Everything the game knows about the world lives in a packed sub-cell
//! framebuffer: terrain is rasterized into it once, the craft outline is
//! drawn and erased in it every tick, and collision is answered by reading it
//! back. Nothing here touches the terminal, so the same level can run headless
//! in tests and benches.
//!
//! # Module Structure
//!
//! - [`packed`]: sparse grid of packed cells (2x2 quadrant mask + colour index)
//! - [`raster`]: DDA line rasterizer in half-cell space, merge and toggle modes
//! - [`terrain`]: sine, rolling and structured landscapes with landing-site detection
//! - [`craft`]: flight physics, latched landed/crashed resolution, outline
//! - [`collision`]: parity-aware sensors above and below the craft
//! - [`hazards`]: meteor shower behind the [`HazardField`] trait
//! - [`effects`]: explosion countdown and particles
//! - [`level`]: the per-tick loop tying all of the above together
//! - [`rng`]: seeded LCG for meteors and particles
//!
//! # Coordinates
//!
//! A terminal of `W x H` cells is a field of `2W x 2H` half-cells with y
//! growing downward. Craft position, terrain and landing sites use half-cells;
//! meteors and particles use cells.
//!
//! # Example
//!
//! ```
//! use lunar_lander_core::{Level, LevelConfig, NoHazards};
//! use lunar_lander_types::{ControlInput, Difficulty};
//!
//! let config = LevelConfig::default().with_difficulty(Difficulty::Easy);
//! let mut level = Level::new(80, 40, config);
//!
//! // Free fall until something happens.
//! let mut outcome = None;
//! while outcome.is_none() {
//!     outcome = level.tick(ControlInput::default(), &mut NoHazards);
//! }
//! assert!(level.craft().resolved);
//! ```
//!
//! # Timing
//!
//! One call to [`Level::tick`] is one fixed step of
//! [`TICK_MS`](lunar_lander_types::TICK_MS). All speeds are per tick.

pub mod collision;
pub mod craft;
pub mod effects;
pub mod hazards;
pub mod level;
pub mod packed;
pub mod raster;
pub mod rng;
pub mod snapshot;
pub mod terrain;

pub use lunar_lander_types as types;

// Re-export commonly used types for convenience
pub use collision::{contact_above, contact_below, Contact, Sensor};
pub use craft::{draw_craft, outline, CraftState, PhysicsConfig};
pub use effects::{Explosion, Particle};
pub use hazards::{HazardField, Meteor, MeteorField, NoHazards};
pub use level::{Level, LevelConfig};
pub use packed::{PackedCell, PackedFrameBuffer};
pub use raster::{draw_line, Segment};
pub use rng::SimpleRng;
pub use snapshot::LevelSnapshot;
pub use terrain::{LandingSite, RunTracker, Terrain};

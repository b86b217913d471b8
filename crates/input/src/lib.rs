//! Terminal input module (engine-facing).
//!
//! This module is independent of any rendering code. It maps `crossterm` key
//! events into [`crate::types::ControlEvent`] and turns them into one
//! [`crate::types::ControlInput`] per tick, including a held thruster for
//! terminals with and without key-release events.

pub mod handler;
pub mod map;

pub use lunar_lander_types as types;

pub use handler::{InputHandler, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
pub use map::{handle_key_event, is_thrust, should_quit};

//! Terminal "game renderer" module.
//!
//! Turns the packed quadrant buffer of a [`core::Level`] into block glyphs and
//! flushes them to the terminal. The view draws into a plain framebuffer of
//! styled cells and the renderer sends only what changed since the last frame.
//!
//! - [`glyph`]: quadrant mask to block character, colour index to palette
//! - [`game_view`]: terrain, craft, meteors, particles, flame and HUD
//! - [`renderer`]: raw mode, alternate screen and diffed output

pub mod fb;
pub mod game_view;
pub mod glyph;
pub mod renderer;

pub use lunar_lander_core as core;
pub use lunar_lander_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use glyph::{compose, glyph_for, Palette, GLYPHS};
pub use renderer::{encode_diff_into, encode_full_into, terminal_size, TerminalRenderer};

//! GameView: maps a `core::Level` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Level, LevelSnapshot, Meteor};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::glyph::{compose, Palette};
use crate::types::Resolution;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Flame glyph pairs for a craft on an odd column: shade/left-half variants.
const FLAME_ODD: [char; 6] = ['░', '▌', '▚', '▘', '▞', '▖'];
/// Flame glyph pairs for a craft on an even column.
const FLAME_EVEN: [char; 6] = ['▝', '░', '▐', '▚', '▗', '▞'];

/// Row of the result banner
const BANNER_ROW: u16 = 10;
const BANNER_COL: u16 = 5;

/// A lightweight terminal renderer for a lander level.
#[derive(Debug, Clone, Default)]
pub struct GameView {
    palette: Palette,
}

impl GameView {
    /// Render the level, its meteors and the HUD into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the
    /// viewport and fully redrawn.
    pub fn render_into(&self, level: &Level, meteors: &[Meteor], viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Default::default());

        compose(level.buffer(), level.terrain().decor.as_ref(), fb, &self.palette);

        let meteor_style = CellStyle::fg(Rgb::GREY);
        for m in meteors.iter().filter(|m| m.ttl > 0.0) {
            let size = m.size as i32;
            for py in 0..size {
                for px in 0..size {
                    fb.put_char_at(m.x as i32 + px, m.y as i32 + py, '*', meteor_style);
                }
            }
        }

        let spark_style = CellStyle::fg(self.palette.accent_b);
        for p in level.explosion().particles() {
            fb.put_char_at(p.x as i32, p.y as i32, '*', spark_style);
        }

        let snap = level.snapshot();
        if snap.thrust_display > 1 || snap.debug_flight {
            self.draw_flame(fb, &snap);
        }

        self.draw_hud(fb, &snap);
        self.draw_banner(fb, &snap);
    }

    fn draw_flame(&self, fb: &mut FrameBuffer, snap: &LevelSnapshot) {
        let x = snap.x.trunc() as i32;
        let y = snap.y.trunc() as i32;
        let row = y / 2 + 1;
        let col = (x - 1) / 2;

        let phase = (snap.thrust_display % 3) as usize * 2;
        let pairs = if x % 2 == 1 { &FLAME_ODD } else { &FLAME_EVEN };
        let style = CellStyle::fg(self.palette.accent_b);
        fb.put_char_at(col, row, pairs[phase], style);
        fb.put_char_at(col + 1, row, pairs[phase + 1], style);
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, snap: &LevelSnapshot) {
        let style = CellStyle::fg(self.palette.terrain);
        let mut line = format!(
            "Play lunar lander speed={:.1} maximum landing speed {:.0} fuel {:.0} hits {}/{}",
            snap.display_speed(),
            snap.display_max_landing_speed(),
            snap.fuel,
            snap.hits,
            snap.permitted_hits
        );
        if snap.debug_flight {
            let contact = match snap.contact {
                Some(c) => format!("{c:?}").to_lowercase(),
                None => "none".to_string(),
            };
            line.push_str(&format!(" [debug flight, contact {contact}]"));
        }
        let end = fb.put_str(0, 0, &line, style);
        for x in end..fb.width() {
            fb.put_char(x, 0, ' ', style);
        }
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, snap: &LevelSnapshot) {
        let text = match snap.resolution {
            Some(Resolution::Landed) => format!(
                "Well done. Score {:.0} speed was {:.1} fuel {:.0} hits {}",
                snap.score.unwrap_or_default(),
                snap.display_speed(),
                snap.fuel,
                snap.hits
            ),
            Some(Resolution::Crashed) => format!(
                "Crashed. Speed was {:.1} target speed {:.1} fuel {:.0} hits {}",
                snap.display_speed(),
                snap.display_max_landing_speed(),
                snap.fuel,
                snap.hits
            ),
            None => return,
        };
        let style = CellStyle::fg(self.palette.terrain).bold();
        fb.put_str(BANNER_COL, BANNER_ROW, &text, style);
        if snap.finished {
            fb.put_str(BANNER_COL, BANNER_ROW + 1, "Press any key", style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LevelConfig, NoHazards, PackedFrameBuffer, Terrain};
    use crate::types::{ControlInput, Difficulty};

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        (0..fb.width())
            .map(|x| fb.get(x, y).map(|c| c.ch).unwrap_or(' '))
            .collect()
    }

    fn sky_level() -> Level {
        let terrain = Terrain {
            sites: Vec::new(),
            decor: None,
        };
        Level::from_parts(LevelConfig::default(), PackedFrameBuffer::new(80, 24), terrain)
    }

    #[test]
    fn test_hud_on_first_row() {
        let level = Level::new(80, 24, LevelConfig::default().with_difficulty(Difficulty::Easy));
        let mut fb = FrameBuffer::new(1, 1);
        GameView::default().render_into(&level, &[], Viewport::new(80, 24), &mut fb);

        assert_eq!((fb.width(), fb.height()), (80, 24));
        let hud = row_text(&fb, 0);
        assert!(hud.starts_with("Play lunar lander speed=0.0"), "{hud}");
        assert!(hud.contains("fuel 100"));
    }

    #[test]
    fn test_terrain_is_drawn_with_block_glyphs() {
        let level = Level::new(80, 24, LevelConfig::default());
        let mut fb = FrameBuffer::new(80, 24);
        GameView::default().render_into(&level, &[], Viewport::new(80, 24), &mut fb);

        let blocks = fb
            .cells()
            .iter()
            .filter(|c| crate::glyph::GLYPHS[1..].contains(&c.ch))
            .count();
        assert!(blocks >= 80, "only {blocks} terrain cells");
    }

    #[test]
    fn test_meteors_are_stars() {
        let level = sky_level();
        let rock = Meteor {
            x: 40.2,
            y: 12.7,
            size: 2.5,
            speed: 0.02,
            ttl: 10.0,
        };
        let mut fb = FrameBuffer::new(80, 24);
        GameView::default().render_into(&level, &[rock], Viewport::new(80, 24), &mut fb);
        for (x, y) in [(40, 12), (41, 12), (40, 13), (41, 13)] {
            assert_eq!(fb.get(x, y).map(|c| c.ch), Some('*'));
        }
        assert_ne!(fb.get(42, 12).map(|c| c.ch), Some('*'));
    }

    #[test]
    fn test_flame_sits_under_the_craft() {
        let mut level = sky_level();
        level.craft_mut().x = 20.0;
        level.craft_mut().y = 20.0;
        let thrust = ControlInput {
            thrust: true,
            ..Default::default()
        };
        level.tick(thrust, &mut NoHazards);

        let mut fb = FrameBuffer::new(80, 24);
        GameView::default().render_into(&level, &[], Viewport::new(80, 24), &mut fb);
        let snap = level.snapshot();
        let row = (snap.y.trunc() as u16) / 2 + 1;
        let col = ((snap.x.trunc() as u16) - 1) / 2;
        let flame = fb.get(col, row).unwrap_or_default();
        assert_ne!(flame.ch, ' ');
        assert_eq!(flame.style.fg, Palette::default().accent_b);
    }

    #[test]
    fn test_crash_banner() {
        let mut level = sky_level();
        level.craft_mut().y = 1.5;
        level.tick(ControlInput::default(), &mut NoHazards);

        let mut fb = FrameBuffer::new(80, 24);
        GameView::default().render_into(&level, &[], Viewport::new(80, 24), &mut fb);
        assert!(row_text(&fb, BANNER_ROW).trim_start().starts_with("Crashed. Speed was"));
    }
}

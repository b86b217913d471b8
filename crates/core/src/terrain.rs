//! Terrain generation and landing-site detection
//!
//! Terrain is drawn once per level into the packed framebuffer with the
//! rasterizer. While the smooth variants scan their silhouette, a
//! [`RunTracker`] watches for flat stretches and turns long enough ones into
//! [`LandingSite`]s, each marked with a striped block under its surface.

use log::{debug, info};

use crate::packed::PackedFrameBuffer;
use crate::raster::{draw_line, Segment};
use crate::types::{
    Color, Difficulty, DrawMode, LANDING_MARKER_ROWS, LANDING_PROXIMITY, MIN_LANDING_RUN,
};

/// Angle advance per half-cell column of the sine ridge
pub const RIDGE_ANGLE_STEP: f64 = 0.025;

/// Stripe colours under a landing site, cycled row by row
const MARKER_COLORS: [Color; 4] = [Color::AccentA, Color::AccentB, Color::AccentB, Color::AccentA];

/// A flat span of terrain the craft may land on (half-cell units)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LandingSite {
    pub start: i32,
    pub end: i32,
    pub y: i32,
    /// Run length in columns
    pub points: u32,
}

impl LandingSite {
    /// Whether a craft at `(x, y)` sits over this site: strictly between
    /// `start` and `end`, and within [`LANDING_PROXIMITY`] of its level.
    pub fn accepts(&self, x: f64, y: f64) -> bool {
        x > f64::from(self.start)
            && x < f64::from(self.end)
            && (y - f64::from(self.y)).abs() < LANDING_PROXIMITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    start: i32,
    y: i32,
    points: u32,
}

/// Tracks runs of constant height across a left-to-right scan
///
/// A run is only closed when the height changes, so a flat stretch still open
/// at the right edge never becomes a site.
#[derive(Debug, Clone, Default)]
pub struct RunTracker {
    run: Option<Run>,
    /// Columns at or left of this are ignored
    detect_after: Option<f64>,
}

impl RunTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore every column up to and including `x`.
    pub fn detecting_after(x: f64) -> Self {
        Self {
            run: None,
            detect_after: Some(x),
        }
    }

    /// Feed the integer height at column `x`; returns a site when a long enough
    /// run just ended.
    pub fn push(&mut self, x: i32, y: i32) -> Option<LandingSite> {
        if self.detect_after.is_some_and(|after| f64::from(x) <= after) {
            self.run = None;
            return None;
        }

        match self.run.as_mut() {
            Some(run) if run.y == y => {
                run.points += 1;
                None
            }
            _ => {
                let finished = self.run.replace(Run {
                    start: x,
                    y,
                    points: 1,
                });
                finished
                    .filter(|run| run.points >= MIN_LANDING_RUN)
                    .map(|run| LandingSite {
                        start: run.start,
                        end: x - 1,
                        y: run.y,
                        points: run.points,
                    })
            }
        }
    }
}

/// Generated landscape for one level
#[derive(Debug, Clone)]
pub struct Terrain {
    pub sites: Vec<LandingSite>,
    /// Display-only layer (no collision, no sites)
    pub decor: Option<PackedFrameBuffer>,
}

impl Terrain {
    /// Draw the landscape for `difficulty` into `fb`.
    pub fn generate(fb: &mut PackedFrameBuffer, difficulty: Difficulty) -> Self {
        let terrain = match difficulty {
            Difficulty::Easy => Self {
                sites: sine_ridge(fb, RunTracker::new()),
                decor: None,
            },
            Difficulty::Rolling => {
                let after = f64::from(fb.width()) * 1.5;
                let sites = sine_ridge(fb, RunTracker::detecting_after(after));
                let mut decor = PackedFrameBuffer::new(fb.width(), fb.height());
                steep_ridge(&mut decor);
                Self {
                    sites,
                    decor: Some(decor),
                }
            }
            Difficulty::Structured => Self {
                sites: vec![structured(fb)],
                decor: None,
            },
        };

        info!(
            "generated {} terrain {}x{} with {} landing site(s)",
            difficulty.as_str(),
            fb.width(),
            fb.height(),
            terrain.sites.len()
        );
        terrain
    }

    /// First site accepting a craft at `(x, y)`.
    pub fn site_at(&self, x: f64, y: f64) -> Option<&LandingSite> {
        self.sites.iter().find(|site| site.accepts(x, y))
    }
}

/// Ridge height (half-cells) at a given sine phase
pub fn ridge_y(height: u16, angle: f64) -> f64 {
    let h = i32::from(height);
    f64::from(h) + angle.sin() * f64::from(h / 3) + f64::from(h / 2)
}

/// Draw the sine landscape and collect landing sites from it.
fn sine_ridge(fb: &mut PackedFrameBuffer, mut tracker: RunTracker) -> Vec<LandingSite> {
    let height = fb.height();
    let columns = i32::from(fb.width()) * 2;
    let mut sites = Vec::new();

    let mut angle = 0.0_f64;
    let (mut old_x, mut old_y) = (0.0, 0.0);
    for x in 0..columns {
        let y = ridge_y(height, angle);
        angle += RIDGE_ANGLE_STEP;
        draw_line(fb, old_x, old_y, f64::from(x), y, Color::Terrain, DrawMode::Merge);
        old_x = f64::from(x);
        old_y = y;

        if let Some(site) = tracker.push(x, y.floor() as i32) {
            debug!("landing site {:?}", site);
            draw_landing_marker(fb, &site);
            sites.push(site);
        }
    }
    sites
}

/// Second, steeper ridge used as decoration on the rolling layout.
fn steep_ridge(fb: &mut PackedFrameBuffer) {
    let height = fb.height();
    let columns = i32::from(fb.width()) * 2;
    let final_angle = f64::from(columns) * RIDGE_ANGLE_STEP;

    let mut old_x = 20.0;
    let mut old_y = ridge_y(height, final_angle) - 20.0;
    let mut angle = 0.0_f64;
    for x in 20..columns {
        let y = ridge_y(height, angle) - 30.0;
        angle += RIDGE_ANGLE_STEP;
        draw_line(fb, old_x, old_y, f64::from(x), y, Color::Terrain, DrawMode::Merge);
        old_x = f64::from(x);
        old_y = y;
    }
}

/// Walls, ledges and a shelf with a single pre-placed pad.
fn structured(fb: &mut PackedFrameBuffer) -> LandingSite {
    let h = fb.half_height();
    let w = fb.half_width();
    let pad_x = 50.0;
    let pad_y = h * 0.70;

    let segments = [
        Segment::new(21.0, h * 0.25, 21.0, h),
        Segment::new(21.0, h * 0.55, w * 0.5, h * 0.55),
        Segment::new(w * 0.65, h * 0.55, w, h * 0.55),
        Segment::new(w * 0.5, h * 0.80, 40.0, h * 0.80),
        Segment::new(1.0, h * 0.75, 10.0, h * 0.75),
        Segment::new(w * 0.5, h * 0.55, w * 0.5, h * 0.80),
        Segment::new(pad_x, pad_y, pad_x + 20.0, pad_y),
    ];

    let site = LandingSite {
        start: pad_x as i32,
        end: pad_x as i32 + 20,
        y: pad_y as i32,
        points: 10,
    };
    draw_landing_marker(fb, &site);

    for seg in &segments {
        seg.draw(fb, Color::Terrain, DrawMode::Merge);
        debug!("wall {:?}", seg);
    }
    site
}

/// Striped block under a site; the stripe phase follows the site's parity.
pub fn draw_landing_marker(fb: &mut PackedFrameBuffer, site: &LandingSite) {
    let mut idx = if site.y.rem_euclid(2) == 0 { 1 } else { 0 };
    let top = site.y + 1;
    for y in top..top + LANDING_MARKER_ROWS {
        draw_line(
            fb,
            f64::from(site.start),
            f64::from(y),
            f64::from(site.end),
            f64::from(y),
            MARKER_COLORS[idx],
            DrawMode::Merge,
        );
        idx = (idx + 1) % MARKER_COLORS.len();
    }
}

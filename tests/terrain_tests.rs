//! Terrain generation and landing-site tests

use lunar_lander::core::{LandingSite, PackedFrameBuffer, RunTracker, Terrain};
use lunar_lander::types::{Color, Difficulty, MIN_LANDING_RUN};

fn scan(heights: &[i32]) -> Vec<LandingSite> {
    let mut tracker = RunTracker::new();
    heights
        .iter()
        .enumerate()
        .filter_map(|(x, &y)| tracker.push(x as i32, y))
        .collect()
}

#[test]
fn test_seven_then_three_yields_exactly_one_site() {
    let sites = scan(&[5, 5, 5, 5, 5, 5, 5, 8, 8, 8]);
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].y, 5);
    assert_eq!(sites[0].points, MIN_LANDING_RUN);
    assert_eq!((sites[0].start, sites[0].end), (0, 6));
}

#[test]
fn test_run_threshold_boundary() {
    assert!(scan(&[2, 2, 2, 2, 2, 2, 4]).is_empty());
    assert_eq!(scan(&[2, 2, 2, 2, 2, 2, 2, 4]).len(), 1);
}

#[test]
fn test_easy_sites_lie_on_the_ridge() {
    let mut fb = PackedFrameBuffer::new(120, 40);
    let terrain = Terrain::generate(&mut fb, Difficulty::Easy);
    assert!(!terrain.sites.is_empty());
    assert!(terrain.decor.is_none());

    for site in &terrain.sites {
        assert!(site.points >= MIN_LANDING_RUN);
        assert!(site.end > site.start);
        // The surface cell over a site is occupied, and the marker under it
        // uses the accent colours.
        let mid = (site.start + site.end) / 2;
        let surface = fb.get((site.y / 2) as usize, (mid / 2) as usize);
        assert_ne!(surface.mask, 0, "{site:?}");
        let marker = fb.get((site.y / 2 + 2) as usize, (mid / 2) as usize);
        assert_ne!(marker.color, Color::Terrain.index(), "{site:?}");
    }
}

#[test]
fn test_sites_accept_craft_only_inside_and_near() {
    let site = LandingSite {
        start: 90,
        end: 120,
        y: 50,
        points: 31,
    };
    assert!(site.accepts(100.0, 50.0));
    assert!(site.accepts(119.5, 48.5));
    assert!(!site.accepts(90.0, 50.0));
    assert!(!site.accepts(120.0, 50.0));
    assert!(!site.accepts(100.0, 52.0));
    assert!(!site.accepts(100.0, 47.9));
}

#[test]
fn test_structured_layout_has_one_pad() {
    let mut fb = PackedFrameBuffer::new(80, 40);
    let terrain = Terrain::generate(&mut fb, Difficulty::Structured);
    assert_eq!(terrain.sites.len(), 1);
    let pad = terrain.sites[0];
    assert_eq!((pad.start, pad.end), (50, 70));
    assert_eq!(pad.y, 56);
    assert!(terrain.site_at(60.0, 56.0).is_some());
    assert!(terrain.site_at(75.0, 56.0).is_none());
}

#[test]
fn test_rolling_layout_keeps_decor_out_of_collision() {
    let mut plain = PackedFrameBuffer::new(80, 40);
    Terrain::generate(&mut plain, Difficulty::Easy);

    let mut rolling = PackedFrameBuffer::new(80, 40);
    let terrain = Terrain::generate(&mut rolling, Difficulty::Rolling);

    // Nothing beyond the plain ridge and its markers reaches the collision
    // layer; the steep ridge is decor only.
    for row in 0..40 {
        for col in 0..80 {
            let extra = rolling.get(row, col).mask & !plain.get(row, col).mask;
            assert_eq!(extra, 0, "row {row} col {col}");
        }
    }
    let decor = terrain.decor.as_ref().map(|d| d.allocated_rows()).unwrap_or(0);
    assert!(decor > 0);
    for site in &terrain.sites {
        assert!(f64::from(site.start) > 80.0 * 1.5);
    }
}

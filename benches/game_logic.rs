use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lunar_lander::core::{draw_line, Level, LevelConfig, MeteorField, PackedFrameBuffer, Terrain};
use lunar_lander::term::{FrameBuffer, GameView, Viewport};
use lunar_lander::types::{Color, ControlInput, Difficulty, DrawMode};

fn bench_tick(c: &mut Criterion) {
    let config = LevelConfig::default().with_seed(12345);
    let mut level = Level::new(120, 40, config);
    let mut meteors = MeteorField::new(120, 40, 12346);
    let hover = ControlInput {
        thrust: true,
        ..Default::default()
    };

    c.bench_function("level_tick", |b| {
        b.iter(|| {
            if level.craft().resolved {
                level = Level::new(120, 40, config);
            }
            level.tick(black_box(hover), &mut meteors);
        })
    });
}

fn bench_draw_toggle_pair(c: &mut Criterion) {
    let mut fb = PackedFrameBuffer::new(120, 40);
    Terrain::generate(&mut fb, Difficulty::Easy);

    c.bench_function("draw_line_toggle_pair", |b| {
        b.iter(|| {
            draw_line(&mut fb, black_box(3.0), 5.0, 220.0, 70.0, Color::AccentA, DrawMode::Toggle);
            draw_line(&mut fb, black_box(220.0), 70.0, 3.0, 5.0, Color::AccentA, DrawMode::Toggle);
        })
    });
}

fn bench_terrain(c: &mut Criterion) {
    c.bench_function("terrain_generate_rolling", |b| {
        b.iter(|| {
            let mut fb = PackedFrameBuffer::new(160, 50);
            Terrain::generate(&mut fb, black_box(Difficulty::Rolling))
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let level = Level::new(120, 40, LevelConfig::default());
    let view = GameView::default();
    let vp = Viewport::new(120, 40);
    let mut fb = FrameBuffer::new(120, 40);

    c.bench_function("game_view_render_into", |b| {
        b.iter(|| {
            view.render_into(black_box(&level), &[], vp, &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_draw_toggle_pair,
    bench_terrain,
    bench_render
);
criterion_main!(benches);

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use lunar_lander::core::{draw_line, Level, LevelConfig, NoHazards, PackedFrameBuffer, Terrain};
use lunar_lander::input::InputHandler;
use lunar_lander::types::{Color, ControlInput, Difficulty, DrawMode, TICK_MS};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

/// A level whose every buffer row already has storage.
fn warmed_level() -> Level {
    let mut fb = PackedFrameBuffer::new(80, 40);
    let terrain = Terrain::generate(&mut fb, Difficulty::Easy);
    // Toggling the same column twice leaves the cells as they were but
    // allocates every row on the way.
    let bottom = fb.half_height();
    for _ in 0..2 {
        draw_line(&mut fb, 1.0, 0.5, 1.0, bottom, Color::Black, DrawMode::Toggle);
    }
    assert_eq!(fb.allocated_rows(), 40);
    Level::from_parts(LevelConfig::default(), fb, terrain)
}

#[test]
fn flight_hot_path_does_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut level = warmed_level();
    let mut input = InputHandler::new(false);
    let mut hazards = NoHazards;

    // Warm-up.
    let _ = level.tick(ControlInput::default(), &mut hazards);

    let allocs = with_alloc_counting(|| {
        for i in 0..200 {
            if i % 10 == 0 {
                let _ = input.handle_key_press(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
                let _ = input.handle_key_press(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE));
            }
            let controls = input.next_input(TICK_MS);
            let _ = level.tick(controls, &mut hazards);
        }
    });

    assert!(!level.craft().resolved);
    assert!(allocs == 0);
}

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use match3::core::{BoardConfig, BoardSnapshot};
use match3::engine::{BoardEngine, TimedAnimator};
use match3::types::{Position, TICK_MS};

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

#[test]
fn idle_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let config = BoardConfig::default();
    let speed = config.move_speed;
    let mut engine = BoardEngine::new(config, TimedAnimator::new(speed)).unwrap();
    let mut snap = BoardSnapshot::default();

    // Warm-up: size the snapshot buffer and the event queue.
    engine.snapshot_into(&mut snap);
    engine.on_tile_clicked(Position::new(0, 0));
    engine.on_tile_clicked(Position::new(0, 0));
    let _ = engine.take_events();

    let allocs = with_alloc_counting(|| {
        // Idle frames, oracle queries and snapshots are per-frame work for a host.
        for _ in 0..200 {
            engine.tick(TICK_MS);
            let _ = engine.has_possible_moves();
            let _ = engine.find_move();
            engine.snapshot_into(&mut snap);
        }
    });

    assert_eq!(allocs, 0, "idle frame path allocated {} times", allocs);
}

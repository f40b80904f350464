//! Single-placement demo
//!
//! Simulates one AR session in single-placement mode: the reticle tracks a
//! simulated surface, one select event commits the object, and every later
//! select is ignored. Ends the session and shows the teardown state.

mod scripted;

use ar_engine::prelude::*;
use scripted::SimulatedProvider;

const FRAME_MS: f64 = 16.0;
const TOTAL_FRAMES: u64 = 60;

fn main() {
    env_logger::init();
    log::info!("single-placement demo starting");

    let config = EngineConfig {
        placement_mode: PlacementMode::Single,
        ..Default::default()
    };
    let mut session = Session::new(&config, SimulatedProvider::new(7));
    scripted::install_template(&mut session, &config);

    session.on_session_start();

    let mut clock = FrameClock::new();
    for frame in 0..TOTAL_FRAMES {
        clock.update();

        // Tap on frame 20, then keep tapping to show the no-op guard
        if frame == 20 || frame == 30 || frame == 40 {
            session.notify_select();
        }

        // Drive the animation timebase off the frame counter so runs are
        // reproducible; the wall clock is only reported at the end
        let output = session.render_frame(frame as f64 * FRAME_MS);
        if frame % 10 == 0 || !output.spawned.is_empty() {
            scripted::log_frame(frame, &output);
        }
        if !output.spawned.is_empty() {
            log::info!("object committed on frame {}", frame);
        }
    }

    let placed = session.context().registry.len();
    log::info!(
        "session produced {} committed object(s) over {} frames ({:.1} ms wall time)",
        placed,
        clock.frame_count(),
        clock.timestamp_ms()
    );
    assert_eq!(placed, 1, "single mode must commit exactly once");

    session.on_session_end();
    let ctx = session.context();
    log::info!(
        "after teardown: active={} hit_test_ready={} reticle_visible={}",
        ctx.state.active,
        ctx.state.hit_test_ready,
        ctx.controller.reticle().visible
    );
}

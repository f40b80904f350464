//! Repeated-placement demo
//!
//! Simulates one AR session in repeated-placement mode: each select event
//! spawns a new instance at the current reticle pose, and the control panel
//! commands change material, rotation axis, and lighting mid-session.

mod scripted;

use ar_engine::prelude::*;
use scripted::SimulatedProvider;

const FRAME_MS: f64 = 16.0;
const TOTAL_FRAMES: u64 = 120;

fn main() {
    env_logger::init();
    log::info!("repeated-placement demo starting");

    // Optional config file (TOML or RON) as the first argument; it may set
    // placement mode, animation toggles, lighting, and a template descriptor
    let mut config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(&path).unwrap_or_else(|err| {
            log::error!("config load failed ({}), using defaults", err);
            EngineConfig::default()
        }),
        None => EngineConfig::default(),
    };
    // This binary is the repeated-placement variant regardless of config
    config.placement_mode = PlacementMode::Repeated;

    let mut session = Session::new(&config, SimulatedProvider::new(42));
    scripted::install_template(&mut session, &config);
    let commands = CommandTable::with_default_bindings();

    session.on_session_start();

    for frame in 0..TOTAL_FRAMES {
        // A tap every 15 frames
        if frame > 0 && frame % 15 == 0 {
            session.notify_select();
        }

        // Fiddle with the control panel mid-session
        match frame {
            35 => dispatch(&commands, &mut session, "materialSelect", Some("gold")),
            50 => dispatch(&commands, &mut session, "rotationAxis", Some("z")),
            65 => dispatch(&commands, &mut session, "toggleJumpBtn", None),
            80 => dispatch(&commands, &mut session, "modelLightColor", Some("#00ff88")),
            _ => {}
        }

        let output = session.render_frame(frame as f64 * FRAME_MS);
        if frame % 15 == 0 || !output.spawned.is_empty() {
            scripted::log_frame(frame, &output);
        }
    }

    let spawned = session.context().registry.len();
    log::info!("session spawned {} instance(s)", spawned);

    session.on_session_end();
    let survivors = session
        .context()
        .registry
        .iter()
        .filter(|(_, instance)| instance.visible)
        .count();
    log::info!(
        "after teardown {} instance(s) remain visible (session-persistent)",
        survivors
    );
    assert_eq!(survivors, spawned, "repeated mode keeps instances on teardown");
}

fn dispatch(
    commands: &CommandTable,
    session: &mut Session<SimulatedProvider>,
    control: &str,
    value: Option<&str>,
) {
    match commands.dispatch(session.context_mut(), control, value) {
        Ok(command) => log::info!("control {:?} -> {:?}", control, command),
        Err(err) => log::error!("control dispatch failed: {}", err),
    }
}

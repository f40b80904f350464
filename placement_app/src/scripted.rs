//! Simulated hit-test provider for the demo binaries
//!
//! Stands in for the XR platform: setup resolves after a few frames, then
//! surface hits arrive with a little positional jitter, with short tracking
//! dropouts sprinkled in so the reticle visibly appears and disappears.

use ar_engine::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Frames of "pending" before the simulated platform grants a source
const SETUP_FRAMES: u32 = 3;

/// Every n-th frame the simulated tracking loses the surface
const DROPOUT_PERIOD: u64 = 7;

pub struct SimulatedProvider {
    rng: StdRng,
    setup_frames_left: u32,
    frame: u64,
    surface_height: f32,
}

impl SimulatedProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            setup_frames_left: SETUP_FRAMES,
            frame: 0,
            surface_height: -0.4,
        }
    }

    fn jittered_hit(&mut self) -> Pose {
        let x = self.rng.gen_range(-0.05..0.05);
        let z = -1.0 + self.rng.gen_range(-0.05..0.05);
        Pose::from_position(Vec3::new(x, self.surface_height, z))
    }
}

impl HitTestProvider for SimulatedProvider {
    fn poll_setup(&mut self) -> SetupState {
        if self.setup_frames_left > 0 {
            self.setup_frames_left -= 1;
            SetupState::Pending
        } else {
            SetupState::Ready
        }
    }

    fn hit_results(&mut self) -> Box<dyn Iterator<Item = Pose> + '_> {
        self.frame += 1;
        if self.frame % DROPOUT_PERIOD == 0 {
            // Tracking lost this frame
            return Box::new(std::iter::empty());
        }
        let hit = self.jittered_hit();
        Box::new(std::iter::once(hit))
    }

    fn discard_source(&mut self) {
        self.setup_frames_left = SETUP_FRAMES;
        self.frame = 0;
    }
}

/// Install the template the config names, or the built-in demo fallback
///
/// A descriptor that fails to load leaves the session without a template,
/// so placement confirms stay no-ops; the demo keeps running either way.
pub fn install_template<P: HitTestProvider>(session: &mut Session<P>, config: &EngineConfig) {
    match config.load_template() {
        Ok(Some(template)) => {
            log::info!("template loaded from descriptor: {}", template.name);
            session.install_template(template);
        }
        Ok(None) => session.install_template(PlaceableTemplate::new(
            "scene",
            "https://example.com/models/scene.gltf",
        )),
        Err(err) => log::error!("template load failed: {}", err),
    }
}

/// Print a one-line summary of a frame's draw commands
pub fn log_frame(frame: u64, output: &FrameOutput) {
    if output.reticle.visible {
        let p = output.reticle.pose.position;
        log::info!(
            "frame {:3}: reticle at ({:+.2}, {:+.2}, {:+.2}) opacity {:.2}, {} instance(s)",
            frame,
            p.x,
            p.y,
            p.z,
            output.reticle.opacity,
            output.instances.len()
        );
    } else {
        log::info!(
            "frame {:3}: reticle hidden, {} instance(s)",
            frame,
            output.instances.len()
        );
    }
}

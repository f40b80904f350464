//! AR session lifecycle and context
//!
//! One [`Session`] spans one immersive AR session on the platform. It owns
//! the [`SessionContext`] (controller, registry, animation and lighting
//! state) with an explicit initialization/teardown lifecycle, replacing the
//! module-level globals the pattern is usually written with. The hosting UI
//! drives it through three signals: session start, session end, and the
//! user-confirmation (select) event.

use crate::animation::AnimationSettings;
use crate::assets::PlaceableTemplate;
use crate::config::{EngineConfig, LightingConfig};
use crate::frame::{self, FrameInput, FrameOutput};
use crate::hittest::{HitTestProvider, HitTester, SetupState};
use crate::placement::PlacementController;
use crate::registry::ObjectRegistry;

/// Process-wide state bound to the AR session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    /// Whether an AR session is currently running
    pub active: bool,

    /// Whether the hit-test source has finished setup
    pub hit_test_ready: bool,
}

/// Everything one session mutates, gathered in one place
///
/// Created at session construction, torn down on session end. The render
/// loop is the only thread of control that touches it.
#[derive(Debug)]
pub struct SessionContext {
    /// Session lifecycle flags
    pub state: SessionState,

    /// Placement state machine
    pub controller: PlacementController,

    /// Spawned instance store
    pub registry: ObjectRegistry,

    /// Animation parameters, mutable via commands
    pub animation: AnimationSettings,

    /// Lighting state for the rendering collaborator, mutable via commands
    pub lighting: LightingConfig,

    /// Whether the hosting UI shows its controls panel
    pub controls_visible: bool,
}

impl SessionContext {
    /// Build a context from configuration
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            state: SessionState::default(),
            controller: PlacementController::new(config.placement_mode),
            registry: ObjectRegistry::new(),
            animation: config.animation.to_settings(),
            lighting: config.lighting,
            controls_visible: true,
        }
    }
}

/// One immersive AR session: provider, hit-test gate, and context
pub struct Session<P: HitTestProvider> {
    provider: P,
    hit_tester: HitTester,
    ctx: SessionContext,
    pending_selects: u32,
}

impl<P: HitTestProvider> Session<P> {
    /// Create a session from configuration and a platform hit-test provider
    pub fn new(config: &EngineConfig, provider: P) -> Self {
        Self {
            provider,
            hit_tester: HitTester::new(),
            ctx: SessionContext::new(config),
            pending_selects: 0,
        }
    }

    /// Install the placeable template once asset loading succeeds
    pub fn install_template(&mut self, template: PlaceableTemplate) {
        self.ctx.registry.set_template(template);
    }

    /// Shared view of the session context
    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// Mutable view of the session context (command dispatch target)
    pub fn context_mut(&mut self) -> &mut SessionContext {
        &mut self.ctx
    }

    /// Current hit-test setup state
    pub fn hit_test_state(&self) -> SetupState {
        self.hit_tester.state()
    }

    /// The platform started an AR session
    pub fn on_session_start(&mut self) {
        log::info!("AR session started");
        self.ctx.state.active = true;
    }

    /// The platform ended the AR session
    ///
    /// Synchronously tears down session state: the hit-test source is
    /// discarded, the reticle hidden, and the committed instance hidden in
    /// single-placement mode. Repeated-mode instances stay as they are.
    pub fn on_session_end(&mut self) {
        log::info!("AR session ended");
        self.hit_tester.reset(&mut self.provider);
        self.ctx.controller.end_session(&mut self.ctx.registry);
        self.ctx.state.active = false;
        self.ctx.state.hit_test_ready = false;
        self.pending_selects = 0;
    }

    /// A user select (tap) event arrived from the host input system
    ///
    /// Edge-triggered: each call is consumed by at most one frame. Selects
    /// outside an active session are dropped.
    pub fn notify_select(&mut self) {
        if self.ctx.state.active {
            self.pending_selects += 1;
        }
    }

    /// Run one render-loop iteration
    ///
    /// Polls the hit-test provider (frames before setup completes see no
    /// hit), drains pending select events, and advances the pure per-frame
    /// function. Returns the draw commands for the rendering collaborator.
    pub fn render_frame(&mut self, timestamp_ms: f64) -> FrameOutput {
        let hit = if self.ctx.state.active {
            self.hit_tester.first_hit(&mut self.provider)
        } else {
            None
        };
        self.ctx.state.hit_test_ready = self.hit_tester.is_ready();

        let confirms = std::mem::take(&mut self.pending_selects);
        frame::advance(
            FrameInput {
                timestamp_ms,
                hit,
                confirms,
            },
            &mut self.ctx,
        )
    }
}

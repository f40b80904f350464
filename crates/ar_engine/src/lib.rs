//! # AR Engine
//!
//! A surface-placement engine for immersive AR sessions: hit-test driven
//! reticle tracking and object spawning, with the rendering and XR device
//! layers kept behind narrow interfaces.
//!
//! ## Features
//!
//! - **Placement State Machine**: single and repeated placement modes
//! - **Hit-Test Gate**: non-blocking setup, permanent unsupported latch
//! - **Object Registry**: slotmap-keyed instances in spawn order
//! - **Frame Function**: the whole render callback as a pure function
//! - **Command Dispatch**: one table for all UI controls
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ar_engine::prelude::*;
//!
//! struct NoHits;
//!
//! impl HitTestProvider for NoHits {
//!     fn poll_setup(&mut self) -> SetupState {
//!         SetupState::Ready
//!     }
//!     fn hit_results(&mut self) -> Box<dyn Iterator<Item = Pose> + '_> {
//!         Box::new(std::iter::empty())
//!     }
//!     fn discard_source(&mut self) {}
//! }
//!
//! let config = EngineConfig::default();
//! let mut session = Session::new(&config, NoHits);
//! session.install_template(PlaceableTemplate::new("duck", "models/duck.gltf"));
//!
//! session.on_session_start();
//! let output = session.render_frame(16.0);
//! assert!(!output.reticle.visible);
//! session.on_session_end();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod animation;
pub mod assets;
pub mod commands;
pub mod config;
pub mod foundation;
pub mod frame;
pub mod hittest;
pub mod placement;
pub mod registry;
pub mod session;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        animation::{AnimationSettings, AnimationToggles, RotationAxis},
        assets::{MaterialKind, PlaceableTemplate, TemplateError},
        commands::{Command, CommandError, CommandTable},
        config::{ConfigError, EngineConfig, LightType, LightingConfig},
        foundation::{
            math::{Pose, Quat, Vec3},
            time::FrameClock,
        },
        frame::{FrameInput, FrameOutput, InstanceDraw, ReticleDraw},
        hittest::{HitTestProvider, HitTester, SetupState},
        placement::{PlacementController, PlacementMode, PlacementState, Reticle},
        registry::{InstanceKey, ObjectRegistry, PlacedInstance},
        session::{Session, SessionContext, SessionState},
    };
}

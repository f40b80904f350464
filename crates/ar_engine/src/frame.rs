//! Pure per-frame placement step
//!
//! `advance` is the whole render callback as a function of its inputs:
//! given a timestamp, this frame's best hit, and the drained select events,
//! it mutates the session context and returns the draw commands the
//! rendering collaborator needs. No XR or rendering stack is required to
//! exercise it, which is where the placement properties are tested.

use crate::animation;
use crate::assets::MaterialKind;
use crate::config::LightingConfig;
use crate::foundation::math::Pose;
use crate::registry::InstanceKey;
use crate::session::SessionContext;

/// Inputs for one render-loop iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Frame timestamp in milliseconds
    pub timestamp_ms: f64,

    /// Best surface hit this frame, if any
    pub hit: Option<Pose>,

    /// Select events drained since the previous frame
    pub confirms: u32,
}

/// Reticle draw command
///
/// Opacity pulses and hue cycles with the timestamp so the marker reads as
/// live tracking rather than a static decal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReticleDraw {
    /// Whether to draw the reticle at all
    pub visible: bool,

    /// Reticle pose (the accepted hit pose)
    pub pose: Pose,

    /// Pulsing opacity in [0.4, 1.0]
    pub opacity: f32,

    /// Cycling hue in [0, 1)
    pub hue: f32,
}

/// Draw command for one placed instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceDraw {
    /// Registry key of the instance
    pub key: InstanceKey,

    /// Animation-adjusted world pose
    pub pose: Pose,

    /// Uniform scale
    pub scale: f32,

    /// Whether the instance is currently visible
    pub visible: bool,

    /// Material variant to draw with (current template selection)
    pub material: MaterialKind,
}

/// Everything the rendering collaborator needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Reticle visibility, pose, and pulse parameters
    pub reticle: ReticleDraw,

    /// Placed instances in spawn order
    pub instances: Vec<InstanceDraw>,

    /// Lighting state as currently configured
    pub lighting: LightingConfig,

    /// Instances spawned by this frame's confirms
    pub spawned: Vec<InstanceKey>,
}

/// Advance the session by one frame
///
/// Order matters: placement update first (reticle follows this frame's
/// hit), then confirm handling (a select in the same frame the reticle
/// became visible is valid), then the animation step.
pub fn advance(input: FrameInput, ctx: &mut SessionContext) -> FrameOutput {
    ctx.controller.update(input.hit);

    let mut spawned = Vec::new();
    for _ in 0..input.confirms {
        if let Some(key) = ctx.controller.confirm(&mut ctx.registry) {
            spawned.push(key);
        }
    }

    animation::apply(&mut ctx.registry, &ctx.animation, input.timestamp_ms);

    let reticle = ctx.controller.reticle();
    let material = ctx.registry.current_material();
    let mut instances = Vec::with_capacity(ctx.registry.len());
    ctx.registry.for_each(|key, instance| {
        instances.push(InstanceDraw {
            key,
            pose: instance.pose,
            scale: instance.scale,
            visible: instance.visible,
            material,
        });
    });

    FrameOutput {
        reticle: ReticleDraw {
            visible: reticle.visible,
            pose: reticle.pose,
            opacity: 0.7 + 0.3 * (input.timestamp_ms * 0.005).sin() as f32,
            hue: ((input.timestamp_ms * 0.0005) % 1.0) as f32,
        },
        instances,
        lighting: ctx.lighting,
        spawned,
    }
}

//! Per-frame instance animation
//!
//! Runs after the placement update each frame. Reads every placed
//! instance's vertical anchor and the current timestamp, and writes back a
//! vertical oscillation offset plus a monotonic rotation increment about one
//! configured axis. The placement core is unaware of any of this; the
//! animation step only ever touches `pose.position.y` and `pose.rotation`.

use crate::foundation::math::{Quat, Unit, Vec3};
use crate::registry::ObjectRegistry;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Peak height of the jump oscillation, in meters
pub const JUMP_HEIGHT: f32 = 0.1;

/// Angular frequency of the jump oscillation, in radians per millisecond
pub const JUMP_SPEED: f64 = 0.005;

/// Per-instance phase offset, in milliseconds per spawn index
pub const PHASE_STEP_MS: f64 = 0.5;

/// Rotation increment per frame, in radians
pub const ROTATION_STEP: f32 = 0.01;

bitflags! {
    /// Independent animation switches
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AnimationToggles: u8 {
        /// Vertical sine-wave oscillation around the spawn height
        const JUMP = 1 << 0;
        /// Monotonic rotation about the configured axis
        const ROTATE = 1 << 1;
    }
}

impl Default for AnimationToggles {
    fn default() -> Self {
        Self::JUMP | Self::ROTATE
    }
}

/// World axis the rotation increment is applied about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RotationAxis {
    /// World X axis
    X,
    /// World Y axis (up)
    #[default]
    Y,
    /// World Z axis
    Z,
}

impl RotationAxis {
    /// Parse an axis name as it appears in UI control values
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "z" => Some(Self::Z),
            _ => None,
        }
    }

    /// Unit vector for this axis
    pub fn unit(self) -> Unit<Vec3> {
        match self {
            Self::X => Vec3::x_axis(),
            Self::Y => Vec3::y_axis(),
            Self::Z => Vec3::z_axis(),
        }
    }
}

/// Animation parameters for one session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    /// Which animations run
    pub toggles: AnimationToggles,

    /// Axis the rotation increment turns about
    pub axis: RotationAxis,

    /// Multiplier applied to oscillation frequency and rotation step
    pub speed: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            toggles: AnimationToggles::default(),
            axis: RotationAxis::Y,
            speed: 1.0,
        }
    }
}

impl AnimationSettings {
    /// Flip the jump toggle, returning the new state
    pub fn toggle_jump(&mut self) -> bool {
        self.toggles.toggle(AnimationToggles::JUMP);
        self.toggles.contains(AnimationToggles::JUMP)
    }

    /// Flip the rotation toggle, returning the new state
    pub fn toggle_rotation(&mut self) -> bool {
        self.toggles.toggle(AnimationToggles::ROTATE);
        self.toggles.contains(AnimationToggles::ROTATE)
    }
}

/// Vertical offset of an instance at the given timestamp
///
/// Instances are phased by spawn index so a row of spawns ripples instead of
/// bouncing in lockstep.
pub fn jump_offset(timestamp_ms: f64, spawn_index: usize, speed: f32) -> f32 {
    let phased = timestamp_ms + spawn_index as f64 * PHASE_STEP_MS;
    (phased * JUMP_SPEED * f64::from(speed)).sin() as f32 * JUMP_HEIGHT
}

/// Apply one animation step to every placed instance
///
/// Writes `pose.position.y` (relative to the spawn anchor) and
/// `pose.rotation` only; positions in the ground plane are never touched.
pub fn apply(registry: &mut ObjectRegistry, settings: &AnimationSettings, timestamp_ms: f64) {
    let jump = settings.toggles.contains(AnimationToggles::JUMP);
    let rotate = settings.toggles.contains(AnimationToggles::ROTATE);
    if registry.is_empty() {
        return;
    }

    let increment = Quat::from_axis_angle(&settings.axis.unit(), ROTATION_STEP * settings.speed);

    registry.for_each_mut(|index, instance| {
        if jump {
            instance.pose.position.y =
                instance.base_position_y + jump_offset(timestamp_ms, index, settings.speed);
        } else {
            instance.pose.position.y = instance.base_position_y;
        }

        if rotate {
            instance.pose.rotation = increment * instance.pose.rotation;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::PlaceableTemplate;
    use crate::foundation::math::Pose;
    use approx::assert_relative_eq;

    fn registry_with_instances(count: usize) -> ObjectRegistry {
        let mut registry = ObjectRegistry::new();
        registry.set_template(PlaceableTemplate::new("duck", "models/duck.gltf"));
        for i in 0..count {
            registry
                .spawn(Pose::from_position(Vec3::new(i as f32, 0.5, 0.0)))
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_jump_offset_matches_reference_curve() {
        // sin(t * 0.005) * 0.1 at t = 100ms for the first instance
        let expected = (100.0_f64 * 0.005).sin() as f32 * 0.1;
        assert_relative_eq!(jump_offset(100.0, 0, 1.0), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_jump_writes_offset_from_anchor() {
        let mut registry = registry_with_instances(1);
        let settings = AnimationSettings::default();

        apply(&mut registry, &settings, 100.0);

        let (_, instance) = registry.iter().next().unwrap();
        let expected = 0.5 + jump_offset(100.0, 0, 1.0);
        assert_relative_eq!(instance.pose.position.y, expected, epsilon = 1e-6);

        // Ground-plane position is untouched
        assert_eq!(instance.pose.position.x, 0.0);
        assert_eq!(instance.pose.position.z, 0.0);
    }

    #[test]
    fn test_disabled_jump_restores_anchor() {
        let mut registry = registry_with_instances(1);
        let mut settings = AnimationSettings::default();

        apply(&mut registry, &settings, 314.0);
        settings.toggle_jump();
        apply(&mut registry, &settings, 628.0);

        let (_, instance) = registry.iter().next().unwrap();
        assert_relative_eq!(instance.pose.position.y, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_instances_are_phase_offset() {
        let mut registry = registry_with_instances(2);
        let settings = AnimationSettings::default();

        apply(&mut registry, &settings, 100.0);

        let ys: Vec<f32> = registry.iter().map(|(_, i)| i.pose.position.y).collect();
        assert_relative_eq!(ys[0], 0.5 + jump_offset(100.0, 0, 1.0), epsilon = 1e-6);
        assert_relative_eq!(ys[1], 0.5 + jump_offset(100.0, 1, 1.0), epsilon = 1e-6);
        assert!(ys[0] != ys[1]);
    }

    #[test]
    fn test_rotation_accumulates_monotonically() {
        let mut registry = registry_with_instances(1);
        let mut settings = AnimationSettings::default();
        settings.toggles = AnimationToggles::ROTATE;

        for _ in 0..10 {
            apply(&mut registry, &settings, 0.0);
        }

        let (_, instance) = registry.iter().next().unwrap();
        let expected = Quat::from_axis_angle(&Vec3::y_axis(), ROTATION_STEP * 10.0);
        let dot = instance.pose.rotation.coords.dot(&expected.coords);
        assert!(dot.abs() > 0.9999, "rotation drifted: dot = {}", dot);
    }

    #[test]
    fn test_rotation_respects_configured_axis() {
        let mut registry = registry_with_instances(1);
        let mut settings = AnimationSettings::default();
        settings.toggles = AnimationToggles::ROTATE;
        settings.axis = RotationAxis::Z;

        apply(&mut registry, &settings, 0.0);

        let (_, instance) = registry.iter().next().unwrap();
        let expected = Quat::from_axis_angle(&Vec3::z_axis(), ROTATION_STEP);
        let dot = instance.pose.rotation.coords.dot(&expected.coords);
        assert!(dot.abs() > 0.9999);
    }

    #[test]
    fn test_speed_multiplier_scales_rotation() {
        let mut registry = registry_with_instances(1);
        let mut settings = AnimationSettings::default();
        settings.toggles = AnimationToggles::ROTATE;
        settings.speed = 2.0;

        apply(&mut registry, &settings, 0.0);

        let (_, instance) = registry.iter().next().unwrap();
        let expected = Quat::from_axis_angle(&Vec3::y_axis(), ROTATION_STEP * 2.0);
        let dot = instance.pose.rotation.coords.dot(&expected.coords);
        assert!(dot.abs() > 0.9999);
    }
}

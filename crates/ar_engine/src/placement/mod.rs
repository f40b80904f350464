//! Placement controller: reticle tracking and placement confirmation
//!
//! Per frame the controller consumes the best surface hit (if any), decides
//! reticle visibility and pose, and on a user select event commits object
//! instances at the reticle location. Two modes exist: single placement
//! (one committed object per session, reticle retired afterwards) and
//! repeated placement (unlimited spawns, reticle keeps tracking).

use crate::foundation::math::Pose;
use crate::registry::{InstanceKey, ObjectRegistry};
use serde::{Deserialize, Serialize};

/// How many objects a session may commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlacementMode {
    /// Exactly one committed object; the reticle is retired after commit
    Single,
    /// Unlimited spawns; the reticle keeps tracking between confirms
    #[default]
    Repeated,
}

/// Controller state, advanced once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementState {
    /// No valid hit this frame
    #[default]
    Idle,
    /// Valid hit present; reticle shown at the hit pose
    Tracking,
    /// Single mode only: placement confirmed, reticle retired for the session
    Committed,
}

/// Visual marker for the next placement location
///
/// Owned exclusively by the controller, mutated every frame, reused for the
/// whole session lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Reticle {
    /// Whether the marker should be drawn this frame
    pub visible: bool,

    /// Where the marker sits (last accepted hit pose)
    pub pose: Pose,
}

/// Placement state machine
#[derive(Debug, Default)]
pub struct PlacementController {
    mode: PlacementMode,
    state: PlacementState,
    reticle: Reticle,
    committed: Option<InstanceKey>,
}

impl PlacementController {
    /// Create a controller for the given mode
    pub fn new(mode: PlacementMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Placement mode this controller runs in
    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    /// Current controller state
    pub fn state(&self) -> PlacementState {
        self.state
    }

    /// Current reticle visibility and pose
    pub fn reticle(&self) -> Reticle {
        self.reticle
    }

    /// Key of the committed instance in single mode, if any
    pub fn committed_instance(&self) -> Option<InstanceKey> {
        self.committed
    }

    /// Per-frame update with this frame's best hit result
    ///
    /// An absent hit hides the reticle. A present hit shows it at the hit
    /// pose unless single mode has already committed, in which case the
    /// reticle stays retired for the rest of the session.
    pub fn update(&mut self, hit: Option<Pose>) {
        if self.state == PlacementState::Committed {
            // Single mode after commit: no further tracking needed
            self.reticle.visible = false;
            return;
        }

        match hit {
            Some(pose) => {
                self.reticle.visible = true;
                self.reticle.pose = pose;
                self.state = PlacementState::Tracking;
            }
            None => {
                self.reticle.visible = false;
                self.state = PlacementState::Idle;
            }
        }
    }

    /// Handle a user select event
    ///
    /// Valid only while the reticle is visible; a select with no active hit
    /// is silently ignored, as is a second select after a single-mode
    /// commit. Returns the spawned instance key when one was created.
    /// Spawning fails quietly when no template is loaded yet.
    pub fn confirm(&mut self, registry: &mut ObjectRegistry) -> Option<InstanceKey> {
        if !self.reticle.visible {
            return None;
        }

        let key = registry.spawn(self.reticle.pose)?;

        match self.mode {
            PlacementMode::Single => {
                self.committed = Some(key);
                self.reticle.visible = false;
                self.state = PlacementState::Committed;
                log::info!("object committed; reticle retired for this session");
            }
            PlacementMode::Repeated => {
                // State stays Tracking; the reticle remains eligible for
                // future frames
                log::debug!("spawned instance #{}", registry.len());
            }
        }

        Some(key)
    }

    /// Session teardown
    ///
    /// Hides the reticle, hides the committed instance in single mode, and
    /// returns to `Idle` so a later session can place again. Repeated-mode
    /// instances are left untouched (session-persistent by design).
    pub fn end_session(&mut self, registry: &mut ObjectRegistry) {
        self.reticle.visible = false;
        self.state = PlacementState::Idle;

        if self.mode == PlacementMode::Single {
            if let Some(key) = self.committed.take() {
                if let Some(instance) = registry.get_mut(key) {
                    instance.visible = false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::PlaceableTemplate;
    use crate::foundation::math::Vec3;

    fn registry() -> ObjectRegistry {
        let mut registry = ObjectRegistry::new();
        registry.set_template(PlaceableTemplate::new("duck", "models/duck.gltf"));
        registry
    }

    fn hit_at(x: f32) -> Pose {
        Pose::from_position(Vec3::new(x, 0.0, -1.0))
    }

    #[test]
    fn test_absent_hit_hides_reticle() {
        let mut controller = PlacementController::new(PlacementMode::Repeated);

        controller.update(Some(hit_at(1.0)));
        assert!(controller.reticle().visible);

        controller.update(None);
        assert!(!controller.reticle().visible);
        assert_eq!(controller.state(), PlacementState::Idle);
    }

    #[test]
    fn test_reticle_carries_hit_pose_exactly() {
        let mut controller = PlacementController::new(PlacementMode::Repeated);
        let pose = Pose::from_position_rotation(
            Vec3::new(0.3, -0.1, -2.0),
            crate::foundation::math::Quat::from_axis_angle(&Vec3::y_axis(), 0.4),
        );

        controller.update(Some(pose));

        assert_eq!(controller.reticle().pose, pose);
        assert_eq!(controller.state(), PlacementState::Tracking);
    }

    #[test]
    fn test_single_mode_commits_exactly_once() {
        let mut controller = PlacementController::new(PlacementMode::Single);
        let mut registry = registry();

        controller.update(Some(hit_at(1.0)));
        let first = controller.confirm(&mut registry);
        assert!(first.is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(controller.state(), PlacementState::Committed);

        // Repeated confirms are no-ops
        for _ in 0..5 {
            assert!(controller.confirm(&mut registry).is_none());
        }
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_commit_suppresses_further_tracking() {
        let mut controller = PlacementController::new(PlacementMode::Single);
        let mut registry = registry();

        controller.update(Some(hit_at(1.0)));
        controller.confirm(&mut registry).unwrap();

        // A later valid hit leaves the reticle retired
        controller.update(Some(hit_at(2.0)));
        assert!(!controller.reticle().visible);
        assert_eq!(controller.state(), PlacementState::Committed);
    }

    #[test]
    fn test_repeated_mode_spawns_per_confirm() {
        let mut controller = PlacementController::new(PlacementMode::Repeated);
        let mut registry = registry();

        for i in 0..3 {
            controller.update(Some(hit_at(i as f32)));
            assert!(controller.confirm(&mut registry).is_some());
        }

        assert_eq!(registry.len(), 3);
        assert_eq!(controller.state(), PlacementState::Tracking);

        // Each instance keeps the pose captured at its confirm
        let xs: Vec<f32> = registry.iter().map(|(_, i)| i.pose.position.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_confirm_without_hit_is_ignored() {
        let mut controller = PlacementController::new(PlacementMode::Repeated);
        let mut registry = registry();

        controller.update(None);
        assert!(controller.confirm(&mut registry).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_confirm_same_frame_as_first_hit_is_valid() {
        let mut controller = PlacementController::new(PlacementMode::Single);
        let mut registry = registry();

        // No dwell time required
        controller.update(Some(hit_at(0.5)));
        assert!(controller.confirm(&mut registry).is_some());
    }

    #[test]
    fn test_confirm_without_template_is_noop() {
        let mut controller = PlacementController::new(PlacementMode::Single);
        let mut registry = ObjectRegistry::new();

        controller.update(Some(hit_at(1.0)));
        assert!(controller.confirm(&mut registry).is_none());

        // Controller must not enter Committed when nothing spawned
        assert_eq!(controller.state(), PlacementState::Tracking);

        // Template arrives later; confirm now succeeds
        registry.set_template(PlaceableTemplate::new("duck", "models/duck.gltf"));
        assert!(controller.confirm(&mut registry).is_some());
        assert_eq!(controller.state(), PlacementState::Committed);
    }

    #[test]
    fn test_end_session_hides_committed_instance() {
        let mut controller = PlacementController::new(PlacementMode::Single);
        let mut registry = registry();

        controller.update(Some(hit_at(1.0)));
        let key = controller.confirm(&mut registry).unwrap();

        controller.end_session(&mut registry);

        assert!(!registry.get(key).unwrap().visible);
        assert_eq!(controller.state(), PlacementState::Idle);
        assert!(!controller.reticle().visible);

        // Next session may place again
        controller.update(Some(hit_at(2.0)));
        assert!(controller.reticle().visible);
    }

    #[test]
    fn test_end_session_leaves_repeated_instances_alone() {
        let mut controller = PlacementController::new(PlacementMode::Repeated);
        let mut registry = registry();

        controller.update(Some(hit_at(1.0)));
        let key = controller.confirm(&mut registry).unwrap();

        controller.end_session(&mut registry);

        assert!(registry.get(key).unwrap().visible);
        assert_eq!(registry.len(), 1);
    }
}

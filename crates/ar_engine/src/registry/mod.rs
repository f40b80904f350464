//! Object registry: spawned instance storage
//!
//! Tracks every instance committed during a session. Instances are keyed by
//! stable slotmap handles and additionally indexed by spawn order, which is
//! the only traversal order the registry defines. There is no removal
//! operation: the registry is session-scoped, not a long-running store, and
//! unbounded growth in repeated-placement mode is the documented policy.

use crate::assets::{MaterialKind, PlaceableTemplate};
use crate::foundation::math::Pose;
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a placed instance
    pub struct InstanceKey;
}

/// Runtime copy of the placeable template, pinned to a surface
///
/// The pose is fixed at spawn time; only the animation step writes to it
/// afterwards (vertical offset relative to `base_position_y`, plus rotation
/// about one configured axis).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedInstance {
    /// Current world pose (animation-adjusted)
    pub pose: Pose,

    /// Vertical anchor captured at spawn, reference for the jump oscillation
    pub base_position_y: f32,

    /// Whether the rendering collaborator should draw this instance
    pub visible: bool,

    /// Uniform scale copied from the template at spawn
    pub scale: f32,
}

/// Session-scoped store of placed instances plus the template they copy
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    instances: SlotMap<InstanceKey, PlacedInstance>,
    spawn_order: Vec<InstanceKey>,
    template: Option<PlaceableTemplate>,
}

impl ObjectRegistry {
    /// Create an empty registry with no template loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the template instances are copied from
    ///
    /// Called once after asset loading succeeds. Until then `spawn` fails
    /// and placement confirms are no-ops.
    pub fn set_template(&mut self, template: PlaceableTemplate) {
        log::info!("placeable template ready: {}", template.name);
        self.template = Some(template);
    }

    /// The loaded template, if any
    pub fn template(&self) -> Option<&PlaceableTemplate> {
        self.template.as_ref()
    }

    /// Whether a template is available to spawn from
    pub fn has_template(&self) -> bool {
        self.template.is_some()
    }

    /// Change the material variant shown by the template and all instances
    pub fn set_material(&mut self, material: MaterialKind) {
        if let Some(template) = self.template.as_mut() {
            template.current_material = material;
        } else {
            log::warn!("material change ignored: no template loaded");
        }
    }

    /// Material variant instances are currently drawn with
    pub fn current_material(&self) -> MaterialKind {
        self.template
            .as_ref()
            .map(|t| t.current_material)
            .unwrap_or_default()
    }

    /// Spawn a new instance at the given pose
    ///
    /// Returns `None` when no template is loaded. The instance snapshots the
    /// pose; later hits never move it.
    pub fn spawn(&mut self, pose: Pose) -> Option<InstanceKey> {
        let template = match self.template.as_ref() {
            Some(template) => template,
            None => {
                log::warn!("spawn ignored: no template loaded");
                return None;
            }
        };

        let instance = PlacedInstance {
            pose,
            base_position_y: pose.position.y,
            visible: true,
            scale: template.default_scale,
        };

        let key = self.instances.insert(instance);
        self.spawn_order.push(key);
        log::debug!(
            "spawned instance {} at ({:.3}, {:.3}, {:.3})",
            self.spawn_order.len(),
            pose.position.x,
            pose.position.y,
            pose.position.z
        );
        Some(key)
    }

    /// Look up an instance by key
    pub fn get(&self, key: InstanceKey) -> Option<&PlacedInstance> {
        self.instances.get(key)
    }

    /// Look up an instance mutably
    pub fn get_mut(&mut self, key: InstanceKey) -> Option<&mut PlacedInstance> {
        self.instances.get_mut(key)
    }

    /// Visit every instance in spawn order
    pub fn for_each(&self, mut visitor: impl FnMut(InstanceKey, &PlacedInstance)) {
        for &key in &self.spawn_order {
            if let Some(instance) = self.instances.get(key) {
                visitor(key, instance);
            }
        }
    }

    /// Visit every instance mutably in spawn order
    ///
    /// The spawn index is passed through because the animation step phases
    /// each instance's oscillation by it.
    pub fn for_each_mut(&mut self, mut visitor: impl FnMut(usize, &mut PlacedInstance)) {
        for (index, &key) in self.spawn_order.iter().enumerate() {
            if let Some(instance) = self.instances.get_mut(key) {
                visitor(index, instance);
            }
        }
    }

    /// Iterate keys and instances in spawn order
    pub fn iter(&self) -> impl Iterator<Item = (InstanceKey, &PlacedInstance)> {
        self.spawn_order
            .iter()
            .filter_map(move |&key| self.instances.get(key).map(|instance| (key, instance)))
    }

    /// Number of instances spawned so far
    pub fn len(&self) -> usize {
        self.spawn_order.len()
    }

    /// Whether no instance has been spawned yet
    pub fn is_empty(&self) -> bool {
        self.spawn_order.is_empty()
    }
}

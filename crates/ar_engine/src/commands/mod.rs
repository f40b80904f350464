//! Command dispatch for UI controls
//!
//! The hosting UI exposes a panel of buttons and selects. Instead of one
//! listener closure per control, a single table maps control identifiers to
//! state-mutating commands, decoupling UI structure from behavior. Controls
//! that carry a value (selects, sliders, color inputs) parse it here;
//! unknown controls and malformed values are errors, never panics.

use crate::animation::RotationAxis;
use crate::assets::MaterialKind;
use crate::config::LightType;
use crate::session::SessionContext;
use std::collections::HashMap;
use thiserror::Error;

/// State-mutating command a UI control maps to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Flip the rotation animation on/off
    ToggleRotation,
    /// Change the rotation axis
    SetRotationAxis(RotationAxis),
    /// Flip the jump oscillation on/off
    ToggleJump,
    /// Change the animation speed multiplier
    SetSpeed(f32),
    /// Change the material variant for template and instances
    SetMaterial(MaterialKind),
    /// Flip the ambient scene light
    ToggleSceneLight,
    /// Flip the model light
    ToggleModelLight,
    /// Change the model light kind
    SetLightType(LightType),
    /// Change the model light intensity
    SetLightIntensity(f32),
    /// Change the model light color
    SetLightColor([f32; 3]),
    /// Collapse or expand the hosting UI's controls panel
    ToggleControls,
}

/// Errors raised while resolving a control into a command
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// Control identifier is not in the table
    #[error("unknown control: {0}")]
    UnknownControl(String),

    /// Control requires a value but none was supplied
    #[error("control {0} requires a value")]
    MissingValue(String),

    /// Supplied value could not be parsed for this control
    #[error("invalid value {value:?} for control {control}")]
    InvalidValue {
        /// Control the value was meant for
        control: String,
        /// The rejected value
        value: String,
    },
}

enum Binding {
    Simple(Command),
    Parsed(fn(&str) -> Option<Command>),
}

/// Table mapping control identifiers to commands
pub struct CommandTable {
    bindings: HashMap<&'static str, Binding>,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::with_default_bindings()
    }
}

impl CommandTable {
    /// Build the table with the standard control panel bindings
    ///
    /// Identifiers match the hosting page's control ids.
    pub fn with_default_bindings() -> Self {
        let mut bindings: HashMap<&'static str, Binding> = HashMap::new();

        bindings.insert("toggleRotationBtn", Binding::Simple(Command::ToggleRotation));
        bindings.insert("toggleJumpBtn", Binding::Simple(Command::ToggleJump));
        bindings.insert("toggleSceneLightBtn", Binding::Simple(Command::ToggleSceneLight));
        bindings.insert("toggleModelLightBtn", Binding::Simple(Command::ToggleModelLight));
        bindings.insert("toggleControlsBtn", Binding::Simple(Command::ToggleControls));

        bindings.insert(
            "rotationAxis",
            Binding::Parsed(|value| RotationAxis::parse(value).map(Command::SetRotationAxis)),
        );
        bindings.insert(
            "materialSelect",
            Binding::Parsed(|value| MaterialKind::parse(value).map(Command::SetMaterial)),
        );
        bindings.insert(
            "modelLightType",
            Binding::Parsed(|value| LightType::parse(value).map(Command::SetLightType)),
        );
        bindings.insert(
            "modelLightIntensity",
            Binding::Parsed(|value| {
                value
                    .parse::<f32>()
                    .ok()
                    .filter(|intensity| *intensity >= 0.0)
                    .map(Command::SetLightIntensity)
            }),
        );
        bindings.insert(
            "modelLightColor",
            Binding::Parsed(|value| parse_hex_color(value).map(Command::SetLightColor)),
        );
        bindings.insert(
            "speedMultiplier",
            Binding::Parsed(|value| {
                value
                    .parse::<f32>()
                    .ok()
                    .filter(|speed| *speed > 0.0)
                    .map(Command::SetSpeed)
            }),
        );

        Self { bindings }
    }

    /// Resolve a control event into a command
    pub fn resolve(&self, control: &str, value: Option<&str>) -> Result<Command, CommandError> {
        match self.bindings.get(control) {
            None => Err(CommandError::UnknownControl(control.to_string())),
            Some(Binding::Simple(command)) => Ok(*command),
            Some(Binding::Parsed(parser)) => {
                let value =
                    value.ok_or_else(|| CommandError::MissingValue(control.to_string()))?;
                parser(value).ok_or_else(|| CommandError::InvalidValue {
                    control: control.to_string(),
                    value: value.to_string(),
                })
            }
        }
    }

    /// Resolve and apply a control event in one step
    pub fn dispatch(
        &self,
        ctx: &mut SessionContext,
        control: &str,
        value: Option<&str>,
    ) -> Result<Command, CommandError> {
        let command = self.resolve(control, value)?;
        apply(ctx, command);
        Ok(command)
    }
}

/// Apply a command to the session context
pub fn apply(ctx: &mut SessionContext, command: Command) {
    match command {
        Command::ToggleRotation => {
            let enabled = ctx.animation.toggle_rotation();
            log::debug!("rotation animation: {}", if enabled { "on" } else { "off" });
        }
        Command::SetRotationAxis(axis) => ctx.animation.axis = axis,
        Command::ToggleJump => {
            let enabled = ctx.animation.toggle_jump();
            log::debug!("jump animation: {}", if enabled { "on" } else { "off" });
        }
        Command::SetSpeed(speed) => ctx.animation.speed = speed,
        Command::SetMaterial(material) => {
            ctx.registry.set_material(material);
            log::debug!("material set to {}", material);
        }
        Command::ToggleSceneLight => {
            ctx.lighting.scene_light_enabled = !ctx.lighting.scene_light_enabled;
        }
        Command::ToggleModelLight => {
            ctx.lighting.model_light.enabled = !ctx.lighting.model_light.enabled;
        }
        Command::SetLightType(light_type) => ctx.lighting.model_light.light_type = light_type,
        Command::SetLightIntensity(intensity) => ctx.lighting.model_light.intensity = intensity,
        Command::SetLightColor(color) => ctx.lighting.model_light.color = color,
        Command::ToggleControls => ctx.controls_visible = !ctx.controls_visible,
    }
}

/// Parse a `#rrggbb` color into normalized RGB components
fn parse_hex_color(value: &str) -> Option<[f32; 3]> {
    let hex = value.strip_prefix('#')?;
    // Reject non-hex bytes up front; slicing below must never land inside
    // a multi-byte character
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    ])
}

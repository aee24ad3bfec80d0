use crate::panel::PanelError;
use crate::value::ControlValue;
use cubestage_common::{Axis, NodeId};
use cubestage_scene::{MaterialKind, Scene};

/// The one scene attribute a control writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Background,
    CubeColor(NodeId),
    /// Material kind of a cube; `true` is lit.
    CubeLit(NodeId),
    DirectionalColor(NodeId),
    DirectionalIntensity(NodeId),
    DirectionalPosition(NodeId, Axis),
    AmbientColor(NodeId),
    AmbientIntensity(NodeId),
}

impl Binding {
    /// Name of the value kind this binding accepts.
    pub fn value_kind(&self) -> &'static str {
        match self {
            Binding::Background
            | Binding::CubeColor(_)
            | Binding::DirectionalColor(_)
            | Binding::AmbientColor(_) => "color",
            Binding::CubeLit(_) => "bool",
            Binding::DirectionalIntensity(_)
            | Binding::DirectionalPosition(..)
            | Binding::AmbientIntensity(_) => "number",
        }
    }

    /// Current value of the bound attribute.
    pub fn read(&self, scene: &Scene) -> Result<ControlValue, PanelError> {
        Ok(match *self {
            Binding::Background => ControlValue::Color(scene.background()),
            Binding::CubeColor(id) => ControlValue::Color(scene.cube(id)?.material().color()),
            Binding::CubeLit(id) => ControlValue::Bool(scene.cube(id)?.material().kind().is_lit()),
            Binding::DirectionalColor(id) => ControlValue::Color(scene.directional(id)?.color),
            Binding::DirectionalIntensity(id) => {
                ControlValue::Number(scene.directional(id)?.intensity)
            }
            Binding::DirectionalPosition(id, axis) => {
                ControlValue::Number(axis.get(scene.directional(id)?.position()))
            }
            Binding::AmbientColor(id) => ControlValue::Color(scene.ambient(id)?.color),
            Binding::AmbientIntensity(id) => ControlValue::Number(scene.ambient(id)?.intensity),
        })
    }

    /// Write `value` to the bound attribute, plus any state derived from it.
    pub fn apply(&self, value: ControlValue, scene: &mut Scene) -> Result<(), PanelError> {
        match (*self, value) {
            (Binding::Background, ControlValue::Color(c)) => scene.set_background(c),
            (Binding::CubeColor(id), ControlValue::Color(c)) => scene.cube_mut(id)?.set_color(c),
            (Binding::CubeLit(id), ControlValue::Bool(lit)) => {
                scene.cube_mut(id)?.set_material_kind(MaterialKind::from_lit(lit))
            }
            (Binding::DirectionalColor(id), ControlValue::Color(c)) => {
                scene.directional_mut(id)?.color = c
            }
            (Binding::DirectionalIntensity(id), ControlValue::Number(n)) => {
                scene.directional_mut(id)?.intensity = n
            }
            (Binding::DirectionalPosition(id, axis), ControlValue::Number(n)) => {
                scene.set_directional_position(id, axis, n)?;
            }
            (Binding::AmbientColor(id), ControlValue::Color(c)) => {
                scene.ambient_mut(id)?.color = c
            }
            (Binding::AmbientIntensity(id), ControlValue::Number(n)) => {
                scene.ambient_mut(id)?.intensity = n
            }
            (binding, value) => {
                return Err(PanelError::ValueMismatch {
                    label: format!("{binding:?}"),
                    expected: binding.value_kind(),
                    found: value.kind_name(),
                });
            }
        }
        Ok(())
    }
}

//! Render state attached to scene nodes
//!
//! A [`StateSet`] holds fixed-function style modes (culling, lighting, the
//! individual light slots) and typed attributes such as the light model and
//! fog parameters. Child nodes inherit whatever their parents enable.

use std::collections::HashMap;

use cgmath::Vector4;

/// Toggleable render modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    CullFace,
    Lighting,
    Normalize,
    Fog,
    /// Light slot `n`
    Light(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateValue {
    On,
    Off,
}

/// Global lighting parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightModel {
    pub ambient_intensity: Vector4<f32>,
    pub two_sided: bool,
}

impl Default for LightModel {
    fn default() -> Self {
        // Matches the fixed-function default of a dim grey ambient term
        Self {
            ambient_intensity: Vector4::new(0.2, 0.2, 0.2, 1.0),
            two_sided: false,
        }
    }
}

/// Linear distance fog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub colour: Vector4<f32>,
    pub start: f32,
    pub end: f32,
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            colour: Vector4::new(0.0, 0.0, 0.0, 1.0),
            start: 0.0,
            end: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    LightModel,
    Fog,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StateAttribute {
    LightModel(LightModel),
    Fog(Fog),
}

impl StateAttribute {
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            StateAttribute::LightModel(_) => AttributeType::LightModel,
            StateAttribute::Fog(_) => AttributeType::Fog,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSet {
    modes: HashMap<Mode, StateValue>,
    attributes: HashMap<AttributeType, StateAttribute>,
}

impl StateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&mut self, mode: Mode, value: StateValue) {
        self.modes.insert(mode, value);
    }

    pub fn mode(&self, mode: Mode) -> Option<StateValue> {
        self.modes.get(&mode).copied()
    }

    pub fn is_enabled(&self, mode: Mode) -> bool {
        self.mode(mode) == Some(StateValue::On)
    }

    /// Replaces any attribute of the same type
    pub fn set_attribute(&mut self, attribute: StateAttribute) {
        self.attributes.insert(attribute.attribute_type(), attribute);
    }

    pub fn attribute(&self, ty: AttributeType) -> Option<&StateAttribute> {
        self.attributes.get(&ty)
    }

    pub fn attribute_mut(&mut self, ty: AttributeType) -> Option<&mut StateAttribute> {
        self.attributes.get_mut(&ty)
    }

    pub fn light_model(&self) -> Option<&LightModel> {
        match self.attribute(AttributeType::LightModel) {
            Some(StateAttribute::LightModel(model)) => Some(model),
            _ => None,
        }
    }

    pub fn light_model_mut(&mut self) -> Option<&mut LightModel> {
        match self.attribute_mut(AttributeType::LightModel) {
            Some(StateAttribute::LightModel(model)) => Some(model),
            _ => None,
        }
    }

    pub fn fog(&self) -> Option<&Fog> {
        match self.attribute(AttributeType::Fog) {
            Some(StateAttribute::Fog(fog)) => Some(fog),
            _ => None,
        }
    }

    pub fn fog_mut(&mut self) -> Option<&mut Fog> {
        match self.attribute_mut(AttributeType::Fog) {
            Some(StateAttribute::Fog(fog)) => Some(fog),
            _ => None,
        }
    }

    /// Modes currently switched on, in no particular order
    pub fn enabled_modes(&self) -> impl Iterator<Item = Mode> + '_ {
        self.modes
            .iter()
            .filter(|(_, value)| **value == StateValue::On)
            .map(|(mode, _)| *mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_default_to_unset() {
        let mut state = StateSet::new();
        assert_eq!(state.mode(Mode::Lighting), None);
        assert!(!state.is_enabled(Mode::Lighting));

        state.set_mode(Mode::Lighting, StateValue::On);
        assert!(state.is_enabled(Mode::Lighting));

        state.set_mode(Mode::Lighting, StateValue::Off);
        assert_eq!(state.mode(Mode::Lighting), Some(StateValue::Off));
    }

    #[test]
    fn test_attribute_replaced_by_type() {
        let mut state = StateSet::new();
        state.set_attribute(StateAttribute::Fog(Fog::default()));
        state.set_attribute(StateAttribute::Fog(Fog {
            end: 300.0,
            ..Fog::default()
        }));

        assert_eq!(state.fog().map(|f| f.end), Some(300.0));
        assert!(state.light_model().is_none());
    }

    #[test]
    fn test_light_model_mut() {
        let mut state = StateSet::new();
        state.set_attribute(StateAttribute::LightModel(LightModel::default()));
        let ambient = Vector4::new(0.5, 0.25, 0.125, 1.0);
        state.light_model_mut().unwrap().ambient_intensity = ambient;
        assert_eq!(state.light_model().unwrap().ambient_intensity, ambient);
    }
}

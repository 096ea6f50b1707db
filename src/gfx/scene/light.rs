//! Light sources

use cgmath::{Vector3, Vector4};

use super::state_set::{Mode, StateSet, StateValue};

/// A single light slot
///
/// Colours are RGBA. A `position` with `w == 0` describes a directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub light_num: u32,
    pub diffuse: Vector4<f32>,
    pub ambient: Vector4<f32>,
    pub specular: Vector4<f32>,
    pub position: Vector4<f32>,
    pub direction: Vector3<f32>,
    pub constant_attenuation: f32,
    pub linear_attenuation: f32,
    pub quadratic_attenuation: f32,
}

impl Light {
    pub fn new(light_num: u32) -> Self {
        Self {
            light_num,
            diffuse: Vector4::new(0.8, 0.8, 0.8, 1.0),
            ambient: Vector4::new(0.05, 0.05, 0.05, 1.0),
            specular: Vector4::new(0.8, 0.8, 0.8, 1.0),
            position: Vector4::new(0.0, 0.0, 1.0, 0.0),
            direction: Vector3::new(0.0, 0.0, -1.0),
            constant_attenuation: 1.0,
            linear_attenuation: 0.0,
            quadratic_attenuation: 0.0,
        }
    }

    pub fn set_diffuse(&mut self, colour: Vector4<f32>) {
        self.diffuse = colour;
    }

    pub fn set_ambient(&mut self, colour: Vector4<f32>) {
        self.ambient = colour;
    }

    pub fn set_direction(&mut self, direction: Vector3<f32>) {
        self.direction = direction;
    }

    pub fn set_constant_attenuation(&mut self, attenuation: f32) {
        self.constant_attenuation = attenuation;
    }

    pub fn is_directional(&self) -> bool {
        self.position.w == 0.0
    }
}

/// Places a [`Light`] in the scene graph
#[derive(Debug, Clone, PartialEq)]
pub struct LightSource {
    pub light: Light,
}

impl LightSource {
    pub fn new(light: Light) -> Self {
        Self { light }
    }

    /// Switches this source's light slot on (or off) in `state_set`
    pub fn set_state_set_modes(&self, state_set: &mut StateSet, value: StateValue) {
        state_set.set_mode(Mode::Light(self.light.light_num), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_set_modes_enable_light_slot() {
        let source = LightSource::new(Light::new(3));
        let mut state = StateSet::new();
        source.set_state_set_modes(&mut state, StateValue::On);

        assert!(state.is_enabled(Mode::Light(3)));
        assert!(!state.is_enabled(Mode::Light(0)));
    }

    #[test]
    fn test_default_light_is_directional() {
        assert!(Light::new(0).is_directional());
    }
}

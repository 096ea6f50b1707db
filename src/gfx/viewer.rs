//! Viewer and main camera state
//!
//! The [`Viewer`] owns the main [`Camera`] (projection, culling, clear colour),
//! the lighting mode and the camera manipulator that positions the eye.

use bitflags::bitflags;
use cgmath::{perspective, Deg, Matrix4, SquareMatrix, Vector3, Vector4};
use winit::event::{DeviceEvent, KeyEvent};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

bitflags! {
    /// Culling tests applied while collecting drawables
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CullingMode: u32 {
        const VIEW_FRUSTUM_SIDES_CULLING = 0x1;
        const NEAR_PLANE_CULLING = 0x2;
        const FAR_PLANE_CULLING = 0x4;
        const SMALL_FEATURE_CULLING = 0x8;
        const SHADOW_OCCLUSION_CULLING = 0x10;
        const CLUSTER_CULLING = 0x20;
        const VIEW_FRUSTUM_CULLING = Self::VIEW_FRUSTUM_SIDES_CULLING.bits()
            | Self::NEAR_PLANE_CULLING.bits()
            | Self::FAR_PLANE_CULLING.bits();
        const DEFAULT_CULLING = Self::VIEW_FRUSTUM_SIDES_CULLING.bits()
            | Self::SMALL_FEATURE_CULLING.bits()
            | Self::SHADOW_OCCLUSION_CULLING.bits()
            | Self::CLUSTER_CULLING.bits();
    }
}

impl Default for CullingMode {
    fn default() -> Self {
        CullingMode::DEFAULT_CULLING
    }
}

/// Light the viewer adds on its own, independent of the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightingMode {
    /// Scene lights only
    NoLight,
    /// A light attached to the eye
    #[default]
    HeadLight,
    /// A fixed light in world space
    SkyLight,
}

/// Symmetric perspective projection, fovy in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    pub fovy: f64,
    pub aspect: f64,
    pub z_near: f64,
    pub z_far: f64,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fovy: 30.0,
            aspect: 4.0 / 3.0,
            z_near: 1.0,
            z_far: 10000.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    culling_mode: CullingMode,
    perspective: Perspective,
    clear_color: Vector4<f32>,
}

impl Camera {
    pub fn new(perspective: Perspective) -> Self {
        Self {
            culling_mode: CullingMode::default(),
            perspective,
            clear_color: Vector4::new(0.2, 0.2, 0.4, 1.0),
        }
    }

    pub fn culling_mode(&self) -> CullingMode {
        self.culling_mode
    }

    pub fn set_culling_mode(&mut self, mode: CullingMode) {
        self.culling_mode = mode;
    }

    pub fn projection_as_perspective(&self) -> Perspective {
        self.perspective
    }

    pub fn set_projection_as_perspective(&mut self, perspective: Perspective) {
        self.perspective = perspective;
    }

    /// Keeps fovy and clip planes, updates the aspect ratio
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.perspective.aspect = width as f64 / height as f64;
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let p = self.perspective;
        OPENGL_TO_WGPU_MATRIX
            * perspective(
                Deg(p.fovy as f32),
                p.aspect as f32,
                p.z_near as f32,
                p.z_far as f32,
            )
    }

    pub fn clear_color(&self) -> Vector4<f32> {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, colour: Vector4<f32>) {
        self.clear_color = colour;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Perspective::default())
    }
}

/// Positions the main camera
pub trait CameraManipulator {
    /// Camera-to-world transform
    fn matrix(&self) -> Matrix4<f32>;

    /// World-to-camera transform
    fn view_matrix(&self) -> Matrix4<f32> {
        self.matrix().invert().unwrap_or_else(Matrix4::identity)
    }

    /// Returns true when the event moved the camera
    fn handle_device_event(&mut self, _event: &DeviceEvent) -> bool {
        false
    }

    fn handle_key_event(&mut self, _event: &KeyEvent) -> bool {
        false
    }
}

/// A manipulator that never moves
pub struct FixedManipulator {
    pub matrix: Matrix4<f32>,
}

impl FixedManipulator {
    pub fn at(eye: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::from_translation(eye),
        }
    }
}

impl CameraManipulator for FixedManipulator {
    fn matrix(&self) -> Matrix4<f32> {
        self.matrix
    }
}

pub struct Viewer {
    camera: Camera,
    lighting_mode: LightingMode,
    manipulator: Box<dyn CameraManipulator>,
}

impl Viewer {
    pub fn new(camera: Camera, manipulator: Box<dyn CameraManipulator>) -> Self {
        Self {
            camera,
            lighting_mode: LightingMode::default(),
            manipulator,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn lighting_mode(&self) -> LightingMode {
        self.lighting_mode
    }

    pub fn set_lighting_mode(&mut self, mode: LightingMode) {
        self.lighting_mode = mode;
    }

    pub fn camera_manipulator(&self) -> &dyn CameraManipulator {
        self.manipulator.as_ref()
    }

    pub fn camera_manipulator_mut(&mut self) -> &mut dyn CameraManipulator {
        self.manipulator.as_mut()
    }

    pub fn set_camera_manipulator(&mut self, manipulator: Box<dyn CameraManipulator>) {
        self.manipulator = manipulator;
    }

    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        self.camera.projection_matrix() * self.manipulator.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_culling_includes_small_features() {
        let camera = Camera::default();
        assert!(camera
            .culling_mode()
            .contains(CullingMode::SMALL_FEATURE_CULLING));
    }

    #[test]
    fn test_resize_updates_aspect_only() {
        let mut camera = Camera::default();
        camera.resize(1600, 800);
        let p = camera.projection_as_perspective();
        assert_eq!(p.aspect, 2.0);
        assert_eq!(p.fovy, Perspective::default().fovy);

        camera.resize(0, 800);
        assert_eq!(camera.projection_as_perspective().aspect, 2.0);
    }

    #[test]
    fn test_fixed_manipulator_view_inverts_matrix() {
        let manipulator = FixedManipulator::at(Vector3::new(1.0, 2.0, 3.0));
        let view = manipulator.view_matrix();
        assert_eq!(view.w, Vector4::new(-1.0, -2.0, -3.0, 1.0));
    }
}

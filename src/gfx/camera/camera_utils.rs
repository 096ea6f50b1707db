use cgmath::Matrix4;
use winit::event::{DeviceEvent, KeyEvent};

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera};
use crate::gfx::viewer::CameraManipulator;

/// Orbit camera plus the controller that drives it
pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }
}

impl CameraManipulator for CameraManager {
    fn matrix(&self) -> Matrix4<f32> {
        self.camera.world_matrix()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.camera.view_matrix()
    }

    fn handle_device_event(&mut self, event: &DeviceEvent) -> bool {
        self.controller.process_events(event, &mut self.camera)
    }

    fn handle_key_event(&mut self, event: &KeyEvent) -> bool {
        self.controller
            .process_keyed_events(event, &mut self.camera)
    }
}

/// Converts a cgmath matrix into the column-major array layout used by shaders
pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}

//! Global uniform bindings for camera, lighting and fog
//!
//! One uniform block per frame, shared by every pipeline at bind group 0.

use crate::wgpu_utils::{binding_types, uniform_buffer::UniformBuffer};

/// Per-frame uniform block
///
/// MUST match the `FrameUniform` struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    /// Eye position in homogeneous coordinates (16 byte alignment)
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
    pub ambient: [f32; 4],
    pub sun_diffuse: [f32; 4],
    /// Direction the sun shines in, w = 0
    pub sun_direction: [f32; 4],
    pub fog_colour: [f32; 4],
    /// start, end, enabled (0 or 1), cloud offset
    pub fog_params: [f32; 4],
}
// 16 + 64 + 5 * 16 = 160 bytes

impl Default for FrameUniform {
    fn default() -> Self {
        bytemuck::Zeroable::zeroed()
    }
}

pub type FrameUBO = UniformBuffer<FrameUniform>;

/// Bind group layout and bind group for the frame uniform
pub struct GlobalBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &FrameUBO) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: binding_types::uniform(),
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        });

        Self {
            bind_group_layout,
            bind_group,
        }
    }

    /// Used when creating render pipelines that need access to global uniforms.
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

use wgpu::util::DeviceExt;

use crate::data_structures::scene_graph::{Light, SceneGraph};

/// Ambient term plus one directional light, as read by `scene.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    // rgb premultiplied by intensity, w unused
    ambient: [f32; 4],
    // towards the light, w unused
    direction: [f32; 4],
    color: [f32; 4],
}

impl Default for LightUniform {
    /// No light at all, the sun straight above.
    fn default() -> Self {
        Self {
            ambient: [0.0; 4],
            direction: [0.0, 1.0, 0.0, 0.0],
            color: [0.0; 4],
        }
    }
}

impl LightUniform {
    /// Collects the lights of a scene. The directional light shines from its
    /// position towards the origin.
    pub fn from_scene(scene: &SceneGraph) -> Self {
        let mut uniform = Self::default();
        for (light, world) in scene.lights() {
            match light {
                Light::Ambient { color, intensity } => {
                    uniform.ambient = premultiply(color, *intensity);
                }
                Light::Directional { color, intensity } => {
                    uniform.color = premultiply(color, *intensity);
                    let position = world.position;
                    let length = (position.x * position.x
                        + position.y * position.y
                        + position.z * position.z)
                        .sqrt();
                    if length > f32::EPSILON {
                        uniform.direction = [
                            position.x / length,
                            position.y / length,
                            position.z / length,
                            0.0,
                        ];
                    }
                }
            }
        }
        uniform
    }


    pub fn ambient(&self) -> [f32; 3] {
        [self.ambient[0], self.ambient[1], self.ambient[2]]
    }

    pub fn direction(&self) -> [f32; 3] {
        [self.direction[0], self.direction[1], self.direction[2]]
    }
}

fn premultiply(color: &[f32; 3], intensity: f32) -> [f32; 4] {
    [
        color[0] * intensity,
        color[1] * intensity,
        color[2] * intensity,
        1.0,
    ]
}

pub fn mk_buffer(device: &wgpu::Device, light_uniform: LightUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Buffer"),
        contents: bytemuck::cast_slice(&[light_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: light_buffer.as_entire_binding(),
        }],
        label: Some("light_bind_group"),
    })
}

//! CPU-side geometry and materials.
//!
//! Builders and loaders only ever produce [`MeshData`] and [`Material`]; the
//! renderer turns them into GPU buffers when a scene is uploaded. This keeps
//! scene construction testable without a device.

use std::sync::Arc;

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Triangle list geometry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a quad from four counter-clockwise corners sharing one normal.
    pub fn add_quad(&mut self, corners: [[f32; 3]; 4], uvs: [[f32; 2]; 4], normal: [f32; 3]) {
        let base = self.vertices.len() as u32;
        for (position, tex_coords) in corners.into_iter().zip(uvs) {
            self.vertices.push(ModelVertex {
                position,
                tex_coords,
                normal,
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn add_triangle(&mut self, vertices: [ModelVertex; 3]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&vertices);
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis aligned bounds of the vertex positions, `None` for empty meshes.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let mut vertices = self.vertices.iter();
        let first = vertices.next()?.position;
        Some(vertices.fold((first, first), |(mut min, mut max), v| {
            for axis in 0..3 {
                min[axis] = min[axis].min(v.position[axis]);
                max[axis] = max[axis].max(v.position[axis]);
            }
            (min, max)
        }))
    }
}

/// Lighting model of a material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shading {
    /// Diffuse only.
    Lambert,
    /// Diffuse plus a specular highlight.
    Phong { shininess: f32, specular: f32 },
}

/// Surface description of a mesh. Textures are plain RGBA images so that they
/// can be painted procedurally or decoded from an asset without a device.
#[derive(Clone, Debug)]
pub struct Material {
    pub name: String,
    pub shading: Shading,
    pub color: [f32; 3],
    pub opacity: f32,
    pub texture: Option<Arc<image::RgbaImage>>,
}

impl Material {
    pub fn lambert(name: &str, color: u32) -> Self {
        Self {
            name: name.to_string(),
            shading: Shading::Lambert,
            color: hex_to_rgb(color),
            opacity: 1.0,
            texture: None,
        }
    }

    pub fn phong(name: &str, color: u32, shininess: f32) -> Self {
        Self {
            shading: Shading::Phong {
                shininess,
                specular: 0.5,
            },
            ..Self::lambert(name, color)
        }
    }

    pub fn with_texture(mut self, texture: Arc<image::RgbaImage>) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// Converts a `0xRRGGBB` colour into linear-ish floats in `[0, 1]`.
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

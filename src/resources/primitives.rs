//! Reusable primitive meshes and materials.
//!
//! The [`PrimitiveFactory`] hands out shared geometry: two requests with the same
//! shape parameters return the same `Arc<MeshData>`, which the renderer uploads
//! once. Materials are shared by name in the same way.

use std::{collections::HashMap, f32::consts::TAU, sync::Arc};

use crate::data_structures::{
    instance::Instance,
    model::{Material, MeshData, ModelVertex},
    scene_graph::{ContainerNode, MeshNode, SceneNode},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Shape {
    Cuboid([u32; 3]),
    Cylinder([u32; 3], u32),
    Plane([u32; 2], [u32; 2]),
}

fn bits<const N: usize>(values: [f32; N]) -> [u32; N] {
    values.map(f32::to_bits)
}

#[derive(Default)]
pub struct PrimitiveFactory {
    meshes: HashMap<Shape, Arc<MeshData>>,
    materials: HashMap<String, Arc<Material>>,
}

impl PrimitiveFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Axis aligned box centered on the origin.
    pub fn cuboid(&mut self, width: f32, height: f32, depth: f32) -> Arc<MeshData> {
        self.meshes
            .entry(Shape::Cuboid(bits([width, height, depth])))
            .or_insert_with(|| Arc::new(cuboid_mesh(width, height, depth)))
            .clone()
    }

    /// Cylinder (or frustum) along the y axis, centered on the origin.
    pub fn cylinder(
        &mut self,
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        segments: u32,
    ) -> Arc<MeshData> {
        let segments = segments.max(3);
        self.meshes
            .entry(Shape::Cylinder(
                bits([radius_top, radius_bottom, height]),
                segments,
            ))
            .or_insert_with(|| {
                Arc::new(cylinder_mesh(radius_top, radius_bottom, height, segments))
            })
            .clone()
    }

    pub fn cone(&mut self, radius: f32, height: f32, segments: u32) -> Arc<MeshData> {
        self.cylinder(0.0, radius, height, segments)
    }

    /// Rectangle in the xy plane facing +z.
    pub fn plane(&mut self, width: f32, height: f32) -> Arc<MeshData> {
        self.tiled_plane(width, height, 1.0, 1.0)
    }

    /// Like [`plane`](Self::plane) with the texture repeated `repeat_u` by `repeat_v` times.
    pub fn tiled_plane(
        &mut self,
        width: f32,
        height: f32,
        repeat_u: f32,
        repeat_v: f32,
    ) -> Arc<MeshData> {
        self.meshes
            .entry(Shape::Plane(bits([width, height]), bits([repeat_u, repeat_v])))
            .or_insert_with(|| Arc::new(plane_mesh(width, height, repeat_u, repeat_v)))
            .clone()
    }

    /// Returns the material registered under `name`, creating it on first use.
    pub fn material(&mut self, name: &str, create: impl FnOnce() -> Material) -> Arc<Material> {
        self.materials
            .entry(name.to_string())
            .or_insert_with(|| {
                let mut material = create();
                material.name = name.to_string();
                Arc::new(material)
            })
            .clone()
    }

    pub fn lambert(&mut self, name: &str, color: u32) -> Arc<Material> {
        self.material(name, || Material::lambert(name, color))
    }

    pub fn phong(&mut self, name: &str, color: u32, shininess: f32) -> Arc<Material> {
        self.material(name, || Material::phong(name, color, shininess))
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

/// A mesh node with a fixed offset from its parent.
pub fn part(
    name: &str,
    mesh: Arc<MeshData>,
    material: Arc<Material>,
    at: Instance,
) -> Box<dyn SceneNode> {
    Box::new(MeshNode::new(name, mesh, material, at))
}

/// A furniture group or fixture assembly.
pub fn group(name: &str, at: Instance, children: Vec<Box<dyn SceneNode>>) -> Box<dyn SceneNode> {
    Box::new(ContainerNode::new(name, at).with_children(children))
}

const UNIT_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

fn cuboid_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let half = [width / 2.0, height / 2.0, depth / 2.0];
    // (normal, u, v) per face with u x v = normal, so the corners below are
    // counter-clockwise when seen from outside.
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    let mut mesh = MeshData::new();
    for (n, u, v) in faces {
        let corner = |su: f32, sv: f32| -> [f32; 3] {
            std::array::from_fn(|axis| (n[axis] + u[axis] * su + v[axis] * sv) * half[axis])
        };
        mesh.add_quad(
            [
                corner(-1.0, -1.0),
                corner(1.0, -1.0),
                corner(1.0, 1.0),
                corner(-1.0, 1.0),
            ],
            UNIT_UVS,
            n,
        );
    }
    mesh
}

fn cylinder_mesh(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> MeshData {
    let mut mesh = MeshData::new();
    let half = height / 2.0;
    let slope = (radius_bottom - radius_top) / height.max(f32::EPSILON);

    // side: one ring at the bottom and one at the top, seam vertex duplicated for uvs
    for ring in 0..=segments {
        let u = ring as f32 / segments as f32;
        let (sin, cos) = (u * TAU).sin_cos();
        let len = (1.0 + slope * slope).sqrt();
        let normal = [sin / len, slope / len, cos / len];
        mesh.vertices.push(ModelVertex {
            position: [radius_bottom * sin, -half, radius_bottom * cos],
            tex_coords: [u, 1.0],
            normal,
        });
        mesh.vertices.push(ModelVertex {
            position: [radius_top * sin, half, radius_top * cos],
            tex_coords: [u, 0.0],
            normal,
        });
    }
    for i in 0..segments {
        let b0 = i * 2;
        let t0 = b0 + 1;
        let b1 = b0 + 2;
        let t1 = b0 + 3;
        mesh.indices.extend_from_slice(&[b0, b1, t1, b0, t1, t0]);
    }

    let mut cap = |radius: f32, y: f32, up: bool| {
        if radius <= 0.0 {
            return;
        }
        let normal = [0.0, if up { 1.0 } else { -1.0 }, 0.0];
        for i in 0..segments {
            let (s0, c0) = (i as f32 / segments as f32 * TAU).sin_cos();
            let (s1, c1) = ((i + 1) as f32 / segments as f32 * TAU).sin_cos();
            let vertex = |x: f32, z: f32| ModelVertex {
                position: [x * radius, y, z * radius],
                tex_coords: [0.5 + x / 2.0, 0.5 + z / 2.0],
                normal,
            };
            let center = vertex(0.0, 0.0);
            if up {
                mesh.add_triangle([center, vertex(s0, c0), vertex(s1, c1)]);
            } else {
                mesh.add_triangle([center, vertex(s1, c1), vertex(s0, c0)]);
            }
        }
    };
    cap(radius_top, half, true);
    cap(radius_bottom, -half, false);
    mesh
}

fn plane_mesh(width: f32, height: f32, repeat_u: f32, repeat_v: f32) -> MeshData {
    let (hw, hh) = (width / 2.0, height / 2.0);
    let mut mesh = MeshData::new();
    mesh.add_quad(
        [
            [-hw, -hh, 0.0],
            [hw, -hh, 0.0],
            [hw, hh, 0.0],
            [-hw, hh, 0.0],
        ],
        [
            [0.0, repeat_v],
            [repeat_u, repeat_v],
            [repeat_u, 0.0],
            [0.0, 0.0],
        ],
        [0.0, 0.0, 1.0],
    );
    mesh
}

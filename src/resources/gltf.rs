//! glTF 2.0 import (`.gltf` with embedded or data-URI buffers and binary `.glb`).

use std::{collections::HashMap, sync::Arc};

use anyhow::anyhow;
use log::warn;

use crate::data_structures::{
    instance::Instance,
    model::{Material, MeshData, ModelVertex},
    scene_graph::{ContainerNode, MeshNode, SceneNode},
};

struct Imported {
    buffers: Vec<gltf::buffer::Data>,
    images: Vec<gltf::image::Data>,
    materials: HashMap<Option<usize>, Arc<Material>>,
}

pub fn load_gltf(bytes: &[u8], name: &str) -> anyhow::Result<Box<dyn SceneNode>> {
    let (document, buffers, images) = gltf::import_slice(bytes)?;
    let mut imported = Imported {
        buffers,
        images,
        materials: HashMap::new(),
    };

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| anyhow!("document contains no scene"))?;

    let mut root = ContainerNode::new(name, Instance::new());
    for node in scene.nodes() {
        root.add_child(to_scene_node(node, &mut imported)?);
    }
    if root.children.is_empty() {
        return Err(anyhow!("scene {} has no nodes", scene.index()));
    }
    Ok(Box::new(root))
}

fn to_scene_node(
    node: gltf::Node,
    imported: &mut Imported,
) -> anyhow::Result<Box<dyn SceneNode>> {
    let (position, rotation, scale) = node.transform().decomposed();
    let instance = Instance {
        position: position.into(),
        rotation: rotation.into(),
        scale: scale.into(),
    };
    let name = node
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("node-{}", node.index()));
    let mut scene_node = ContainerNode::new(&name, instance);

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                warn!("Skipping non-triangle primitive in {}", name);
                continue;
            }
            let data = read_primitive(&primitive, &imported.buffers)?;
            let material = material_for(&primitive.material(), imported);
            scene_node.add_child(Box::new(MeshNode::new(
                &format!("{}-{}", name, primitive.index()),
                Arc::new(data),
                material,
                Instance::new(),
            )));
        }
    }
    for child in node.children() {
        scene_node.add_child(to_scene_node(child, imported)?);
    }

    Ok(Box::new(scene_node))
}

fn read_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
) -> anyhow::Result<MeshData> {
    let reader = primitive.reader(|buffer| {
        buffers
            .get(buffer.index())
            .map(|data| data.0.as_slice())
    });

    let mut vertices: Vec<ModelVertex> = reader
        .read_positions()
        .ok_or_else(|| anyhow!("primitive {} has no positions", primitive.index()))?
        .map(|position| ModelVertex {
            position,
            tex_coords: Default::default(),
            normal: [0.0, 1.0, 0.0],
        })
        .collect();
    if let Some(normals) = reader.read_normals() {
        for (vertex, normal) in vertices.iter_mut().zip(normals) {
            vertex.normal = normal;
        }
    }
    if let Some(tex_coords) = reader.read_tex_coords(0).map(|v| v.into_f32()) {
        for (vertex, tex_coord) in vertices.iter_mut().zip(tex_coords) {
            vertex.tex_coords = tex_coord;
        }
    }
    let indices = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..vertices.len() as u32).collect(),
    };

    Ok(MeshData { vertices, indices })
}

fn material_for(material: &gltf::Material, imported: &mut Imported) -> Arc<Material> {
    let images = &imported.images;
    imported
        .materials
        .entry(material.index())
        .or_insert_with(|| {
            let pbr = material.pbr_metallic_roughness();
            let [r, g, b, a] = pbr.base_color_factor();
            let mut result = Material::lambert(material.name().unwrap_or("gltf-default"), 0xffffff);
            result.color = [r, g, b];
            result = result.with_opacity(a);
            if let Some(info) = pbr.base_color_texture() {
                match images.get(info.texture().source().index()).and_then(to_rgba) {
                    Some(texture) => result = result.with_texture(Arc::new(texture)),
                    None => warn!("Unsupported base colour texture in {}", result.name),
                }
            }
            Arc::new(result)
        })
        .clone()
}

fn to_rgba(data: &gltf::image::Data) -> Option<image::RgbaImage> {
    use gltf::image::Format;
    match data.format {
        Format::R8G8B8A8 => image::RgbaImage::from_raw(data.width, data.height, data.pixels.clone()),
        Format::R8G8B8 => image::RgbImage::from_raw(data.width, data.height, data.pixels.clone())
            .map(|rgb| image::DynamicImage::ImageRgb8(rgb).to_rgba8()),
        _ => None,
    }
}

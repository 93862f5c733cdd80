//! Wavefront `.obj` import. Material libraries are not followed; every model
//! gets a neutral grey material.

use std::{
    io::{BufReader, Cursor},
    sync::Arc,
};

use log::warn;

use crate::data_structures::{
    instance::Instance,
    model::{Material, MeshData, ModelVertex},
    scene_graph::{ContainerNode, MeshNode, SceneNode},
};

pub async fn load_obj(bytes: &[u8], name: &str) -> anyhow::Result<Box<dyn SceneNode>> {
    let mut obj_reader = BufReader::new(Cursor::new(bytes));

    let (models, _) = tobj::load_obj_buf_async(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |_| async { Err(tobj::LoadError::OpenFileFailed) },
    )
    .await?;

    let material = Arc::new(Material::lambert("obj-default", 0xb0b0b0));
    let mut root = ContainerNode::new(name, Instance::new());
    for (idx, model) in models.iter().enumerate() {
        let mesh = to_mesh(&model.mesh);
        if mesh.indices.iter().any(|&i| i as usize >= mesh.vertices.len()) {
            warn!("Mesh at index {} in file {} references missing vertices", idx, name);
            continue;
        }
        root.add_child(Box::new(MeshNode::new(
            &model.name,
            Arc::new(mesh),
            material.clone(),
            Instance::new(),
        )));
    }
    if root.children.is_empty() {
        anyhow::bail!("no usable meshes in {}", name);
    }
    Ok(Box::new(root))
}

fn to_mesh(m: &tobj::Mesh) -> MeshData {
    let vertices = (0..m.positions.len() / 3)
        .map(|i| ModelVertex {
            position: [
                m.positions[i * 3],
                m.positions[i * 3 + 1],
                m.positions[i * 3 + 2],
            ],
            tex_coords: [
                m.texcoords.get(i * 2).map_or(0.0, |f| *f),
                1.0 - m.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f),
            ],
            normal: [
                m.normals.get(i * 3).map_or(0.0, |f| *f),
                m.normals.get(i * 3 + 1).map_or(1.0, |f| *f),
                m.normals.get(i * 3 + 2).map_or(0.0, |f| *f),
            ],
        })
        .collect();
    MeshData {
        vertices,
        indices: m.indices.clone(),
    }
}

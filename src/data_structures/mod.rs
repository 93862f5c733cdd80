//! Viewer data structures: meshes, materials, textures, transforms and the scene graph.
//!
//! - `model` holds CPU-side geometry ([`model::MeshData`]) and [`model::Material`]
//! - `texture` wraps GPU textures created from painted or imported images
//! - `instance` holds the rigid transform of a node and its GPU representation
//! - `scene_graph` is the node tree owned by one viewer session

pub mod instance;
pub mod model;
pub mod scene_graph;
pub mod texture;

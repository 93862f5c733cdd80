//! Procedural room construction.
//!
//! A scene is built in three fixed stages, each appending top level groups to a
//! fresh [`SceneGraph`]: the room [`shell`], the wall-anchored [`environment`]
//! fixtures and the [`furniture`] catalog of the room type.

use log::debug;

use crate::{
    config::LightConfig,
    data_structures::{
        model::hex_to_rgb,
        scene_graph::{Light, SceneGraph},
    },
    error::SceneError,
    resources::primitives::PrimitiveFactory,
    room::RoomType,
};

pub mod environment;
pub mod furniture;
pub mod shell;

/// A graph that only holds the two persistent lights.
pub fn lit_graph(lights: &LightConfig) -> SceneGraph {
    SceneGraph::new(
        Light::Ambient {
            color: hex_to_rgb(lights.ambient_color),
            intensity: lights.ambient_intensity,
        },
        Light::Directional {
            color: hex_to_rgb(lights.directional_color),
            intensity: lights.directional_intensity,
        },
        lights.directional_position,
    )
}

/// Builds the complete procedural scene of a room: shell, fixtures and furniture.
pub fn build_room(room: RoomType, lights: &LightConfig) -> Result<SceneGraph, SceneError> {
    let descriptor = room.descriptor();
    descriptor.validate()?;
    let builders = room.builders();

    let mut graph = lit_graph(lights);
    let mut factory = PrimitiveFactory::new();
    shell::build(&mut graph, &mut factory, &descriptor, builders.floor)?;
    (builders.environment)(&mut graph, &mut factory, &descriptor)?;
    (builders.furniture)(&mut graph, &mut factory, &descriptor)?;

    debug!(
        "Built {}: {} nodes, {} shared meshes, {} materials",
        room,
        graph.node_count(),
        factory.mesh_count(),
        factory.material_count()
    );
    Ok(graph)
}

/// Like [`build_room`] for a host identifier such as `"living-room"`.
pub fn build_room_by_id(id: &str, lights: &LightConfig) -> Result<SceneGraph, SceneError> {
    build_room(id.parse()?, lights)
}

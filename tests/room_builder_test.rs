use cgmath::{One, Quaternion};
use interior_ngin::{
    builders::{build_room, build_room_by_id, lit_graph},
    config::LightConfig,
    data_structures::{
        instance::Instance,
        scene_graph::{LIGHT_COUNT, Light, NodeKind, SceneGraph, SceneNode},
    },
    room::{RoomDescriptor, RoomType},
};

use crate::common::test_utils::init_logger;

mod common;

const SHELL_PARTS: [&str; 5] = ["floor", "back-wall", "left-wall", "right-wall", "ceiling"];

fn furniture_of(room: RoomType) -> &'static [&'static str] {
    match room {
        RoomType::LivingRoom => &[
            "area-rug",
            "tv-stand",
            "tv",
            "coffee-table",
            "sofa",
            "side-table",
            "plant",
        ],
        RoomType::Bedroom => &[
            "bedroom-rug",
            "bed",
            "headboard",
            "nightstand-left",
            "nightstand-right",
            "wardrobe",
        ],
        RoomType::Kitchen => &[
            "island",
            "bar-stool-left",
            "bar-stool-right",
            "base-cabinet-0",
            "base-cabinet-1",
            "base-cabinet-2",
            "base-cabinet-3",
            "base-cabinet-4",
            "fridge",
        ],
        RoomType::Bathroom => &["bathtub", "vanity", "toilet", "bath-mat"],
    }
}

fn world_transforms(graph: &SceneGraph) -> Vec<(String, Instance)> {
    let mut transforms = Vec::new();
    graph.walk(&mut |node| {
        transforms.push((node.name().to_string(), node.get_world_transform().clone()))
    });
    transforms
}

fn build(room: RoomType) -> SceneGraph {
    build_room(room, &LightConfig::default()).expect("every room type builds")
}

#[test]
fn should_build_shell_for_every_room_type() {
    init_logger();
    for room in RoomType::ALL {
        let graph = build(room);
        for part in SHELL_PARTS {
            assert!(graph.contains(part), "{room} is missing its {part}");
        }
        for board in ["baseboard-back", "baseboard-left", "baseboard-right"] {
            assert!(graph.contains(board), "{room} is missing {board}");
        }
        assert!(!graph.contains("front-wall"), "{room} must stay open to the camera");
    }
}

#[test]
fn should_place_shell_on_descriptor_planes() {
    let graph = build(RoomType::Kitchen);
    let room = RoomDescriptor::default();
    let position = |name: &str| {
        graph
            .find(name)
            .map(|node| node.get_world_transform().position)
            .expect("shell part exists")
    };

    assert_eq!(position("back-wall").z, room.back_wall_z());
    assert_eq!(position("left-wall").x, room.left_wall_x());
    assert_eq!(position("right-wall").x, room.right_wall_x());
    assert_eq!(position("ceiling").y, room.height);
    assert_eq!(position("floor").y, 0.0);
}

#[test]
fn should_share_one_wall_material() {
    let graph = build(RoomType::Bedroom);
    let material_of = |name: &str| match graph.find(name).map(|node| node.kind()) {
        Some(NodeKind::Mesh { material, .. }) => material.clone(),
        _ => panic!("{name} is not a mesh"),
    };

    let back = material_of("back-wall");
    assert!(std::sync::Arc::ptr_eq(&back, &material_of("left-wall")));
    assert!(std::sync::Arc::ptr_eq(&back, &material_of("right-wall")));
    assert!(back.texture.is_some(), "walls carry the speckled paint");
}

#[test]
fn should_pick_floor_finish_by_room_type() {
    let expected = [
        (RoomType::LivingRoom, "floor-hardwood"),
        (RoomType::Bedroom, "floor-carpet"),
        (RoomType::Kitchen, "floor-kitchen-tile"),
        (RoomType::Bathroom, "floor-bathroom-tile"),
    ];
    for (room, material_name) in expected {
        let graph = build(room);
        match graph.find("floor").map(|node| node.kind()) {
            Some(NodeKind::Mesh { material, .. }) => {
                assert_eq!(material.name, material_name, "floor of {room}");
                assert!(material.texture.is_some());
            }
            _ => panic!("{room} has no floor mesh"),
        }
    }
}

#[test]
fn should_attach_furniture_catalog() {
    for room in RoomType::ALL {
        let graph = build(room);
        for piece in furniture_of(room) {
            assert!(graph.contains(piece), "{room} is missing {piece}");
        }
    }
}

#[test]
fn should_keep_furniture_groups_translation_only() {
    for room in RoomType::ALL {
        let graph = build(room);
        for piece in furniture_of(room) {
            let node = graph.find(piece).expect("piece exists");
            assert_eq!(
                node.get_local_transform().rotation,
                Quaternion::one(),
                "{piece} of {room} is rotated"
            );
            assert!(!node.get_children().is_empty(), "{piece} has no parts");
        }
    }
}

#[test]
fn should_attach_environment_fixtures() {
    let fixtures: [(RoomType, &[&str]); 4] = [
        (
            RoomType::LivingRoom,
            &["living-window", "curtain-left", "curtain-right", "wall-art"],
        ),
        (RoomType::Bedroom, &["bedroom-window", "blinds", "bedroom-mirror"]),
        (
            RoomType::Kitchen,
            &["upper-cabinets", "backsplash", "kitchen-window"],
        ),
        (
            RoomType::Bathroom,
            &["wall-tiles", "bathroom-mirror", "towel-rack", "towel"],
        ),
    ];
    for (room, names) in fixtures {
        let graph = build(room);
        for name in names {
            assert!(graph.contains(name), "{room} is missing fixture {name}");
        }
    }
}

#[test]
fn should_build_deterministically() {
    for room in RoomType::ALL {
        let first = build(room);
        let second = build(room);
        assert_eq!(first.node_count(), second.node_count(), "node count of {room}");
        assert_eq!(first.mesh_count(), second.mesh_count(), "mesh count of {room}");
        assert_eq!(
            world_transforms(&first),
            world_transforms(&second),
            "transforms of {room}"
        );
    }
}

#[test]
fn should_keep_lights_in_front() {
    let graph = build(RoomType::LivingRoom);
    let lights: Vec<_> = graph.lights().collect();
    assert_eq!(lights.len(), LIGHT_COUNT);
    assert!(matches!(lights[0].0, Light::Ambient { intensity, .. } if *intensity == 0.6));
    assert!(matches!(lights[1].0, Light::Directional { intensity, .. } if *intensity == 0.8));
    assert_eq!(lights[1].1.position, cgmath::Vector3::new(10.0, 10.0, 5.0));
    assert_eq!(
        graph.room_nodes().len(),
        graph.root().get_children().len() - LIGHT_COUNT
    );
}

#[test]
fn should_reject_unknown_room_identifier() {
    let err = build_room_by_id("garage", &LightConfig::default())
        .err()
        .expect("garage is not a room type");
    assert!(err.is_configuration());

    let graph = build_room_by_id("bathroom", &LightConfig::default()).expect("known identifier");
    assert!(graph.contains("bathtub"));
}

#[test]
fn should_reject_degenerate_descriptor() {
    let room = RoomDescriptor {
        width: 0.0,
        ..RoomDescriptor::default()
    };
    assert!(room.validate().is_err());
    assert!(RoomDescriptor::default().validate().is_ok());
}

#[test]
fn should_parse_room_identifiers() {
    for room in RoomType::ALL {
        assert_eq!(room.id().parse::<RoomType>().ok(), Some(room));
    }
    assert_eq!(RoomType::Bedroom.display_name(), "Master Bedroom");
}

#[test]
fn should_start_with_lights_only() {
    let graph = lit_graph(&LightConfig::default());
    assert_eq!(graph.node_count(), LIGHT_COUNT);
    assert!(graph.room_nodes().is_empty());
    assert_eq!(graph.revision(), 0);
}

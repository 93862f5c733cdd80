//! Wall-anchored fixtures: windows, curtains, blinds, mirrors, cabinets and tiles.
//!
//! Fixtures are modelled facing +z as if hung on the back wall. Side wall
//! fixtures are turned by a quarter rotation around y.

use std::{
    f32::consts::{FRAC_PI_2, PI},
    sync::Arc,
};

use cgmath::Rad;

use crate::{
    data_structures::{
        instance::Instance,
        model::Material,
        scene_graph::{SceneGraph, SceneNode},
    },
    error::SceneError,
    resources::{
        paint,
        primitives::{PrimitiveFactory, group, part},
    },
    room::RoomDescriptor,
};

/// Distance between a wall plane and the back of a fixture.
const WALL_GAP: f32 = 0.02;
const FRAME: f32 = 0.06;

#[derive(Clone, Copy)]
enum Wall {
    Back,
    Left,
    Right,
}

/// Places a fixture with its center at `offset` along the wall and height `y`.
fn on_wall(room: &RoomDescriptor, wall: Wall, offset: f32, y: f32) -> Instance {
    match wall {
        Wall::Back => Instance::at(offset, y, room.back_wall_z() + WALL_GAP),
        Wall::Left => {
            Instance::at(room.left_wall_x() + WALL_GAP, y, offset).rotated_y(Rad(FRAC_PI_2))
        }
        Wall::Right => {
            Instance::at(room.right_wall_x() - WALL_GAP, y, offset).rotated_y(Rad(-FRAC_PI_2))
        }
    }
}

/// Four frame bars around a rectangle of `width` x `height`.
fn frame_bars(
    factory: &mut PrimitiveFactory,
    prefix: &str,
    width: f32,
    height: f32,
    material: &Arc<Material>,
) -> Vec<Box<dyn SceneNode>> {
    let horizontal = factory.cuboid(width + 2.0 * FRAME, FRAME, FRAME);
    let vertical = factory.cuboid(FRAME, height, FRAME);
    let (hx, hy) = (width / 2.0 + FRAME / 2.0, height / 2.0 + FRAME / 2.0);
    vec![
        part(
            &format!("{prefix}-frame-top"),
            horizontal.clone(),
            material.clone(),
            Instance::at(0.0, hy, FRAME / 2.0),
        ),
        part(
            &format!("{prefix}-frame-bottom"),
            horizontal,
            material.clone(),
            Instance::at(0.0, -hy, FRAME / 2.0),
        ),
        part(
            &format!("{prefix}-frame-left"),
            vertical.clone(),
            material.clone(),
            Instance::at(-hx, 0.0, FRAME / 2.0),
        ),
        part(
            &format!("{prefix}-frame-right"),
            vertical,
            material.clone(),
            Instance::at(hx, 0.0, FRAME / 2.0),
        ),
    ]
}

/// Glass pane with frame, mullions and a sill.
fn window(
    factory: &mut PrimitiveFactory,
    name: &str,
    width: f32,
    height: f32,
) -> Vec<Box<dyn SceneNode>> {
    let frame = factory.phong("window-frame", 0xf7f7f5, 20.0);
    let glass = factory.material("window-glass", || {
        Material::phong("", 0xbfdcf0, 90.0).with_opacity(0.35)
    });
    let mut nodes = frame_bars(factory, name, width, height, &frame);
    nodes.push(part(
        &format!("{name}-pane"),
        factory.plane(width, height),
        glass,
        Instance::at(0.0, 0.0, FRAME / 2.0),
    ));
    nodes.push(part(
        &format!("{name}-mullion"),
        factory.cuboid(0.03, height, 0.03),
        frame.clone(),
        Instance::at(0.0, 0.0, FRAME / 2.0),
    ));
    nodes.push(part(
        &format!("{name}-transom"),
        factory.cuboid(width, 0.03, 0.03),
        frame.clone(),
        Instance::at(0.0, 0.0, FRAME / 2.0),
    ));
    nodes.push(part(
        &format!("{name}-sill"),
        factory.cuboid(width + 0.3, 0.04, 0.18),
        frame,
        Instance::at(0.0, -height / 2.0 - FRAME - 0.02, 0.09),
    ));
    nodes
}

/// Framed reflective plane.
fn mirror(
    factory: &mut PrimitiveFactory,
    name: &str,
    width: f32,
    height: f32,
    frame_color: u32,
) -> Vec<Box<dyn SceneNode>> {
    let frame = factory.phong(&format!("{name}-frame"), frame_color, 40.0);
    let glass = factory.phong("mirror-glass", 0xdfe9f0, 120.0);
    let mut nodes = frame_bars(factory, name, width, height, &frame);
    nodes.push(part(
        &format!("{name}-glass"),
        factory.plane(width, height),
        glass,
        Instance::at(0.0, 0.0, 0.01),
    ));
    nodes
}

pub fn living_room(
    graph: &mut SceneGraph,
    factory: &mut PrimitiveFactory,
    room: &RoomDescriptor,
) -> Result<(), SceneError> {
    let (width, height) = (1.8, 1.3);
    let mut window_parts = window(factory, "living-window", width, height);

    let fabric = factory.lambert("curtain-fabric", 0x8c7b6b);
    let curtain = factory.cuboid(0.5, 2.2, 0.04);
    for (name, x) in [("curtain-left", -1.2), ("curtain-right", 1.2)] {
        window_parts.push(part(
            name,
            curtain.clone(),
            fabric.clone(),
            Instance::at(x, -0.25, 0.14),
        ));
    }
    window_parts.push(part(
        "curtain-rod",
        factory.cylinder(0.02, 0.02, 3.0, 12),
        factory.phong("brushed-metal", 0x9ca3af, 60.0),
        Instance::at(0.0, 0.88, 0.16).rotated_z(Rad(FRAC_PI_2)),
    ));
    graph.add(group(
        "living-window",
        on_wall(room, Wall::Left, -0.5, 1.6),
        window_parts,
    ));

    let art_frame = factory.phong("art-frame", 0x2d2a26, 30.0);
    let mut art = frame_bars(factory, "wall-art", 1.1, 0.8, &art_frame);
    art.push(part(
        "wall-art-canvas",
        factory.plane(1.1, 0.8),
        factory.lambert("art-canvas", 0x5a8dbf),
        Instance::at(0.0, 0.0, 0.01),
    ));
    art.push(part(
        "wall-art-accent",
        factory.plane(0.45, 0.3),
        factory.lambert("art-accent", 0xe0a458),
        Instance::at(0.2, 0.1, 0.015),
    ));
    graph.add(group("wall-art", on_wall(room, Wall::Back, 2.2, 1.8), art));
    Ok(())
}

pub fn bedroom(
    graph: &mut SceneGraph,
    factory: &mut PrimitiveFactory,
    room: &RoomDescriptor,
) -> Result<(), SceneError> {
    let (width, height) = (1.6, 1.2);
    let mut window_parts = window(factory, "bedroom-window", width, height);

    let slat_material = factory.phong("blind-slat", 0xece6da, 15.0);
    let slat = factory.cuboid(width - 0.04, 0.015, 0.06);
    let slats = (0..12)
        .map(|i| {
            part(
                &format!("blind-slat-{i}"),
                slat.clone(),
                slat_material.clone(),
                Instance::at(0.0, height / 2.0 - 0.05 - i as f32 * 0.1, 0.1).rotated_x(Rad(0.3)),
            )
        })
        .collect();
    window_parts.push(group("blinds", Instance::new(), slats));
    graph.add(group(
        "bedroom-window",
        on_wall(room, Wall::Right, 0.5, 1.6),
        window_parts,
    ));

    graph.add(group(
        "bedroom-mirror",
        on_wall(room, Wall::Back, -2.7, 1.5),
        mirror(factory, "bedroom-mirror", 0.7, 1.1, 0xb08d57),
    ));
    Ok(())
}

pub fn kitchen(
    graph: &mut SceneGraph,
    factory: &mut PrimitiveFactory,
    room: &RoomDescriptor,
) -> Result<(), SceneError> {
    let body = factory.lambert("upper-cabinet-body", 0xf1ede4);
    let handle = factory.phong("brushed-metal", 0x9ca3af, 60.0);
    let box_mesh = factory.cuboid(1.1, 0.7, 0.35);
    let handle_mesh = factory.cuboid(0.02, 0.2, 0.02);
    let cabinets = [-3.0, -1.8, -0.6, 0.6, 1.8]
        .into_iter()
        .enumerate()
        .map(|(i, x)| {
            group(
                &format!("upper-cabinet-{i}"),
                Instance::at(x, 0.0, 0.0),
                vec![
                    part(
                        &format!("upper-cabinet-{i}-box"),
                        box_mesh.clone(),
                        body.clone(),
                        Instance::at(0.0, 0.0, 0.175),
                    ),
                    part(
                        &format!("upper-cabinet-{i}-handle"),
                        handle_mesh.clone(),
                        handle.clone(),
                        Instance::at(0.45, -0.2, 0.36),
                    ),
                ],
            )
        })
        .collect();
    graph.add(group("upper-cabinets", on_wall(room, Wall::Back, 0.0, 2.2), cabinets));

    let backsplash = factory.material("backsplash-tile", || {
        Material::phong("", 0xffffff, 70.0).with_texture(Arc::new(paint::tile(
            &mut rand::thread_rng(),
            0xdfe7ec,
            0xaab4ba,
        )))
    });
    graph.add(part(
        "backsplash",
        factory.tiled_plane(6.0, 0.6, 12.0, 1.2),
        backsplash,
        Instance::at(-0.6, 1.2, room.back_wall_z() + 0.005),
    ));

    graph.add(group(
        "kitchen-window",
        on_wall(room, Wall::Right, 0.8, 1.6),
        window(factory, "kitchen-window", 1.4, 1.0),
    ));
    Ok(())
}

pub fn bathroom(
    graph: &mut SceneGraph,
    factory: &mut PrimitiveFactory,
    room: &RoomDescriptor,
) -> Result<(), SceneError> {
    let tiles = factory.material("wall-tile", || {
        Material::phong("", 0xffffff, 80.0).with_texture(Arc::new(paint::tile(
            &mut rand::thread_rng(),
            0xe3eef4,
            0xb5c4cc,
        )))
    });
    graph.add(part(
        "wall-tiles",
        factory.tiled_plane(room.width, 1.2, room.width / 0.5, 1.2 / 0.5),
        tiles,
        Instance::at(0.0, 0.6, room.back_wall_z() + 0.005),
    ));

    graph.add(group(
        "bathroom-mirror",
        on_wall(room, Wall::Back, 2.0, 1.75),
        mirror(factory, "bathroom-mirror", 0.9, 0.8, 0xd8d8d8),
    ));

    let chrome = factory.phong("chrome", 0xd9dde1, 100.0);
    let bracket = factory.cuboid(0.03, 0.03, 0.08);
    let towel_rack = vec![
        part(
            "towel-bar",
            factory.cylinder(0.012, 0.012, 0.7, 12),
            chrome.clone(),
            Instance::at(0.0, 0.0, 0.08).rotated_z(Rad(FRAC_PI_2)),
        ),
        part(
            "towel-bracket-left",
            bracket.clone(),
            chrome.clone(),
            Instance::at(-0.34, 0.0, 0.04),
        ),
        part(
            "towel-bracket-right",
            bracket,
            chrome,
            Instance::at(0.34, 0.0, 0.04),
        ),
        part(
            "towel",
            factory.cuboid(0.5, 0.6, 0.03),
            factory.lambert("towel-cotton", 0x6fa8c7),
            Instance::at(0.0, -0.28, 0.09).rotated_y(Rad(PI / 36.0)),
        ),
    ];
    graph.add(group(
        "towel-rack",
        on_wall(room, Wall::Left, 0.4, 1.2),
        towel_rack,
    ));
    Ok(())
}

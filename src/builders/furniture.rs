//! Furniture catalogs, one fixed manifest per room type.
//!
//! Every piece is a named group standing on the floor. Its translation is the
//! only transform on the group; child parts carry fixed offsets and, where a
//! part needs one, a constant rotation. Nothing here is random, so building the
//! same room twice yields identical node names and transforms.

use std::{f32::consts::FRAC_PI_2, sync::Arc};

use cgmath::Rad;

use crate::{
    data_structures::{
        instance::Instance,
        model::Material,
        scene_graph::{SceneGraph, SceneNode},
    },
    error::SceneError,
    resources::primitives::{PrimitiveFactory, group, part},
    room::RoomDescriptor,
};

const WOOD: u32 = 0x8b4513;
const DARK_WOOD: u32 = 0x654321;
const WHITE: u32 = 0xffffff;

fn wood(factory: &mut PrimitiveFactory) -> Arc<Material> {
    factory.phong("wood", WOOD, 25.0)
}

fn metal(factory: &mut PrimitiveFactory) -> Arc<Material> {
    factory.phong("brushed-metal", 0x9ca3af, 60.0)
}

fn porcelain(factory: &mut PrimitiveFactory) -> Arc<Material> {
    factory.phong("porcelain", WHITE, 90.0)
}

/// Four round legs under a rectangular top, `height` tall.
fn legs(
    factory: &mut PrimitiveFactory,
    prefix: &str,
    spread_x: f32,
    spread_z: f32,
    height: f32,
    material: &Arc<Material>,
) -> Vec<Box<dyn SceneNode>> {
    let leg = factory.cylinder(0.025, 0.025, height, 12);
    [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
        .into_iter()
        .enumerate()
        .map(|(i, (sx, sz))| {
            part(
                &format!("{prefix}-leg-{i}"),
                leg.clone(),
                material.clone(),
                Instance::at(sx * spread_x, height / 2.0, sz * spread_z),
            )
        })
        .collect()
}

/// Small lamp standing on a surface at the group origin.
fn lamp(factory: &mut PrimitiveFactory, name: &str, at: Instance) -> Box<dyn SceneNode> {
    let base = factory.phong("lamp-base", 0x3f3f46, 40.0);
    let shade = factory.lambert("lamp-shade", 0xf5e6c8);
    group(
        name,
        at,
        vec![
            part(
                &format!("{name}-base"),
                factory.cylinder(0.08, 0.1, 0.04, 20),
                base.clone(),
                Instance::at(0.0, 0.02, 0.0),
            ),
            part(
                &format!("{name}-pole"),
                factory.cylinder(0.012, 0.012, 0.3, 10),
                base,
                Instance::at(0.0, 0.19, 0.0),
            ),
            part(
                &format!("{name}-shade"),
                factory.cylinder(0.1, 0.16, 0.2, 20),
                shade,
                Instance::at(0.0, 0.42, 0.0),
            ),
        ],
    )
}

/// A flat rug with a contrasting inner field.
fn rug(
    factory: &mut PrimitiveFactory,
    name: &str,
    at: Instance,
    size: (f32, f32),
    colors: (u32, u32),
) -> Box<dyn SceneNode> {
    let (width, depth) = size;
    group(
        name,
        at,
        vec![
            part(
                &format!("{name}-border"),
                factory.cuboid(width, 0.01, depth),
                factory.lambert(&format!("{name}-border"), colors.0),
                Instance::at(0.0, 0.005, 0.0),
            ),
            part(
                &format!("{name}-field"),
                factory.cuboid(width - 0.3, 0.012, depth - 0.3),
                factory.lambert(&format!("{name}-field"), colors.1),
                Instance::at(0.0, 0.006, 0.0),
            ),
        ],
    )
}

fn sofa(factory: &mut PrimitiveFactory, at: Instance) -> Box<dyn SceneNode> {
    let fabric = factory.lambert("sofa-fabric", 0x4a5568);
    let cushion_fabric = factory.lambert("sofa-cushion", 0x5a6478);
    let arm = factory.cuboid(0.2, 0.6, 0.95);
    let cushion = factory.cuboid(0.8, 0.15, 0.7);
    let mut parts = vec![
        part(
            "sofa-base",
            factory.cuboid(2.6, 0.4, 0.95),
            fabric.clone(),
            Instance::at(0.0, 0.2, 0.0),
        ),
        // backrest on the +z side, the sofa faces -z
        part(
            "sofa-backrest",
            factory.cuboid(2.6, 0.5, 0.2),
            fabric.clone(),
            Instance::at(0.0, 0.65, 0.375),
        ),
        part(
            "sofa-arm-left",
            arm.clone(),
            fabric.clone(),
            Instance::at(-1.4, 0.3, 0.0),
        ),
        part("sofa-arm-right", arm, fabric, Instance::at(1.4, 0.3, 0.0)),
    ];
    for (i, x) in [-0.82, 0.0, 0.82].into_iter().enumerate() {
        parts.push(part(
            &format!("sofa-cushion-{i}"),
            cushion.clone(),
            cushion_fabric.clone(),
            Instance::at(x, 0.475, -0.08),
        ));
    }
    group("sofa", at, parts)
}

fn coffee_table(factory: &mut PrimitiveFactory, at: Instance) -> Box<dyn SceneNode> {
    let glass = factory.material("table-glass", || {
        Material::phong("", 0xbfe3f2, 100.0).with_opacity(0.4)
    });
    let metal = metal(factory);
    let mut parts = vec![
        part(
            "coffee-table-top",
            factory.cuboid(1.3, 0.03, 0.7),
            glass,
            Instance::at(0.0, 0.455, 0.0),
        ),
        part(
            "coffee-table-shelf",
            factory.cuboid(1.2, 0.03, 0.6),
            wood(factory),
            Instance::at(0.0, 0.15, 0.0),
        ),
    ];
    parts.extend(legs(factory, "coffee-table", 0.6, 0.3, 0.44, &metal));
    group("coffee-table", at, parts)
}

fn tv_stand(factory: &mut PrimitiveFactory, at: Instance) -> Box<dyn SceneNode> {
    let body = factory.lambert("tv-stand-body", 0x2d3748);
    let door = factory.lambert("tv-stand-door", 0x3b4758);
    let door_mesh = factory.cuboid(0.9, 0.35, 0.01);
    let handle_mesh = factory.cuboid(0.2, 0.02, 0.02);
    let metal = metal(factory);
    let mut parts = vec![part(
        "tv-stand-body",
        factory.cuboid(2.0, 0.5, 0.4),
        body,
        Instance::at(0.0, 0.25, 0.0),
    )];
    for (side, x) in [("left", -0.48), ("right", 0.48)] {
        parts.push(part(
            &format!("tv-stand-door-{side}"),
            door_mesh.clone(),
            door.clone(),
            Instance::at(x, 0.25, 0.205),
        ));
        parts.push(part(
            &format!("tv-stand-handle-{side}"),
            handle_mesh.clone(),
            metal.clone(),
            Instance::at(x, 0.36, 0.22),
        ));
    }
    group("tv-stand", at, parts)
}

fn tv(factory: &mut PrimitiveFactory, at: Instance) -> Box<dyn SceneNode> {
    let bezel = factory.phong("tv-bezel", 0x111111, 60.0);
    let screen = factory.phong("tv-screen", 0x000000, 120.0);
    group(
        "tv",
        at,
        vec![
            part(
                "tv-panel",
                factory.cuboid(1.8, 1.0, 0.08),
                bezel.clone(),
                Instance::at(0.0, 1.1, 0.0),
            ),
            part(
                "tv-screen",
                factory.plane(1.7, 0.92),
                screen,
                Instance::at(0.0, 1.1, 0.041),
            ),
            part(
                "tv-neck",
                factory.cuboid(0.06, 0.1, 0.04),
                bezel.clone(),
                Instance::at(0.0, 0.58, 0.0),
            ),
            part(
                "tv-foot",
                factory.cuboid(0.4, 0.03, 0.2),
                bezel,
                Instance::at(0.0, 0.515, 0.0),
            ),
        ],
    )
}

fn plant(factory: &mut PrimitiveFactory, at: Instance) -> Box<dyn SceneNode> {
    let leaves = factory.lambert("plant-leaves", 0x2f7d32);
    group(
        "plant",
        at,
        vec![
            part(
                "plant-pot",
                factory.cylinder(0.22, 0.17, 0.4, 16),
                factory.lambert("terracotta", 0xb5653a),
                Instance::at(0.0, 0.2, 0.0),
            ),
            part(
                "plant-soil",
                factory.cylinder(0.2, 0.2, 0.02, 16),
                factory.lambert("soil", 0x3e2b1f),
                Instance::at(0.0, 0.39, 0.0),
            ),
            part(
                "plant-trunk",
                factory.cylinder(0.03, 0.03, 0.5, 8),
                factory.lambert("bark", DARK_WOOD),
                Instance::at(0.0, 0.65, 0.0),
            ),
            part(
                "plant-foliage-low",
                factory.cone(0.35, 0.6, 16),
                leaves.clone(),
                Instance::at(0.0, 0.9, 0.0),
            ),
            part(
                "plant-foliage-mid",
                factory.cone(0.28, 0.5, 16),
                leaves.clone(),
                Instance::at(0.0, 1.2, 0.0),
            ),
            part(
                "plant-foliage-top",
                factory.cone(0.18, 0.4, 16),
                leaves,
                Instance::at(0.0, 1.45, 0.0),
            ),
        ],
    )
}

fn side_table(factory: &mut PrimitiveFactory, at: Instance) -> Box<dyn SceneNode> {
    let wood = wood(factory);
    group(
        "side-table",
        at,
        vec![
            part(
                "side-table-top",
                factory.cylinder(0.3, 0.3, 0.04, 24),
                wood.clone(),
                Instance::at(0.0, 0.55, 0.0),
            ),
            part(
                "side-table-stem",
                factory.cylinder(0.04, 0.04, 0.5, 12),
                wood.clone(),
                Instance::at(0.0, 0.3, 0.0),
            ),
            part(
                "side-table-foot",
                factory.cylinder(0.2, 0.2, 0.04, 24),
                wood,
                Instance::at(0.0, 0.02, 0.0),
            ),
            lamp(factory, "table-lamp", Instance::at(0.0, 0.57, 0.0)),
        ],
    )
}

pub fn living_room(
    graph: &mut SceneGraph,
    factory: &mut PrimitiveFactory,
    room: &RoomDescriptor,
) -> Result<(), SceneError> {
    let back = room.back_wall_z();
    graph.add(rug(
        factory,
        "area-rug",
        Instance::at(0.0, 0.0, 0.6),
        (3.0, 2.0),
        (0xb7a58a, 0x8c6f56),
    ));
    graph.add(tv_stand(factory, Instance::at(0.0, 0.0, back + 0.25)));
    graph.add(tv(factory, Instance::at(0.0, 0.0, back + 0.2)));
    graph.add(coffee_table(factory, Instance::at(0.0, 0.0, 0.1)));
    graph.add(sofa(factory, Instance::at(0.0, 0.0, 1.5)));
    graph.add(side_table(factory, Instance::at(1.85, 0.0, 1.5)));
    graph.add(plant(
        factory,
        Instance::at(room.right_wall_x() - 0.6, 0.0, back + 0.6),
    ));
    Ok(())
}

fn bed(factory: &mut PrimitiveFactory, at: Instance) -> Box<dyn SceneNode> {
    let linen = factory.lambert("linen", 0xf7f7f2);
    let pillow = factory.cuboid(0.6, 0.12, 0.35);
    group(
        "bed",
        at,
        vec![
            part(
                "bed-frame",
                factory.cuboid(1.8, 0.3, 2.2),
                wood(factory),
                Instance::at(0.0, 0.2, 0.0),
            ),
            part(
                "bed-mattress",
                factory.cuboid(1.7, 0.25, 2.1),
                linen.clone(),
                Instance::at(0.0, 0.475, 0.0),
            ),
            part(
                "bed-duvet",
                factory.cuboid(1.74, 0.06, 1.4),
                factory.lambert("duvet", 0x6b8fb5),
                Instance::at(0.0, 0.63, 0.33),
            ),
            part(
                "bed-pillow-left",
                pillow.clone(),
                linen.clone(),
                Instance::at(-0.42, 0.66, -0.8),
            ),
            part(
                "bed-pillow-right",
                pillow,
                linen,
                Instance::at(0.42, 0.66, -0.8),
            ),
        ],
    )
}

fn headboard(factory: &mut PrimitiveFactory, at: Instance) -> Box<dyn SceneNode> {
    let wood = wood(factory);
    group(
        "headboard",
        at,
        vec![
            part(
                "headboard-panel",
                factory.cuboid(2.0, 1.2, 0.1),
                wood.clone(),
                Instance::at(0.0, 0.9, 0.0),
            ),
            part(
                "headboard-cap",
                factory.cuboid(2.1, 0.06, 0.14),
                wood,
                Instance::at(0.0, 1.53, 0.0),
            ),
        ],
    )
}

fn nightstand(factory: &mut PrimitiveFactory, name: &str, at: Instance) -> Box<dyn SceneNode> {
    let wood = wood(factory);
    let front = factory.lambert("drawer-front", 0x9b5523);
    let knob = metal(factory);
    group(
        name,
        at,
        vec![
            part(
                &format!("{name}-body"),
                factory.cuboid(0.5, 0.55, 0.4),
                wood,
                Instance::at(0.0, 0.275, 0.0),
            ),
            part(
                &format!("{name}-drawer"),
                factory.cuboid(0.42, 0.18, 0.01),
                front,
                Instance::at(0.0, 0.38, 0.205),
            ),
            part(
                &format!("{name}-knob"),
                factory.cylinder(0.015, 0.015, 0.03, 10),
                knob,
                Instance::at(0.0, 0.38, 0.22).rotated_x(Rad(FRAC_PI_2)),
            ),
            lamp(factory, &format!("{name}-lamp"), Instance::at(0.0, 0.55, 0.0)),
        ],
    )
}

/// Wardrobe against the left wall, doors facing +x.
fn wardrobe(factory: &mut PrimitiveFactory, at: Instance) -> Box<dyn SceneNode> {
    let body = factory.lambert("wardrobe-body", DARK_WOOD);
    let door = factory.lambert("wardrobe-door", 0x7a5230);
    let door_mesh = factory.cuboid(0.01, 1.9, 0.72);
    let handle_mesh = factory.cylinder(0.01, 0.01, 0.3, 8);
    let metal = metal(factory);
    let mut parts = vec![part(
        "wardrobe-body",
        factory.cuboid(0.6, 2.0, 1.5),
        body,
        Instance::at(0.0, 1.0, 0.0),
    )];
    for (side, z) in [("left", 0.37), ("right", -0.37)] {
        parts.push(part(
            &format!("wardrobe-door-{side}"),
            door_mesh.clone(),
            door.clone(),
            Instance::at(0.305, 1.0, z),
        ));
        parts.push(part(
            &format!("wardrobe-handle-{side}"),
            handle_mesh.clone(),
            metal.clone(),
            Instance::at(0.32, 1.0, z.signum() * 0.06),
        ));
    }
    group("wardrobe", at, parts)
}

pub fn bedroom(
    graph: &mut SceneGraph,
    factory: &mut PrimitiveFactory,
    room: &RoomDescriptor,
) -> Result<(), SceneError> {
    let back = room.back_wall_z();
    graph.add(rug(
        factory,
        "bedroom-rug",
        Instance::at(0.0, 0.0, 0.3),
        (2.4, 1.6),
        (0xc9b8a6, 0xe4d8c8),
    ));
    graph.add(bed(factory, Instance::at(0.0, 0.0, back + 1.6)));
    graph.add(headboard(factory, Instance::at(0.0, 0.0, back + 0.4)));
    graph.add(nightstand(
        factory,
        "nightstand-left",
        Instance::at(-1.35, 0.0, back + 0.7),
    ));
    graph.add(nightstand(
        factory,
        "nightstand-right",
        Instance::at(1.35, 0.0, back + 0.7),
    ));
    graph.add(wardrobe(
        factory,
        Instance::at(room.left_wall_x() + 0.35, 0.0, 1.0),
    ));
    Ok(())
}

fn island(factory: &mut PrimitiveFactory, at: Instance) -> Box<dyn SceneNode> {
    group(
        "island",
        at,
        vec![
            part(
                "island-body",
                factory.cuboid(2.0, 0.85, 1.0),
                factory.lambert("island-body", 0xf4f4f2),
                Instance::at(0.0, 0.425, 0.0),
            ),
            part(
                "island-countertop",
                factory.cuboid(2.2, 0.05, 1.2),
                factory.phong("granite", 0x3a3a3a, 80.0),
                Instance::at(0.0, 0.875, 0.0),
            ),
        ],
    )
}

fn bar_stool(factory: &mut PrimitiveFactory, name: &str, at: Instance) -> Box<dyn SceneNode> {
    let metal = metal(factory);
    group(
        name,
        at,
        vec![
            part(
                &format!("{name}-seat"),
                factory.cylinder(0.2, 0.2, 0.05, 20),
                factory.lambert("stool-seat", 0x1f2937),
                Instance::at(0.0, 0.65, 0.0),
            ),
            part(
                &format!("{name}-post"),
                factory.cylinder(0.03, 0.03, 0.6, 12),
                metal.clone(),
                Instance::at(0.0, 0.33, 0.0),
            ),
            part(
                &format!("{name}-footrest"),
                factory.cylinder(0.15, 0.15, 0.02, 20),
                metal.clone(),
                Instance::at(0.0, 0.25, 0.0),
            ),
            part(
                &format!("{name}-base"),
                factory.cylinder(0.18, 0.2, 0.03, 20),
                metal,
                Instance::at(0.0, 0.015, 0.0),
            ),
        ],
    )
}

fn base_cabinet(
    factory: &mut PrimitiveFactory,
    index: usize,
    with_sink: bool,
    at: Instance,
) -> Box<dyn SceneNode> {
    let name = format!("base-cabinet-{index}");
    let metal = metal(factory);
    let mut parts = vec![
        part(
            &format!("{name}-body"),
            factory.cuboid(1.2, 0.85, 0.6),
            wood(factory),
            Instance::at(0.0, 0.425, 0.0),
        ),
        part(
            &format!("{name}-countertop"),
            factory.cuboid(1.2, 0.05, 0.62),
            factory.phong("granite", 0x3a3a3a, 80.0),
            Instance::at(0.0, 0.875, 0.01),
        ),
        part(
            &format!("{name}-door"),
            factory.cuboid(1.0, 0.6, 0.01),
            factory.lambert("drawer-front", 0x9b5523),
            Instance::at(0.0, 0.45, 0.305),
        ),
        part(
            &format!("{name}-handle"),
            factory.cuboid(0.3, 0.02, 0.02),
            metal.clone(),
            Instance::at(0.0, 0.7, 0.32),
        ),
    ];
    if with_sink {
        parts.push(part(
            "sink-basin",
            factory.cuboid(0.6, 0.03, 0.4),
            factory.phong("stainless", 0xc9ced3, 110.0),
            Instance::at(0.0, 0.89, 0.02),
        ));
        parts.push(part(
            "sink-faucet",
            factory.cylinder(0.02, 0.02, 0.3, 12),
            metal.clone(),
            Instance::at(0.0, 1.05, -0.22),
        ));
        parts.push(part(
            "sink-spout",
            factory.cuboid(0.03, 0.03, 0.2),
            metal,
            Instance::at(0.0, 1.19, -0.13),
        ));
    }
    group(&name, at, parts)
}

fn fridge(factory: &mut PrimitiveFactory, at: Instance) -> Box<dyn SceneNode> {
    let steel = factory.phong("fridge-steel", 0xc0c0c0, 90.0);
    let handle = factory.cuboid(0.03, 0.5, 0.03);
    let dark = factory.lambert("fridge-seal", 0x4b5563);
    group(
        "fridge",
        at,
        vec![
            part(
                "fridge-body",
                factory.cuboid(0.8, 2.0, 0.8),
                steel.clone(),
                Instance::at(0.0, 1.0, 0.0),
            ),
            part(
                "fridge-door-gap",
                factory.cuboid(0.78, 0.01, 0.01),
                dark,
                Instance::at(0.0, 1.3, 0.405),
            ),
            part(
                "fridge-handle-upper",
                handle.clone(),
                steel.clone(),
                Instance::at(-0.3, 1.65, 0.42),
            ),
            part(
                "fridge-handle-lower",
                handle,
                steel,
                Instance::at(-0.3, 0.8, 0.42),
            ),
        ],
    )
}

pub fn kitchen(
    graph: &mut SceneGraph,
    factory: &mut PrimitiveFactory,
    room: &RoomDescriptor,
) -> Result<(), SceneError> {
    let back = room.back_wall_z();
    graph.add(island(factory, Instance::at(0.0, 0.0, 0.4)));
    graph.add(bar_stool(factory, "bar-stool-left", Instance::at(-0.5, 0.0, 1.3)));
    graph.add(bar_stool(factory, "bar-stool-right", Instance::at(0.5, 0.0, 1.3)));
    for (i, x) in [-3.0, -1.8, -0.6, 0.6, 1.8].into_iter().enumerate() {
        graph.add(base_cabinet(factory, i, i == 2, Instance::at(x, 0.0, back + 0.3)));
    }
    graph.add(fridge(factory, Instance::at(room.right_wall_x() - 0.7, 0.0, back + 0.5)));
    Ok(())
}

fn bathtub(factory: &mut PrimitiveFactory, at: Instance) -> Box<dyn SceneNode> {
    let porcelain = porcelain(factory);
    group(
        "bathtub",
        at,
        vec![
            part(
                "bathtub-shell",
                factory.cuboid(1.7, 0.55, 0.85),
                porcelain,
                Instance::at(0.0, 0.275, 0.0),
            ),
            part(
                "bathtub-basin",
                factory.cuboid(1.5, 0.02, 0.65),
                factory.phong("bath-water", 0xdbe9f2, 100.0),
                Instance::at(0.0, 0.55, 0.0),
            ),
            part(
                "bathtub-faucet",
                factory.cylinder(0.02, 0.02, 0.2, 12),
                factory.phong("chrome", 0xd9dde1, 100.0),
                Instance::at(-0.75, 0.65, 0.0),
            ),
        ],
    )
}

fn vanity(factory: &mut PrimitiveFactory, at: Instance) -> Box<dyn SceneNode> {
    group(
        "vanity",
        at,
        vec![
            part(
                "vanity-cabinet",
                factory.cuboid(1.0, 0.8, 0.55),
                factory.lambert("vanity-wood", 0x6b4f3a),
                Instance::at(0.0, 0.4, 0.0),
            ),
            part(
                "vanity-top",
                factory.cuboid(1.05, 0.04, 0.58),
                porcelain(factory),
                Instance::at(0.0, 0.82, 0.0),
            ),
            part(
                "vanity-basin",
                factory.cylinder(0.22, 0.18, 0.12, 24),
                porcelain(factory),
                Instance::at(0.0, 0.9, 0.02),
            ),
            part(
                "vanity-faucet",
                factory.cylinder(0.015, 0.015, 0.2, 10),
                factory.phong("chrome", 0xd9dde1, 100.0),
                Instance::at(0.0, 0.94, -0.2),
            ),
        ],
    )
}

/// Toilet against the right wall, facing -x.
fn toilet(factory: &mut PrimitiveFactory, at: Instance) -> Box<dyn SceneNode> {
    let porcelain = porcelain(factory);
    group(
        "toilet",
        at,
        vec![
            part(
                "toilet-base",
                factory.cylinder(0.17, 0.2, 0.4, 20),
                porcelain.clone(),
                Instance::at(0.0, 0.2, 0.0),
            ),
            part(
                "toilet-seat",
                factory.cylinder(0.22, 0.22, 0.03, 20),
                porcelain.clone(),
                Instance::at(-0.05, 0.415, 0.0),
            ),
            part(
                "toilet-tank",
                factory.cuboid(0.2, 0.45, 0.45),
                porcelain.clone(),
                Instance::at(0.25, 0.6, 0.0),
            ),
            part(
                "toilet-lid",
                factory.cuboid(0.22, 0.03, 0.47),
                porcelain,
                Instance::at(0.25, 0.84, 0.0),
            ),
        ],
    )
}

pub fn bathroom(
    graph: &mut SceneGraph,
    factory: &mut PrimitiveFactory,
    room: &RoomDescriptor,
) -> Result<(), SceneError> {
    let back = room.back_wall_z();
    graph.add(bathtub(
        factory,
        Instance::at(room.left_wall_x() + 0.9, 0.0, back + 0.45),
    ));
    graph.add(vanity(factory, Instance::at(2.0, 0.0, back + 0.3)));
    graph.add(toilet(
        factory,
        Instance::at(room.right_wall_x() - 0.45, 0.0, 0.3),
    ));
    graph.add(rug(
        factory,
        "bath-mat",
        Instance::at(-2.4, 0.0, back + 1.4),
        (0.9, 0.55),
        (0x7fa7c4, 0x9cbfd8),
    ));
    Ok(())
}

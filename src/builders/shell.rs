//! Floor, walls, ceiling and baseboards.
//!
//! The front wall is left out so the default camera looks into the room.

use std::{f32::consts::FRAC_PI_2, sync::Arc};

use cgmath::Rad;

use crate::{
    data_structures::{instance::Instance, model::Material, scene_graph::SceneGraph},
    error::SceneError,
    resources::{
        paint,
        primitives::{PrimitiveFactory, group, part},
    },
    room::RoomDescriptor,
};

pub const BASEBOARD_HEIGHT: f32 = 0.12;
pub const BASEBOARD_DEPTH: f32 = 0.03;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloorFinish {
    Hardwood,
    Carpet,
    KitchenTile,
    BathroomTile,
}

impl FloorFinish {
    pub fn material_name(&self) -> &'static str {
        match self {
            FloorFinish::Hardwood => "floor-hardwood",
            FloorFinish::Carpet => "floor-carpet",
            FloorFinish::KitchenTile => "floor-kitchen-tile",
            FloorFinish::BathroomTile => "floor-bathroom-tile",
        }
    }

    /// Texture repeats per unit of floor.
    fn density(&self) -> f32 {
        match self {
            FloorFinish::Hardwood => 0.5,
            FloorFinish::Carpet | FloorFinish::KitchenTile | FloorFinish::BathroomTile => 1.0,
        }
    }

    fn paint(&self) -> image::RgbaImage {
        let mut rng = rand::thread_rng();
        match self {
            FloorFinish::Hardwood => paint::hardwood(&mut rng),
            FloorFinish::Carpet => paint::carpet(&mut rng),
            FloorFinish::KitchenTile => paint::tile(&mut rng, 0xe8e4dc, 0x9a948a),
            FloorFinish::BathroomTile => paint::tile(&mut rng, 0xf4f7f9, 0xc3cdd4),
        }
    }

    fn shininess(&self) -> Option<f32> {
        match self {
            FloorFinish::Hardwood => Some(20.0),
            FloorFinish::KitchenTile | FloorFinish::BathroomTile => Some(60.0),
            FloorFinish::Carpet => None,
        }
    }
}

pub fn build(
    graph: &mut SceneGraph,
    factory: &mut PrimitiveFactory,
    room: &RoomDescriptor,
    finish: FloorFinish,
) -> Result<(), SceneError> {
    let (w, h, d) = (room.width, room.height, room.depth);

    let floor_material = factory.material(finish.material_name(), || {
        let base = match finish.shininess() {
            Some(shininess) => Material::phong("", 0xffffff, shininess),
            None => Material::lambert("", 0xffffff),
        };
        base.with_texture(Arc::new(finish.paint()))
    });
    let wall_material = factory.material("wall-paint", || {
        Material::lambert("", 0xffffff).with_texture(Arc::new(paint::wall_paint(
            &mut rand::thread_rng(),
        )))
    });
    let ceiling_material = factory.lambert("ceiling", 0xfdfdfb);
    let baseboard_material = factory.phong("baseboard", 0xf0ede6, 30.0);

    let floor_mesh = factory.tiled_plane(w, d, w * finish.density(), d * finish.density());
    let back_wall = factory.tiled_plane(w, h, w / 4.0, h / 4.0);
    let side_wall = factory.tiled_plane(d, h, d / 4.0, h / 4.0);
    let ceiling = factory.plane(w, d);
    let back_board = factory.cuboid(w, BASEBOARD_HEIGHT, BASEBOARD_DEPTH);
    let side_board = factory.cuboid(BASEBOARD_DEPTH, BASEBOARD_HEIGHT, d);

    let board_y = BASEBOARD_HEIGHT / 2.0;
    let inset = BASEBOARD_DEPTH / 2.0;
    graph.add(group(
        "shell",
        Instance::new(),
        vec![
            part(
                "floor",
                floor_mesh,
                floor_material,
                Instance::new().rotated_x(Rad(-FRAC_PI_2)),
            ),
            part(
                "back-wall",
                back_wall,
                wall_material.clone(),
                Instance::at(0.0, h / 2.0, room.back_wall_z()),
            ),
            part(
                "left-wall",
                side_wall.clone(),
                wall_material.clone(),
                Instance::at(room.left_wall_x(), h / 2.0, 0.0).rotated_y(Rad(FRAC_PI_2)),
            ),
            part(
                "right-wall",
                side_wall,
                wall_material,
                Instance::at(room.right_wall_x(), h / 2.0, 0.0).rotated_y(Rad(-FRAC_PI_2)),
            ),
            part(
                "ceiling",
                ceiling,
                ceiling_material,
                Instance::at(0.0, h, 0.0).rotated_x(Rad(FRAC_PI_2)),
            ),
            part(
                "baseboard-back",
                back_board,
                baseboard_material.clone(),
                Instance::at(0.0, board_y, room.back_wall_z() + inset),
            ),
            part(
                "baseboard-left",
                side_board.clone(),
                baseboard_material.clone(),
                Instance::at(room.left_wall_x() + inset, board_y, 0.0),
            ),
            part(
                "baseboard-right",
                side_board,
                baseboard_material,
                Instance::at(room.right_wall_x() - inset, board_y, 0.0),
            ),
        ],
    ));
    Ok(())
}

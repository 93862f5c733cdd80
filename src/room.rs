//! Room archetypes and their fixed dimensions.
//!
//! [`RoomType`] drives every builder. [`RoomBuilders`] is the dispatch table that
//! maps a room type to its floor paint, its fixtures and its furniture catalog,
//! so adding a room type is a compile error until all three exist.

use std::{fmt, str::FromStr};

use crate::{
    builders::{environment, furniture, shell::FloorFinish},
    data_structures::scene_graph::SceneGraph,
    error::SceneError,
    resources::primitives::PrimitiveFactory,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoomType {
    LivingRoom,
    Bedroom,
    Kitchen,
    Bathroom,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [
        RoomType::LivingRoom,
        RoomType::Bedroom,
        RoomType::Kitchen,
        RoomType::Bathroom,
    ];

    /// The identifier used by the room picker of the host UI.
    pub fn id(&self) -> &'static str {
        match self {
            RoomType::LivingRoom => "living-room",
            RoomType::Bedroom => "bedroom",
            RoomType::Kitchen => "kitchen",
            RoomType::Bathroom => "bathroom",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RoomType::LivingRoom => "Living Room",
            RoomType::Bedroom => "Master Bedroom",
            RoomType::Kitchen => "Kitchen",
            RoomType::Bathroom => "Bathroom",
        }
    }

    pub fn descriptor(&self) -> RoomDescriptor {
        RoomDescriptor::default()
    }

    pub fn builders(&self) -> &'static RoomBuilders {
        match self {
            RoomType::LivingRoom => &LIVING_ROOM,
            RoomType::Bedroom => &BEDROOM,
            RoomType::Kitchen => &KITCHEN,
            RoomType::Bathroom => &BATHROOM,
        }
    }
}

impl FromStr for RoomType {
    type Err = SceneError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        RoomType::ALL
            .into_iter()
            .find(|room| room.id() == id.trim())
            .ok_or_else(|| SceneError::Configuration(format!("unknown room type '{}'", id)))
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Room envelope in scene units. The room is centered on the origin in x/z and
/// stands on the floor plane `y = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoomDescriptor {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for RoomDescriptor {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 3.0,
            depth: 6.0,
        }
    }
}

impl RoomDescriptor {
    pub fn validate(&self) -> Result<(), SceneError> {
        let dims = [self.width, self.height, self.depth];
        if dims.iter().all(|d| d.is_finite() && *d > 0.0) {
            Ok(())
        } else {
            Err(SceneError::Configuration(format!(
                "room dimensions must be positive, got {}x{}x{}",
                self.width, self.height, self.depth
            )))
        }
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_depth(&self) -> f32 {
        self.depth / 2.0
    }

    /// z of the back wall plane.
    pub fn back_wall_z(&self) -> f32 {
        -self.depth / 2.0
    }

    /// x of the left wall plane.
    pub fn left_wall_x(&self) -> f32 {
        -self.width / 2.0
    }

    /// x of the right wall plane.
    pub fn right_wall_x(&self) -> f32 {
        self.width / 2.0
    }
}

type DetailFn = fn(&mut SceneGraph, &mut PrimitiveFactory, &RoomDescriptor) -> Result<(), SceneError>;

/// Per room type specialization of the scene builders.
pub struct RoomBuilders {
    pub floor: FloorFinish,
    pub environment: DetailFn,
    pub furniture: DetailFn,
}

static LIVING_ROOM: RoomBuilders = RoomBuilders {
    floor: FloorFinish::Hardwood,
    environment: environment::living_room,
    furniture: furniture::living_room,
};

static BEDROOM: RoomBuilders = RoomBuilders {
    floor: FloorFinish::Carpet,
    environment: environment::bedroom,
    furniture: furniture::bedroom,
};

static KITCHEN: RoomBuilders = RoomBuilders {
    floor: FloorFinish::KitchenTile,
    environment: environment::kitchen,
    furniture: furniture::kitchen,
};

static BATHROOM: RoomBuilders = RoomBuilders {
    floor: FloorFinish::BathroomTile,
    environment: environment::bathroom,
    furniture: furniture::bathroom,
};

//! Viewer configuration.
//!
//! [`ViewerConfig::default`] reproduces the stock viewer: a 75° camera at
//! (5, 5, 5) looking at the room center, a soft ambient light plus one
//! directional light, and one candidate asset for the living room.

use std::collections::HashMap;

use crate::{error::SceneError, room::RoomType};

/// Optional limits for the orbit camera. All bounds are inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBounds {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for CameraBounds {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            max_distance: 30.0,
            min_y: 0.2,
            max_y: 20.0,
        }
    }
}

impl CameraBounds {
    /// Rejects empty ranges, negative distances and NaN limits.
    pub fn validate(&self) -> Result<(), SceneError> {
        let limits = [self.min_distance, self.max_distance, self.min_y, self.max_y];
        if limits.iter().any(|limit| limit.is_nan())
            || self.min_distance < 0.0
            || self.min_distance > self.max_distance
            || self.min_y > self.max_y
        {
            return Err(SceneError::Configuration(format!(
                "invalid camera bounds: distance {}..{}, height {}..{}",
                self.min_distance, self.max_distance, self.min_y, self.max_y
            )));
        }
        Ok(())
    }

    /// Same limits with both ranges ordered, distances at least 0 and NaN
    /// limits replaced by the defaults, so clamping against them cannot fail.
    pub fn normalized(&self) -> Self {
        let defaults = Self::default();
        let ordered = |lo: f32, hi: f32, fallback: (f32, f32)| {
            if lo.is_nan() || hi.is_nan() {
                fallback
            } else {
                (lo.min(hi), lo.max(hi))
            }
        };
        let (min_distance, max_distance) = ordered(
            self.min_distance,
            self.max_distance,
            (defaults.min_distance, defaults.max_distance),
        );
        let (min_y, max_y) = ordered(self.min_y, self.max_y, (defaults.min_y, defaults.max_y));
        Self {
            min_distance: min_distance.max(0.0),
            max_distance: max_distance.max(0.0),
            min_y,
            max_y,
        }
    }
}

/// Ordered candidate asset locations per room type.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetCatalog {
    candidates: HashMap<RoomType, Vec<String>>,
}

impl Default for AssetCatalog {
    fn default() -> Self {
        let mut candidates = HashMap::new();
        candidates.insert(
            RoomType::LivingRoom,
            vec!["models/living-room.glb".to_string()],
        );
        Self { candidates }
    }
}

impl AssetCatalog {
    pub fn empty() -> Self {
        Self {
            candidates: HashMap::new(),
        }
    }

    pub fn candidates(&self, room: RoomType) -> &[String] {
        self.candidates.get(&room).map_or(&[], Vec::as_slice)
    }

    pub fn set(&mut self, room: RoomType, locations: Vec<String>) {
        self.candidates.insert(room, locations);
    }

    pub fn with(mut self, room: RoomType, locations: &[&str]) -> Self {
        self.set(room, locations.iter().map(|l| l.to_string()).collect());
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightConfig {
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    pub directional_color: u32,
    pub directional_intensity: f32,
    pub directional_position: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            ambient_color: 0xffffff,
            ambient_intensity: 0.6,
            directional_color: 0xffffff,
            directional_intensity: 0.8,
            directional_position: [10.0, 10.0, 5.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub clear_colour: wgpu::Color,
    pub camera_start: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Radians of orbit per horizontal pixel of drag.
    pub orbit_speed: f32,
    /// Units of height per vertical pixel of drag.
    pub lift_speed: f32,
    pub zoom_factor: f32,
    pub camera_bounds: Option<CameraBounds>,
    pub lights: LightConfig,
    /// Directory (native) or origin-relative path (web) that relative asset locations resolve against.
    pub asset_base: String,
    pub assets: AssetCatalog,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            // 0xf8fafc
            clear_colour: wgpu::Color {
                r: 248.0 / 255.0,
                g: 250.0 / 255.0,
                b: 252.0 / 255.0,
                a: 1.0,
            },
            camera_start: [5.0, 5.0, 5.0],
            fovy: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            orbit_speed: 0.01,
            lift_speed: 0.01,
            zoom_factor: 1.1,
            camera_bounds: None,
            lights: LightConfig::default(),
            asset_base: "assets".to_string(),
            assets: AssetCatalog::default(),
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        match &self.camera_bounds {
            Some(bounds) => bounds.validate(),
            None => Ok(()),
        }
    }

    pub fn with_assets(mut self, assets: AssetCatalog) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_asset_base(mut self, asset_base: &str) -> Self {
        self.asset_base = asset_base.to_string();
        self
    }

    pub fn with_camera_bounds(mut self, bounds: CameraBounds) -> Self {
        self.camera_bounds = Some(bounds);
        self
    }

    pub fn with_camera_start(mut self, position: [f32; 3]) -> Self {
        self.camera_start = position;
        self
    }

    pub fn with_zoom_factor(mut self, factor: f32) -> Self {
        self.zoom_factor = factor;
        self
    }
}

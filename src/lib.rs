//! interior-ngin
//!
//! A procedural interior viewer for four furnished room archetypes: living room,
//! bedroom, kitchen and bathroom. Each room is assembled from primitive meshes
//! (shell, wall fixtures and furniture), optionally superimposed with an
//! external glTF/OBJ asset, and shown through an orbit camera. Runs natively and
//! in the browser.
//!
//! High-level modules
//! - `builders`: procedural room shell, environment and furniture builders
//! - `camera`: camera, projection and the orbit/zoom controller
//! - `config`: viewer configuration and asset catalog
//! - `context`: GPU instance, adapter, device and queue shared by all surfaces
//! - `data_structures`: meshes, materials, instances, textures and the scene graph
//! - `flow`: winit event loop and the window implementation of the render host
//! - `host`: the traits the viewer uses to talk to its container
//! - `loader`: external asset loading with procedural fallback
//! - `pipelines`: render pipelines and the scene shader
//! - `render`: wgpu render surface
//! - `resources`: primitive factory, procedural textures, glTF/OBJ parsing
//! - `room`: room types and dimensions
//! - `viewer`: scene lifecycle management
//! - `viewport`: container resize handling
//!

pub mod builders;
pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod host;
pub mod loader;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod room;
pub mod viewer;
pub mod viewport;

// Re-exports commonly used types for convenience in downstream code.
pub use builders::{build_room, build_room_by_id};
pub use camera::{Camera, OrbitController, Projection};
pub use config::{AssetCatalog, CameraBounds, LightConfig, ViewerConfig};
pub use data_structures::scene_graph::{SceneGraph, SceneNode};
pub use error::SceneError;
pub use flow::run;
pub use room::{RoomDescriptor, RoomType};
pub use viewer::{Lifecycle, LoadState, PointerInput, RoomViewer, SessionToken};
pub use viewport::ViewportSize;

//! The boundary between the viewer and whatever displays it.
//!
//! A [`RenderHost`] owns the container the viewer is shown in: it measures it,
//! creates render surfaces for it, routes input to the viewer while listeners
//! are attached and schedules frames. The wgpu/winit implementation lives in
//! [`crate::flow`]; tests use recording hosts.

use crate::{
    camera::{Camera, Projection},
    data_structures::scene_graph::SceneGraph,
    error::SceneError,
    viewport::ViewportSize,
};

/// Identifies one scheduled frame so it can be cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// An output buffer attached to the host container.
pub trait RenderSurface {
    fn size(&self) -> ViewportSize;

    fn resize(&mut self, size: ViewportSize);

    fn render(
        &mut self,
        scene: &SceneGraph,
        camera: &Camera,
        projection: &Projection,
    ) -> Result<(), SceneError>;

    /// Frees GPU resources and detaches from the container.
    fn release(&mut self) -> Result<(), SceneError>;
}

pub trait RenderHost {
    type Surface: RenderSurface;

    /// Current size of the container in physical pixels.
    fn container_size(&self) -> ViewportSize;

    fn create_surface(
        &mut self,
        size: ViewportSize,
        clear_colour: wgpu::Color,
    ) -> Result<Self::Surface, SceneError>;

    /// Starts routing pointer, wheel and resize input to the viewer.
    fn attach_listeners(&mut self) -> Result<(), SceneError>;

    fn detach_listeners(&mut self) -> Result<(), SceneError>;

    fn request_frame(&mut self) -> FrameHandle;

    fn cancel_frame(&mut self, frame: FrameHandle);
}

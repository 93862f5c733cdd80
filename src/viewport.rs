//! Keeps projection and output buffer in step with the host container.

use crate::{camera::Projection, host::RenderSurface};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A surface cannot be configured with a zero extent.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for ViewportSize {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Applies a container size to the projection and the surface. Returns whether
/// anything changed; empty sizes and unchanged sizes are ignored.
pub fn fit_viewport<S: RenderSurface + ?Sized>(
    size: ViewportSize,
    projection: &mut Projection,
    surface: &mut S,
) -> bool {
    if size.is_empty() || surface.size() == size {
        return false;
    }
    projection.resize(size.width, size.height);
    surface.resize(size);
    true
}

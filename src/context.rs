//! GPU handles shared by every surface created for one window.
//!
//! Surfaces come and go with each mount, the device outlives them. All wgpu
//! handles are reference counted, so cloning a [`GpuContext`] is cheap.

use std::sync::Arc;

use anyhow::Context as _;
use winit::window::Window;

#[derive(Clone, Debug)]
pub struct GpuContext {
    pub window: Arc<Window>,
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GpuContext {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        // BackendBit::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });

        // only used to find a compatible adapter, every mount creates its own surface
        let probe = instance
            .create_surface(window.clone())
            .context("Could not create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&probe),
                force_fallback_adapter: false,
            })
            .await
            .context("No compatible graphics adapter")?;
        drop(probe);

        log::info!("Requesting device on {}", adapter.get_info().name);
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                // WebGL doesn't support all of wgpu's features
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::default()
                },
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
                ..Default::default()
            })
            .await
            .context("Could not open the graphics device")?;

        Ok(Self {
            window,
            instance,
            adapter,
            device,
            queue,
        })
    }

    /// Creates and configures a surface on the context's window.
    pub fn create_surface(
        &self,
        width: u32,
        height: u32,
    ) -> anyhow::Result<(wgpu::Surface<'static>, wgpu::SurfaceConfiguration)> {
        let surface = self
            .instance
            .create_surface(self.window.clone())
            .context("Could not create a surface for the window")?;

        let surface_caps = surface.get_capabilities(&self.adapter);
        // The shader writes linear colours and relies on an Srgb surface for the conversion.
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("The surface supports no formats on this adapter")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&self.device, &config);
        Ok((surface, config))
    }
}

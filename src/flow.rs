//! Window host and application event loop.
//!
//! [`WindowHost`] is the winit/wgpu implementation of [`RenderHost`]: the window
//! is the container, every mount gets a fresh [`GpuRenderer`] and frames are
//! scheduled through redraw requests. [`ViewerApp`] drives a [`RoomViewer`] from
//! the winit event loop and runs asset loads on the platform executor.
//!
//! # Controls
//!
//! - left drag orbits and lifts the camera, the wheel zooms
//! - `1`..`4` switch between the room types
//! - `U` unmounts the viewer, `M` mounts the selected room again
//! - `Escape` closes the window

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::{
    config::ViewerConfig,
    context::GpuContext,
    error::SceneError,
    host::{FrameHandle, RenderHost},
    loader::{AssetLoadJob, HttpFetcher, LoadEvent},
    render::GpuRenderer,
    room::RoomType,
    viewer::{LoadState, PointerInput, RoomViewer},
    viewport::ViewportSize,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

const TITLE: &str = "Interior viewer";

/// Events delivered to the event loop from outside of it.
pub enum ViewerEvent {
    /// The GPU context finished initialising (web only, natively this is blocking).
    Initialized(GpuContext),
    Load(LoadEvent),
    Exit,
}

impl std::fmt::Debug for ViewerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(_) => f.write_str("Initialized"),
            Self::Load(event) => f.debug_tuple("Load").field(event).finish(),
            Self::Exit => f.write_str("Exit"),
        }
    }
}

/// A winit window as render container.
pub struct WindowHost {
    gpu: GpuContext,
    listening: bool,
    frame_counter: u64,
    pending_frame: Option<FrameHandle>,
}

impl WindowHost {
    pub fn new(gpu: GpuContext) -> Self {
        Self {
            gpu,
            listening: false,
            frame_counter: 0,
            pending_frame: None,
        }
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.gpu.window
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }
}

impl RenderHost for WindowHost {
    type Surface = GpuRenderer;

    fn container_size(&self) -> ViewportSize {
        self.gpu.window.inner_size().into()
    }

    fn create_surface(
        &mut self,
        size: ViewportSize,
        clear_colour: wgpu::Color,
    ) -> Result<GpuRenderer, SceneError> {
        GpuRenderer::new(self.gpu.clone(), size, clear_colour)
    }

    fn attach_listeners(&mut self) -> Result<(), SceneError> {
        self.listening = true;
        Ok(())
    }

    fn detach_listeners(&mut self) -> Result<(), SceneError> {
        if !self.listening {
            return Err(SceneError::teardown("input listeners", "not attached"));
        }
        self.listening = false;
        Ok(())
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.frame_counter += 1;
        let frame = FrameHandle(self.frame_counter);
        self.pending_frame = Some(frame);
        self.gpu.window.request_redraw();
        frame
    }

    fn cancel_frame(&mut self, frame: FrameHandle) {
        // an already issued redraw request still arrives but finds no frame to render
        if self.pending_frame == Some(frame) {
            self.pending_frame = None;
        }
    }
}

fn title_for(state: LoadState) -> String {
    match state {
        LoadState::Loading(progress) => format!("{TITLE} - loading {progress}%"),
        LoadState::Failed => format!("{TITLE} - showing procedural furniture"),
        LoadState::Idle | LoadState::Ready => TITLE.to_string(),
    }
}

pub struct ViewerApp {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: EventLoopProxy<ViewerEvent>,
    config: ViewerConfig,
    room: RoomType,
    viewer: Option<RoomViewer<WindowHost>>,
    initializing: bool,
    cursor: PhysicalPosition<f64>,
}

impl ViewerApp {
    pub fn new(
        event_loop: &EventLoop<ViewerEvent>,
        config: ViewerConfig,
        room: RoomType,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            proxy: event_loop.create_proxy(),
            config,
            room,
            viewer: None,
            initializing: false,
            cursor: PhysicalPosition::new(0.0, 0.0),
        })
    }

    fn on_initialized(&mut self, gpu: GpuContext) {
        let window = gpu.window.clone();
        let mut viewer = RoomViewer::new(WindowHost::new(gpu), self.config.clone());
        viewer.on_load_state(move |state| window.set_title(&title_for(state)));
        self.viewer = Some(viewer);
        self.mount(self.room);
    }

    fn mount(&mut self, room: RoomType) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        self.room = room;
        match viewer.mount(room) {
            Ok(Some(job)) => self.spawn_load(job),
            Ok(None) => (),
            Err(e) => log::error!("Could not show {}: {}", room, e),
        }
    }

    fn spawn_load(&self, job: AssetLoadJob) {
        let fetcher = HttpFetcher::new(&self.config.asset_base);
        let proxy = self.proxy.clone();
        let load = job.run(fetcher, move |event| {
            if proxy.send_event(ViewerEvent::Load(event)).is_err() {
                log::warn!("Event loop closed before an asset load finished");
            }
        });

        #[cfg(not(target_arch = "wasm32"))]
        self.async_runtime.spawn(load);

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(load);
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        let room = match key {
            KeyCode::Digit1 => Some(RoomType::LivingRoom),
            KeyCode::Digit2 => Some(RoomType::Bedroom),
            KeyCode::Digit3 => Some(RoomType::Kitchen),
            KeyCode::Digit4 => Some(RoomType::Bathroom),
            _ => None,
        };
        if let Some(room) = room {
            self.mount(room);
            return;
        }
        match key {
            KeyCode::KeyU => {
                if let Some(viewer) = self.viewer.as_mut() {
                    viewer.unmount();
                }
            }
            KeyCode::KeyM => {
                let room = self
                    .viewer
                    .as_ref()
                    .and_then(RoomViewer::selected_room)
                    .unwrap_or(self.room);
                self.mount(room);
            }
            KeyCode::Escape => self.exit(event_loop),
            _ => (),
        }
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.unmount();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler<ViewerEvent> for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() || self.initializing {
            return;
        }
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title(TITLE);

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let canvas = wgpu::web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(CANVAS_ID));
            match canvas {
                Some(canvas) => {
                    window_attributes = window_attributes.with_canvas(Some(canvas.unchecked_into()));
                }
                None => log::warn!("No #{} element, appending a new canvas", CANVAS_ID),
            }
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Could not create a window: {}", e);
                event_loop.exit();
                return;
            }
        };
        self.initializing = true;

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(GpuContext::new(window)) {
                Ok(gpu) => {
                    self.initializing = false;
                    self.on_initialized(gpu);
                }
                Err(e) => {
                    log::error!("{:#}", e);
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match GpuContext::new(window).await {
                    Ok(gpu) => {
                        if proxy.send_event(ViewerEvent::Initialized(gpu)).is_err() {
                            log::error!("Event loop closed during initialisation");
                        }
                    }
                    Err(e) => {
                        log::error!("{:#}", e);
                        if proxy.send_event(ViewerEvent::Exit).is_err() {
                            log::error!("Event loop closed before exit was requested");
                        }
                    }
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: ViewerEvent) {
        match event {
            ViewerEvent::Initialized(gpu) => {
                self.initializing = false;
                self.on_initialized(gpu);
            }
            ViewerEvent::Load(event) => {
                if let Some(viewer) = self.viewer.as_mut() {
                    viewer.apply_load_event(event);
                }
            }
            ViewerEvent::Exit => self.exit(event_loop),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(key),
                    state: ElementState::Pressed,
                    repeat: false,
                    ..
                },
            ..
        } = event
        {
            self.on_key(event_loop, key);
            return;
        }
        if let WindowEvent::CloseRequested = event {
            self.exit(event_loop);
            return;
        }

        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        let pointer = match event {
            WindowEvent::Resized(size) => {
                viewer.resize_to(size.into());
                None
            }
            WindowEvent::RedrawRequested => {
                viewer.frame();
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = position;
                Some(PointerInput::Move {
                    x: position.x as f32,
                    y: position.y as f32,
                })
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => Some(match state {
                ElementState::Pressed => PointerInput::Down {
                    x: self.cursor.x as f32,
                    y: self.cursor.y as f32,
                },
                ElementState::Released => PointerInput::Up,
            }),
            WindowEvent::CursorLeft { .. } => Some(PointerInput::Up),
            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports scrolling up as positive, which zooms in
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y,
                    MouseScrollDelta::PixelDelta(position) => -position.y as f32,
                };
                Some(PointerInput::Wheel { delta_y })
            }
            _ => None,
        };
        if let Some(input) = pointer {
            if viewer.host().is_listening() {
                viewer.handle_pointer(input);
            }
        }
    }
}

/// Opens a window showing `room` and runs until it is closed.
pub fn run(config: ViewerConfig, room: RoomType) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        // fails only if a logger is already installed
        let _ = console_log::init_with_level(log::Level::Info);
    }

    let event_loop: EventLoop<ViewerEvent> = EventLoop::with_user_event().build()?;
    let mut app = ViewerApp::new(&event_loop, config, room)?;
    event_loop.run_app(&mut app)?;
    Ok(())
}

/// Web entry point: shows the room with the given identifier in the `#canvas` element.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn run_web(room: &str) -> Result<(), JsValue> {
    let room: RoomType = room
        .parse()
        .map_err(|e: SceneError| JsValue::from_str(&e.to_string()))?;
    run(ViewerConfig::default(), room).map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

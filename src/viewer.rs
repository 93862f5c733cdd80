//! Scene lifecycle management.
//!
//! A [`RoomViewer`] owns everything that lives for one mount: the scene graph,
//! the camera, the render surface, the input listeners and the pending frame.
//! Room changes stage the complete new scene before anything of the old one is
//! released, so a failed rebuild leaves the previous room on screen.
//!
//! ```text
//! Unmounted -> Building -> Rendering -> TearingDown -> Unmounted
//! ```

use std::fmt;

use cgmath::Point3;
use log::{debug, error, info, warn};

use crate::{
    builders,
    camera::{Camera, OrbitController, Projection},
    config::ViewerConfig,
    data_structures::scene_graph::SceneGraph,
    error::SceneError,
    host::{FrameHandle, RenderHost, RenderSurface},
    loader::{AssetCache, AssetLoadJob, LoadEvent, LoadEventKind},
    room::RoomType,
    viewport::{ViewportSize, fit_viewport},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Unmounted,
    Building,
    Rendering,
    TearingDown,
}

/// What the loading overlay shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading(u8),
    Ready,
    Failed,
}

/// Identifies one mount. Advanced on every rebuild and teardown so results of
/// asset loads started for an earlier mount can be recognised and dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionToken(u64);

impl SessionToken {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Raw input from the render surface, in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    /// Positive values scroll away from the scene.
    Wheel { delta_y: f32 },
}

pub type LoadStateObserver = Box<dyn FnMut(LoadState)>;

pub struct RoomViewer<H: RenderHost> {
    host: H,
    config: ViewerConfig,
    selected: Option<RoomType>,
    lifecycle: Lifecycle,
    session: SessionToken,
    scene: Option<SceneGraph>,
    camera: Camera,
    projection: Projection,
    controller: OrbitController,
    surface: Option<H::Surface>,
    listeners_attached: bool,
    frame: Option<FrameHandle>,
    load_state: LoadState,
    observer: Option<LoadStateObserver>,
    assets: AssetCache,
}

impl<H: RenderHost> RoomViewer<H> {
    pub fn new(host: H, config: ViewerConfig) -> Self {
        let size = host.container_size();
        Self {
            camera: Camera::new(config.camera_start),
            projection: Projection::from_config(size.width, size.height, &config),
            controller: OrbitController::from_config(&config),
            host,
            config,
            selected: None,
            lifecycle: Lifecycle::Unmounted,
            session: SessionToken::default(),
            scene: None,
            surface: None,
            listeners_attached: false,
            frame: None,
            load_state: LoadState::Idle,
            observer: None,
            assets: AssetCache::new(),
        }
    }

    /// Builds `room` and starts rendering it. Returns the asset load to run
    /// concurrently, if the room has candidates that are not cached yet.
    pub fn mount(&mut self, room: RoomType) -> Result<Option<AssetLoadJob>, SceneError> {
        self.config.validate()?;
        let staged = builders::build_room(room, &self.config.lights)?;
        self.selected = Some(room);
        if self.lifecycle != Lifecycle::Unmounted {
            self.teardown();
        }
        self.lifecycle = Lifecycle::Building;
        self.session = self.session.next();
        debug!("{}: building {}", self.session, room);

        self.scene = Some(staged);
        self.camera = Camera::new(self.config.camera_start);
        self.controller = OrbitController::from_config(&self.config);

        let size = self.host.container_size();
        self.projection = Projection::from_config(size.width, size.height, &self.config);
        let surface = match self.host.create_surface(size, self.config.clear_colour) {
            Ok(surface) => surface,
            Err(e) => {
                error!("Could not create a render surface: {}", e);
                self.teardown();
                return Err(e);
            }
        };
        self.surface = Some(surface);
        if let Err(e) = self.host.attach_listeners() {
            error!("Could not attach input listeners: {}", e);
            self.teardown();
            return Err(e);
        }
        self.listeners_attached = true;

        let job = self.start_asset_load(room);
        self.lifecycle = Lifecycle::Rendering;
        self.frame = Some(self.host.request_frame());
        info!(
            "Mounted {} ({} nodes) at {}x{}",
            room.display_name(),
            self.scene.as_ref().map_or(0, SceneGraph::node_count),
            size.width,
            size.height
        );
        Ok(job)
    }

    /// Switches to another room. While unmounted this only records the selection.
    pub fn select_room(&mut self, room: RoomType) -> Result<Option<AssetLoadJob>, SceneError> {
        match self.lifecycle {
            Lifecycle::Unmounted => {
                self.selected = Some(room);
                Ok(None)
            }
            _ => self.mount(room),
        }
    }

    /// Like [`select_room`](Self::select_room) for a host identifier. Unknown
    /// identifiers are rejected before anything changes.
    pub fn select(&mut self, id: &str) -> Result<Option<AssetLoadJob>, SceneError> {
        let room = id.parse()?;
        self.select_room(room)
    }

    /// Tears the current mount down. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted && self.surface.is_none() {
            debug!("unmount: already unmounted");
            return;
        }
        self.teardown();
        info!("Unmounted viewer");
    }

    fn teardown(&mut self) {
        self.lifecycle = Lifecycle::TearingDown;
        debug!("{}: tearing down", self.session);
        if let Some(frame) = self.frame.take() {
            self.host.cancel_frame(frame);
        }
        if self.listeners_attached {
            self.listeners_attached = false;
            if let Err(e) = self.host.detach_listeners() {
                error!("{}", e);
            }
        }
        if let Some(mut surface) = self.surface.take() {
            if let Err(e) = surface.release() {
                error!("{}", e);
            }
        }
        self.scene = None;
        self.controller.pointer_up();
        // results of loads started for this mount are stale from here on
        self.session = self.session.next();
        self.set_load_state(LoadState::Idle);
        self.lifecycle = Lifecycle::Unmounted;
    }

    /// Walks the candidates in order, skipping locations that already failed in
    /// this viewer. A cached asset is attached directly, but only when every
    /// candidate before it is a known failure; otherwise a load job is returned.
    fn start_asset_load(&mut self, room: RoomType) -> Option<AssetLoadJob> {
        let candidates = self.config.assets.candidates(room).to_vec();
        let mut untried = false;
        for location in &candidates {
            if let Some(asset) = self.assets.get(location) {
                debug!("Attaching cached asset {}", location);
                if let Some(scene) = self.scene.as_mut() {
                    scene.add(asset);
                }
                self.set_load_state(LoadState::Ready);
                return None;
            }
            if !self.assets.is_known_failure(location) {
                untried = true;
                break;
            }
        }
        if untried {
            self.set_load_state(LoadState::Loading(0));
            return Some(AssetLoadJob {
                session: self.session,
                room,
                candidates,
            });
        }
        if !candidates.is_empty() {
            debug!("Every candidate of {} failed before, keeping procedural furniture", room);
        }
        self.set_load_state(LoadState::Ready);
        None
    }

    /// Applies the outcome of an asset load. Events of other sessions or while
    /// not rendering are ignored; returns whether the event was applied.
    pub fn apply_load_event(&mut self, event: LoadEvent) -> bool {
        if event.session != self.session || self.lifecycle != Lifecycle::Rendering {
            debug!("Dropping stale {:?} (current {})", event, self.session);
            return false;
        }
        match event.kind {
            LoadEventKind::Progress(progress) => {
                self.set_load_state(LoadState::Loading(progress.min(100)));
            }
            LoadEventKind::Rejected { location, error } => {
                debug!("Remembering failed candidate: {}", error);
                self.assets.mark_failed(&location);
            }
            LoadEventKind::Loaded { location, asset } => {
                self.assets.insert(&location, asset.as_ref());
                if let Some(scene) = self.scene.as_mut() {
                    scene.add(asset);
                }
                self.set_load_state(LoadState::Ready);
            }
            LoadEventKind::Exhausted { last_error } => {
                if let Some(e) = last_error {
                    warn!("No external asset, keeping procedural furniture: {}", e);
                }
                // the procedural furniture is already attached
                self.set_load_state(LoadState::Failed);
                self.set_load_state(LoadState::Ready);
            }
        }
        true
    }

    fn set_load_state(&mut self, next: LoadState) {
        let advances = match (self.load_state, next) {
            (LoadState::Loading(current), LoadState::Loading(progress)) => progress > current,
            (current, next) => current != next,
        };
        if !advances {
            return;
        }
        debug!("Load state {:?} -> {:?}", self.load_state, next);
        self.load_state = next;
        if let Some(observer) = self.observer.as_mut() {
            observer(next);
        }
    }

    /// Renders one frame and schedules the next. Returns `false` once the frame
    /// loop has been cancelled.
    pub fn frame(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Rendering || self.frame.take().is_none() {
            return false;
        }
        if let (Some(surface), Some(scene)) = (self.surface.as_mut(), self.scene.as_ref()) {
            if let Err(e) = surface.render(scene, &self.camera, &self.projection) {
                error!("{}", e);
            }
        }
        self.frame = Some(self.host.request_frame());
        true
    }

    /// Routes pointer input to the camera controller. Returns whether the camera moved.
    pub fn handle_pointer(&mut self, input: PointerInput) -> bool {
        if !self.listeners_attached {
            return false;
        }
        match input {
            PointerInput::Down { x, y } => {
                self.controller.pointer_down(x, y);
                false
            }
            PointerInput::Move { x, y } => self.controller.pointer_move(&mut self.camera, x, y),
            PointerInput::Up => {
                self.controller.pointer_up();
                false
            }
            PointerInput::Wheel { delta_y } => self.controller.wheel(&mut self.camera, delta_y),
        }
    }

    /// Reads the container size from the host and applies it.
    pub fn resize(&mut self) -> bool {
        let size = self.host.container_size();
        self.resize_to(size)
    }

    /// Applies a container size to camera aspect and output buffer. No-op
    /// unless rendering.
    pub fn resize_to(&mut self, size: ViewportSize) -> bool {
        if self.lifecycle != Lifecycle::Rendering {
            return false;
        }
        match self.surface.as_mut() {
            Some(surface) => fit_viewport(size, &mut self.projection, surface),
            None => false,
        }
    }

    /// Changes the configuration. Camera speeds and bounds apply immediately,
    /// everything else from the next mount on. An invalid result is rejected and
    /// the previous configuration kept.
    pub fn configure<F: FnOnce(&mut ViewerConfig)>(
        &mut self,
        configure: F,
    ) -> Result<(), SceneError> {
        let mut next = self.config.clone();
        configure(&mut next);
        next.validate()?;
        self.config = next;
        let drag = *self.controller.drag_state();
        self.controller = OrbitController::from_config(&self.config);
        if drag.dragging {
            self.controller.pointer_down(drag.last_x, drag.last_y);
        }
        Ok(())
    }

    /// Registers a callback invoked on every load state change.
    pub fn on_load_state<F: FnMut(LoadState) + 'static>(&mut self, observer: F) {
        self.observer = Some(Box::new(observer));
    }

    /// Moves the camera, e.g. to restore a saved view.
    pub fn set_camera_position(&mut self, position: [f32; 3]) {
        self.camera.set_position(Point3::from(position));
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn session(&self) -> SessionToken {
        self.session
    }

    pub fn selected_room(&self) -> Option<RoomType> {
        self.selected
    }

    pub fn scene(&self) -> Option<&SceneGraph> {
        self.scene.as_ref()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn surface(&self) -> Option<&H::Surface> {
        self.surface.as_ref()
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn cached_assets(&self) -> &AssetCache {
        &self.assets
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

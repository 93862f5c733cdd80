#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::HashMap,
    rc::Rc,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use interior_ngin::{
    camera::{Camera, Projection},
    data_structures::scene_graph::SceneGraph,
    error::SceneError,
    host::{FrameHandle, RenderHost, RenderSurface},
    loader::{AssetFetcher, LoadEvent},
    viewport::ViewportSize,
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Everything a [`MockHost`] and its surfaces were asked to do.
#[derive(Clone, Debug, Default)]
pub struct HostLog {
    pub surfaces_created: u32,
    pub surfaces_released: u32,
    pub release_errors: u32,
    pub listeners_attached: u32,
    pub listeners_detached: u32,
    pub frames_requested: u32,
    pub frames_cancelled: u32,
    pub frames_rendered: u32,
    pub surface_sizes: Vec<ViewportSize>,
    pub last_rendered_nodes: usize,
    pub last_aspect: f32,
}

/// Records calls instead of talking to a window.
pub struct MockHost {
    pub size: ViewportSize,
    pub fail_surface: bool,
    pub fail_detach: bool,
    log: Rc<RefCell<HostLog>>,
    listening: bool,
    frame_counter: u64,
    pending_frame: Option<FrameHandle>,
}

impl MockHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: ViewportSize::new(width, height),
            fail_surface: false,
            fail_detach: false,
            log: Rc::new(RefCell::new(HostLog::default())),
            listening: false,
            frame_counter: 0,
            pending_frame: None,
        }
    }

    pub fn log(&self) -> HostLog {
        self.log.borrow().clone()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }
}

impl RenderHost for MockHost {
    type Surface = MockSurface;

    fn container_size(&self) -> ViewportSize {
        self.size
    }

    fn create_surface(
        &mut self,
        size: ViewportSize,
        _clear_colour: wgpu::Color,
    ) -> Result<MockSurface, SceneError> {
        if self.fail_surface {
            return Err(SceneError::RenderTarget("no canvas".to_string()));
        }
        let mut log = self.log.borrow_mut();
        log.surfaces_created += 1;
        log.surface_sizes.push(size);
        Ok(MockSurface {
            size,
            released: false,
            log: self.log.clone(),
        })
    }

    fn attach_listeners(&mut self) -> Result<(), SceneError> {
        assert!(!self.listening, "listeners attached twice");
        self.listening = true;
        self.log.borrow_mut().listeners_attached += 1;
        Ok(())
    }

    fn detach_listeners(&mut self) -> Result<(), SceneError> {
        assert!(self.listening, "listeners detached while not attached");
        self.listening = false;
        self.log.borrow_mut().listeners_detached += 1;
        if self.fail_detach {
            return Err(SceneError::teardown("input listeners", "host refused"));
        }
        Ok(())
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.frame_counter += 1;
        let frame = FrameHandle(self.frame_counter);
        self.pending_frame = Some(frame);
        self.log.borrow_mut().frames_requested += 1;
        frame
    }

    fn cancel_frame(&mut self, frame: FrameHandle) {
        assert_eq!(self.pending_frame, Some(frame), "cancelled an unknown frame");
        self.pending_frame = None;
        self.log.borrow_mut().frames_cancelled += 1;
    }
}

pub struct MockSurface {
    pub size: ViewportSize,
    pub released: bool,
    log: Rc<RefCell<HostLog>>,
}

impl RenderSurface for MockSurface {
    fn size(&self) -> ViewportSize {
        self.size
    }

    fn resize(&mut self, size: ViewportSize) {
        self.size = size;
    }

    fn render(
        &mut self,
        scene: &SceneGraph,
        _camera: &Camera,
        projection: &Projection,
    ) -> Result<(), SceneError> {
        let mut log = self.log.borrow_mut();
        log.frames_rendered += 1;
        log.last_rendered_nodes = scene.node_count();
        log.last_aspect = projection.aspect();
        Ok(())
    }

    fn release(&mut self) -> Result<(), SceneError> {
        let mut log = self.log.borrow_mut();
        if self.released {
            log.release_errors += 1;
            return Err(SceneError::teardown("surface", "released twice"));
        }
        self.released = true;
        log.surfaces_released += 1;
        Ok(())
    }
}

/// Serves fixed payloads and fails for every other location.
#[derive(Clone, Default)]
pub struct MockFetcher {
    payloads: Arc<HashMap<String, Vec<u8>>>,
    requested: Arc<Mutex<Vec<String>>>,
    calls: Arc<AtomicUsize>,
}

impl MockFetcher {
    /// A fetcher for which every location is unreachable.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn serving(payloads: &[(&str, &[u8])]) -> Self {
        Self {
            payloads: Arc::new(
                payloads
                    .iter()
                    .map(|(location, bytes)| (location.to_string(), bytes.to_vec()))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|requested| requested.clone())
            .unwrap_or_default()
    }
}

impl AssetFetcher for MockFetcher {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, SceneError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(location.to_string());
        }
        self.payloads
            .get(location)
            .cloned()
            .ok_or_else(|| SceneError::asset(location, "connection refused"))
    }
}

/// Runs an asset job to completion and collects its events.
pub fn run_job(
    job: interior_ngin::loader::AssetLoadJob,
    fetcher: &MockFetcher,
) -> Vec<LoadEvent> {
    let mut events = Vec::new();
    futures::executor::block_on(job.run(fetcher.clone(), |event| events.push(event)));
    events
}

/// A glTF document with a single triangle in an embedded data-URI buffer.
pub const TRIANGLE_GLTF: &str = r#"{
    "asset": { "version": "2.0" },
    "scene": 0,
    "scenes": [ { "nodes": [0] } ],
    "nodes": [ { "name": "triangle", "mesh": 0 } ],
    "meshes": [ { "primitives": [ { "attributes": { "POSITION": 0 } } ] } ],
    "accessors": [ {
        "bufferView": 0,
        "componentType": 5126,
        "count": 3,
        "type": "VEC3",
        "min": [0.0, 0.0, 0.0],
        "max": [1.0, 1.0, 0.0]
    } ],
    "bufferViews": [ { "buffer": 0, "byteOffset": 0, "byteLength": 36 } ],
    "buffers": [ {
        "byteLength": 36,
        "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
    } ]
}"#;

/// Two triangles forming a unit quad in the xy plane.
pub const QUAD_OBJ: &str = "o quad
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
f 1 2 3 4
";

pub fn assert_close(actual: f32, expected: f32, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "{what}: expected {expected}, got {actual}"
    );
}

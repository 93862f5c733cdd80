use interior_ngin::{
    config::{AssetCatalog, ViewerConfig},
    data_structures::scene_graph::{NodeKind, SceneNode, world_bounds},
    error::SceneError,
    loader::{
        AssetFetcher, AssetLoadJob, FOOTPRINT_FILL, HEIGHT_FILL, HttpFetcher, LoadEventKind,
        fit_to_room,
    },
    resources::{AssetFormat, parse_asset},
    room::{RoomDescriptor, RoomType},
    viewer::{LoadState, RoomViewer, SessionToken},
};

use crate::common::test_utils::{
    MockFetcher, MockHost, QUAD_OBJ, TRIANGLE_GLTF, assert_close, init_logger, run_job,
};

mod common;

fn mesh_nodes(node: &dyn SceneNode) -> Vec<&dyn SceneNode> {
    let mut found = Vec::new();
    if let NodeKind::Mesh { .. } = node.kind() {
        found.push(node);
    }
    for child in node.get_children() {
        found.extend(mesh_nodes(child.as_ref()));
    }
    found
}

fn viewer_with(catalog: AssetCatalog) -> RoomViewer<MockHost> {
    init_logger();
    RoomViewer::new(
        MockHost::new(800, 600),
        ViewerConfig::default().with_assets(catalog),
    )
}

fn job(candidates: &[&str]) -> AssetLoadJob {
    AssetLoadJob {
        session: SessionToken::default(),
        room: RoomType::LivingRoom,
        candidates: candidates.iter().map(|c| c.to_string()).collect(),
    }
}

fn parse(location: &str, bytes: &[u8]) -> anyhow::Result<Box<dyn SceneNode>> {
    futures::executor::block_on(parse_asset(location, bytes))
}

#[test]
fn should_be_ready_without_candidates() {
    let mut viewer = viewer_with(AssetCatalog::empty());
    let job = viewer.mount(RoomType::LivingRoom).expect("mount succeeds");

    assert!(job.is_none());
    assert_eq!(viewer.load_state(), LoadState::Ready);
    assert!(viewer.scene().is_some_and(|scene| scene.contains("sofa")));
}

#[test]
fn should_exhaust_empty_job_without_fetching() {
    init_logger();
    let fetcher = MockFetcher::failing();
    let events = run_job(job(&[]), &fetcher);

    assert_eq!(fetcher.calls(), 0);
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0].kind,
        LoadEventKind::Exhausted { last_error: None }
    ));
}

#[test]
fn should_keep_procedural_furniture_when_fetch_fails() {
    let mut viewer = viewer_with(AssetCatalog::default());
    let job = viewer
        .mount(RoomType::LivingRoom)
        .expect("mount succeeds")
        .expect("the living room has a candidate");
    assert_eq!(viewer.load_state(), LoadState::Loading(0));
    let nodes_before = viewer.scene().map_or(0, |scene| scene.node_count());

    let fetcher = MockFetcher::failing();
    let events = run_job(job, &fetcher);
    assert!(matches!(events[0].kind, LoadEventKind::Progress(100)));
    assert!(matches!(
        &events[1].kind,
        LoadEventKind::Rejected { location, .. } if location == "models/living-room.glb"
    ));
    assert!(matches!(
        &events[2].kind,
        LoadEventKind::Exhausted {
            last_error: Some(SceneError::AssetLoad { .. })
        }
    ));
    for event in events {
        assert!(viewer.apply_load_event(event));
    }

    assert_eq!(fetcher.requested(), vec!["models/living-room.glb".to_string()]);
    assert_eq!(viewer.load_state(), LoadState::Ready);
    let scene = viewer.scene().expect("scene is attached");
    assert!(scene.contains("sofa"));
    assert_eq!(scene.node_count(), nodes_before);
    assert!(viewer.cached_assets().is_empty());
}

#[test]
fn should_fall_back_to_next_candidate() {
    init_logger();
    let fetcher = MockFetcher::serving(&[("room.gltf", TRIANGLE_GLTF.as_bytes())]);
    let events = run_job(job(&["missing.glb", "room.gltf"]), &fetcher);

    assert_eq!(fetcher.requested(), vec!["missing.glb", "room.gltf"]);
    let progress: Vec<u8> = events
        .iter()
        .filter_map(|event| match event.kind {
            LoadEventKind::Progress(progress) => Some(progress),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![50, 100]);
    match &events.last().map(|event| &event.kind) {
        Some(LoadEventKind::Loaded { location, asset }) => {
            assert_eq!(location, "room.gltf");
            assert_eq!(mesh_nodes(asset.as_ref()).len(), 1);
        }
        _ => panic!("expected a loaded asset"),
    }
}

#[test]
fn should_report_unparseable_candidates() {
    init_logger();
    let fetcher = MockFetcher::serving(&[
        ("room.fbx", b"binary".as_slice()),
        ("broken.gltf", b"{ not json".as_slice()),
    ]);
    let events = run_job(job(&["room.fbx", "broken.gltf"]), &fetcher);

    assert_eq!(fetcher.calls(), 2);
    match &events.last().map(|event| &event.kind) {
        Some(LoadEventKind::Exhausted {
            last_error: Some(SceneError::AssetLoad { location, .. }),
        }) => assert_eq!(location, "broken.gltf"),
        _ => panic!("both candidates must fail"),
    }
}

#[test]
fn should_superimpose_loaded_asset() {
    let catalog = AssetCatalog::empty().with(RoomType::LivingRoom, &["room.gltf"]);
    let mut viewer = viewer_with(catalog);
    let job = viewer
        .mount(RoomType::LivingRoom)
        .expect("mount succeeds")
        .expect("one candidate");

    let fetcher = MockFetcher::serving(&[("room.gltf", TRIANGLE_GLTF.as_bytes())]);
    for event in run_job(job, &fetcher) {
        assert!(viewer.apply_load_event(event));
    }

    assert_eq!(viewer.load_state(), LoadState::Ready);
    let scene = viewer.scene().expect("scene is attached");
    assert!(scene.contains("room.gltf"));
    assert!(scene.contains("triangle"));
    assert!(scene.contains("sofa"), "procedural furniture stays");
    assert!(viewer.cached_assets().contains("room.gltf"));
}

#[test]
fn should_attach_cached_asset_without_fetching_again() {
    let catalog = AssetCatalog::empty().with(RoomType::LivingRoom, &["room.gltf"]);
    let mut viewer = viewer_with(catalog);
    let fetcher = MockFetcher::serving(&[("room.gltf", TRIANGLE_GLTF.as_bytes())]);

    let job = viewer
        .mount(RoomType::LivingRoom)
        .expect("mount succeeds")
        .expect("one candidate");
    for event in run_job(job, &fetcher) {
        viewer.apply_load_event(event);
    }

    viewer.select_room(RoomType::Bedroom).expect("bedroom builds");
    assert!(viewer.scene().is_some_and(|scene| !scene.contains("room.gltf")));

    let job = viewer
        .select_room(RoomType::LivingRoom)
        .expect("living room builds");
    assert!(job.is_none(), "cached assets need no load");
    assert_eq!(viewer.load_state(), LoadState::Ready);
    assert!(viewer.scene().is_some_and(|scene| scene.contains("room.gltf")));
    assert_eq!(fetcher.calls(), 1);
}

#[test]
fn should_prefer_untried_earlier_candidate_over_cached_asset() {
    let catalog = AssetCatalog::empty().with(RoomType::LivingRoom, &["second.gltf"]);
    let mut viewer = viewer_with(catalog);
    let fetcher = MockFetcher::serving(&[("second.gltf", TRIANGLE_GLTF.as_bytes())]);
    let job = viewer
        .mount(RoomType::LivingRoom)
        .expect("mount succeeds")
        .expect("one candidate");
    for event in run_job(job, &fetcher) {
        viewer.apply_load_event(event);
    }
    assert!(viewer.cached_assets().contains("second.gltf"));

    viewer
        .configure(|config| {
            config.assets.set(
                RoomType::LivingRoom,
                vec!["first.gltf".to_string(), "second.gltf".to_string()],
            )
        })
        .expect("valid configuration");
    viewer.select_room(RoomType::Bedroom).expect("bedroom builds");
    let job = viewer
        .select_room(RoomType::LivingRoom)
        .expect("living room builds")
        .expect("the first candidate was never tried");

    assert_eq!(job.candidates[0], "first.gltf");
    assert_eq!(viewer.load_state(), LoadState::Loading(0));
    assert!(viewer.scene().is_some_and(|scene| !scene.contains("second.gltf")));
}

#[test]
fn should_skip_failed_candidate_before_cached_asset() {
    let catalog = AssetCatalog::empty().with(RoomType::LivingRoom, &["missing.glb", "room.gltf"]);
    let mut viewer = viewer_with(catalog);
    let fetcher = MockFetcher::serving(&[("room.gltf", TRIANGLE_GLTF.as_bytes())]);
    let job = viewer
        .mount(RoomType::LivingRoom)
        .expect("mount succeeds")
        .expect("two candidates");
    for event in run_job(job, &fetcher) {
        assert!(viewer.apply_load_event(event));
    }
    assert!(viewer.cached_assets().is_known_failure("missing.glb"));

    viewer.select_room(RoomType::Kitchen).expect("kitchen builds");
    let job = viewer
        .select_room(RoomType::LivingRoom)
        .expect("living room builds");

    assert!(job.is_none(), "the failed candidate is not fetched again");
    assert_eq!(viewer.load_state(), LoadState::Ready);
    assert!(viewer.scene().is_some_and(|scene| scene.contains("room.gltf")));
    assert_eq!(fetcher.calls(), 2);
}

#[test]
fn should_drop_events_of_stale_sessions() {
    let catalog = AssetCatalog::empty().with(RoomType::LivingRoom, &["room.gltf"]);
    let mut viewer = viewer_with(catalog);
    let stale = viewer
        .mount(RoomType::LivingRoom)
        .expect("mount succeeds")
        .expect("one candidate");
    let stale_session = stale.session;

    viewer.select_room(RoomType::Kitchen).expect("kitchen builds");
    assert_ne!(viewer.session(), stale_session);
    let state = viewer.load_state();

    let fetcher = MockFetcher::serving(&[("room.gltf", TRIANGLE_GLTF.as_bytes())]);
    for event in run_job(stale, &fetcher) {
        assert!(!viewer.apply_load_event(event));
    }

    assert_eq!(viewer.load_state(), state);
    let scene = viewer.scene().expect("scene is attached");
    assert!(!scene.contains("room.gltf"));
    assert!(scene.contains("island"));
    assert!(viewer.cached_assets().is_empty());
}

#[test]
fn should_drop_events_after_unmount() {
    let mut viewer = viewer_with(AssetCatalog::default());
    let job = viewer
        .mount(RoomType::LivingRoom)
        .expect("mount succeeds")
        .expect("one candidate");
    viewer.unmount();

    for event in run_job(job, &MockFetcher::failing()) {
        assert!(!viewer.apply_load_event(event));
    }
    assert_eq!(viewer.load_state(), LoadState::Idle);
    assert!(viewer.scene().is_none());
}

#[test]
fn should_parse_gltf_triangle() {
    init_logger();
    let asset = parse("models/triangle.gltf", TRIANGLE_GLTF.as_bytes()).expect("valid document");

    assert_eq!(asset.name(), "models/triangle.gltf");
    let meshes = mesh_nodes(asset.as_ref());
    assert_eq!(meshes.len(), 1);
    match meshes[0].kind() {
        NodeKind::Mesh { mesh, .. } => {
            assert_eq!(mesh.vertices.len(), 3);
            assert_eq!(mesh.indices, vec![0, 1, 2]);
        }
        _ => unreachable!(),
    }
}

#[test]
fn should_parse_obj_quad() {
    init_logger();
    let asset = parse("quad.obj", QUAD_OBJ.as_bytes()).expect("valid obj");

    let meshes = mesh_nodes(asset.as_ref());
    assert_eq!(meshes.len(), 1);
    assert_eq!(meshes[0].name(), "quad");
    match meshes[0].kind() {
        NodeKind::Mesh { mesh, material } => {
            assert_eq!(mesh.triangle_count(), 2);
            assert_eq!(material.name, "obj-default");
        }
        _ => unreachable!(),
    }
}

#[test]
fn should_reject_unknown_formats() {
    assert!(parse("room.fbx", b"whatever").is_err());
    assert!(parse("room", b"whatever").is_err());
}

#[test]
fn should_detect_format_from_location() {
    assert_eq!(AssetFormat::from_location("a/b/room.glb"), Some(AssetFormat::Gltf));
    assert_eq!(AssetFormat::from_location("room.GLTF"), Some(AssetFormat::Gltf));
    assert_eq!(
        AssetFormat::from_location("https://cdn.example.com/room.obj?v=3"),
        Some(AssetFormat::Obj)
    );
    assert_eq!(AssetFormat::from_location("room.fbx"), None);
    assert_eq!(AssetFormat::from_location("room"), None);
}

#[test]
fn should_fit_asset_into_room() {
    init_logger();
    let room = RoomDescriptor::default();
    let mut asset = parse("triangle.gltf", TRIANGLE_GLTF.as_bytes()).expect("valid document");

    fit_to_room(asset.as_mut(), &room).expect("asset has extent");

    let (min, max) = world_bounds(asset.as_ref()).expect("asset has geometry");
    assert!(max[0] - min[0] <= room.width * FOOTPRINT_FILL + 1e-4);
    assert!(max[1] - min[1] <= room.height * HEIGHT_FILL + 1e-4);
    assert!(max[2] - min[2] <= room.depth * FOOTPRINT_FILL + 1e-4);
    assert_close(max[1] - min[1], room.height * HEIGHT_FILL, "height limits the scale");
    assert_close(min[1], 0.0, "stands on the floor");
    assert_close((min[0] + max[0]) / 2.0, 0.0, "centered on x");
}

#[test]
fn should_refuse_to_fit_empty_asset() {
    let mut empty = interior_ngin::data_structures::scene_graph::ContainerNode::new(
        "empty",
        interior_ngin::data_structures::instance::Instance::new(),
    );
    assert!(fit_to_room(&mut empty, &RoomDescriptor::default()).is_err());
}

#[tokio::test]
async fn should_fail_http_fetch_of_unreachable_host() {
    init_logger();
    let fetcher = HttpFetcher::new("assets");

    let err = fetcher
        .fetch("http://127.0.0.1:9/models/room.glb")
        .await
        .expect_err("nothing listens on the discard port");
    assert!(matches!(err, SceneError::AssetLoad { .. }));
}

#[tokio::test]
async fn should_fail_fetch_of_missing_file() {
    let fetcher = HttpFetcher::new("does-not-exist");

    let err = fetcher
        .fetch("models/room.glb")
        .await
        .expect_err("the directory does not exist");
    match err {
        SceneError::AssetLoad { location, .. } => assert_eq!(location, "models/room.glb"),
        other => panic!("unexpected error {other}"),
    }
}

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};
use interior_ngin::{
    camera::{Camera, OrbitController, Projection},
    config::{CameraBounds, ViewerConfig},
};

use crate::common::test_utils::assert_close;

mod common;

fn default_controller() -> OrbitController {
    OrbitController::from_config(&ViewerConfig::default())
}

#[test]
fn should_start_at_configured_position_facing_origin() {
    let camera = Camera::new([5.0, 5.0, 5.0]);
    assert_eq!(camera.position(), Point3::new(5.0, 5.0, 5.0));
    assert_eq!(camera.target(), Point3::origin());

    let expected = -Vector3::new(5.0f32, 5.0, 5.0).normalize();
    let forward = camera.forward();
    assert_close(forward.x, expected.x, "forward x");
    assert_close(forward.y, expected.y, "forward y");
    assert_close(forward.z, expected.z, "forward z");
}

#[test]
fn should_return_to_start_after_inverse_zoom() {
    let controller = default_controller();
    let mut camera = Camera::new([5.0, 5.0, 5.0]);
    let start = camera.distance();

    for _ in 0..7 {
        assert!(controller.wheel(&mut camera, 120.0));
    }
    assert!(camera.distance() > start);
    for _ in 0..7 {
        assert!(controller.wheel(&mut camera, -120.0));
    }
    assert_close(camera.distance(), start, "distance after zooming back");
}

#[test]
fn should_zoom_by_factor_per_step() {
    let controller = default_controller();
    let mut camera = Camera::new([5.0, 5.0, 5.0]);
    let start = camera.distance();

    controller.wheel(&mut camera, 1.0);
    assert_close(camera.distance(), start * 1.1, "one step out");
    controller.wheel(&mut camera, -1.0);
    controller.wheel(&mut camera, -1.0);
    assert_close(camera.distance(), start / 1.1, "one step in from start");
}

#[test]
fn should_ignore_zero_wheel_delta() {
    let controller = default_controller();
    let mut camera = Camera::new([5.0, 5.0, 5.0]);
    assert!(!controller.wheel(&mut camera, 0.0));
    assert_eq!(camera.position(), Point3::new(5.0, 5.0, 5.0));
}

#[test]
fn should_return_to_start_after_inverse_orbit() {
    let mut controller = default_controller();
    let mut camera = Camera::new([5.0, 5.0, 5.0]);

    controller.pointer_down(100.0, 100.0);
    assert!(controller.pointer_move(&mut camera, 180.0, 100.0));
    assert!((camera.position().x - 5.0).abs() > 0.1, "camera orbited");
    assert!(controller.pointer_move(&mut camera, 100.0, 100.0));
    controller.pointer_up();

    assert_close(camera.position().x, 5.0, "x");
    assert_close(camera.position().y, 5.0, "y");
    assert_close(camera.position().z, 5.0, "z");
}

#[test]
fn should_keep_radius_and_height_while_orbiting() {
    let controller = default_controller();
    let mut camera = Camera::new([3.0, 2.0, 4.0]);

    controller.orbit(&mut camera, 157.0, 0.0);
    let p = camera.position();
    assert_close((p.x * p.x + p.z * p.z).sqrt(), 5.0, "horizontal radius");
    assert_close(p.y, 2.0, "height");
}

#[test]
fn should_rotate_with_previous_pair() {
    // a quarter turn maps (x, z) = (1, 0) onto (0, 1)
    let controller = OrbitController::new(std::f32::consts::FRAC_PI_2, 0.01, 1.1);
    let mut camera = Camera::new([1.0, 1.0, 0.0]);
    controller.orbit(&mut camera, 1.0, 0.0);
    assert_close(camera.position().x, 0.0, "x");
    assert_close(camera.position().z, 1.0, "z");
}

#[test]
fn should_lift_with_vertical_drag() {
    let mut controller = default_controller();
    let mut camera = Camera::new([5.0, 5.0, 5.0]);

    controller.pointer_down(0.0, 0.0);
    controller.pointer_move(&mut camera, 0.0, 50.0);
    assert_close(camera.position().y, 5.5, "lifted height");
    assert_close(camera.position().x, 5.0, "x unchanged");
}

#[test]
fn should_only_orbit_while_dragging() {
    let mut controller = default_controller();
    let mut camera = Camera::new([5.0, 5.0, 5.0]);

    assert!(!controller.pointer_move(&mut camera, 40.0, 40.0));
    assert_eq!(camera.position(), Point3::new(5.0, 5.0, 5.0));

    controller.pointer_down(0.0, 0.0);
    assert!(controller.drag_state().dragging);
    controller.pointer_up();
    let drag = controller.drag_state();
    assert!(!drag.dragging);
    assert_eq!((drag.last_x, drag.last_y), (0.0, 0.0));
    assert!(!controller.pointer_move(&mut camera, 40.0, 40.0));
}

#[test]
fn should_stay_unbounded_by_default() {
    let controller = default_controller();
    let mut camera = Camera::new([5.0, 5.0, 5.0]);
    for _ in 0..60 {
        controller.wheel(&mut camera, -1.0);
    }
    assert!(camera.distance() < 0.1, "the camera may move into the room center");

    controller.orbit(&mut camera, 0.0, -10_000.0);
    assert!(camera.position().y < -90.0, "no floor clamp without bounds");
}

#[test]
fn should_clamp_when_bounds_are_configured() {
    let bounds = CameraBounds::default();
    let controller = default_controller().with_bounds(bounds);
    let mut camera = Camera::new([5.0, 5.0, 5.0]);

    for _ in 0..60 {
        controller.wheel(&mut camera, 1.0);
    }
    assert_close(camera.distance(), bounds.max_distance, "max distance");

    for _ in 0..120 {
        controller.wheel(&mut camera, -1.0);
    }
    assert_close(camera.distance(), bounds.min_distance, "min distance");

    controller.orbit(&mut camera, 0.0, -10_000.0);
    assert_close(camera.position().y, bounds.min_y, "min height");
}

#[test]
fn should_keep_distance_limit_above_height_range() {
    let controller = default_controller().with_bounds(CameraBounds {
        min_distance: 1.0,
        max_distance: 5.0,
        min_y: -10.0,
        max_y: 10.0,
    });
    let mut camera = Camera::new([3.0, 3.0, 3.0]);

    controller.orbit(&mut camera, 0.0, 900.0);

    assert!(camera.distance() <= 5.0 + 1e-4, "distance {}", camera.distance());
    assert_close(camera.position().y, 5.0, "height capped by distance");
    assert!(camera.position().x.is_finite());
}

#[test]
fn should_reject_inverted_bounds() {
    let inverted = CameraBounds {
        min_distance: 10.0,
        max_distance: 2.0,
        ..Default::default()
    };
    assert!(inverted.validate().is_err());
    assert!(
        CameraBounds {
            min_y: 5.0,
            max_y: 1.0,
            ..Default::default()
        }
        .validate()
        .is_err()
    );
    assert!(
        CameraBounds {
            min_distance: f32::NAN,
            ..Default::default()
        }
        .validate()
        .is_err()
    );
    assert!(CameraBounds::default().validate().is_ok());
    assert!(ViewerConfig::default().with_camera_bounds(inverted).validate().is_err());
}

#[test]
fn should_order_inverted_bounds_when_clamping() {
    let controller = default_controller().with_bounds(CameraBounds {
        min_distance: 10.0,
        max_distance: 2.0,
        ..Default::default()
    });
    let mut camera = Camera::new([5.0, 5.0, 5.0]);

    for _ in 0..40 {
        controller.wheel(&mut camera, 1.0);
    }
    assert_close(camera.distance(), 10.0, "upper limit");
    for _ in 0..80 {
        controller.wheel(&mut camera, -1.0);
    }
    assert_close(camera.distance(), 2.0, "lower limit");
}

#[test]
fn should_face_origin_from_straight_above() {
    let camera = Camera::new([0.0, 10.0, 0.0]);
    assert_eq!(camera.up(), -Vector3::unit_z());
    let forward = camera.forward();
    assert_close(forward.y, -1.0, "looking down");
    assert!(camera.calc_matrix().x.x.is_finite());
}

#[test]
fn should_follow_aspect_ratio() {
    let mut projection = Projection::from_config(800, 600, &ViewerConfig::default());
    assert_close(projection.aspect(), 4.0 / 3.0, "initial aspect");
    assert_close(projection.znear(), 0.1, "near plane");
    assert_close(projection.zfar(), 1000.0, "far plane");

    projection.resize(1920, 1080);
    assert_close(projection.aspect(), 16.0 / 9.0, "wide aspect");
    projection.resize(0, 1080);
    assert_close(projection.aspect(), 16.0 / 9.0, "zero width ignored");
}

// Host-side tests for the first-person camera controller.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;
#[path = "../src/camera.rs"]
mod camera;

use camera::*;
use constants::*;
use glam::Vec3;

#[test]
fn controller_configuration_matches_the_walkthrough_contract() {
    // End-to-end scenario 3: inspectable without starting a render loop.
    let camera = FirstPersonCamera::create_controller();
    assert!(camera.apply_gravity);
    assert!(camera.check_collisions);
    assert_eq!(camera.position, Vec3::new(0.0, 10.0, 0.0));
    assert_eq!(camera.ellipsoid, Vec3::new(1.0, 2.0, 1.0));
    assert_eq!(camera.min_z, 0.45);
    assert_eq!(camera.speed, 0.75);
    assert_eq!(camera.angular_sensibility, 4000.0);
}

#[test]
fn wasd_bindings_are_added_not_replacing() {
    let camera = FirstPersonCamera::create_controller();
    assert_eq!(camera.keys_forward, vec![KEY_ARROW_UP, KEY_W]);
    assert_eq!(camera.keys_left, vec![KEY_ARROW_LEFT, KEY_A]);
    assert_eq!(camera.keys_back, vec![KEY_ARROW_DOWN, KEY_S]);
    assert_eq!(camera.keys_right, vec![KEY_ARROW_RIGHT, KEY_D]);
}

fn flying_controller() -> FirstPersonCamera {
    let mut camera = FirstPersonCamera::create_controller();
    camera.apply_gravity = false;
    camera.check_collisions = false;
    camera
}

#[test]
fn held_w_moves_forward_on_the_plane() {
    let mut camera = flying_controller();
    let start = camera.position;
    let mut keys = HeldKeys::default();
    keys.press(KEY_W);

    camera.update(&keys, Vec3::ZERO, &[], 1.0);
    assert!((camera.position.z - (start.z - CAMERA_SPEED)).abs() < 1e-5);
    assert!((camera.position.y - start.y).abs() < 1e-6);
    assert!((camera.position.x - start.x).abs() < 1e-6);
}

#[test]
fn arrow_keys_still_drive_movement() {
    let mut camera = flying_controller();
    let start = camera.position;
    let mut keys = HeldKeys::default();
    keys.press(KEY_ARROW_UP);

    camera.update(&keys, Vec3::ZERO, &[], 1.0);
    assert!(camera.position.z < start.z);
}

#[test]
fn strafe_keys_move_sideways() {
    let mut camera = flying_controller();
    let start = camera.position;
    let mut keys = HeldKeys::default();
    keys.press(KEY_A);

    camera.update(&keys, Vec3::ZERO, &[], 1.0);
    assert!(camera.position.x < start.x);
    assert!((camera.position.z - start.z).abs() < 1e-6);
}

#[test]
fn released_keys_stop_movement() {
    let mut camera = flying_controller();
    let mut keys = HeldKeys::default();
    keys.press(KEY_W);
    keys.release(KEY_W);

    let start = camera.position;
    camera.update(&keys, Vec3::ZERO, &[], 1.0);
    assert_eq!(camera.position, start);
}

#[test]
fn gravity_displaces_per_tick() {
    let mut camera = FirstPersonCamera::create_controller();
    camera.check_collisions = false;
    let gravity = Vec3::new(0.0, GRAVITY_Y / PHYSICS_FPS, 0.0);
    let start_y = camera.position.y;

    camera.update(&HeldKeys::default(), gravity, &[], 1.0);
    assert!((camera.position.y - (start_y + gravity.y)).abs() < 1e-5);
}

#[test]
fn camera_lands_on_a_floor_box() {
    let mut camera = FirstPersonCamera::create_controller();
    let floor = (Vec3::new(-50.0, -1.0, -50.0), Vec3::new(50.0, 0.0, 50.0));
    let gravity = Vec3::new(0.0, GRAVITY_Y / PHYSICS_FPS, 0.0);
    let keys = HeldKeys::default();

    for _ in 0..600 {
        camera.update(&keys, gravity, &[floor], 1.0);
    }
    // Supported by the floor top at the ellipsoid's vertical radius.
    assert!((camera.position.y - camera.ellipsoid.y).abs() < 1e-2);
}

#[test]
fn walls_block_forward_motion() {
    let mut camera = flying_controller();
    camera.check_collisions = true;
    camera.yaw = std::f32::consts::FRAC_PI_2; // facing +X
    camera.position = Vec3::new(0.0, 1.0, 0.0);
    let wall = (Vec3::new(3.0, -10.0, -10.0), Vec3::new(4.0, 10.0, 10.0));
    let mut keys = HeldKeys::default();
    keys.press(KEY_W);

    for _ in 0..20 {
        camera.update(&keys, Vec3::ZERO, &[wall], 1.0);
    }
    // Stopped at the wall face minus the ellipsoid's horizontal radius.
    assert!(camera.position.x <= 3.0 - camera.ellipsoid.x + 1e-3);
    assert!(camera.position.x > 1.5);
}

#[test]
fn look_divides_pixel_deltas_by_sensibility() {
    let mut camera = FirstPersonCamera::create_controller();
    camera.look(CAMERA_ANGULAR_SENSIBILITY, 0.0);
    assert!((camera.yaw - 1.0).abs() < 1e-6);
}

#[test]
fn pitch_is_clamped_short_of_the_poles() {
    let mut camera = FirstPersonCamera::create_controller();
    camera.look(0.0, -1.0e9);
    assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
    camera.look(0.0, 1.0e9);
    assert!(camera.pitch > -std::f32::consts::FRAC_PI_2);
}

#[test]
fn center_screen_ray_points_along_the_view() {
    let mut camera = flying_controller();
    camera.position = Vec3::ZERO;
    let (ro, rd) = camera.screen_to_world_ray(640.0, 360.0, 1280.0, 720.0);
    assert_eq!(ro, Vec3::ZERO);
    assert!(rd.z < -0.99, "expected -Z view ray, got {rd:?}");
}

// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn gravity_is_downward_and_tick_scaled() {
    assert!(GRAVITY_Y < 0.0);
    assert!(PHYSICS_FPS > 0.0);
    // The per-tick displacement must stay a small fraction of a unit.
    let per_tick = GRAVITY_Y / PHYSICS_FPS;
    assert!(per_tick < 0.0 && per_tick > -1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_envelope_is_sane() {
    assert!(CAMERA_ELLIPSOID.iter().all(|r| *r > 0.0));
    assert!(CAMERA_MIN_Z > 0.0 && CAMERA_MIN_Z < 1.0);
    assert!(CAMERA_FAR_Z > CAMERA_MIN_Z);
    assert!(CAMERA_SPEED > 0.0);
    assert!(CAMERA_ANGULAR_SENSIBILITY > 0.0);
    // Eye height must clear the ellipsoid's vertical radius.
    assert!(CAMERA_START[1] > CAMERA_ELLIPSOID[1]);
}

#[test]
fn movement_key_codes_are_the_wasd_layout() {
    assert_eq!(KEY_W, 87);
    assert_eq!(KEY_A, 65);
    assert_eq!(KEY_S, 83);
    assert_eq!(KEY_D, 68);
    let all = [
        KEY_W,
        KEY_A,
        KEY_S,
        KEY_D,
        KEY_ARROW_UP,
        KEY_ARROW_LEFT,
        KEY_ARROW_DOWN,
        KEY_ARROW_RIGHT,
    ];
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn capture_settings_match_the_packaged_container() {
    assert_eq!(CAPTURE_FPS, 30.0);
    assert!(CAPTURE_MIME.starts_with(CONTAINER_MIME));
    assert_eq!(DOWNLOAD_FILENAME, "recording.webm");
    assert!(DOWNLOAD_FILENAME.ends_with(".webm"));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn overlay_buttons_do_not_overlap_horizontally() {
    assert!(BUTTON_TOP_PX >= 0);
    assert!(BUTTON_START_LEFT_PX < BUTTON_STOP_LEFT_PX);
}

#[test]
fn level_anchor_names_the_ramp() {
    assert_eq!(RAMP_ANCHOR_NAME, "Ramp");
    assert_eq!(RAMP_MESH_INDEX, 8);
    assert!(LEVEL_URL.ends_with(".glb"));
}

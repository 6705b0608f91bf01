/// Scene, camera, and capture tuning constants.
///
/// These express intended behavior (physics cadence, camera envelope,
/// capture rate) and keep magic numbers out of the code.
// Gravity acceleration (world units per second squared, downward)
pub const GRAVITY_Y: f32 = -9.81;

// Simulated physics tick rate the gravity vector is pre-divided by
pub const PHYSICS_FPS: f32 = 60.0;

// Hemispheric light direction (straight up) and intensity
pub const LIGHT_DIRECTION: [f32; 3] = [0.0, 1.0, 0.0];
pub const LIGHT_INTENSITY: f32 = 1.0;

// Camera start position
pub const CAMERA_START: [f32; 3] = [0.0, 10.0, 0.0];

// Camera collision envelope half-extents (ellipsoid radii)
pub const CAMERA_ELLIPSOID: [f32; 3] = [1.0, 2.0, 1.0];

// Near clip distance
pub const CAMERA_MIN_Z: f32 = 0.45;

// Movement speed (world units per tick while a movement key is held)
pub const CAMERA_SPEED: f32 = 0.75;

// Look sensitivity: pointer pixel deltas are divided by this
pub const CAMERA_ANGULAR_SENSIBILITY: f32 = 4000.0;

// Vertical field of view and far clip for the projection
pub const CAMERA_FOV_Y: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_FAR_Z: f32 = 1000.0;

// Movement key codes added on top of the default arrow bindings
pub const KEY_W: u32 = 87;
pub const KEY_A: u32 = 65;
pub const KEY_S: u32 = 83;
pub const KEY_D: u32 = 68;

// Default arrow-key bindings (up/left/down/right)
pub const KEY_ARROW_UP: u32 = 38;
pub const KEY_ARROW_LEFT: u32 = 37;
pub const KEY_ARROW_DOWN: u32 = 40;
pub const KEY_ARROW_RIGHT: u32 = 39;

// Level asset location and interactive mesh selection
pub const LEVEL_URL: &str = "assets/prototype_level.glb";
pub const RAMP_ANCHOR_NAME: &str = "Ramp";
pub const RAMP_MESH_INDEX: usize = 8;

// Canvas capture frame rate (frames per second)
pub const CAPTURE_FPS: f64 = 30.0;

// Encoded stream MIME type and the packaged container type
pub const CAPTURE_MIME: &str = "video/webm; codecs=vp9";
pub const CONTAINER_MIME: &str = "video/webm";

// Name offered for the downloaded recording
pub const DOWNLOAD_FILENAME: &str = "recording.webm";

// Overlay button placement (pixels from the top-left corner)
pub const BUTTON_TOP_PX: i32 = 10;
pub const BUTTON_START_LEFT_PX: i32 = 10;
pub const BUTTON_STOP_LEFT_PX: i32 = 120;

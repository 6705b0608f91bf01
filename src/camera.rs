//! First-person camera: configuration, look/move integration, collision
//! response, and the screen-to-world ray used for picking.

use glam::{Mat4, Vec3, Vec4};

use crate::constants::{
    CAMERA_ANGULAR_SENSIBILITY, CAMERA_ELLIPSOID, CAMERA_FAR_Z, CAMERA_FOV_Y, CAMERA_MIN_Z,
    CAMERA_SPEED, CAMERA_START, KEY_A, KEY_ARROW_DOWN, KEY_ARROW_LEFT, KEY_ARROW_RIGHT,
    KEY_ARROW_UP, KEY_D, KEY_S, KEY_W,
};

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
const CONTACT_EPSILON: f32 = 1e-4;

/// Key codes currently held down, fed from the keyboard listeners.
#[derive(Default)]
pub struct HeldKeys {
    codes: Vec<u32>,
}

impl HeldKeys {
    pub fn press(&mut self, code: u32) {
        if !self.codes.contains(&code) {
            self.codes.push(code);
        }
    }

    pub fn release(&mut self, code: u32) {
        self.codes.retain(|c| *c != code);
    }

    pub fn any_down(&self, bindings: &[u32]) -> bool {
        self.codes.iter().any(|c| bindings.contains(c))
    }
}

pub struct FirstPersonCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,

    pub apply_gravity: bool,
    pub check_collisions: bool,
    pub ellipsoid: Vec3,
    pub min_z: f32,
    pub speed: f32,
    pub angular_sensibility: f32,

    pub keys_forward: Vec<u32>,
    pub keys_left: Vec<u32>,
    pub keys_back: Vec<u32>,
    pub keys_right: Vec<u32>,
}

impl FirstPersonCamera {
    /// A camera with the default arrow-key bindings and no physics flags set.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            apply_gravity: false,
            check_collisions: false,
            ellipsoid: Vec3::new(0.5, 1.0, 0.5),
            min_z: 0.1,
            speed: 1.0,
            angular_sensibility: 2000.0,
            keys_forward: vec![KEY_ARROW_UP],
            keys_left: vec![KEY_ARROW_LEFT],
            keys_back: vec![KEY_ARROW_DOWN],
            keys_right: vec![KEY_ARROW_RIGHT],
        }
    }

    /// The walkthrough controller: gravity and collisions applied, the
    /// configured envelope and speeds, and WASD pushed onto the default
    /// bindings.
    pub fn create_controller() -> Self {
        let mut camera = Self::new(Vec3::from_array(CAMERA_START));
        camera.apply_gravity = true;
        camera.check_collisions = true;
        camera.ellipsoid = Vec3::from_array(CAMERA_ELLIPSOID);
        camera.min_z = CAMERA_MIN_Z;
        camera.speed = CAMERA_SPEED;
        camera.angular_sensibility = CAMERA_ANGULAR_SENSIBILITY;
        camera.keys_forward.push(KEY_W);
        camera.keys_left.push(KEY_A);
        camera.keys_back.push(KEY_S);
        camera.keys_right.push(KEY_D);
        camera
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
    }

    fn forward_planar(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    fn right_planar(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    /// Rotate from a pointer drag; pixel deltas are divided by the angular
    /// sensibility. Pitch is clamped short of the poles.
    pub fn look(&mut self, dx_px: f32, dy_px: f32) {
        self.yaw += dx_px / self.angular_sensibility;
        self.pitch = (self.pitch - dy_px / self.angular_sensibility).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Advance the camera by `ticks` simulated frames: key-driven planar
    /// movement at the speed constant, then the per-tick gravity
    /// displacement, each swept against the colliders when collision
    /// checking is on.
    pub fn update(
        &mut self,
        keys: &HeldKeys,
        gravity: Vec3,
        colliders: &[(Vec3, Vec3)],
        ticks: f32,
    ) {
        let mut dir = Vec3::ZERO;
        if keys.any_down(&self.keys_forward) {
            dir += self.forward_planar();
        }
        if keys.any_down(&self.keys_back) {
            dir -= self.forward_planar();
        }
        if keys.any_down(&self.keys_right) {
            dir += self.right_planar();
        }
        if keys.any_down(&self.keys_left) {
            dir -= self.right_planar();
        }
        let mut displacement = dir.normalize_or_zero() * self.speed * ticks;
        if self.apply_gravity {
            displacement += gravity * ticks;
        }
        self.translate(displacement, colliders);
    }

    fn translate(&mut self, displacement: Vec3, colliders: &[(Vec3, Vec3)]) {
        if !self.check_collisions {
            self.position += displacement;
            return;
        }
        for axis in 0..3 {
            let delta = displacement[axis];
            if delta == 0.0 {
                continue;
            }
            self.position[axis] += delta;
            self.resolve_axis(axis, delta, colliders);
        }
    }

    /// Push the envelope out of any box it entered along one axis. Boxes are
    /// expanded by the envelope half-extents so the camera position can be
    /// treated as a point.
    fn resolve_axis(&mut self, axis: usize, delta: f32, colliders: &[(Vec3, Vec3)]) {
        for (bmin, bmax) in colliders {
            let emin = *bmin - self.ellipsoid;
            let emax = *bmax + self.ellipsoid;
            let inside = (0..3).all(|a| self.position[a] > emin[a] && self.position[a] < emax[a]);
            if !inside {
                continue;
            }
            if delta > 0.0 {
                self.position[axis] = emin[axis] - CONTACT_EPSILON;
            } else {
                self.position[axis] = emax[axis] + CONTACT_EPSILON;
            }
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(CAMERA_FOV_Y, aspect.max(1e-3), self.min_z, CAMERA_FAR_Z)
    }

    /// Compute a world-space ray from pixel coordinates in the canvas'
    /// backing store space. Returns `(ray_origin, ray_direction)`.
    pub fn screen_to_world_ray(&self, sx: f32, sy: f32, width: f32, height: f32) -> (Vec3, Vec3) {
        let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
        let aspect = width / height.max(1.0);
        let inv = (self.projection(aspect) * self.view_matrix()).inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let ro = self.position;
        let rd = (p1 - ro).normalize();
        (ro, rd)
    }
}

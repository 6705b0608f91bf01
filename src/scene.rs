//! Scene state shared between the frame loop, the level loader, and the
//! pointer interaction handlers.

use glam::Vec3;

/// Direction-independent ambient light with a hemisphere bias.
#[derive(Debug, Clone, Copy)]
pub struct HemisphericLight {
    pub direction: Vec3,
    pub intensity: f32,
}

/// One placed mesh from the level asset.
///
/// `aabb_min`/`aabb_max` are local bounds; the world box is the local box
/// offset by `translation`. `geometry` indexes the uploaded GPU geometry.
#[derive(Debug, Clone)]
pub struct MeshInstance {
    pub name: String,
    pub translation: Vec3,
    pub aabb_min: Vec3,
    pub aabb_max: Vec3,
    pub check_collisions: bool,
    pub geometry: usize,
}

impl MeshInstance {
    pub fn world_aabb(&self) -> (Vec3, Vec3) {
        (
            self.aabb_min + self.translation,
            self.aabb_max + self.translation,
        )
    }
}

pub struct Scene {
    pub light: HemisphericLight,
    pub gravity: Vec3,
    pub collisions_enabled: bool,
    pub meshes: Vec<MeshInstance>,
}

impl Scene {
    /// Build the empty scene: ambient light, a gravity vector pre-divided by
    /// the simulated tick rate, and collision checking switched on globally.
    pub fn bootstrap() -> Self {
        Self {
            light: HemisphericLight {
                direction: Vec3::from_array(crate::constants::LIGHT_DIRECTION),
                intensity: crate::constants::LIGHT_INTENSITY,
            },
            gravity: Vec3::new(
                0.0,
                crate::constants::GRAVITY_Y / crate::constants::PHYSICS_FPS,
                0.0,
            ),
            collisions_enabled: true,
            meshes: Vec::new(),
        }
    }

    /// World-space boxes the camera collides against.
    pub fn colliders(&self) -> Vec<(Vec3, Vec3)> {
        if !self.collisions_enabled {
            return Vec::new();
        }
        self.meshes
            .iter()
            .filter(|m| m.check_collisions)
            .map(|m| m.world_aabb())
            .collect()
    }
}

//! Pointer interaction logic: picking against mesh bounds, hover
//! transitions, and the horizontal drag plane.

use glam::Vec3;

/// An active planar drag. The plane passes through the grab point with its
/// normal straight up, so the dragged translation can never leave the grab
/// height: every plane hit shares the same Y and `offset` is constant.
#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub active: bool,
    pub mesh: usize,
    pub plane_y: f32,
    pub offset: Vec3,
}

impl DragState {
    /// Begin dragging mesh `mesh` currently at `translation`, grabbed at the
    /// world-space pick point `hit`.
    pub fn begin(mesh: usize, translation: Vec3, hit: Vec3) -> Self {
        Self {
            active: true,
            mesh,
            plane_y: hit.y,
            offset: translation - hit,
        }
    }

    /// Translation for the mesh given a new pointer ray, or `None` when the
    /// ray runs parallel to (or away from) the drag plane.
    pub fn translation_for_ray(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<Vec3> {
        drag_plane_hit(ray_origin, ray_dir, self.plane_y).map(|hit| hit + self.offset)
    }
}

/// Intersect a ray with the horizontal plane `y = plane_y` (normal +Y).
#[inline]
pub fn drag_plane_hit(ray_origin: Vec3, ray_dir: Vec3, plane_y: f32) -> Option<Vec3> {
    if ray_dir.y.abs() < 1e-6 {
        return None;
    }
    let t = (plane_y - ray_origin.y) / ray_dir.y;
    (t >= 0.0).then(|| ray_origin + ray_dir * t)
}

/// Slab-test a ray against an axis-aligned box; returns the entry distance.
#[inline]
pub fn ray_aabb(ray_origin: Vec3, ray_dir: Vec3, bmin: Vec3, bmax: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    for axis in 0..3 {
        if ray_dir[axis].abs() < 1e-9 {
            if ray_origin[axis] < bmin[axis] || ray_origin[axis] > bmax[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / ray_dir[axis];
        let mut t0 = (bmin[axis] - ray_origin[axis]) * inv;
        let mut t1 = (bmax[axis] - ray_origin[axis]) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far || t_far < 0.0 {
            return None;
        }
    }
    Some(t_near.max(0.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChange {
    Enter,
    Exit,
}

/// Report a cursor-relevant hover transition, if any.
#[inline]
pub fn hover_transition(was_hovering: bool, hovering: bool) -> Option<HoverChange> {
    match (was_hovering, hovering) {
        (false, true) => Some(HoverChange::Enter),
        (true, false) => Some(HoverChange::Exit),
        _ => None,
    }
}

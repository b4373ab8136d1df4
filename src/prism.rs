//! Axis-aligned box geometry and the slab-method ray test.
//!
//! One shared intersection routine serves every box-shaped variant: unit
//! blocks, general prisms and area lights acting as occluders. The test walks
//! the three axis slabs, tracking the running entry and exit distances
//! together with the outward normals of the faces crossed there.

use glam::Vec3A;

use crate::material::Material;
use crate::ray::Ray;

/// Slab widths below this count as ray-parallel.
const PARALLEL_EPSILON: f32 = 1e-8;

/// General axis-aligned rectangular prism centered on `position`.
#[derive(Debug, Clone, Copy)]
pub struct Prism {
    /// Center of the prism in world coordinates.
    pub position: Vec3A,
    /// Full extents along x, y and z.
    pub size: Vec3A,
    /// Surface material.
    pub material: Material,
}

impl Prism {
    /// Create a new prism from its center, full extents and material.
    pub fn new(position: Vec3A, size: Vec3A, material: Material) -> Self {
        Self {
            position,
            size,
            material,
        }
    }
}

/// Component of a vector along an axis index (0 = x, 1 = y, 2 = z).
///
/// An index outside 0..3 is a programming-invariant violation and panics.
fn axis_component(v: Vec3A, axis: usize) -> f32 {
    match axis {
        0 => v.x,
        1 => v.y,
        2 => v.z,
        _ => panic!("invalid axis: {axis}"),
    }
}

/// Unit normal along an axis index with the given sign.
fn axis_normal(axis: usize, sign: f32) -> Vec3A {
    match axis {
        0 => Vec3A::new(sign, 0.0, 0.0),
        1 => Vec3A::new(0.0, sign, 0.0),
        2 => Vec3A::new(0.0, 0.0, sign),
        _ => panic!("invalid axis: {axis}"),
    }
}

/// Slab-method ray-box intersection with backface culling.
///
/// For each axis the ray is clipped against the pair of slab planes; the
/// crossing distances are ordered so the smaller always pairs with the face
/// it actually crosses, and the outward normals travel with them through the
/// swap. The entry normal is kept only when it opposes the ray direction.
/// The reported distance is the entry distance when it is positive, otherwise
/// the exit distance (ray origin inside the box), paired with that face's
/// outward normal. Returns `(distance, normal)` or `None` on a miss.
pub fn intersect_box(center: Vec3A, size: Vec3A, ray: &Ray) -> Option<(f32, Vec3A)> {
    let half = size * 0.5;
    let min = center - half;
    let max = center + half;

    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut entry_normal = None;
    let mut exit_normal = None;

    for axis in 0..3 {
        let dir = axis_component(ray.direction, axis);
        let origin = axis_component(ray.origin, axis);
        let slab_min = axis_component(min, axis);
        let slab_max = axis_component(max, axis);

        if dir.abs() < PARALLEL_EPSILON {
            // Ray is parallel to this slab; it misses unless the origin
            // already lies between the two planes.
            if origin < slab_min || origin > slab_max {
                return None;
            }
        } else {
            let mut t1 = (slab_min - origin) / dir;
            let mut t2 = (slab_max - origin) / dir;
            let mut normal1 = axis_normal(axis, -1.0);
            let mut normal2 = axis_normal(axis, 1.0);

            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
                std::mem::swap(&mut normal1, &mut normal2);
            }

            if t1 > t_near {
                t_near = t1;
                // Backface culling: only a normal opposing the ray counts.
                if dir * axis_component(normal1, axis) < 0.0 {
                    entry_normal = Some(normal1);
                } else {
                    entry_normal = None;
                }
            }

            if t2 < t_far {
                t_far = t2;
                exit_normal = Some(normal2);
            }

            if t_near > t_far || t_far < 0.0 {
                return None;
            }
        }
    }

    if t_near > 0.0 {
        entry_normal.map(|normal| (t_near, normal))
    } else if t_far >= 0.0 {
        // Origin inside the box; report the exit face.
        exit_normal.map(|normal| (t_far, normal))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: Vec3A = Vec3A::ONE;

    #[test]
    fn hits_the_facing_side_from_outside() {
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::new(0.0, 0.0, -1.0));
        let (t, normal) = intersect_box(Vec3A::ZERO, UNIT, &ray).unwrap();
        assert!((t - 4.5).abs() < 1e-5);
        assert!((normal - Vec3A::new(0.0, 0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn hits_the_top_face_from_above() {
        let ray = Ray::new(Vec3A::new(0.0, 5.0, 0.0), Vec3A::new(0.0, -1.0, 0.0));
        let (t, normal) = intersect_box(Vec3A::ZERO, UNIT, &ray).unwrap();
        assert!((t - 4.5).abs() < 1e-5);
        assert!((normal - Vec3A::new(0.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn reports_the_exit_face_from_inside() {
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, 1.0));
        let (t, normal) = intersect_box(Vec3A::ZERO, UNIT, &ray).unwrap();
        assert!((t - 0.5).abs() < 1e-6);
        assert!((ray.at(t) - Vec3A::new(0.0, 0.0, 0.5)).length() < 1e-6);
        assert!((normal - Vec3A::new(0.0, 0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn misses_when_parallel_outside_a_slab() {
        let ray = Ray::new(Vec3A::new(0.0, 2.0, 5.0), Vec3A::new(0.0, 0.0, -1.0));
        assert!(intersect_box(Vec3A::ZERO, UNIT, &ray).is_none());
    }

    #[test]
    fn misses_a_box_behind_the_origin() {
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::new(0.0, 0.0, 1.0));
        assert!(intersect_box(Vec3A::ZERO, UNIT, &ray).is_none());
    }

    #[test]
    fn diagonal_ray_picks_the_latest_entry_axis() {
        // Approaching the corner region: entry is governed by the x slab.
        let ray = Ray::new(Vec3A::new(5.0, 0.0, 2.0), Vec3A::new(-1.0, 0.0, -0.4));
        let (t, normal) = intersect_box(Vec3A::ZERO, UNIT, &ray).unwrap();
        assert!(t > 0.0);
        assert!((normal - Vec3A::new(1.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "invalid axis")]
    fn out_of_range_axis_fails_fast() {
        axis_component(Vec3A::ZERO, 3);
    }
}

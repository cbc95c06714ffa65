use nalgebra::{Point3, Vector3};
use thiserror::Error;

use crate::kinematics::Vehicle;

/// Distance from the arena center to each wall.
pub const WORLD_SIZE: f32 = 1000.0;
/// Wall height; tall enough that the landing hop cannot clear it.
pub const BARRIER_HEIGHT: f32 = 5.0;

/// Errors surfaced while building world geometry. The tick path itself
/// is total and has no failure modes.
#[derive(Debug, Error, PartialEq)]
pub enum WorldError {
    #[error("boundary volume has non-positive extent [{0}, {1}, {2}]")]
    DegenerateExtent(f32, f32, f32),
}

// ============================================
// AXIS-ALIGNED BOXES
// ============================================

#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    pub fn from_center_half_extents(center: Point3<f32>, half: Vector3<f32>) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Overlap on all three axes.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// One static wall of the arena. Built once at world setup, immutable
/// for the rest of the session.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryVolume {
    aabb: Aabb,
}

impl BoundaryVolume {
    /// Build from center and full extents. Degenerate boxes are rejected
    /// here so the simulation never has to consider them.
    pub fn new(center: Point3<f32>, extents: Vector3<f32>) -> Result<Self, WorldError> {
        if extents.x <= 0.0 || extents.y <= 0.0 || extents.z <= 0.0 {
            return Err(WorldError::DegenerateExtent(extents.x, extents.y, extents.z));
        }
        Ok(Self {
            aabb: Aabb::from_center_half_extents(center, extents * 0.5),
        })
    }

    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }
}

/// The stock arena: four walls, one unit thick, closing a square
/// `WORLD_SIZE` units from center to edge.
pub fn standard_arena() -> Result<Vec<BoundaryVolume>, WorldError> {
    let wall = |x: f32, z: f32, width: f32, depth: f32| {
        BoundaryVolume::new(
            Point3::new(x, BARRIER_HEIGHT / 2.0, z),
            Vector3::new(width, BARRIER_HEIGHT, depth),
        )
    };
    Ok(vec![
        wall(0.0, -WORLD_SIZE, WORLD_SIZE * 2.0, 1.0)?,
        wall(0.0, WORLD_SIZE, WORLD_SIZE * 2.0, 1.0)?,
        wall(-WORLD_SIZE, 0.0, 1.0, WORLD_SIZE * 2.0)?,
        wall(WORLD_SIZE, 0.0, 1.0, WORLD_SIZE * 2.0)?,
    ])
}

/// World-space bounding box of the vehicle at its current transform.
///
/// The yaw-rotated chassis box is wrapped back into an axis-aligned one,
/// so a diagonal heading widens the box. Recomputed from the actual
/// transform every tick; the vertical bob therefore shifts the box's
/// vertical extent but never feeds back into speed or heading.
pub fn vehicle_aabb(vehicle: &Vehicle) -> Aabb {
    let rot = vehicle.rotation().to_rotation_matrix();
    let m = rot.matrix();
    let he = vehicle.config.half_extents;
    let extent = Vector3::new(
        m[(0, 0)].abs() * he[0] + m[(0, 1)].abs() * he[1] + m[(0, 2)].abs() * he[2],
        m[(1, 0)].abs() * he[0] + m[(1, 1)].abs() * he[1] + m[(1, 2)].abs() * he[2],
        m[(2, 0)].abs() * he[0] + m[(2, 1)].abs() * he[1] + m[(2, 2)].abs() * he[2],
    );
    Aabb::from_center_half_extents(vehicle.position, extent)
}

/// Collision predicate: true on the first boundary the vehicle volume
/// overlaps. Walls never overlap each other, so order is irrelevant.
pub fn check(vehicle_box: &Aabb, boundaries: &[BoundaryVolume]) -> bool {
    boundaries.iter().any(|b| vehicle_box.intersects(b.aabb()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::{COUPE, Vehicle};

    #[test]
    fn test_aabb_overlap_and_separation() {
        let a = Aabb::from_center_half_extents(Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
        let b = Aabb::from_center_half_extents(
            Point3::new(1.5, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
        );
        let c = Aabb::from_center_half_extents(
            Point3::new(3.5, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
        );
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_faces_count_as_contact() {
        let a = Aabb::from_center_half_extents(Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
        let b = Aabb::from_center_half_extents(
            Point3::new(2.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
        );
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_degenerate_extent_rejected() {
        let err = BoundaryVolume::new(Point3::origin(), Vector3::new(1.0, 0.0, 1.0));
        assert_eq!(err.unwrap_err(), WorldError::DegenerateExtent(1.0, 0.0, 1.0));

        let err = BoundaryVolume::new(Point3::origin(), Vector3::new(-1.0, 2.0, 1.0));
        assert!(err.is_err());
    }

    #[test]
    fn test_standard_arena_is_closed_and_valid() {
        let arena = standard_arena().unwrap();
        assert_eq!(arena.len(), 4);

        // A vehicle at the origin touches nothing.
        let v = Vehicle::new(COUPE);
        assert!(!check(&vehicle_aabb(&v), &arena));
    }

    #[test]
    fn test_vehicle_near_wall_collides() {
        let arena = standard_arena().unwrap();
        let mut v = Vehicle::new(COUPE);
        v.position = Point3::new(WORLD_SIZE - 2.0, 0.0, 0.0);
        assert!(check(&vehicle_aabb(&v), &arena));
    }

    #[test]
    fn test_diagonal_heading_widens_world_box() {
        let mut v = Vehicle::new(COUPE);
        let straight = vehicle_aabb(&v);
        v.heading = std::f32::consts::FRAC_PI_4;
        let diagonal = vehicle_aabb(&v);

        let straight_x = straight.max.x - straight.min.x;
        let diagonal_x = diagonal.max.x - diagonal.min.x;
        assert!(diagonal_x > straight_x);

        // Height is unaffected by yaw.
        let straight_y = straight.max.y - straight.min.y;
        let diagonal_y = diagonal.max.y - diagonal.min.y;
        assert!((straight_y - diagonal_y).abs() < 1e-5);
    }
}

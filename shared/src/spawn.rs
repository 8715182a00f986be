//! Random spawn placement on a square ground plane.
//!
//! # Model
//! - The ground is a square of half size `ground_half_size` centered on the anchor origin.
//! - An object with half extents `(hx, hz)` may be centered anywhere in
//!   `[-(ground_half_size - hx), ground_half_size - hx]` on X (and likewise on Z), so its
//!   footprint never hangs over the edge.
//! - Y is a fixed offset, usually half the object's height so it rests on the plane.
//!
//! Positions are drawn independently per object. Overlapping spawns are allowed; the physics
//! engine separates them on the first step.

use log::debug;
use rand::Rng;

use crate::{
    error::DragError,
    types::{Point3, Vec3},
};

/// Per-object placement range on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnBounds {
    /// Maximum |x| of the object center (meters). Always `>= 0`.
    pub half_range_x: f32,
    /// Maximum |z| of the object center (meters). Always `>= 0`.
    pub half_range_z: f32,
    /// Fixed Y of every spawned center (meters).
    pub vertical_offset: f32,
}

impl SpawnBounds {
    /// Derive the placement range for an object of half extents `(half_extent_x, half_extent_z)`.
    ///
    /// Fails with [`DragError::InvalidBounds`] when the object does not fit on the ground
    /// on either axis, when any input is negative or not finite, or when the placement range is
    /// too wide to sample in `f32`.
    pub fn new(
        half_extent_x: f32,
        half_extent_z: f32,
        ground_half_size: f32,
        vertical_offset: f32,
    ) -> Result<Self, DragError> {
        Ok(Self {
            half_range_x: half_range(half_extent_x, ground_half_size)?,
            half_range_z: half_range(half_extent_z, ground_half_size)?,
            vertical_offset,
        })
    }

    /// Draw one position inside these bounds.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Point3 {
        Point3::new(
            symmetric(rng, self.half_range_x),
            self.vertical_offset,
            symmetric(rng, self.half_range_z),
        )
    }

    /// Is `p` (X/Z only) inside these bounds?
    pub fn contains(&self, p: &Point3) -> bool {
        p.x.abs() <= self.half_range_x && p.z.abs() <= self.half_range_z
    }
}

/// Plan `count` spawn positions for objects of the given half extents.
///
/// Deterministic for a given `rng` state; tests inject a seeded `StdRng`.
pub fn plan<R: Rng>(
    count: usize,
    half_extent_x: f32,
    half_extent_z: f32,
    ground_half_size: f32,
    vertical_offset: f32,
    rng: &mut R,
) -> Result<Vec<Point3>, DragError> {
    let bounds = SpawnBounds::new(half_extent_x, half_extent_z, ground_half_size, vertical_offset)?;
    let positions: Vec<Point3> = (0..count).map(|_| bounds.sample(&mut *rng)).collect();

    debug!(
        "planned {} spawn positions within ±{:.3} x ±{:.3} at y={:.3}",
        positions.len(),
        bounds.half_range_x,
        bounds.half_range_z,
        bounds.vertical_offset
    );

    Ok(positions)
}

/// Spawn bounds for a sphere of `radius` on a ground of side `ground_size`.
///
/// Both the footprint half extent and the resting height use `radius / 2`, matching the
/// reference scene layout.
pub fn sphere_bounds(radius: f32, ground_size: f32) -> Result<SpawnBounds, DragError> {
    let half = radius / 2.0;
    SpawnBounds::new(half, half, ground_size / 2.0, half)
}

/// Spawn bounds for a box of full extents `size` on a ground of side `ground_size`.
pub fn box_bounds(size: Vec3, ground_size: f32) -> Result<SpawnBounds, DragError> {
    SpawnBounds::new(size.x / 2.0, size.z / 2.0, ground_size / 2.0, size.y / 2.0)
}

#[inline]
fn half_range(half_extent: f32, ground_half_size: f32) -> Result<f32, DragError> {
    let invalid = || DragError::InvalidBounds {
        half_extent,
        ground_half_size,
    };

    // NaN fails every comparison and lands in the error branch.
    if !(half_extent >= 0.0 && ground_half_size.is_finite() && half_extent <= ground_half_size) {
        return Err(invalid());
    }

    // Sampling draws from `[-range, range]`, whose width must stay representable.
    let range = ground_half_size - half_extent;
    if !(2.0 * range).is_finite() {
        return Err(invalid());
    }

    Ok(range)
}

#[inline]
fn symmetric<R: Rng>(rng: &mut R, half_range: f32) -> f32 {
    if half_range <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-half_range..=half_range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BOX_SIZE, GROUND_SIZE, SPHERE_RADIUS};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn planned_positions_stay_inside_the_ground() {
        let mut rng = StdRng::seed_from_u64(7);
        let ground_half = 0.25;

        for &(hx, hz) in &[(0.0, 0.0), (0.015, 0.015), (0.06, 0.03), (0.2, 0.1), (0.25, 0.25)] {
            let positions = plan(200, hx, hz, ground_half, 0.03, &mut rng).unwrap();
            assert_eq!(positions.len(), 200);

            for p in positions {
                assert!(p.x.abs() <= ground_half - hx, "x={} hx={}", p.x, hx);
                assert!(p.z.abs() <= ground_half - hz, "z={} hz={}", p.z, hz);
                assert_eq!(p.y, 0.03);
            }
        }
    }

    #[test]
    fn object_wider_than_ground_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);

        let err = plan(3, 0.3, 0.01, 0.25, 0.0, &mut rng).unwrap_err();
        assert_eq!(
            err,
            DragError::InvalidBounds {
                half_extent: 0.3,
                ground_half_size: 0.25
            }
        );

        // Z is checked too.
        assert!(matches!(
            plan(3, 0.01, 0.26, 0.25, 0.0, &mut rng),
            Err(DragError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn negative_and_nan_extents_are_rejected() {
        assert!(SpawnBounds::new(-0.01, 0.0, 0.25, 0.0).is_err());
        assert!(SpawnBounds::new(f32::NAN, 0.0, 0.25, 0.0).is_err());
        assert!(SpawnBounds::new(0.0, 0.0, f32::INFINITY, 0.0).is_err());
    }

    #[test]
    fn ground_too_large_to_sample_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            plan(1, 0.0, 0.0, f32::MAX, 0.0, &mut rng),
            Err(DragError::InvalidBounds { .. })
        ));

        // Huge but samplable grounds still plan.
        let positions = plan(8, 0.0, 0.0, 1.0e37, 0.0, &mut rng).unwrap();
        assert!(positions.iter().all(|p| p.x.abs() <= 1.0e37 && p.z.abs() <= 1.0e37));
    }

    #[test]
    fn object_exactly_as_wide_as_ground_spawns_at_center() {
        let mut rng = StdRng::seed_from_u64(3);
        let positions = plan(4, 0.25, 0.25, 0.25, 0.1, &mut rng).unwrap();

        for p in positions {
            assert_eq!((p.x, p.y, p.z), (0.0, 0.1, 0.0));
        }
    }

    #[test]
    fn same_seed_gives_same_plan() {
        let a = plan(5, 0.015, 0.015, 0.25, 0.015, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = plan(5, 0.015, 0.015, 0.25, 0.015, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);

        // Fresh draw per object: five identical positions would mean the rng was not advanced.
        assert!(a.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(plan(0, 0.0, 0.0, 0.25, 0.0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn reference_bounds_use_half_sizes() {
        let sphere = sphere_bounds(SPHERE_RADIUS, GROUND_SIZE).unwrap();
        assert!((sphere.half_range_x - (0.25 - 0.015)).abs() < 1.0e-6);
        assert!((sphere.vertical_offset - 0.015).abs() < 1.0e-6);

        let size = Vec3::new(BOX_SIZE[0], BOX_SIZE[1], BOX_SIZE[2]);
        let cube = box_bounds(size, GROUND_SIZE).unwrap();
        assert!((cube.half_range_x - (0.25 - 0.06)).abs() < 1.0e-6);
        assert!((cube.half_range_z - (0.25 - 0.03)).abs() < 1.0e-6);
        assert!((cube.vertical_offset - 0.03).abs() < 1.0e-6);
    }
}

//! Camera framing math
//!
//! One-time placement of the camera so the whole city is visible:
//! the scene's bounding sphere and the camera's vertical field of
//! view determine the orbit distance, and a fixed elevation angle
//! determines the eye position relative to the sphere center.

use bevy::math::Vec3;

/// Multiplier applied to the sphere radius before the distance
/// computation. Below 1.0 this tightens the frame.
pub const PADDING: f32 = 0.7;

/// Distance floor, keeps tiny scenes clear of the near plane.
pub const MIN_DISTANCE: f32 = 5.0;

/// Viewports narrower than this get a wider frame.
pub const NARROW_VIEWPORT_WIDTH: f32 = 1000.0;

/// Distance multiplier applied below the narrow-viewport breakpoint.
pub const NARROW_SCALE: f32 = 1.35;

/// Fixed elevation angle of the eye above the sphere center, radians.
pub const ELEVATION: f32 = 2.85;

/// The closest allowed zoom, as a fraction of the framed distance.
pub const MIN_ZOOM_RATIO: f32 = 0.33;

/// Bounding sphere of the scene subtree being framed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Sphere center in world space.
    pub center: Vec3,
    /// Sphere radius.
    pub radius: f32,
}

impl BoundingSphere {
    /// Sphere enclosing an axis-aligned min/max extent.
    pub fn from_extents(min: Vec3, max: Vec3) -> Self {
        let center = (min + max) * 0.5;
        Self {
            center,
            radius: (max - center).length(),
        }
    }
}

/// Computed camera placement and orbit bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSolution {
    /// Point the camera looks at and orbits around.
    pub center: Vec3,
    /// Framed camera distance from the center.
    pub distance: f32,
    /// Eye position at the fixed elevation angle.
    pub eye: Vec3,
    /// Closest allowed orbit zoom.
    pub min_distance: f32,
    /// Farthest allowed orbit zoom (the framed distance itself).
    pub max_distance: f32,
}

/// Framed distance for a sphere of `radius` under a vertical field
/// of view of `fov` radians, on a viewport `viewport_width` wide.
pub fn framing_distance(radius: f32, fov: f32, viewport_width: f32) -> f32 {
    let mut distance = ((radius * PADDING) / (fov / 2.0).tan()).max(MIN_DISTANCE);
    if viewport_width < NARROW_VIEWPORT_WIDTH {
        distance *= NARROW_SCALE;
    }
    distance
}

/// Solve the full framing for a bounding sphere.
pub fn solve(sphere: BoundingSphere, fov: f32, viewport_width: f32) -> FrameSolution {
    let distance = framing_distance(sphere.radius, fov, viewport_width);
    let eye = sphere.center
        + Vec3::new(0.0, distance * ELEVATION.sin(), distance * ELEVATION.cos());
    FrameSolution {
        center: sphere.center,
        distance,
        eye,
        min_distance: distance * MIN_ZOOM_RATIO,
        max_distance: distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOV_75: f32 = 75.0 * std::f32::consts::PI / 180.0;

    #[test]
    fn distance_formula_matches_for_known_sphere() {
        // R=10, fov=75°, padding 0.7: (10·0.7)/tan(37.5°).
        let expected = (10.0 * 0.7) / (FOV_75 / 2.0).tan();
        let distance = framing_distance(10.0, FOV_75, 1920.0);
        assert!((distance - expected).abs() < 1e-4);
        assert!(distance > MIN_DISTANCE);
    }

    #[test]
    fn narrow_viewport_widens_the_frame() {
        let wide = framing_distance(10.0, FOV_75, 1920.0);
        let narrow = framing_distance(10.0, FOV_75, 800.0);
        assert!((narrow - wide * NARROW_SCALE).abs() < 1e-4);
    }

    #[test]
    fn tiny_scenes_hit_the_distance_floor() {
        let distance = framing_distance(0.1, FOV_75, 1920.0);
        assert_eq!(distance, MIN_DISTANCE);
    }

    #[test]
    fn floor_applies_before_narrow_scaling() {
        let distance = framing_distance(0.1, FOV_75, 800.0);
        assert!((distance - MIN_DISTANCE * NARROW_SCALE).abs() < 1e-5);
    }

    #[test]
    fn eye_sits_at_the_fixed_elevation() {
        let sphere = BoundingSphere {
            center: Vec3::new(1.0, 2.0, 3.0),
            radius: 10.0,
        };
        let solution = solve(sphere, FOV_75, 1920.0);
        let offset = solution.eye - sphere.center;
        assert_eq!(offset.x, 0.0);
        assert!((offset.y - solution.distance * ELEVATION.sin()).abs() < 1e-4);
        assert!((offset.z - solution.distance * ELEVATION.cos()).abs() < 1e-4);
        assert!((offset.length() - solution.distance).abs() < 1e-3);
    }

    #[test]
    fn zoom_bounds_bracket_the_framed_distance() {
        let sphere = BoundingSphere {
            center: Vec3::ZERO,
            radius: 10.0,
        };
        let solution = solve(sphere, FOV_75, 1920.0);
        assert!((solution.min_distance - solution.distance * MIN_ZOOM_RATIO).abs() < 1e-4);
        assert_eq!(solution.max_distance, solution.distance);
    }

    #[test]
    fn sphere_from_extents_encloses_the_box() {
        let sphere = BoundingSphere::from_extents(
            Vec3::new(-2.0, 0.0, -2.0),
            Vec3::new(2.0, 4.0, 2.0),
        );
        assert_eq!(sphere.center, Vec3::new(0.0, 2.0, 0.0));
        let corner = Vec3::new(2.0, 4.0, 2.0);
        assert!((sphere.radius - (corner - sphere.center).length()).abs() < 1e-5);
    }
}

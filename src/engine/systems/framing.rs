//! One-shot camera auto-framing
//!
//! After the city geometry exists, this system computes its bounding
//! sphere, places the camera at the framed distance and elevation, and
//! configures the orbit zoom bounds. It polls every frame but fires at
//! most once per scene: the `FramingState` resource is terminal at
//! `Framed`, and an empty scene is a transient handled by retrying.

use bevy::{
    camera::primitives::Aabb,
    prelude::*,
};

use crate::city::framing::{solve, BoundingSphere};
use crate::config::RENDER_WIDTH;
use crate::engine::components::{CameraController, CityGeometry};
use crate::engine::resources::{FramingState, OrbitCameraState};

/// Frame the camera around the city bounds, once
///
/// Scheduled in `PostUpdate` after transform propagation so the
/// world-space bounds are valid.
pub fn auto_frame_camera(
    mut state: ResMut<FramingState>,
    mut orbit: ResMut<OrbitCameraState>,
    geometry: Query<(&Aabb, &GlobalTransform), With<CityGeometry>>,
    mut camera: Query<(&mut Transform, &Projection), With<CameraController>>,
) {
    if *state == FramingState::Framed {
        return;
    }

    // Assets not populated yet; try again next frame.
    let Some(sphere) = city_bounding_sphere(&geometry) else {
        return;
    };

    let Ok((mut transform, projection)) = camera.single_mut() else {
        return;
    };
    let Projection::Perspective(perspective) = projection else {
        return;
    };

    let solution = solve(sphere, perspective.fov, RENDER_WIDTH as f32);

    *transform = Transform::from_translation(solution.eye)
        .looking_at(solution.center, Vec3::Y);

    // Bring the orbit state in line with the framed pose so the first
    // mouse drag continues from it instead of jumping.
    let offset = solution.eye - solution.center;
    orbit.center = solution.center;
    orbit.distance = solution.distance;
    orbit.pitch = (offset.y / solution.distance).asin();
    orbit.yaw = offset.x.atan2(offset.z);
    orbit.min_distance = solution.min_distance;
    orbit.max_distance = solution.max_distance;

    *state = FramingState::Framed;
    info!(
        "framed city: center {:?}, distance {:.2}, zoom [{:.2}, {:.2}]",
        solution.center, solution.distance, solution.min_distance, solution.max_distance
    );
}

/// Merge the world-space bounds of all city geometry into one sphere
///
/// Returns `None` while no bounded geometry exists.
fn city_bounding_sphere(
    geometry: &Query<(&Aabb, &GlobalTransform), With<CityGeometry>>,
) -> Option<BoundingSphere> {
    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    let mut populated = false;

    for (aabb, transform) in geometry.iter() {
        let center = Vec3::from(aabb.center);
        let half = Vec3::from(aabb.half_extents);
        for corner in 0..8_u8 {
            let sign = Vec3::new(
                if corner & 1 == 0 { -1.0 } else { 1.0 },
                if corner & 2 == 0 { -1.0 } else { 1.0 },
                if corner & 4 == 0 { -1.0 } else { 1.0 },
            );
            let world = transform.transform_point(center + half * sign);
            min = min.min(world);
            max = max.max(world);
        }
        populated = true;
    }

    populated.then(|| BoundingSphere::from_extents(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::framing::solve;
    use bevy::ecs::system::RunSystemOnce;

    fn framing_world() -> World {
        let mut world = World::new();
        world.insert_resource(FramingState::default());
        world.insert_resource(OrbitCameraState::default());
        let _ = world.spawn((
            Transform::from_xyz(0.0, 12.0, 18.0).looking_at(Vec3::ZERO, Vec3::Y),
            Projection::from(PerspectiveProjection {
                fov: 75.0_f32.to_radians(),
                ..Default::default()
            }),
            CameraController,
        ));
        world
    }

    fn spawn_unit_cube(world: &mut World) -> Entity {
        world
            .spawn((
                Aabb::from_min_max(Vec3::splat(-1.0), Vec3::splat(1.0)),
                GlobalTransform::IDENTITY,
                CityGeometry,
            ))
            .id()
    }

    fn camera_transform(world: &mut World) -> Transform {
        let mut query = world.query_filtered::<&Transform, With<CameraController>>();
        *query.single(world).unwrap()
    }

    #[test]
    fn empty_scene_stays_not_framed() {
        let mut world = framing_world();
        let before = camera_transform(&mut world);

        world.run_system_once(auto_frame_camera).unwrap();

        assert_eq!(*world.resource::<FramingState>(), FramingState::NotFramed);
        assert_eq!(camera_transform(&mut world), before);
    }

    #[test]
    fn frames_once_geometry_exists() {
        let mut world = framing_world();
        let _ = spawn_unit_cube(&mut world);

        world.run_system_once(auto_frame_camera).unwrap();

        assert_eq!(*world.resource::<FramingState>(), FramingState::Framed);

        // Unit cube: sphere of radius √3 around the origin.
        let expected = solve(
            BoundingSphere {
                center: Vec3::ZERO,
                radius: 3.0_f32.sqrt(),
            },
            75.0_f32.to_radians(),
            RENDER_WIDTH as f32,
        );
        let transform = camera_transform(&mut world);
        assert!((transform.translation - expected.eye).length() < 1e-3);

        let orbit = world.resource::<OrbitCameraState>();
        assert_eq!(orbit.center, expected.center);
        assert!((orbit.distance - expected.distance).abs() < 1e-4);
        assert!((orbit.min_distance - expected.min_distance).abs() < 1e-4);
        assert!((orbit.max_distance - expected.max_distance).abs() < 1e-4);
    }

    #[test]
    fn never_reframes_after_success() {
        let mut world = framing_world();
        let cube = spawn_unit_cube(&mut world);

        world.run_system_once(auto_frame_camera).unwrap();
        assert_eq!(*world.resource::<FramingState>(), FramingState::Framed);

        let framed_transform = camera_transform(&mut world);
        let framed_distance = world.resource::<OrbitCameraState>().distance;
        let framed_max = world.resource::<OrbitCameraState>().max_distance;

        // Growing the scene after framing must change nothing.
        *world.get_mut::<Aabb>(cube).unwrap() =
            Aabb::from_min_max(Vec3::splat(-50.0), Vec3::splat(50.0));
        world.run_system_once(auto_frame_camera).unwrap();

        assert_eq!(*world.resource::<FramingState>(), FramingState::Framed);
        assert_eq!(camera_transform(&mut world), framed_transform);
        let orbit = world.resource::<OrbitCameraState>();
        assert_eq!(orbit.distance, framed_distance);
        assert_eq!(orbit.max_distance, framed_max);
    }
}

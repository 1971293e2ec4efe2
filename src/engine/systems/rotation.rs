//! City rotation systems
//!
//! Two systems drive side navigation: one drains queued side requests
//! from the frontend and records each transition against the
//! accumulated rotation, the other eases the city root toward the
//! accumulated target every tick.

use bevy::prelude::*;

use crate::city::damping::damp_toward;
use crate::city::sides::{next_side, prev_side, SIDE_COUNT};
use crate::engine::components::{CityRoot, CityYaw, DistrictSite};
use crate::engine::resources::{CityRotation, CurrentSide, SideInputRes};
use crate::tauri_bridge::shared_state::SideRequest;

/// Apply pending side-selection requests from the frontend
///
/// Each request is resolved against the current side and reported to
/// the rotation controller exactly once; requests that do not change
/// the side are dropped. Runs before the follower so a click and its
/// first eased frame land in the same tick.
pub fn apply_side_input(
    side_input: Option<Res<SideInputRes>>,
    mut current: ResMut<CurrentSide>,
    mut rotation: ResMut<CityRotation>,
) {
    let Some(side_input) = side_input else {
        return;
    };

    let requests: Vec<SideRequest> = {
        let Ok(mut guard) = side_input.0 .0.lock() else {
            return;
        };
        std::mem::take(&mut *guard)
    };

    for request in requests {
        let previous = current.0;
        let next = match request {
            SideRequest::Select(side) if side < SIDE_COUNT => side,
            SideRequest::Select(side) => {
                // Commands reject these already; a queued one is a bug.
                debug_assert!(side < SIDE_COUNT, "side request out of range: {side}");
                warn!("dropping out-of-range side request: {side}");
                continue;
            }
            SideRequest::Next => next_side(previous),
            SideRequest::Prev => prev_side(previous),
        };

        if next == previous {
            continue;
        }

        rotation.0.on_side_changed(previous, next);
        current.0 = next;
        debug!(
            "side {previous} → {next}, target {:.3} rad",
            rotation.0.target_angle()
        );
    }
}

/// Ease the city root toward the accumulated target rotation
///
/// Runs unconditionally every tick; a paused clock (`dt = 0`) leaves
/// the orientation untouched, and inside the snap tolerance the yaw
/// lands on the target exactly.
pub fn follow_side_rotation(
    rotation: Res<CityRotation>,
    time: Res<Time>,
    mut query: Query<(&mut CityYaw, &mut Transform), With<CityRoot>>,
) {
    let target = rotation.0.target_angle();
    for (mut yaw, mut transform) in query.iter_mut() {
        yaw.0 = damp_toward(yaw.0, target, time.delta_secs());
        transform.rotation = Quat::from_rotation_y(yaw.0);
    }
}

/// Scale factor of the beacon belonging to the current side
const ACTIVE_BEACON_SCALE: f32 = 1.5;

/// Enlarge the beacon of the side currently facing the camera
pub fn highlight_active_district(
    current: Res<CurrentSide>,
    mut beacons: Query<(&DistrictSite, &mut Transform)>,
) {
    if !current.is_changed() {
        return;
    }
    for (site, mut transform) in beacons.iter_mut() {
        transform.scale = if site.0 == current.0 {
            Vec3::splat(ACTIVE_BEACON_SCALE)
        } else {
            Vec3::ONE
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::sides::SIDE_ANGLE;
    use crate::tauri_bridge::shared_state::SharedSideInput;
    use bevy::ecs::system::RunSystemOnce;

    fn input_world(requests: Vec<SideRequest>) -> World {
        let mut world = World::new();
        world.insert_resource(CurrentSide::default());
        world.insert_resource(CityRotation::default());
        let shared = SharedSideInput::default();
        shared.0.lock().unwrap().extend(requests);
        world.insert_resource(SideInputRes(shared));
        world
    }

    #[test]
    fn queued_requests_apply_in_order() {
        let mut world = input_world(vec![
            SideRequest::Next,
            SideRequest::Next,
            SideRequest::Select(5),
        ]);

        world.run_system_once(apply_side_input).unwrap();

        assert_eq!(world.resource::<CurrentSide>().0, 5);
        // 0→1→2 accumulates +2·(2π/6); the 2→5 jump is exactly half a
        // turn, which the shortest-arc wrap resolves to −π.
        let target = world.resource::<CityRotation>().0.target_angle();
        let expected = 2.0 * SIDE_ANGLE - std::f32::consts::PI;
        assert!((target - expected).abs() < 1e-5, "target {target}");
    }

    #[test]
    fn repeated_selection_of_current_side_accumulates_nothing() {
        let mut world = input_world(vec![SideRequest::Select(0), SideRequest::Select(0)]);

        world.run_system_once(apply_side_input).unwrap();

        assert_eq!(world.resource::<CurrentSide>().0, 0);
        assert_eq!(world.resource::<CityRotation>().0.target_angle(), 0.0);
    }

    #[test]
    #[should_panic(expected = "side request out of range")]
    fn out_of_range_request_fails_loudly_in_debug() {
        let mut world = input_world(vec![SideRequest::Select(9)]);
        let _ = world.run_system_once(apply_side_input);
    }
}

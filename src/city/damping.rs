//! Exponential angle damping
//!
//! The city root chases its accumulated target rotation with
//! frame-rate-independent easing: the per-tick interpolation factor
//! is derived from elapsed time, so the visual settle time is the
//! same at 30 and 144 FPS.

/// Smoothing constant; larger settles faster.
pub const SMOOTHING: f32 = 5.0;

/// Snap tolerance in radians. Inside this band the angle is set to
/// the target exactly, ending the perpetual micro-jitter a pure
/// exponential approach would leave behind.
pub const SNAP_EPSILON: f32 = 5e-4;

/// Advance `current` toward `target` for a tick of `dt` seconds.
///
/// A `dt` of zero (paused clock) yields a factor of zero and returns
/// `current` unchanged.
pub fn damp_toward(current: f32, target: f32, dt: f32) -> f32 {
    let delta = target - current;
    if delta.abs() < SNAP_EPSILON {
        return target;
    }
    let factor = 1.0 - (-SMOOTHING * dt).exp();
    current + delta * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_monotonically_within_bounded_ticks() {
        let target = 1.0;
        let mut current = 0.0;
        let mut previous_distance: f32 = target - current;
        let mut ticks = 0;
        while (target - current).abs() >= SNAP_EPSILON {
            current = damp_toward(current, target, 0.016);
            let distance = (target - current).abs();
            assert!(
                distance < previous_distance,
                "distance must strictly decrease (tick {ticks})"
            );
            previous_distance = distance;
            ticks += 1;
            assert!(ticks < 1000, "failed to converge");
        }
        current = damp_toward(current, target, 0.016);
        assert_eq!(current, target);
        assert!(ticks > 0);
    }

    #[test]
    fn snaps_exactly_inside_tolerance() {
        let target = 2.0;
        let current = target - 4e-4;
        assert_eq!(damp_toward(current, target, 0.016), target);
    }

    #[test]
    fn zero_dt_leaves_angle_unchanged() {
        assert_eq!(damp_toward(0.0, 1.0, 0.0), 0.0);
    }

    #[test]
    fn approaches_from_both_directions() {
        let up = damp_toward(0.0, 1.0, 0.016);
        let down = damp_toward(1.0, 0.0, 0.016);
        assert!(up > 0.0 && up < 1.0);
        assert!(down < 1.0 && down > 0.0);
        assert!((up - (1.0 - down)).abs() < 1e-6);
    }

    #[test]
    fn already_at_target_stays_there() {
        assert_eq!(damp_toward(3.5, 3.5, 0.016), 3.5);
    }
}

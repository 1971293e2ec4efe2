//! Side rotation bookkeeping
//!
//! The city has six fixed orientations ("sides") spaced 60° apart.
//! Navigation between them accumulates a continuous target rotation
//! rather than snapping to the canonical angle, so walking forward
//! through all six sides visibly spins the city a full turn instead
//! of unwinding backward through the shorter arc.

use std::f32::consts::{PI, TAU};

/// Number of city sides.
pub const SIDE_COUNT: usize = 6;

/// Angular step between adjacent sides (2π/6).
pub const SIDE_ANGLE: f32 = TAU / SIDE_COUNT as f32;

/// Canonical yaw angle of a side, `side × 2π/6`.
///
/// Side indices are produced internally via modulo arithmetic; an
/// out-of-range index is a programming error and fails loudly in
/// debug builds.
pub fn canonical_angle(side: usize) -> f32 {
    debug_assert!(side < SIDE_COUNT, "side index out of range: {side}");
    side as f32 * SIDE_ANGLE
}

/// The side one step clockwise, with wraparound.
pub fn next_side(side: usize) -> usize {
    (side + 1) % SIDE_COUNT
}

/// The side one step counterclockwise, with wraparound.
pub fn prev_side(side: usize) -> usize {
    (side + SIDE_COUNT - 1) % SIDE_COUNT
}

/// Wrap an angle delta into (−π, π].
///
/// At exactly ±π both directions are equally short; this
/// implementation resolves the tie to −π (a property of
/// `rem_euclid`, not a contract).
fn wrap_shortest_arc(delta: f32) -> f32 {
    (delta + PI).rem_euclid(TAU) - PI
}

/// Accumulated target rotation for the city root.
///
/// The accumulated angle is deliberately never reduced mod 2π: it is
/// the total rotation traveled, and the damping system chases it
/// directly. After any transition sequence it stays congruent to the
/// current side's canonical angle mod 2π.
///
/// One instance exists per loaded scene; the current side index is
/// owned by the calling layer, which reports each observed change
/// here exactly once.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SideRotation {
    accumulated: f32,
}

impl SideRotation {
    /// Current damping target, in radians.
    pub fn target_angle(&self) -> f32 {
        self.accumulated
    }

    /// Clear accumulated rotation on scene teardown.
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }

    /// Record a side transition from `previous` to `next`.
    ///
    /// Adjacent steps advance by exactly ±2π/6 so sequential
    /// navigation keeps accumulating turns; non-adjacent jumps
    /// (direct compass selection) take the shortest arc between the
    /// two canonical angles.
    pub fn on_side_changed(&mut self, previous: usize, next: usize) {
        if previous == next {
            return;
        }
        if next_side(previous) == next {
            self.accumulated += SIDE_ANGLE;
        } else if prev_side(previous) == next {
            self.accumulated -= SIDE_ANGLE;
        } else {
            let delta = canonical_angle(next) - canonical_angle(previous);
            self.accumulated += wrap_shortest_arc(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn next_and_prev_are_inverse() {
        for s in 0..SIDE_COUNT {
            assert_eq!(next_side(prev_side(s)), s);
            assert_eq!(prev_side(next_side(s)), s);
        }
    }

    #[test]
    fn wraparound_at_the_seam() {
        assert_eq!(next_side(5), 0);
        assert_eq!(prev_side(0), 5);
    }

    #[test]
    fn canonical_angles_step_by_sixth_turn() {
        for s in 0..SIDE_COUNT {
            let step = canonical_angle(next_side(s)) - canonical_angle(s);
            let wrapped = step.rem_euclid(TAU);
            assert!(
                (wrapped - SIDE_ANGLE).abs() < EPS,
                "side {s}: step {wrapped} != {SIDE_ANGLE}"
            );
        }
    }

    #[test]
    fn full_forward_lap_accumulates_a_whole_turn() {
        let mut rotation = SideRotation::default();
        let mut side = 0;
        for _ in 0..SIDE_COUNT {
            let next = next_side(side);
            rotation.on_side_changed(side, next);
            side = next;
        }
        assert_eq!(side, 0);
        assert!((rotation.target_angle() - TAU).abs() < EPS);
    }

    #[test]
    fn adjacent_steps_are_signed_sixth_turns() {
        let mut rotation = SideRotation::default();
        rotation.on_side_changed(0, 1);
        assert!((rotation.target_angle() - SIDE_ANGLE).abs() < EPS);
        rotation.on_side_changed(1, 0);
        assert!(rotation.target_angle().abs() < EPS);
    }

    #[test]
    fn opposite_jump_is_half_turn_either_way() {
        let mut rotation = SideRotation::default();
        rotation.on_side_changed(0, 3);
        assert!((rotation.target_angle().abs() - PI).abs() < EPS);
    }

    #[test]
    fn jump_takes_shortest_arc() {
        // 0 → 4 is two steps backward (−2·2π/6), not four forward.
        let mut rotation = SideRotation::default();
        rotation.on_side_changed(0, 4);
        assert!((rotation.target_angle() + 2.0 * SIDE_ANGLE).abs() < EPS);
    }

    #[test]
    fn same_side_is_a_no_op() {
        let mut rotation = SideRotation::default();
        rotation.on_side_changed(2, 2);
        assert_eq!(rotation.target_angle(), 0.0);
    }

    #[test]
    fn accumulated_stays_congruent_to_canonical() {
        let transitions = [(0, 1), (1, 2), (2, 5), (5, 4), (4, 0), (0, 3)];
        let mut rotation = SideRotation::default();
        for (previous, next) in transitions {
            rotation.on_side_changed(previous, next);
            let residue =
                (rotation.target_angle() - canonical_angle(next)).rem_euclid(TAU);
            let distance = residue.min(TAU - residue);
            assert!(distance < 1e-4, "{previous}→{next}: residue {residue}");
        }
    }

    #[test]
    fn reset_clears_accumulation() {
        let mut rotation = SideRotation::default();
        rotation.on_side_changed(0, 1);
        rotation.reset();
        assert_eq!(rotation.target_angle(), 0.0);
    }
}

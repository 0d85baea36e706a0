use glam::Vec2;
use std::f32::consts::PI;

/// Unit vector from `from` to `to`, or zero if the points coincide.
pub(crate) fn direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Signed angle from `reference` to `other`, normalized to `[-π, π)`.
///
/// Negative angles turn clockwise (to the right of `reference` with y up),
/// positive counterclockwise. Exactly antiparallel vectors read `-π`.
pub(crate) fn signed_angle(reference: Vec2, other: Vec2) -> f32 {
    let raw = reference.perp_dot(other).atan2(reference.dot(other));
    (raw + PI).rem_euclid(2.0 * PI) - PI
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::macros::assert_f32_eq;
    use glam::vec2;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn t_direction_is_normalized() {
        let d = direction(vec2(1.0, 1.0), vec2(4.0, 5.0));
        assert_f32_eq!(d.length(), 1.0, 1e-6);
        assert_f32_eq!(d.x, 0.6, 1e-6);
        assert_f32_eq!(d.y, 0.8, 1e-6);
    }

    #[test]
    fn t_direction_of_coincident_points_is_zero() {
        assert_eq!(direction(vec2(2.0, 3.0), vec2(2.0, 3.0)), Vec2::ZERO);
    }

    #[test]
    fn t_signed_angle_quadrants() {
        let east = vec2(1.0, 0.0);
        assert_f32_eq!(signed_angle(east, vec2(0.0, 1.0)), FRAC_PI_2, 1e-6);
        assert_f32_eq!(signed_angle(east, vec2(0.0, -1.0)), -FRAC_PI_2, 1e-6);
        assert_f32_eq!(signed_angle(east, vec2(1.0, 1.0)), FRAC_PI_4, 1e-6);
        assert_f32_eq!(signed_angle(east, vec2(1.0, -1.0)), -FRAC_PI_4, 1e-6);
        assert_f32_eq!(signed_angle(east, east), 0.0, 1e-6);
    }

    #[test]
    fn t_signed_angle_antiparallel_maps_to_negative_pi() {
        let east = vec2(1.0, 0.0);
        assert_f32_eq!(signed_angle(east, vec2(-1.0, 0.0)), -PI, 1e-6);
        // Either side of the negative x axis stays near the matching end of
        // the range instead of wrapping.
        assert!(signed_angle(east, vec2(-1.0, 1e-3)) > 3.0);
        assert!(signed_angle(east, vec2(-1.0, -1e-3)) < -3.0);
    }
}

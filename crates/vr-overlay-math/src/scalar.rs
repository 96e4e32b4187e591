//! Scalar helpers shared by every vector and matrix operation.

use std::f32::consts::PI;

/// Tolerance used by the approximate comparisons.
pub const EPSILON: f32 = 1e-6;

/// Clamps `value` into `[min, max]`.
///
/// Unlike [`f32::clamp`] this never panics when `min > max`; `min` wins.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Linear interpolation. `weight` is not clamped.
///
/// Returns exactly `from` at weight 0 and exactly `to` at weight 1.
#[inline]
pub fn lerp(from: f32, to: f32, weight: f32) -> f32 {
    from * (1.0 - weight) + to * weight
}

/// The weight that [`lerp`] would need to produce `value`.
#[inline]
pub fn inverse_lerp(from: f32, to: f32, value: f32) -> f32 {
    (value - from) / (to - from)
}

/// Relative comparison with an absolute floor of [`EPSILON`].
pub fn is_equal_approx(a: f32, b: f32) -> bool {
    // Covers infinities of the same sign.
    if a == b {
        return true;
    }
    let tolerance = (EPSILON * a.abs()).max(EPSILON);
    (a - b).abs() < tolerance
}

#[inline]
pub fn is_zero_approx(s: f32) -> bool {
    s.abs() < EPSILON
}

/// -1, 0 or 1. Zero (of either sign) maps to 0.
#[inline]
pub fn sign(s: f32) -> f32 {
    if s > 0.0 {
        1.0
    } else if s < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Rounds `s` to the nearest multiple of `step`. A zero step is a no-op.
pub fn snapped(s: f32, step: f32) -> f32 {
    if step != 0.0 {
        (s / step + 0.5).floor() * step
    } else {
        s
    }
}

/// Floored modulo: the result takes the sign of `b`.
pub fn posmod(a: f32, b: f32) -> f32 {
    let mut c = a % b;
    if (c < 0.0 && b > 0.0) || (c > 0.0 && b < 0.0) {
        c += b;
    }
    c
}

pub fn posmod_i32(a: i32, b: i32) -> i32 {
    let mut c = a % b;
    if (c < 0 && b > 0) || (c > 0 && b < 0) {
        c += b;
    }
    c
}

/// Moves `from` toward `to` by at most `delta`, without overshooting.
pub fn move_toward(from: f32, to: f32, delta: f32) -> f32 {
    if (to - from).abs() <= delta {
        to
    } else {
        from + sign(to - from) * delta
    }
}

#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * (PI / 180.0)
}

#[inline]
pub fn rad_to_deg(rad: f32) -> f32 {
    rad * (180.0 / PI)
}

/// Catmull-Rom style Hermite interpolation between `from` and `to`.
pub fn cubic_interpolate(from: f32, to: f32, pre: f32, post: f32, weight: f32) -> f32 {
    0.5 * ((from * 2.0)
        + (-pre + to) * weight
        + (2.0 * pre - 5.0 * from + 4.0 * to - post) * (weight * weight)
        + (-pre + 3.0 * from - 3.0 * to + post) * (weight * weight * weight))
}

/// Like [`cubic_interpolate`] but with non-uniform knot times.
#[allow(clippy::too_many_arguments)]
pub fn cubic_interpolate_in_time(
    from: f32,
    to: f32,
    pre: f32,
    post: f32,
    weight: f32,
    to_t: f32,
    pre_t: f32,
    post_t: f32,
) -> f32 {
    let t = lerp(0.0, to_t, weight);
    let a1 = lerp(pre, from, if pre_t == 0.0 { 0.0 } else { (t - pre_t) / -pre_t });
    let a2 = lerp(from, to, if to_t == 0.0 { 0.5 } else { t / to_t });
    let a3 = lerp(
        to,
        post,
        if post_t - to_t == 0.0 {
            1.0
        } else {
            (t - to_t) / (post_t - to_t)
        },
    );
    let b1 = lerp(
        a1,
        a2,
        if to_t - pre_t == 0.0 {
            0.0
        } else {
            (t - pre_t) / (to_t - pre_t)
        },
    );
    let b2 = lerp(a2, a3, if post_t == 0.0 { 1.0 } else { t / post_t });
    lerp(b1, b2, if to_t == 0.0 { 0.5 } else { t / to_t })
}

/// Cubic Bezier evaluated with the Bernstein basis.
pub fn bezier_interpolate(start: f32, control_1: f32, control_2: f32, end: f32, t: f32) -> f32 {
    let omt = 1.0 - t;
    let omt2 = omt * omt;
    let omt3 = omt2 * omt;
    let t2 = t * t;
    let t3 = t2 * t;
    start * omt3 + control_1 * omt2 * t * 3.0 + control_2 * omt * t2 * 3.0 + end * t3
}

/// First derivative of [`bezier_interpolate`] with respect to `t`.
pub fn bezier_derivative(start: f32, control_1: f32, control_2: f32, end: f32, t: f32) -> f32 {
    let omt = 1.0 - t;
    let omt2 = omt * omt;
    let t2 = t * t;
    (control_1 - start) * 3.0 * omt2
        + (control_2 - control_1) * 6.0 * omt * t
        + (end - control_2) * 3.0 * t2
}

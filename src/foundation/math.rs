use crate::foundation::core::{Affine, Transform2D, Vec2};

/// Split an affine matrix into position, rotation and per-axis scale.
///
/// Rotation is the angle of the first basis column. A negative determinant is represented
/// as a mirrored axis: the x axis when `a < d`, otherwise the y axis. When x is mirrored
/// the rotation is taken from the negated first column so the result recomposes to `m`.
/// Skew is not representable and is dropped.
pub fn decompose_affine(m: Affine) -> Transform2D {
    let [a, b, c, d, e, f] = m.as_coeffs();
    let mut scale = Vec2::new(a.hypot(b), c.hypot(d));
    let mut rotation = b.atan2(a);

    let determinant = a * d - b * c;
    if determinant < 0.0 {
        if a < d {
            scale.x = -scale.x;
            rotation = (-b).atan2(-a);
        } else {
            scale.y = -scale.y;
        }
    }

    Transform2D {
        position: Vec2::new(e, f),
        rotation_deg: rotation.to_degrees(),
        scale,
    }
}

/// Map `value` from `[start, end]` onto `[0, 1]`, clamping outside the range.
pub fn remap_clamped(value: f64, start: f64, end: f64) -> f64 {
    if end <= start {
        return if value >= end { 1.0 } else { 0.0 };
    }
    ((value - start) / (end - start)).clamp(0.0, 1.0)
}

/// Linear interpolation; `t` is not clamped.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
/// Linearly interpolate between two vectors; `t` is not clamped.
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

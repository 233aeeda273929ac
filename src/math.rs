//! Small numeric helpers shared by the primitive generators.

use std::f64::consts::PI;

use cgmath::{
    prelude::*,
    Vector2, Vector3,
};


/// A full turn in radians.
pub const TAU: f64 = 2.0 * PI;

/// Directions shorter than this are treated as degenerate.
pub(crate) const EPSILON: f64 = 1e-12;

/// Linear interpolation between the points `a` and `b`.
pub fn lerp<P>(a: P, b: P, t: f64) -> P
where
    P: EuclideanSpace<Scalar = f64>,
{
    a + (b - a) * t
}

/// Rotates a 2D vector by -90°, i.e. `(x, y)` becomes `(y, -x)`.
///
/// For a curve running counter clockwise, this yields the outward pointing
/// normal from the tangent.
pub fn rotate_cw(v: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(v.y, -v.x)
}

/// Rotates a 2D vector by +90°. Inverse of [`rotate_cw`].
pub fn rotate_ccw(v: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-v.y, v.x)
}

/// Returns a unit vector orthogonal to the unit vector `dir`, as close to
/// `hint` as possible.
///
/// If `hint` is (nearly) parallel to `dir` or zero, the coordinate axis that
/// is least aligned with `dir` is used instead.
pub fn orthonormal(dir: Vector3<f64>, hint: Vector3<f64>) -> Vector3<f64> {
    let project_out = |v: Vector3<f64>| v - dir * v.dot(dir);

    let candidate = project_out(hint);
    if candidate.magnitude2() > EPSILON {
        return candidate.normalize();
    }

    let axis = if dir.x.abs() <= dir.y.abs() && dir.x.abs() <= dir.z.abs() {
        Vector3::unit_x()
    } else if dir.y.abs() <= dir.z.abs() {
        Vector3::unit_y()
    } else {
        Vector3::unit_z()
    };
    project_out(axis).normalize()
}

/// Normalizes `v`, or returns `None` if it has no direction: zero length,
/// a length that underflows, or non-finite components.
pub(crate) fn try_normalize<V>(v: V) -> Option<V>
where
    V: InnerSpace<Scalar = f64>,
{
    let len = v.magnitude();
    if len > 0.0 && len.is_finite() {
        Some(v / len)
    } else {
        None
    }
}

/// Normalizes the average of two directions. Used when splitting an edge.
pub(crate) fn mean_direction<V>(a: V, b: V) -> V
where
    V: InnerSpace<Scalar = f64>,
{
    ((a + b) * 0.5).normalize()
}


#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use cgmath::Point3;

    use super::*;

    #[test]
    fn lerp_endpoints() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(-1.0, 0.0, 7.0);

        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);

        let mid = lerp(a, b, 0.5);
        assert_abs_diff_eq!(mid.x, 0.0);
        assert_abs_diff_eq!(mid.y, 1.0);
        assert_abs_diff_eq!(mid.z, 5.0);
    }

    #[test]
    fn rotations_are_inverse() {
        let v = Vector2::new(0.3, -2.0);
        assert_eq!(rotate_ccw(rotate_cw(v)), v);
        assert_eq!(rotate_cw(Vector2::unit_x()), Vector2::new(0.0, -1.0));
    }

    #[test]
    fn try_normalize_tiny_and_degenerate() {
        let v = try_normalize(Vector2::new(1e-9, 0.0)).unwrap();
        assert_eq!(v, Vector2::new(1.0, 0.0));

        assert!(try_normalize(Vector2::new(0.0, 0.0)).is_none());
        assert!(try_normalize(Vector2::new(1e-320, 0.0)).is_none());
        assert!(try_normalize(Vector3::new(std::f64::NAN, 0.0, 1.0)).is_none());
        assert!(try_normalize(Vector3::new(std::f64::INFINITY, 0.0, 1.0)).is_none());
    }

    #[test]
    fn orthonormal_uses_hint() {
        let n = orthonormal(Vector3::unit_z(), Vector3::new(2.0, 0.0, 5.0));
        assert_abs_diff_eq!(n.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(n.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(n.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn orthonormal_degenerate_hint() {
        let dir = Vector3::new(0.0, 0.0, 1.0);
        for hint in &[Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -3.0)] {
            let n = orthonormal(dir, *hint);
            assert_abs_diff_eq!(n.magnitude(), 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(n.dot(dir), 0.0, epsilon = 1e-12);
        }
    }
}

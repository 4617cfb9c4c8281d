use nalgebra::{Point3, Vector3};

/// Cartesian vector pointing from `from` to `to`.
#[inline]
pub fn displacement(from: &Point3<f64>, to: &Point3<f64>) -> Vector3<f64> {
    to - from
}

/// Cosine of the angle between two arms sharing a vertex.
///
/// The result is clamped to `[-1, 1]` to absorb rounding.
///
/// # Panics
///
/// Panics if either arm has zero length; coincident atoms make the angle undefined.
#[inline]
pub fn arm_cosine(arm_a: &Vector3<f64>, arm_b: &Vector3<f64>) -> f64 {
    let norm_product = arm_a.norm() * arm_b.norm();
    assert!(
        norm_product > 0.0,
        "angle is undefined for a zero-length arm; atoms must not share a position"
    );
    (arm_a.dot(arm_b) / norm_product).clamp(-1.0, 1.0)
}

/// Cosine of the angle ∠(a, center, b) with `center` as the vertex.
#[inline]
pub fn angle_cosine(a: &Point3<f64>, center: &Point3<f64>, b: &Point3<f64>) -> f64 {
    arm_cosine(&(a - center), &(b - center))
}

/// Angle ∠(a, center, b) in degrees.
#[inline]
pub fn angle_degrees(a: &Point3<f64>, center: &Point3<f64>, b: &Point3<f64>) -> f64 {
    angle_cosine(a, center, b).acos().to_degrees()
}

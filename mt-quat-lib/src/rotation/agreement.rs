use nalgebra::{Matrix3, Quaternion};

use super::quaternion_to_matrix;

/// Largest absolute entry difference between `m` and the matrix of `q`.
pub fn representation_error(m: &Matrix3<f64>, q: &Quaternion<f64>) -> f64 {
    (m - quaternion_to_matrix(q)).amax()
}

/// Whether `next` sits in the opposite hemisphere of `prev`.
///
/// Both still describe nearly the same rotation, but plotted quaternion
/// components jump sign, which is the discontinuity operators look for.
pub fn is_hemisphere_flip(prev: &Quaternion<f64>, next: &Quaternion<f64>) -> bool {
    prev.coords.dot(&next.coords) < 0.0
}

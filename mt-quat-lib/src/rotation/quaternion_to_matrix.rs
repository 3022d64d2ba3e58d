use nalgebra::{Matrix3, Quaternion};

/// Converts a quaternion (scalar first) to its rotation matrix.
///
/// The quaternion is normalized first, so stored columns that drifted off
/// unit length still give an orthonormal matrix. A zero quaternion yields
/// the identity.
pub fn quaternion_to_matrix(q: &Quaternion<f64>) -> Matrix3<f64> {
    let norm = q.norm();
    let q = if norm > 0.0 { *q / norm } else { *q };
    let (w, x, y, z) = (q.w, q.i, q.j, q.k);

    let (xx, yy, zz) = (x * x, y * y, z * z);
    let (wx, wy, wz) = (w * x, w * y, w * z);
    let (xy, xz, yz) = (x * y, x * z, y * z);

    Matrix3::new(
        1.0 - 2.0 * (yy + zz),
        2.0 * (xy - wz),
        2.0 * (xz + wy),
        2.0 * (xy + wz),
        1.0 - 2.0 * (xx + zz),
        2.0 * (yz - wx),
        2.0 * (xz - wy),
        2.0 * (yz + wx),
        1.0 - 2.0 * (xx + yy),
    )
}

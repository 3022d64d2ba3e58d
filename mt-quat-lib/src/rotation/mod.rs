mod agreement;
mod euler_angles;
mod matrix_to_quaternion;
mod quaternion_to_matrix;

use nalgebra::Matrix3;

pub use agreement::{is_hemisphere_flip, representation_error};
pub use euler_angles::{euler_angles_xyz, EulerAngles};
pub use matrix_to_quaternion::{matrix_to_quaternion, ShepperdBranch};
pub use quaternion_to_matrix::quaternion_to_matrix;

pub fn matrix_from_row_major(values: &[f64; 9]) -> Matrix3<f64> {
    Matrix3::from_row_slice(values)
}

pub fn to_row_major(m: &Matrix3<f64>) -> [f64; 9] {
    let mut values = [0.0; 9];
    for r in 0..3 {
        for c in 0..3 {
            values[r * 3 + c] = m[(r, c)];
        }
    }
    values
}

use nalgebra::{Matrix3, Quaternion};

use crate::{
    common::{OrientationColumns, SensorTable},
    rotation::{
        euler_angles_xyz, is_hemisphere_flip, matrix_to_quaternion, quaternion_to_matrix,
        representation_error, EulerAngles,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuaternionSource {
    /// Read from the `Quat_q*` columns.
    Stored,
    /// Computed from the row's matrix because the table has no quaternion columns.
    Computed,
}

/// Everything needed to draw one row: the matrix side and the quaternion side.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonFrame {
    pub row: usize,
    pub matrix: Matrix3<f64>,
    pub quaternion: Quaternion<f64>,
    pub quaternion_source: QuaternionSource,
    pub quaternion_matrix: Matrix3<f64>,
    pub euler: EulerAngles,
    pub error: f64,
    pub flipped: bool,
}

impl ComparisonFrame {
    pub fn from_table(
        table: &SensorTable,
        columns: &OrientationColumns,
        row: usize,
        previous: Option<&Quaternion<f64>>,
    ) -> Self {
        let matrix = table.matrix(row, columns);
        // computed quaternions only live for this frame
        let (quaternion, quaternion_source) = match table.quaternion(row, columns) {
            Some(q) => (q, QuaternionSource::Stored),
            None => (matrix_to_quaternion(&matrix), QuaternionSource::Computed),
        };

        Self {
            row,
            matrix,
            quaternion,
            quaternion_source,
            quaternion_matrix: quaternion_to_matrix(&quaternion),
            euler: euler_angles_xyz(&matrix),
            error: representation_error(&matrix, &quaternion),
            flipped: previous.is_some_and(|prev| is_hemisphere_flip(prev, &quaternion)),
        }
    }
}

use nalgebra::{Matrix3, Rotation3};

use super::{SensorTable, MATRIX_COLUMNS};
use crate::rotation::to_row_major;

pub(crate) const MT_EXPORT: &str = "\
// Start Time: Unknown
// Update Rate: 100.0Hz
// Filter Profile: human (46.1)
// Firmware Version: 4.0.2
PacketCounter\tMat[0][0]\tMat[0][1]\tMat[0][2]\tMat[1][0]\tMat[1][1]\tMat[1][2]\tMat[2][0]\tMat[2][1]\tMat[2][2]\t
1\t1.000000\t0.000000\t0.000000\t0.000000\t1.000000\t0.000000\t0.000000\t0.000000\t1.000000\t
2\t-1.000000\t0.000000\t0.000000\t0.000000\t-1.000000\t0.000000\t0.000000\t0.000000\t1.000000\t
";

/// Slowly yawing sensor, one row per sample.
pub(crate) fn yawing_matrices(count: usize) -> Vec<Matrix3<f64>> {
    (0..count)
        .map(|i| Rotation3::from_euler_angles(0.1, -0.2, i as f64 * 0.05).into_inner())
        .collect()
}

/// Raw tab separated export in the layout the Xsens software writes.
pub(crate) fn mt_export_text(matrices: &[Matrix3<f64>]) -> String {
    let mut text = String::from(
        "// Start Time: Unknown\n// Update Rate: 100.0Hz\n// Filter Profile: human (46.1)\n// Firmware Version: 4.0.2\n",
    );
    text.push_str("PacketCounter\t");
    text.push_str(&MATRIX_COLUMNS.join("\t"));
    text.push_str("\t\n");
    for (i, m) in matrices.iter().enumerate() {
        text.push_str(&format!("{}\t", i));
        for value in to_row_major(m) {
            text.push_str(&format!("{:.9}\t", value));
        }
        text.push('\n');
    }
    text
}

pub(crate) fn matrix_table(matrices: &[Matrix3<f64>]) -> SensorTable {
    SensorTable::new(
        MATRIX_COLUMNS.iter().map(|name| name.to_string()).collect(),
        matrices.iter().map(|m| to_row_major(m).to_vec()).collect(),
    )
}

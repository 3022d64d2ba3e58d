mod quat_csv_writer;
mod sensor_table;
#[cfg(test)]
pub(crate) mod test_utils;

use std::path::{Path, PathBuf};

pub use quat_csv_writer::{write_table, QuatCSVWriter};
pub use sensor_table::{OrientationColumns, SensorTable, TableFormat};

pub const MATRIX_COLUMNS: [&str; 9] = [
    "Mat[0][0]", "Mat[0][1]", "Mat[0][2]",
    "Mat[1][0]", "Mat[1][1]", "Mat[1][2]",
    "Mat[2][0]", "Mat[2][1]", "Mat[2][2]",
];

pub const QUATERNION_COLUMNS: [&str; 4] = ["Quat_q0", "Quat_q1", "Quat_q2", "Quat_q3"];

pub const QUAT_OUTPUT_SUFFIX: &str = "_quat";
pub const QUAT_OUTPUT_EXTENSION: &str = "csv";

/// `dir/1_MT_walk.txt` -> `dir/1_MT_walk_quat.csv`
pub fn quat_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!(
        "{}{}.{}",
        stem, QUAT_OUTPUT_SUFFIX, QUAT_OUTPUT_EXTENSION
    ))
}

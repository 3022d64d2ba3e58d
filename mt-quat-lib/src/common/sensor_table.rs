use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use anyhow::{anyhow, Context, Result};
use nalgebra::{Matrix3, Quaternion};

use super::{MATRIX_COLUMNS, QUATERNION_COLUMNS};

// Raw MT exports: 3 comment lines, then one more line before the header row
const MT_EXPORT_SKIP_LINES: usize = 3;
const MT_EXPORT_HEADER_OFFSET: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Tab separated raw export as written by the Xsens software.
    MtExport,
    /// Comma separated table with the header on the first line.
    Csv,
}

impl TableFormat {
    /// `.txt` files are raw exports, everything else is treated as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("txt") => Self::MtExport,
            _ => Self::Csv,
        }
    }

    fn delimiter(self) -> u8 {
        match self {
            Self::MtExport => b'\t',
            Self::Csv => b',',
        }
    }

    fn lines_before_header(self) -> usize {
        match self {
            Self::MtExport => MT_EXPORT_SKIP_LINES + MT_EXPORT_HEADER_OFFSET,
            Self::Csv => 0,
        }
    }
}

/// Column positions of the orientation data inside a table.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientationColumns {
    pub matrix: [usize; 9],
    pub quaternion: Option<[usize; 4]>,
}

impl OrientationColumns {
    pub fn matrix_from_row(&self, row: &[f64]) -> Matrix3<f64> {
        Matrix3::from_fn(|r, c| row[self.matrix[r * 3 + c]])
    }

    pub fn quaternion_from_row(&self, row: &[f64]) -> Option<Quaternion<f64>> {
        self.quaternion
            .map(|[w, x, y, z]| Quaternion::new(row[w], row[x], row[y], row[z]))
    }
}

/// A numeric table read fully into memory. Rows are in file (time) order.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl SensorTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        Self { columns, rows }
    }

    pub fn read(path: &Path) -> Result<Self> {
        Self::read_as(path, TableFormat::from_path(path))
    }

    pub fn read_as(path: &Path, format: TableFormat) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        Self::from_reader(file, format)
    }

    pub fn from_reader<R: Read>(reader: R, format: TableFormat) -> Result<Self> {
        let mut reader = BufReader::new(reader);
        let mut skipped = String::new();
        for i in 0..format.lines_before_header() {
            skipped.clear();
            if reader.read_line(&mut skipped)? == 0 {
                return Err(anyhow!("file ended after {} lines, expected a header", i));
            }
        }

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(format.delimiter())
            .flexible(true)
            .from_reader(reader);

        let mut columns: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|name| name.trim().to_string())
            .collect();
        // exports end every line with a delimiter
        while columns.last().is_some_and(|name| name.is_empty()) {
            columns.pop();
        }
        if columns.is_empty() {
            return Err(anyhow!("header row is empty"));
        }

        let mut rows = Vec::new();
        for (row_index, record) in csv_reader.records().enumerate() {
            let record = record?;
            let mut row = Vec::with_capacity(columns.len());
            for (column, name) in columns.iter().enumerate() {
                let cell = record.get(column).unwrap_or("").trim();
                let value = if cell.is_empty() {
                    f64::NAN
                } else {
                    cell.parse::<f64>().map_err(|_| {
                        anyhow!(
                            "could not convert '{}' to float in column '{}', row {}",
                            cell,
                            name,
                            row_index
                        )
                    })?
                };
                row.push(value);
            }
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_quaternion_columns(&self) -> bool {
        QUATERNION_COLUMNS
            .iter()
            .all(|name| self.column_index(name).is_some())
    }

    pub fn orientation_columns(&self) -> Result<OrientationColumns> {
        let mut matrix = [0usize; 9];
        let mut missing = Vec::new();
        for (slot, name) in matrix.iter_mut().zip(MATRIX_COLUMNS) {
            match self.column_index(name) {
                Some(index) => *slot = index,
                None => missing.push(name),
            }
        }
        if !missing.is_empty() {
            return Err(anyhow!("missing rotation matrix columns {:?}", missing));
        }

        let mut quaternion = [0usize; 4];
        let mut has_quaternion = true;
        for (slot, name) in quaternion.iter_mut().zip(QUATERNION_COLUMNS) {
            match self.column_index(name) {
                Some(index) => *slot = index,
                None => has_quaternion = false,
            }
        }

        Ok(OrientationColumns {
            matrix,
            quaternion: has_quaternion.then_some(quaternion),
        })
    }

    pub fn matrix(&self, row: usize, columns: &OrientationColumns) -> Matrix3<f64> {
        columns.matrix_from_row(&self.rows[row])
    }

    pub fn quaternion(&self, row: usize, columns: &OrientationColumns) -> Option<Quaternion<f64>> {
        columns.quaternion_from_row(&self.rows[row])
    }

    /// New table where `names` hold one value per row from `compute`.
    /// Existing columns with those names are overwritten, others are appended.
    pub fn with_computed_columns<const N: usize>(
        &self,
        names: [&str; N],
        mut compute: impl FnMut(&[f64]) -> [f64; N],
    ) -> Self {
        let mut columns = self.columns.clone();
        let targets: Vec<usize> = names
            .iter()
            .map(|name| match self.column_index(name) {
                Some(index) => index,
                None => {
                    columns.push(name.to_string());
                    columns.len() - 1
                }
            })
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut extended = row.clone();
                extended.resize(columns.len(), f64::NAN);
                for (target, value) in targets.iter().zip(compute(row)) {
                    extended[*target] = value;
                }
                extended
            })
            .collect();

        Self { columns, rows }
    }
}

use std::{fs::File, path::Path};

use anyhow::Result;

use super::SensorTable;

/// Writes a table as comma separated values, header first.
/// NaN cells are written empty, the way the exports mark missing samples.
pub struct QuatCSVWriter {
    writer: csv::Writer<File>,
}

impl QuatCSVWriter {
    pub fn new(file_path: &Path, columns: &[String]) -> Result<Self> {
        let mut writer = csv::Writer::from_path(file_path)?;
        writer.write_record(columns)?;
        Ok(Self { writer })
    }

    pub fn write(&mut self, row: &[f64]) -> Result<()> {
        let row = row.iter().map(|value| {
            if value.is_nan() {
                String::new()
            } else {
                format!("{}", value)
            }
        });
        self.writer.write_record(row)?;
        Ok(())
    }

    pub fn write_all(&mut self, table: &SensorTable) -> Result<()> {
        for row in table.rows() {
            self.write(row)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

pub fn write_table(file_path: &Path, table: &SensorTable) -> Result<()> {
    let mut writer = QuatCSVWriter::new(file_path, table.columns())?;
    writer.write_all(table)?;
    writer.flush()
}

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use super::mt_export_name::is_mt_export_name;
use crate::{
    common::{quat_output_path, write_table, SensorTable, TableFormat, QUATERNION_COLUMNS},
    rotation::matrix_to_quaternion,
    ConfigError,
};

#[derive(Debug)]
pub enum FileOutcome {
    Converted { output: PathBuf, rows: usize },
    Failed(anyhow::Error),
}

#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub outcome: FileOutcome,
}

/// The console line printed for each file.
impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            FileOutcome::Converted { output, .. } => {
                write!(f, "✔︎  {}  →  {}", file_name(&self.input), file_name(output))
            }
            FileOutcome::Failed(e) => write!(f, "✖︎  {}: {:#}", file_name(&self.input), e),
        }
    }
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn converted_count(&self) -> usize {
        self.files
            .iter()
            .filter(|file| matches!(file.outcome, FileOutcome::Converted { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.files.len() - self.converted_count()
    }
}

/// Export files directly inside `folder`, sorted by name. Symlinks to files
/// count as files. Entries that cannot be read are logged and skipped.
pub fn discover_mt_exports(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries =
        fs::read_dir(folder).with_context(|| format!("cannot list {}", folder.display()))?;
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry in {}: {}", folder.display(), e);
                continue;
            }
        };
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let path = entry.path();
        if is_mt_export_name(name) && path.is_file() {
            files.push(path);
        } else {
            debug!("skipping {}", name);
        }
    }
    files.sort();
    Ok(files)
}

/// Reads one raw export, appends the quaternion columns and writes
/// `<stem>_quat.csv` next to it. Returns the output path and row count.
pub fn convert_file(input: &Path) -> Result<(PathBuf, usize)> {
    let table = SensorTable::read_as(input, TableFormat::MtExport)?;
    let columns = table.orientation_columns()?;

    let converted = table.with_computed_columns(QUATERNION_COLUMNS, |row| {
        let q = matrix_to_quaternion(&columns.matrix_from_row(row));
        [q.w, q.i, q.j, q.k]
    });

    let output = quat_output_path(input);
    write_table(&output, &converted)
        .with_context(|| format!("cannot write {}", output.display()))?;
    Ok((output, converted.len()))
}

/// Converts every `?_MT_*.txt` export in `folder`.
///
/// Only a missing folder fails the whole run. A file that cannot be read,
/// converted or written is reported and the remaining files still run.
pub fn convert_folder(folder: &Path) -> Result<BatchReport> {
    if !folder.is_dir() {
        return Err(ConfigError::NotADirectory(folder.to_path_buf()).into());
    }

    let inputs = discover_mt_exports(folder)?;
    info!("found {} MT exports in {}", inputs.len(), folder.display());

    let mut report = BatchReport::default();
    for input in inputs {
        let outcome = match convert_file(&input) {
            Ok((output, rows)) => {
                debug!("{} rows converted", rows);
                FileOutcome::Converted { output, rows }
            }
            Err(e) => FileOutcome::Failed(e),
        };
        let file = FileReport { input, outcome };
        println!("{}", file);
        report.files.push(file);
    }

    if report.failed_count() > 0 {
        warn!(
            "{} of {} files failed to convert",
            report.failed_count(),
            report.files.len()
        );
    } else {
        info!("converted {} files", report.converted_count());
    }
    Ok(report)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        common::test_utils::{mt_export_text, yawing_matrices, MT_EXPORT},
        rotation::quaternion_to_matrix,
    };
    use approx::assert_abs_diff_eq;
    use nalgebra::Quaternion;

    #[test]
    fn converts_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("1_MT_walk.txt");
        fs::write(&input, MT_EXPORT).unwrap();

        let (output, rows) = convert_file(&input).unwrap();
        assert_eq!(output, dir.path().join("1_MT_walk_quat.csv"));
        assert_eq!(rows, 2);

        let table = SensorTable::read(&output).unwrap();
        assert_eq!(table.columns().len(), 14);
        assert_eq!(&table.columns()[10..], QUATERNION_COLUMNS);
        let columns = table.orientation_columns().unwrap();
        assert_eq!(
            table.quaternion(0, &columns),
            Some(Quaternion::new(1.0, 0.0, 0.0, 0.0))
        );
        let half_turn = table.quaternion(1, &columns).unwrap();
        assert_abs_diff_eq!(half_turn.k.abs(), 1.0, epsilon = 1e-12);
        assert_eq!(table.rows()[1][0], 2.0);
    }

    #[test]
    fn stored_quaternions_match_matrices() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("7_MT_yaw.txt");
        let matrices = yawing_matrices(40);
        fs::write(&input, mt_export_text(&matrices)).unwrap();

        let (output, _) = convert_file(&input).unwrap();
        let table = SensorTable::read(&output).unwrap();
        let columns = table.orientation_columns().unwrap();
        for (row, m) in matrices.iter().enumerate() {
            let q = table.quaternion(row, &columns).unwrap();
            assert_abs_diff_eq!(quaternion_to_matrix(&q), *m, epsilon = 1e-8);
        }
    }

    #[test]
    fn isolates_failing_files() {
        let dir = tempfile::tempdir().unwrap();
        let matrices = yawing_matrices(5);
        for name in ["1_MT_a.txt", "2_MT_b.txt", "4_MT_d.txt"] {
            fs::write(dir.path().join(name), mt_export_text(&matrices)).unwrap();
        }
        // header is there but the matrix columns are not
        fs::write(
            dir.path().join("3_MT_c.txt"),
            "//\n//\n//\n//\nPacketCounter\tAcc_X\n1\t0.5\n",
        )
        .unwrap();

        let report = convert_folder(dir.path()).unwrap();
        assert_eq!(report.files.len(), 4);
        assert_eq!(report.converted_count(), 3);
        assert_eq!(report.failed_count(), 1);

        let failed: Vec<_> = report
            .files
            .iter()
            .filter(|file| matches!(file.outcome, FileOutcome::Failed(_)))
            .collect();
        assert_eq!(failed[0].input, dir.path().join("3_MT_c.txt"));

        let lines: Vec<String> = report.files.iter().map(|file| file.to_string()).collect();
        assert_eq!(lines[0], "✔︎  1_MT_a.txt  →  1_MT_a_quat.csv");
        assert!(
            lines[2].starts_with("✖︎  3_MT_c.txt: ") && lines[2].contains("Mat[0][0]"),
            "{}",
            lines[2]
        );
        assert_eq!(lines[3], "✔︎  4_MT_d.txt  →  4_MT_d_quat.csv");

        for name in ["1_MT_a_quat.csv", "2_MT_b_quat.csv", "4_MT_d_quat.csv"] {
            assert!(dir.path().join(name).is_file(), "{} missing", name);
        }
        assert!(!dir.path().join("3_MT_c_quat.csv").exists());
    }

    #[test]
    fn ignores_files_outside_naming_scheme() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1_MT_ok.txt"), MT_EXPORT).unwrap();
        // unreadable as an export, would fail if it were picked up
        for name in ["12_MT_long.txt", "emg_1.txt", "1_MT_ok.csv", "notes.md"] {
            fs::write(dir.path().join(name), "garbage").unwrap();
        }
        fs::create_dir(dir.path().join("5_MT_folder.txt")).unwrap();

        let report = convert_folder(dir.path()).unwrap();
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.failed_count(), 0);

        let mut names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(
            names,
            [
                "12_MT_long.txt",
                "1_MT_ok.csv",
                "1_MT_ok.txt",
                "1_MT_ok_quat.csv",
                "5_MT_folder.txt",
                "emg_1.txt",
                "notes.md",
            ]
        );
        assert_eq!(fs::read_to_string(dir.path().join("emg_1.txt")).unwrap(), "garbage");
    }

    #[test]
    fn missing_folder_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let error = convert_folder(&missing).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<ConfigError>(),
            Some(ConfigError::NotADirectory(_))
        ));

        let file = dir.path().join("1_MT_a.txt");
        fs::write(&file, MT_EXPORT).unwrap();
        assert!(convert_folder(&file).is_err());
    }

    #[test]
    fn discovery_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b_MT_2.txt", "a_MT_1.txt", "c_MT_0.txt"] {
            fs::write(dir.path().join(name), MT_EXPORT).unwrap();
        }
        let files = discover_mt_exports(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|path| file_name(path)).collect();
        assert_eq!(names, ["a_MT_1.txt", "b_MT_2.txt", "c_MT_0.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinked_exports() {
        let dir = tempfile::tempdir().unwrap();
        let recordings = dir.path().join("recordings");
        let target = dir.path().join("walk.txt");
        fs::create_dir(&recordings).unwrap();
        fs::write(&target, MT_EXPORT).unwrap();
        std::os::unix::fs::symlink(&target, recordings.join("1_MT_walk.txt")).unwrap();

        let report = convert_folder(&recordings).unwrap();
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.converted_count(), 1);
        assert!(recordings.join("1_MT_walk_quat.csv").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn vanished_entry_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1_MT_a.txt"), MT_EXPORT).unwrap();
        fs::write(dir.path().join("3_MT_c.txt"), MT_EXPORT).unwrap();
        // link whose target is gone
        std::os::unix::fs::symlink(dir.path().join("gone.txt"), dir.path().join("2_MT_b.txt"))
            .unwrap();

        let report = convert_folder(dir.path()).unwrap();
        assert_eq!(report.files.len(), 2);
        assert_eq!(report.converted_count(), 2);
        assert!(dir.path().join("1_MT_a_quat.csv").is_file());
        assert!(dir.path().join("3_MT_c_quat.csv").is_file());
    }
}

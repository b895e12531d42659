//! Staff workload reports.
//!
//! A report is a CSV spreadsheet with a fixed header row followed by one row
//! per appointment. Files are named by generation time and created with
//! create-new semantics, so two reports never share a file.

use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use csv::Writer;
use tracing::info;

use crate::db::Database;
use crate::error::Result;
use crate::logging::OperationTimer;
use crate::metrics::record_document_generated;
use crate::models::{WorkloadEntry, WorkloadQuery};

/// Header row written at the top of every report
pub const REPORT_HEADER: [&str; 4] = ["Date", "Time", "Patient", "Employee"];

/// File stem for a report generated at `timestamp`
#[must_use]
pub fn report_file_stem(timestamp: DateTime<Local>) -> String {
    format!("workload_report_{}", timestamp.format("%Y-%m-%d_%H-%M-%S-%3f"))
}

fn create_report_file(output_dir: &Path, stem: &str) -> Result<(File, PathBuf)> {
    let mut attempt = 0u32;
    loop {
        let file_name = if attempt == 0 {
            format!("{stem}.csv")
        } else {
            format!("{stem}_{attempt}.csv")
        };
        let path = output_dir.join(file_name);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((file, path)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Write report rows to a new timestamped CSV file in `output_dir`.
///
/// # Returns
///
/// Path of the created file
pub fn write_workload_report(entries: &[WorkloadEntry], output_dir: &Path) -> Result<PathBuf> {
    create_dir_all(output_dir)?;
    let (file, path) = create_report_file(output_dir, &report_file_stem(Local::now()))?;

    let mut writer = Writer::from_writer(BufWriter::new(file));
    writer.write_record(REPORT_HEADER)?;
    for entry in entries {
        writer.write_record([&entry.date, &entry.time, &entry.patient_name, &entry.doctor_name])?;
    }
    writer.flush()?;

    Ok(path)
}

/// Query the appointments for `query` and write them as a workload report
pub fn generate_workload_report(db: &Database, query: &WorkloadQuery, output_dir: &Path) -> Result<PathBuf> {
    let timer = OperationTimer::new("generate_workload_report");

    let entries = db.workload_entries(query)?;
    let path = write_workload_report(&entries, output_dir)?;
    info!(
        rows = entries.len(),
        start_date = query.start_date.as_str(),
        end_date = query.end_date.as_str(),
        employee_id = query.employee_id,
        path = %path.display(),
        "Workload report written"
    );

    record_document_generated("workload_report", timer.finish());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_report_file_stem_embeds_timestamp() {
        let timestamp = Local.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
        assert_eq!(report_file_stem(timestamp), "workload_report_2024-03-01_09-05-07-000");
    }

    #[test]
    fn test_taken_name_gets_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let (_, first) = create_report_file(dir.path(), "workload_report_x").unwrap();
        let (_, second) = create_report_file(dir.path(), "workload_report_x").unwrap();
        assert_eq!(first.file_name().unwrap(), "workload_report_x.csv");
        assert_eq!(second.file_name().unwrap(), "workload_report_x_1.csv");
    }

    #[test]
    fn test_empty_report_has_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_workload_report(&[], dir.path()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, "Date,Time,Patient,Employee\n");
    }
}

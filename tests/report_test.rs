use std::fs;
use std::path::Path;

use medclinic::db::Database;
use medclinic::documents::receipt::receipt_file_name;
use medclinic::documents::{generate_receipt, generate_workload_report, write_workload_report};
use medclinic::models::{WorkloadEntry, WorkloadQuery};
use medclinic::ClinicError;
use tempfile::TempDir;

const RECEIPT_TEMPLATE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/documents/cheque.hbs");

fn seeded_database() -> (TempDir, Database) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db = Database::new(temp_dir.path().join("clinic.db")).expect("Failed to create database");
    db.reset().expect("Failed to seed database");
    (temp_dir, db)
}

fn seeded_range() -> WorkloadQuery {
    WorkloadQuery {
        start_date: "2024-02-28".to_string(),
        end_date: "2024-03-01".to_string(),
        employee_id: None,
    }
}

#[test]
fn test_workload_report_has_header_and_rows() {
    let (dir, db) = seeded_database();
    let out = dir.path().join("reports");

    let path = generate_workload_report(&db, &seeded_range(), &out).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Date,Time,Patient,Employee");
    assert_eq!(lines[1], "2024-02-28,10:00,Ivanov Ivan Ivanovich,Petrova Elena Sergeevna");
    assert_eq!(lines[3], "2024-03-01,09:00,Sidorova Anna Sergeevna,Petrova Elena Sergeevna");
}

#[test]
fn test_successive_reports_never_share_a_file() {
    let (dir, db) = seeded_database();
    let out = dir.path().join("reports");

    let first = generate_workload_report(&db, &seeded_range(), &out).unwrap();
    let second = generate_workload_report(&db, &seeded_range(), &out).unwrap();

    assert_ne!(first, second);
    assert!(first.exists());
    assert!(second.exists());
    assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
}

#[test]
fn test_report_fields_are_csv_quoted() {
    let dir = tempfile::tempdir().unwrap();
    let entries = vec![WorkloadEntry {
        date: "2024-03-02".to_string(),
        time: "13:00".to_string(),
        patient_name: "Doe, Jane".to_string(),
        doctor_name: "House \"Greg\"".to_string(),
    }];

    let path = write_workload_report(&entries, dir.path()).unwrap();
    let content = fs::read_to_string(path).unwrap();
    assert_eq!(
        content,
        "Date,Time,Patient,Employee\n2024-03-02,13:00,\"Doe, Jane\",\"House \"\"Greg\"\"\"\n"
    );
}

#[test]
fn test_receipt_written_with_payment_fields() {
    let (dir, db) = seeded_database();
    let out = dir.path().join("receipts");
    let payment = db.get_payment(3).unwrap().expect("seeded payment");
    let clinic = db.get_clinic_info().unwrap();

    let path = generate_receipt(Path::new(RECEIPT_TEMPLATE), &out, Some(&payment), clinic.as_ref()).unwrap();
    assert_eq!(path.file_name().unwrap().to_str(), Some(receipt_file_name(Some(3)).as_str()));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("Medical Clinic"));
    assert!(content.contains("RECEIPT No. 3"));
    assert!(content.contains("Sidorova Anna Sergeevna (ID 3)"));
    assert!(content.contains("ECG [ECG-001]"));
    assert!(content.contains("2000.00"));
    assert!(content.contains("Smirnova Olga Petrovna"));
}

#[test]
fn test_receipt_without_clinic_info_says_unknown() {
    let (dir, db) = seeded_database();
    let payment = db.get_payment(1).unwrap().expect("seeded payment");

    let path = generate_receipt(Path::new(RECEIPT_TEMPLATE), dir.path(), Some(&payment), None).unwrap();
    let content = fs::read_to_string(path).unwrap();
    assert!(content.starts_with("unknown\nunknown\nPhone: unknown"));
}

#[test]
fn test_regenerated_receipt_overwrites_previous_file() {
    let (dir, db) = seeded_database();
    let out = dir.path().join("receipts");
    let mut payment = db.get_payment(1).unwrap().expect("seeded payment");

    let first = generate_receipt(Path::new(RECEIPT_TEMPLATE), &out, Some(&payment), None).unwrap();
    payment.amount = 1234.5;
    let second = generate_receipt(Path::new(RECEIPT_TEMPLATE), &out, Some(&payment), None).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_dir(&out).unwrap().count(), 1);
    assert!(fs::read_to_string(second).unwrap().contains("1234.50"));
}

#[test]
fn test_missing_template_is_io_error() {
    let (dir, db) = seeded_database();
    let payment = db.get_payment(1).unwrap();
    let missing = dir.path().join("no_such_template.hbs");

    let result = generate_receipt(&missing, dir.path(), payment.as_ref(), None);
    assert!(matches!(result, Err(ClinicError::Io(_))));
}

//! Data models for clinic records
//!
//! Stored records are `Serialize` so templates can render them by field
//! name; the `*Form` structs are `Deserialize` and mirror the HTML forms
//! posted by the add and edit pages. Dates and times stay as text, exactly
//! as they are stored, so that range filters compare them lexicographically.

use serde::{Deserialize, Serialize};

/// A patient record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patient {
    /// Database primary key
    pub id: i64,
    /// Patient's full name
    pub full_name: String,
    /// Birth date, `YYYY-MM-DD`
    pub birth_date: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Insurance policy number
    pub insurance_policy: Option<String>,
}

/// Submitted patient fields for add and edit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientForm {
    /// Patient's full name
    pub full_name: String,
    /// Birth date as entered, normally `YYYY-MM-DD`
    pub birth_date: String,
    /// Contact phone number
    pub phone: String,
    /// Postal address
    pub address: String,
    /// Insurance policy number
    pub insurance_policy: String,
}

/// One appointment as seen from a patient's detail page.
///
/// Every field is optional: a patient without appointments still yields a
/// single visit with all fields empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatientVisit {
    /// Appointment date
    pub date: Option<String>,
    /// Appointment time
    pub time: Option<String>,
    /// Attending doctor's full name
    pub doctor_name: Option<String>,
    /// Complaints recorded at the visit
    pub complaints: Option<String>,
    /// Preliminary diagnosis
    pub preliminary_diagnosis: Option<String>,
}

impl PatientVisit {
    /// True when the row came from the outer join without a matching appointment
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.time.is_none()
            && self.doctor_name.is_none()
            && self.complaints.is_none()
            && self.preliminary_diagnosis.is_none()
    }
}

/// A patient together with their visit history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientWithVisits {
    /// The patient record
    pub patient: Patient,
    /// Visits ordered by date and time
    pub visits: Vec<PatientVisit>,
}

/// An employee record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    /// Database primary key
    pub id: i64,
    /// Employee's full name
    pub full_name: String,
    /// Job position (therapist, nurse, ...)
    pub position: String,
    /// Contact phone number
    pub phone: Option<String>,
    /// Area of specialization
    pub specialization: Option<String>,
}

/// Submitted employee fields for add and edit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeForm {
    /// Employee's full name
    pub full_name: String,
    /// Job position
    pub position: String,
    /// Contact phone number
    pub phone: String,
    /// Area of specialization
    pub specialization: String,
}

/// A billable service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    /// Database primary key
    pub id: i64,
    /// Service name
    pub name: String,
    /// Unique service code
    pub code: Option<String>,
    /// Price of the service
    pub cost: f64,
    /// Short description
    pub description: Option<String>,
    /// Detailed description
    pub detailed_description: Option<String>,
}

/// Submitted service fields for add and edit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceForm {
    /// Service name
    pub name: String,
    /// Service code; must be unique
    pub code: String,
    /// Price of the service
    pub cost: f64,
    /// Short description
    pub description: String,
    /// Detailed description
    pub detailed_description: String,
}

/// An appointment joined with the doctor's and patient's names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Appointment {
    /// Database primary key
    pub id: i64,
    /// Foreign key to the attending employee
    pub doctor_id: i64,
    /// Foreign key to the patient
    pub patient_id: i64,
    /// Appointment date, `YYYY-MM-DD`
    pub date: String,
    /// Appointment time, `HH:MM`
    pub time: String,
    /// Patient complaints
    pub complaints: Option<String>,
    /// Preliminary diagnosis
    pub preliminary_diagnosis: Option<String>,
    /// Doctor's full name
    pub doctor_name: String,
    /// Patient's full name
    pub patient_name: String,
}

/// Submitted appointment fields for add and edit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentForm {
    /// Attending employee
    pub doctor_id: i64,
    /// Patient seen
    pub patient_id: i64,
    /// Appointment date, `YYYY-MM-DD`
    pub date: String,
    /// Appointment time, `HH:MM`
    pub time: String,
    /// Patient complaints
    #[serde(default)]
    pub complaints: String,
    /// Preliminary diagnosis
    #[serde(default)]
    pub preliminary_diagnosis: String,
}

/// A payment joined with patient, service and employee details.
///
/// This is the record a receipt is generated from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payment {
    /// Database primary key, doubles as the receipt number
    pub id: i64,
    /// Foreign key to the paying patient
    pub patient_id: i64,
    /// Foreign key to the service paid for
    pub service_id: i64,
    /// Foreign key to the cashier
    pub employee_id: Option<i64>,
    /// Payment date, `YYYY-MM-DD`
    pub date: String,
    /// Payment time, `HH:MM`
    pub time: Option<String>,
    /// Amount paid
    pub amount: f64,
    /// Patient's full name
    pub patient_name: String,
    /// Service name
    pub service_name: String,
    /// Service code
    pub service_code: Option<String>,
    /// Cashier's name; absent when the payment has no employee
    pub employee_name: Option<String>,
}

/// Submitted payment fields for add and edit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentForm {
    /// Paying patient
    pub patient_id: i64,
    /// Service paid for
    pub service_id: i64,
    /// Cashier
    pub employee_id: i64,
    /// Payment date, `YYYY-MM-DD`
    pub date: String,
    /// Payment time, `HH:MM`
    pub time: String,
    /// Amount paid
    pub amount: f64,
}

/// The clinic's own administrative record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClinicInfo {
    /// Database primary key
    pub id: i64,
    /// Clinic name printed on receipts
    pub name: String,
    /// Clinic address
    pub address: String,
    /// Clinic phone number
    pub phone: String,
}

/// Parameters of a workload report.
///
/// Dates are compared as text, so both bounds must use the same fixed-width
/// format as the stored appointment dates (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadQuery {
    /// First day included in the report
    pub start_date: String,
    /// Last day included in the report
    pub end_date: String,
    /// Restrict the report to one doctor
    pub employee_id: Option<i64>,
}

/// One row of a workload report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkloadEntry {
    /// Appointment date
    pub date: String,
    /// Appointment time
    pub time: String,
    /// Patient's full name
    pub patient_name: String,
    /// Doctor's full name
    pub doctor_name: String,
}

/// Raw workload report form; every field may be missing or blank
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkloadForm {
    /// First day of the range
    pub start_date: Option<String>,
    /// Last day of the range
    pub end_date: Option<String>,
    /// Employee id, blank for all employees
    pub employee_id: Option<String>,
}

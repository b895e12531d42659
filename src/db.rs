use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Params, Row};
use tracing::{debug, info};

use crate::error::Result;
use crate::metrics::record_db_operation;
use crate::models::{
    Appointment, AppointmentForm, ClinicInfo, Employee, EmployeeForm, Patient, PatientForm, PatientVisit,
    PatientWithVisits, Payment, PaymentForm, Service, ServiceForm, WorkloadEntry, WorkloadQuery,
};
use crate::query::{FilterValue, Operator, QueryBuilder};
use crate::schema::{appointments, clinic_info, employees, patients, payments, services};

const CREATE_TABLES: &str = include_str!("../migrations/0001_create_tables/up.sql");
const DROP_TABLES: &str = include_str!("../migrations/0001_create_tables/down.sql");
const SEED_DATA: &str = include_str!("../migrations/0002_seed_data/up.sql");

const PATIENT_VISITS_SELECT: &str = "
    SELECT p.id AS id, p.full_name AS full_name, p.birth_date AS birth_date, p.phone AS phone,
           p.address AS address, p.insurance_policy AS insurance_policy,
           a.date AS visit_date, a.time AS visit_time, e.full_name AS doctor_name,
           a.complaints AS complaints, a.preliminary_diagnosis AS preliminary_diagnosis
    FROM patients p
    LEFT JOIN appointments a ON p.id = a.patient_id
    LEFT JOIN employees e ON a.doctor_id = e.id
    WHERE p.id = ?1
    ORDER BY a.date, a.time";

const APPOINTMENT_SELECT: &str = "
    SELECT a.id AS id, a.doctor_id AS doctor_id, a.patient_id AS patient_id, a.date AS date,
           a.time AS time, a.complaints AS complaints, a.preliminary_diagnosis AS preliminary_diagnosis,
           e.full_name AS doctor_name, p.full_name AS patient_name
    FROM appointments a
    JOIN employees e ON a.doctor_id = e.id
    JOIN patients p ON a.patient_id = p.id";

const PAYMENT_SELECT: &str = "
    SELECT pay.id AS id, pay.patient_id AS patient_id, pay.service_id AS service_id,
           pay.employee_id AS employee_id, pay.date AS date, pay.time AS time, pay.amount AS amount,
           p.full_name AS patient_name, s.name AS service_name, s.code AS service_code,
           e.full_name AS employee_name
    FROM payments pay
    JOIN patients p ON pay.patient_id = p.id
    JOIN services s ON pay.service_id = s.id
    LEFT JOIN employees e ON pay.employee_id = e.id";

const WORKLOAD_SELECT: &str = "
    SELECT a.date AS date, a.time AS time, p.full_name AS patient_name, e.full_name AS doctor_name
    FROM appointments a
    JOIN patients p ON a.patient_id = p.id
    JOIN employees e ON a.doctor_id = e.id";

/// Handle to the clinic's SQLite database.
///
/// Holds only the file path: every operation opens its own connection and
/// closes it before returning, and each write is a single autocommitted
/// statement.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Open (creating if needed) the database file and ensure the schema exists
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let database = Self { path };
        let conn = database.connect()?;
        Self::run_migrations(&conn)?;

        Ok(database)
    }

    fn run_migrations(conn: &Connection) -> Result<()> {
        conn.execute_batch(CREATE_TABLES)?;
        Ok(())
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection with foreign key enforcement enabled
    pub fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Drop every table, recreate the schema and load the seed data
    pub fn reset(&self) -> Result<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute_batch(DROP_TABLES)?;
        tx.execute_batch(CREATE_TABLES)?;
        tx.execute_batch(SEED_DATA)?;
        tx.commit()?;

        info!(path = %self.path.display(), "Database reset with seed data");
        Ok(())
    }

    fn fetch_all<T, P, F>(&self, operation: &'static str, sql: &str, params: P, map: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.connect()?;
        let result = collect_rows(&conn, sql, params, map);
        record_db_operation(operation, result.is_ok());
        Ok(result?)
    }

    fn fetch_optional<T, P, F>(&self, operation: &'static str, sql: &str, params: P, map: F) -> Result<Option<T>>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.connect()?;
        let result = conn.query_row(sql, params, map).optional();
        record_db_operation(operation, result.is_ok());
        Ok(result?)
    }

    fn execute<P: Params>(&self, operation: &'static str, sql: &str, params: P) -> Result<usize> {
        let conn = self.connect()?;
        let result = conn.execute(sql, params);
        record_db_operation(operation, result.is_ok());
        let changed = result?;
        debug!(operation, changed, "Statement executed");
        Ok(changed)
    }

    fn insert<P: Params>(&self, operation: &'static str, sql: &str, params: P) -> Result<i64> {
        let conn = self.connect()?;
        let result = conn.execute(sql, params);
        record_db_operation(operation, result.is_ok());
        result?;

        let id = conn.last_insert_rowid();
        debug!(operation, id, "Row inserted");
        Ok(id)
    }

    // ---- patients ----

    /// Get all patients
    pub fn list_patients(&self) -> Result<Vec<Patient>> {
        self.fetch_all(
            "list_patients",
            &format!("SELECT * FROM {} ORDER BY {}", patients::TABLE, patients::ID),
            [],
            map_patient,
        )
    }

    /// Get a patient by ID
    pub fn get_patient(&self, patient_id: i64) -> Result<Option<Patient>> {
        self.fetch_optional(
            "get_patient",
            &format!("SELECT * FROM {} WHERE {} = ?1", patients::TABLE, patients::ID),
            params![patient_id],
            map_patient,
        )
    }

    /// Get a patient with every appointment they attended.
    ///
    /// A patient without appointments comes back with exactly one visit whose
    /// fields are all empty; an unknown patient yields `None`.
    pub fn get_patient_with_visits(&self, patient_id: i64) -> Result<Option<PatientWithVisits>> {
        let rows = self.fetch_all("get_patient_with_visits", PATIENT_VISITS_SELECT, params![patient_id], |row| {
            Ok((map_patient(row)?, map_patient_visit(row)?))
        })?;

        let Some((patient, _)) = rows.first().cloned() else {
            return Ok(None);
        };
        let visits = rows.into_iter().map(|(_, visit)| visit).collect();

        Ok(Some(PatientWithVisits { patient, visits }))
    }

    /// Insert a patient and return its new ID
    pub fn add_patient(&self, form: &PatientForm) -> Result<i64> {
        self.insert(
            "add_patient",
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}, {}) VALUES (?1, ?2, ?3, ?4, ?5)",
                patients::TABLE,
                patients::FULL_NAME,
                patients::BIRTH_DATE,
                patients::PHONE,
                patients::ADDRESS,
                patients::INSURANCE_POLICY
            ),
            params![form.full_name, form.birth_date, form.phone, form.address, form.insurance_policy],
        )
    }

    /// Overwrite every editable column of a patient
    pub fn update_patient(&self, patient_id: i64, form: &PatientForm) -> Result<usize> {
        self.execute(
            "update_patient",
            &format!(
                "UPDATE {} SET {} = ?1, {} = ?2, {} = ?3, {} = ?4, {} = ?5 WHERE {} = ?6",
                patients::TABLE,
                patients::FULL_NAME,
                patients::BIRTH_DATE,
                patients::PHONE,
                patients::ADDRESS,
                patients::INSURANCE_POLICY,
                patients::ID
            ),
            params![form.full_name, form.birth_date, form.phone, form.address, form.insurance_policy, patient_id],
        )
    }

    // ---- employees ----

    /// Get all employees
    pub fn list_employees(&self) -> Result<Vec<Employee>> {
        self.fetch_all(
            "list_employees",
            &format!("SELECT * FROM {} ORDER BY {}", employees::TABLE, employees::ID),
            [],
            map_employee,
        )
    }

    /// Get an employee by ID
    pub fn get_employee(&self, employee_id: i64) -> Result<Option<Employee>> {
        self.fetch_optional(
            "get_employee",
            &format!("SELECT * FROM {} WHERE {} = ?1", employees::TABLE, employees::ID),
            params![employee_id],
            map_employee,
        )
    }

    /// Insert an employee and return its new ID
    pub fn add_employee(&self, form: &EmployeeForm) -> Result<i64> {
        self.insert(
            "add_employee",
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}) VALUES (?1, ?2, ?3, ?4)",
                employees::TABLE,
                employees::FULL_NAME,
                employees::POSITION,
                employees::PHONE,
                employees::SPECIALIZATION
            ),
            params![form.full_name, form.position, form.phone, form.specialization],
        )
    }

    /// Overwrite every editable column of an employee
    pub fn update_employee(&self, employee_id: i64, form: &EmployeeForm) -> Result<usize> {
        self.execute(
            "update_employee",
            &format!(
                "UPDATE {} SET {} = ?1, {} = ?2, {} = ?3, {} = ?4 WHERE {} = ?5",
                employees::TABLE,
                employees::FULL_NAME,
                employees::POSITION,
                employees::PHONE,
                employees::SPECIALIZATION,
                employees::ID
            ),
            params![form.full_name, form.position, form.phone, form.specialization, employee_id],
        )
    }

    // ---- services ----

    /// Get all services
    pub fn list_services(&self) -> Result<Vec<Service>> {
        self.fetch_all(
            "list_services",
            &format!("SELECT * FROM {} ORDER BY {}", services::TABLE, services::ID),
            [],
            map_service,
        )
    }

    /// Get a service by ID
    pub fn get_service(&self, service_id: i64) -> Result<Option<Service>> {
        self.fetch_optional(
            "get_service",
            &format!("SELECT * FROM {} WHERE {} = ?1", services::TABLE, services::ID),
            params![service_id],
            map_service,
        )
    }

    /// Insert a service and return its new ID. Fails on a duplicate code.
    pub fn add_service(&self, form: &ServiceForm) -> Result<i64> {
        self.insert(
            "add_service",
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}, {}) VALUES (?1, ?2, ?3, ?4, ?5)",
                services::TABLE,
                services::NAME,
                services::CODE,
                services::COST,
                services::DESCRIPTION,
                services::DETAILED_DESCRIPTION
            ),
            params![form.name, form.code, form.cost, form.description, form.detailed_description],
        )
    }

    /// Overwrite every editable column of a service
    pub fn update_service(&self, service_id: i64, form: &ServiceForm) -> Result<usize> {
        self.execute(
            "update_service",
            &format!(
                "UPDATE {} SET {} = ?1, {} = ?2, {} = ?3, {} = ?4, {} = ?5 WHERE {} = ?6",
                services::TABLE,
                services::NAME,
                services::CODE,
                services::COST,
                services::DESCRIPTION,
                services::DETAILED_DESCRIPTION,
                services::ID
            ),
            params![form.name, form.code, form.cost, form.description, form.detailed_description, service_id],
        )
    }

    // ---- appointments ----

    /// Get all appointments with doctor and patient names
    pub fn list_appointments(&self) -> Result<Vec<Appointment>> {
        let mut query = QueryBuilder::new(APPOINTMENT_SELECT);
        query.order_by("a.date").order_by("a.time");
        let (sql, params) = query.build();
        self.fetch_all("list_appointments", &sql, params_from_iter(params), map_appointment)
    }

    /// Get an appointment by ID
    pub fn get_appointment(&self, appointment_id: i64) -> Result<Option<Appointment>> {
        let mut query = QueryBuilder::new(APPOINTMENT_SELECT);
        query.add_filter("a.id", Operator::Equal, FilterValue::Integer(appointment_id));
        let (sql, params) = query.build();
        self.fetch_optional("get_appointment", &sql, params_from_iter(params), map_appointment)
    }

    /// Insert an appointment and return its new ID
    pub fn add_appointment(&self, form: &AppointmentForm) -> Result<i64> {
        self.insert(
            "add_appointment",
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}, {}, {}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                appointments::TABLE,
                appointments::DOCTOR_ID,
                appointments::PATIENT_ID,
                appointments::DATE,
                appointments::TIME,
                appointments::COMPLAINTS,
                appointments::PRELIMINARY_DIAGNOSIS
            ),
            params![
                form.doctor_id,
                form.patient_id,
                form.date,
                form.time,
                form.complaints,
                form.preliminary_diagnosis
            ],
        )
    }

    /// Overwrite every editable column of an appointment
    pub fn update_appointment(&self, appointment_id: i64, form: &AppointmentForm) -> Result<usize> {
        self.execute(
            "update_appointment",
            &format!(
                "UPDATE {} SET {} = ?1, {} = ?2, {} = ?3, {} = ?4, {} = ?5, {} = ?6 WHERE {} = ?7",
                appointments::TABLE,
                appointments::DOCTOR_ID,
                appointments::PATIENT_ID,
                appointments::DATE,
                appointments::TIME,
                appointments::COMPLAINTS,
                appointments::PRELIMINARY_DIAGNOSIS,
                appointments::ID
            ),
            params![
                form.doctor_id,
                form.patient_id,
                form.date,
                form.time,
                form.complaints,
                form.preliminary_diagnosis,
                appointment_id
            ],
        )
    }

    // ---- payments ----

    /// Get all payments with patient, service and employee details
    pub fn list_payments(&self) -> Result<Vec<Payment>> {
        let mut query = QueryBuilder::new(PAYMENT_SELECT);
        query.order_by("pay.id");
        let (sql, params) = query.build();
        self.fetch_all("list_payments", &sql, params_from_iter(params), map_payment)
    }

    /// Get a payment by ID
    pub fn get_payment(&self, payment_id: i64) -> Result<Option<Payment>> {
        let mut query = QueryBuilder::new(PAYMENT_SELECT);
        query.add_filter("pay.id", Operator::Equal, FilterValue::Integer(payment_id));
        let (sql, params) = query.build();
        self.fetch_optional("get_payment", &sql, params_from_iter(params), map_payment)
    }

    /// Insert a payment and return its new ID
    pub fn add_payment(&self, form: &PaymentForm) -> Result<i64> {
        self.insert(
            "add_payment",
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}, {}, {}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                payments::TABLE,
                payments::PATIENT_ID,
                payments::SERVICE_ID,
                payments::DATE,
                payments::AMOUNT,
                payments::TIME,
                payments::EMPLOYEE_ID
            ),
            params![form.patient_id, form.service_id, form.date, form.amount, form.time, form.employee_id],
        )
    }

    /// Overwrite every editable column of a payment
    pub fn update_payment(&self, payment_id: i64, form: &PaymentForm) -> Result<usize> {
        self.execute(
            "update_payment",
            &format!(
                "UPDATE {} SET {} = ?1, {} = ?2, {} = ?3, {} = ?4, {} = ?5, {} = ?6 WHERE {} = ?7",
                payments::TABLE,
                payments::PATIENT_ID,
                payments::SERVICE_ID,
                payments::DATE,
                payments::AMOUNT,
                payments::TIME,
                payments::EMPLOYEE_ID,
                payments::ID
            ),
            params![
                form.patient_id,
                form.service_id,
                form.date,
                form.amount,
                form.time,
                form.employee_id,
                payment_id
            ],
        )
    }

    // ---- clinic info & reports ----

    /// Get the clinic's administrative record, if one exists
    pub fn get_clinic_info(&self) -> Result<Option<ClinicInfo>> {
        self.fetch_optional(
            "get_clinic_info",
            &format!("SELECT * FROM {} ORDER BY {} LIMIT 1", clinic_info::TABLE, clinic_info::ID),
            [],
            |row| {
                Ok(ClinicInfo {
                    id: row.get(clinic_info::ID)?,
                    name: row.get(clinic_info::NAME)?,
                    address: row.get(clinic_info::ADDRESS)?,
                    phone: row.get(clinic_info::PHONE)?,
                })
            },
        )
    }

    /// Appointments inside the inclusive date range, optionally for one doctor.
    ///
    /// The range is compared as text; stored dates must be `YYYY-MM-DD` for
    /// the result to match chronological order.
    pub fn workload_entries(&self, workload: &WorkloadQuery) -> Result<Vec<WorkloadEntry>> {
        let mut query = QueryBuilder::new(WORKLOAD_SELECT);
        query
            .add_filter("a.date", Operator::GreaterThanOrEqual, FilterValue::Text(workload.start_date.clone()))
            .add_filter("a.date", Operator::LessThanOrEqual, FilterValue::Text(workload.end_date.clone()));
        if let Some(employee_id) = workload.employee_id {
            query.add_filter("a.doctor_id", Operator::Equal, FilterValue::Integer(employee_id));
        }
        query.order_by("a.date").order_by("a.time");

        let (sql, params) = query.build();
        self.fetch_all("workload_entries", &sql, params_from_iter(params), |row| {
            Ok(WorkloadEntry {
                date: row.get("date")?,
                time: row.get("time")?,
                patient_name: row.get("patient_name")?,
                doctor_name: row.get("doctor_name")?,
            })
        })
    }
}

fn collect_rows<T, P, F>(conn: &Connection, sql: &str, params: P, map: F) -> rusqlite::Result<Vec<T>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, map)?;
    let items = rows.collect::<rusqlite::Result<Vec<T>>>()?;
    Ok(items)
}

/// Map a database row to a Patient
fn map_patient(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(patients::ID)?,
        full_name: row.get(patients::FULL_NAME)?,
        birth_date: row.get(patients::BIRTH_DATE)?,
        phone: row.get(patients::PHONE)?,
        address: row.get(patients::ADDRESS)?,
        insurance_policy: row.get(patients::INSURANCE_POLICY)?,
    })
}

fn map_patient_visit(row: &Row<'_>) -> rusqlite::Result<PatientVisit> {
    Ok(PatientVisit {
        date: row.get("visit_date")?,
        time: row.get("visit_time")?,
        doctor_name: row.get("doctor_name")?,
        complaints: row.get(appointments::COMPLAINTS)?,
        preliminary_diagnosis: row.get(appointments::PRELIMINARY_DIAGNOSIS)?,
    })
}

/// Map a database row to an Employee
fn map_employee(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(employees::ID)?,
        full_name: row.get(employees::FULL_NAME)?,
        position: row.get(employees::POSITION)?,
        phone: row.get(employees::PHONE)?,
        specialization: row.get(employees::SPECIALIZATION)?,
    })
}

/// Map a database row to a Service
fn map_service(row: &Row<'_>) -> rusqlite::Result<Service> {
    Ok(Service {
        id: row.get(services::ID)?,
        name: row.get(services::NAME)?,
        code: row.get(services::CODE)?,
        cost: row.get(services::COST)?,
        description: row.get(services::DESCRIPTION)?,
        detailed_description: row.get(services::DETAILED_DESCRIPTION)?,
    })
}

fn map_appointment(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(appointments::ID)?,
        doctor_id: row.get(appointments::DOCTOR_ID)?,
        patient_id: row.get(appointments::PATIENT_ID)?,
        date: row.get(appointments::DATE)?,
        time: row.get(appointments::TIME)?,
        complaints: row.get(appointments::COMPLAINTS)?,
        preliminary_diagnosis: row.get(appointments::PRELIMINARY_DIAGNOSIS)?,
        doctor_name: row.get("doctor_name")?,
        patient_name: row.get("patient_name")?,
    })
}

fn map_payment(row: &Row<'_>) -> rusqlite::Result<Payment> {
    Ok(Payment {
        id: row.get(payments::ID)?,
        patient_id: row.get(payments::PATIENT_ID)?,
        service_id: row.get(payments::SERVICE_ID)?,
        employee_id: row.get(payments::EMPLOYEE_ID)?,
        date: row.get(payments::DATE)?,
        time: row.get(payments::TIME)?,
        amount: row.get(payments::AMOUNT)?,
        patient_name: row.get("patient_name")?,
        service_name: row.get("service_name")?,
        service_code: row.get("service_code")?,
        employee_name: row.get("employee_name")?,
    })
}

//! Database schema definitions
//!
//! This module provides constants for table and column names used with rusqlite.
//! The DDL itself lives in `migrations/`.

/// Patients table schema
pub mod patients {
    /// Table name
    pub const TABLE: &str = "patients";
    /// Primary key column
    pub const ID: &str = "id";
    /// Full name column
    pub const FULL_NAME: &str = "full_name";
    /// Birth date column (ISO 8601 text)
    pub const BIRTH_DATE: &str = "birth_date";
    /// Phone number column
    pub const PHONE: &str = "phone";
    /// Postal address column
    pub const ADDRESS: &str = "address";
    /// Insurance policy number column
    pub const INSURANCE_POLICY: &str = "insurance_policy";
}

/// Employees table schema
pub mod employees {
    /// Table name
    pub const TABLE: &str = "employees";
    /// Primary key column
    pub const ID: &str = "id";
    /// Full name column
    pub const FULL_NAME: &str = "full_name";
    /// Job position column
    pub const POSITION: &str = "position";
    /// Phone number column
    pub const PHONE: &str = "phone";
    /// Specialization column
    pub const SPECIALIZATION: &str = "specialization";
}

/// Services table schema
pub mod services {
    /// Table name
    pub const TABLE: &str = "services";
    /// Primary key column
    pub const ID: &str = "id";
    /// Service name column
    pub const NAME: &str = "name";
    /// Unique service code column
    pub const CODE: &str = "code";
    /// Cost column
    pub const COST: &str = "cost";
    /// Short description column
    pub const DESCRIPTION: &str = "description";
    /// Detailed description column
    pub const DETAILED_DESCRIPTION: &str = "detailed_description";
}

/// Appointments table schema
pub mod appointments {
    /// Table name
    pub const TABLE: &str = "appointments";
    /// Primary key column
    pub const ID: &str = "id";
    /// Foreign key to employees
    pub const DOCTOR_ID: &str = "doctor_id";
    /// Foreign key to patients
    pub const PATIENT_ID: &str = "patient_id";
    /// Appointment date column (ISO 8601 text)
    pub const DATE: &str = "date";
    /// Appointment time column
    pub const TIME: &str = "time";
    /// Patient complaints column
    pub const COMPLAINTS: &str = "complaints";
    /// Preliminary diagnosis column
    pub const PRELIMINARY_DIAGNOSIS: &str = "preliminary_diagnosis";
}

/// Payments table schema
pub mod payments {
    /// Table name
    pub const TABLE: &str = "payments";
    /// Primary key column
    pub const ID: &str = "id";
    /// Foreign key to patients
    pub const PATIENT_ID: &str = "patient_id";
    /// Foreign key to services
    pub const SERVICE_ID: &str = "service_id";
    /// Foreign key to employees
    pub const EMPLOYEE_ID: &str = "employee_id";
    /// Payment date column
    pub const DATE: &str = "date";
    /// Payment time column
    pub const TIME: &str = "time";
    /// Amount paid column
    pub const AMOUNT: &str = "amount";
}

/// Clinic information table schema (single row)
pub mod clinic_info {
    /// Table name
    pub const TABLE: &str = "clinic_info";
    /// Primary key column
    pub const ID: &str = "id";
    /// Clinic name column
    pub const NAME: &str = "name";
    /// Clinic address column
    pub const ADDRESS: &str = "address";
    /// Clinic phone column
    pub const PHONE: &str = "phone";
}

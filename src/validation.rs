use crate::error::{ClinicError, Result};

/// Checks on the workload report form.
///
/// Beyond these, field values are passed to the database as submitted and
/// only the column constraints apply.
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Require both report dates to be present and non-blank
    pub fn validate_report_dates(start: Option<&str>, end: Option<&str>) -> Result<(String, String)> {
        let start = start.map(str::trim).filter(|s| !s.is_empty());
        let end = end.map(str::trim).filter(|s| !s.is_empty());

        match (start, end) {
            (Some(start), Some(end)) => Ok((start.to_string(), end.to_string())),
            _ => Err(ClinicError::InvalidInput("Start and end dates are required".to_string())),
        }
    }

    /// Interpret the optional `employee_id` field; blank means "all employees"
    pub fn parse_employee_filter(value: Option<&str>) -> Result<Option<i64>> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .map(Some)
                .map_err(|_| ClinicError::InvalidInput(format!("Invalid employee id: {raw}"))),
        }
    }
}

//! Payment receipts.
//!
//! A receipt is a Handlebars text template with a fixed set of upper-case
//! placeholders (`{{CLINIC_NAME}}`, `{{CHECK_NUMBER}}`, ...). The rendered
//! file is named after the payment, so regenerating a receipt overwrites
//! the previous one.

use std::fs;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Result;
use crate::logging::OperationTimer;
use crate::metrics::record_document_generated;
use crate::models::{ClinicInfo, Payment};

/// Placeholder for a field whose source value is missing
pub const UNKNOWN: &str = "unknown";

/// Values substituted into the receipt template.
///
/// All fields are `None` when there is no payment at all, which renders
/// every placeholder empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ReceiptContext {
    /// `{{CLINIC_NAME}}`
    pub clinic_name: Option<String>,
    /// `{{CLINIC_ADDRESS}}`
    pub clinic_address: Option<String>,
    /// `{{CLINIC_PHONE}}`
    pub clinic_phone: Option<String>,
    /// `{{CHECK_NUMBER}}`, the payment id
    pub check_number: Option<String>,
    /// `{{PAYMENT_DATE}}`
    pub payment_date: Option<String>,
    /// `{{PAYMENT_TIME}}`
    pub payment_time: Option<String>,
    /// `{{PATIENT_FULLNAME}}`
    pub patient_fullname: Option<String>,
    /// `{{PATIENT_ID}}`
    pub patient_id: Option<String>,
    /// `{{SERVICE_NAME}}`
    pub service_name: Option<String>,
    /// `{{SERVICE_CODE}}`
    pub service_code: Option<String>,
    /// `{{SERVICE_COST}}`, two decimals
    pub service_cost: Option<String>,
    /// `{{EMPLOYEE_NAME}}`
    pub employee_name: Option<String>,
}

fn known(value: Option<String>) -> Option<String> {
    Some(value.unwrap_or_else(|| UNKNOWN.to_string()))
}

impl ReceiptContext {
    /// Build the template context from a payment and the clinic record
    #[must_use]
    pub fn build(payment: Option<&Payment>, clinic: Option<&ClinicInfo>) -> Self {
        let Some(payment) = payment else {
            return Self::default();
        };

        Self {
            clinic_name: known(clinic.map(|c| c.name.clone())),
            clinic_address: known(clinic.map(|c| c.address.clone())),
            clinic_phone: known(clinic.map(|c| c.phone.clone())),
            check_number: Some(payment.id.to_string()),
            payment_date: Some(payment.date.clone()),
            payment_time: known(payment.time.clone()),
            patient_fullname: Some(payment.patient_name.clone()),
            patient_id: Some(payment.patient_id.to_string()),
            service_name: Some(payment.service_name.clone()),
            service_code: known(payment.service_code.clone()),
            service_cost: Some(format!("{:.2}", payment.amount)),
            employee_name: known(payment.employee_name.clone()),
        }
    }
}

/// File name of the receipt for a payment
#[must_use]
pub fn receipt_file_name(payment_id: Option<i64>) -> String {
    match payment_id {
        Some(id) => format!("payment_{id}_cheque.txt"),
        None => format!("payment_{UNKNOWN}_cheque.txt"),
    }
}

/// Render the receipt template with the given context
pub fn render_receipt(template: &str, context: &ReceiptContext) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    Ok(handlebars.render_template(template, context)?)
}

/// Render a receipt from the template file and write it to `output_dir`.
///
/// Returns the path of the written file.
pub fn generate_receipt(
    template_path: &Path,
    output_dir: &Path,
    payment: Option<&Payment>,
    clinic: Option<&ClinicInfo>,
) -> Result<PathBuf> {
    let timer = OperationTimer::new("generate_receipt");

    let template = fs::read_to_string(template_path)?;
    let context = ReceiptContext::build(payment, clinic);
    let rendered = render_receipt(&template, &context)?;

    fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join(receipt_file_name(payment.map(|p| p.id)));
    fs::write(&output_path, rendered)?;

    record_document_generated("receipt", timer.finish());
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment() -> Payment {
        Payment {
            id: 7,
            patient_id: 2,
            service_id: 1,
            employee_id: Some(3),
            date: "2024-02-28".to_string(),
            time: Some("10:00".to_string()),
            amount: 1500.0,
            patient_name: "Ivanov Ivan Ivanovich".to_string(),
            service_name: "Therapist consultation".to_string(),
            service_code: Some("CONS".to_string()),
            employee_name: Some("Smirnova Olga Petrovna".to_string()),
        }
    }

    fn clinic() -> ClinicInfo {
        ClinicInfo {
            id: 1,
            name: "Medical Clinic".to_string(),
            address: "1 Example St".to_string(),
            phone: "+74951234567".to_string(),
        }
    }

    #[test]
    fn test_context_from_full_rows() {
        let context = ReceiptContext::build(Some(&payment()), Some(&clinic()));
        assert_eq!(context.clinic_name.as_deref(), Some("Medical Clinic"));
        assert_eq!(context.check_number.as_deref(), Some("7"));
        assert_eq!(context.patient_id.as_deref(), Some("2"));
        assert_eq!(context.service_cost.as_deref(), Some("1500.00"));
        assert_eq!(context.employee_name.as_deref(), Some("Smirnova Olga Petrovna"));
    }

    #[test]
    fn test_missing_clinic_renders_unknown() {
        let context = ReceiptContext::build(Some(&payment()), None);
        assert_eq!(context.clinic_name.as_deref(), Some(UNKNOWN));
        assert_eq!(context.clinic_address.as_deref(), Some(UNKNOWN));
        assert_eq!(context.clinic_phone.as_deref(), Some(UNKNOWN));
        assert_eq!(context.payment_date.as_deref(), Some("2024-02-28"));
    }

    #[test]
    fn test_missing_payment_fields_render_unknown() {
        let mut payment = payment();
        payment.employee_name = None;
        payment.service_code = None;
        payment.time = None;
        let context = ReceiptContext::build(Some(&payment), Some(&clinic()));
        assert_eq!(context.employee_name.as_deref(), Some(UNKNOWN));
        assert_eq!(context.service_code.as_deref(), Some(UNKNOWN));
        assert_eq!(context.payment_time.as_deref(), Some(UNKNOWN));
    }

    #[test]
    fn test_absent_payment_leaves_every_field_empty() {
        let context = ReceiptContext::build(None, Some(&clinic()));
        assert_eq!(context, ReceiptContext::default());

        let rendered = render_receipt("[{{CLINIC_NAME}}|{{CHECK_NUMBER}}|{{SERVICE_COST}}]", &context).unwrap();
        assert_eq!(rendered, "[||]");
    }

    #[test]
    fn test_render_uses_fixed_field_names_without_escaping() {
        let mut clinic = clinic();
        clinic.name = "Smith & Sons <Clinic>".to_string();
        let context = ReceiptContext::build(Some(&payment()), Some(&clinic));
        let rendered = render_receipt("{{CLINIC_NAME}} #{{CHECK_NUMBER}} {{PATIENT_FULLNAME}}", &context).unwrap();
        assert_eq!(rendered, "Smith & Sons <Clinic> #7 Ivanov Ivan Ivanovich");
    }

    #[test]
    fn test_receipt_file_name() {
        assert_eq!(receipt_file_name(Some(3)), "payment_3_cheque.txt");
        assert_eq!(receipt_file_name(None), "payment_unknown_cheque.txt");
    }
}

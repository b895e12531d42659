//! Metrics collection
//!
//! Thin wrappers over the `metrics` facade. Nothing is exported unless the
//! embedding process installs a recorder; without one every call is a no-op.

use metrics::{counter, histogram};
use std::time::Duration;

/// Database statements by operation and status
pub const DB_OPERATIONS_TOTAL: &str = "medclinic_db_operations_total";
/// Generated documents by kind
pub const DOCUMENTS_GENERATED_TOTAL: &str = "medclinic_documents_generated_total";
/// Document generation time in seconds
pub const DOCUMENT_GENERATION_DURATION: &str = "medclinic_document_generation_duration_seconds";
/// Workload reports that failed
pub const REPORT_FAILURES_TOTAL: &str = "medclinic_report_failures_total";

/// Record a database operation
pub fn record_db_operation(operation: &'static str, success: bool) {
    counter!(
        DB_OPERATIONS_TOTAL,
        "operation" => operation,
        "status" => if success { "success" } else { "error" }
    )
    .increment(1);
}

/// Record a generated receipt or report
pub fn record_document_generated(kind: &'static str, duration: Duration) {
    counter!(DOCUMENTS_GENERATED_TOTAL, "kind" => kind).increment(1);
    histogram!(DOCUMENT_GENERATION_DURATION, "kind" => kind).record(duration.as_secs_f64());
}

/// Record a workload report that could not be produced
pub fn record_report_failure() {
    counter!(REPORT_FAILURES_TOTAL).increment(1);
}

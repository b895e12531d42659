//! Generated documents: payment receipts and staff workload reports.

/// Payment receipts
pub mod receipt;
/// Staff workload reports
pub mod workload;

pub use receipt::{generate_receipt, ReceiptContext};
pub use workload::{generate_workload_report, write_workload_report};

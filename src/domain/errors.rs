//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("configuration not found: {0}")]
    ConfigMissing(String),

    #[error("configuration is not valid JSON: {0}")]
    ConfigMalformed(String),

    #[error("configuration incomplete: {0}")]
    ConfigIncomplete(String),

    #[error("failed to write configuration: {0}")]
    ConfigWriteError(String),

    #[error("sales dataset not found: {0}")]
    DatasetMissing(String),

    /// A row could not be read as a sales record (missing column, bad revenue).
    #[error("sales dataset malformed: {0}")]
    DatasetMalformed(String),

    #[error("report generation failed: {0}")]
    RenderError(String),

    #[error("report not found: {0}")]
    ReportMissing(String),

    /// The relay refused the sender credential.
    #[error("SMTP authentication failed: {0}")]
    AuthError(String),

    #[error("email delivery failed: {0}")]
    DeliveryError(String),
}

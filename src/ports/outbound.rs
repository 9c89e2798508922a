//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    Configuration, DomainError, EmailMessage, Report, SalesRecord, SalesReport, SenderIdentity,
};
use std::path::Path;

/// Configuration store. No caching: every call goes to durable storage.
#[async_trait::async_trait]
pub trait ConfigStorePort: Send + Sync {
    /// Read and validate the persisted configuration.
    async fn load(&self) -> Result<Configuration, DomainError>;

    /// Replace the persisted configuration wholesale.
    async fn save(&self, config: &Configuration) -> Result<(), DomainError>;
}

/// Source of sales records (e.g. a CSV file).
#[async_trait::async_trait]
pub trait SalesSourcePort: Send + Sync {
    /// Read every record of the dataset at `path`, in file order.
    ///
    /// Returns `DatasetMissing` if nothing exists at `path`.
    async fn read_sales(&self, path: &Path) -> Result<Vec<SalesRecord>, DomainError>;
}

/// Turns a report into a document on disk.
#[async_trait::async_trait]
pub trait ReportRendererPort: Send + Sync {
    /// Render `report` to `output`, overwriting whatever is there.
    async fn render(&self, report: &SalesReport, output: &Path) -> Result<Report, DomainError>;
}

/// Mail submission. One attempt per call, no retry.
#[async_trait::async_trait]
pub trait MailerPort: Send + Sync {
    /// Authenticate as `sender` and submit `message` to all its recipients.
    async fn send(&self, sender: &SenderIdentity, message: &EmailMessage)
    -> Result<(), DomainError>;
}

//! One-shot operation selection. Exactly one operation runs per invocation.

use crate::domain::DomainError;
use crate::usecases::{ConfigService, ReportService};
use chrono::{Local, NaiveDate};
use tracing::info;

/// The three mutually exclusive things the program can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Aggregate sales, render the PDF and email it.
    GenerateReport,
    /// Add an address to the recipient list.
    AddRecipient(String),
    /// Replace the sender address and credential.
    SetSender { address: String, credential: String },
}

pub struct Dispatcher {
    config: ConfigService,
    reports: ReportService,
}

impl Dispatcher {
    pub fn new(config: ConfigService, reports: ReportService) -> Self {
        Self { config, reports }
    }

    /// Run `operation`, dating any report with today's local date.
    pub async fn dispatch(&self, operation: Operation) -> Result<(), DomainError> {
        self.dispatch_on(operation, Local::now().date_naive()).await
    }

    pub async fn dispatch_on(
        &self,
        operation: Operation,
        today: NaiveDate,
    ) -> Result<(), DomainError> {
        match operation {
            Operation::GenerateReport => {
                info!("generating sales report");
                self.reports.generate_and_send(today).await.map(|_| ())
            }
            Operation::AddRecipient(address) => {
                self.config.add_recipient(&address).await.map(|_| ())
            }
            Operation::SetSender {
                address,
                credential,
            } => self.config.set_sender(&address, &credential).await,
        }
    }
}

//! Domain entities. Pure data structures for the core business.
//!
//! No file, CSV, PDF or SMTP types here — adapters map into these.

use crate::domain::DomainError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Subject line of the report email.
pub const REPORT_SUBJECT: &str = "Rapport des Ventes";

/// Plain-text body of the report email.
pub const REPORT_BODY: &str = "Bonjour,\n\n\
Veuillez trouver ci-joint le rapport des ventes.\n\n\
Cordialement,\n\
Service Commercial\n";

/// Filename the report carries as an attachment, whatever its path on disk.
pub const ATTACHMENT_NAME: &str = "rapport_ventes.pdf";

pub const ATTACHMENT_CONTENT_TYPE: &str = "application/pdf";

/// One row of the input dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesRecord {
    pub product: String,
    pub revenue: Decimal,
}

/// Summary of every sale of one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationRow {
    pub product: String,
    /// Sum of revenue, rounded to 2 decimals.
    pub total_revenue: Decimal,
    pub sale_count: usize,
    /// Mean revenue per sale, rounded to 2 decimals.
    pub mean_revenue: Decimal,
}

/// Content of a report before it is laid out.
#[derive(Debug, Clone)]
pub struct SalesReport {
    pub generated_on: NaiveDate,
    pub rows: Vec<AggregationRow>,
}

impl SalesReport {
    /// Fixed column set of the report table.
    pub const HEADER: [&'static str; 4] = [
        "Produit",
        "Revenu Total",
        "Nombre de Ventes",
        "Moyenne par Vente",
    ];

    pub fn new(generated_on: NaiveDate, rows: Vec<AggregationRow>) -> Self {
        Self { generated_on, rows }
    }

    /// `Rapport des Ventes - dd/mm/yyyy`
    pub fn title(&self) -> String {
        format!(
            "Rapport des Ventes - {}",
            self.generated_on.format("%d/%m/%Y")
        )
    }

    /// Body cells as displayed, one `[product, total, count, mean]` per row.
    pub fn body_cells(&self) -> Vec<[String; 4]> {
        self.rows
            .iter()
            .map(|row| {
                [
                    row.product.clone(),
                    two_decimals(row.total_revenue),
                    row.sale_count.to_string(),
                    two_decimals(row.mean_revenue),
                ]
            })
            .collect()
    }
}

fn two_decimals(value: Decimal) -> String {
    let mut value = value.round_dp(2);
    value.rescale(2);
    value.to_string()
}

/// A rendered report persisted on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub path: PathBuf,
    pub title: String,
}

/// Address and credential used to authenticate to the mail relay.
#[derive(Clone, PartialEq, Eq)]
pub struct SenderIdentity {
    pub address: String,
    pub credential: String,
}

impl fmt::Debug for SenderIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderIdentity")
            .field("address", &self.address)
            .field("credential", &"<redacted>")
            .finish()
    }
}

/// Persisted sender identity and recipient list.
///
/// Keys the application does not know about are kept in `extra` so a rewrite
/// leaves them in place.
#[derive(Clone, PartialEq, Serialize)]
pub struct Configuration {
    pub email_from: String,
    pub email_password: String,
    pub recipients: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Configuration {
    pub fn new(
        email_from: impl Into<String>,
        email_password: impl Into<String>,
        recipients: Vec<String>,
    ) -> Self {
        let mut config = Self {
            email_from: email_from.into(),
            email_password: email_password.into(),
            recipients: Vec::with_capacity(recipients.len()),
            extra: serde_json::Map::new(),
        };
        for recipient in recipients {
            config.add_recipient(recipient);
        }
        config
    }

    /// Appends `address` unless an identical string is already listed.
    /// Returns whether the list changed.
    pub fn add_recipient(&mut self, address: impl Into<String>) -> bool {
        let address = address.into();
        if self.recipients.contains(&address) {
            return false;
        }
        self.recipients.push(address);
        true
    }

    pub fn set_sender(&mut self, address: impl Into<String>, credential: impl Into<String>) {
        self.email_from = address.into();
        self.email_password = credential.into();
    }

    pub fn sender(&self) -> SenderIdentity {
        SenderIdentity {
            address: self.email_from.clone(),
            credential: self.email_password.clone(),
        }
    }

    /// Everything a send needs: sender address, credential, at least one recipient.
    pub fn ensure_deliverable(&self) -> Result<(), DomainError> {
        let mut missing = Vec::new();
        if self.email_from.trim().is_empty() {
            missing.push("email_from");
        }
        if self.email_password.is_empty() {
            missing.push("email_password");
        }
        if self.recipients.is_empty() {
            missing.push("recipients");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::ConfigIncomplete(format!(
                "empty field(s): {}",
                missing.join(", ")
            )))
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("email_from", &self.email_from)
            .field("email_password", &"<redacted>")
            .field("recipients", &self.recipients)
            .field("extra", &self.extra)
            .finish()
    }
}

/// Email carrying one report. Built per send, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub from: String,
    pub to: Vec<String>,
    pub body: String,
    pub attachment_name: String,
    pub attachment_content_type: String,
    pub attachment: Vec<u8>,
}

impl EmailMessage {
    /// The standard report email: fixed subject and greeting, PDF attached.
    pub fn sales_report(config: &Configuration, attachment: Vec<u8>) -> Self {
        Self {
            subject: REPORT_SUBJECT.to_string(),
            from: config.email_from.clone(),
            to: config.recipients.clone(),
            body: REPORT_BODY.to_string(),
            attachment_name: ATTACHMENT_NAME.to_string(),
            attachment_content_type: ATTACHMENT_CONTENT_TYPE.to_string(),
            attachment,
        }
    }
}

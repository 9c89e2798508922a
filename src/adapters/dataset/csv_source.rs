//! Implements SalesSourcePort over a CSV file. Uses the `csv` crate.
//!
//! Expects a header row with at least `product` and `revenue`; other columns are ignored.

use crate::domain::{DomainError, SalesRecord};
use crate::ports::SalesSourcePort;
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::info;

/// Raw CSV row. Revenue is parsed separately so the error can name the row.
#[derive(Debug, Deserialize)]
struct SalesRow {
    product: String,
    revenue: String,
}

/// CSV-backed sales source.
#[derive(Debug, Default)]
pub struct CsvSalesSource;

impl CsvSalesSource {
    pub fn new() -> Self {
        Self
    }

    /// Parse CSV bytes into records, in file order.
    pub fn parse(bytes: &[u8]) -> Result<Vec<SalesRecord>, DomainError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(bytes);

        let mut records = Vec::new();
        for (i, row) in reader.deserialize::<SalesRow>().enumerate() {
            // Line numbers as a spreadsheet shows them: header is line 1.
            let line = i + 2;
            let row = row.map_err(|e| DomainError::DatasetMalformed(format!("line {}: {}", line, e)))?;
            let revenue = parse_revenue(&row.revenue).ok_or_else(|| {
                DomainError::DatasetMalformed(format!(
                    "line {}: revenue {:?} is not a number",
                    line, row.revenue
                ))
            })?;
            records.push(SalesRecord {
                product: row.product,
                revenue,
            });
        }
        Ok(records)
    }
}

fn parse_revenue(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

#[async_trait::async_trait]
impl SalesSourcePort for CsvSalesSource {
    async fn read_sales(&self, path: &Path) -> Result<Vec<SalesRecord>, DomainError> {
        let bytes = match fs::read(path).await {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DomainError::DatasetMissing(path.display().to_string()));
            }
            Err(e) => {
                return Err(DomainError::DatasetMalformed(format!(
                    "{}: {}",
                    path.display(),
                    e
                )));
            }
        };
        let records = Self::parse(&bytes)?;
        info!(path = %path.display(), rows = records.len(), "sales data loaded");
        Ok(records)
    }
}

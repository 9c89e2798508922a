//! Reads a sales dataset and summarises it per product.

use crate::domain::{AggregationRow, DomainError, aggregate};
use crate::ports::SalesSourcePort;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

/// Sales aggregator. Dataset in, ordered aggregation rows out.
pub struct SalesAggregator {
    source: Arc<dyn SalesSourcePort>,
}

impl SalesAggregator {
    pub fn new(source: Arc<dyn SalesSourcePort>) -> Self {
        Self { source }
    }

    /// One row per product, highest total revenue first. An empty dataset is not an error.
    pub async fn aggregate(&self, path: &Path) -> Result<Vec<AggregationRow>, DomainError> {
        info!(path = %path.display(), "reading sales data");
        let records = self
            .source
            .read_sales(path)
            .await
            .inspect_err(|e| error!(path = %path.display(), error = %e, "failed to read sales data"))?;

        let rows = aggregate(&records)
            .inspect_err(|e| error!(path = %path.display(), error = %e, "failed to aggregate sales data"))?;
        info!(records = records.len(), products = rows.len(), "sales data aggregated");
        Ok(rows)
    }
}

//! Generate-and-send: configuration → aggregation → PDF → email.
//!
//! The first failure aborts the run. A report rendered before a failed send is
//! left on disk.

use crate::domain::{DomainError, Report, SalesReport};
use crate::ports::{ConfigStorePort, ReportRendererPort};
use crate::usecases::{Notifier, SalesAggregator};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

pub struct ReportService {
    store: Arc<dyn ConfigStorePort>,
    aggregator: SalesAggregator,
    renderer: Arc<dyn ReportRendererPort>,
    notifier: Notifier,
    dataset_path: PathBuf,
    report_path: PathBuf,
}

impl ReportService {
    pub fn new(
        store: Arc<dyn ConfigStorePort>,
        aggregator: SalesAggregator,
        renderer: Arc<dyn ReportRendererPort>,
        notifier: Notifier,
        dataset_path: PathBuf,
        report_path: PathBuf,
    ) -> Self {
        Self {
            store,
            aggregator,
            renderer,
            notifier,
            dataset_path,
            report_path,
        }
    }

    /// Run the whole pipeline for a report dated `generated_on`.
    pub async fn generate_and_send(&self, generated_on: NaiveDate) -> Result<Report, DomainError> {
        let config = self
            .store
            .load()
            .await
            .inspect_err(|e| error!(error = %e, "failed to load configuration"))?;

        let rows = self.aggregator.aggregate(&self.dataset_path).await?;

        info!(path = %self.report_path.display(), "generating PDF report");
        let report = self
            .renderer
            .render(&SalesReport::new(generated_on, rows), &self.report_path)
            .await
            .inspect_err(|e| error!(error = %e, "failed to generate report"))?;

        self.notifier.send(&report, &config).await?;
        info!(title = %report.title, "report delivered");
        Ok(report)
    }
}

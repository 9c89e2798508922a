//! Wiring & DI. Entry point: parse arguments, bootstrap adapters, inject into
//! services, run the selected operation. No business logic here.

use clap::Parser;
use sales_report::adapters::cli::Cli;
use sales_report::adapters::dataset::CsvSalesSource;
use sales_report::adapters::mail::{MockMailer, SmtpMailer};
use sales_report::adapters::persistence::JsonConfigStore;
use sales_report::adapters::report::PdfReportRenderer;
use sales_report::ports::{ConfigStorePort, MailerPort};
use sales_report::shared::config::AppConfig;
use sales_report::shared::logging;
use sales_report::usecases::{ConfigService, Dispatcher, Notifier, ReportService, SalesAggregator};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Usage errors exit here, before any component runs.
    let cli = Cli::parse();

    let settings = AppConfig::load();
    let settings_error = settings.as_ref().err().map(|e| e.to_string());
    let cfg = settings.unwrap_or_default();

    let _logging = match logging::init(cfg.log_path_or_default()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(e) = settings_error {
        warn!(error = %e, "invalid settings, using defaults");
    }

    match run(cli, &cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Erreur: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, cfg: &AppConfig) -> anyhow::Result<()> {
    let store: Arc<dyn ConfigStorePort> =
        Arc::new(JsonConfigStore::new(cfg.config_path_or_default()));

    let mailer: Arc<dyn MailerPort> = if cfg.is_dry_run() {
        warn!("SALES_REPORT_DRY_RUN is set, using mock mailer");
        Arc::new(MockMailer::new())
    } else {
        info!(
            host = %cfg.smtp_host_or_default(),
            port = cfg.smtp_port_or_default(),
            "SMTP relay"
        );
        Arc::new(SmtpMailer::new(
            cfg.smtp_host_or_default(),
            cfg.smtp_port_or_default(),
        ))
    };

    // --- Services ---
    let reports = ReportService::new(
        Arc::clone(&store),
        SalesAggregator::new(Arc::new(CsvSalesSource::new())),
        Arc::new(PdfReportRenderer::new()),
        Notifier::new(mailer),
        PathBuf::from(cfg.dataset_path_or_default()),
        PathBuf::from(cfg.report_path_or_default()),
    );
    let dispatcher = Dispatcher::new(ConfigService::new(store), reports);

    dispatcher.dispatch(cli.into_operation()).await?;
    Ok(())
}

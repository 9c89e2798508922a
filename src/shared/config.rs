//! Application settings. File locations and mail relay.
//!
//! Distinct from the sender/recipient configuration store: these settings say
//! where things live, the store says who sends to whom.

use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DEFAULT_DATASET_PATH: &str = "sales_data.csv";
pub const DEFAULT_REPORT_PATH: &str = "rapport_ventes.pdf";
pub const DEFAULT_LOG_PATH: &str = "rapport_ventes.log";
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
/// Submission port, upgraded with STARTTLS.
pub const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Sender/recipient JSON file. Read from SALES_REPORT_CONFIG_PATH.
    #[serde(default)]
    pub config_path: Option<String>,

    /// Input CSV. Read from SALES_REPORT_DATASET_PATH.
    #[serde(default)]
    pub dataset_path: Option<String>,

    /// Output PDF, overwritten on each run. Read from SALES_REPORT_REPORT_PATH.
    #[serde(default)]
    pub report_path: Option<String>,

    /// Append-only log file. Read from SALES_REPORT_LOG_PATH.
    #[serde(default)]
    pub log_path: Option<String>,

    /// SMTP relay host. Read from SALES_REPORT_SMTP_HOST.
    #[serde(default)]
    pub smtp_host: Option<String>,

    /// SMTP relay port. Read from SALES_REPORT_SMTP_PORT.
    #[serde(default)]
    pub smtp_port: Option<u16>,

    /// Log the email instead of sending it. Read from SALES_REPORT_DRY_RUN.
    #[serde(default)]
    pub dry_run: Option<bool>,
}

impl AppConfig {
    /// Environment (SALES_REPORT_*) plus an optional settings file named by
    /// SALES_REPORT_SETTINGS.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("SALES_REPORT_SETTINGS") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("SALES_REPORT").try_parsing(true));
        c.build()?.try_deserialize()
    }

    pub fn config_path_or_default(&self) -> String {
        self.config_path
            .clone()
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
    }

    pub fn dataset_path_or_default(&self) -> String {
        self.dataset_path
            .clone()
            .unwrap_or_else(|| DEFAULT_DATASET_PATH.to_string())
    }

    pub fn report_path_or_default(&self) -> String {
        self.report_path
            .clone()
            .unwrap_or_else(|| DEFAULT_REPORT_PATH.to_string())
    }

    pub fn log_path_or_default(&self) -> String {
        self.log_path
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string())
    }

    pub fn smtp_host_or_default(&self) -> String {
        self.smtp_host
            .clone()
            .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string())
    }

    pub fn smtp_port_or_default(&self) -> u16 {
        self.smtp_port.unwrap_or(DEFAULT_SMTP_PORT)
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.config_path_or_default(), "config.json");
        assert_eq!(cfg.dataset_path_or_default(), "sales_data.csv");
        assert_eq!(cfg.report_path_or_default(), "rapport_ventes.pdf");
        assert_eq!(cfg.log_path_or_default(), "rapport_ventes.log");
        assert_eq!(cfg.smtp_host_or_default(), "smtp.gmail.com");
        assert_eq!(cfg.smtp_port_or_default(), 587);
        assert!(!cfg.is_dry_run());
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig {
            report_path: Some("/tmp/out.pdf".into()),
            smtp_port: Some(2525),
            dry_run: Some(true),
            ..Default::default()
        };
        assert_eq!(cfg.report_path_or_default(), "/tmp/out.pdf");
        assert_eq!(cfg.smtp_port_or_default(), 2525);
        assert!(cfg.is_dry_run());
    }
}

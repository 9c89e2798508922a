//! Sends a rendered report to the configured recipients.
//!
//! Preconditions are checked before the mailer is touched, so a missing report
//! or an unusable configuration never opens a connection.

use crate::domain::{Configuration, DomainError, EmailMessage, Report};
use crate::ports::MailerPort;
use std::io::ErrorKind;
use std::sync::Arc;
use tokio::fs;
use tracing::{error, info};

/// Notifier. Composes the report email and hands it to the mailer.
pub struct Notifier {
    mailer: Arc<dyn MailerPort>,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn MailerPort>) -> Self {
        Self { mailer }
    }

    /// Single attempt; any failure is returned as-is.
    pub async fn send(&self, report: &Report, config: &Configuration) -> Result<(), DomainError> {
        self.try_send(report, config)
            .await
            .inspect_err(|e| error!(path = %report.path.display(), error = %e, "failed to send report"))
    }

    async fn try_send(&self, report: &Report, config: &Configuration) -> Result<(), DomainError> {
        let attachment = match fs::read(&report.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DomainError::ReportMissing(report.path.display().to_string()));
            }
            Err(e) => {
                return Err(DomainError::ReportMissing(format!(
                    "{}: {}",
                    report.path.display(),
                    e
                )));
            }
        };
        config.ensure_deliverable()?;

        info!(
            from = %config.email_from,
            recipients = config.recipients.len(),
            "preparing email"
        );
        let message = EmailMessage::sales_report(config, attachment);
        self.mailer.send(&config.sender(), &message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mail::MockMailer;

    fn config() -> Configuration {
        Configuration::new("s@example.com", "pw", vec!["r@example.com".into()])
    }

    #[tokio::test]
    async fn test_missing_report_never_reaches_mailer() {
        let dir = tempfile::tempdir().unwrap();
        let mailer = Arc::new(MockMailer::new());
        let notifier = Notifier::new(mailer.clone());
        let report = Report {
            path: dir.path().join("rapport_ventes.pdf"),
            title: "t".into(),
        };

        let result = notifier.send(&report, &config()).await;
        assert!(matches!(result, Err(DomainError::ReportMissing(_))));
        assert!(mailer.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_recipient_list_is_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rapport_ventes.pdf");
        std::fs::write(&path, b"%PDF").unwrap();
        let mailer = Arc::new(MockMailer::new());
        let notifier = Notifier::new(mailer.clone());

        let mut config = config();
        config.recipients.clear();
        let result = notifier
            .send(&Report { path, title: "t".into() }, &config)
            .await;
        assert!(matches!(result, Err(DomainError::ConfigIncomplete(_))));
        assert!(mailer.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_send_attaches_report_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        std::fs::write(&path, b"%PDF-1.5 body").unwrap();
        let mailer = Arc::new(MockMailer::new());
        let notifier = Notifier::new(mailer.clone());

        notifier
            .send(&Report { path, title: "t".into() }, &config())
            .await
            .unwrap();

        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 1);
        let (sender, message) = &sent[0];
        assert_eq!(sender.credential, "pw");
        assert_eq!(message.to, vec!["r@example.com"]);
        assert_eq!(message.attachment, b"%PDF-1.5 body".to_vec());
        assert_eq!(message.attachment_name, "rapport_ventes.pdf");
    }

    #[tokio::test]
    async fn test_auth_failure_is_propagated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rapport_ventes.pdf");
        std::fs::write(&path, b"%PDF").unwrap();
        let notifier = Notifier::new(Arc::new(MockMailer::rejecting_auth()));

        let result = notifier
            .send(&Report { path, title: "t".into() }, &config())
            .await;
        assert!(matches!(result, Err(DomainError::AuthError(_))));
    }
}

//! Mock mailer for dry runs and tests. Implements MailerPort without any network.
//!
//! Records every message it is asked to send.

use crate::domain::{DomainError, EmailMessage, SenderIdentity};
use crate::ports::MailerPort;
use tokio::sync::Mutex;
use tracing::info;

/// Mock mailer.
///
/// Logs what would have been sent and keeps it for inspection. Can be built to
/// reject the credential, standing in for a relay that refuses the login.
#[derive(Debug, Default)]
pub struct MockMailer {
    sent: Mutex<Vec<(SenderIdentity, EmailMessage)>>,
    reject_auth: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails with `AuthError`.
    pub fn rejecting_auth() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject_auth: true,
        }
    }

    /// Messages accepted so far, oldest first.
    pub async fn sent(&self) -> Vec<(SenderIdentity, EmailMessage)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl MailerPort for MockMailer {
    async fn send(
        &self,
        sender: &SenderIdentity,
        message: &EmailMessage,
    ) -> Result<(), DomainError> {
        if self.reject_auth {
            return Err(DomainError::AuthError(format!(
                "[MOCK] credential rejected for {}",
                sender.address
            )));
        }

        info!(
            from = %message.from,
            recipients = %message.to.join(", "),
            attachment = %message.attachment_name,
            attachment_bytes = message.attachment.len(),
            "[MOCK] email not sent (dry run)"
        );
        self.sent
            .lock()
            .await
            .push((sender.clone(), message.clone()));
        Ok(())
    }
}

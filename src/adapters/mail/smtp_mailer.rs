//! Implements MailerPort over SMTP using lettre.
//!
//! Connects to the relay, upgrades with STARTTLS, authenticates as the sender and
//! submits once to every recipient. A fresh transport is built per send since
//! the credential comes from the configuration file, not from process settings.

use crate::domain::{DomainError, EmailMessage, SenderIdentity};
use crate::ports::MailerPort;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::{Category, Code, Detail, Severity};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

/// SMTP-based mailer.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    host: String,
    port: u16,
}

impl SmtpMailer {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Build a lettre Message from our EmailMessage: text body plus one attachment.
    pub fn build_message(email: &EmailMessage) -> Result<Message, DomainError> {
        let from: Mailbox = email.from.parse().map_err(|_| {
            DomainError::DeliveryError(format!("invalid sender address: {}", email.from))
        })?;

        let mut builder = Message::builder().from(from).subject(&email.subject);

        for to in &email.to {
            let mailbox: Mailbox = to.parse().map_err(|_| {
                DomainError::DeliveryError(format!("invalid recipient address: {}", to))
            })?;
            builder = builder.to(mailbox);
        }

        let content_type = ContentType::parse(&email.attachment_content_type).map_err(|e| {
            DomainError::DeliveryError(format!(
                "invalid attachment type {}: {}",
                email.attachment_content_type, e
            ))
        })?;
        let attachment = Attachment::new(email.attachment_name.clone())
            .body(email.attachment.clone(), content_type);

        builder
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(email.body.clone()))
                    .singlepart(attachment),
            )
            .map_err(|e| DomainError::DeliveryError(format!("failed to build message: {}", e)))
    }

    fn transport(
        &self,
        sender: &SenderIdentity,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, DomainError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(|e| DomainError::DeliveryError(format!("SMTP relay {}: {}", self.host, e)))?
            .port(self.port)
            .credentials(Credentials::new(
                sender.address.clone(),
                sender.credential.clone(),
            ))
            .build();
        Ok(transport)
    }
}

/// 534 and 535 replies mean the relay rejected the credential; everything
/// else, including 530 (STARTTLS or auth required), is a delivery failure.
fn classify(status: Option<Code>, message: String) -> DomainError {
    match status {
        Some(Code {
            severity: Severity::PermanentNegativeCompletion,
            category: Category::Unspecified3,
            detail: Detail::Four | Detail::Five,
        }) => DomainError::AuthError(message),
        _ => DomainError::DeliveryError(message),
    }
}

#[async_trait::async_trait]
impl MailerPort for SmtpMailer {
    async fn send(
        &self,
        sender: &SenderIdentity,
        message: &EmailMessage,
    ) -> Result<(), DomainError> {
        let built = Self::build_message(message)?;
        let transport = self.transport(sender)?;

        info!(host = %self.host, port = self.port, "connecting to SMTP relay");
        transport
            .send(built)
            .await
            .map_err(|e| classify(e.status(), e.to_string()))?;

        info!(recipients = message.to.len(), "email sent");
        Ok(())
    }
}

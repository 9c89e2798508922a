//! Mail adapter module. Implements MailerPort.
//!
//! Provides the SMTP mailer and a mock mailer for dry runs and testing.

pub mod mock_mailer;
pub mod smtp_mailer;

pub use mock_mailer::MockMailer;
pub use smtp_mailer::SmtpMailer;

//! Port traits. API boundaries for the hexagon.
//!
//! Outbound only: called by the use cases into infrastructure. The CLI adapter
//! drives the use cases directly.

pub mod outbound;

pub use outbound::{ConfigStorePort, MailerPort, ReportRendererPort, SalesSourcePort};

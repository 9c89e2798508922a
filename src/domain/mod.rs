//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod aggregation;
pub mod entities;
pub mod errors;

pub use aggregation::aggregate;
pub use entities::{
    AggregationRow, Configuration, EmailMessage, Report, SalesRecord, SalesReport, SenderIdentity,
};
pub use errors::DomainError;

//! Infrastructure adapters. Implement outbound ports.
//!
//! CSV, PDF, JSON, SMTP, command line. Map errors to DomainError.

pub mod cli;
pub mod dataset;
pub mod mail;
pub mod persistence;
pub mod report;

//! sales-report: aggregate sales data into a PDF report and email it, with
//! Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;

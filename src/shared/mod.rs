//! Cross-cutting concerns: settings and logging.

pub mod config;
pub mod logging;

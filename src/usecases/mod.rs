//! Application use cases. Orchestrate domain logic via ports.

pub mod config_service;
pub mod dispatcher;
pub mod notifier;
pub mod report_service;
pub mod sales_aggregator;

pub use config_service::ConfigService;
pub use dispatcher::{Dispatcher, Operation};
pub use notifier::Notifier;
pub use report_service::ReportService;
pub use sales_aggregator::SalesAggregator;

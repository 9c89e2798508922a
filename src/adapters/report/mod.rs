//! Report adapter. Lays out and writes the sales report as a PDF.

pub mod layout;
pub mod metrics;
pub mod pdf_renderer;

pub use pdf_renderer::PdfReportRenderer;

//! Export Layer
//!
//! Formatting of accepted results into documents.

mod pdf;

pub use pdf::PdfExporter;

pub mod json;
pub mod models;

pub use models::ExtractionReport;

pub mod commands;
pub mod modules;

pub use modules::catalog::{self, CatalogEntry, CatalogTotals, IconCatalog};
pub use modules::common::error::ExtractorError;
pub use modules::common::utils;
pub use modules::decoder::{self, ContainerDecoder, IconDecoder, IconRecord};
pub use modules::exporter::{self, ExportSession, ExportSummary};
pub use modules::reporter;
pub use modules::scanner;

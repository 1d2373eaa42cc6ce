pub mod catalog;
pub mod common;
pub mod decoder;
pub mod exporter;
pub mod reporter;
pub mod scanner;

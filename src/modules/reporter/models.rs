use crate::modules::catalog::CatalogTotals;
use crate::modules::exporter::{ExportFailure, ExportSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 导出报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub id: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub recurse: bool,
    /// 目录中的图标数
    pub icon_count: u64,
    pub selected: usize,
    pub files_written: usize,
    pub skipped: usize,
    pub failures: Vec<ExportFailure>,
    pub success: bool,
}

impl ExtractionReport {
    pub fn new(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            source,
            destination,
            generated_at: Utc::now(),
            recurse: false,
            icon_count: 0,
            selected: 0,
            files_written: 0,
            skipped: 0,
            failures: Vec::new(),
            success: true,
        }
    }

    pub fn with_catalog(mut self, totals: CatalogTotals, recurse: bool) -> Self {
        self.icon_count = totals.icon_count;
        self.recurse = recurse;
        self
    }

    pub fn with_summary(mut self, selected: usize, summary: &ExportSummary) -> Self {
        self.selected = selected;
        self.files_written = summary.files_written;
        self.skipped = summary.skipped;
        self.failures = summary.failures.clone();
        self.success = summary.failures.is_empty();
        self
    }
}

use super::models::ExtractionReport;
use crate::modules::common::error::ExtractorError;
use std::path::Path;

pub fn to_json(report: &ExtractionReport) -> Result<String, ExtractorError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// 写入 JSON 报告，必要时创建上级目录
pub fn write_report(report: &ExtractionReport, path: &Path) -> Result<(), ExtractorError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_json(report)?)?;
    tracing::info!("报告已写入 {}", path.display());
    Ok(())
}

pub fn read_report(path: &Path) -> Result<ExtractionReport, ExtractorError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::CatalogTotals;
    use crate::modules::exporter::{ExportFailure, ExportSummary};
    use std::path::PathBuf;

    fn sample_report() -> ExtractionReport {
        let summary = ExportSummary {
            files_written: 3,
            skipped: 1,
            failures: vec![ExportFailure {
                path: PathBuf::from("/out/bad.png"),
                error: "权限不足".to_string(),
            }],
        };
        let totals = CatalogTotals {
            icon_count: 5,
            total_raw_bytes: 2048,
            file_count: 2,
        };
        ExtractionReport::new(PathBuf::from("/icons"), PathBuf::from("/out"))
            .with_catalog(totals, true)
            .with_summary(5, &summary)
    }

    #[test]
    fn summary_fields_are_copied() {
        let report = sample_report();
        assert_eq!(report.icon_count, 5);
        assert_eq!(report.files_written, 3);
        assert_eq!(report.skipped, 1);
        assert!(report.recurse);
        assert!(!report.success);
    }

    #[test]
    fn report_is_written_as_json() {
        let dir = std::env::temp_dir().join(format!("iconsext-report-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("report.json");
        let report = sample_report();

        write_report(&report, &path).unwrap_or_else(|e| panic!("write: {}", e));
        let value: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read: {}", e)),
        )
        .unwrap_or_else(|e| panic!("parse: {}", e));
        assert_eq!(value["files_written"], 3);
        assert_eq!(value["failures"][0]["error"], "权限不足");

        let loaded = read_report(&path).unwrap_or_else(|e| panic!("load: {}", e));
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.generated_at, report.generated_at);

        let _ = std::fs::remove_dir_all(&dir);
    }
}

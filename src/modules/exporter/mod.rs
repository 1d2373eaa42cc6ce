pub mod conflict;
pub mod models;
pub mod progress;

pub use conflict::{ExportSession, OverwritePrompt};
pub use models::{
    ConflictOutcome, ConflictPolicy, ExportFailure, ExportSummary, OverwriteChoice,
};
pub use progress::{ExportProgress, SilentProgress};

use crate::modules::catalog::{pixels, CatalogEntry};
use crate::modules::common::error::ExtractorError;
use std::path::{Path, PathBuf};

/// 导出目标路径：`<目录>/<exportBaseName>.png`
pub fn destination_path(destination: &Path, entry: &CatalogEntry) -> PathBuf {
    destination.join(format!("{}.png", entry.export_base_name))
}

/// 按选择顺序把条目导出为 PNG
///
/// 单个条目写入失败只记录到汇总中，继续处理后续条目。
pub fn export_icons(
    entries: &[&CatalogEntry],
    destination: &Path,
    session: &mut ExportSession,
    prompt: &mut dyn OverwritePrompt,
    progress: &mut dyn ExportProgress,
) -> Result<ExportSummary, ExtractorError> {
    if entries.is_empty() {
        return Err(ExtractorError::NothingSelected);
    }

    std::fs::create_dir_all(destination)?;

    let total = entries.len();
    let mut summary = ExportSummary::default();

    for (index, entry) in entries.iter().enumerate() {
        let target = destination_path(destination, entry);

        let outcome = if target.exists() {
            session.resolve(&target, prompt)
        } else {
            ConflictOutcome::OverwriteOne
        };

        if outcome.is_skip() {
            tracing::debug!("跳过 {} ({:?})", target.display(), outcome);
            summary.skipped += 1;
        } else {
            match write_png(entry, &target) {
                Ok(()) => {
                    tracing::debug!("写入 {} ({:?})", target.display(), outcome);
                    summary.files_written += 1;
                }
                Err(e) => {
                    tracing::warn!("写入 {} 失败: {}", target.display(), e);
                    summary.failures.push(ExportFailure {
                        path: target.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        progress.on_progress(index + 1, total);
    }

    tracing::info!(
        "导出完成: 写入 {} 个, 跳过 {} 个, 失败 {} 个",
        summary.files_written,
        summary.skipped,
        summary.failures.len()
    );
    progress.on_summary(&summary);
    Ok(summary)
}

fn write_png(entry: &CatalogEntry, target: &Path) -> Result<(), ExtractorError> {
    let png = pixels::encode_png(&entry.pixel_buffer)?;
    std::fs::write(target, png)?;
    Ok(())
}

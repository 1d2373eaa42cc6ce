use super::models::ExportSummary;

/// 导出进度的外部协作者，默认什么也不做
pub trait ExportProgress {
    fn on_progress(&mut self, _current: usize, _total: usize) {}

    fn on_summary(&mut self, _summary: &ExportSummary) {}
}

/// 不报告进度
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ExportProgress for SilentProgress {}

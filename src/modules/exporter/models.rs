use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// 确认对话框的四个按钮，外加关闭对话框
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteChoice {
    Skip,
    SkipAll,
    Overwrite,
    OverwriteAll,
    /// 关闭对话框，按 Skip 处理
    Dismissed,
}

/// 单个待写文件的冲突处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictOutcome {
    SkipOne,
    SkipAll,
    OverwriteOne,
    OverwriteAll,
}

impl ConflictOutcome {
    pub fn is_skip(self) -> bool {
        matches!(self, Self::SkipOne | Self::SkipAll)
    }
}

/// 会话开始时的冲突策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// 每次冲突都询问
    #[default]
    Ask,
    Skip,
    Overwrite,
}

impl FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ask" => Ok(Self::Ask),
            "skip" => Ok(Self::Skip),
            "overwrite" => Ok(Self::Overwrite),
            other => Err(format!("未知的冲突策略: {} (可选 ask|skip|overwrite)", other)),
        }
    }
}

/// 写入失败的条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFailure {
    pub path: PathBuf,
    pub error: String,
}

/// 导出汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub files_written: usize,
    pub skipped: usize,
    pub failures: Vec<ExportFailure>,
}

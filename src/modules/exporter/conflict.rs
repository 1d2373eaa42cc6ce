//! 目标文件已存在时的冲突处理
//!
//! `skip_all` / `overwrite_all` 在一个会话内只会从 false 变为 true，
//! 且二者互斥：任一标志置位后不再询问，另一个也就不可能再被设置。

use super::models::{ConflictOutcome, ConflictPolicy, OverwriteChoice};
use std::path::Path;

/// 覆盖确认的外部协作者
pub trait OverwritePrompt {
    fn ask_overwrite(&mut self, path: &Path) -> OverwriteChoice;
}

impl<F> OverwritePrompt for F
where
    F: FnMut(&Path) -> OverwriteChoice,
{
    fn ask_overwrite(&mut self, path: &Path) -> OverwriteChoice {
        self(path)
    }
}

/// 一次导出批次的决策记录
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSession {
    skip_all: bool,
    overwrite_all: bool,
}

impl ExportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按策略预置粘性标志
    pub fn with_policy(policy: ConflictPolicy) -> Self {
        Self {
            skip_all: policy == ConflictPolicy::Skip,
            overwrite_all: policy == ConflictPolicy::Overwrite,
        }
    }

    pub fn skip_all(&self) -> bool {
        self.skip_all
    }

    pub fn overwrite_all(&self) -> bool {
        self.overwrite_all
    }

    /// 处理一个已存在的目标路径
    pub fn resolve(&mut self, path: &Path, prompt: &mut dyn OverwritePrompt) -> ConflictOutcome {
        if self.skip_all {
            return ConflictOutcome::SkipOne;
        }
        if self.overwrite_all {
            return ConflictOutcome::OverwriteOne;
        }

        match prompt.ask_overwrite(path) {
            OverwriteChoice::Skip | OverwriteChoice::Dismissed => ConflictOutcome::SkipOne,
            OverwriteChoice::SkipAll => {
                self.skip_all = true;
                ConflictOutcome::SkipAll
            }
            OverwriteChoice::Overwrite => ConflictOutcome::OverwriteOne,
            OverwriteChoice::OverwriteAll => {
                self.overwrite_all = true;
                ConflictOutcome::OverwriteAll
            }
        }
    }
}

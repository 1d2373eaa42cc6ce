use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 输入根路径的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// 单个文件
    File,
    /// 目录
    Directory,
}

/// 一次枚举的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceListing {
    /// 解析后的绝对根路径
    pub root: PathBuf,
    pub kind: SourceKind,
    pub recurse: bool,
    /// 候选文件，按文件名排序的遍历顺序
    pub files: Vec<PathBuf>,
}

impl SourceListing {
    pub fn single(root: PathBuf) -> Self {
        Self {
            files: vec![root.clone()],
            root,
            kind: SourceKind::File,
            recurse: false,
        }
    }

    pub fn directory(root: PathBuf, recurse: bool, files: Vec<PathBuf>) -> Self {
        Self {
            root,
            kind: SourceKind::Directory,
            recurse,
            files,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == SourceKind::File
    }
}

pub mod filesystem;
pub mod models;

use crate::modules::common::error::ExtractorError;
use models::SourceListing;
use std::path::Path;

/// 枚举候选文件
///
/// - 路径不存在：返回 `NotFound`，不产生部分结果
/// - 普通文件：只包含该文件本身
/// - 目录：按 `recurse` 列出直接子文件或全部后代文件，目录本身不输出
pub fn enumerate_sources(root: &Path, recurse: bool) -> Result<SourceListing, ExtractorError> {
    if !root.exists() {
        tracing::error!("无法打开 {}", root.display());
        return Err(ExtractorError::NotFound(root.display().to_string()));
    }

    let resolved = root.canonicalize()?;

    if resolved.is_dir() {
        tracing::debug!("{} 是目录，开始枚举 (递归: {})", resolved.display(), recurse);
        let files = filesystem::list_directory_files(&resolved, recurse)?;
        tracing::debug!("找到 {} 个文件，开始搜索图标", files.len());
        Ok(SourceListing::directory(resolved, recurse, files))
    } else {
        tracing::debug!("{} 是文件，直接处理", resolved.display());
        Ok(SourceListing::single(resolved))
    }
}

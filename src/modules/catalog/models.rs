use super::pixels::PixelBuffer;
use serde::Serialize;
use std::path::PathBuf;

/// 目录中的一个图标
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub pixel_buffer: PixelBuffer,
    pub display_name: String,
    pub resource_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_index: Option<u32>,
    /// 导出文件名主干 (不含 .png)
    pub export_base_name: String,
    pub original_filename: PathBuf,
    /// 原始编码字节数
    pub raw_size: usize,
}

/// 构建过程中累计的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogTotals {
    pub icon_count: u64,
    pub total_raw_bytes: u64,
    /// 访问过的文件数
    pub file_count: u64,
}

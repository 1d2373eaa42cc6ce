pub mod models;
pub mod naming;
pub mod pixels;

pub use models::{CatalogEntry, CatalogTotals};

use crate::modules::common::error::ExtractorError;
use crate::modules::common::utils;
use crate::modules::decoder::{IconDecoder, IconRecord};
use crate::modules::scanner::{self, models::SourceListing};
use std::path::Path;
use std::sync::Arc;

/// 内存中的图标目录
///
/// 每次 `rebuild` 都会整体替换条目与统计，不做增量更新。
#[derive(Debug, Default)]
pub struct IconCatalog {
    entries: Vec<CatalogEntry>,
    totals: CatalogTotals,
    source: Option<SourceListing>,
}

impl IconCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn totals(&self) -> CatalogTotals {
        self.totals
    }

    /// 最近一次成功构建时的输入
    pub fn source(&self) -> Option<&SourceListing> {
        self.source.as_ref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 顺序构建目录
    ///
    /// 路径不存在时返回 `NotFound`，已有目录保持不变。
    pub fn rebuild(
        &mut self,
        root: &Path,
        recurse: bool,
        decoder: &dyn IconDecoder,
    ) -> Result<CatalogTotals, ExtractorError> {
        let listing = scanner::enumerate_sources(root, recurse)?;

        let per_file = listing
            .files
            .iter()
            .map(|path| build_entries(decoder.decode(path)))
            .collect();

        self.replace(listing, per_file);
        Ok(self.totals)
    }

    /// 并行构建目录：每个文件一个阻塞任务，按枚举顺序合并结果
    pub async fn rebuild_parallel(
        &mut self,
        root: &Path,
        recurse: bool,
        decoder: Arc<dyn IconDecoder>,
    ) -> Result<CatalogTotals, ExtractorError> {
        let listing = scanner::enumerate_sources(root, recurse)?;

        let handles: Vec<_> = listing
            .files
            .iter()
            .cloned()
            .map(|path| {
                let decoder = Arc::clone(&decoder);
                tokio::task::spawn_blocking(move || build_entries(decoder.decode(&path)))
            })
            .collect();

        let mut per_file = Vec::with_capacity(handles.len());
        for (handle, path) in handles.into_iter().zip(&listing.files) {
            match handle.await {
                Ok(entries) => per_file.push(entries),
                Err(e) => {
                    tracing::warn!("解码任务失败 {}: {}", path.display(), e);
                    per_file.push(Vec::new());
                }
            }
        }

        self.replace(listing, per_file);
        Ok(self.totals)
    }

    fn replace(&mut self, listing: SourceListing, per_file: Vec<Vec<CatalogEntry>>) {
        self.entries.clear();
        self.totals = CatalogTotals {
            file_count: listing.files.len() as u64,
            ..CatalogTotals::default()
        };

        for entry in per_file.into_iter().flatten() {
            self.totals.icon_count += 1;
            self.totals.total_raw_bytes += entry.raw_size as u64;
            self.entries.push(entry);
        }

        tracing::info!("{}", status_line(&listing, &self.totals));
        self.source = Some(listing);
    }

    /// 状态栏文本
    pub fn status_line(&self) -> Option<String> {
        self.source
            .as_ref()
            .map(|listing| status_line(listing, &self.totals))
    }

    pub fn select_all(&self) -> Vec<&CatalogEntry> {
        self.entries.iter().collect()
    }

    /// 导出名匹配任一通配符的条目
    pub fn select_by_globs(&self, patterns: &[String]) -> Result<Vec<&CatalogEntry>, ExtractorError> {
        let patterns = compile_globs(patterns)?;
        Ok(self
            .entries
            .iter()
            .filter(|entry| patterns.iter().any(|p| p.matches(&entry.export_base_name)))
            .collect())
    }

    /// 显示名模糊匹配的条目
    pub fn select_by_search(&self, text: &str) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|entry| utils::fuzzy_match(&entry.display_name, text))
            .collect()
    }

    /// 组合筛选：通配符 (任一) 与模糊搜索同时满足；都为空时选中全部
    pub fn select(
        &self,
        patterns: &[String],
        search: Option<&str>,
    ) -> Result<Vec<&CatalogEntry>, ExtractorError> {
        let patterns = compile_globs(patterns)?;
        Ok(self
            .entries
            .iter()
            .filter(|entry| {
                patterns.is_empty() || patterns.iter().any(|p| p.matches(&entry.export_base_name))
            })
            .filter(|entry| search.map_or(true, |text| utils::fuzzy_match(&entry.display_name, text)))
            .collect())
    }
}

fn compile_globs(patterns: &[String]) -> Result<Vec<glob::Pattern>, ExtractorError> {
    patterns
        .iter()
        .map(|p| {
            glob::Pattern::new(p)
                .map_err(|e| ExtractorError::Other(format!("无效的通配符 {}: {}", p, e)))
        })
        .collect()
}

/// 把一个文件的记录转换为目录条目，无法解码的记录直接丢弃
pub fn build_entries(records: Vec<IconRecord>) -> Vec<CatalogEntry> {
    records.into_iter().filter_map(build_entry).collect()
}

fn build_entry(record: IconRecord) -> Option<CatalogEntry> {
    let pixel_buffer = match pixels::build_pixel_buffer(&record.raw_bytes) {
        Ok(buffer) => buffer,
        Err(e) => {
            tracing::debug!("丢弃 {}: {}", record.synthetic_filename, e);
            return None;
        }
    };

    Some(CatalogEntry {
        display_name: naming::display_name(&record),
        export_base_name: naming::export_base_name(&record.synthetic_filename).to_string(),
        resource_id: record.resource_id,
        group_index: record.group_index,
        raw_size: record.raw_bytes.len(),
        original_filename: record.original_filename,
        pixel_buffer,
    })
}

fn status_line(listing: &SourceListing, totals: &CatalogTotals) -> String {
    if listing.is_file() {
        format!(
            "已加载文件 {} ({} 个图标, {} 字节)",
            utils::file_name_of(&listing.root),
            utils::format_thousands(totals.icon_count),
            utils::format_thousands(totals.total_raw_bytes)
        )
    } else {
        format!(
            "已加载目录 ({} 个文件, {} 个图标, {} 字节)",
            utils::format_thousands(totals.file_count),
            utils::format_thousands(totals.icon_count),
            utils::format_thousands(totals.total_raw_bytes)
        )
    }
}

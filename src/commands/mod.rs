pub mod extract;
pub mod list;

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use crate::modules::catalog::{CatalogEntry, IconCatalog};
use crate::modules::decoder::ContainerDecoder;

/// 目录构建与筛选参数，列表与导出共用
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// 图标文件 (ICO/ICL/DLL/EXE) 或目录
    #[arg(default_value = ".")]
    pub filename: PathBuf,

    /// 递归搜索子目录
    #[arg(
        short = 's',
        long = "search_subfolders",
        visible_alias = "search-subfolders",
        env = "ICONSEXT_SEARCH_SUBFOLDERS"
    )]
    pub search_subfolders: bool,

    /// 按导出名筛选 (通配符，可多次指定)
    #[arg(long = "select", value_name = "GLOB")]
    pub select: Vec<String>,

    /// 按显示名模糊搜索
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,
}

/// 构建图标目录
pub async fn load_catalog(args: &CatalogArgs) -> Result<IconCatalog> {
    tracing::debug!(
        "加载 {} (递归: {})",
        args.filename.display(),
        args.search_subfolders
    );

    let mut catalog = IconCatalog::new();
    catalog
        .rebuild_parallel(
            &args.filename,
            args.search_subfolders,
            Arc::new(ContainerDecoder::new()),
        )
        .await?;
    Ok(catalog)
}

/// 按命令行条件筛选目录条目
pub fn select_entries<'a>(
    catalog: &'a IconCatalog,
    args: &CatalogArgs,
) -> Result<Vec<&'a CatalogEntry>> {
    Ok(catalog.select(&args.select, args.search.as_deref())?)
}

use anyhow::Result;
use clap::Args;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::CatalogArgs;
use crate::modules::common::utils;
use crate::modules::exporter::{
    self, ConflictPolicy, ExportProgress, ExportSession, ExportSummary, OverwriteChoice,
    OverwritePrompt,
};
use crate::modules::reporter::{self, ExtractionReport};

#[derive(Args, Debug, Clone)]
pub struct ExtractCommand {
    /// 导出为 PNG 的目标目录 (不存在时自动创建)
    #[arg(short = 'x', long, value_name = "DIR")]
    pub extract: Option<PathBuf>,

    /// 目标文件已存在时的处理方式 (ask|skip|overwrite)
    #[arg(long, default_value = "ask", env = "ICONSEXT_ON_CONFLICT")]
    pub on_conflict: String,

    /// 导出后写入 JSON 报告
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

pub async fn execute(args: &CatalogArgs, cmd: &ExtractCommand, destination: &Path) -> Result<()> {
    let policy: ConflictPolicy = cmd.on_conflict.parse().map_err(anyhow::Error::msg)?;

    let catalog = super::load_catalog(args).await?;
    if let Some(status) = catalog.status_line() {
        println!("{}", status);
    }

    let entries = super::select_entries(&catalog, args)?;
    println!("导出 {} 个图标到 {}\n", entries.len(), destination.display());

    let mut session = ExportSession::with_policy(policy);
    let summary = exporter::export_icons(
        &entries,
        destination,
        &mut session,
        &mut ConsolePrompt,
        &mut ConsoleProgress,
    )?;

    if let Some(path) = &cmd.report {
        let report = ExtractionReport::new(args.filename.clone(), destination.to_path_buf())
            .with_catalog(catalog.totals(), args.search_subfolders)
            .with_summary(entries.len(), &summary);
        reporter::json::write_report(&report, path)?;
        println!("报告已保存: {}", path.display());
    }

    if !summary.failures.is_empty() {
        anyhow::bail!("{} 个图标写入失败", summary.failures.len());
    }

    Ok(())
}

/// 在终端询问是否覆盖
pub struct ConsolePrompt;

impl OverwritePrompt for ConsolePrompt {
    fn ask_overwrite(&mut self, path: &Path) -> OverwriteChoice {
        println!("\n  文件已存在: {}", path.display());
        println!("  [s] 跳过  [sa] 全部跳过  [o] 覆盖  [oa] 全部覆盖");
        print!("  > ");
        if std::io::stdout().flush().is_err() {
            return OverwriteChoice::Dismissed;
        }

        let mut input = String::new();
        match std::io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => OverwriteChoice::Dismissed,
            Ok(_) => parse_choice(&input),
        }
    }
}

/// 解析用户输入，无法识别的输入视为关闭对话框
pub fn parse_choice(input: &str) -> OverwriteChoice {
    match input.trim().to_lowercase().as_str() {
        "s" | "skip" => OverwriteChoice::Skip,
        "sa" | "skip all" => OverwriteChoice::SkipAll,
        "o" | "overwrite" => OverwriteChoice::Overwrite,
        "oa" | "overwrite all" => OverwriteChoice::OverwriteAll,
        _ => OverwriteChoice::Dismissed,
    }
}

/// 在终端显示进度与汇总
pub struct ConsoleProgress;

impl ExportProgress for ConsoleProgress {
    fn on_progress(&mut self, current: usize, total: usize) {
        print!("\r  进度: {}/{}", current, total);
        let _ = std::io::stdout().flush();
    }

    fn on_summary(&mut self, summary: &ExportSummary) {
        println!("\n");
        println!("{}", "=".repeat(60));
        println!(
            "已写入 {} 个文件",
            utils::format_thousands(summary.files_written as u64)
        );
        if summary.skipped > 0 {
            println!("跳过: {} 个", summary.skipped);
        }
        for failure in &summary.failures {
            println!("  失败: {} ({})", failure.path.display(), failure.error);
        }
        println!("{}", "=".repeat(60));
    }
}

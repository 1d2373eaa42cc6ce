use anyhow::Result;
use clap::Args;

use super::CatalogArgs;
use crate::modules::catalog::{CatalogEntry, IconCatalog};
use crate::modules::common::utils;

#[derive(Args, Debug, Clone)]
pub struct ListCommand {
    /// 输出格式 (table/json)
    #[arg(long, default_value = "table")]
    pub format: String,
}

pub async fn execute(args: &CatalogArgs, cmd: &ListCommand) -> Result<()> {
    let catalog = super::load_catalog(args).await?;
    let entries = super::select_entries(&catalog, args)?;

    match cmd.format.as_str() {
        "json" => {
            let output = serde_json::json!({
                "totals": catalog.totals(),
                "entries": entries,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            print_table(&catalog, &entries);
        }
    }

    Ok(())
}

fn print_table(catalog: &IconCatalog, entries: &[&CatalogEntry]) {
    println!("\n{}", "=".repeat(100));
    println!(
        "{:<40} {:<34} {:<10} {:<6} {:>8}",
        "名称", "导出名", "尺寸", "模式", "大小"
    );
    println!("{}", "=".repeat(100));

    for entry in entries {
        let buffer = &entry.pixel_buffer;
        let mode = if buffer.has_alpha { "RGBA" } else { "RGB" };

        println!(
            "{:<40} {:<34} {:<10} {:<6} {:>8}",
            utils::truncate_string(&entry.display_name, 39),
            utils::truncate_string(&entry.export_base_name, 33),
            format!("{}x{}", buffer.width, buffer.height),
            mode,
            utils::format_size(entry.raw_size as u64)
        );
    }

    println!("{}", "=".repeat(100));
    if let Some(status) = catalog.status_line() {
        println!("{}", status);
    }
    println!("显示: {} / {} 个图标\n", entries.len(), catalog.len());
}

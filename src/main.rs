use anyhow::Result;
use clap::Parser;
use std::process;

use iconsext_lib::commands::{self, extract::ExtractCommand, list::ListCommand, CatalogArgs};
use iconsext_lib::modules::common::logging;

#[derive(Parser, Debug)]
#[command(name = "iconsext")]
#[command(about = "从 ICO/ICL/DLL/EXE 文件中提取图标并导出为 PNG", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    #[command(flatten)]
    catalog: CatalogArgs,

    #[command(flatten)]
    list: ListCommand,

    #[command(flatten)]
    extract: ExtractCommand,

    /// 调试输出
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 初始化日志
    logging::init_logging(cli.debug);

    // 指定 -x 时导出，否则列出目录
    let result = match &cli.extract.extract {
        Some(destination) => commands::extract::execute(&cli.catalog, &cli.extract, destination).await,
        None => commands::list::execute(&cli.catalog, &cli.list).await,
    };

    if let Err(e) = result {
        if cli.debug {
            tracing::error!("错误: {}", e);
        } else {
            eprintln!("错误: {}", e);
        }
        process::exit(1);
    }

    Ok(())
}

//! 由合成文件名派生显示名与导出名
//!
//! 合成文件名约定为 `<base>_<p1>_<p2>.<ext>`。

use crate::modules::common::utils;
use crate::modules::decoder::IconRecord;

/// 去掉最后一个 `.` 及其后缀；没有 `.` 时原样返回
pub fn export_base_name(synthetic_filename: &str) -> &str {
    match synthetic_filename.rfind('.') {
        Some(dot) => &synthetic_filename[..dot],
        None => synthetic_filename,
    }
}

/// 倒数第二个 `_` 的位置
///
/// 先找最后一个 `_`，再在它之前找最后一个 `_`。任一步没有找到时，
/// 边界取 `export_base_name` 的长度，即显示名保留整个文件名主干。
pub fn display_bound(synthetic_filename: &str) -> usize {
    synthetic_filename
        .rfind('_')
        .and_then(|last| synthetic_filename[..last].rfind('_'))
        .unwrap_or_else(|| export_base_name(synthetic_filename).len())
}

/// 显示名
///
/// - 无图标组：`<合成名[0:l]> (<resourceId>)`
/// - 有图标组：`<源文件名> (<groupIndex>,<resourceId>)`
pub fn display_name(record: &IconRecord) -> String {
    match record.group_index {
        Some(group_index) => format!(
            "{} ({},{})",
            utils::file_name_of(&record.original_filename),
            group_index,
            record.resource_id
        ),
        None => {
            let name = &record.synthetic_filename;
            format!("{} ({})", &name[..display_bound(name)], record.resource_id)
        }
    }
}

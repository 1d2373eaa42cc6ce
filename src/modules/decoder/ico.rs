use super::group::{synthetic_filename, GroupIconEntry};
use super::models::IconRecord;
use crate::modules::common::error::ExtractorError;
use crate::modules::common::utils;
use std::io::Cursor;
use std::path::Path;

/// 独立 .ico 文件没有图标组，组名段固定为 0
const ICO_GROUP_NAME: &str = "0";

/// 解析 .ico 文件，每个目录项生成一条记录
pub fn decode_ico(path: &Path, bytes: &[u8]) -> Result<Vec<IconRecord>, ExtractorError> {
    let dir = ico::IconDir::read(Cursor::new(bytes))
        .map_err(|e| ExtractorError::Decode(format!("ICO 目录无效: {}", e)))?;

    if dir.resource_type() != ico::ResourceType::Icon {
        return Err(ExtractorError::Decode("光标文件不包含图标".to_string()));
    }

    let stem = utils::file_stem_of(path);
    let mut records = Vec::with_capacity(dir.entries().len());

    for (index, entry) in dir.entries().iter().enumerate() {
        let resource_id = index as u32 + 1;
        let geometry = GroupIconEntry::from_dimensions(
            entry.width(),
            entry.height(),
            entry.bits_per_pixel(),
            entry.data().len(),
        );
        let (raw_bytes, ext) = geometry.wrap_payload(entry.data());

        records.push(IconRecord {
            raw_bytes,
            resource_id,
            group_index: None,
            synthetic_filename: synthetic_filename(&stem, ICO_GROUP_NAME, resource_id, ext),
            original_filename: path.to_path_buf(),
        });
    }

    Ok(records)
}

//! 16 位 NE 容器 (ICL 图标库) 中的图标提取
//!
//! NE 资源表：u16 对齐位移，随后是若干 TYPEINFO (类型 ID + 数量 + 保留)，
//! 每个 TYPEINFO 后跟 12 字节的 NAMEINFO，类型 ID 为 0 时结束。

use super::group::{self, le_u16, parse_group_icon_dir, slice_at, synthetic_filename};
use super::models::IconRecord;
use crate::modules::common::error::ExtractorError;
use crate::modules::common::utils;
use std::collections::HashMap;
use std::path::Path;

const NE_RT_ICON: u16 = 0x8003;
const NE_RT_GROUP_ICON: u16 = 0x800E;
const INTEGER_ID_FLAG: u16 = 0x8000;
const RESOURCE_TABLE_FIELD: usize = 0x24;
const RESIDENT_NAMES_FIELD: usize = 0x26;
const TYPEINFO_SIZE: usize = 8;
const NAMEINFO_SIZE: usize = 12;
const MAX_ALIGN_SHIFT: u16 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
enum NeResourceId {
    Ordinal(u16),
    Name(String),
}

impl NeResourceId {
    fn group_label(&self) -> String {
        match self {
            NeResourceId::Ordinal(id) => id.to_string(),
            NeResourceId::Name(name) => group::sanitize_group_name(name),
        }
    }
}

#[derive(Debug)]
struct NeResource<'a> {
    type_id: u16,
    id: NeResourceId,
    data: &'a [u8],
}

/// 解析 NE 文件中的全部图标组，`group_index` 为图标组在文件中的序号
pub fn decode_ne(
    path: &Path,
    bytes: &[u8],
    ne_offset: usize,
) -> Result<Vec<IconRecord>, ExtractorError> {
    let table_rel = le_u16(bytes, ne_offset + RESOURCE_TABLE_FIELD)? as usize;
    let resident_rel = le_u16(bytes, ne_offset + RESIDENT_NAMES_FIELD)? as usize;

    // 资源表与常驻名表重合表示没有资源
    if table_rel == 0 || table_rel == resident_rel {
        tracing::debug!("{} 没有 NE 资源表", path.display());
        return Ok(Vec::new());
    }

    let resources = read_resource_table(bytes, ne_offset + table_rel)?;

    let icons: HashMap<u16, &[u8]> = resources
        .iter()
        .filter(|r| r.type_id == NE_RT_ICON)
        .filter_map(|r| match r.id {
            NeResourceId::Ordinal(id) => Some((id, r.data)),
            NeResourceId::Name(_) => None,
        })
        .collect();

    let stem = utils::file_stem_of(path);
    let mut records = Vec::new();

    let groups = resources.iter().filter(|r| r.type_id == NE_RT_GROUP_ICON);
    for (group_index, resource) in groups.enumerate() {
        let group_name = resource.id.group_label();

        let entries = match parse_group_icon_dir(resource.data) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("图标组 {} 解析失败: {}", group_name, e);
                continue;
            }
        };

        for icon in entries {
            let Some(data) = icons.get(&icon.icon_id) else {
                tracing::debug!("图标组 {} 引用了不存在的图标 {}", group_name, icon.icon_id);
                continue;
            };

            let resource_id = icon.icon_id as u32;
            let (raw_bytes, ext) = icon.wrap_payload(data);
            records.push(IconRecord {
                raw_bytes,
                resource_id,
                group_index: Some(group_index as u32),
                synthetic_filename: synthetic_filename(&stem, &group_name, resource_id, ext),
                original_filename: path.to_path_buf(),
            });
        }
    }

    Ok(records)
}

fn read_resource_table(bytes: &[u8], table: usize) -> Result<Vec<NeResource<'_>>, ExtractorError> {
    let shift = le_u16(bytes, table)?;
    if shift > MAX_ALIGN_SHIFT {
        return Err(ExtractorError::Decode(format!("资源对齐位移无效: {}", shift)));
    }

    let mut resources = Vec::new();
    let mut cursor = table + 2;

    loop {
        let type_id = le_u16(bytes, cursor)?;
        if type_id == 0 {
            break;
        }
        let count = le_u16(bytes, cursor + 2)? as usize;
        cursor += TYPEINFO_SIZE;

        for _ in 0..count {
            let offset = (le_u16(bytes, cursor)? as usize) << shift;
            let length = (le_u16(bytes, cursor + 2)? as usize) << shift;
            let raw_id = le_u16(bytes, cursor + 6)?;
            cursor += NAMEINFO_SIZE;

            let id = if raw_id & INTEGER_ID_FLAG != 0 {
                NeResourceId::Ordinal(raw_id & !INTEGER_ID_FLAG)
            } else {
                NeResourceId::Name(read_pascal_string(bytes, table + raw_id as usize)?)
            };

            // 对齐后的长度可能超出文件末尾
            let data = bytes
                .get(offset..)
                .map(|rest| &rest[..length.min(rest.len())])
                .unwrap_or(&[]);

            resources.push(NeResource { type_id, id, data });
        }
    }

    Ok(resources)
}

/// u8 长度 + ASCII 字符
fn read_pascal_string(bytes: &[u8], offset: usize) -> Result<String, ExtractorError> {
    let len = *bytes
        .get(offset)
        .ok_or_else(|| ExtractorError::Decode(format!("资源名越界: {:#x}", offset)))?
        as usize;
    let raw = slice_at(bytes, offset + 1, len)?;
    Ok(String::from_utf8_lossy(raw).to_string())
}

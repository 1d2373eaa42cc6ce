//! PE (DLL/EXE) 资源树中的图标提取
//!
//! goblin 负责 PE 头与节表映射，资源树 (类型 → 名称 → 语言) 在这里按层遍历。

use super::group::{self, le_u16, le_u32, parse_group_icon_dir, slice_at, synthetic_filename};
use super::models::IconRecord;
use crate::modules::common::error::ExtractorError;
use crate::modules::common::utils;
use byteorder::{ByteOrder, LittleEndian};
use goblin::pe::options::ParseOptions;
use goblin::pe::resource::{ImageResourceDirectory, ResourceEntry, RT_GROUP_ICON, RT_ICON};
use goblin::pe::PE;
use std::collections::HashMap;
use std::path::Path;

const DIRECTORY_HEADER_SIZE: usize = 16;
const DATA_ENTRY_SIZE: usize = 16;

/// 解析 PE 文件中的全部图标组
pub fn decode_pe(path: &Path, bytes: &[u8]) -> Result<Vec<IconRecord>, ExtractorError> {
    let mut opts = ParseOptions::default();
    opts.parse_imports = false;
    opts.parse_resources = false;
    opts.parse_tls_data = false;
    opts.parse_attribute_certificates = false;

    let pe = PE::parse_with_opts(bytes, &opts)?;
    let optional = pe
        .header
        .optional_header
        .as_ref()
        .ok_or_else(|| ExtractorError::Decode("缺少可选头".to_string()))?;

    let resource_table = match optional.data_directories.get_resource_table() {
        Some(dd) if dd.virtual_address != 0 && dd.size != 0 => *dd,
        _ => {
            tracing::debug!("{} 没有资源表", path.display());
            return Ok(Vec::new());
        }
    };

    let file_alignment = optional.windows_fields.file_alignment;
    let rva_to_offset = |rva: u32| {
        goblin::pe::utils::find_offset(rva as usize, &pe.sections, file_alignment, &opts)
    };

    let base = rva_to_offset(resource_table.virtual_address).ok_or_else(|| {
        ExtractorError::Decode(format!(
            "资源表 RVA {:#x} 无法映射到文件偏移",
            resource_table.virtual_address
        ))
    })?;
    let resources = bytes
        .get(base..)
        .ok_or_else(|| ExtractorError::Decode("资源表越界".to_string()))?;

    collect_icons(path, bytes, resources, rva_to_offset)
}

/// 遍历资源树，按图标组顺序输出 RT_ICON 记录
///
/// `resources` 从资源目录根开始；数据项中的 RVA 经 `rva_to_offset` 映射到 `file` 中。
pub(crate) fn collect_icons<F>(
    path: &Path,
    file: &[u8],
    resources: &[u8],
    rva_to_offset: F,
) -> Result<Vec<IconRecord>, ExtractorError>
where
    F: Fn(u32) -> Option<usize>,
{
    let root = read_directory(resources, 0)?;
    let icon_type = root
        .iter()
        .find(|e| e.id() == Some(RT_ICON) && e.data_is_directory());
    let group_type = root
        .iter()
        .find(|e| e.id() == Some(RT_GROUP_ICON) && e.data_is_directory());

    let (icon_type, group_type) = match (icon_type, group_type) {
        (Some(icons), Some(groups)) => (icons, groups),
        _ => return Ok(Vec::new()),
    };

    let mut icons: HashMap<u16, &[u8]> = HashMap::new();
    for entry in read_directory(resources, icon_type.offset_to_directory() as usize)? {
        let Some(id) = entry.id() else { continue };
        match resource_data(file, resources, &entry, &rva_to_offset) {
            Ok(data) => {
                icons.insert(id, data);
            }
            Err(e) => tracing::debug!("RT_ICON {} 读取失败: {}", id, e),
        }
    }

    let stem = utils::file_stem_of(path);
    let mut records = Vec::new();

    for entry in read_directory(resources, group_type.offset_to_directory() as usize)? {
        let group_name = match entry.id() {
            Some(id) => id.to_string(),
            None => group::sanitize_group_name(&read_name(resources, entry.name_offset() as usize)?),
        };

        let entries = match resource_data(file, resources, &entry, &rva_to_offset)
            .and_then(parse_group_icon_dir)
        {
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
                group_index: None,
                synthetic_filename: synthetic_filename(&stem, &group_name, resource_id, ext),
                original_filename: path.to_path_buf(),
            });
        }
    }

    Ok(records)
}

/// 读取一层资源目录的全部条目
fn read_directory(resources: &[u8], offset: usize) -> Result<Vec<ResourceEntry>, ExtractorError> {
    slice_at(resources, offset, DIRECTORY_HEADER_SIZE)?;

    let directory = ImageResourceDirectory {
        number_of_named_entries: le_u16(resources, offset + 12)?,
        number_of_id_entries: le_u16(resources, offset + 14)?,
        ..ImageResourceDirectory::default()
    };

    let entries = directory
        .next_iter(offset + DIRECTORY_HEADER_SIZE, resources)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(entries)
}

/// 名称层条目 → 第一个语言条目 → 数据
fn resource_data<'a, F>(
    file: &'a [u8],
    resources: &[u8],
    entry: &ResourceEntry,
    rva_to_offset: &F,
) -> Result<&'a [u8], ExtractorError>
where
    F: Fn(u32) -> Option<usize>,
{
    if !entry.data_is_directory() {
        return Err(ExtractorError::Decode("名称层条目不是目录".to_string()));
    }

    let languages = read_directory(resources, entry.offset_to_directory() as usize)?;
    let data_offset = languages
        .first()
        .and_then(|language| language.offset_to_data())
        .ok_or_else(|| ExtractorError::Decode("缺少语言数据项".to_string()))?
        as usize;

    slice_at(resources, data_offset, DATA_ENTRY_SIZE)?;
    let rva = le_u32(resources, data_offset)?;
    let size = le_u32(resources, data_offset + 4)? as usize;

    let offset = rva_to_offset(rva).ok_or_else(|| {
        ExtractorError::Decode(format!("数据 RVA {:#x} 无法映射到文件偏移", rva))
    })?;

    slice_at(file, offset, size)
}

/// 资源名：u16 长度 + UTF-16LE 字符
fn read_name(resources: &[u8], offset: usize) -> Result<String, ExtractorError> {
    let len = le_u16(resources, offset)? as usize;
    let raw = slice_at(resources, offset + 2, len * 2)?;
    let mut units = vec![0u16; len];
    LittleEndian::read_u16_into(raw, &mut units);

    Ok(String::from_utf16_lossy(&units))
}

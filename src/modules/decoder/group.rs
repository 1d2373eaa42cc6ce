//! 图标组目录 (GRPICONDIR) 解析与负载封装
//!
//! PE 与 NE 容器中的 RT_GROUP_ICON 资源布局相同：
//! 6 字节头 + 每项 14 字节，每项通过 `icon_id` 引用一个 RT_ICON 资源。

use crate::modules::common::error::ExtractorError;
use byteorder::{ByteOrder, LittleEndian};

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G'];
const GROUP_HEADER_SIZE: usize = 6;
const GROUP_ENTRY_SIZE: usize = 14;
const ICO_HEADER_SIZE: u32 = 6 + 16;

/// 图标组中的一项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupIconEntry {
    pub width: u8,
    pub height: u8,
    pub color_count: u8,
    pub planes: u16,
    pub bit_count: u16,
    pub bytes_in_res: u32,
    pub icon_id: u16,
}

impl GroupIconEntry {
    /// 由实际尺寸构造（>= 256 按目录约定记为 0）
    pub fn from_dimensions(width: u32, height: u32, bit_count: u16, data_len: usize) -> Self {
        Self {
            width: dimension_byte(width),
            height: dimension_byte(height),
            color_count: 0,
            planes: 1,
            bit_count,
            bytes_in_res: data_len as u32,
            icon_id: 0,
        }
    }

    /// 将图像数据转换为可独立解码的负载，返回 (字节, 扩展名)
    ///
    /// PNG 原样保留；DIB 没有自描述头，封装为单图 ICO。
    pub fn wrap_payload(&self, data: &[u8]) -> (Vec<u8>, &'static str) {
        let declared = self.bytes_in_res as usize;
        let data = if declared > 0 && declared < data.len() {
            &data[..declared]
        } else {
            data
        };

        if data.starts_with(PNG_SIGNATURE) {
            return (data.to_vec(), "png");
        }

        (self.wrap_dib_as_ico(data), "ico")
    }

    fn wrap_dib_as_ico(&self, dib: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(ICO_HEADER_SIZE as usize + dib.len());

        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.push(self.width);
        out.push(self.height);
        out.push(self.color_count);
        out.push(0);
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bit_count.to_le_bytes());
        out.extend_from_slice(&(dib.len() as u32).to_le_bytes());
        out.extend_from_slice(&ICO_HEADER_SIZE.to_le_bytes());
        out.extend_from_slice(dib);

        out
    }
}

fn dimension_byte(value: u32) -> u8 {
    if value >= 256 {
        0
    } else {
        value as u8
    }
}

/// 解析 GRPICONDIR
pub fn parse_group_icon_dir(data: &[u8]) -> Result<Vec<GroupIconEntry>, ExtractorError> {
    let resource_type = le_u16(data, 2)?;
    if resource_type != 1 {
        return Err(ExtractorError::Decode(format!(
            "图标组类型无效: {}",
            resource_type
        )));
    }

    let count = le_u16(data, 4)? as usize;
    let mut entries = Vec::with_capacity(count);

    for index in 0..count {
        let offset = GROUP_HEADER_SIZE + index * GROUP_ENTRY_SIZE;
        let raw = slice_at(data, offset, GROUP_ENTRY_SIZE)?;

        entries.push(GroupIconEntry {
            width: raw[0],
            height: raw[1],
            color_count: raw[2],
            planes: LittleEndian::read_u16(&raw[4..6]),
            bit_count: LittleEndian::read_u16(&raw[6..8]),
            bytes_in_res: LittleEndian::read_u32(&raw[8..12]),
            icon_id: LittleEndian::read_u16(&raw[12..14]),
        });
    }

    Ok(entries)
}

/// 组名用作导出文件名的中间段
///
/// `_` 会破坏命名约定，路径分隔符、保留字符与控制字符会让文件名逃出目标目录
/// 或在 Windows 上无法创建，统一替换为 `-`。全由 `.` 组成的名称同样替换。
pub fn sanitize_group_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '_' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();

    if cleaned.is_empty() {
        "-".to_string()
    } else if cleaned.chars().all(|c| c == '.') {
        cleaned.replace('.', "-")
    } else {
        cleaned
    }
}

pub fn synthetic_filename(stem: &str, group: &str, resource_id: u32, ext: &str) -> String {
    format!("{}_{}_{}.{}", stem, group, resource_id, ext)
}

pub(crate) fn slice_at(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8], ExtractorError> {
    offset
        .checked_add(len)
        .and_then(|end| bytes.get(offset..end))
        .ok_or_else(|| {
            ExtractorError::Decode(format!("数据越界: 偏移 {:#x} 长度 {}", offset, len))
        })
}

pub(crate) fn le_u16(bytes: &[u8], offset: usize) -> Result<u16, ExtractorError> {
    slice_at(bytes, offset, 2).map(LittleEndian::read_u16)
}

pub(crate) fn le_u32(bytes: &[u8], offset: usize) -> Result<u32, ExtractorError> {
    slice_at(bytes, offset, 4).map(LittleEndian::read_u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_bytes(ids: &[u16]) -> Vec<u8> {
        let mut data = vec![0, 0, 1, 0, ids.len() as u8, 0];
        for id in ids {
            data.extend_from_slice(&[16, 16, 0, 0, 1, 0, 32, 0]);
            data.extend_from_slice(&1128u32.to_le_bytes());
            data.extend_from_slice(&id.to_le_bytes());
        }
        data
    }

    #[test]
    fn parses_group_entries_in_order() {
        let entries = parse_group_icon_dir(&group_bytes(&[7, 3])).unwrap_or_default();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].icon_id, 7);
        assert_eq!(entries[1].icon_id, 3);
        assert_eq!(entries[0].width, 16);
        assert_eq!(entries[0].bit_count, 32);
        assert_eq!(entries[0].bytes_in_res, 1128);
    }

    #[test]
    fn truncated_group_is_an_error() {
        let mut data = group_bytes(&[1, 2]);
        data.truncate(data.len() - 3);
        assert!(parse_group_icon_dir(&data).is_err());
    }

    #[test]
    fn png_payload_is_kept_verbatim() {
        let entry = GroupIconEntry::from_dimensions(256, 256, 32, 0);
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3];
        let (bytes, ext) = entry.wrap_payload(&png);
        assert_eq!(ext, "png");
        assert_eq!(bytes, png.to_vec());
    }

    #[test]
    fn dib_payload_is_wrapped_as_single_image_ico() {
        let entry = GroupIconEntry::from_dimensions(32, 32, 32, 4);
        let dib = [40u8, 0, 0, 0];
        let (bytes, ext) = entry.wrap_payload(&dib);

        assert_eq!(ext, "ico");
        assert_eq!(&bytes[..6], &[0, 0, 1, 0, 1, 0]);
        assert_eq!(bytes[6], 32);
        assert_eq!(LittleEndian::read_u32(&bytes[14..18]), 4);
        assert_eq!(LittleEndian::read_u32(&bytes[18..22]), 22);
        assert_eq!(&bytes[22..], &dib);
    }

    #[test]
    fn group_names_lose_underscores() {
        assert_eq!(sanitize_group_name("MAIN_ICON"), "MAIN-ICON");
        assert_eq!(sanitize_group_name("Icon.Main"), "Icon.Main");
        assert_eq!(synthetic_filename("shell32", "3", 17, "ico"), "shell32_3_17.ico");
    }

    #[test]
    fn group_names_cannot_form_path_segments() {
        assert_eq!(sanitize_group_name("../../esc"), "..-..-esc");
        assert_eq!(sanitize_group_name("..\\win"), "..-win");
        assert_eq!(sanitize_group_name("C:*?\"<>|"), "C-------");
        assert_eq!(sanitize_group_name("tab\tname"), "tab-name");
        assert_eq!(sanitize_group_name(".."), "--");
        assert_eq!(sanitize_group_name("."), "-");
        assert_eq!(sanitize_group_name(""), "-");
    }
}

//! 图标容器解码
//!
//! 按文件头识别 ICO / PE / NE 容器，输出原始图标记录。
//! 任何解析失败都只记录 debug 日志并返回空结果，不向调用方传播。

pub mod group;
pub mod ico;
pub mod models;
pub mod ne;
pub mod pe;

pub use models::{ContainerKind, IconRecord};

use crate::modules::common::error::ExtractorError;
use group::{le_u16, le_u32};
use std::path::Path;

const ICO_MAGIC: [u8; 4] = [0x00, 0x00, 0x01, 0x00];
const MZ_MAGIC: [u8; 2] = *b"MZ";
const PE_MAGIC: [u8; 4] = *b"PE\0\0";
const NE_MAGIC: [u8; 2] = *b"NE";
const E_LFANEW_OFFSET: usize = 0x3C;

/// 图标解码器：一个文件路径 → 零或多条原始图标记录
///
/// 实现必须吞掉格式错误，空结果即表示"不可解码"。
pub trait IconDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Vec<IconRecord>;
}

/// 内置的容器解码器
#[derive(Debug, Default, Clone, Copy)]
pub struct ContainerDecoder;

impl ContainerDecoder {
    pub fn new() -> Self {
        Self
    }

    /// 保留错误信息的解码入口
    pub fn try_decode(&self, path: &Path) -> Result<Vec<IconRecord>, ExtractorError> {
        let bytes = std::fs::read(path)?;

        match sniff_container(&bytes) {
            Some(ContainerKind::Ico) => ico::decode_ico(path, &bytes),
            Some(ContainerKind::Pe) => pe::decode_pe(path, &bytes),
            Some(ContainerKind::Ne(offset)) => ne::decode_ne(path, &bytes, offset),
            None => Err(ExtractorError::UnsupportedFormat(format!(
                "{} 不是图标容器",
                path.display()
            ))),
        }
    }
}

impl IconDecoder for ContainerDecoder {
    fn decode(&self, path: &Path) -> Vec<IconRecord> {
        match self.try_decode(path) {
            Ok(records) => {
                tracing::debug!("{}: {} 个图标记录", path.display(), records.len());
                records
            }
            Err(e) => {
                tracing::debug!("跳过 {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }
}

/// 按文件头识别容器类型
pub fn sniff_container(bytes: &[u8]) -> Option<ContainerKind> {
    if bytes.starts_with(&ICO_MAGIC) {
        return Some(ContainerKind::Ico);
    }
    if !bytes.starts_with(&MZ_MAGIC) {
        return None;
    }

    let header = le_u32(bytes, E_LFANEW_OFFSET).ok()? as usize;
    let signature = bytes.get(header..)?;
    if signature.starts_with(&PE_MAGIC) {
        Some(ContainerKind::Pe)
    } else if signature.starts_with(&NE_MAGIC) {
        // NE 头至少要容纳资源表与常驻名表两个偏移字段
        le_u16(bytes, header + 0x26).ok()?;
        Some(ContainerKind::Ne(header))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("iconsext-decoder-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap_or_else(|e| panic!("create temp dir: {}", e));
        dir
    }

    #[test]
    fn sniff_recognizes_each_container() {
        assert_eq!(sniff_container(&[0, 0, 1, 0, 1, 0]), Some(ContainerKind::Ico));

        let icl = ne::tests::build_icl(&[1, 2, 3], &[4, 5, 6]);
        assert_eq!(sniff_container(&icl), Some(ContainerKind::Ne(64)));

        let mut pe = vec![0u8; 0x48];
        pe[0..2].copy_from_slice(b"MZ");
        pe[0x3C..0x40].copy_from_slice(&0x40u32.to_le_bytes());
        pe[0x40..0x44].copy_from_slice(b"PE\0\0");
        assert_eq!(sniff_container(&pe), Some(ContainerKind::Pe));
    }

    #[test]
    fn sniff_rejects_other_files() {
        assert_eq!(sniff_container(b""), None);
        assert_eq!(sniff_container(b"plain text"), None);
        assert_eq!(sniff_container(&[0, 0, 2, 0, 1, 0]), None);
        // e_lfanew 指向文件之外
        let mut truncated = vec![0u8; 0x40];
        truncated[0..2].copy_from_slice(b"MZ");
        truncated[0x3C..0x40].copy_from_slice(&0x1000u32.to_le_bytes());
        assert_eq!(sniff_container(&truncated), None);
    }

    #[test]
    fn undecodable_files_yield_nothing() {
        let dir = temp_dir();
        let text = dir.join("notes.txt");
        std::fs::write(&text, "not an icon").unwrap_or_else(|e| panic!("write: {}", e));

        let decoder = ContainerDecoder::new();
        assert!(decoder.decode(&text).is_empty());
        assert!(decoder.decode(&dir.join("missing.ico")).is_empty());
        assert!(decoder.try_decode(&text).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn icl_file_decodes_through_the_adapter() {
        let dir = temp_dir();
        let icon = ne::tests::png_bytes([10, 20, 30, 255]);
        let path = dir.join("icons.icl");
        std::fs::write(&path, ne::tests::build_icl(&icon, &icon))
            .unwrap_or_else(|e| panic!("write: {}", e));

        let records = ContainerDecoder::new().decode(&path);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.original_filename == path));
        assert_eq!(records[1].group_index, Some(1));

        let _ = std::fs::remove_dir_all(&dir);
    }
}

use std::path::PathBuf;

/// 图标容器类型（按文件头识别）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// 独立 .ico 文件
    Ico,
    /// 32/64 位 PE 文件 (DLL/EXE)
    Pe,
    /// 16 位 NE 文件 (ICL 图标库)，携带 NE 头偏移
    Ne(usize),
}

/// 解码器产出的一条原始图标记录
///
/// `synthetic_filename` 约定为 `<base>_<p1>_<p2>.<ext>`，
/// 其中 p1 为图标组名，p2 为图标资源 ID。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRecord {
    /// 编码后的位图数据 (PNG 或单图 ICO)
    pub raw_bytes: Vec<u8>,
    pub resource_id: u32,
    /// 仅多组容器 (ICL) 提供
    pub group_index: Option<u32>,
    pub synthetic_filename: String,
    /// 来源容器路径
    pub original_filename: PathBuf,
}

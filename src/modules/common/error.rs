use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("未找到: {0}")]
    NotFound(String),

    #[error("文件系统错误: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("无法识别的图像格式: {0}")]
    UnsupportedFormat(String),

    #[error("不支持的颜色模式: {0}")]
    UnsupportedMode(String),

    #[error("容器解析错误: {0}")]
    Decode(String),

    #[error("PNG 编码错误: {0}")]
    Encode(String),

    #[error("未选择任何图标")]
    NothingSelected,

    #[error("序列化错误: {0}")]
    Serde(String),

    #[error("其他错误: {0}")]
    Other(String),
}

impl From<goblin::error::Error> for ExtractorError {
    fn from(error: goblin::error::Error) -> Self {
        ExtractorError::Decode(error.to_string())
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(error: serde_json::Error) -> Self {
        ExtractorError::Serde(error.to_string())
    }
}

impl serde::Serialize for ExtractorError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

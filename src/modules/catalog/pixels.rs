//! 原始图标字节 → 规范化像素缓冲区
//!
//! 规范布局：每像素 3 (RGB) 或 4 (RGBA) 字节，8 位采样，行间无填充，
//! `stride = width * (3 + has_alpha)`。

use crate::modules::common::error::ExtractorError;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};
use serde::Serialize;

pub const BITS_PER_SAMPLE: u8 = 8;

/// 颜色空间，目前只有 RGB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Colorspace {
    #[default]
    Rgb,
}

/// 已解码的位图
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub colorspace: Colorspace,
    pub bits_per_sample: u8,
    pub has_alpha: bool,
    /// 每行字节数
    pub stride: usize,
    #[serde(skip)]
    pub samples: Vec<u8>,
}

impl PixelBuffer {
    /// 从任意行距的采样数据构建，必要时重排为规范行距
    pub fn from_samples(
        width: u32,
        height: u32,
        has_alpha: bool,
        samples: &[u8],
        source_stride: usize,
    ) -> Result<Self, ExtractorError> {
        let stride = canonical_stride(width, has_alpha);
        let samples = repack(samples, height, stride, source_stride)?;

        Ok(Self {
            width,
            height,
            colorspace: Colorspace::Rgb,
            bits_per_sample: BITS_PER_SAMPLE,
            has_alpha,
            stride,
            samples,
        })
    }

    pub fn channels(&self) -> usize {
        if self.has_alpha {
            4
        } else {
            3
        }
    }
}

/// `width * (3 + has_alpha)`
pub fn canonical_stride(width: u32, has_alpha: bool) -> usize {
    width as usize * if has_alpha { 4 } else { 3 }
}

/// 去掉每行末尾的填充字节
pub fn repack(
    samples: &[u8],
    height: u32,
    stride: usize,
    source_stride: usize,
) -> Result<Vec<u8>, ExtractorError> {
    if source_stride < stride {
        return Err(ExtractorError::Decode(format!(
            "源行距 {} 小于行长度 {}",
            source_stride, stride
        )));
    }

    let rows = height as usize;
    // 最后一行可以不带填充
    let required = match rows {
        0 => 0,
        _ => source_stride * (rows - 1) + stride,
    };
    if samples.len() < required {
        return Err(ExtractorError::Decode(format!(
            "采样数据不足: 需要 {} 字节，实际 {} 字节",
            required,
            samples.len()
        )));
    }

    if source_stride == stride {
        return Ok(samples[..stride * rows].to_vec());
    }

    let mut packed = Vec::with_capacity(stride * rows);
    for row in 0..rows {
        let start = row * source_stride;
        packed.extend_from_slice(&samples[start..start + stride]);
    }
    Ok(packed)
}

/// 解码一条图标记录的原始字节
///
/// 只接受 RGB8 / RGBA8，其余颜色模式 (调色板展开后的灰度、16 位等) 返回 `UnsupportedMode`。
pub fn build_pixel_buffer(raw_bytes: &[u8]) -> Result<PixelBuffer, ExtractorError> {
    let image = image::load_from_memory(raw_bytes)
        .map_err(|e| ExtractorError::UnsupportedFormat(e.to_string()))?;

    let (width, height, has_alpha, samples) = match image {
        DynamicImage::ImageRgba8(buffer) => (buffer.width(), buffer.height(), true, buffer.into_raw()),
        DynamicImage::ImageRgb8(buffer) => (buffer.width(), buffer.height(), false, buffer.into_raw()),
        other => {
            return Err(ExtractorError::UnsupportedMode(format!("{:?}", other.color())));
        }
    };

    let source_stride = canonical_stride(width, has_alpha);
    PixelBuffer::from_samples(width, height, has_alpha, &samples, source_stride)
}

/// 将像素缓冲区编码为 PNG
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, ExtractorError> {
    let color = if buffer.has_alpha {
        ExtendedColorType::Rgba8
    } else {
        ExtendedColorType::Rgb8
    };

    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(&buffer.samples, buffer.width, buffer.height, color)
        .map_err(|e| ExtractorError::Encode(e.to_string()))?;
    Ok(out)
}

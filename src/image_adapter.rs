//! # 图像适配层
//!
//! 把图像文件展开为连续的通道字节 (载体)，以及把修改后的载体重新写回图像。
//! 隐写逻辑只依赖 [`ImageCodec`]，不关心具体的图像格式。

use crate::constants::OUTPUT_EXTENSION;
use crate::error::{Result, StegError};
use image::{DynamicImage, GrayAlphaImage, GrayImage, ImageFormat, RgbImage, RgbaImage};
use log::debug;
use std::path::{Path, PathBuf};

/// 从图像中展开的载体。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    /// 每个像素占用的通道字节数，例如 RGBA 为 4。
    pub stride: usize,
    /// 按行展开的全部通道字节。
    pub bytes: Vec<u8>,
}

/// 载体与图像文件之间的转换。
pub trait ImageCodec {
    /// 读取 `path` 处的图像并展开为载体。
    fn decode(&self, path: &Path) -> Result<Carrier>;

    /// 以 `reference` 的宽高为准，把 `carrier` 写入 `output`，返回实际写入的路径。
    fn encode(&self, output: &Path, reference: &Path, carrier: Carrier) -> Result<PathBuf>;
}

/// 基于 `image` crate 的实现。
///
/// 8 位的灰度、灰度 + Alpha、RGB 与 RGBA 图像按原样展开，其余像素格式先转换为 RGBA8。
/// 输出一律保存为 PNG，只有无损格式才能保留最低位。
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageAdapter;

impl ImageCodec for ImageAdapter {
    fn decode(&self, path: &Path) -> Result<Carrier> {
        if !path.exists() {
            return Err(StegError::CarrierNotFound(path.to_path_buf()));
        }

        let img = image::open(path).map_err(|source| StegError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;

        let img = match img {
            DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageRgb8(_)
            | DynamicImage::ImageRgba8(_) => img,
            other => DynamicImage::ImageRgba8(other.to_rgba8()),
        };

        let stride = usize::from(img.color().channel_count());
        let bytes = img.into_bytes();
        debug!(
            "Decoded {}: {} carrier bytes, {} per pixel",
            path.display(),
            bytes.len(),
            stride
        );

        Ok(Carrier { stride, bytes })
    }

    fn encode(&self, output: &Path, reference: &Path, carrier: Carrier) -> Result<PathBuf> {
        if !reference.exists() {
            return Err(StegError::CarrierNotFound(reference.to_path_buf()));
        }

        let (width, height) =
            image::image_dimensions(reference).map_err(|source| StegError::ImageDecode {
                path: reference.to_path_buf(),
                source,
            })?;

        let Carrier { stride, bytes } = carrier;
        let expected = width as usize * height as usize * stride;
        let actual = bytes.len();

        let img = match stride {
            1 => GrayImage::from_raw(width, height, bytes).map(DynamicImage::ImageLuma8),
            2 => GrayAlphaImage::from_raw(width, height, bytes).map(DynamicImage::ImageLumaA8),
            3 => RgbImage::from_raw(width, height, bytes).map(DynamicImage::ImageRgb8),
            4 => RgbaImage::from_raw(width, height, bytes).map(DynamicImage::ImageRgba8),
            other => return Err(StegError::UnsupportedPixelStride(other)),
        };
        // from_raw 只拒绝过短的缓冲区，过长的也视为不匹配
        let img = img
            .filter(|_| actual == expected)
            .ok_or(StegError::GeometryMismatch { expected, actual })?;

        let output = output.with_extension(OUTPUT_EXTENSION);
        img.save_with_format(&output, ImageFormat::Png)
            .map_err(|source| StegError::ImageEncode {
                path: output.clone(),
                source,
            })?;
        debug!("Encoded {} ({}x{})", output.display(), width, height);

        Ok(output)
    }
}

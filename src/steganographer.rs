//! # 隐写流程
//!
//! 组合 [`Header`] 与位级编解码：头部写在载体开头，数据紧随其后。
//! 每次调用都独立持有自己的头部和载体，调用之间不共享任何状态。

use crate::constants::{BITS_USED, BYTE_LEN, DEFAULT_OUTPUT_SUFFIX, FIXED_HEADER_LEN, OUTPUT_EXTENSION};
use crate::error::{Result, StegError};
use crate::header::{Header, HeaderError, HeaderPrefix};
use crate::image_adapter::{Carrier, ImageAdapter, ImageCodec};
use crate::steganography::{hide_data, reveal_data};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// 数据超出载体容量时的处理方式。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CapacityPolicy {
    /// 尽量写入，超出部分被截断。
    #[default]
    Truncate,
    /// 在写入任何文件之前报错。
    Reject,
}

/// 从载体中揭示出的头部和数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revealed {
    pub header: Header,
    pub data: Vec<u8>,
}

impl Revealed {
    /// 头部是否携带文件名，即隐藏的是文件而不是消息。
    pub fn is_file(&self) -> bool {
        !self.header.file_name.is_empty()
    }
}

/// 长度为 `carrier_len` 的载体在写入头部后还能完整容纳的数据字节数。
pub fn capacity(carrier_len: usize, file_name_len: usize) -> usize {
    (carrier_len / BYTE_LEN).saturating_sub(FIXED_HEADER_LEN + file_name_len)
}

/// 把头部和 `payload` 藏入 `carrier`，返回与载体等长的新缓冲区。
///
/// # Errors
///
/// * 文件名过长时返回头部错误。
/// * `policy` 为 [`CapacityPolicy::Reject`] 且头部与数据放不下时返回
///   [`StegError::InsufficientCapacity`]，头部本身放不下也算在内。
pub fn embed(
    carrier: &[u8],
    payload: &[u8],
    file_name: &str,
    policy: CapacityPolicy,
) -> Result<Vec<u8>> {
    let header = Header::new(payload.len() as u64, BITS_USED, file_name);
    let header_bytes = header.to_bytes()?;
    debug!("Built header: {:?}", header);

    let needed = header.len() + payload.len();
    let available = carrier.len() / BYTE_LEN;
    if needed > available {
        match policy {
            CapacityPolicy::Reject => {
                return Err(StegError::InsufficientCapacity { needed, available });
            }
            CapacityPolicy::Truncate => warn!(
                "Header and payload need {} bytes but the carrier holds {}, hidden data will be truncated",
                needed, available
            ),
        }
    }

    let (head, body) = carrier.split_at(header.carrier_len().min(carrier.len()));
    let mut hidden = hide_data(head, &header_bytes);
    hidden.extend(hide_data(body, payload));

    Ok(hidden)
}

/// 从 `carrier` 中揭示头部和数据。
///
/// 头部分两步读取：先读固定的 18 字节得知文件名长度，有文件名时再读完整头部。
/// 载体放不下完整文件名时，只保留读出的部分 (非法 UTF-8 以替换字符代替)，数据为空。
///
/// # Errors
///
/// * 载体中没有合法的标识符时返回 [`StegError::NoHiddenData`]。
/// * 位数不为 1 或头部其余字段非法时返回头部错误。
pub fn extract(carrier: &[u8]) -> Result<Revealed> {
    let prefix = HeaderPrefix::parse(&reveal_data(carrier, FIXED_HEADER_LEN))?;
    if prefix.bits_used != BITS_USED {
        return Err(HeaderError::UnsupportedBitDepth(prefix.bits_used).into());
    }

    let header_len = prefix.header_len();
    let header = if prefix.file_name_len == 0 {
        Header::from(prefix)
    } else {
        let raw = reveal_data(carrier, header_len);
        if raw.len() < header_len {
            warn!(
                "Header needs {} bytes but the carrier only holds {}, file name is truncated",
                header_len,
                raw.len()
            );
            let name = raw.get(FIXED_HEADER_LEN..).unwrap_or_default();
            Header::new(
                prefix.data_len,
                prefix.bits_used,
                String::from_utf8_lossy(name),
            )
        } else {
            Header::parse(&raw)?
        }
    };
    debug!("Decoded header: {:?}", header);

    let body = carrier.get(header_len * BYTE_LEN..).unwrap_or_default();
    let expected = usize::try_from(header.data_len).unwrap_or(usize::MAX);
    let data = reveal_data(body, expected);

    if data.len() < expected {
        warn!(
            "Header announces {} bytes but the carrier only holds {}, revealed data is truncated",
            expected,
            data.len()
        );
    }

    Ok(Revealed { header, data })
}

/// 未指定输出路径时使用的路径：`<载体文件名>Steganogrified.png`，与载体位于同一目录。
pub fn default_output_path(carrier_path: &Path) -> PathBuf {
    let stem = carrier_path.file_stem().unwrap_or_default().to_string_lossy();
    carrier_path.with_file_name(format!("{stem}{DEFAULT_OUTPUT_SUFFIX}.{OUTPUT_EXTENSION}"))
}

/// 在图像中隐藏消息或文件，以及从图像中揭示它们。
#[derive(Debug, Default, Clone)]
pub struct Steganographer<C = ImageAdapter> {
    codec: C,
    policy: CapacityPolicy,
}

impl Steganographer<ImageAdapter> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: ImageCodec> Steganographer<C> {
    pub fn with_codec(codec: C) -> Self {
        Self {
            codec,
            policy: CapacityPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CapacityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 把 `text` 的 UTF-8 字节藏入 `carrier_path`，返回输出图像的路径。
    pub fn hide_message(&self, carrier_path: &Path, text: &str, output: Option<&Path>) -> Result<PathBuf> {
        self.hide(carrier_path, text.as_bytes(), "", output)
    }

    /// 把 `file_path` 的内容及其文件名藏入 `carrier_path`，返回输出图像的路径。
    ///
    /// 头部只记录文件名本身，不包含目录。
    pub fn hide_file(&self, carrier_path: &Path, file_path: &Path, output: Option<&Path>) -> Result<PathBuf> {
        let data = fs::read(file_path)?;
        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();

        self.hide(carrier_path, &data, &file_name, output)
    }

    /// 揭示 `carrier_path` 中隐藏的数据，由调用方决定按文本还是按文件处理。
    pub fn reveal(&self, carrier_path: &Path) -> Result<Revealed> {
        let carrier = self.codec.decode(carrier_path)?;
        extract(&carrier.bytes)
    }

    fn hide(&self, carrier_path: &Path, payload: &[u8], file_name: &str, output: Option<&Path>) -> Result<PathBuf> {
        let Carrier { stride, bytes } = self.codec.decode(carrier_path)?;
        let bytes = embed(&bytes, payload, file_name, self.policy)?;

        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_output_path(carrier_path));
        let written = self.codec.encode(&output, carrier_path, Carrier { stride, bytes })?;
        info!("Hid {} bytes in {}", payload.len(), written.display());

        Ok(written)
    }
}

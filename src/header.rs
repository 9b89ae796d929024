//! # 自描述头部
//!
//! 头部位于载体开头，同样以 LSB 方式隐藏，格式 (小端序)：
//!
//! | 字段 | 宽度 |
//! |---|---|
//! | 标识符 `STEGS` | 5 |
//! | 数据长度 | 10 |
//! | 每字节位数 | 1 |
//! | 文件名长度 | 2 |
//! | 文件名 (UTF-8) | 可变 |
//!
//! 头部的总长度取决于其中的文件名长度字段，所以读取分两步：
//! 先用 [`HeaderPrefix::parse`] 解出固定的 18 字节，再在得知文件名长度后用
//! [`Header::parse`] 解出完整头部。

use crate::constants::{
    BITS_USED_SIZE, BYTE_LEN, DATA_LEN_SIZE, FILE_NAME_LEN_SIZE, FIXED_HEADER_LEN, MAGIC,
};
use thiserror::Error;

const DATA_LEN_OFFSET: usize = MAGIC.len();
const BITS_USED_OFFSET: usize = DATA_LEN_OFFSET + DATA_LEN_SIZE;
const FILE_NAME_LEN_OFFSET: usize = BITS_USED_OFFSET + BITS_USED_SIZE;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("Header magic does not match, the carrier holds no hidden data")]
    BadMagic,

    #[error("Header is truncated: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },

    #[error("File name is {0} bytes long, the header allows at most 65535")]
    FileNameTooLong(usize),

    #[error("File name stored in the header is not valid UTF-8")]
    InvalidFileName,

    #[error("Data length stored in the header does not fit in 64 bits")]
    DataLenOverflow,

    #[error("Unsupported bit depth {0}, only 1 bit per carrier byte is supported")]
    UnsupportedBitDepth(u8),
}

/// 头部的固定部分，足以确定完整头部的长度。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderPrefix {
    pub data_len: u64,
    pub bits_used: u8,
    pub file_name_len: u16,
}

impl HeaderPrefix {
    /// 解析固定的 18 字节前缀，多余的字节被忽略。
    ///
    /// # Errors
    ///
    /// * 标识符不匹配时返回 [`HeaderError::BadMagic`]。
    /// * 字节数不足 18 时返回 [`HeaderError::Truncated`]。
    /// * 数据长度超出 `u64` 时返回 [`HeaderError::DataLenOverflow`]。
    ///
    /// `bits_used` 按原样读出，是否支持由调用方判断。
    pub fn parse(raw: &[u8]) -> Result<Self, HeaderError> {
        if raw.get(..MAGIC.len()) != Some(&MAGIC[..]) {
            return Err(HeaderError::BadMagic);
        }

        if raw.len() < FIXED_HEADER_LEN {
            return Err(HeaderError::Truncated {
                needed: FIXED_HEADER_LEN,
                actual: raw.len(),
            });
        }

        let mut data_len = [0u8; 16];
        data_len[..DATA_LEN_SIZE].copy_from_slice(&raw[DATA_LEN_OFFSET..BITS_USED_OFFSET]);
        let data_len = u64::try_from(u128::from_le_bytes(data_len))
            .map_err(|_| HeaderError::DataLenOverflow)?;

        let bits_used = raw[BITS_USED_OFFSET];

        let file_name_len = u16::from_le_bytes([
            raw[FILE_NAME_LEN_OFFSET],
            raw[FILE_NAME_LEN_OFFSET + 1],
        ]);

        Ok(Self {
            data_len,
            bits_used,
            file_name_len,
        })
    }

    /// 完整头部的字节长度。
    pub fn header_len(&self) -> usize {
        FIXED_HEADER_LEN + usize::from(self.file_name_len)
    }
}

/// 一次隐藏或揭示操作所用的头部，只存在于该次调用中。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub data_len: u64,
    pub bits_used: u8,
    pub file_name: String,
}

impl Header {
    pub fn new(data_len: u64, bits_used: u8, file_name: impl Into<String>) -> Self {
        Self {
            data_len,
            bits_used,
            file_name: file_name.into(),
        }
    }

    /// 直接序列化一个头部，等价于 `Header::new(..).to_bytes()`。
    pub fn generate(data_len: u64, bits_used: u8, file_name: &str) -> Result<Vec<u8>, HeaderError> {
        Self::new(data_len, bits_used, file_name).to_bytes()
    }

    /// 按 标识符、数据长度、位数、文件名长度、文件名 的顺序序列化。
    ///
    /// # Errors
    ///
    /// 文件名超过 65535 字节时返回 [`HeaderError::FileNameTooLong`]。
    pub fn to_bytes(&self) -> Result<Vec<u8>, HeaderError> {
        let file_name_len = u16::try_from(self.file_name.len())
            .map_err(|_| HeaderError::FileNameTooLong(self.file_name.len()))?;

        let mut bytes = Vec::with_capacity(self.len());
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&u128::from(self.data_len).to_le_bytes()[..DATA_LEN_SIZE]);
        bytes.push(self.bits_used);
        bytes.extend_from_slice(&file_name_len.to_le_bytes());
        bytes.extend_from_slice(self.file_name.as_bytes());

        Ok(bytes)
    }

    /// 解析完整头部，`raw` 至少要包含文件名长度字段所声明的全部字节。
    ///
    /// # Errors
    ///
    /// 除 [`HeaderPrefix::parse`] 的错误外，文件名字节不足时返回
    /// [`HeaderError::Truncated`]，不是合法 UTF-8 时返回 [`HeaderError::InvalidFileName`]。
    pub fn parse(raw: &[u8]) -> Result<Self, HeaderError> {
        let prefix = HeaderPrefix::parse(raw)?;
        let needed = prefix.header_len();

        let name = raw.get(FIXED_HEADER_LEN..needed).ok_or(HeaderError::Truncated {
            needed,
            actual: raw.len(),
        })?;
        let file_name = std::str::from_utf8(name).map_err(|_| HeaderError::InvalidFileName)?;

        Ok(Self::new(prefix.data_len, prefix.bits_used, file_name))
    }

    /// 头部的字节长度。
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        FIXED_HEADER_LEN + self.file_name.len()
    }

    /// 隐藏头部需要占用的载体字节数。
    pub fn carrier_len(&self) -> usize {
        self.len() * BYTE_LEN
    }
}

impl From<HeaderPrefix> for Header {
    fn from(prefix: HeaderPrefix) -> Self {
        Self::new(prefix.data_len, prefix.bits_used, String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_header_parses_back() {
        let bytes = Header::generate(42, 1, "f.txt").unwrap();
        assert_eq!(bytes.len(), FIXED_HEADER_LEN + 5);

        let header = Header::parse(&bytes).unwrap();
        assert_eq!(header.data_len, 42);
        assert_eq!(header.bits_used, 1);
        assert_eq!(header.file_name, "f.txt");
    }

    #[test]
    fn layout_is_little_endian() {
        let bytes = Header::generate(0x0102, 1, "ab").unwrap();
        assert_eq!(&bytes[..5], b"STEGS");
        assert_eq!(&bytes[5..15], &[0x02, 0x01, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(bytes[15], 1);
        assert_eq!(&bytes[16..18], &[2, 0]);
        assert_eq!(&bytes[18..], b"ab");
    }

    #[test]
    fn zeroed_buffer_has_bad_magic() {
        assert_eq!(Header::parse(&[0u8; 18]), Err(HeaderError::BadMagic));
        assert_eq!(HeaderPrefix::parse(b"STE"), Err(HeaderError::BadMagic));
    }

    #[test]
    fn prefix_reports_full_length() {
        let bytes = Header::generate(7, 1, "secret.bin").unwrap();
        let prefix = HeaderPrefix::parse(&bytes[..FIXED_HEADER_LEN]).unwrap();
        assert_eq!(prefix.file_name_len, 10);
        assert_eq!(prefix.header_len(), bytes.len());

        // 只有前缀时无法解出文件名
        assert_eq!(
            Header::parse(&bytes[..FIXED_HEADER_LEN]),
            Err(HeaderError::Truncated {
                needed: bytes.len(),
                actual: FIXED_HEADER_LEN
            })
        );
    }

    #[test]
    fn reserved_bit_depth_round_trips() {
        let bytes = Header::generate(1, 2, "a").unwrap();
        assert_eq!(Header::parse(&bytes), Ok(Header::new(1, 2, "a")));
    }

    #[test]
    fn rejects_oversized_data_len() {
        let mut bytes = Header::generate(0, 1, "").unwrap();
        bytes[14] = 1;
        assert_eq!(Header::parse(&bytes), Err(HeaderError::DataLenOverflow));
    }

    #[test]
    fn rejects_long_file_name() {
        let name = "x".repeat(usize::from(u16::MAX) + 1);
        assert_eq!(
            Header::generate(0, 1, &name),
            Err(HeaderError::FileNameTooLong(name.len()))
        );
    }

    #[test]
    fn rejects_invalid_utf8_file_name() {
        let mut bytes = Header::generate(0, 1, "ab").unwrap();
        bytes[18] = 0xFF;
        assert_eq!(Header::parse(&bytes), Err(HeaderError::InvalidFileName));
    }
}

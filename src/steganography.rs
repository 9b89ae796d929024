//! # 位级编解码
//!
//! 把数据字节逐位写入载体字节的最低有效位 (LSB)，以及反向读取。
//! 一个数据字节分散在 8 个载体字节中，最高位在前。

use crate::constants::BYTE_LEN;

/// 将 `value` 的 8 个位依次写入 `segment` 中各字节的最低位。
///
/// 第 `i` 个载体字节承载 `value` 的第 `7 - i` 位，其余 7 位保持不变。
pub fn hide_byte(mut segment: [u8; BYTE_LEN], value: u8) -> [u8; BYTE_LEN] {
    hide_bits(&mut segment, value);
    segment
}

/// 从最多 8 个载体字节中读出一个数据字节。
///
/// 片段不足 8 字节时，只能恢复对应的高位，缺失的低位补 0；空片段得到 0。
pub fn reveal_byte(segment: &[u8]) -> u8 {
    segment
        .iter()
        .take(BYTE_LEN)
        .enumerate()
        .fold(0u8, |acc, (i, &byte)| acc | ((byte & 1) << (BYTE_LEN - 1 - i)))
}

/// 就地写入，允许片段短于 8 字节 (只写入高位)。
fn hide_bits(segment: &mut [u8], value: u8) {
    for (i, byte) in segment.iter_mut().take(BYTE_LEN).enumerate() {
        if value & (0x80 >> i) != 0 {
            *byte |= 1;
        } else {
            *byte &= !1;
        }
    }
}

/// 将 `payload` 藏入 `carrier`，返回与载体等长的新缓冲区。
///
/// 载体容量不足时，最后一个放得下部分位的字节只保留高位，之后的数据被丢弃，不会报错。
/// 未使用的载体尾部原样复制。
pub fn hide_data(carrier: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut hidden = carrier.to_vec();

    hidden
        .chunks_mut(BYTE_LEN)
        .zip(payload)
        .for_each(|(segment, &value)| hide_bits(segment, value));

    hidden
}

/// 从 `carrier` 中读出最多 `expected_len` 个字节。
///
/// 与 [`hide_data`] 的截断方式对称：载体提前耗尽时，最后一个字节由不足 8 字节的片段
/// 得出 (低位补 0)，随后停止，因此返回长度可能小于 `expected_len`。
pub fn reveal_data(carrier: &[u8], expected_len: usize) -> Vec<u8> {
    carrier
        .chunks(BYTE_LEN)
        .take(expected_len)
        .map(reveal_byte)
        .collect()
}

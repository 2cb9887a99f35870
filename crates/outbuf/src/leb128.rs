//! LEB128 变长整数编码。
//!
//! # 模块定位（Why）
//! - 调试信息、字节码与部分目标格式使用 LEB128 表示长度与偏移，小数值只占 1 字节；
//! - 编码器产出规范（最短）形式；解码器用于校验产物或读取已有段，失败时返回可恢复错误。
//!
//! # 编码规则（How）
//! - 无符号：每次取低 7 位，逻辑右移 7 位；剩余值非零时置续位 `0x80`，至少输出 1 字节；
//! - 有符号：每次取低 7 位后算术右移 7 位；当剩余值为 `0` 且本字节第 6 位为 `0`，
//!   或剩余值为 `-1` 且第 6 位为 `1` 时，该字节即为末字节。

use crate::{Leb128Error, OutBuffer};

/// 64 位整数的 LEB128 编码最多占用的字节数。
pub const MAX_LEB128_LEN: usize = 10;

/// 将 `value` 以无符号 LEB128 编码写入 `out`，返回使用的前缀长度。
pub fn encode_uleb128(mut value: u64, out: &mut [u8; MAX_LEB128_LEN]) -> usize {
    let mut len = 0;
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out[len] = byte;
        len += 1;
        if value == 0 {
            return len;
        }
    }
}

/// 将 `value` 以有符号 LEB128 编码写入 `out`，返回使用的前缀长度。
pub fn encode_sleb128(mut value: i64, out: &mut [u8; MAX_LEB128_LEN]) -> usize {
    let mut len = 0;
    loop {
        let byte = (value & 0x7F) as u8;
        // 算术右移，保留符号位。
        value >>= 7;
        let sign_clear = byte & 0x40 == 0;
        if (value == 0 && sign_clear) || (value == -1 && !sign_clear) {
            out[len] = byte;
            return len + 1;
        }
        out[len] = byte | 0x80;
        len += 1;
    }
}

/// 无符号编码的字节长度。
pub fn uleb128_len(value: u64) -> usize {
    let mut scratch = [0u8; MAX_LEB128_LEN];
    encode_uleb128(value, &mut scratch)
}

/// 有符号编码的字节长度。
pub fn sleb128_len(value: i64) -> usize {
    let mut scratch = [0u8; MAX_LEB128_LEN];
    encode_sleb128(value, &mut scratch)
}

/// 从 `input` 头部解码一个无符号 LEB128 值，返回值与消耗的字节数。
///
/// 接受带冗余续位的非规范编码，但拒绝超出 64 位的值。
pub fn read_uleb128(input: &[u8]) -> Result<(u64, usize), Leb128Error> {
    let mut result = 0u64;
    let mut shift = 0u32;
    for (index, &byte) in input.iter().enumerate() {
        let payload = u64::from(byte & 0x7F);
        if shift == 63 {
            if byte & 0x80 != 0 || payload > 1 {
                return Err(Leb128Error::Overflow { position: index });
            }
            return Ok((result | (payload << 63), index + 1));
        }
        result |= payload << shift;
        shift += 7;
        if byte & 0x80 == 0 {
            return Ok((result, index + 1));
        }
    }
    Err(Leb128Error::Truncated {
        consumed: input.len(),
    })
}

/// 从 `input` 头部解码一个有符号 LEB128 值，返回值与消耗的字节数。
pub fn read_sleb128(input: &[u8]) -> Result<(i64, usize), Leb128Error> {
    let mut result = 0i64;
    let mut shift = 0u32;
    for (index, &byte) in input.iter().enumerate() {
        let payload = byte & 0x7F;
        if shift == 63 {
            // 第 10 字节只能携带符号扩展：全 0 或全 1。
            if byte & 0x80 != 0 || (payload != 0 && payload != 0x7F) {
                return Err(Leb128Error::Overflow { position: index });
            }
            return Ok((result | (i64::from(payload) << 63), index + 1));
        }
        result |= i64::from(payload) << shift;
        shift += 7;
        if byte & 0x80 == 0 {
            if payload & 0x40 != 0 {
                result |= -1i64 << shift;
            }
            return Ok((result, index + 1));
        }
    }
    Err(Leb128Error::Truncated {
        consumed: input.len(),
    })
}

impl OutBuffer {
    /// 追加无符号 LEB128 编码，至少写出 1 字节。
    pub fn write_uleb128(&mut self, value: u64) {
        let mut scratch = [0u8; MAX_LEB128_LEN];
        let len = encode_uleb128(value, &mut scratch);
        self.write_bytes(&scratch[..len]);
    }

    /// 追加有符号 LEB128 编码（最短的补码兼容形式）。
    pub fn write_sleb128(&mut self, value: i64) {
        let mut scratch = [0u8; MAX_LEB128_LEN];
        let len = encode_sleb128(value, &mut scratch);
        self.write_bytes(&scratch[..len]);
    }
}

//! 顺序写入：在游标处追加数据并推进游标。
//!
//! 所有方法共享同一契约：先经由 [`OutBuffer::reserve`] 保证尾部容量，再拷贝数据，
//! 最后按写入长度推进游标。标量按宿主字节序写出，不做任何端序转换。

use core::{ffi::CStr, ops::Range};

use crate::OutBuffer;

impl OutBuffer {
    /// 追加原始字节。
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.claim(bytes.len()).copy_from_slice(bytes);
    }

    /// 追加 `len` 个零字节，返回被清零区域在缓冲中的区间。
    ///
    /// 返回的是偏移而非引用：调用方可在后续任意写入之后，通过
    /// [`region_mut`](OutBuffer::region_mut) 重新取得该区域并回填。
    pub fn write_zeros(&mut self, len: usize) -> Range<usize> {
        let start = self.len();
        self.claim(len).fill(0);
        start..start + len
    }

    pub fn write_u8(&mut self, value: u8) {
        self.claim(1)[0] = value;
    }

    /// 以宿主字节序写出 32 位整数。
    pub fn write_i32(&mut self, value: i32) {
        self.write_bytes(&value.to_ne_bytes());
    }

    /// 以宿主字节序写出 64 位整数。
    pub fn write_i64(&mut self, value: i64) {
        self.write_bytes(&value.to_ne_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.write_bytes(&value.to_ne_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.write_bytes(&value.to_ne_bytes());
    }

    /// 追加字符串字节，不含终止符。
    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    /// 追加字符串字节并补一个 `0` 终止符。
    pub fn write_str_with_nul(&mut self, s: &str) {
        let bytes = s.as_bytes();
        let dst = self.claim(bytes.len() + 1);
        let (body, nul) = dst.split_at_mut(bytes.len());
        body.copy_from_slice(bytes);
        nul[0] = 0;
    }

    /// 追加 C 字符串内容，不含终止符。
    pub fn write_cstr(&mut self, s: &CStr) {
        self.write_bytes(s.to_bytes());
    }

    /// 追加 C 字符串内容及其终止符。
    pub fn write_cstr_with_nul(&mut self, s: &CStr) {
        self.write_bytes(s.to_bytes_with_nul());
    }

    /// 以 C 字符串视图返回缓冲内容。
    ///
    /// # 教案式说明
    /// - **意图 (Why)**：文本类产物（汇编清单、符号名拼接）需要交给期待 NUL 结尾字符串的接口；
    /// - **执行 (How)**：必要时预留 1 字节，在游标处写入 `0` 哨兵，游标保持不动；
    /// - **契约 (What)**：逻辑长度不变，但预留区首字节被改写；
    ///   若内容本身含有 `0` 字节，视图止于第一个 `0`。
    pub fn to_cstr(&mut self) -> &CStr {
        match CStr::from_bytes_until_nul(self.terminate()) {
            Ok(view) => view,
            Err(_) => unreachable!("terminate always writes a NUL sentinel"),
        }
    }
}

//! 按位置写入与头部插入。
//!
//! # 模块定位（Why）
//! - 目标文件写出器常先写占位字段，待后续内容确定后再回填长度或偏移；
//! - 少数格式要求在已写内容之前补前缀（例如段头），或以一对定界字节包裹整段内容。
//!
//! # 契约（What）
//! - [`OutBuffer::position_for`] 只安排容量与游标，不写字节；调用方写完后须用其返回值恢复游标；
//! - 头部插入是 O(当前长度) 的搬移操作，不具备摊还性质，应避免在大缓冲上反复调用。

use core::ffi::CStr;

use crate::{ExhaustionReason, OutBuffer};

impl OutBuffer {
    /// 为“从绝对偏移 `pos` 起写入 `nbytes` 字节”安排容量与游标。
    ///
    /// # 教案式说明
    /// - **意图 (Why)**：用同一个契约覆盖“回头修补已写数据”与“在末尾或越过末尾继续扩展”两种场景；
    /// - **执行 (How)**：
    ///   1. 记录调用前的逻辑长度；
    ///   2. 若 `pos + nbytes` 超出当前容量，则按差额扩容；
    ///   3. 将游标移动到 `pos`；
    ///   4. 返回 `max(pos + nbytes, 调用前长度)`。
    /// - **契约 (What)**：返回值是本次写入完成后缓冲应有的逻辑长度；
    ///   写入结束后调用 [`set_length`](Self::set_length) 恢复游标。
    ///   若 `pos` 越过调用前的末尾，空隙中的字节不会被清零。
    pub fn position_for(&mut self, pos: usize, nbytes: usize) -> usize {
        let current = self.len();
        let end = match pos.checked_add(nbytes) {
            Some(end) => end,
            None => self.exhaust(ExhaustionReason::CapacityOverflow, nbytes, None),
        };
        if end > self.capacity() {
            // 扩容以游标为基准，差额需按游标计算才能覆盖 `end`。
            self.reserve(end - current);
        }
        self.set_length(pos);
        end.max(current)
    }

    /// 在绝对偏移 `pos` 处写入 `bytes` 并恢复游标，返回新的逻辑长度。
    pub fn write_at(&mut self, pos: usize, bytes: &[u8]) -> usize {
        let end = self.position_for(pos, bytes.len());
        self.write_bytes(bytes);
        self.set_length(end);
        end
    }

    /// 在缓冲头部插入 `bytes`，已有内容整体后移。
    ///
    /// 这是 O(当前长度) 的操作。
    pub fn prepend(&mut self, bytes: &[u8]) {
        let len = self.len();
        let shift = bytes.len();
        self.reserve(shift);
        tracing::debug!(shifted = len, inserted = shift, "prepend moves existing content");
        let storage = self.storage_mut();
        storage.copy_within(0..len, shift);
        storage[..shift].copy_from_slice(bytes);
        self.set_length(len + shift);
    }

    pub fn prepend_str(&mut self, s: &str) {
        self.prepend(s.as_bytes());
    }

    /// 在头部插入 C 字符串内容（不含终止符）。
    pub fn prepend_cstr(&mut self, s: &CStr) {
        self.prepend(s.to_bytes());
    }

    /// 以 `open` 与 `close` 包裹全部已写内容，逻辑长度增加 2。
    pub fn bracket(&mut self, open: u8, close: u8) {
        let len = self.len();
        self.reserve(2);
        let storage = self.storage_mut();
        storage.copy_within(0..len, 1);
        storage[0] = open;
        storage[len + 1] = close;
        self.set_length(len + 2);
    }
}

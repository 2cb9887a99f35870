use alloc::vec::Vec;
use core::{fmt, ops::Range};

use bytes::{Bytes, BytesMut};

use crate::{
    AbortOnExhaustion, BufferConfig, ExhaustionError, ExhaustionPolicy, ExhaustionReason,
    GrowthPolicy,
};

const DEFAULT_POLICY: &dyn ExhaustionPolicy = &AbortOnExhaustion;

/// `OutBuffer` 是面向二进制产物组装的只增写缓冲。
///
/// # 设计动机（Why）
/// - 目标文件段、指令流与调试信息的写出器需要一个统一的字节汇聚点：
///   顺序追加是主路径，偶尔回头修补长度字段或偏移，极少数情况下在头部插入前缀；
/// - 调用方不应关心容量，扩容必须摊还 O(1) 且不丢失已写内容。
///
/// # 架构关系（How）
/// - `storage` 的长度始终等于容量，`[0, cursor)` 为逻辑内容，`[cursor, capacity)` 为预留区，
///   其中的字节可能是上一轮写入遗留的旧值；
/// - 扩容委托给 [`GrowthPolicy`] 计算目标容量，失败时交给 [`ExhaustionPolicy`] 终止进程；
/// - 所有读写访问都经过切片边界检查，不暴露裸指针。
///
/// # 契约说明（What）
/// - `cursor <= capacity` 恒成立，逻辑长度即 `cursor`；
/// - 扩容永不缩小容量，且保留 `[0, cursor)` 的全部字节；
/// - [`reset`](Self::reset) 只回绕游标，保留已分配的存储供下一轮复用；
/// - 类型不含内部同步，跨线程共享需要外部互斥。
///
/// # 风险与取舍（Trade-offs）
/// - 预留区以零初始化的方式扩展，比未初始化内存多一次清零，换取完全安全的实现；
/// - 容量精确遵循增长策略而非分配器的取整结果，便于在测试中复现扩容序列。
#[derive(Clone)]
pub struct OutBuffer {
    storage: Vec<u8>,
    cursor: usize,
    growth: GrowthPolicy,
    policy: &'static dyn ExhaustionPolicy,
}

impl OutBuffer {
    /// 创建空缓冲，使用默认倍增策略；首次写入前不分配内存。
    pub const fn new() -> Self {
        Self::with_growth_hint(0)
    }

    /// 创建携带增长提示的空缓冲。
    ///
    /// 每次扩容若提示值大于本次需求，容量按 `已用 + 提示` 增长；否则回落到默认倍增策略。
    pub const fn with_growth_hint(hint: usize) -> Self {
        Self {
            storage: Vec::new(),
            cursor: 0,
            growth: GrowthPolicy::with_hint(hint),
            policy: DEFAULT_POLICY,
        }
    }

    /// 按配置构造缓冲；`initial_capacity` 非零时立即经由常规扩容路径预留空间。
    pub fn with_config(config: &BufferConfig) -> Self {
        let mut buffer = Self {
            storage: Vec::new(),
            cursor: 0,
            growth: config.growth_policy(),
            policy: DEFAULT_POLICY,
        };
        if config.initial_capacity > 0 {
            buffer.reserve(config.initial_capacity);
        }
        buffer
    }

    /// 替换内存耗尽时的处理策略。
    pub fn with_policy(mut self, policy: &'static dyn ExhaustionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 逻辑长度，即已写入的字节数。
    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// 当前已分配的总容量（包含已写入字节）。
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// 游标之后无需扩容即可写入的字节数。
    pub fn remaining_capacity(&self) -> usize {
        self.storage.len() - self.cursor
    }

    pub fn growth_hint(&self) -> usize {
        self.growth.hint()
    }

    /// 已写入的逻辑内容 `[0, len)`。
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.cursor]
    }

    /// 已写入逻辑内容的可变视图，用于原地修补。
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.storage[..self.cursor]
    }

    /// 访问已写入内容中的某个区间，典型用法是回填 [`write_zeros`](Self::write_zeros) 预留的区域。
    ///
    /// # Panics
    /// 区间超出逻辑长度时 panic。
    pub fn region_mut(&mut self, range: Range<usize>) -> &mut [u8] {
        &mut self.storage[..self.cursor][range]
    }

    /// 确保游标之后至少还有 `additional` 字节可写，不移动游标。
    ///
    /// # 教案式说明
    /// - **意图 (Why)**：所有写入操作的唯一扩容入口，集中保证“扩容保留已写内容”的不变式；
    /// - **执行 (How)**：剩余容量充足时直接返回；否则由 [`GrowthPolicy`] 计算目标容量，
    ///   先以 `try_reserve_exact` 申请内存，成功后再扩展预留区；
    /// - **契约 (What)**：返回后 `remaining_capacity() >= additional`；
    ///   扩容失败时调用 [`ExhaustionPolicy`]，该调用不会返回。
    pub fn reserve(&mut self, additional: usize) {
        if self.remaining_capacity() >= additional {
            return;
        }
        self.grow(additional);
    }

    #[cold]
    fn grow(&mut self, additional: usize) {
        let used = self.cursor;
        let old_capacity = self.capacity();
        let target = match self.growth.next_capacity(used, old_capacity, additional) {
            Some(target) => target,
            None => self.exhaust(ExhaustionReason::CapacityOverflow, additional, None),
        };
        if self
            .storage
            .try_reserve_exact(target - old_capacity)
            .is_err()
        {
            self.exhaust(ExhaustionReason::AllocatorRefused, additional, Some(target));
        }
        self.storage.resize(target, 0);
        tracing::trace!(
            used,
            requested = additional,
            old_capacity,
            new_capacity = target,
            "output buffer grown"
        );
    }

    #[cold]
    pub(crate) fn exhaust(
        &self,
        reason: ExhaustionReason,
        requested: usize,
        target: Option<usize>,
    ) -> ! {
        let failure = ExhaustionError {
            reason,
            used: self.cursor,
            requested,
            target,
        };
        tracing::error!(
            used = failure.used,
            requested,
            target = ?target,
            reason = ?reason,
            "output buffer exhausted"
        );
        self.policy.exhausted(&failure)
    }

    /// 回绕游标到起点，保留存储以便复用。
    pub fn reset(&mut self) {
        tracing::trace!(
            discarded = self.cursor,
            capacity = self.capacity(),
            "output buffer reset"
        );
        self.cursor = 0;
    }

    /// 直接设置逻辑长度，不写入也不清零 `[旧长度, len)` 之间的字节。
    ///
    /// 调用方需先通过 [`reserve`](Self::reserve) 或 [`position_for`](Self::position_for)
    /// 保证容量足够。
    ///
    /// # Panics
    /// `len` 超过当前容量时 panic。
    pub fn set_length(&mut self, len: usize) {
        assert!(
            len <= self.capacity(),
            "set_length({len}) exceeds output buffer capacity {}",
            self.capacity()
        );
        self.cursor = len;
    }

    /// 预留 `len` 字节并推进游标，返回刚刚占用的区间供调用方填充。
    pub(crate) fn claim(&mut self, len: usize) -> &mut [u8] {
        self.reserve(len);
        let start = self.cursor;
        self.cursor += len;
        &mut self.storage[start..self.cursor]
    }

    /// 在游标处写入 `0` 哨兵但不推进游标，返回包含哨兵的前缀。
    pub(crate) fn terminate(&mut self) -> &[u8] {
        self.reserve(1);
        self.storage[self.cursor] = 0;
        &self.storage[..=self.cursor]
    }

    pub(crate) fn storage_mut(&mut self) -> &mut [u8] {
        &mut self.storage
    }

    /// 消耗缓冲，返回恰好包含逻辑内容的 `Vec<u8>`。
    pub fn into_vec(mut self) -> Vec<u8> {
        self.storage.truncate(self.cursor);
        self.storage
    }

    /// 冻结为只读的 [`Bytes`]，供下游以引用计数方式共享最终产物。
    pub fn freeze(self) -> Bytes {
        Bytes::from(self.into_vec())
    }

    /// 拷贝逻辑内容到新的 [`BytesMut`]，便于接入基于 `bytes` 的后续编码阶段。
    pub fn to_bytes_mut(&self) -> BytesMut {
        BytesMut::from(self.as_bytes())
    }
}

impl Default for OutBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<[u8]> for OutBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for OutBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutBuffer")
            .field("len", &self.cursor)
            .field("capacity", &self.capacity())
            .field("growth_hint", &self.growth.hint())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn capacity_follows_growth_policy() {
        let mut buf = OutBuffer::new();
        assert_eq!(buf.capacity(), 0);
        buf.write_u8(1);
        assert_eq!(buf.capacity(), 1);
        buf.write_u8(2);
        assert_eq!(buf.capacity(), 2);
        buf.write_u8(3);
        assert_eq!(buf.capacity(), 8);
        buf.write_bytes(&[0; 6]);
        assert_eq!(buf.capacity(), 16);
        assert_eq!(buf.len(), 9);
    }

    #[test]
    fn growth_hint_sets_minimum_increment() {
        let mut buf = OutBuffer::with_growth_hint(100);
        buf.write_u8(1);
        assert_eq!(buf.capacity(), 100);
        buf.write_bytes(&[0; 99]);
        assert_eq!(buf.capacity(), 100);
        buf.write_u8(2);
        assert_eq!(buf.capacity(), 200);
    }

    #[test]
    fn reset_keeps_storage() {
        let mut buf = OutBuffer::new();
        buf.write_bytes(b"object");
        let capacity = buf.capacity();
        buf.reset();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), capacity);
        buf.reset();
        assert_eq!(buf.len(), 0);
    }

    #[test]
    #[should_panic(expected = "exceeds output buffer capacity")]
    fn set_length_beyond_capacity_panics() {
        let mut buf = OutBuffer::new();
        buf.reserve(4);
        buf.set_length(5);
    }

    #[test]
    fn buffer_can_move_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OutBuffer>();
    }

    #[test]
    #[traced_test]
    fn growth_events_are_traced() {
        let mut buf = OutBuffer::new();
        buf.write_bytes(&[0; 3]);
        assert!(logs_contain("output buffer grown"));
        assert!(logs_contain("new_capacity=3"));
    }
}

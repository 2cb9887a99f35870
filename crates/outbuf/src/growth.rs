/// `GrowthPolicy` 计算一次扩容事件之后的目标容量。
///
/// # 设计背景（Why）
/// - 扩容策略是缓冲唯一的摊还成本来源，将其抽成纯函数后可以脱离分配器单独验证；
/// - 调用方可以通过“增长提示”（growth hint）为已知会持续写入大块数据的场景设定最小增量。
///
/// # 逻辑解析（How）
/// - 提示值大于本次请求时：新容量 = 已用字节 + 提示值；
/// - 否则：新容量 = 已用字节 + 请求字节；若不足旧容量的两倍则提升到两倍，
///   此时若仍不足 8 字节再提升到 8 字节（下限只在倍增分支生效）；
/// - 全程使用带检查的算术，溢出时返回 `None`，由调用方转换为内存耗尽信号。
///
/// # 契约说明（What）
/// - `hint == 0` 表示使用默认的倍增策略；
/// - 返回的容量总是满足 `new_capacity >= used + requested`。
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GrowthPolicy {
    hint: usize,
}

/// 首次扩容时的最小容量。
const MIN_CAPACITY: usize = 8;

impl GrowthPolicy {
    /// 以给定增长提示构造策略；`0` 等价于默认倍增。
    pub const fn with_hint(hint: usize) -> Self {
        Self { hint }
    }

    /// 当前策略携带的增长提示。
    pub const fn hint(&self) -> usize {
        self.hint
    }

    /// 计算扩容后的目标容量。
    ///
    /// - `used`：当前游标位置（已写入字节数）；
    /// - `old_capacity`：扩容前容量；
    /// - `requested`：游标之后需要保证可写的字节数。
    pub fn next_capacity(
        &self,
        used: usize,
        old_capacity: usize,
        requested: usize,
    ) -> Option<usize> {
        if self.hint > requested {
            return used.checked_add(self.hint);
        }
        let capacity = used.checked_add(requested)?;
        let doubled = old_capacity.saturating_mul(2);
        if capacity < doubled {
            return Some(doubled.max(MIN_CAPACITY));
        }
        Some(capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_growth_allocates_exactly_the_request() {
        let policy = GrowthPolicy::default();
        assert_eq!(policy.next_capacity(0, 0, 1), Some(1));
        assert_eq!(policy.next_capacity(0, 0, 3), Some(3));
    }

    #[test]
    fn doubling_branch_applies_minimum_capacity() {
        let policy = GrowthPolicy::default();
        assert_eq!(policy.next_capacity(1, 1, 1), Some(2));
        assert_eq!(policy.next_capacity(2, 2, 1), Some(8));
        assert_eq!(policy.next_capacity(3, 3, 1), Some(8));
    }

    #[test]
    fn large_request_wins_over_doubling() {
        let policy = GrowthPolicy::default();
        assert_eq!(policy.next_capacity(0, 0, 100), Some(100));
        assert_eq!(policy.next_capacity(8, 8, 100), Some(108));
    }

    #[test]
    fn small_request_doubles_old_capacity() {
        let policy = GrowthPolicy::default();
        assert_eq!(policy.next_capacity(8, 8, 1), Some(16));
        assert_eq!(policy.next_capacity(16, 16, 4), Some(32));
    }

    #[test]
    fn hint_larger_than_request_sets_increment() {
        let policy = GrowthPolicy::with_hint(64);
        assert_eq!(policy.next_capacity(0, 0, 1), Some(64));
        assert_eq!(policy.next_capacity(64, 64, 4), Some(128));
    }

    #[test]
    fn hint_not_larger_than_request_falls_back_to_doubling() {
        let policy = GrowthPolicy::with_hint(16);
        assert_eq!(policy.next_capacity(40, 40, 16), Some(80));
        assert_eq!(policy.next_capacity(40, 40, 50), Some(90));
    }

    #[test]
    fn overflow_is_reported_as_none() {
        let policy = GrowthPolicy::default();
        assert_eq!(policy.next_capacity(usize::MAX, usize::MAX, 1), None);
        let hinted = GrowthPolicy::with_hint(usize::MAX);
        assert_eq!(hinted.next_capacity(1, 8, 1), None);
    }
}

use serde::{Deserialize, Serialize};

use crate::GrowthPolicy;

/// `BufferConfig` 描述构造 [`OutBuffer`](crate::OutBuffer) 时可调的参数。
///
/// # 设计背景（Why）
/// - 目标文件写出器往往按段类型配置不同的增长提示（例如代码段大、调试段小），
///   以配置文件的形式集中管理比在调用点硬编码更易调优。
///
/// # 契约说明（What）
/// - `growth_hint`：每次扩容的最小增量，`0` 表示默认倍增策略；
/// - `initial_capacity`：构造时预留的容量，`0` 表示首次写入时再分配；
/// - 未出现的字段取默认值，未知字段会被拒绝，避免拼写错误被静默忽略。
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BufferConfig {
    pub growth_hint: usize,
    pub initial_capacity: usize,
}

impl BufferConfig {
    /// 由配置推导扩容策略。
    pub const fn growth_policy(&self) -> GrowthPolicy {
        GrowthPolicy::with_hint(self.growth_hint)
    }
}

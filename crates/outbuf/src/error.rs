//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 集中定义缓冲对外暴露的错误语义：一类是不可恢复的内存耗尽，另一类是可恢复的 LEB128 解码失败；
//! - 保持与 `thiserror` 生态兼容，便于宿主在 `std` 环境下直接接入 `std::error::Error` 链。
//!
//! ## 设计要求（What）
//! - 启用 `std` 特性时派生 [`thiserror::Error`]；`no_std` 下提供等价的 `Display` 实现；
//! - 耗尽错误只作为信号交给 [`ExhaustionPolicy`](crate::ExhaustionPolicy)，从不作为 `Result` 返回给写入方。

#[cfg(not(feature = "std"))]
use core::fmt;

#[cfg(feature = "std")]
use thiserror::Error;

/// 扩容失败的具体原因。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExhaustionReason {
    /// 目标容量的算术计算溢出 `usize`。
    CapacityOverflow,
    /// 分配器拒绝了扩容请求。
    AllocatorRefused,
}

/// 扩容请求无法满足时携带的诊断上下文。
///
/// # 教案式说明
/// - **意图 (Why)**：耗尽是致命事件，诊断输出需要足够信息定位触发写入的规模；
/// - **契约 (What)**：`used` 为扩容前游标位置，`requested` 为游标后需要的字节数，
///   `target` 为策略计算出的目标容量（溢出时为 `None`）。
#[cfg_attr(
    feature = "std",
    derive(Error),
    error(
        "out of memory: cannot grow output buffer ({reason:?}; used {used}, requested {requested}, target {target:?})"
    )
)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExhaustionError {
    pub reason: ExhaustionReason,
    pub used: usize,
    pub requested: usize,
    pub target: Option<usize>,
}

/// LEB128 解码错误。
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Leb128Error {
    /// 输入在续位仍为 1 时结束。
    #[cfg_attr(feature = "std", error("truncated LEB128 sequence after {consumed} bytes"))]
    Truncated { consumed: usize },

    /// 编码值超出 64 位整数可表示范围。
    #[cfg_attr(feature = "std", error("LEB128 value overflows 64 bits at byte {position}"))]
    Overflow { position: usize },
}

#[cfg(not(feature = "std"))]
impl fmt::Display for ExhaustionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "out of memory: cannot grow output buffer ({:?}; used {}, requested {}, target {:?})",
            self.reason, self.used, self.requested, self.target
        )
    }
}

#[cfg(not(feature = "std"))]
impl fmt::Display for Leb128Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leb128Error::Truncated { consumed } => {
                write!(f, "truncated LEB128 sequence after {consumed} bytes")
            }
            Leb128Error::Overflow { position } => {
                write!(f, "LEB128 value overflows 64 bits at byte {position}")
            }
        }
    }
}

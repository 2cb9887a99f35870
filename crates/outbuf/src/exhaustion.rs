use crate::ExhaustionError;

/// `ExhaustionPolicy` 决定扩容失败后进程如何终止。
///
/// # 设计初衷（Why）
/// - 输出缓冲一旦无法扩容，已写出的产物就不可能完整，继续运行只会产出损坏的目标文件；
/// - 但“如何终止”属于宿主的决策：命令行工具通常直接中止，嵌入式宿主可能希望展开栈以便上层清理。
///
/// # 契约定义（What）
/// - 方法返回 `!`：实现必须发散（中止、退出或 panic），缓冲不会在部分扩容的状态下被继续使用；
/// - 实现需满足 `Send + Sync`，以便缓冲本身可以跨线程移动。
pub trait ExhaustionPolicy: Send + Sync {
    /// 处理一次致命的扩容失败。
    fn exhausted(&self, failure: &ExhaustionError) -> !;
}

/// 默认策略：输出诊断信息后立即中止进程。
#[derive(Clone, Copy, Debug, Default)]
pub struct AbortOnExhaustion;

impl ExhaustionPolicy for AbortOnExhaustion {
    #[cfg(feature = "std")]
    fn exhausted(&self, failure: &ExhaustionError) -> ! {
        std::eprintln!("Fatal Error: {failure}");
        std::process::abort()
    }

    #[cfg(not(feature = "std"))]
    fn exhausted(&self, failure: &ExhaustionError) -> ! {
        let size = failure.target.unwrap_or(usize::MAX);
        match core::alloc::Layout::from_size_align(size, 1) {
            Ok(layout) => alloc::alloc::handle_alloc_error(layout),
            Err(_) => panic!("{}", failure),
        }
    }
}

/// 以 panic 展开代替中止，适用于在 `catch_unwind` 边界内嵌入缓冲的宿主以及测试。
#[derive(Clone, Copy, Debug, Default)]
pub struct PanicOnExhaustion;

impl ExhaustionPolicy for PanicOnExhaustion {
    fn exhausted(&self, failure: &ExhaustionError) -> ! {
        panic!("{}", failure)
    }
}

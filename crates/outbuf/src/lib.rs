#![cfg_attr(not(feature = "std"), no_std)]

//! `outbuf` 提供编译工具链在组装二进制产物时使用的输出缓冲。
//!
//! # 模块定位（Why）
//! - 目标文件段、编码后的指令流、变长整数等产物都需要“先顺序写出，再回头修补”的字节汇聚点；
//! - 调用方只关心写入、修补与最终读取，容量管理应完全隐藏在 [`OutBuffer`] 内部。
//!
//! # 设计概要（How）
//! - `buffer`：实体定义、容量增长与游标管理；
//! - `growth`：纯函数形式的容量增长策略，便于独立验证摊还行为；
//! - `emit`：顺序写入（原始字节、标量、C 字符串）；
//! - `positional`：按位置修补/扩展、头部插入与首尾包裹；
//! - `leb128`：无符号/有符号 LEB128 编码与配套解码；
//! - `exhaustion`：不可恢复的内存耗尽信号与可替换的处理策略；
//! - `config`：可由配置文件反序列化的构造参数。
//!
//! # 使用约束（What）
//! - 缓冲不含内部同步，跨线程共享需由调用方串行化；
//! - 任何可能触发扩容的写入都会使此前借出的切片失效，Rust 借用规则在编译期保证这一点。

extern crate alloc;

mod buffer;
mod config;
mod emit;
mod error;
mod exhaustion;
mod growth;
mod io;
pub mod leb128;
mod positional;

pub use buffer::OutBuffer;
pub use config::BufferConfig;
pub use error::{ExhaustionError, ExhaustionReason, Leb128Error};
pub use exhaustion::{AbortOnExhaustion, ExhaustionPolicy, PanicOnExhaustion};
pub use growth::GrowthPolicy;

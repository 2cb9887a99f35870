use criterion::{Criterion, black_box};
use outbuf::OutBuffer;
use std::{env, time::Duration};

/// 基准：模拟一次段写出的典型负载。
///
/// # 设计背景（Why）
/// - 增长策略决定了顺序写入的摊还成本，修补与 LEB128 则是写出器的高频路径；
/// - 同时记录“复用缓冲”与“每轮新建缓冲”两种模式，便于观察扩容次数对吞吐的影响。
///
/// # 逻辑解析（How）
/// - 每轮写入 256 条记录：4 字节占位、若干 LEB128 字段与名称字符串，最后回填占位；
/// - `emit_reused` 在轮次之间调用 `reset`，`emit_fresh` 每轮重新构造。
fn emit_section(buf: &mut OutBuffer) {
    for index in 0..256i64 {
        let size_field = buf.write_zeros(4);
        buf.write_uleb128(index as u64 * 977);
        buf.write_sleb128(-index * 31);
        buf.write_str_with_nul("symbol");
        let body = (buf.len() - size_field.end) as i32;
        buf.write_at(size_field.start, &body.to_ne_bytes());
    }
}

fn bench_emit(c: &mut Criterion) {
    c.bench_function("emit_fresh", |b| {
        b.iter(|| {
            let mut buf = OutBuffer::new();
            emit_section(&mut buf);
            black_box(buf.len())
        });
    });

    c.bench_function("emit_reused", |b| {
        let mut buf = OutBuffer::with_growth_hint(4096);
        b.iter(|| {
            buf.reset();
            emit_section(&mut buf);
            black_box(buf.len())
        });
    });

    c.bench_function("prepend_header", |b| {
        b.iter(|| {
            let mut buf = OutBuffer::new();
            buf.write_bytes(&[0u8; 4096]);
            buf.prepend(b"\x7fELF");
            black_box(buf.len())
        });
    });
}

fn main() {
    let mut quick_mode = false;
    for arg in env::args().skip(1) {
        if arg == "--quick" {
            quick_mode = true;
        }
    }

    let mut criterion = Criterion::default();
    if quick_mode {
        criterion = criterion
            .sample_size(10)
            .warm_up_time(Duration::from_millis(100))
            .measurement_time(Duration::from_millis(250));
    }

    bench_emit(&mut criterion);
    criterion.final_summary();
}

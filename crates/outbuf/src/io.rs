//! 与标准写入接口的适配：`core::fmt::Write` 用于格式化文本产物，
//! `std::io::Write` 让缓冲可以直接作为既有序列化器的输出端。两者都不会失败。

use core::fmt;

use crate::OutBuffer;

impl fmt::Write for OutBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        OutBuffer::write_str(self, s);
        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::io::Write for OutBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.write_bytes(buf);
        Ok(())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

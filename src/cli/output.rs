//! Fixed-capacity output sink for serial terminals.
//!
//! Collects everything the CLI prints during one poll so the UART task
//! can flush it in a single write. `\n` becomes `\r\n`. When full, further
//! text is dropped and [`is_truncated`](OutputBuffer::is_truncated) is set.

use core::fmt;

use heapless::Vec;

pub struct OutputBuffer<const N: usize> {
    buf: Vec<u8, N>,
    truncated: bool,
}

impl<const N: usize> OutputBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            truncated: false,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.truncated = false;
    }

    fn push(&mut self, byte: u8) -> bool {
        if self.buf.push(byte).is_err() {
            self.truncated = true;
            return false;
        }
        true
    }
}

impl<const N: usize> Default for OutputBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for OutputBuffer<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &byte in s.as_bytes() {
            if byte == b'\n' && !self.push(b'\r') {
                break;
            }
            if !self.push(byte) {
                break;
            }
        }
        // Truncation is flagged, not returned as fmt::Error.
        Ok(())
    }
}

//! Line assembly for console input
//!
//! Bytes accumulate until CR or LF. Empty lines are swallowed so both
//! `\n` and `\r\n` terminators work. Non-ASCII bytes are dropped. The
//! buffer is fixed-capacity; a line that outgrows it is dropped up to the
//! next terminator.

use heapless::String;

use crate::config::LINE_MAX_LEN;

/// What a single byte did to the assembler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineEvent {
    /// Byte stored (or dropped while discarding an overflowed line).
    Pending,
    /// Terminator seen; [`LineAssembler::line`] holds a complete line.
    Complete,
    /// Terminator on an empty buffer, the end of a discarded line, or a
    /// non-ASCII byte (dropped).
    Ignored,
    /// This byte overflowed the buffer. Reported once per line.
    Overflow,
}

/// Accumulates one command line.
pub struct LineAssembler {
    buf: String<LINE_MAX_LEN>,
    discarding: bool,
}

impl LineAssembler {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: String::new(),
            discarding: false,
        }
    }

    /// Feed one byte.
    ///
    /// After [`LineEvent::Complete`] the caller reads [`line`](Self::line)
    /// and then calls [`clear`](Self::clear).
    pub fn push(&mut self, byte: u8) -> LineEvent {
        match byte {
            b'\r' | b'\n' => {
                if self.discarding {
                    self.discarding = false;
                    self.buf.clear();
                    LineEvent::Ignored
                } else if self.buf.is_empty() {
                    LineEvent::Ignored
                } else {
                    LineEvent::Complete
                }
            }
            _ if self.discarding => LineEvent::Pending,
            // Commands are ASCII; one byte is one char in the buffer.
            _ if !byte.is_ascii() => LineEvent::Ignored,
            _ => {
                if self.buf.push(byte as char).is_err() {
                    self.buf.clear();
                    self.discarding = true;
                    LineEvent::Overflow
                } else {
                    LineEvent::Pending
                }
            }
        }
    }

    /// The line accumulated so far.
    pub fn line(&self) -> &str {
        self.buf.as_str()
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// `true` while dropping the remainder of an overflowed line.
    pub fn is_discarding(&self) -> bool {
        self.discarding
    }

    pub const fn capacity(&self) -> usize {
        LINE_MAX_LEN
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

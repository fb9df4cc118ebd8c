//! Per-channel prompt accumulator.
//!
//! Output arrives in arbitrarily sized chunks; a prompt line can be split
//! across many of them. The buffer therefore accumulates raw bytes and the
//! colon check runs against the trimmed whole accumulator, never against a
//! single chunk. The buffer is byte-oriented: a chunk boundary inside a
//! multi-byte character leaves a non-colon tail byte, so detection simply
//! waits for the rest of the character to arrive.

use bytes::BytesMut;

/// Accumulates one output channel's bytes between prompt responses.
///
/// Cleared whenever a response is sent, so the same trailing colon cannot
/// trigger twice without new output arriving.
#[derive(Debug, Default)]
pub struct PromptBuffer {
    buf: BytesMut,
}

impl PromptBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(4096),
        }
    }

    /// Append a chunk of raw output.
    pub fn extend(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Reset the buffer to empty.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Current buffer length in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Buffer contents as a string (lossy UTF-8 conversion).
    pub fn as_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.buf)
    }

    /// The trimmed last line, if the accumulator currently looks like a
    /// prompt: after stripping trailing whitespace it must end with `:`.
    ///
    /// Returns `None` otherwise; the colon may still be on its way in a
    /// later chunk, so callers just keep accumulating.
    pub fn prompt_candidate(&self) -> Option<String> {
        let trimmed = trim_trailing_whitespace(&self.buf);
        if trimmed.last() != Some(&b':') {
            return None;
        }
        let start = memchr::memrchr(b'\n', trimmed).map_or(0, |i| i + 1);
        let line = String::from_utf8_lossy(&trimmed[start..]);
        Some(line.trim().to_string())
    }
}

fn trim_trailing_whitespace(mut bytes: &[u8]) -> &[u8] {
    while let [rest @ .., last] = bytes {
        if last.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }
    bytes
}

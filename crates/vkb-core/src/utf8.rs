#![forbid(unsafe_code)]

//! UTF-8 unit classification.
//!
//! The editor works in byte offsets, so every caret step has to know how
//! many bytes the codepoint next to the caret occupies. These helpers answer
//! that from the lead byte alone without decoding the codepoint.
//!
//! The default key-sets only contain ASCII and two-byte Latin-1 symbols
//! (`«`, `©`, `£`, `ñ`, ...), but initial text handed in by the caller can
//! hold anything, so the full 1-4 byte range is classified.

/// Whether `byte` starts a two-byte UTF-8 sequence (`0xC2..=0xDF`).
#[inline]
#[must_use]
pub const fn is_two_byte_lead(byte: u8) -> bool {
    matches!(byte, 0xC2..=0xDF)
}

/// Whether `byte` is a continuation byte (`10xx_xxxx`).
#[inline]
#[must_use]
pub const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Byte length of the sequence introduced by `lead`.
///
/// Continuation bytes and bytes that can never start a sequence report 1 so
/// callers always make progress.
#[inline]
#[must_use]
pub const fn sequence_len(lead: u8) -> usize {
    match lead {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 1,
    }
}

/// Length of the codepoint starting at `offset`, or 0 at the end of `text`.
#[must_use]
pub fn unit_len_at(text: &str, offset: usize) -> usize {
    match text.as_bytes().get(offset) {
        Some(&lead) => sequence_len(lead).min(text.len() - offset),
        None => 0,
    }
}

/// Length of the codepoint ending right before `offset`, or 0 at the start.
///
/// Walks back over at most three continuation bytes.
#[must_use]
pub fn unit_len_before(text: &str, offset: usize) -> usize {
    let bytes = text.as_bytes();
    let offset = offset.min(bytes.len());
    let mut start = offset;
    while start > 0 {
        start -= 1;
        if !is_continuation(bytes[start]) || offset - start == 4 {
            break;
        }
    }
    offset - start
}

/// Iterator over the UTF-8 units of a string, yielding `(byte_offset, unit)`.
#[derive(Debug, Clone)]
pub struct Units<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Iterator for Units<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let len = unit_len_at(self.text, self.offset);
        if len == 0 {
            return None;
        }
        let start = self.offset;
        self.offset += len;
        Some((start, &self.text[start..self.offset]))
    }
}

/// Split `text` into its codepoint units using lead-byte rules.
#[must_use]
pub fn units(text: &str) -> Units<'_> {
    Units { text, offset: 0 }
}

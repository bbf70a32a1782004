// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// UTF-8 encoding:
//
// | code point range   | byte 1   | byte 2   | byte 3   | byte 4   |
// |--------------------|----------|----------|----------|----------|
// | U+0000..U+007F     | 0xxxxxxx |          |          |          |
// | U+0080..U+07FF     | 110xxxxx | 10xxxxxx |          |          |
// | U+0800..U+FFFF     | 1110xxxx | 10xxxxxx | 10xxxxxx |          |
// | U+10000..U+10FFFF  | 11110xxx | 10xxxxxx | 10xxxxxx | 10xxxxxx |
//
// Overlong encodings, surrogates (U+D800..U+DFFF) and code points above
// U+10FFFF are rejected.
//
// ref:
// https://www.rfc-editor.org/rfc/rfc3629

use crate::error::{CompileError, Utf8Error};

/// Decodes the character starting at `offset` and returns it together with
/// its width in bytes.
///
/// An `offset` at or past the end of `bytes` is an `UnexpectedEnd` error.
pub fn read_char(bytes: &[u8], offset: usize) -> Result<(char, usize), CompileError> {
    bytes
        .get(offset..)
        .ok_or(Utf8Error::UnexpectedEnd)
        .and_then(decode)
        .map_err(|reason| CompileError::InvalidUtf8 { offset, reason })
}

/// Returns only the byte width of the character starting at `offset`.
pub fn char_width(bytes: &[u8], offset: usize) -> Result<usize, CompileError> {
    read_char(bytes, offset).map(|(_, width)| width)
}

fn decode(bytes: &[u8]) -> Result<(char, usize), Utf8Error> {
    let first = match bytes.first() {
        Some(b) => *b,
        None => return Err(Utf8Error::UnexpectedEnd),
    };

    let (width, initial, min) = match first {
        0x00..=0x7f => return Ok((first as char, 1)),
        0xc0..=0xdf => (2, (first & 0x1f) as u32, 0x80),
        0xe0..=0xef => (3, (first & 0x0f) as u32, 0x800),
        0xf0..=0xf7 => (4, (first & 0x07) as u32, 0x10000),
        _ => return Err(Utf8Error::InvalidLeadingByte(first)),
    };

    if bytes.len() < width {
        // a shorter tail may still carry an invalid continuation byte,
        // report that first since it is the more precise diagnosis
        if let Some(b) = bytes[1..].iter().find(|b| !is_continuation(**b)) {
            return Err(Utf8Error::InvalidContinuationByte(*b));
        }
        return Err(Utf8Error::UnexpectedEnd);
    }

    let mut code = initial;
    for b in &bytes[1..width] {
        if !is_continuation(*b) {
            return Err(Utf8Error::InvalidContinuationByte(*b));
        }
        code = (code << 6) | (*b & 0x3f) as u32;
    }

    if code < min {
        return Err(Utf8Error::Overlong(code));
    }

    if (0xd800..=0xdfff).contains(&code) {
        return Err(Utf8Error::Surrogate(code));
    }

    match char::from_u32(code) {
        Some(c) => Ok((c, width)),
        None => Err(Utf8Error::OutOfRange(code)),
    }
}

fn is_continuation(b: u8) -> bool {
    b & 0xc0 == 0x80
}

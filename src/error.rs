// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use thiserror::Error;

/// Errors that abort the compilation of a pattern.
///
/// Malformed escapes, groups, quantifiers and classes are never reported
/// here: the scanner falls back to literal atoms for them. Only structural
/// problems reach the caller.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum CompileError {
    /// The dispatcher produced no node at an offset inside the pattern.
    #[error("no node can be consumed at offset {offset}")]
    InvalidEntry { offset: usize },

    /// The pattern contains a malformed UTF-8 sequence.
    #[error("invalid UTF-8 sequence at offset {offset}: {reason}")]
    InvalidUtf8 { offset: usize, reason: Utf8Error },

    /// The node buffer would exceed the configured size limit.
    #[error("regexp too large: {size} bytes (limit: {limit})")]
    TooLarge { size: usize, limit: usize },
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Utf8Error {
    #[error("invalid leading byte 0x{0:02x}")]
    InvalidLeadingByte(u8),

    #[error("unexpected end of a multi-byte sequence")]
    UnexpectedEnd,

    #[error("invalid continuation byte 0x{0:02x}")]
    InvalidContinuationByte(u8),

    #[error("overlong encoding of U+{0:04X}")]
    Overlong(u32),

    #[error("surrogate code point U+{0:04X}")]
    Surrogate(u32),

    #[error("code point 0x{0:X} is out of range")]
    OutOfRange(u32),
}

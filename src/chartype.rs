// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Byte classifiers used by the scanner. Non-ASCII bytes never match.

pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

pub fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

/// `[a-zA-Z0-9_]`
pub fn is_word(b: u8) -> bool {
    is_alpha(b) || is_digit(b) || b == b'_'
}

pub fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

/// The first character of a group or back-reference name: `[a-zA-Z_]`
pub fn is_name_start(b: u8) -> bool {
    is_alpha(b) || b == b'_'
}

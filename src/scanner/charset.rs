// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{error::CompileError, node::NodeKind};

use super::Scanner;

impl Scanner<'_> {
    /// Classifies a bracket expression.
    ///
    /// - `[...]` and `[^...]` are a `Class`. Inside the brackets `\` skips
    ///   the next character unconditionally, and the POSIX items `[:name:]`,
    ///   `[=c=]` and `[.c.]` are skipped as a unit. A `]` right after `[` or
    ///   `[^` is a member and does not close the class.
    /// - `[c]`, a class holding one plain character, is an `Atom`.
    /// - Without a closing `]` the `[` and everything after it is a
    ///   literal `Atom`.
    pub(super) fn consume_charset(&mut self) -> Result<NodeKind, CompileError> {
        // [.....]?  //
        // ^      ^__// to here
        // |_________// current byte, validated

        if !self.peek_byte_and_equals(0, b'[') {
            return Ok(NodeKind::Invalid);
        }

        let negative = self.peek_byte_and_equals(1, b'^');
        let body_start = if negative { 2 } else { 1 };
        let mut length = body_start;

        if self.peek_byte_and_equals(length, b']') {
            // a leading `]` is a member, e.g. `[]a]`, `[^]a]`
            length += 1;
        }

        loop {
            match self.peek_byte(length) {
                Some(b']') => break,
                Some(b'\\') => {
                    length += 1;
                    if length < self.remaining() {
                        length += self.peek_char_width(length)?;
                    }
                }
                Some(b'[') => {
                    length += match self.match_charset_posix_item(length) {
                        Some(item_length) => item_length,
                        None => 1,
                    };
                }
                Some(_) => {
                    length += self.peek_char_width(length)?;
                }
                None => {
                    // unterminated
                    self.advance_to_end();
                    return Ok(NodeKind::Atom);
                }
            }
        }

        // `length` is the offset of the closing `]`
        let body_length = length - body_start;
        let kind = if !negative
            && body_length > 0
            && !self.peek_byte_and_equals(body_start, b'\\')
            && self.peek_char_width(body_start)? == body_length
        {
            // degenerate class with one character
            NodeKind::Atom
        } else {
            NodeKind::Class
        };

        self.advance(length + 1);
        Ok(kind)
    }

    fn match_charset_posix_item(&self, offset: usize) -> Option<usize> {
        // [:alpha:]  [=a=]  [.a.]
        let delimiter = match self.peek_byte(offset + 1) {
            Some(b @ (b':' | b'=' | b'.')) => b,
            _ => return None,
        };

        let mut length = 2;
        loop {
            match self.peek_byte(offset + length) {
                Some(b) if b == delimiter => {
                    return if length > 2 && self.peek_byte_and_equals(offset + length + 1, b']') {
                        Some(length + 2)
                    } else {
                        None
                    };
                }
                Some(b) if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' => length += 1,
                _ => return None,
            }
        }
    }
}

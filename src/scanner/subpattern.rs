// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{error::CompileError, node::NodeKind};

use super::Scanner;

impl Scanner<'_> {
    pub(super) fn consume_subpattern(&mut self) -> Result<NodeKind, CompileError> {
        let current_byte = match self.peek_byte(0) {
            Some(b) => b,
            None => return Ok(NodeKind::Invalid),
        };

        let kind = match current_byte {
            b'(' if self.peek_byte_and_equals(1, b'?') => self.consume_group()?,
            b'(' | b'|' => {
                self.advance(1);
                NodeKind::Branch
            }
            b'*' | b'+' | b'?' => {
                self.advance(1);
                if self.peek_byte_and_equals(0, b'?') {
                    // lazy
                    self.advance(1);
                }
                NodeKind::Piece
            }
            b'{' => match self.match_repetition() {
                Some(length) => {
                    self.advance(length);
                    NodeKind::Piece
                }
                None => {
                    // a literal `{`
                    self.advance(1);
                    NodeKind::Atom
                }
            },
            b'\\' => self.consume_escape()?,
            b'.' => {
                self.advance(1);
                NodeKind::Class
            }
            b'^' | b'$' => {
                self.advance(1);
                NodeKind::Anchor
            }
            b'[' => self.consume_charset()?,
            b')' => {
                self.advance(1);
                NodeKind::Tail
            }
            _ => {
                let width = self.peek_char_width(0)?;
                self.advance(width);
                NodeKind::Atom
            }
        };

        Ok(kind)
    }

    fn match_repetition(&self) -> Option<usize> {
        // {m}  {m,}  {m,n}
        // ^__ current byte, validated
        let from = self.match_digits(1);
        if from == 0 {
            return None;
        }

        let mut length = 1 + from;
        if self.peek_byte_and_equals(length, b',') {
            length += 1;
            length += self.match_digits(length);
        }

        if self.peek_byte_and_equals(length, b'}') {
            Some(length + 1)
        } else {
            None
        }
    }
}

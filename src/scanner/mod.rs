// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Syntax Summary:
//
// Meta characters and the node kinds they produce:
//
// - ( |          Branch
// - )            Tail
// - * + ?        Piece, optionally followed by `?` (lazy)
// - {m,n}        Piece
// - [ ]  .       Class
// - ^ $          Anchor
// - \            Escape, see `escape.rs`
// - (? ...)      Special group, see `group.rs`
//
// Any other character is an Atom. Constructs that fail to match their
// grammar are never errors: the leading character is consumed as a
// literal Atom (or as a Branch for `(`) and scanning resumes after it.

mod charset;
mod escape;
mod group;
mod subpattern;

pub use group::named_group_name;

use crate::{
    chartype::{is_digit, is_name_start, is_word},
    error::CompileError,
    node::{Node, NodeKind},
    utf8reader::char_width,
};

/// Classifies the construct starting at `offset`.
///
/// This is the single reusable classification primitive: the sizing pass
/// calls it once per node, and it always consumes at least one byte when
/// `offset` is inside the pattern. At the end of the pattern the result is
/// an `Invalid` node of length 0.
pub fn consume_subpattern(pattern: &[u8], offset: usize) -> Result<Node, CompileError> {
    let mut scanner = Scanner::new(pattern, offset);
    let kind = scanner.consume_subpattern()?;
    Ok(scanner.node_from_start(kind, offset))
}

/// Classifies the escape sequence starting at the backslash at `offset`.
pub fn consume_escape(pattern: &[u8], offset: usize) -> Result<Node, CompileError> {
    let mut scanner = Scanner::new(pattern, offset);
    let kind = scanner.consume_escape()?;
    Ok(scanner.node_from_start(kind, offset))
}

/// Classifies the special group starting with `(?` at `offset`.
pub fn consume_group(pattern: &[u8], offset: usize) -> Result<Node, CompileError> {
    let mut scanner = Scanner::new(pattern, offset);
    let kind = scanner.consume_group()?;
    Ok(scanner.node_from_start(kind, offset))
}

/// Classifies the bracket expression starting with `[` at `offset`.
pub fn consume_charset(pattern: &[u8], offset: usize) -> Result<Node, CompileError> {
    let mut scanner = Scanner::new(pattern, offset);
    let kind = scanner.consume_charset()?;
    Ok(scanner.node_from_start(kind, offset))
}

/// Splits the whole pattern into nodes.
pub fn scan_nodes(pattern: &[u8]) -> Result<Vec<Node>, CompileError> {
    let mut nodes = vec![];
    let mut offset = 0;

    while offset < pattern.len() {
        let node = consume_subpattern(pattern, offset)?;
        offset = node.range.end();
        nodes.push(node);
    }

    Ok(nodes)
}

/// A read-only cursor over the pattern bytes.
///
/// All `peek_*` methods take an offset relative to the current position
/// and return `None`/`false` past the end of the pattern, so a grammar can
/// be matched by lookahead before anything is committed with `advance`.
pub(crate) struct Scanner<'a> {
    pattern: &'a [u8],
    offset: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(pattern: &'a [u8], offset: usize) -> Self {
        Self {
            pattern,
            offset: offset.min(pattern.len()),
        }
    }

    fn node_from_start(&self, kind: NodeKind, start: usize) -> Node {
        Node::from_offset_pair(kind, start.min(self.offset), self.offset)
    }

    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.pattern.get(self.offset + offset).copied()
    }

    fn peek_byte_and_equals(&self, offset: usize, expected_byte: u8) -> bool {
        self.peek_byte(offset) == Some(expected_byte)
    }

    fn peek_byte_matches(&self, offset: usize, predicate: fn(u8) -> bool) -> bool {
        matches!(self.peek_byte(offset), Some(b) if predicate(b))
    }

    /// Width of the character at the relative `offset`.
    fn peek_char_width(&self, offset: usize) -> Result<usize, CompileError> {
        char_width(self.pattern, self.offset + offset)
    }

    fn remaining(&self) -> usize {
        self.pattern.len() - self.offset
    }

    fn advance(&mut self, count: usize) {
        debug_assert!(count <= self.remaining());
        self.offset = (self.offset + count).min(self.pattern.len());
    }

    fn advance_to_end(&mut self) {
        self.offset = self.pattern.len();
    }

    /// Matches `[1-9]?[0-9]`-like runs: one or two decimal digits.
    /// Returns the number of digits.
    fn match_short_number(&self, offset: usize) -> Option<usize> {
        if !self.peek_byte_matches(offset, is_digit) {
            return None;
        }

        if self.peek_byte_matches(offset + 1, is_digit) {
            Some(2)
        } else {
            Some(1)
        }
    }

    /// Matches `-?NN`, returns the length.
    fn match_signed_short_number(&self, offset: usize) -> Option<usize> {
        if self.peek_byte_and_equals(offset, b'-') {
            self.match_short_number(offset + 1).map(|n| n + 1)
        } else {
            self.match_short_number(offset)
        }
    }

    /// Matches a run of decimal digits of any length (possibly empty).
    fn match_digits(&self, offset: usize) -> usize {
        let mut count = 0;
        while self.peek_byte_matches(offset + count, is_digit) {
            count += 1;
        }
        count
    }

    /// Matches `name` followed by `terminator`, where name is
    /// `[a-zA-Z_][a-zA-Z0-9_]*`. Returns the length including the terminator.
    fn match_name(&self, offset: usize, terminator: u8) -> Option<usize> {
        if !self.peek_byte_matches(offset, is_name_start) {
            return None;
        }

        let mut length = 1;
        while self.peek_byte_matches(offset + length, is_word) {
            length += 1;
        }

        if self.peek_byte_and_equals(offset + length, terminator) {
            Some(length + 1)
        } else {
            None
        }
    }
}

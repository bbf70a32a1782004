// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Special groups:
//
// - (?#...)          comment
// - (?<name>...)     named capture group, also `(?P<name>` and `(?'name'`
// - (?P=name)        back reference by name
// - (?P>name)        subroutine call by name
// - (?imnsx-imnsx)   mode modifier
// - (?imnsx-imnsx:   mode modifier group
// - (?^imnsx) (?^:   mode reset
// - (?|...)          branch reset
// - (?>...)          atomic group
// - (?:...)          non-capturing group
// - (?=...)  (?!...) lookahead
// - (?<=...) (?<!...) lookbehind
// - (?(cond)...)     conditional, cond is `N`, `+N`, `-N`, `<name>`, `'name'`
//                    or `name`. For `(?(?=...)` only `(?(` is consumed.
//
// Anything else, e.g. `(?z)`, leaves `?z)` to the dispatcher and consumes
// `(` as a plain branch.

use crate::{
    error::CompileError,
    node::{Node, NodeKind, SpecialGroup},
};

use super::Scanner;

/// The name of a named capture group node, e.g. `year` for `(?<year>`.
pub fn named_group_name<'a>(pattern: &'a [u8], node: &Node) -> Option<&'a [u8]> {
    if node.kind != NodeKind::Special(SpecialGroup::NamedCapture) {
        return None;
    }

    let span = pattern.get(node.range.index..node.range.end())?;
    let name_start = if span.starts_with(b"(?P<") { 4 } else { 3 };

    span.get(name_start..span.len().checked_sub(1)?)
}

impl Scanner<'_> {
    pub(super) fn consume_group(&mut self) -> Result<NodeKind, CompileError> {
        // (?xxx?  //
        // ^    ^__// to here
        // |_______// current byte, validated

        if !(self.peek_byte_and_equals(0, b'(') && self.peek_byte_and_equals(1, b'?')) {
            return Ok(NodeKind::Invalid);
        }

        let matched: Option<(NodeKind, usize)> = match self.peek_byte(2) {
            Some(b'#') => self
                .match_group_comment()?
                .map(|length| (SpecialGroup::Comment.into(), length)),
            Some(b'P') => match self.peek_byte(3) {
                Some(b'<') => self
                    .match_name(4, b'>')
                    .map(|length| (SpecialGroup::NamedCapture.into(), length + 4)),
                Some(b'=' | b'>') => self
                    .match_name(4, b')')
                    .map(|length| (NodeKind::BackReference, length + 4)),
                _ => None,
            },
            Some(b'<') => match self.peek_byte(3) {
                Some(b'=') => Some((SpecialGroup::LookBehind.into(), 4)),
                Some(b'!') => Some((SpecialGroup::LookBehindNegative.into(), 4)),
                _ => self
                    .match_name(3, b'>')
                    .map(|length| (SpecialGroup::NamedCapture.into(), length + 3)),
            },
            Some(b'\'') => self
                .match_name(3, b'\'')
                .map(|length| (SpecialGroup::NamedCapture.into(), length + 3)),
            Some(b'i' | b'm' | b'n' | b's' | b'x' | b'-') => self.match_group_mode_modifier(),
            Some(b'^') => self.match_group_mode_reset(),
            Some(b'|') => Some((SpecialGroup::BranchReset.into(), 3)),
            Some(b'>') => Some((SpecialGroup::Atomic.into(), 3)),
            Some(b'=') => Some((SpecialGroup::LookAhead.into(), 3)),
            Some(b'!') => Some((SpecialGroup::LookAheadNegative.into(), 3)),
            Some(b':') => Some((SpecialGroup::NonCapturing.into(), 3)),
            Some(b'(') => self
                .match_group_condition()
                .map(|length| (SpecialGroup::Conditional.into(), length)),
            _ => None,
        };

        match matched {
            Some((kind, length)) => {
                self.advance(length);
                Ok(kind)
            }
            None => {
                // not a special group, consume `(` only
                self.advance(1);
                Ok(NodeKind::Branch)
            }
        }
    }

    fn match_group_comment(&self) -> Result<Option<usize>, CompileError> {
        // (?#...)
        //    ^  ^__ to here (included)
        let mut length = 3;
        while length < self.remaining() {
            if self.peek_byte_and_equals(length, b')') {
                return Ok(Some(length + 1));
            }
            length += self.peek_char_width(length)?;
        }

        Ok(None)
    }

    fn match_group_flags(&self, offset: usize) -> usize {
        let mut count = 0;
        while matches!(
            self.peek_byte(offset + count),
            Some(b'i' | b'm' | b'n' | b's' | b'x')
        ) {
            count += 1;
        }
        count
    }

    /// Matches the closing `)` or `:` of a mode modifier at `offset`.
    fn match_group_mode_end(
        &self,
        offset: usize,
        kind: SpecialGroup,
    ) -> Option<(NodeKind, usize)> {
        match self.peek_byte(offset) {
            Some(b')') => Some((kind.into(), offset + 1)),
            Some(b':') => {
                let kind = if kind == SpecialGroup::ModeModifier {
                    SpecialGroup::ModeModifierGroup
                } else {
                    kind
                };
                Some((kind.into(), offset + 1))
            }
            _ => None,
        }
    }

    fn match_group_mode_modifier(&self) -> Option<(NodeKind, usize)> {
        // (?imsx-imsx)  (?imsx-imsx:
        let enabled = self.match_group_flags(2);
        let mut offset = 2 + enabled;
        let mut disabled = 0;

        if self.peek_byte_and_equals(offset, b'-') {
            disabled = self.match_group_flags(offset + 1);
            offset += 1 + disabled;
        }

        if enabled + disabled == 0 {
            return None;
        }

        self.match_group_mode_end(offset, SpecialGroup::ModeModifier)
    }

    fn match_group_mode_reset(&self) -> Option<(NodeKind, usize)> {
        // (?^)  (?^imsx:
        let offset = 3 + self.match_group_flags(3);
        self.match_group_mode_end(offset, SpecialGroup::ModeReset)
    }

    fn match_group_condition(&self) -> Option<usize> {
        // (?(1)  (?(-1)  (?(<name>)  (?('name')  (?(name)  (?(?=...)
        //    ^__ condition starts here
        let condition = match self.peek_byte(3) {
            Some(b'?') => return Some(3),
            Some(b'+' | b'-') => match self.match_digits(4) {
                0 => None,
                n => Some(n + 1),
            },
            Some(b'0'..=b'9') => Some(self.match_digits(3)),
            Some(b'<') => self.match_name(4, b'>').map(|length| length + 1),
            Some(b'\'') => self.match_name(4, b'\'').map(|length| length + 1),
            _ => {
                let length = self.match_name(3, b')')?;
                // the closing `)` is matched below
                Some(length - 1)
            }
        }?;

        if self.peek_byte_and_equals(3 + condition, b')') {
            Some(3 + condition + 1)
        } else {
            None
        }
    }
}

impl From<SpecialGroup> for NodeKind {
    fn from(group: SpecialGroup) -> Self {
        NodeKind::Special(group)
    }
}

// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Escape sequences:
//
// - \1 .. \99          back reference by number
// - \g{-NN} \g{NN}     back reference by (relative) number
// - \g-NN \gNN
// - \g{name}           back reference by name
// - \k{name} \k<name>
// - \p{..} \P{..}      unicode/posix property, e.g. `\p{Greek}`, `\p{L}`
// - \pL \PL            one-letter property, one of `C L M N P S Z`
// - \x{hhhh} \xhh      character by code point, 2 to 4 hex digits in braces
// - \Q...\E            literal run
// - \cX                control character
// - \K                 keep out
// - \d \D \h \H \l \L \n \N \s \S \u \U \v \V \w \W \X
//                      preset character classes
// - \A \Z \G \b \B \< \>
//                      anchors and boundaries
//
// Any other escaped character is a literal. When an operand does not match
// its grammar only the backslash and the letter are consumed, e.g. `\g{!x}`
// is the literal `g` followed by `{!x}`.

use crate::{
    chartype::{is_alpha, is_digit, is_hex_digit, is_word},
    error::CompileError,
    node::NodeKind,
};

use super::Scanner;

impl Scanner<'_> {
    pub(super) fn consume_escape(&mut self) -> Result<NodeKind, CompileError> {
        // \xxxx?  //
        // ^    ^__// to here
        // |_______// current byte, validated

        if !self.peek_byte_and_equals(0, b'\\') {
            return Ok(NodeKind::Invalid);
        }

        let letter = match self.peek_byte(1) {
            Some(b) => b,
            None => {
                // trailing `\`, keep it as a literal
                self.advance(1);
                return Ok(NodeKind::Atom);
            }
        };

        let kind = match letter {
            b'1'..=b'9' => {
                // `\N` or `\NN`
                let length = if self.peek_byte_matches(2, is_digit) {
                    3
                } else {
                    2
                };
                self.advance(length);
                NodeKind::BackReference
            }
            b'g' => {
                let operand = self.match_escape_g_operand();
                self.consume_escape_operand(operand, NodeKind::BackReference)
            }
            b'k' => {
                let operand = self.match_escape_k_operand();
                self.consume_escape_operand(operand, NodeKind::BackReference)
            }
            b'p' | b'P' => {
                let operand = self.match_escape_p_operand();
                self.consume_escape_operand(operand, NodeKind::Class)
            }
            b'x' => {
                let operand = self.match_escape_x_operand();
                self.consume_escape_operand(operand, NodeKind::Atom)
            }
            b'Q' => {
                let operand = self.match_escape_q_operand()?;
                self.consume_escape_operand(operand, NodeKind::Atom)
            }
            b'c' => {
                let operand = if self.peek_byte_matches(2, is_alpha) {
                    Some(1)
                } else {
                    None
                };
                self.consume_escape_operand(operand, NodeKind::Atom)
            }
            b'K' => {
                self.advance(2);
                NodeKind::KeepOut
            }
            b'd' | b'D' | b'h' | b'H' | b'l' | b'L' | b'n' | b'N' | b's' | b'S' | b'u' | b'U'
            | b'v' | b'V' | b'w' | b'W' | b'X' => {
                self.advance(2);
                NodeKind::Class
            }
            b'A' | b'Z' | b'G' | b'b' | b'B' | b'>' | b'<' => {
                self.advance(2);
                NodeKind::Anchor
            }
            _ => {
                // a single escaped character, which may be multi-byte
                let width = self.peek_char_width(1)?;
                self.advance(1 + width);
                NodeKind::Atom
            }
        };

        Ok(kind)
    }

    /// Consumes `\` + letter and, when it matched, the operand.
    /// Falls back to a two-byte literal atom otherwise.
    fn consume_escape_operand(
        &mut self,
        operand_length: Option<usize>,
        kind: NodeKind,
    ) -> NodeKind {
        match operand_length {
            Some(length) => {
                self.advance(2 + length);
                kind
            }
            None => {
                self.advance(2);
                NodeKind::Atom
            }
        }
    }

    fn match_escape_g_operand(&self) -> Option<usize> {
        // \g{-NN}  \g{NN}  \g{name}  \g-NN  \gNN
        //   ^__ operand starts here

        if self.peek_byte_and_equals(2, b'{') {
            if let Some(length) = self.match_signed_short_number(3) {
                return if self.peek_byte_and_equals(3 + length, b'}') {
                    Some(length + 2)
                } else {
                    None
                };
            }

            return self.match_name(3, b'}').map(|length| length + 1);
        }

        self.match_signed_short_number(2)
    }

    fn match_escape_k_operand(&self) -> Option<usize> {
        // \k{name}  \k<name>
        match self.peek_byte(2) {
            Some(b'{') => self.match_name(3, b'}').map(|length| length + 1),
            Some(b'<') => self.match_name(3, b'>').map(|length| length + 1),
            _ => None,
        }
    }

    fn match_escape_p_operand(&self) -> Option<usize> {
        // \p{Letter}  \p{Old-Italic}  \pL
        match self.peek_byte(2) {
            Some(b'{') => {
                // property names are composed of word characters and '-'
                let mut length = 0;
                loop {
                    match self.peek_byte(3 + length) {
                        Some(b'}') if length > 0 => return Some(length + 2),
                        Some(b) if is_word(b) || b == b'-' => length += 1,
                        _ => return None,
                    }
                }
            }
            Some(b'C' | b'L'..=b'N' | b'P' | b'S' | b'Z') => Some(1),
            _ => None,
        }
    }

    fn match_escape_x_operand(&self) -> Option<usize> {
        // \x{hh}..\x{hhhh}  \xhh
        if self.peek_byte_and_equals(2, b'{') {
            let mut digits = 0;
            while digits < 4 && self.peek_byte_matches(3 + digits, is_hex_digit) {
                digits += 1;
            }

            if digits >= 2 && self.peek_byte_and_equals(3 + digits, b'}') {
                Some(digits + 2)
            } else {
                None
            }
        } else if self.peek_byte_matches(2, is_hex_digit) && self.peek_byte_matches(3, is_hex_digit)
        {
            Some(2)
        } else {
            None
        }
    }

    fn match_escape_q_operand(&self) -> Result<Option<usize>, CompileError> {
        // \Q...\E
        //   ^   ^__ operand ends here (included)
        let mut length = 0;
        while 2 + length < self.remaining() {
            if self.peek_byte_and_equals(2 + length, b'\\')
                && self.peek_byte_and_equals(3 + length, b'E')
            {
                return Ok(Some(length + 2));
            }
            length += self.peek_char_width(2 + length)?;
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        location::Location,
        node::{Node, NodeKind},
        scanner::{consume_escape, tests::scan_kinds},
    };

    fn escape(s: &str) -> (NodeKind, usize) {
        let node = consume_escape(s.as_bytes(), 0).unwrap();
        (node.kind, node.range.length)
    }

    #[test]
    fn test_escape_precondition() {
        assert_eq!(
            consume_escape(b"abc", 0).unwrap(),
            Node::new(NodeKind::Invalid, Location::new_range(0, 0))
        );
        assert_eq!(escape(r"\"), (NodeKind::Atom, 1));
        assert_eq!(
            consume_escape(br"ab\d", 2).unwrap(),
            Node::new(NodeKind::Class, Location::new_range(2, 2))
        );
    }

    #[test]
    fn test_escape_back_reference_by_number() {
        assert_eq!(escape(r"\1"), (NodeKind::BackReference, 2));
        assert_eq!(escape(r"\12"), (NodeKind::BackReference, 3));
        assert_eq!(escape(r"\123"), (NodeKind::BackReference, 3));
        assert_eq!(escape(r"\1a"), (NodeKind::BackReference, 2));
        assert_eq!(escape(r"\9"), (NodeKind::BackReference, 2));

        // `\0` is an escaped literal
        assert_eq!(escape(r"\0"), (NodeKind::Atom, 2));
    }

    #[test]
    fn test_escape_g() {
        assert_eq!(escape(r"\g1"), (NodeKind::BackReference, 3));
        assert_eq!(escape(r"\g12"), (NodeKind::BackReference, 4));
        assert_eq!(escape(r"\g-1"), (NodeKind::BackReference, 4));
        assert_eq!(escape(r"\g-12"), (NodeKind::BackReference, 5));
        assert_eq!(escape(r"\g{1}"), (NodeKind::BackReference, 5));
        assert_eq!(escape(r"\g{12}"), (NodeKind::BackReference, 6));
        assert_eq!(escape(r"\g{-1}"), (NodeKind::BackReference, 6));
        assert_eq!(escape(r"\g{-12}"), (NodeKind::BackReference, 7));
        assert_eq!(escape(r"\g{name}"), (NodeKind::BackReference, 8));
        assert_eq!(escape(r"\g{_n1}x"), (NodeKind::BackReference, 7));

        // fallbacks
        assert_eq!(escape(r"\g"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\ggggg"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\g{!bad}"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\g{}"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\g{12"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\g{123}"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\g{-}"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\g{name"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\g{na-me}"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\g-x"), (NodeKind::Atom, 2));

        assert_eq!(
            scan_kinds(r"\ggggg"),
            vec![
                (NodeKind::Atom, 2),
                (NodeKind::Atom, 1),
                (NodeKind::Atom, 1),
                (NodeKind::Atom, 1),
                (NodeKind::Atom, 1),
            ]
        );
    }

    #[test]
    fn test_escape_k() {
        assert_eq!(escape(r"\k{name}"), (NodeKind::BackReference, 8));
        assert_eq!(escape(r"\k<name>"), (NodeKind::BackReference, 8));
        assert_eq!(escape(r"\k<_>"), (NodeKind::BackReference, 5));

        assert_eq!(escape(r"\k"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\k<1a>"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\k<name}"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\k{}"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\k'name'"), (NodeKind::Atom, 2));
    }

    #[test]
    fn test_escape_property() {
        assert_eq!(escape(r"\p{L}"), (NodeKind::Class, 5));
        assert_eq!(escape(r"\P{Greek}"), (NodeKind::Class, 9));
        assert_eq!(escape(r"\p{Old_Italic}"), (NodeKind::Class, 14));
        assert_eq!(escape(r"\p{Old-Italic}"), (NodeKind::Class, 14));
        assert_eq!(escape(r"\pZ"), (NodeKind::Class, 3));
        assert_eq!(escape(r"\PC"), (NodeKind::Class, 3));
        assert_eq!(escape(r"\pM"), (NodeKind::Class, 3));

        assert_eq!(escape(r"\pz"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\pO"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\p{}"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\p{L"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\p{L M}"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\p"), (NodeKind::Atom, 2));
    }

    #[test]
    fn test_escape_hex() {
        assert_eq!(escape(r"\x41"), (NodeKind::Atom, 4));
        assert_eq!(escape(r"\xfF0"), (NodeKind::Atom, 4));
        assert_eq!(escape(r"\x{41}"), (NodeKind::Atom, 6));
        assert_eq!(escape(r"\x{263}"), (NodeKind::Atom, 7));
        assert_eq!(escape(r"\x{263A}"), (NodeKind::Atom, 8));

        assert_eq!(escape(r"\x"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\x4"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\x4g"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\x{4}"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\x{12345}"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\x{12"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\x{zz}"), (NodeKind::Atom, 2));
    }

    #[test]
    fn test_escape_quote() {
        assert_eq!(escape(r"\Q\E"), (NodeKind::Atom, 4));
        assert_eq!(escape(r"\Qa.b*\E"), (NodeKind::Atom, 8));
        assert_eq!(escape(r"\Qa\\E"), (NodeKind::Atom, 6));
        assert_eq!(escape("\\Q文\\E+"), (NodeKind::Atom, 7));

        // unterminated
        assert_eq!(escape(r"\Qabc"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\Q"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\Qabc\"), (NodeKind::Atom, 2));
    }

    #[test]
    fn test_escape_control() {
        assert_eq!(escape(r"\cA"), (NodeKind::Atom, 3));
        assert_eq!(escape(r"\cz"), (NodeKind::Atom, 3));
        assert_eq!(escape(r"\c1"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\c"), (NodeKind::Atom, 2));
    }

    #[test]
    fn test_escape_no_operand() {
        assert_eq!(escape(r"\K"), (NodeKind::KeepOut, 2));

        for letter in "dDhHlLnNsSuUvVwWX".chars() {
            assert_eq!(escape(&format!("\\{}", letter)), (NodeKind::Class, 2));
        }

        for letter in "AZGbB<>".chars() {
            assert_eq!(escape(&format!("\\{}", letter)), (NodeKind::Anchor, 2));
        }
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape(r"\\"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\."), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\t"), (NodeKind::Atom, 2));
        assert_eq!(escape(r"\z"), (NodeKind::Atom, 2));
        assert_eq!(escape("\\é"), (NodeKind::Atom, 3));
        assert_eq!(escape("\\😊"), (NodeKind::Atom, 5));
    }
}

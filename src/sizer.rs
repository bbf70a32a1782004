// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use log::trace;

use crate::{
    error::CompileError,
    location::Location,
    node::{node_length, Node, NodeKind, SpecialGroup, ATOM_NODE_SIZE},
    scanner::{consume_subpattern, named_group_name},
};

/// A capture group found while sizing, referenced by index by the later
/// stages instead of by nesting.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CaptureGroup {
    pub index: usize, // starts at 1, the whole match is 0
    pub name: Option<String>,
    pub range: Location, // the opening `(`, `(?<name>` etc.
}

/// The result of the sizing pass.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PatternLength {
    pub size: usize,
    pub node_count: usize,
    pub capture_groups: Vec<CaptureGroup>,
}

/// Running state of the sizing pass.
#[derive(Debug, Default)]
struct SizeAccumulator {
    running_size: usize,
    node_count: usize,
    atom_run_open: bool,
}

impl SizeAccumulator {
    fn add(&mut self, node: &Node) {
        match node.kind {
            NodeKind::Atom => {
                // atoms are stored in their source form, which is never
                // shorter than the decoded literal
                let literal_length = node.range.length;

                if self.atom_run_open {
                    self.running_size += literal_length;
                } else {
                    // the header holds the first byte inline
                    self.running_size += ATOM_NODE_SIZE + literal_length - 1;
                    self.node_count += 1;
                    self.atom_run_open = true;
                }
            }
            kind => {
                self.atom_run_open = false;
                self.running_size += node_length(kind);
                self.node_count += 1;
            }
        }
    }
}

/// Computes the number of bytes required to store all nodes of `pattern`.
///
/// Consecutive atoms are coalesced into a single atom node.
pub fn regex_length(pattern: &[u8]) -> Result<PatternLength, CompileError> {
    let mut accumulator = SizeAccumulator::default();
    let mut capture_groups = vec![];
    let mut offset = 0;

    while offset < pattern.len() {
        let node = consume_subpattern(pattern, offset)?;

        if node.kind == NodeKind::Invalid || node.range.end() <= offset {
            return Err(CompileError::InvalidEntry { offset });
        }

        trace!(
            "node {} at {}..{}",
            node.kind,
            node.range.index,
            node.range.end()
        );

        if let Some(capture_group) = capture_group_of(pattern, &node, capture_groups.len() + 1) {
            capture_groups.push(capture_group);
        }

        accumulator.add(&node);
        offset = node.range.end();
    }

    Ok(PatternLength {
        size: accumulator.running_size,
        node_count: accumulator.node_count,
        capture_groups,
    })
}

fn capture_group_of(pattern: &[u8], node: &Node, index: usize) -> Option<CaptureGroup> {
    match node.kind {
        NodeKind::Branch if pattern[node.range.index] == b'(' => Some(CaptureGroup {
            index,
            name: None,
            range: node.range,
        }),
        NodeKind::Special(SpecialGroup::NamedCapture) => Some(CaptureGroup {
            index,
            name: named_group_name(pattern, node)
                .map(|name| String::from_utf8_lossy(name).into_owned()),
            range: node.range,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        error::CompileError,
        location::Location,
        node::{
            ANCHOR_NODE_SIZE, ATOM_NODE_SIZE, BACK_REFERENCE_NODE_SIZE, BRANCH_NODE_SIZE,
            CLASS_NODE_SIZE, KEEP_OUT_NODE_SIZE, PIECE_NODE_SIZE, SPECIAL_NODE_SIZE,
            TAIL_NODE_SIZE,
        },
    };

    use super::{regex_length, CaptureGroup};

    fn size_of(s: &str) -> usize {
        regex_length(s.as_bytes()).unwrap().size
    }

    #[test]
    fn test_regex_length_empty() {
        let length = regex_length(b"").unwrap();
        assert_eq!(length.size, 0);
        assert_eq!(length.node_count, 0);
        assert_eq!(length.capture_groups, vec![]);
    }

    #[test]
    fn test_regex_length_atom_run() {
        assert_eq!(size_of("a"), ATOM_NODE_SIZE);
        assert_eq!(size_of("abc"), ATOM_NODE_SIZE + 2);
        assert_eq!(
            size_of("a(b"),
            ATOM_NODE_SIZE + BRANCH_NODE_SIZE + ATOM_NODE_SIZE
        );
        assert_eq!(
            size_of("ab|cd"),
            (ATOM_NODE_SIZE + 1) * 2 + BRANCH_NODE_SIZE
        );

        // multi-byte characters cost their encoded width
        assert_eq!(size_of("a文"), ATOM_NODE_SIZE + 3);
        assert_eq!(size_of("文a"), ATOM_NODE_SIZE + 2 + 1);
        assert_eq!(size_of("😊"), ATOM_NODE_SIZE + 3);

        // escaped literals join the run
        assert_eq!(size_of(r"a\.b"), ATOM_NODE_SIZE + 3);
        assert_eq!(size_of(r"\Qa*\Eb"), ATOM_NODE_SIZE + 6);

        // unterminated class
        assert_eq!(size_of("[abc"), ATOM_NODE_SIZE + 3);
        assert_eq!(size_of("x[abc"), ATOM_NODE_SIZE + 4);

        // a comment closes the run but costs nothing
        assert_eq!(size_of("a(?#c)b"), ATOM_NODE_SIZE * 2);
    }

    #[test]
    fn test_regex_length_nodes() {
        assert_eq!(
            size_of(r"^a+$"),
            ANCHOR_NODE_SIZE + ATOM_NODE_SIZE + PIECE_NODE_SIZE + ANCHOR_NODE_SIZE
        );
        assert_eq!(
            size_of(r"(\d)\1"),
            BRANCH_NODE_SIZE + CLASS_NODE_SIZE + TAIL_NODE_SIZE + BACK_REFERENCE_NODE_SIZE
        );
        assert_eq!(
            size_of(r"a\Kb"),
            ATOM_NODE_SIZE + KEEP_OUT_NODE_SIZE + ATOM_NODE_SIZE
        );
        assert_eq!(
            size_of(r"(?=x)"),
            SPECIAL_NODE_SIZE + ATOM_NODE_SIZE + TAIL_NODE_SIZE
        );
        assert_eq!(size_of(r"[a-z]."), CLASS_NODE_SIZE * 2);

        // `+` after a quantifier is another piece
        assert_eq!(size_of("a++"), ATOM_NODE_SIZE + PIECE_NODE_SIZE * 2);
        assert_eq!(size_of("a+?"), ATOM_NODE_SIZE + PIECE_NODE_SIZE);
    }

    #[test]
    fn test_regex_length_all_backslashes() {
        for count in 0..8 {
            let pattern = "\\".repeat(count);
            let length = regex_length(pattern.as_bytes()).unwrap();
            let expected = if count == 0 {
                0
            } else {
                ATOM_NODE_SIZE + count - 1
            };
            assert_eq!(length.size, expected);
        }
    }

    #[test]
    fn test_regex_length_node_count() {
        assert_eq!(regex_length(b"abc").unwrap().node_count, 1);
        assert_eq!(regex_length(b"ab(c)*").unwrap().node_count, 5);
    }

    #[test]
    fn test_regex_length_capture_groups() {
        let length = regex_length(br"(a)(?:b)(?<year>c)(?P<m>d)('e)(?'x'f)(?=g)").unwrap();
        assert_eq!(
            length.capture_groups,
            vec![
                CaptureGroup {
                    index: 1,
                    name: None,
                    range: Location::new_range(0, 1)
                },
                CaptureGroup {
                    index: 2,
                    name: Some("year".to_owned()),
                    range: Location::new_range(8, 8)
                },
                CaptureGroup {
                    index: 3,
                    name: Some("m".to_owned()),
                    range: Location::new_range(18, 6)
                },
                CaptureGroup {
                    index: 4,
                    name: None,
                    range: Location::new_range(26, 1)
                },
                CaptureGroup {
                    index: 5,
                    name: Some("x".to_owned()),
                    range: Location::new_range(30, 5)
                },
            ]
        );
    }

    #[test]
    fn test_regex_length_invalid_utf8() {
        assert!(matches!(
            regex_length(b"abc\xe6\x96"),
            Err(CompileError::InvalidUtf8 { offset: 3, .. })
        ));
        assert!(matches!(
            regex_length(b"\xed\xa0\x80"),
            Err(CompileError::InvalidUtf8 { offset: 0, .. })
        ));
    }
}

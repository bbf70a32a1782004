// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::Display;

use crate::location::Location;

// Fixed sizes, in bytes, of the node headers in the node buffer.
pub const BRANCH_NODE_SIZE: usize = 8;
pub const PIECE_NODE_SIZE: usize = 12; // min, max and flags
pub const ATOM_NODE_SIZE: usize = 8; // includes one inline byte of the literal
pub const CLASS_NODE_SIZE: usize = 40; // 256-bit ASCII bitmap and a set reference
pub const TAIL_NODE_SIZE: usize = 4;
pub const ANCHOR_NODE_SIZE: usize = 4;
pub const BACK_REFERENCE_NODE_SIZE: usize = 8;
pub const KEEP_OUT_NODE_SIZE: usize = 4;
pub const SPECIAL_NODE_SIZE: usize = 8;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NodeKind {
    Invalid,
    Branch,        // `(`, `|`
    Piece,         // `*`, `+`, `?`, `{m,n}`
    Atom,          // literal char, escaped char, `\Q...\E`
    Class,         // `[...]`, `.`, `\d`, `\p{..}`
    Tail,          // `)`
    Anchor,        // `^`, `$`, `\b`, `\A` ...
    BackReference, // `\1`, `\g{-1}`, `\k<name>`, `(?P=name)`
    KeepOut,       // `\K`
    Special(SpecialGroup),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SpecialGroup {
    Comment,            // (?#...)
    NamedCapture,       // (?<name>, (?P<name>, (?'name'
    NonCapturing,       // (?:
    Atomic,             // (?>
    BranchReset,        // (?|
    LookAhead,          // (?=
    LookAheadNegative,  // (?!
    LookBehind,         // (?<=
    LookBehindNegative, // (?<!
    ModeModifier,       // (?i-s)
    ModeModifierGroup,  // (?i-s:
    ModeReset,          // (?^) or (?^i:
    Conditional,        // (?(1) or (?(<name>)
}

/// A classified node together with the bytes it consumed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Node {
    pub kind: NodeKind,
    pub range: Location,
}

impl Node {
    pub fn new(kind: NodeKind, range: Location) -> Self {
        Self { kind, range }
    }

    pub fn from_offset_pair(kind: NodeKind, start: usize, end: usize) -> Self {
        Self::new(kind, Location::from_offset_pair(start, end))
    }
}

/// The fixed cost of a node of the given kind in the node buffer.
///
/// Atoms additionally cost the bytes of their literal, see `sizer`.
pub fn node_length(kind: NodeKind) -> usize {
    match kind {
        NodeKind::Invalid => 0,
        NodeKind::Branch => BRANCH_NODE_SIZE,
        NodeKind::Piece => PIECE_NODE_SIZE,
        NodeKind::Atom => ATOM_NODE_SIZE,
        NodeKind::Class => CLASS_NODE_SIZE,
        NodeKind::Tail => TAIL_NODE_SIZE,
        NodeKind::Anchor => ANCHOR_NODE_SIZE,
        NodeKind::BackReference => BACK_REFERENCE_NODE_SIZE,
        NodeKind::KeepOut => KEEP_OUT_NODE_SIZE,
        NodeKind::Special(SpecialGroup::Comment) => 0,
        NodeKind::Special(_) => SPECIAL_NODE_SIZE,
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Invalid => write!(f, "invalid"),
            NodeKind::Branch => write!(f, "branch"),
            NodeKind::Piece => write!(f, "piece"),
            NodeKind::Atom => write!(f, "atom"),
            NodeKind::Class => write!(f, "class"),
            NodeKind::Tail => write!(f, "tail"),
            NodeKind::Anchor => write!(f, "anchor"),
            NodeKind::BackReference => write!(f, "back_reference"),
            NodeKind::KeepOut => write!(f, "keep_out"),
            NodeKind::Special(group) => write!(f, "special({})", group),
        }
    }
}

impl Display for SpecialGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SpecialGroup::Comment => "comment",
            SpecialGroup::NamedCapture => "named_capture",
            SpecialGroup::NonCapturing => "non_capturing",
            SpecialGroup::Atomic => "atomic",
            SpecialGroup::BranchReset => "branch_reset",
            SpecialGroup::LookAhead => "look_ahead",
            SpecialGroup::LookAheadNegative => "look_ahead_negative",
            SpecialGroup::LookBehind => "look_behind",
            SpecialGroup::LookBehindNegative => "look_behind_negative",
            SpecialGroup::ModeModifier => "mode_modifier",
            SpecialGroup::ModeModifierGroup => "mode_modifier_group",
            SpecialGroup::ModeReset => "mode_reset",
            SpecialGroup::Conditional => "conditional",
        };
        f.write_str(name)
    }
}

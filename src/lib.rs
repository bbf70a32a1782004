// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

mod chartype;
mod error;
mod location;
mod node;
mod regex;
mod utf8reader;

pub mod compiler;
pub mod scanner;
pub mod sizer;

pub use chartype::{is_alpha, is_digit, is_hex_digit, is_word};
pub use compiler::{compile, compile_from_str, CompileOptions};
pub use error::{CompileError, Utf8Error};
pub use location::Location;
pub use node::{node_length, Node, NodeKind, SpecialGroup};
pub use regex::Regex;
pub use scanner::{consume_charset, consume_escape, consume_group, consume_subpattern, scan_nodes};
pub use sizer::{regex_length, CaptureGroup, PatternLength};
pub use utf8reader::read_char;

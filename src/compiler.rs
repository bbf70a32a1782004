// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use log::{debug, warn};

use crate::{error::CompileError, regex::Regex, sizer::regex_length};

/// Default maximum size of the node buffer, 10 MiB.
pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Options for compiling a pattern.
///
/// Only `size_limit` affects the sizing of the node buffer, the flags are
/// kept for the stages that build the matching automaton.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CompileOptions {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
    pub extended: bool,
    pub size_limit: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: false,
            extended: false,
            size_limit: DEFAULT_SIZE_LIMIT,
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as the inline flag `(?i)`.
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    /// Same as the inline flag `(?m)`.
    pub fn multi_line(mut self, yes: bool) -> Self {
        self.multi_line = yes;
        self
    }

    /// Same as the inline flag `(?s)`.
    pub fn dot_matches_new_line(mut self, yes: bool) -> Self {
        self.dot_matches_new_line = yes;
        self
    }

    /// Same as the inline flag `(?x)`.
    pub fn extended(mut self, yes: bool) -> Self {
        self.extended = yes;
        self
    }

    pub fn size_limit(mut self, bytes: usize) -> Self {
        self.size_limit = bytes;
        self
    }
}

/// Compile from a traditional regular expression with the default options.
pub fn compile_from_str(s: &str) -> Result<Regex, CompileError> {
    compile(s.as_bytes(), &CompileOptions::default())
}

/// Compile from the raw bytes of a pattern.
///
/// The pattern must be valid UTF-8, otherwise `CompileError::InvalidUtf8`
/// is returned.
pub fn compile(pattern: &[u8], options: &CompileOptions) -> Result<Regex, CompileError> {
    debug!("compiling pattern of {} bytes", pattern.len());

    let length = regex_length(pattern)?;

    if length.size > options.size_limit {
        warn!(
            "node buffer of {} bytes exceeds the limit of {} bytes",
            length.size, options.size_limit
        );
        return Err(CompileError::TooLarge {
            size: length.size,
            limit: options.size_limit,
        });
    }

    debug!(
        "pattern sized: {} bytes, {} nodes, {} capture groups",
        length.size,
        length.node_count,
        length.capture_groups.len()
    );

    Ok(Regex::from_length(length, options.clone()))
}

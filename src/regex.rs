// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{
    compiler::{compile, CompileOptions},
    error::CompileError,
    sizer::{CaptureGroup, PatternLength},
};

/// A sized pattern: the node buffer is allocated with exactly the size
/// computed by the sizing pass and is filled by the automaton builder.
#[derive(Debug, Clone)]
pub struct Regex {
    node_buffer: Vec<u8>,
    node_count: usize,
    capture_groups: Vec<CaptureGroup>,
    options: CompileOptions,
}

impl Regex {
    pub fn new(pattern: &str) -> Result<Self, CompileError> {
        compile(pattern.as_bytes(), &CompileOptions::default())
    }

    pub fn with_options(pattern: &str, options: &CompileOptions) -> Result<Self, CompileError> {
        compile(pattern.as_bytes(), options)
    }

    pub(crate) fn from_length(length: PatternLength, options: CompileOptions) -> Self {
        Self {
            node_buffer: vec![0; length.size],
            node_count: length.node_count,
            capture_groups: length.capture_groups,
            options,
        }
    }

    /// Total size of the node buffer in bytes.
    pub fn size(&self) -> usize {
        self.node_buffer.len()
    }

    pub fn node_buffer(&self) -> &[u8] {
        &self.node_buffer
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn capture_groups(&self) -> &[CaptureGroup] {
        &self.capture_groups
    }

    /// The number of capture groups, not counting the whole match.
    pub fn capture_group_count(&self) -> usize {
        self.capture_groups.len()
    }

    pub fn get_capture_group_name_by_index(&self, index: usize) -> Option<&str> {
        self.capture_groups
            .iter()
            .find(|group| group.index == index)
            .and_then(|group| group.name.as_deref())
    }

    pub fn get_capture_group_index_by_name(&self, name: &str) -> Option<usize> {
        self.capture_groups
            .iter()
            .find(|group| group.name.as_deref() == Some(name))
            .map(|group| group.index)
    }
}

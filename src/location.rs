// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

/// A byte range within a pattern.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Location {
    pub index: usize,  // The byte offset in the pattern
    pub length: usize, // The length of the byte range
}

impl Location {
    /// Create a new `Location` representing a range of bytes.
    pub fn new_range(index: usize, length: usize) -> Self {
        Self { index, length }
    }

    /// Create a range `Location` from a start offset and an end offset (exclusive).
    pub fn from_offset_pair(start: usize, end: usize) -> Self {
        Self::new_range(start, end - start)
    }

    /// The offset just past the last byte of the range.
    pub fn end(&self) -> usize {
        self.index + self.length
    }

    /// Borrow the bytes covered by this range.
    pub fn slice<'a>(&self, pattern: &'a [u8]) -> &'a [u8] {
        &pattern[self.index..self.end()]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Location;

    #[test]
    fn test_location() {
        let l = Location::from_offset_pair(3, 7);
        assert_eq!(l, Location::new_range(3, 4));
        assert_eq!(l.end(), 7);
        assert_eq!(l.slice(b"abcdefghi"), b"defg");
    }
}

//! Whitespace tokenization over a mutable input buffer.
//!
//! Argument parsing works directly on an [`InputBuffer`]: it scans for the next
//! token with [`InputBuffer::next_poi`] and rewrites the buffer in place while
//! it goes (closing brackets are blanked, booleans are lower-cased). A buffer
//! therefore belongs to exactly one parse and is spent once that parse ends.

use std::fmt;
use std::ops::Index;

/// A half-open `[start, end)` range into an [`InputBuffer`].
///
/// When no token is left, `start` is `len + 1` and `end` is `len`; see
/// [`TokenRange::is_end`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRange {
    pub start: usize,
    pub end: usize,
}

impl TokenRange {
    /// Returns true if this is the "no more tokens" range of `input`.
    #[inline]
    pub fn is_end(&self, input: &InputBuffer) -> bool {
        self.start == input.end()
    }

    /// Number of chars covered by the range, zero for the end range.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owned, mutable command line text that arguments are parsed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    chars: Vec<char>,
}

impl InputBuffer {
    pub fn new(line: &str) -> Self {
        Self {
            chars: line.chars().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The `start` value carried by the "no more tokens" range: `len + 1`.
    #[inline]
    pub fn end(&self) -> usize {
        self.chars.len() + 1
    }

    #[inline]
    pub fn as_chars(&self) -> &[char] {
        &self.chars
    }

    /// Char at `pos`, or `None` past the end.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    /// Overwrites the char at `pos`. Out of range positions are ignored.
    pub fn set(&mut self, pos: usize, c: char) {
        if let Some(slot) = self.chars.get_mut(pos) {
            *slot = c;
        }
    }

    /// Replaces the char at `pos` with a space.
    pub fn blank(&mut self, pos: usize) {
        self.set(pos, ' ');
    }

    /// Skips whitespace from `cursor`, then returns the range up to the next
    /// whitespace or the end of the buffer. `cursor` is moved to the end of
    /// the returned range.
    ///
    /// Returns the end range (see [`TokenRange::is_end`]) when only
    /// whitespace remains.
    pub fn next_poi(&self, cursor: &mut usize) -> TokenRange {
        let len = self.chars.len();
        let mut range = TokenRange {
            start: len + 1,
            end: len,
        };
        let mut pos = *cursor;

        while pos < len {
            if !self.chars[pos].is_whitespace() {
                range.start = pos;
                break;
            }
            pos += 1;
        }

        while pos < len {
            if self.chars[pos].is_whitespace() {
                range.end = pos;
                break;
            }
            pos += 1;
        }

        *cursor = range.end;
        range
    }

    /// First position at or after `from` holding `target` that is not escaped.
    pub fn find_unescaped(&self, target: char, from: usize) -> Option<usize> {
        let mut pos = from;
        while pos < self.chars.len() {
            if self.chars[pos] == target && !crate::reserved::is_escaped(&self.chars, pos) {
                return Some(pos);
            }
            pos += 1;
        }
        None
    }

    /// Text covered by `range`, clamped to the buffer.
    pub fn slice(&self, range: TokenRange) -> String {
        self.substr(range.start, range.end)
    }

    /// Text between `start` and `end`, clamped to the buffer.
    pub fn substr(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        if start >= end {
            return String::new();
        }
        self.chars[start..end].iter().collect()
    }
}

impl Index<usize> for InputBuffer {
    type Output = char;

    fn index(&self, pos: usize) -> &char {
        &self.chars[pos]
    }
}

impl fmt::Display for InputBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl From<&str> for InputBuffer {
    fn from(line: &str) -> Self {
        Self::new(line)
    }
}

#![forbid(unsafe_code)]

//! Wrapping selection index.
//!
//! # Invariants
//!
//! 1. When `len > 0`, `index < len` after every operation.
//! 2. When `len == 0`, `index == 0` and [`Selection::current`] is `None`.
//! 3. Movement wraps: `next` past the last row lands on 0, `prev` before the
//!    first row lands on `len - 1`.
//!
//! Out-of-range indices are prevented by the arithmetic rather than detected
//! after the fact.

/// Selected row over a list of `len` matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    index: usize,
    len: usize,
}

impl Selection {
    /// Selection over `len` rows, starting at the first.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Replace the row count and select the first row.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.index = 0;
    }

    /// Move down one row, wrapping to the top.
    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    /// Move up one row, wrapping to the bottom.
    pub fn prev(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Jump to the first row.
    pub fn first(&mut self) {
        self.index = 0;
    }

    /// Jump to the last row.
    pub fn last(&mut self) {
        self.index = self.len.saturating_sub(1);
    }

    /// Select `index` if it is in range. Returns whether it was applied.
    pub fn set(&mut self, index: usize) -> bool {
        if index < self.len {
            self.index = index;
            true
        } else {
            false
        }
    }

    /// The selected row, or `None` when there are no rows.
    #[must_use]
    pub const fn current(&self) -> Option<usize> {
        if self.len == 0 { None } else { Some(self.index) }
    }

    /// Raw index (0 when empty).
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

//! Cursor position type.
//!
//! A cursor is an `(x, y)` pair: `x` is a **byte offset** into the row's raw
//! content and `y` is the row index. Both are 0-indexed. Byte offsets are
//! what the row model stores, so every conversion to visual columns goes
//! through [`Row::cx_to_rx`](crate::row::Row::cx_to_rx).
//!
//! Display layers convert to 1-indexed for the user; that conversion lives in
//! the `Display` impl and nowhere else.

use std::fmt;

/// A cursor in a buffer: byte offset `x` within row `y`.
///
/// # Ordering
///
/// Cursors are ordered row first, then byte offset, so sorting a set of
/// secondary cursors yields document order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
}

impl Cursor {
    /// The origin: row 0, byte 0.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    #[inline]
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    #[inline]
    #[must_use]
    pub const fn is_origin(self) -> bool {
        self.x == 0 && self.y == 0
    }
}

impl Ord for Cursor {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Cursor {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cur({}:{})", self.y, self.x)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.y.saturating_add(1), self.x.saturating_add(1))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

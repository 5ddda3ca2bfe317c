//! Jump list: bounded navigation history across files.
//!
//! The jump list records `(file, cursor)` waypoints before "jump" motions.
//! Navigate backward with [`JumpList::backward`] and forward with
//! [`JumpList::forward`].
//!
//! Navigation is browser-history style: going back and then jumping
//! somewhere new discards the abandoned forward path.
//!
//! ```text
//! entries:  A  B  C  D        current = None   (at the present)
//! backward  ─────────▶ C      current = 2
//! backward  ──────▶ B         current = 1
//! add(E)    A  B  E           C and D dropped, current = None
//! ```

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tracing::{trace, warn};

/// Default maximum number of entries (matches Vim).
pub const JUMPLIST_MAX: usize = 100;

/// One waypoint. Owns its own copy of the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpEntry {
    pub path: PathBuf,
    pub x: usize,
    pub y: usize,
}

impl JumpEntry {
    fn is_at(&self, path: &Path, x: usize, y: usize) -> bool {
        self.x == x && self.y == y && self.path == path
    }
}

/// Bounded jump history with a navigation cursor.
///
/// `current` is `None` while not navigating (the user is "at the present"),
/// otherwise an index into `entries`.
#[derive(Debug, Clone)]
pub struct JumpList {
    entries: VecDeque<JumpEntry>,
    current: Option<usize>,
    capacity: usize,
}

impl Default for JumpList {
    fn default() -> Self {
        Self::new()
    }
}

impl JumpList {
    /// Create an empty jump list holding at most [`JUMPLIST_MAX`] entries.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_capacity(JUMPLIST_MAX)
    }

    /// Create an empty jump list with a custom bound (minimum 1).
    #[must_use]
    pub const fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            current: None,
            capacity: if capacity == 0 { 1 } else { capacity },
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Navigation index, or `None` when not navigating.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> Option<usize> {
        self.current
    }

    #[inline]
    #[must_use]
    pub const fn is_navigating(&self) -> bool {
        self.current.is_some()
    }

    /// Entries from oldest to newest.
    pub fn entries(&self) -> impl Iterator<Item = &JumpEntry> {
        self.entries.iter()
    }

    // -- Mutation -----------------------------------------------------------

    /// Record a waypoint.
    ///
    /// Identical to the newest entry → no-op. Mid-navigation → everything
    /// after `current` is dropped first. At capacity → the oldest entry is
    /// evicted. Always leaves navigation afterwards.
    pub fn add(&mut self, path: impl AsRef<Path>, x: usize, y: usize) {
        let path = path.as_ref();
        if self.entries.back().is_some_and(|e| e.is_at(path, x, y)) {
            return;
        }

        if let Some(current) = self.current {
            if current + 1 < self.entries.len() {
                trace!(dropped = self.entries.len() - current - 1, "jump list branch truncated");
                self.entries.truncate(current + 1);
            }
        }

        if self.entries.try_reserve(1).is_err() {
            warn!("jump list allocation failed, entry dropped");
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(JumpEntry {
            path: path.to_path_buf(),
            x,
            y,
        });
        self.current = None;
    }

    /// Step to an older entry and return a copy of it.
    ///
    /// When not navigating, the walk starts at the newest entry, so the
    /// first call returns the second-newest. Returns `None` at the oldest
    /// entry or when the list is empty.
    pub fn backward(&mut self) -> Option<JumpEntry> {
        let last = self.entries.len().checked_sub(1)?;
        let from = self.current.unwrap_or(last);
        self.current = Some(from);
        if from == 0 {
            return None;
        }
        self.current = Some(from - 1);
        self.entries.get(from - 1).cloned()
    }

    /// Step to a newer entry and return a copy of it.
    ///
    /// Only moves while navigating. At the newest entry, navigation ends
    /// (back to the present) and `None` is returned.
    pub fn forward(&mut self) -> Option<JumpEntry> {
        let current = self.current?;
        if current + 1 >= self.entries.len() {
            self.current = None;
            return None;
        }
        self.current = Some(current + 1);
        self.entries.get(current + 1).cloned()
    }

    /// Stop navigating. Used after a fresh, non-jump edit.
    pub const fn reset_navigation(&mut self) {
        self.current = None;
    }

    /// Put the navigation index back to a value read from [`current`]
    /// earlier, e.g. after the jump target could not be opened. Indices
    /// past the end are treated as `None`.
    ///
    /// [`current`]: JumpList::current
    pub(crate) fn restore_navigation(&mut self, current: Option<usize>) {
        self.current = current.filter(|&i| i < self.entries.len());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

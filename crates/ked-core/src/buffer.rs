//! Text buffer: rows plus cursors.
//!
//! A `Buffer` owns an ordered list of [`Row`]s, a primary cursor, and a set
//! of secondary cursors. Windows refer to buffers by [`BufferId`]; the buffer
//! itself knows nothing about who is looking at it.
//!
//! # Cursor invariant
//!
//! For the primary cursor and every secondary cursor:
//!
//! - `y < rows.len()`, or the buffer is empty and the cursor is at the origin
//! - `x <= rows[y].len()` and `x` never points inside a multi-byte sequence
//!
//! Every method that moves a cursor or removes a row re-clamps, so callers
//! can hand in any coordinates.
//!
//! # Dirty vs. modified
//!
//! `dirty` means "something visible changed, redraw me" and is cleared by the
//! renderer through [`take_dirty`](Buffer::take_dirty). `modified` means the
//! content differs from what was loaded.

use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::row::{Row, clamp_tab_stop};

/// Name shown for buffers without a file.
pub const NO_NAME: &str = "[No Name]";

// ---------------------------------------------------------------------------
// BufferId
// ---------------------------------------------------------------------------

/// Index of a buffer in the editor's buffer collection.
///
/// This is a relation, not ownership. It may go stale when buffers are
/// closed, so every dereference goes through the editor, which re-validates
/// it against the live collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(usize);

impl BufferId {
    #[inline]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0.saturating_add(1))
    }
}

// ---------------------------------------------------------------------------
// CursorOutcome
// ---------------------------------------------------------------------------

/// Result of a multi-cursor operation, turned into a status message by the
/// editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorOutcome {
    /// A secondary cursor was added; `total` counts all cursors, primary
    /// included.
    Added { total: usize },
    /// All secondary cursors were removed.
    Cleared { removed: usize },
    NothingToClear,
    NoLineBelow,
    NoLineAbove,
}

impl CursorOutcome {
    /// True when the operation changed the cursor set.
    #[must_use]
    pub const fn changed(self) -> bool {
        matches!(self, Self::Added { .. } | Self::Cleared { .. })
    }
}

impl fmt::Display for CursorOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { total } => write!(f, "{total} cursors"),
            Self::Cleared { removed: 1 } => f.write_str("Cleared 1 cursor"),
            Self::Cleared { removed } => write!(f, "Cleared {removed} cursors"),
            Self::NothingToClear => f.write_str("No extra cursors"),
            Self::NoLineBelow => f.write_str("No line below"),
            Self::NoLineAbove => f.write_str("No line above"),
        }
    }
}

// ---------------------------------------------------------------------------
// Buffer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Buffer {
    rows: Vec<Row>,
    cursor: Cursor,
    cursors: Vec<Cursor>,
    path: Option<PathBuf>,
    name: String,
    tab_stop: usize,
    dirty: bool,
    modified: bool,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    /// Create an empty buffer with no file.
    #[must_use]
    pub fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            cursor: Cursor::ORIGIN,
            cursors: Vec::new(),
            path: None,
            name: NO_NAME.to_string(),
            tab_stop: clamp_tab_stop(tab_stop),
            dirty: true,
            modified: false,
        }
    }

    /// Create a buffer from text. Lines split on `\n`; a trailing `\r` on a
    /// line is dropped. A trailing newline does not produce an extra row.
    #[must_use]
    pub fn from_text(text: &str, tab_stop: usize) -> Self {
        Self::from_bytes(text.as_bytes(), tab_stop)
    }

    fn from_bytes(bytes: &[u8], tab_stop: usize) -> Self {
        let mut buf = Self::new(tab_stop);
        if bytes.is_empty() {
            return buf;
        }
        let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
        buf.rows = body
            .split(|&b| b == b'\n')
            .map(|line| Row::new(line.strip_suffix(b"\r").unwrap_or(line), buf.tab_stop))
            .collect();
        buf
    }

    /// Load a buffer from a file. The content does not need to be valid
    /// UTF-8; rows keep the raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read.
    pub fn from_file(path: &Path, tab_stop: usize) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut buf = Self::from_bytes(&bytes, tab_stop);
        buf.name = path.display().to_string();
        buf.path = Some(path.to_path_buf());
        Ok(buf)
    }

    /// Builder-style display name override.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    // -- Metadata -----------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub const fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    /// Change the tab stop and re-render every row. Values outside
    /// `1..=MAX_TAB_STOP` are clamped.
    pub fn set_tab_stop(&mut self, tab_stop: usize) {
        self.tab_stop = clamp_tab_stop(tab_stop);
        for row in &mut self.rows {
            row.set_tab_stop(self.tab_stop);
        }
        self.dirty = true;
    }

    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Request a redraw of anything showing this buffer.
    pub const fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Read and clear the redraw flag.
    pub const fn take_dirty(&mut self) -> bool {
        let dirty = self.dirty;
        self.dirty = false;
        dirty
    }

    // -- Rows ---------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&Row> {
        self.rows.get(y)
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Insert a row before index `at` (`at == row_count()` appends).
    /// Returns `false` if `at` is out of range.
    pub fn insert_row(&mut self, at: usize, bytes: &[u8]) -> bool {
        if at > self.rows.len() {
            return false;
        }
        self.rows.insert(at, Row::new(bytes, self.tab_stop));
        self.touch();
        true
    }

    pub fn append_row(&mut self, bytes: &[u8]) {
        self.rows.push(Row::new(bytes, self.tab_stop));
        self.touch();
    }

    /// Remove the row at `at`, re-clamping every cursor.
    pub fn delete_row(&mut self, at: usize) -> Option<Row> {
        if at >= self.rows.len() {
            return None;
        }
        let row = self.rows.remove(at);
        self.clamp_all_cursors();
        self.touch();
        Some(row)
    }

    /// Replace every row, resetting all cursors to the origin.
    pub fn replace_rows<I, L>(&mut self, lines: I)
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        self.rows = lines
            .into_iter()
            .map(|line| Row::new(line.as_ref(), self.tab_stop))
            .collect();
        self.cursor = Cursor::ORIGIN;
        self.cursors.clear();
        self.touch();
    }

    /// Remove every row.
    pub fn clear(&mut self) {
        self.replace_rows(std::iter::empty::<&[u8]>());
    }

    // -- Editing at the primary cursor ---------------------------------------

    /// Insert bytes (no newlines) at the primary cursor and advance it.
    /// Secondary cursors at or after the insertion point on the same row
    /// move right with the text.
    pub fn insert_bytes(&mut self, bytes: &[u8]) {
        if self.rows.is_empty() {
            self.rows.push(Row::new(Vec::new(), self.tab_stop));
        }
        let Cursor { x, y } = self.cursor;
        let row = &mut self.rows[y];
        let at = row.floor_boundary(x);
        row.insert(at, bytes);
        self.cursor.x = at + bytes.len();
        let len = bytes.len();
        self.shift_secondaries(|c| {
            if c.y == y && c.x >= at {
                Cursor::new(c.x.saturating_add(len), y)
            } else {
                c
            }
        });
        self.touch();
    }

    /// Split the current row at the primary cursor. Secondary cursors past
    /// the split follow the tail onto the new row; rows below shift down.
    pub fn insert_newline(&mut self) {
        if self.rows.is_empty() {
            self.rows.push(Row::new(Vec::new(), self.tab_stop));
        }
        let Cursor { x, y } = self.cursor;
        let at = self.rows[y].floor_boundary(x);
        let tail = self.rows[y].split_off(at);
        self.rows.insert(y + 1, Row::new(tail, self.tab_stop));
        self.cursor = Cursor::new(0, y + 1);
        self.shift_secondaries(|c| match c.y.cmp(&y) {
            Ordering::Less => c,
            Ordering::Equal if c.x < at => c,
            Ordering::Equal => Cursor::new(c.x - at, y + 1),
            Ordering::Greater => Cursor::new(c.x, c.y + 1),
        });
        self.touch();
    }

    /// Delete the code point before the primary cursor, joining with the
    /// previous row at column 0. Returns `false` at the buffer start.
    pub fn delete_before(&mut self) -> bool {
        let Cursor { x, y } = self.cursor;
        if y >= self.rows.len() || (x == 0 && y == 0) {
            return false;
        }
        if x == 0 {
            let row = self.rows.remove(y);
            let prev = &mut self.rows[y - 1];
            let join_at = prev.len();
            prev.append(row.chars());
            self.cursor = Cursor::new(join_at, y - 1);
            self.shift_secondaries(|c| match c.y.cmp(&y) {
                Ordering::Less => c,
                Ordering::Equal => Cursor::new(c.x.saturating_add(join_at), y - 1),
                Ordering::Greater => Cursor::new(c.x, c.y - 1),
            });
        } else {
            let row = &mut self.rows[y];
            let end = row.floor_boundary(x);
            let at = row.floor_boundary(x - 1);
            row.remove_char(at);
            self.cursor.x = at;
            self.shift_secondaries(|c| {
                if c.y != y || c.x <= at {
                    c
                } else if c.x >= end {
                    Cursor::new(c.x - (end - at), y)
                } else {
                    Cursor::new(at, y)
                }
            });
        }
        self.touch();
        true
    }

    /// Content as newline-joined text (lossy for invalid UTF-8).
    #[must_use]
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(|r| String::from_utf8_lossy(r.chars()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn touch(&mut self) {
        self.modified = true;
        self.dirty = true;
    }

    // -- Cursors ------------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Secondary cursors in the order they were added.
    #[inline]
    #[must_use]
    pub fn cursors(&self) -> &[Cursor] {
        &self.cursors
    }

    /// Clamp a cursor to the buffer invariant.
    #[must_use]
    pub fn clamp(&self, cursor: Cursor) -> Cursor {
        let Some(last) = self.rows.len().checked_sub(1) else {
            return Cursor::ORIGIN;
        };
        let y = cursor.y.min(last);
        let x = self.rows[y].floor_boundary(cursor.x);
        Cursor::new(x, y)
    }

    /// Move the primary cursor, clamping to the invariant.
    pub fn set_cursor(&mut self, x: usize, y: usize) -> Cursor {
        self.cursor = self.clamp(Cursor::new(x, y));
        self.dirty = true;
        self.cursor
    }

    /// Remap every secondary cursor after an edit, then re-clamp all of
    /// them.
    fn shift_secondaries(&mut self, remap: impl Fn(Cursor) -> Cursor) {
        for c in &mut self.cursors {
            *c = remap(*c);
        }
        self.clamp_all_cursors();
    }

    fn clamp_all_cursors(&mut self) {
        self.cursor = self.clamp(self.cursor);
        let clamped: Vec<Cursor> = self.cursors.iter().map(|&c| self.clamp(c)).collect();
        self.cursors = clamped;
    }

    /// Add a secondary cursor at the primary cursor's position.
    pub fn cursor_add(&mut self) -> CursorOutcome {
        self.cursors.push(self.cursor);
        self.dirty = true;
        CursorOutcome::Added {
            total: self.cursors.len() + 1,
        }
    }

    /// Drop every secondary cursor.
    pub fn cursor_clear(&mut self) -> CursorOutcome {
        self.dirty = true;
        if self.cursors.is_empty() {
            return CursorOutcome::NothingToClear;
        }
        let removed = self.cursors.len();
        self.cursors.clear();
        CursorOutcome::Cleared { removed }
    }

    /// Add a secondary cursor one row below the primary, same byte offset
    /// clamped to that row.
    pub fn cursor_add_below(&mut self) -> CursorOutcome {
        self.dirty = true;
        let target = self.cursor.y + 1;
        if target >= self.rows.len() {
            return CursorOutcome::NoLineBelow;
        }
        self.push_clamped(target)
    }

    /// Add a secondary cursor one row above the primary, same byte offset
    /// clamped to that row.
    pub fn cursor_add_above(&mut self) -> CursorOutcome {
        self.dirty = true;
        let Some(target) = self.cursor.y.checked_sub(1) else {
            return CursorOutcome::NoLineAbove;
        };
        if target >= self.rows.len() {
            return CursorOutcome::NoLineAbove;
        }
        self.push_clamped(target)
    }

    fn push_clamped(&mut self, y: usize) -> CursorOutcome {
        let c = self.clamp(Cursor::new(self.cursor.x, y));
        self.cursors.push(c);
        CursorOutcome::Added {
            total: self.cursors.len() + 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

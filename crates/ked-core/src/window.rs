//! Window: a viewport onto a buffer.
//!
//! A `Window` maps part of a [`Buffer`] onto a rectangle of the screen. It
//! owns only view state:
//!
//! - **Geometry**: the rectangle assigned by the layout tree
//! - **Scroll**: `row_offset` (first visible row) and `col_offset` (first
//!   visible render column)
//! - **Cursor shadow**: this window's own idea of where the cursor is, so
//!   two windows on one buffer keep separate positions
//! - **Display flags**: soft wrap and the line-number gutter
//!
//! Row content is never copied into a window. Every window bound to a buffer
//! sees its edits immediately.
//!
//! ```text
//! ┌──────┬────────────────────────┐
//! │gutter│      text area         │ ← rect.h - 1 rows
//! │      │                        │
//! ├──────┴────────────────────────┤
//! │         status line           │ ← 1 row
//! └───────────────────────────────┘
//! ```

use bitflags::bitflags;

use crate::buffer::{Buffer, BufferId};
use crate::cursor::Cursor;
use crate::layout::Rect;

bitflags! {
    /// Per-window display modes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DisplayFlags: u8 {
        /// Soft-wrap long rows instead of scrolling horizontally.
        const WRAP = 1 << 0;
        /// Show right-aligned line numbers.
        const GUTTER = 1 << 1;
    }
}

/// Columns needed for right-aligned line numbers plus a separator space.
///
/// | Rows    | Digits | Gutter |
/// |---------|--------|--------|
/// | 1–9     | 1      | 2      |
/// | 10–99   | 2      | 3      |
/// | 100–999 | 3      | 4      |
///
/// Returns 0 when the gutter is off.
#[must_use]
pub fn gutter_width(row_count: usize, show: bool) -> u16 {
    if !show {
        return 0;
    }
    let digits = row_count.max(1).ilog10() + 1;
    // digits <= 20 for usize::MAX.
    #[allow(clippy::cast_possible_truncation)]
    let width = digits as u16 + 1;
    width
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    rect: Rect,
    buffer: BufferId,
    row_offset: usize,
    col_offset: usize,
    cursor: Cursor,
    focused: bool,
    flags: DisplayFlags,
}

impl Window {
    /// An unfocused window on `buffer` with no geometry yet.
    #[must_use]
    pub const fn new(buffer: BufferId, flags: DisplayFlags) -> Self {
        Self {
            rect: Rect::new(0, 0, 0, 0),
            buffer,
            row_offset: 0,
            col_offset: 0,
            cursor: Cursor::ORIGIN,
            focused: false,
            flags,
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> BufferId {
        self.buffer
    }

    #[inline]
    #[must_use]
    pub const fn row_offset(&self) -> usize {
        self.row_offset
    }

    #[inline]
    #[must_use]
    pub const fn col_offset(&self) -> usize {
        self.col_offset
    }

    /// The cursor shadow.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[inline]
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    #[inline]
    #[must_use]
    pub const fn flags(&self) -> DisplayFlags {
        self.flags
    }

    // -- Mutation (editor-driven) -------------------------------------------

    pub(crate) const fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub(crate) const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub(crate) const fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// Rebind to another buffer, dropping this window's scroll state.
    pub(crate) const fn attach(&mut self, buffer: BufferId, cursor: Cursor) {
        self.buffer = buffer;
        self.cursor = cursor;
        self.row_offset = 0;
        self.col_offset = 0;
    }

    /// Point at a buffer whose index shifted, keeping scroll state.
    pub(crate) const fn renumber(&mut self, buffer: BufferId) {
        self.buffer = buffer;
    }

    pub fn set_flag(&mut self, flag: DisplayFlags, on: bool) {
        self.flags.set(flag, on);
        if flag.contains(DisplayFlags::WRAP) && on {
            self.col_offset = 0;
        }
    }

    // -- Scrolling ----------------------------------------------------------

    /// Rows available for text (the last row is the status line).
    #[must_use]
    pub const fn text_height(&self) -> usize {
        self.rect.h.saturating_sub(1) as usize
    }

    /// Columns available for text after the gutter.
    #[must_use]
    pub fn text_width(&self, buf: &Buffer) -> usize {
        let gw = gutter_width(buf.row_count(), self.flags.contains(DisplayFlags::GUTTER));
        self.rect.w.saturating_sub(gw) as usize
    }

    /// Adjust the scroll offsets so `cursor` is visible.
    ///
    /// With `WRAP` set there is no horizontal scrolling.
    pub fn scroll(&mut self, buf: &Buffer, cursor: Cursor) {
        let text_height = self.text_height();
        let text_width = self.text_width(buf);
        if text_height == 0 || text_width == 0 {
            return;
        }

        if cursor.y < self.row_offset {
            self.row_offset = cursor.y;
        }
        if cursor.y >= self.row_offset + text_height {
            self.row_offset = cursor.y - text_height + 1;
        }

        if self.flags.contains(DisplayFlags::WRAP) {
            self.col_offset = 0;
            return;
        }

        let rx = buf.row(cursor.y).map_or(0, |row| row.cx_to_rx(cursor.x));
        if rx < self.col_offset {
            self.col_offset = rx;
        }
        if rx >= self.col_offset + text_width {
            self.col_offset = rx - text_width + 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

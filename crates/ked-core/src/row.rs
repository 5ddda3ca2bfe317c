//! Row: one line of text and its rendered form.
//!
//! A `Row` owns two byte buffers:
//!
//! - `chars`: the raw UTF-8 content of the line, without the newline
//! - `render`: the same content with every tab expanded to spaces up to the
//!   next tab stop
//!
//! `render` is derived. Every mutation goes through a method that calls
//! [`Row::update`], so the two never drift apart.
//!
//! # Coordinates
//!
//! Two coordinate systems meet here:
//!
//! - **cx**: a byte offset into `chars`
//! - **rx**: a 0-based visual column in the rendered line
//!
//! Every code point other than a tab occupies exactly one column. A tab
//! advances to the next multiple of the tab stop. There is no wide-character
//! handling: a CJK code point counts as one column like any other.
//!
//! With a tab stop of 4:
//!
//! ```text
//! chars:  a   \t   é (2 bytes)   b
//! cx:     0   1    2             4
//! rx:     0   1    4             5
//! render: "a   éb"
//! ```

use tracing::warn;

/// Tab stop used when nothing else is configured.
pub const DEFAULT_TAB_STOP: usize = 8;

/// Largest tab stop a row accepts. Larger values are clamped.
pub const MAX_TAB_STOP: usize = 9999;

#[inline]
pub(crate) const fn clamp_tab_stop(tab_stop: usize) -> usize {
    if tab_stop == 0 {
        1
    } else if tab_stop > MAX_TAB_STOP {
        MAX_TAB_STOP
    } else {
        tab_stop
    }
}

/// True for UTF-8 continuation bytes (`0b10xx_xxxx`).
#[inline]
const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Advance `rx` past one cell that starts with `byte`.
#[inline]
const fn advance(rx: usize, byte: u8, tab_stop: usize) -> usize {
    if byte == b'\t' {
        rx.saturating_add(tab_stop - rx % tab_stop)
    } else {
        rx.saturating_add(1)
    }
}

/// One line of a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    chars: Vec<u8>,
    render: Vec<u8>,
    tab_stop: usize,
}

impl Row {
    /// Create a row and compute its render form.
    #[must_use]
    pub fn new(chars: impl Into<Vec<u8>>, tab_stop: usize) -> Self {
        let mut row = Self {
            chars: chars.into(),
            render: Vec::new(),
            tab_stop: clamp_tab_stop(tab_stop),
        };
        row.update();
        row
    }

    // -- Accessors ----------------------------------------------------------

    /// Raw line content.
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// Tab-expanded line content.
    #[inline]
    #[must_use]
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// Length of the raw content in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[inline]
    #[must_use]
    pub const fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    /// Change the tab stop (clamped to `1..=MAX_TAB_STOP`) and re-render.
    pub fn set_tab_stop(&mut self, tab_stop: usize) {
        self.tab_stop = clamp_tab_stop(tab_stop);
        self.update();
    }

    // -- Rendering ----------------------------------------------------------

    /// Recompute `render` from `chars`.
    ///
    /// If the render buffer cannot be allocated the previous render is kept
    /// and a warning is logged; the row stays usable, only stale.
    pub fn update(&mut self) {
        let tabs = self.chars.iter().filter(|&&b| b == b'\t').count();
        let needed = tabs
            .saturating_mul(self.tab_stop - 1)
            .saturating_add(self.chars.len());

        let mut render = Vec::new();
        if render.try_reserve_exact(needed).is_err() {
            warn!(needed, "row render allocation failed, keeping stale render");
            return;
        }

        let mut rx = 0;
        for &byte in &self.chars {
            if byte == b'\t' {
                let next = advance(rx, byte, self.tab_stop);
                render.resize(render.len() + (next - rx), b' ');
                rx = next;
            } else {
                render.push(byte);
                if !is_continuation(byte) {
                    rx += 1;
                }
            }
        }
        self.render = render;
    }

    // -- Coordinate mapping -------------------------------------------------

    /// Clamp `cx` into `[0, len]` and back onto the start of the code point
    /// it falls in.
    #[must_use]
    pub fn floor_boundary(&self, cx: usize) -> usize {
        let mut cx = cx.min(self.chars.len());
        while cx > 0 && cx < self.chars.len() && is_continuation(self.chars[cx]) {
            cx -= 1;
        }
        cx
    }

    /// Byte offset of the code point after the one starting at `cx`.
    fn next_boundary(&self, cx: usize) -> usize {
        let mut next = cx + 1;
        while next < self.chars.len() && is_continuation(self.chars[next]) {
            next += 1;
        }
        next.min(self.chars.len())
    }

    /// Map a byte offset to a visual column.
    #[must_use]
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let cx = self.floor_boundary(cx);
        self.chars[..cx]
            .iter()
            .filter(|&&b| !is_continuation(b))
            .fold(0, |rx, &b| advance(rx, b, self.tab_stop))
    }

    /// Map a visual column to the byte offset of the code point whose cell
    /// covers it. Columns past the end map to `len`.
    ///
    /// For any code-point boundary `cx`, `rx_to_cx(cx_to_rx(cx)) == cx`. For a
    /// column inside a tab the result is the tab's own offset, so
    /// `cx_to_rx(rx_to_cx(rx)) <= rx` always holds.
    #[must_use]
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur = 0;
        for (cx, &byte) in self.chars.iter().enumerate() {
            if is_continuation(byte) {
                continue;
            }
            let next = advance(cur, byte, self.tab_stop);
            if next > rx {
                return cx;
            }
            cur = next;
        }
        self.chars.len()
    }

    /// Number of visual columns in the whole row.
    #[must_use]
    pub fn display_width(&self) -> usize {
        self.cx_to_rx(self.chars.len())
    }

    // -- Mutation -----------------------------------------------------------

    /// Insert bytes at `at` (clamped to a code-point boundary).
    pub fn insert(&mut self, at: usize, bytes: &[u8]) {
        let at = self.floor_boundary(at);
        self.chars.splice(at..at, bytes.iter().copied());
        self.update();
    }

    /// Append bytes at the end of the row.
    pub fn append(&mut self, bytes: &[u8]) {
        self.chars.extend_from_slice(bytes);
        self.update();
    }

    /// Remove the whole code point starting at (or containing) `at`.
    /// Returns `false` when `at` is at or past the end.
    pub fn remove_char(&mut self, at: usize) -> bool {
        let at = self.floor_boundary(at);
        if at >= self.chars.len() {
            return false;
        }
        let end = self.next_boundary(at);
        self.chars.drain(at..end);
        self.update();
        true
    }

    /// Cut the row at `at` (clamped to a boundary), returning the tail.
    pub fn split_off(&mut self, at: usize) -> Vec<u8> {
        let at = self.floor_boundary(at);
        let tail = self.chars.split_off(at);
        self.update();
        tail
    }

    /// Replace the whole content.
    pub fn set(&mut self, bytes: impl Into<Vec<u8>>) {
        self.chars = bytes.into();
        self.update();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Editor: the owner of every buffer, window and the layout tree.
//!
//! All state changes go through `Editor` methods, one command at a time.
//! Window commands never fail loudly: a refused operation leaves state as it
//! was and explains itself through the [`StatusLine`].
//!
//! # Focus protocol
//!
//! The active buffer's primary cursor is the live cursor. Each window keeps a
//! *shadow* copy of its cursor so that two windows on one buffer remember
//! separate positions:
//!
//! 1. Before focus leaves a window, the buffer cursor is saved into it.
//! 2. After focus lands on a window, its shadow is restored into its buffer
//!    (clamped, since the buffer may have shrunk meanwhile).
//!
//! ```text
//!   windows: [0] [1] [2]           layout:  Vertical
//!             │   │   │                     ├── Leaf(0)
//!             ▼   ▼   ▼                     └── Vertical
//!   buffers: [a] [b]                            ├── Leaf(1)
//!                                               └── Leaf(2)
//! ```

use std::path::Path;

use tracing::{debug, warn};

use crate::buffer::{Buffer, BufferId, CursorOutcome};
use crate::config::Config;
use crate::cursor::Cursor;
use crate::jumplist::{JumpEntry, JumpList};
use crate::layout::{Direction, LayoutTree, Orientation, Rect};
use crate::options::{self, OptionName, SetDirective};
use crate::quickfix::{QUICKFIX_NAME, QuickfixItem};
use crate::row::MAX_TAB_STOP;
use crate::status::StatusLine;
use crate::window::{DisplayFlags, Window};

/// Screen area assumed until the first [`Editor::resize`].
pub const DEFAULT_AREA: Rect = Rect::new(0, 0, 80, 24);

/// Options listed by `:set` and `:set all`, in display order.
const ALL_OPTIONS: [OptionName; 3] = [OptionName::TabStop, OptionName::Wrap, OptionName::Number];

#[derive(Debug)]
pub struct Editor {
    config: Config,
    buffers: Vec<Buffer>,
    windows: Vec<Window>,
    layout: LayoutTree,

    /// Index of the focused window.
    current: usize,

    /// Buffer of the focused window, cached.
    active: BufferId,

    jumps: JumpList,
    status: StatusLine,
    area: Rect,
    redraw: bool,

    /// The designated quickfix buffer, once created.
    quickfix: Option<BufferId>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Editor {
    /// One empty buffer in one focused window covering [`DEFAULT_AREA`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut window = Window::new(BufferId::new(0), config.display_flags());
        window.set_focused(true);
        let mut editor = Self {
            buffers: vec![Buffer::new(config.tab_stop)],
            windows: vec![window],
            layout: LayoutTree::new(),
            current: 0,
            active: BufferId::new(0),
            jumps: JumpList::with_capacity(config.jump_list_capacity),
            status: StatusLine::new(),
            area: DEFAULT_AREA,
            redraw: true,
            quickfix: None,
            config,
        };
        editor.relayout();
        editor
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    /// The buffer behind `id`, if it is still live.
    #[inline]
    #[must_use]
    pub fn buffer(&self, id: BufferId) -> Option<&Buffer> {
        self.buffers.get(id.index())
    }

    #[inline]
    #[must_use]
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    #[inline]
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_window(&self) -> &Window {
        &self.windows[self.current]
    }

    #[inline]
    #[must_use]
    pub const fn active_buffer_id(&self) -> BufferId {
        self.active
    }

    #[must_use]
    pub fn active_buffer(&self) -> &Buffer {
        &self.buffers[self.active.index()]
    }

    /// Direct access for text edits. Cursor moves made here are picked up
    /// by the focused window on the next focus change.
    pub fn active_buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffers[self.active.index()]
    }

    #[inline]
    #[must_use]
    pub const fn layout(&self) -> &LayoutTree {
        &self.layout
    }

    #[inline]
    #[must_use]
    pub const fn jumps(&self) -> &JumpList {
        &self.jumps
    }

    #[inline]
    #[must_use]
    pub const fn status(&self) -> &StatusLine {
        &self.status
    }

    #[inline]
    pub const fn status_mut(&mut self) -> &mut StatusLine {
        &mut self.status
    }

    #[inline]
    #[must_use]
    pub const fn area(&self) -> Rect {
        self.area
    }

    #[inline]
    #[must_use]
    pub const fn quickfix_buffer(&self) -> Option<BufferId> {
        self.quickfix
    }

    // -- Focus --------------------------------------------------------------

    fn save_shadow(&mut self) {
        let cursor = self.buffers[self.active.index()].cursor();
        self.windows[self.current].set_cursor(cursor);
    }

    fn restore_shadow(&mut self) {
        let shadow = self.windows[self.current].cursor();
        let cursor = self.buffers[self.active.index()].set_cursor(shadow.x, shadow.y);
        self.windows[self.current].set_cursor(cursor);
    }

    /// Focus exactly `index` and sync the active buffer. Callers save the
    /// outgoing shadow first when the outgoing window survives.
    fn set_focus(&mut self, index: usize) {
        for (i, window) in self.windows.iter_mut().enumerate() {
            window.set_focused(i == index);
        }
        self.current = index;
        self.active = self.windows[index].buffer();
        self.restore_shadow();
        self.redraw = true;
    }

    /// Move focus to `index`, saving the current shadow. Returns `false` for
    /// an out-of-range index.
    pub fn focus(&mut self, index: usize) -> bool {
        if index >= self.windows.len() {
            self.status.set_error(format!("E96: No window {}", index.saturating_add(1)));
            return false;
        }
        if index != self.current {
            self.save_shadow();
            self.set_focus(index);
        }
        true
    }

    /// Cycle focus to the next window in creation order.
    pub fn focus_next(&mut self) -> bool {
        if self.windows.len() < 2 {
            self.status.set_message("Only one window");
            return false;
        }
        self.save_shadow();
        self.set_focus((self.current + 1) % self.windows.len());
        true
    }

    /// Focus the nearest window in `dir`.
    pub fn focus_direction(&mut self, dir: Direction) -> bool {
        let Some(target) = self.layout.neighbor(self.current, dir, self.area) else {
            self.status.set_message("No window in that direction");
            return false;
        };
        self.save_shadow();
        self.set_focus(target);
        true
    }

    // -- Window structure ----------------------------------------------------

    /// Split the focused window. The new window is a copy of it, takes the
    /// second half of its area and receives focus.
    pub fn split(&mut self, orientation: Orientation) -> bool {
        if self.windows.len() >= self.config.max_windows {
            self.status.set_error(format!(
                "E36: Not enough room (max {} windows)",
                self.config.max_windows
            ));
            return false;
        }
        if self.windows.try_reserve(1).is_err() {
            warn!("window allocation failed");
            self.status.set_error("E36: Not enough room");
            return false;
        }

        let prev = self.current;
        let new_index = self.windows.len();
        let fresh = self.layout.is_empty();
        if fresh {
            if let Err(err) = self.layout.init_root(prev) {
                self.status.set_error(err.to_string());
                return false;
            }
        }
        if let Err(err) = self.layout.split_leaf(prev, orientation, new_index) {
            if fresh {
                self.layout.clear();
            }
            self.status.set_error(err.to_string());
            return false;
        }

        self.save_shadow();
        let copy = self.windows[prev].clone();
        self.windows.push(copy);
        self.set_focus(new_index);
        self.relayout();

        debug!(prev, new_index, ?orientation, "window split");
        self.status.set_message(match orientation {
            Orientation::Horizontal => "split horizontal",
            Orientation::Vertical => "split vertical",
        });
        true
    }

    /// `:split`: stacked top/bottom.
    pub fn split_horizontal(&mut self) -> bool {
        self.split(Orientation::Horizontal)
    }

    /// `:vsplit`: side by side.
    pub fn split_vertical(&mut self) -> bool {
        self.split(Orientation::Vertical)
    }

    /// Close the focused window. Refused for the last window.
    pub fn close_current(&mut self) -> bool {
        if self.windows.len() < 2 {
            self.status.set_error("E444: Cannot close last window");
            return false;
        }
        let closed = self.current;
        if let Err(err) = self.layout.close_leaf(closed) {
            self.status.set_error(err.to_string());
            return false;
        }
        self.layout.reindex_after_close(closed);
        self.windows.remove(closed);

        self.set_focus(closed.min(self.windows.len() - 1));
        self.relayout();
        debug!(closed, current = self.current, "window closed");
        true
    }

    /// `:only`: close every window except the focused one.
    pub fn close_others(&mut self) -> bool {
        if self.windows.len() < 2 {
            self.status.set_message("Already only one window");
            return false;
        }
        self.save_shadow();
        let keep = self.windows.swap_remove(self.current);
        self.windows.clear();
        self.windows.push(keep);
        self.layout.clear();
        if let Err(err) = self.layout.init_root(0) {
            warn!(%err, "layout reset failed");
        }
        self.set_focus(0);
        self.relayout();
        true
    }

    /// Show `buffer` in window `window`. Both handles are checked against
    /// the live collections; stale ones are rejected.
    pub fn attach_buffer(&mut self, window: usize, buffer: BufferId) -> bool {
        if window >= self.windows.len() {
            self.status.set_error(format!("E96: No window {}", window.saturating_add(1)));
            return false;
        }
        let Some(buf) = self.buffers.get(buffer.index()) else {
            self.status
                .set_error(format!("E86: Buffer {buffer} does not exist"));
            return false;
        };
        let cursor = buf.cursor();
        if window == self.current {
            self.save_shadow();
        }
        self.windows[window].attach(buffer, cursor);
        if window == self.current {
            self.active = buffer;
        }
        self.redraw = true;
        debug!(window, %buffer, "buffer attached");
        true
    }

    // -- Geometry -----------------------------------------------------------

    /// Recompute every window rectangle from the layout tree.
    fn relayout(&mut self) {
        for window in &mut self.windows {
            window.set_rect(Rect::default());
        }
        if self.layout.is_empty() {
            if let Some(window) = self.windows.first_mut() {
                window.set_rect(self.area);
            }
        } else {
            for (index, rect) in self.layout.layout(self.area) {
                if let Some(window) = self.windows.get_mut(index) {
                    window.set_rect(rect);
                }
            }
        }
        self.redraw = true;
    }

    /// The terminal changed size.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.relayout();
        self.scroll_current();
    }

    /// Keep the cursor visible in the focused window.
    pub fn scroll_current(&mut self) {
        let buf = &self.buffers[self.active.index()];
        self.windows[self.current].scroll(buf, buf.cursor());
    }

    /// Request a full redraw.
    pub const fn mark_dirty(&mut self) {
        self.redraw = true;
    }

    /// Read and clear the redraw request, including buffer-level ones.
    pub fn take_redraw(&mut self) -> bool {
        let mut redraw = std::mem::take(&mut self.redraw);
        for buf in &mut self.buffers {
            redraw |= buf.take_dirty();
        }
        redraw
    }

    // -- Cursors ------------------------------------------------------------

    /// Move the primary cursor of the active buffer (clamped).
    pub fn set_cursor(&mut self, x: usize, y: usize) -> Cursor {
        let cursor = self.active_buffer_mut().set_cursor(x, y);
        self.windows[self.current].set_cursor(cursor);
        self.scroll_current();
        cursor
    }

    fn report_cursors(&mut self, outcome: CursorOutcome) -> CursorOutcome {
        self.status.set_message(outcome.to_string());
        self.redraw = true;
        outcome
    }

    pub fn cursor_add(&mut self) -> CursorOutcome {
        let outcome = self.active_buffer_mut().cursor_add();
        self.report_cursors(outcome)
    }

    pub fn cursor_clear(&mut self) -> CursorOutcome {
        let outcome = self.active_buffer_mut().cursor_clear();
        self.report_cursors(outcome)
    }

    pub fn cursor_add_below(&mut self) -> CursorOutcome {
        let outcome = self.active_buffer_mut().cursor_add_below();
        self.report_cursors(outcome)
    }

    pub fn cursor_add_above(&mut self) -> CursorOutcome {
        let outcome = self.active_buffer_mut().cursor_add_above();
        self.report_cursors(outcome)
    }

    // -- Buffers ------------------------------------------------------------

    fn push_buffer(&mut self, buf: Buffer) -> Option<BufferId> {
        if self.buffers.try_reserve(1).is_err() {
            warn!("buffer allocation failed");
            self.status.set_error("E342: Out of memory");
            return None;
        }
        self.buffers.push(buf);
        Some(BufferId::new(self.buffers.len() - 1))
    }

    /// `:e path`: show `path` in the focused window, reusing an open buffer
    /// for the same path.
    pub fn open_file(&mut self, path: &Path) -> Option<BufferId> {
        let existing = self
            .buffers
            .iter()
            .position(|buf| buf.path() == Some(path))
            .map(BufferId::new);
        let id = match existing {
            Some(id) => id,
            None => {
                let buf = match Buffer::from_file(path, self.config.tab_stop) {
                    Ok(buf) => buf,
                    Err(err) => {
                        self.status.set_error(format!("E484: {err}"));
                        return None;
                    }
                };
                self.push_buffer(buf)?
            }
        };
        if !self.attach_buffer(self.current, id) {
            return None;
        }
        let buf = self.active_buffer();
        let msg = format!("\"{}\" {}L", buf.name(), buf.row_count());
        self.status.set_message(msg);
        Some(id)
    }

    /// `:enew`: a fresh empty buffer in the focused window.
    pub fn new_buffer(&mut self) -> Option<BufferId> {
        let id = self.push_buffer(Buffer::new(self.config.tab_stop))?;
        self.attach_buffer(self.current, id).then_some(id)
    }

    /// `:bd`: drop a buffer. Windows showing it switch to a neighbor; ids
    /// above it shift down by one.
    pub fn close_buffer(&mut self, id: BufferId) -> bool {
        let closed = id.index();
        if closed >= self.buffers.len() {
            self.status.set_error(format!("E516: No buffer {id}"));
            return false;
        }
        if self.buffers.len() < 2 {
            self.status.set_error("E90: Cannot unload last buffer");
            return false;
        }

        self.save_shadow();
        self.buffers.remove(closed);
        let fallback = BufferId::new(closed.saturating_sub(1));
        let fallback_cursor = self.buffers[fallback.index()].cursor();
        for window in &mut self.windows {
            let shown = window.buffer().index();
            if shown == closed {
                window.attach(fallback, fallback_cursor);
            } else if shown > closed {
                window.renumber(BufferId::new(shown - 1));
            }
        }
        self.quickfix = match self.quickfix {
            Some(q) if q.index() == closed => None,
            Some(q) if q.index() > closed => Some(BufferId::new(q.index() - 1)),
            other => other,
        };
        self.active = self.windows[self.current].buffer();
        self.restore_shadow();
        self.redraw = true;
        debug!(%id, "buffer closed");
        true
    }

    // -- Jumps --------------------------------------------------------------

    /// Remember the active buffer's position. Buffers without a file are
    /// skipped.
    pub fn record_jump(&mut self) -> bool {
        let buf = self.active_buffer();
        let Some(path) = buf.path() else {
            debug!("jump not recorded, buffer has no file");
            return false;
        };
        let Cursor { x, y } = buf.cursor();
        let path = path.to_path_buf();
        self.jumps.add(path, x, y);
        true
    }

    pub fn jump_backward(&mut self) -> bool {
        let before = self.jumps.current();
        match self.jumps.backward() {
            Some(entry) => self.goto_jump(&entry, before),
            None => {
                self.status.set_message("At start of jump list");
                false
            }
        }
    }

    pub fn jump_forward(&mut self) -> bool {
        let before = self.jumps.current();
        match self.jumps.forward() {
            Some(entry) => self.goto_jump(&entry, before),
            None => {
                self.status.set_message("At end of jump list");
                false
            }
        }
    }

    /// Show `entry`. If its file cannot be opened the jump list goes back to
    /// the navigation index it had before the step.
    fn goto_jump(&mut self, entry: &JumpEntry, before: Option<usize>) -> bool {
        if self.open_file(&entry.path).is_none() {
            self.jumps.restore_navigation(before);
            return false;
        }
        self.set_cursor(entry.x, entry.y);
        let position = self.jumps.current().map_or(self.jumps.len(), |i| i + 1);
        self.status
            .set_message(format!("Jump {position}/{}", self.jumps.len()));
        debug!(path = %entry.path.display(), y = entry.y, "jumped");
        true
    }

    // -- Quickfix -----------------------------------------------------------

    /// Fill the quickfix buffer with `items` and bring it into view: focus a
    /// window already showing it, or open one below the focused window.
    ///
    /// The window is secured first; if no window can be opened nothing else
    /// changes.
    pub fn open_quickfix(&mut self, items: &[QuickfixItem]) -> Option<BufferId> {
        let shown = self
            .quickfix
            .and_then(|id| self.windows.iter().position(|w| w.buffer() == id));
        if let Some(index) = shown {
            self.focus(index);
        } else if !self.split_horizontal() {
            return None;
        }

        let id = match self.quickfix {
            Some(id) => id,
            None => {
                let buf = Buffer::new(self.config.tab_stop).with_name(QUICKFIX_NAME);
                let Some(id) = self.push_buffer(buf) else {
                    self.close_current();
                    self.status.set_error("E342: Out of memory");
                    return None;
                };
                self.quickfix = Some(id);
                id
            }
        };
        self.buffers[id.index()].replace_rows(items.iter().map(ToString::to_string));
        if shown.is_none() {
            self.attach_buffer(self.current, id);
        }
        self.status
            .set_message(format!("Quickfix: {} items", items.len()));
        Some(id)
    }

    #[must_use]
    pub fn is_quickfix(&self, id: BufferId) -> bool {
        self.quickfix == Some(id)
    }

    // -- Options ------------------------------------------------------------

    /// `:set args`: global options update the config, window options the
    /// focused window. Stops at the first error.
    pub fn apply_set(&mut self, args: &str) -> bool {
        let mut shown = Vec::new();
        for directive in options::parse_set(args) {
            match self.apply_directive(directive) {
                Ok(Some(line)) => shown.push(line),
                Ok(None) => {}
                Err(msg) => {
                    self.status.set_error(msg);
                    return false;
                }
            }
        }
        if !shown.is_empty() {
            self.status.set_message(shown.join("  "));
        }
        self.redraw = true;
        true
    }

    fn apply_directive(&mut self, directive: SetDirective) -> Result<Option<String>, String> {
        match directive {
            SetDirective::On(name) => self.set_bool(&name, |_| true).map(|()| None),
            SetDirective::Off(name) => self.set_bool(&name, |_| false).map(|()| None),
            SetDirective::Toggle(name) => self.set_bool(&name, |on| !on).map(|()| None),
            SetDirective::Query(name) => {
                let option = known(&name)?;
                Ok(Some(self.show_option(option)))
            }
            SetDirective::Assign(name, value) => {
                let option = known(&name)?;
                if option != OptionName::TabStop {
                    return Err(format!("E474: Invalid argument: {name}={value}"));
                }
                if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(format!("E521: Number required after =: {name}={value}"));
                }
                let tab_stop = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| (1..=MAX_TAB_STOP).contains(n))
                    .ok_or_else(|| format!("E474: Invalid argument: {name}={value}"))?;
                self.config.tab_stop = tab_stop;
                for buf in &mut self.buffers {
                    buf.set_tab_stop(tab_stop);
                }
                self.scroll_current();
                Ok(None)
            }
            SetDirective::ShowChanged => {
                let defaults = Config::default();
                let flags = self.current_window().flags();
                let changed: Vec<String> = ALL_OPTIONS
                    .into_iter()
                    .filter(|&option| match option {
                        OptionName::TabStop => self.config.tab_stop != defaults.tab_stop,
                        OptionName::Wrap => {
                            flags.contains(DisplayFlags::WRAP) != defaults.wrap
                        }
                        OptionName::Number => {
                            flags.contains(DisplayFlags::GUTTER) != defaults.gutter
                        }
                    })
                    .map(|option| self.show_option(option))
                    .collect();
                Ok(Some(format!("--- Options --- {}", changed.join("  "))))
            }
            SetDirective::ShowAll => {
                let all: Vec<String> = ALL_OPTIONS
                    .into_iter()
                    .map(|option| self.show_option(option))
                    .collect();
                Ok(Some(format!("--- Options --- {}", all.join("  "))))
            }
        }
    }

    fn set_bool(&mut self, name: &str, value: impl Fn(bool) -> bool) -> Result<(), String> {
        let flag = match known(name)? {
            OptionName::Wrap => DisplayFlags::WRAP,
            OptionName::Number => DisplayFlags::GUTTER,
            OptionName::TabStop => return Err(format!("E474: Invalid argument: {name}")),
        };
        let window = &mut self.windows[self.current];
        let on = value(window.flags().contains(flag));
        window.set_flag(flag, on);
        self.scroll_current();
        Ok(())
    }

    fn show_option(&self, option: OptionName) -> String {
        let flags = self.current_window().flags();
        match option {
            OptionName::TabStop => format!("tabstop={}", self.config.tab_stop),
            OptionName::Wrap => options::format_bool("wrap", flags.contains(DisplayFlags::WRAP)),
            OptionName::Number => {
                options::format_bool("number", flags.contains(DisplayFlags::GUTTER))
            }
        }
    }
}

fn known(name: &str) -> Result<OptionName, String> {
    OptionName::parse(name).ok_or_else(|| format!("E518: Unknown option: {name}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn editor() -> Editor {
        Editor::new(Config::default())
    }

    fn with_text(text: &str) -> Editor {
        let mut ed = editor();
        ed.active_buffer_mut()
            .replace_rows(text.lines().map(str::as_bytes));
        ed
    }

    fn focused_count(ed: &Editor) -> usize {
        ed.windows().iter().filter(|w| w.is_focused()).count()
    }

    fn sorted_leaves(ed: &Editor) -> Vec<usize> {
        let mut leaves = ed.layout().leaves();
        leaves.sort_unstable();
        leaves
    }

    // ── Construction ─────────────────────────────────────────────────────

    #[test]
    fn new_has_one_focused_full_window() {
        let ed = editor();
        assert_eq!(ed.windows().len(), 1);
        assert_eq!(ed.buffers().len(), 1);
        assert!(ed.current_window().is_focused());
        assert_eq!(ed.current_window().rect(), DEFAULT_AREA);
        assert!(ed.layout().is_empty());
    }

    // ── split ────────────────────────────────────────────────────────────

    #[test]
    fn split_copies_and_focuses_new_window() {
        let mut ed = with_text("a\nb\nc");
        ed.set_cursor(0, 2);
        assert!(ed.split_horizontal());
        assert_eq!(ed.windows().len(), 2);
        assert_eq!(ed.current_index(), 1);
        assert_eq!(focused_count(&ed), 1);
        assert_eq!(ed.windows()[0].cursor(), Cursor::new(0, 2));
        assert_eq!(ed.current_window().cursor(), Cursor::new(0, 2));
        assert_eq!(ed.windows()[0].buffer(), ed.windows()[1].buffer());
        assert_eq!(ed.status().message(), Some("split horizontal"));
    }

    #[test]
    fn split_assigns_geometry() {
        let mut ed = editor();
        ed.split_vertical();
        assert_eq!(ed.windows()[0].rect(), Rect::new(0, 0, 40, 24));
        assert_eq!(ed.windows()[1].rect(), Rect::new(41, 0, 39, 24));
    }

    #[test]
    fn split_refused_at_max_windows() {
        let mut ed = Editor::new(Config {
            max_windows: 2,
            ..Config::default()
        });
        assert!(ed.split_vertical());
        let layout = ed.layout().clone();
        assert!(!ed.split_vertical());
        assert_eq!(ed.windows().len(), 2);
        assert_eq!(ed.layout(), &layout);
        assert!(ed.status().is_error());
    }

    #[test]
    fn vsplit_twice_then_close_middle() {
        let mut ed = editor();
        ed.split_vertical();
        ed.split_vertical();
        assert_eq!(ed.windows().len(), 3);
        assert_eq!(ed.layout().internal_count(), 2);

        // 2 → 0 → 1
        ed.focus_next();
        ed.focus_next();
        assert_eq!(ed.current_index(), 1);

        assert!(ed.close_current());
        assert_eq!(ed.windows().len(), 2);
        assert_eq!(ed.current_index(), 1);
        assert_eq!(focused_count(&ed), 1);
        assert_eq!(sorted_leaves(&ed), vec![0, 1]);
    }

    // ── focus ────────────────────────────────────────────────────────────

    #[test]
    fn focus_next_wraps_and_restores_shadow() {
        let mut ed = with_text("one\ntwo\nthree");
        ed.split_horizontal();
        ed.set_cursor(1, 2);
        ed.focus_next();
        assert_eq!(ed.current_index(), 0);
        assert_eq!(ed.active_buffer().cursor(), Cursor::ORIGIN);
        ed.focus_next();
        assert_eq!(ed.current_index(), 1);
        assert_eq!(ed.active_buffer().cursor(), Cursor::new(1, 2));
    }

    #[test]
    fn focus_next_single_window_is_soft() {
        let mut ed = editor();
        assert!(!ed.focus_next());
        assert!(!ed.status().is_error());
    }

    #[test]
    fn focus_direction_follows_layout() {
        let mut ed = editor();
        ed.split_vertical();
        assert!(ed.focus_direction(Direction::Left));
        assert_eq!(ed.current_index(), 0);
        assert!(!ed.focus_direction(Direction::Left));
        assert!(ed.focus_direction(Direction::Right));
        assert_eq!(ed.current_index(), 1);
    }

    // ── close ────────────────────────────────────────────────────────────

    #[test]
    fn close_last_window_is_refused() {
        let mut ed = editor();
        assert!(!ed.close_current());
        assert_eq!(ed.windows().len(), 1);
        assert_eq!(ed.status().message(), Some("E444: Cannot close last window"));
    }

    #[test]
    fn close_back_to_one_window_fills_area() {
        let mut ed = editor();
        ed.split_horizontal();
        ed.close_current();
        assert_eq!(ed.current_index(), 0);
        assert_eq!(ed.current_window().rect(), DEFAULT_AREA);
        assert_eq!(ed.layout().leaves(), vec![0]);
    }

    #[test]
    fn close_others_keeps_current() {
        let mut ed = editor();
        ed.split_horizontal();
        ed.split_vertical();
        ed.new_buffer();
        let kept = ed.active_buffer_id();
        assert!(ed.close_others());
        assert_eq!(ed.windows().len(), 1);
        assert_eq!(ed.current_index(), 0);
        assert_eq!(ed.active_buffer_id(), kept);
        assert_eq!(ed.layout().leaves(), vec![0]);
        assert_eq!(ed.current_window().rect(), DEFAULT_AREA);
    }

    // ── attach ───────────────────────────────────────────────────────────

    #[test]
    fn attach_rejects_stale_handles() {
        let mut ed = editor();
        assert!(!ed.attach_buffer(0, BufferId::new(5)));
        assert!(ed.status().is_error());
        assert!(!ed.attach_buffer(3, BufferId::new(0)));
        assert_eq!(ed.current_window().buffer(), BufferId::new(0));
    }

    #[test]
    fn extreme_indices_are_rejected_without_panicking() {
        let mut ed = editor();
        assert!(!ed.focus(usize::MAX));
        assert_eq!(
            ed.status().message(),
            Some(format!("E96: No window {}", usize::MAX).as_str())
        );
        assert!(!ed.attach_buffer(usize::MAX, BufferId::new(0)));
        assert!(ed.status().is_error());
        assert!(!ed.attach_buffer(0, BufferId::new(usize::MAX)));
        assert!(ed.status().is_error());
        assert!(!ed.close_buffer(BufferId::new(usize::MAX)));
        assert_eq!(ed.current_index(), 0);
        assert_eq!(ed.current_window().buffer(), BufferId::new(0));
    }

    #[test]
    fn attach_unfocused_window_keeps_active_buffer() {
        let mut ed = editor();
        ed.split_horizontal();
        let id = ed.new_buffer().unwrap();
        assert_eq!(ed.active_buffer_id(), id);
        assert!(ed.attach_buffer(0, id));
        assert!(ed.attach_buffer(0, BufferId::new(0)));
        assert_eq!(ed.active_buffer_id(), id);
    }

    // ── Buffers ──────────────────────────────────────────────────────────

    #[test]
    fn open_file_reuses_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "x\ny\n").unwrap();
        let mut ed = editor();
        let first = ed.open_file(&path).unwrap();
        ed.new_buffer();
        let again = ed.open_file(&path).unwrap();
        assert_eq!(first, again);
        assert_eq!(ed.buffers().len(), 3);
        assert_eq!(ed.active_buffer().row_count(), 2);
    }

    #[test]
    fn open_missing_file_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut ed = editor();
        assert_eq!(ed.open_file(&dir.path().join("nope")), None);
        assert!(ed.status().is_error());
        assert_eq!(ed.buffers().len(), 1);
    }

    #[test]
    fn close_buffer_rebinds_and_renumbers() {
        let mut ed = editor();
        let b1 = ed.new_buffer().unwrap();
        ed.split_horizontal();
        let b2 = ed.new_buffer().unwrap();
        // window 0 shows b1, window 1 shows b2
        assert!(ed.close_buffer(b1));
        assert_eq!(ed.windows()[0].buffer(), BufferId::new(0));
        assert_eq!(ed.windows()[1].buffer(), BufferId::new(b2.index() - 1));
        assert_eq!(ed.active_buffer_id(), BufferId::new(1));
    }

    #[test]
    fn close_last_buffer_is_refused() {
        let mut ed = editor();
        assert!(!ed.close_buffer(BufferId::new(0)));
        assert!(!ed.close_buffer(BufferId::new(9)));
        assert_eq!(ed.buffers().len(), 1);
    }

    // ── Cursors ──────────────────────────────────────────────────────────

    #[test]
    fn cursor_ops_report_through_status() {
        let mut ed = with_text("abc\nde");
        ed.set_cursor(2, 0);
        assert_eq!(ed.cursor_add_below(), CursorOutcome::Added { total: 2 });
        assert_eq!(ed.status().message(), Some("2 cursors"));
        assert_eq!(ed.cursor_add_below(), CursorOutcome::Added { total: 3 });
        assert_eq!(ed.cursor_clear(), CursorOutcome::Cleared { removed: 2 });
        assert_eq!(ed.cursor_clear(), CursorOutcome::NothingToClear);
        assert_eq!(ed.status().message(), Some("No extra cursors"));
        assert!(!ed.status().is_error());
    }

    #[test]
    fn cursor_add_below_on_last_row() {
        let mut ed = with_text("one\ntwo");
        ed.set_cursor(0, 1);
        assert_eq!(ed.cursor_add_below(), CursorOutcome::NoLineBelow);
        assert!(ed.active_buffer().cursors().is_empty());
        assert!(ed.take_redraw());
    }

    // ── Jumps ────────────────────────────────────────────────────────────

    #[test]
    fn jumps_reopen_file_and_place_cursor() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "1\n2\n3\n4\n").unwrap();
        fs::write(&b, "x\n").unwrap();

        let mut ed = editor();
        ed.open_file(&a);
        ed.set_cursor(0, 3);
        assert!(ed.record_jump());
        ed.open_file(&b);
        assert!(ed.record_jump());

        assert!(ed.jump_backward());
        assert_eq!(ed.active_buffer().path(), Some(a.as_path()));
        assert_eq!(ed.active_buffer().cursor(), Cursor::new(0, 3));
        assert_eq!(ed.status().message(), Some("Jump 1/2"));

        assert!(!ed.jump_backward());
        assert!(ed.jump_forward());
        assert_eq!(ed.active_buffer().path(), Some(b.as_path()));
    }

    #[test]
    fn failed_jump_keeps_navigation_index() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "1\n").unwrap();
        fs::write(&b, "x\n").unwrap();

        let mut ed = editor();
        let a_id = ed.open_file(&a).unwrap();
        assert!(ed.record_jump());
        ed.open_file(&b);
        assert!(ed.record_jump());
        assert!(ed.close_buffer(a_id));
        fs::remove_file(&a).unwrap();

        assert!(!ed.jump_backward());
        assert!(ed.status().is_error());
        assert_eq!(ed.jumps().current(), None);
        assert_eq!(ed.active_buffer().path(), Some(b.as_path()));

        // Still at the present, so forward has nowhere to go.
        assert!(!ed.jump_forward());
        assert_eq!(ed.jumps().current(), None);
    }

    #[test]
    fn failed_forward_jump_keeps_navigation_index() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<_> = ["a.txt", "b.txt", "c.txt"]
            .iter()
            .map(|name| dir.path().join(name))
            .collect();
        let mut ed = editor();
        for path in &paths {
            fs::write(path, "line\n").unwrap();
            ed.open_file(path);
            assert!(ed.record_jump());
        }
        assert!(ed.jump_backward());
        assert!(ed.jump_backward());
        assert_eq!(ed.jumps().current(), Some(0));

        let b_id = ed
            .buffers()
            .iter()
            .position(|buf| buf.path() == Some(paths[1].as_path()))
            .map(BufferId::new)
            .unwrap();
        assert!(ed.close_buffer(b_id));
        fs::remove_file(&paths[1]).unwrap();

        assert!(!ed.jump_forward());
        assert_eq!(ed.jumps().current(), Some(0));
    }

    #[test]
    fn record_jump_skips_unnamed_buffer() {
        let mut ed = editor();
        assert!(!ed.record_jump());
        assert!(ed.jumps().is_empty());
    }

    // ── Quickfix ─────────────────────────────────────────────────────────

    #[test]
    fn quickfix_opens_once_then_refocuses() {
        let items = vec![QuickfixItem {
            file: "a.rs".into(),
            line: 3,
            col: 1,
            text: "warning".into(),
        }];
        let mut ed = editor();
        let id = ed.open_quickfix(&items).unwrap();
        assert!(ed.is_quickfix(id));
        assert_eq!(ed.windows().len(), 2);
        assert_eq!(ed.active_buffer_id(), id);
        assert_eq!(ed.active_buffer().name(), QUICKFIX_NAME);
        assert_eq!(ed.active_buffer().to_text(), "a.rs:3:1: warning");

        ed.focus_next();
        assert_eq!(ed.open_quickfix(&[]), Some(id));
        assert_eq!(ed.windows().len(), 2);
        assert_eq!(ed.current_index(), 1);
        assert!(ed.active_buffer().is_empty());
    }

    #[test]
    fn quickfix_refused_split_changes_nothing() {
        let items = vec![QuickfixItem {
            file: "a.rs".into(),
            line: 1,
            col: 1,
            text: "error".into(),
        }];
        let mut ed = Editor::new(Config {
            max_windows: 1,
            ..Config::default()
        });
        assert_eq!(ed.open_quickfix(&items), None);
        assert!(ed.status().is_error());
        assert_eq!(ed.buffers().len(), 1);
        assert_eq!(ed.quickfix_buffer(), None);
        assert_eq!(ed.windows().len(), 1);
        assert_eq!(ed.active_buffer_id(), BufferId::new(0));
    }

    #[test]
    fn quickfix_hidden_buffer_keeps_rows_when_split_refused() {
        let first = vec![QuickfixItem {
            file: "a.rs".into(),
            line: 2,
            col: 5,
            text: "first".into(),
        }];
        let mut ed = Editor::new(Config {
            max_windows: 2,
            ..Config::default()
        });
        let id = ed.open_quickfix(&first).unwrap();
        // Show something else in the quickfix window, then fill the screen.
        assert!(ed.attach_buffer(ed.current_index(), BufferId::new(0)));
        assert_eq!(ed.open_quickfix(&[]), None);
        assert_eq!(ed.buffer(id).unwrap().to_text(), "a.rs:2:5: first");
        assert_eq!(ed.buffers().len(), 2);
    }

    // ── :set ─────────────────────────────────────────────────────────────

    #[test]
    fn set_window_options() {
        let mut ed = editor();
        assert!(ed.apply_set("wrap nonu"));
        let flags = ed.current_window().flags();
        assert!(flags.contains(DisplayFlags::WRAP));
        assert!(!flags.contains(DisplayFlags::GUTTER));
        assert!(ed.apply_set("wrap!"));
        assert!(!ed.current_window().flags().contains(DisplayFlags::WRAP));
    }

    #[test]
    fn set_tabstop_rerenders_buffers() {
        let mut ed = with_text("\tx");
        assert!(ed.apply_set("ts=4"));
        assert_eq!(ed.config().tab_stop, 4);
        assert_eq!(ed.active_buffer().row(0).unwrap().render(), b"    x");
        ed.apply_set("tabstop?");
        assert_eq!(ed.status().message(), Some("tabstop=4"));
    }

    #[test]
    fn set_errors() {
        let mut ed = editor();
        assert!(!ed.apply_set("bogus"));
        assert_eq!(ed.status().message(), Some("E518: Unknown option: bogus"));
        assert!(!ed.apply_set("ts=0"));
        assert!(ed.status().is_error());
        assert!(!ed.apply_set("wrap=3"));
        assert_eq!(ed.config().tab_stop, 8);
    }

    #[test]
    fn set_tabstop_out_of_range_is_rejected() {
        let mut ed = with_text("\t\tx");
        for value in ["0", "10000", "18446744073709551615", "99999999999999999999999"] {
            assert!(!ed.apply_set(&format!("ts={value}")), "{value}");
            assert_eq!(
                ed.status().message(),
                Some(format!("E474: Invalid argument: ts={value}").as_str())
            );
        }
        assert!(!ed.apply_set("ts=abc"));
        assert_eq!(ed.status().message(), Some("E521: Number required after =: ts=abc"));
        assert_eq!(ed.config().tab_stop, 8);
        assert_eq!(ed.active_buffer().row(0).unwrap().render().len(), 17);

        assert!(ed.apply_set(&format!("ts={MAX_TAB_STOP}")));
        assert_eq!(ed.active_buffer().tab_stop(), MAX_TAB_STOP);
    }
}

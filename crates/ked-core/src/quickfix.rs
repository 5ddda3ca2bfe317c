//! Quickfix items.
//!
//! The quickfix list is an ordinary buffer shown in an ordinary window. The
//! only quickfix-specific state in the editor is which buffer is the
//! designated one; see [`Editor::open_quickfix`](crate::editor::Editor::open_quickfix)
//! and [`Editor::is_quickfix`](crate::editor::Editor::is_quickfix).
//!
//! Items arrive as structured payloads read through [`Fields`]:
//!
//! ```json
//! { "items": [ { "file": "src/lib.rs", "line": 12, "col": 5, "text": "unused import" } ] }
//! ```

use std::fmt;

use crate::payload::Fields;

/// Display name of the quickfix buffer.
pub const QUICKFIX_NAME: &str = "[Quickfix]";

/// One location in the quickfix list. `line` and `col` are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickfixItem {
    pub file: String,
    pub line: usize,
    pub col: usize,
    pub text: String,
}

impl QuickfixItem {
    /// Build an item from one payload object. `file` is required; `line` and
    /// `col` default to 1 and `text` to empty.
    pub fn from_fields<F: Fields + ?Sized>(fields: &F) -> Option<Self> {
        let file = fields.get_str("file").ok()?.to_string();
        Some(Self {
            file,
            line: to_usize(fields.get_u64("line").or(1)),
            col: to_usize(fields.get_u64("col").or(1)),
            text: fields.get_str("text").or("").to_string(),
        })
    }

    /// Every well-formed item under `key`. Malformed entries are skipped.
    pub fn list_from<F: Fields>(payload: &F, key: &str) -> Vec<Self> {
        payload
            .get_items(key)
            .or(Vec::new())
            .into_iter()
            .filter_map(Self::from_fields)
            .collect()
    }
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

impl fmt::Display for QuickfixItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}: {}", self.file, self.line, self.col, self.text)
    }
}

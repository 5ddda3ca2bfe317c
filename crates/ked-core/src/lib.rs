//! # ked-core: Editor state core for ked
//!
//! This crate holds the in-memory model the rest of the editor drives:
//!
//! - **[`row`]**: one line of raw bytes plus its tab-expanded render form
//! - **[`buffer`]**: ordered rows, a primary cursor, and secondary cursors
//! - **[`cursor`]**: the `(x, y)` byte-offset/row cursor type
//! - **[`window`]**: a viewport bound to a buffer by [`BufferId`](buffer::BufferId)
//! - **[`layout`]**: the binary split tree over window indices
//! - **[`jumplist`]**: bounded, branch-truncating navigation history
//! - **[`editor`]**: the composition root that keeps all of the above consistent
//!
//! Ambient pieces: [`config`] (TOML), [`options`] (`:set` parsing),
//! [`status`] (the status-message slot), [`payload`] (structured-data
//! accessors), and [`quickfix`] (items rendered into the quickfix buffer).

pub mod buffer;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod jumplist;
pub mod layout;
pub mod options;
pub mod payload;
pub mod quickfix;
pub mod row;
pub mod status;
pub mod window;

pub use error::{Error, Result};

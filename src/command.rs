// SPDX-License-Identifier: MIT
//
// Line commands understood by the ked driver.
//
// One command per input line; a leading `:` is optional.
//
//   | Command            | Action                                 |
//   |--------------------|----------------------------------------|
//   | `sp` / `split`     | Split horizontally                     |
//   | `vsp` / `vsplit`   | Split vertically                       |
//   | `close`            | Close the focused window               |
//   | `only`             | Close every other window               |
//   | `wn`               | Focus the next window                  |
//   | `wh` `wj` `wk` `wl`| Focus left / down / up / right         |
//   | `e <path>`         | Edit a file in the focused window      |
//   | `enew`             | Edit a new empty buffer                |
//   | `bd`               | Delete the active buffer               |
//   | `cursor <x> <y>`   | Move the primary cursor (0-indexed)    |
//   | `ca` `cb` `ck` `cc`| Cursor add / below / above / clear     |
//   | `mark`             | Record a jump                          |
//   | `back` / `fwd`     | Walk the jump list                     |
//   | `set <args>`       | Apply `:set` directives                |
//   | `copen <json>`     | Fill the quickfix list from JSON       |
//   | `layout`           | Print window geometry                  |
//   | `q`                | Quit                                   |

use std::path::PathBuf;

use ked_core::layout::{Direction, Orientation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Split(Orientation),
    Close,
    Only,
    FocusNext,
    Focus(Direction),
    Edit(PathBuf),
    New,
    BufferDelete,
    Cursor { x: usize, y: usize },
    CursorAdd,
    CursorBelow,
    CursorAbove,
    CursorClear,
    Mark,
    JumpBack,
    JumpForward,

    /// Everything after `set`, possibly empty.
    Set(String),

    /// Raw JSON payload for the quickfix list.
    QuickfixOpen(String),

    Layout,
    Quit,

    /// Known command with missing or malformed arguments.
    BadArgument(String),

    /// Unknown command: contains the full input for error reporting.
    Unknown(String),
}

impl Command {
    /// Status-line text for commands that cannot run.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::BadArgument(input) => Some(format!("E471: Argument required: {input}")),
            Self::Unknown(input) if !input.is_empty() => {
                Some(format!("E492: Not an editor command: {input}"))
            }
            _ => None,
        }
    }
}

/// Parse one input line.
pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix(':').unwrap_or(trimmed).trim_start();

    let (cmd, arg) = trimmed
        .find(char::is_whitespace)
        .map_or((trimmed, ""), |pos| {
            (&trimmed[..pos], trimmed[pos..].trim_start())
        });

    match cmd {
        "sp" | "split" => Command::Split(Orientation::Horizontal),
        "vsp" | "vsplit" => Command::Split(Orientation::Vertical),
        "close" | "clo" => Command::Close,
        "only" | "on" => Command::Only,
        "wn" => Command::FocusNext,
        "wh" => Command::Focus(Direction::Left),
        "wj" => Command::Focus(Direction::Down),
        "wk" => Command::Focus(Direction::Up),
        "wl" => Command::Focus(Direction::Right),
        "e" | "edit" => {
            if arg.is_empty() {
                Command::BadArgument(trimmed.to_string())
            } else {
                Command::Edit(PathBuf::from(arg))
            }
        }
        "enew" | "ene" => Command::New,
        "bd" | "bdelete" => Command::BufferDelete,
        "cursor" => parse_cursor(arg).unwrap_or_else(|| Command::BadArgument(trimmed.to_string())),
        "ca" => Command::CursorAdd,
        "cb" => Command::CursorBelow,
        "ck" => Command::CursorAbove,
        "cc" => Command::CursorClear,
        "mark" => Command::Mark,
        "back" => Command::JumpBack,
        "fwd" => Command::JumpForward,
        "set" | "se" => Command::Set(arg.to_string()),
        "copen" => {
            if arg.is_empty() {
                Command::BadArgument(trimmed.to_string())
            } else {
                Command::QuickfixOpen(arg.to_string())
            }
        }
        "layout" => Command::Layout,
        "q" | "quit" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

fn parse_cursor(arg: &str) -> Option<Command> {
    let mut parts = arg.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Command::Cursor { x, y })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

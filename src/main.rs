// SPDX-License-Identifier: MIT
//
// ked: a headless driver for the ked editor state core.
//
// There is no terminal UI here. Commands arrive one per line on stdin, each
// is applied to the Editor, and whatever the status line says afterwards is
// printed to stdout:
//
//   stdin → parse_command → Editor method → status line → stdout
//
// Tracing output goes to a log file (see `logging`), never to stdout.

mod command;
mod logging;
mod paths;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use ked_core::buffer::BufferId;
use ked_core::config::Config;
use ked_core::editor::Editor;
use ked_core::layout::Rect;
use ked_core::quickfix::QuickfixItem;
use tracing::{debug, info};

use crate::command::{Command, parse_command};

#[derive(Debug, Parser)]
#[command(name = "ked", version)]
#[command(about = "Drive the ked editor core with line commands on stdin")]
struct Args {
    /// Files to open; the last one ends up in the window.
    files: Vec<PathBuf>,

    /// Config file (default: `$XDG_CONFIG_HOME/ked/ked.toml` when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tracing filter such as `debug` or `ked_core=trace`; overrides `RUST_LOG`.
    #[arg(long)]
    log_level: Option<String>,

    /// Screen width used for layout.
    #[arg(long, default_value_t = 80)]
    width: u16,

    /// Screen height used for layout.
    #[arg(long, default_value_t = 24)]
    height: u16,
}

/// Whether the command loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ked: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let log_file = logging::init(args.log_level.as_deref())
        .context("set up logging failed")?;
    let config = load_config(args.config.as_deref())?;
    info!(log = %log_file.display(), ?config, "ked started");

    let mut editor = Editor::new(config);
    editor.resize(Rect::new(0, 0, args.width, args.height));
    open_files(&mut editor, &args.files);

    let mut out = io::stdout().lock();
    report(&mut editor, &mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("read command failed")?;
        let cmd = parse_command(&line);
        debug!(?cmd, "command");
        let flow = execute(&mut editor, cmd, &mut out)?;
        editor.scroll_current();
        if editor.take_redraw() {
            debug!("redraw requested");
        }
        report(&mut editor, &mut out)?;
        if flow == Flow::Quit {
            break;
        }
    }

    info!("ked finished");
    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path)
            .with_context(|| format!("load config {} failed", path.display()));
    }
    let path = paths::default_config_path();
    if path.is_file() {
        Config::load(&path).with_context(|| format!("load config {} failed", path.display()))
    } else {
        Ok(Config::default())
    }
}

/// Open every file, then drop the untouched scratch buffer the editor
/// started with.
fn open_files(editor: &mut Editor, files: &[PathBuf]) {
    for path in files {
        editor.open_file(path);
    }
    let scratch = BufferId::new(0);
    let pristine = editor
        .buffer(scratch)
        .is_some_and(|b| b.path().is_none() && b.is_empty() && !b.is_modified());
    if pristine && editor.buffers().len() > 1 {
        editor.close_buffer(scratch);
    }
}

fn execute(editor: &mut Editor, cmd: Command, out: &mut impl Write) -> Result<Flow> {
    if let Some(msg) = cmd.error_message() {
        editor.status_mut().set_error(msg);
        return Ok(Flow::Continue);
    }

    match cmd {
        Command::Split(orientation) => {
            editor.split(orientation);
        }
        Command::Close => {
            editor.close_current();
        }
        Command::Only => {
            editor.close_others();
        }
        Command::FocusNext => {
            editor.focus_next();
        }
        Command::Focus(dir) => {
            editor.focus_direction(dir);
        }
        Command::Edit(path) => {
            editor.record_jump();
            editor.open_file(&path);
        }
        Command::New => {
            editor.new_buffer();
        }
        Command::BufferDelete => {
            let id = editor.active_buffer_id();
            editor.close_buffer(id);
        }
        Command::Cursor { x, y } => {
            editor.set_cursor(x, y);
        }
        Command::CursorAdd => {
            editor.cursor_add();
        }
        Command::CursorBelow => {
            editor.cursor_add_below();
        }
        Command::CursorAbove => {
            editor.cursor_add_above();
        }
        Command::CursorClear => {
            editor.cursor_clear();
        }
        Command::Mark => {
            if !editor.record_jump() {
                editor.status_mut().set_error("E32: No file name");
            }
        }
        Command::JumpBack => {
            editor.jump_backward();
        }
        Command::JumpForward => {
            editor.jump_forward();
        }
        Command::Set(args) => {
            editor.apply_set(&args);
        }
        Command::QuickfixOpen(json) => match serde_json::from_str::<serde_json::Value>(&json) {
            Ok(payload) => {
                let items = QuickfixItem::list_from(&payload, "items");
                editor.open_quickfix(&items);
            }
            Err(err) => editor.status_mut().set_error(format!("E474: Invalid JSON: {err}")),
        },
        Command::Layout => print_layout(editor, out)?,
        Command::Quit => return Ok(Flow::Quit),
        Command::BadArgument(_) | Command::Unknown(_) => {}
    }
    Ok(Flow::Continue)
}

/// Print and clear the status message.
fn report(editor: &mut Editor, out: &mut impl Write) -> Result<()> {
    let is_error = editor.status().is_error();
    if let Some(msg) = editor.status_mut().take() {
        let prefix = if is_error { "error: " } else { "" };
        writeln!(out, "{prefix}{msg}").context("write status failed")?;
    }
    Ok(())
}

/// One line per window, `*` marking the focused one:
///
/// ```text
/// *1 0,0 40x24 #2 src/main.rs 3:1 +0+0
/// ```
fn print_layout(editor: &Editor, out: &mut impl Write) -> Result<()> {
    for (i, w) in editor.windows().iter().enumerate() {
        let Rect { x, y, w: width, h } = w.rect();
        let name = editor.buffer(w.buffer()).map_or("?", |b| b.name());
        let cursor = if w.is_focused() {
            editor.active_buffer().cursor()
        } else {
            w.cursor()
        };
        writeln!(
            out,
            "{}{} {x},{y} {width}x{h} {} {name} {cursor} +{}+{}",
            if w.is_focused() { "*" } else { " " },
            i + 1,
            w.buffer(),
            w.row_offset(),
            w.col_offset(),
        )
        .context("write layout failed")?;
    }
    let layout = editor.layout();
    writeln!(out, "leaves {:?}", layout.leaves()).context("write layout failed")?;
    writeln!(out, "separators {:?}", layout.separators(editor.area()))
        .context("write layout failed")?;
    Ok(())
}

//! Crate-level error type.
//!
//! Interactive commands never return errors; they report through the
//! [`StatusLine`](crate::status::StatusLine). `Error` is for the few
//! constructors that touch the outside world, like loading a file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

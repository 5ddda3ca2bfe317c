//! Status line: the single most-recent-message slot.
//!
//! Every editor command reports its outcome here instead of printing. The
//! rendering layer reads the slot between commands and decides how to show
//! it; errors render differently from informational messages.

use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    message: Option<String>,
    is_error: bool,
}

impl StatusLine {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            message: None,
            is_error: false,
        }
    }

    /// Set an informational message, replacing any previous one.
    pub fn set_message(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!(status = %msg, "status message");
        self.message = Some(msg);
        self.is_error = false;
    }

    /// Set an error message, replacing any previous one.
    pub fn set_error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!(status = %msg, "status error");
        self.message = Some(msg);
        self.is_error = true;
    }

    #[inline]
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[inline]
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.is_error
    }

    /// Take the message out, leaving the slot empty.
    pub fn take(&mut self) -> Option<String> {
        self.is_error = false;
        self.message.take()
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.is_error = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        let s = StatusLine::new();
        assert_eq!(s.message(), None);
        assert!(!s.is_error());
    }

    #[test]
    fn latest_message_wins() {
        let mut s = StatusLine::new();
        s.set_error("boom");
        assert!(s.is_error());
        s.set_message("fine");
        assert_eq!(s.message(), Some("fine"));
        assert!(!s.is_error());
    }

    #[test]
    fn take_empties_slot() {
        let mut s = StatusLine::new();
        s.set_error("bad");
        assert_eq!(s.take().as_deref(), Some("bad"));
        assert_eq!(s.message(), None);
        assert!(!s.is_error());
    }
}

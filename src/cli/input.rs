//! Keystroke input handling using crossterm
//!
//! Features:
//! - Non-blocking key polling between frames
//! - ESC or Ctrl+C ends the session early

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::Result as IoResult;
use std::time::Duration;
use tracing::warn;

use crate::tracker::AbortSignal;

/// Watches the terminal for an exit key
pub struct InputHandler {
    /// Per-check poll budget; the pose source does the real waiting
    poll_timeout: Duration,
    exit_requested: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        InputHandler {
            poll_timeout: Duration::ZERO,
            exit_requested: false,
        }
    }

    /// Enable raw mode so single keys arrive without Enter
    pub fn enable_raw_mode() -> IoResult<()> {
        crossterm::terminal::enable_raw_mode()
    }

    /// Disable raw mode and restore terminal
    pub fn disable_raw_mode() -> IoResult<()> {
        crossterm::terminal::disable_raw_mode()
    }

    /// Drain pending key events; true once an exit key has been seen
    pub fn poll_exit(&mut self) -> IoResult<bool> {
        while !self.exit_requested && event::poll(self.poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release && Self::is_exit(&key) {
                    self.exit_requested = true;
                }
            }
        }
        Ok(self.exit_requested)
    }

    /// Check if key event is an exit signal (Ctrl+C or Escape)
    pub fn is_exit(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Esc => true,
            _ => false,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl AbortSignal for InputHandler {
    fn should_abort(&mut self) -> bool {
        match self.poll_exit() {
            Ok(exit) => exit,
            Err(e) => {
                warn!("Keyboard polling failed, ignoring input: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_keys() {
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);

        assert!(InputHandler::is_exit(&esc));
        assert!(InputHandler::is_exit(&ctrl_c));
        assert!(!InputHandler::is_exit(&plain_c));
        assert!(!InputHandler::is_exit(&enter));
    }
}

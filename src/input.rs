//! Keyboard input: crossterm events mapped to game commands.

use crate::game::scene::Command;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

/// Where the game loop gets player commands from.
pub trait InputSource {
    /// Wait up to `timeout` for the next command. `Ok(None)` on timeout.
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<Command>>;
}

/// Map a key press to a command.
pub fn map_key(key: KeyEvent) -> Command {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Command::Quit,
            _ => Command::Other,
        };
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Up => Command::Confirm,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char('d') | KeyCode::Char('D') => Command::ToggleDebug,
        _ => Command::Other,
    }
}

/// Reads key presses from the terminal.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => Ok(Some(map_key(key))),
            // Resizes and the rest still wake the caller so it can redraw.
            _ => Ok(Some(Command::Other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_confirm_keys() {
        assert_eq!(map_key(key(KeyCode::Char(' '))), Command::Confirm);
        assert_eq!(map_key(key(KeyCode::Enter)), Command::Confirm);
        assert_eq!(map_key(key(KeyCode::Up)), Command::Confirm);
    }

    #[test]
    fn test_restart_and_quit_keys() {
        assert_eq!(map_key(key(KeyCode::Char('r'))), Command::Restart);
        assert_eq!(map_key(key(KeyCode::Char('R'))), Command::Restart);
        assert_eq!(map_key(key(KeyCode::Char('q'))), Command::Quit);
        assert_eq!(map_key(key(KeyCode::Esc)), Command::Quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c), Command::Quit);
        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_r), Command::Other);
    }

    #[test]
    fn test_debug_toggle() {
        assert_eq!(map_key(key(KeyCode::Char('d'))), Command::ToggleDebug);
    }

    #[test]
    fn test_unknown_keys() {
        assert_eq!(map_key(key(KeyCode::Char('x'))), Command::Other);
        assert_eq!(map_key(key(KeyCode::Tab)), Command::Other);
        assert_eq!(map_key(key(KeyCode::F(5))), Command::Other);
    }
}

//! crossterm front end for the picker
//!
//! Raw mode and the alternate screen are held by a guard so the terminal is
//! restored on every exit path, including errors.

use crate::picker::{drive, Event, EventSource, Picker, Screen, Selection, ViewOptions};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use std::io::{self, Stdout, Write};
use tracing::debug;

/// Key name for a key press, in the vocabulary of `Event::from_key_name`
pub(crate) fn key_name(key: &KeyEvent) -> Option<String> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char(c) => Some(format!("ctrl+{}", c.to_ascii_lowercase())),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Up => Some("up".to_string()),
        KeyCode::Down => Some("down".to_string()),
        KeyCode::Enter => Some("enter".to_string()),
        KeyCode::Char(' ') => Some("space".to_string()),
        KeyCode::Char(c) => Some(c.to_string()),
        _ => None,
    }
}

/// Restores the terminal when dropped
struct RawTerminal {
    out: Stdout,
}

impl RawTerminal {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self { out })
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Key presses read from the terminal
struct KeyEvents;

impl EventSource for KeyEvents {
    fn next_event(&mut self) -> io::Result<Option<Event>> {
        loop {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(ev) = key_name(&key).as_deref().and_then(Event::from_key_name) {
                    debug!(?ev, "picker event");
                    return Ok(Some(ev));
                }
            }
        }
    }
}

impl Screen for RawTerminal {
    fn draw(&mut self, frame: &str) -> io::Result<()> {
        execute!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        // raw mode needs explicit carriage returns
        self.out.write_all(frame.replace('\n', "\r\n").as_bytes())?;
        self.out.flush()
    }
}

/// Picker that takes over the terminal until the user commits or quits
#[derive(Debug, Default)]
pub struct TerminalPicker;

impl TerminalPicker {
    pub fn new() -> Self {
        Self
    }
}

impl Picker for TerminalPicker {
    fn pick(&mut self, state: Selection, view: &ViewOptions) -> io::Result<Selection> {
        let mut term = RawTerminal::enter()?;
        drive(state, &mut KeyEvents, &mut term, view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_key_names_map_to_events() {
        let cases = [
            (press(KeyCode::Up, KeyModifiers::NONE), Some(Event::MoveUp)),
            (press(KeyCode::Char('j'), KeyModifiers::NONE), Some(Event::MoveDown)),
            (press(KeyCode::Char(' '), KeyModifiers::NONE), Some(Event::Toggle)),
            (press(KeyCode::Enter, KeyModifiers::NONE), Some(Event::Commit)),
            (press(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Event::Abort)),
            (press(KeyCode::Char('q'), KeyModifiers::NONE), Some(Event::Abort)),
            (press(KeyCode::Char('x'), KeyModifiers::NONE), None),
            (press(KeyCode::Esc, KeyModifiers::NONE), None),
        ];
        for (key, expected) in cases {
            let event = key_name(&key).as_deref().and_then(Event::from_key_name);
            assert_eq!(event, expected, "{:?}", key);
        }
    }
}

//! Terminal key and focus events translated into runner input.
//!
//! Terminals without the keyboard enhancement protocol never report key
//! releases, so a release is synthesized right after each press.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use trex_runner::core::InputEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostInput {
    Runner(InputEvent),
    /// Terminal focus gained or lost.
    Visibility(bool),
    Quit,
}

/// What a key does, independent of press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Jump,
    Duck,
    Restart,
    Quit,
}

fn key_action(key: &KeyEvent) -> Option<KeyAction> {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up => Some(KeyAction::Jump),
        KeyCode::Down => Some(KeyAction::Duck),
        KeyCode::Enter => Some(KeyAction::Restart),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyAction::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(KeyAction::Quit),
        _ => None,
    }
}

/// Translate one terminal event. `reports_release` is true when the terminal
/// sends key release events itself.
pub fn translate_event(event: &Event, reports_release: bool) -> Vec<HostInput> {
    match event {
        Event::Key(key) => translate_key(key, reports_release),
        Event::FocusGained => vec![HostInput::Visibility(true)],
        Event::FocusLost => vec![HostInput::Visibility(false)],
        _ => Vec::new(),
    }
}

fn translate_key(key: &KeyEvent, reports_release: bool) -> Vec<HostInput> {
    let Some(action) = key_action(key) else {
        return Vec::new();
    };

    match key.kind {
        KeyEventKind::Press => {
            let (press, release) = match action {
                KeyAction::Quit => return vec![HostInput::Quit],
                KeyAction::Restart => {
                    return vec![HostInput::Runner(InputEvent::RestartRequested)]
                }
                KeyAction::Jump => (InputEvent::JumpPressed, InputEvent::JumpReleased),
                KeyAction::Duck => (InputEvent::DuckPressed, InputEvent::DuckReleased),
            };
            if reports_release {
                vec![HostInput::Runner(press)]
            } else {
                vec![HostInput::Runner(press), HostInput::Runner(release)]
            }
        }
        KeyEventKind::Release => match action {
            KeyAction::Jump => vec![HostInput::Runner(InputEvent::JumpReleased)],
            KeyAction::Duck => vec![HostInput::Runner(InputEvent::DuckReleased)],
            _ => Vec::new(),
        },
        KeyEventKind::Repeat => Vec::new(),
    }
}

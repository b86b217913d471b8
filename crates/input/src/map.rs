//! Key mapping from terminal events to control events.

use crate::types::ControlEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to control events.
///
/// In normal flight Up fires the thruster and Shift with Left/Right fires it
/// while drifting. In debug flight the arrows move the craft directly.
pub fn handle_key_event(key: KeyEvent, debug_flight: bool) -> Option<ControlEvent> {
    if should_quit(key) {
        return Some(ControlEvent::Menu);
    }
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(if debug_flight {
            ControlEvent::Up
        } else {
            ControlEvent::Thrust
        }),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') if debug_flight => {
            Some(ControlEvent::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(if shift && !debug_flight {
            ControlEvent::ThrustLeft
        } else {
            ControlEvent::Left
        }),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(if shift && !debug_flight {
            ControlEvent::ThrustRight
        } else {
            ControlEvent::Right
        }),
        KeyCode::Char(' ') if !debug_flight => Some(ControlEvent::Thrust),
        _ => None,
    }
}

/// Check if key should leave the level.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Whether the event keeps the thruster burning while held
pub fn is_thrust(event: ControlEvent) -> bool {
    matches!(
        event,
        ControlEvent::Thrust | ControlEvent::ThrustLeft | ControlEvent::ThrustRight
    )
}

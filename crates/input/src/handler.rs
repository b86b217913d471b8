//! Per-tick input handler for terminal environments.
//!
//! Key presses queue up as discrete events and the game consumes at most one
//! per tick, so a burst of arrow presses drifts the craft one half-cell per
//! tick instead of all at once. The thruster is different: it stays lit while
//! the key is held. Terminals that never report key releases are covered by a
//! timeout since the last thrust press.

use arrayvec::ArrayVec;
use crossterm::event::KeyEvent;

use crate::map::{handle_key_event, is_thrust};
use crate::types::{ControlEvent, ControlInput};

// Typematic repeat on most terminals is 30-50ms after the initial delay, so a
// held key refreshes well within this window.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Most pending events kept between ticks; extra presses are dropped.
const PENDING_CAPACITY: usize = 16;

/// Tracks pending events and the held thruster.
#[derive(Debug, Clone)]
pub struct InputHandler {
    pending: ArrayVec<ControlEvent, PENDING_CAPACITY>,
    debug_flight: bool,
    thrust_held: bool,
    since_thrust_ms: u32,
    menu: bool,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new(debug_flight: bool) -> Self {
        Self {
            pending: ArrayVec::new(),
            debug_flight,
            thrust_held: false,
            since_thrust_ms: 0,
            menu: false,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Record a press (or auto-repeat). Returns the mapped event, if any.
    pub fn handle_key_press(&mut self, key: KeyEvent) -> Option<ControlEvent> {
        let event = handle_key_event(key, self.debug_flight)?;
        match event {
            ControlEvent::Menu => self.menu = true,
            e if is_thrust(e) => {
                self.thrust_held = true;
                self.since_thrust_ms = 0;
                // Only the drift part needs queueing; thrust is carried by the hold.
                if e != ControlEvent::Thrust {
                    let _ = self.pending.try_push(e);
                }
            }
            e => {
                let _ = self.pending.try_push(e);
            }
        }
        Some(event)
    }

    pub fn handle_key_release(&mut self, key: KeyEvent) {
        if handle_key_event(key, self.debug_flight).is_some_and(is_thrust) {
            self.thrust_held = false;
        }
    }

    /// Build the input for the next tick, `elapsed_ms` after the previous one.
    pub fn next_input(&mut self, elapsed_ms: u32) -> ControlInput {
        let mut input = ControlInput::default();

        if let Some(event) = self.pop_front() {
            input.apply(event);
        }

        if self.thrust_held {
            input.thrust = true;
            self.since_thrust_ms = self.since_thrust_ms.saturating_add(elapsed_ms);
            // Auto-release when the terminal does not emit release events.
            if self.since_thrust_ms > self.key_release_timeout_ms {
                self.thrust_held = false;
            }
        }

        input.menu |= self.menu;
        input
    }

    fn pop_front(&mut self) -> Option<ControlEvent> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_one_event_per_tick() {
        let mut ih = InputHandler::new(false);
        ih.handle_key_press(KeyEvent::from(KeyCode::Left));
        ih.handle_key_press(KeyEvent::from(KeyCode::Left));
        ih.handle_key_press(KeyEvent::from(KeyCode::Right));
        assert_eq!(ih.pending.len(), 3);

        assert_eq!(ih.next_input(16).dx, -1);
        assert_eq!(ih.next_input(16).dx, -1);
        assert_eq!(ih.next_input(16).dx, 1);
        assert_eq!(ih.next_input(16), ControlInput::default());
    }

    #[test]
    fn test_thrust_held_until_release() {
        let mut ih = InputHandler::new(false);
        ih.handle_key_press(KeyEvent::from(KeyCode::Up));
        assert!(ih.next_input(16).thrust);
        assert!(ih.next_input(16).thrust);

        ih.handle_key_release(KeyEvent::from(KeyCode::Up));
        assert!(!ih.next_input(16).thrust);
    }

    #[test]
    fn test_thrust_auto_release_without_release_events() {
        let mut ih = InputHandler::new(false).with_key_release_timeout_ms(40);
        ih.handle_key_press(KeyEvent::from(KeyCode::Up));
        assert!(ih.next_input(16).thrust);
        assert!(ih.next_input(16).thrust);
        // 48ms since the press: this tick still burns, then the hold lapses.
        assert!(ih.next_input(16).thrust);
        assert!(!ih.thrust_held);
        assert!(!ih.next_input(16).thrust);

        // A repeat press re-arms the hold.
        ih.handle_key_press(KeyEvent::from(KeyCode::Up));
        assert!(ih.next_input(16).thrust);
    }

    #[test]
    fn test_shift_drift_queues_drift_and_holds_thrust() {
        let mut ih = InputHandler::new(false);
        ih.handle_key_press(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT));
        let input = ih.next_input(16);
        assert!(input.thrust);
        assert_eq!(input.dx, 1);
        let input = ih.next_input(16);
        assert!(input.thrust);
        assert_eq!(input.dx, 0);
    }

    #[test]
    fn test_menu_is_sticky() {
        let mut ih = InputHandler::new(false);
        assert_eq!(
            ih.handle_key_press(KeyEvent::from(KeyCode::Esc)),
            Some(ControlEvent::Menu)
        );
        assert!(ih.next_input(16).menu);
        assert!(ih.next_input(16).menu);
    }

    #[test]
    fn test_debug_flight_moves_vertically() {
        let mut ih = InputHandler::new(true);
        ih.handle_key_press(KeyEvent::from(KeyCode::Down));
        ih.handle_key_press(KeyEvent::from(KeyCode::Up));
        assert_eq!(ih.next_input(16).dy, 1);
        let input = ih.next_input(16);
        assert_eq!(input.dy, -1);
        assert!(!input.thrust);
    }

    #[test]
    fn test_overflow_is_dropped() {
        let mut ih = InputHandler::new(false);
        for _ in 0..PENDING_CAPACITY + 4 {
            ih.handle_key_press(KeyEvent::from(KeyCode::Left));
        }
        assert_eq!(ih.pending.len(), PENDING_CAPACITY);
    }
}

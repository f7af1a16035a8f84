use std::collections::HashSet;

use super::types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
    Timestamp,
};

/// Current input state for a single window.
///
/// Holds "is down" information, the current pointer position and the
/// timestamp of the most recent event. Platform adapters read it to fill in
/// fields their native events do not carry (button events without a
/// position, wheel events without modifiers).
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels, relative to the window.
    pub pointer_pos: Option<(f64, f64)>,

    /// Timestamp of the last applied event.
    pub last_time: Timestamp,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    ///
    /// Returns `false` when the event is a redundant transition (a release for
    /// a button that was never pressed, a repeated press).
    pub fn apply_event(&mut self, ev: &InputEvent) -> bool {
        match ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
                true
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss, clear "down" sets.
                    // Avoids stuck keys/buttons when focus changes mid-press.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
                true
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y, time, .. }) => {
                self.pointer_pos = Some((*x, *y));
                self.last_time = *time;
                true
            }

            InputEvent::PointerLeft { time } => {
                self.pointer_pos = None;
                self.last_time = *time;
                true
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                time,
                ..
            } => {
                self.modifiers = *modifiers;
                self.last_time = *time;

                match state {
                    KeyState::Pressed => self.keys_down.insert(*key),
                    KeyState::Released => self.keys_down.remove(key),
                }
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
                modifiers,
                time,
                ..
            }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;
                self.last_time = *time;

                match state {
                    MouseButtonState::Pressed => self.buttons_down.insert(*button),
                    MouseButtonState::Released => self.buttons_down.remove(button),
                }
            }

            InputEvent::MouseWheel { modifiers, time, .. } => {
                self.modifiers = *modifiers;
                self.last_time = *time;
                true
            }
        }
    }

    /// Helper queries
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── buttons ───────────────────────────────────────────────────────────

    #[test]
    fn press_and_release_track_button_and_position() {
        let mut st = InputState::default();
        assert!(st.apply_event(&InputEvent::PointerButton(PointerButtonEvent::press(3.0, 4.0, 10))));
        assert!(st.button_down(MouseButton::Left));
        assert_eq!(st.pointer_pos, Some((3.0, 4.0)));
        assert_eq!(st.last_time, 10);

        assert!(st.apply_event(&InputEvent::PointerButton(PointerButtonEvent::release(5.0, 6.0, 20))));
        assert!(!st.button_down(MouseButton::Left));
        assert_eq!(st.pointer_pos, Some((5.0, 6.0)));
    }

    #[test]
    fn release_without_press_is_redundant() {
        let mut st = InputState::default();
        assert!(!st.apply_event(&InputEvent::PointerButton(PointerButtonEvent::release(0.0, 0.0, 1))));
    }

    // ── focus / leave ─────────────────────────────────────────────────────

    #[test]
    fn focus_loss_clears_held_buttons() {
        let mut st = InputState::default();
        st.apply_event(&InputEvent::PointerButton(PointerButtonEvent::press(0.0, 0.0, 1)));
        st.apply_event(&InputEvent::Focused(false));
        assert!(st.buttons_down.is_empty());
        assert!(!st.focused);
    }

    #[test]
    fn pointer_left_forgets_position() {
        let mut st = InputState::default();
        st.apply_event(&InputEvent::PointerMoved(PointerMoveEvent::new(8.0, 9.0, 5)));
        st.apply_event(&InputEvent::PointerLeft { time: 6 });
        assert_eq!(st.pointer_pos, None);
        assert_eq!(st.last_time, 6);
    }
}

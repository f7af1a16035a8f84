use std::fmt;

/// Event timestamp in milliseconds.
///
/// Timestamps come from the platform and wrap around like X11 server time;
/// use `wrapping_sub` to compute intervals.
pub type Timestamp = u32;

/// Keyboard key identifier.
///
/// Only keys with a meaning for panning and focus navigation are named.
/// For everything else use `Key::Unknown(u32)` with a stable platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Space,

    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    /// Platform-dependent key not yet represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier. Touch contacts are reported as `Left`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Modifier keys state.
///
/// This is stored as booleans rather than bitflags to keep it explicit and stable.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }

    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// Discrete scroll direction, as delivered by wheel "clicks".
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Mouse wheel delta.
///
/// `Line` corresponds to "scroll lines" style input; `Pixel` is high precision.
/// Positive `y` scrolls up, positive `x` scrolls right.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f64, y: f64 },
    Pixel { x: f64, y: f64 },
}

impl MouseWheelDelta {
    /// Collapses the delta onto its dominant axis.
    ///
    /// Returns `None` for a zero delta.
    pub fn direction(&self) -> Option<ScrollDirection> {
        let (x, y) = match *self {
            MouseWheelDelta::Line { x, y } | MouseWheelDelta::Pixel { x, y } => (x, y),
        };
        if x == 0.0 && y == 0.0 {
            return None;
        }
        if y.abs() >= x.abs() {
            Some(if y > 0.0 { ScrollDirection::Up } else { ScrollDirection::Down })
        } else {
            Some(if x > 0.0 { ScrollDirection::Right } else { ScrollDirection::Left })
        }
    }
}

/// Pointer move event in logical pixels.
///
/// `x`/`y` are relative to the receiving surface, `x_root`/`y_root` to the
/// screen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f64,
    pub y: f64,
    pub x_root: f64,
    pub y_root: f64,
    pub time: Timestamp,
    pub modifiers: Modifiers,
}

impl PointerMoveEvent {
    /// Move event whose surface and root coordinates coincide.
    pub fn new(x: f64, y: f64, time: Timestamp) -> Self {
        Self { x, y, x_root: x, y_root: y, time, modifiers: Modifiers::default() }
    }
}

/// Pointer button event.
///
/// Coordinates are included to make event processing independent from an external
/// "current pointer position" if desired.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f64,
    pub y: f64,
    pub x_root: f64,
    pub y_root: f64,
    pub time: Timestamp,
    pub modifiers: Modifiers,
}

impl PointerButtonEvent {
    /// Primary-button press at `(x, y)`.
    pub fn press(x: f64, y: f64, time: Timestamp) -> Self {
        Self {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            x,
            y,
            x_root: x,
            y_root: y,
            time,
            modifiers: Modifiers::default(),
        }
    }

    /// Primary-button release at `(x, y)`.
    pub fn release(x: f64, y: f64, time: Timestamp) -> Self {
        Self { state: MouseButtonState::Released, ..Self::press(x, y, time) }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Reinterprets the button event as a motion sample at the same point.
    pub fn as_motion(&self) -> PointerMoveEvent {
        PointerMoveEvent {
            x: self.x,
            y: self.y,
            x_root: self.x_root,
            y_root: self.y_root,
            time: self.time,
            modifiers: self.modifiers,
        }
    }
}

/// Platform-agnostic input events emitted by the runtime.
///
/// Runtime translates window system events into these.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        /// Stable platform code when available (e.g. scancode).
        code: u32,
        /// True when event is a key-repeat.
        repeat: bool,
        time: Timestamp,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    MouseWheel {
        delta: MouseWheelDelta,
        modifiers: Modifiers,
        time: Timestamp,
    },

    /// Pointer left the window surface.
    PointerLeft { time: Timestamp },

    /// Window focus change.
    Focused(bool),
}

impl InputEvent {
    /// Timestamp of the event, if it carries one.
    pub fn time(&self) -> Option<Timestamp> {
        match self {
            InputEvent::Key { time, .. }
            | InputEvent::MouseWheel { time, .. }
            | InputEvent::PointerLeft { time } => Some(*time),
            InputEvent::PointerMoved(ev) => Some(ev.time),
            InputEvent::PointerButton(ev) => Some(ev.time),
            InputEvent::ModifiersChanged(_) | InputEvent::Focused(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_time() {
        let ev = InputEvent::PointerButton(PointerButtonEvent::press(1.0, 2.0, 77));
        assert_eq!(ev.time(), Some(77));
        assert_eq!(InputEvent::PointerLeft { time: 5 }.time(), Some(5));
        assert_eq!(InputEvent::Focused(true).time(), None);
    }

    #[test]
    fn wheel_direction_prefers_dominant_axis() {
        let d = MouseWheelDelta::Line { x: 0.5, y: -2.0 };
        assert_eq!(d.direction(), Some(ScrollDirection::Down));
        let d = MouseWheelDelta::Pixel { x: -30.0, y: 4.0 };
        assert_eq!(d.direction(), Some(ScrollDirection::Left));
        let d = MouseWheelDelta::Line { x: 0.0, y: 1.0 };
        assert_eq!(d.direction(), Some(ScrollDirection::Up));
    }

    #[test]
    fn wheel_zero_delta_has_no_direction() {
        assert_eq!(MouseWheelDelta::Pixel { x: 0.0, y: 0.0 }.direction(), None);
    }

    #[test]
    fn release_as_motion_keeps_position_and_time() {
        let ev = PointerButtonEvent::release(12.0, 40.0, 900).with_modifiers(Modifiers::shift());
        let m = ev.as_motion();
        assert_eq!((m.x, m.y, m.time), (12.0, 40.0, 900));
        assert!(m.modifiers.shift);
        assert_eq!(ev.state, MouseButtonState::Released);
    }
}

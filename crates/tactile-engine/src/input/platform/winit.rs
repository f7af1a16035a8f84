//! winit adapter.
//!
//! Translates winit window events into engine `InputEvent`s. Touch contacts
//! are reported as primary-button presses so a touch screen drives the same
//! gesture paths as a mouse.

use winit::dpi::PhysicalPosition;
use winit::event::{
    ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, Touch, TouchPhase,
    WindowEvent,
};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use crate::input::{
    InputEvent, InputState, Key, KeyState, Modifiers, MouseButton, MouseButtonState,
    MouseWheelDelta, PointerButtonEvent, PointerMoveEvent, Timestamp,
};

/// Window-level data required to translate an event.
///
/// winit events carry neither a timestamp nor screen coordinates, so the
/// caller supplies the event time and the window's outer position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TranslateContext {
    pub scale_factor: f64,
    /// Window origin on screen, logical pixels.
    pub window_origin: (f64, f64),
    pub time: Timestamp,
}

impl TranslateContext {
    pub fn new(scale_factor: f64, time: Timestamp) -> Self {
        Self { scale_factor, window_origin: (0.0, 0.0), time }
    }

    pub fn with_window_origin(mut self, x: f64, y: f64) -> Self {
        self.window_origin = (x, y);
        self
    }

    fn to_logical(&self, pos: PhysicalPosition<f64>) -> (f64, f64) {
        let logical = pos.to_logical::<f64>(self.scale_factor);
        (logical.x, logical.y)
    }

    fn to_root(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (x + self.window_origin.0, y + self.window_origin.1)
    }
}

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem.
pub fn translate_window_event(
    ctx: &TranslateContext,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    let time = ctx.time;
    match event {
        WindowEvent::ModifiersChanged(m) => {
            // winit 0.30: ModifiersChanged carries a wrapper with `.state()`.
            let ms: ModifiersState = m.state();
            Some(InputEvent::ModifiersChanged(map_modifiers(ms)))
        }

        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft { time }),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = ctx.to_logical(*position);
            Some(InputEvent::PointerMoved(move_event(ctx, state, x, y)))
        }

        WindowEvent::MouseInput { state: st, button, .. } => {
            // winit 0.30 does not expose cursor query; use tracked pointer position.
            let (x, y) = state.pointer_pos.unwrap_or((0.0, 0.0));
            Some(InputEvent::PointerButton(button_event(
                ctx,
                state,
                map_mouse_button(*button),
                map_element_state(*st),
                x,
                y,
            )))
        }

        WindowEvent::Touch(touch) => Some(translate_touch(ctx, state, touch)),

        WindowEvent::MouseWheel { delta, .. } => {
            let delta = match delta {
                MouseScrollDelta::LineDelta(x, y) => MouseWheelDelta::Line {
                    x: *x as f64,
                    y: *y as f64,
                },
                MouseScrollDelta::PixelDelta(p) => {
                    let (x, y) = ctx.to_logical(*p);
                    MouseWheelDelta::Pixel { x, y }
                }
            };
            Some(InputEvent::MouseWheel { delta, modifiers: state.modifiers, time })
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let st = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            let (key, code) = map_key(event.physical_key);

            Some(InputEvent::Key {
                key,
                state: st,
                modifiers: state.modifiers,
                code,
                repeat: event.repeat,
                time,
            })
        }

        _ => None,
    }
}

fn translate_touch(ctx: &TranslateContext, state: &InputState, touch: &Touch) -> InputEvent {
    let (x, y) = ctx.to_logical(touch.location);
    match touch.phase {
        TouchPhase::Started => InputEvent::PointerButton(button_event(
            ctx,
            state,
            MouseButton::Left,
            MouseButtonState::Pressed,
            x,
            y,
        )),
        TouchPhase::Moved => InputEvent::PointerMoved(move_event(ctx, state, x, y)),
        TouchPhase::Ended | TouchPhase::Cancelled => InputEvent::PointerButton(button_event(
            ctx,
            state,
            MouseButton::Left,
            MouseButtonState::Released,
            x,
            y,
        )),
    }
}

fn move_event(ctx: &TranslateContext, state: &InputState, x: f64, y: f64) -> PointerMoveEvent {
    let (x_root, y_root) = ctx.to_root((x, y));
    PointerMoveEvent { x, y, x_root, y_root, time: ctx.time, modifiers: state.modifiers }
}

fn button_event(
    ctx: &TranslateContext,
    state: &InputState,
    button: MouseButton,
    st: MouseButtonState,
    x: f64,
    y: f64,
) -> PointerButtonEvent {
    let (x_root, y_root) = ctx.to_root((x, y));
    PointerButtonEvent {
        button,
        state: st,
        x,
        y,
        x_root,
        y_root,
        time: ctx.time,
        // winit 0.30 does not expose `Window::modifiers()`; use the tracked state.
        modifiers: state.modifiers,
    }
}

fn map_element_state(st: ElementState) -> MouseButtonState {
    match st {
        ElementState::Pressed => MouseButtonState::Pressed,
        ElementState::Released => MouseButtonState::Released,
    }
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> (Key, u32) {
    match pk {
        PhysicalKey::Code(code) => {
            let key = match code {
                KeyCode::Escape => Key::Escape,
                KeyCode::Enter => Key::Enter,
                KeyCode::Tab => Key::Tab,
                KeyCode::Space => Key::Space,

                KeyCode::Home => Key::Home,
                KeyCode::End => Key::End,
                KeyCode::PageUp => Key::PageUp,
                KeyCode::PageDown => Key::PageDown,

                KeyCode::ArrowUp => Key::ArrowUp,
                KeyCode::ArrowDown => Key::ArrowDown,
                KeyCode::ArrowLeft => Key::ArrowLeft,
                KeyCode::ArrowRight => Key::ArrowRight,

                KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
                KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
                KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
                KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

                other => Key::Unknown(other as u32),
            };

            (key, code as u32)
        }

        // winit 0.30 uses NativeKeyCode; no stable numeric is guaranteed here.
        PhysicalKey::Unidentified(_) => (Key::Unknown(0), 0),
    }
}

use super::frame::InputFrame;
use super::types::{InputEvent, PointerButtonEvent, PointerMoveEvent};

/// Input state carried between events for a single window.
///
/// winit reports button presses without a position, so the last known
/// pointer position is kept here and attached to them.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in logical pixels, `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,
}

impl InputState {
    /// Records `ev` into `frame` and updates the tracked pointer position.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::PointerMoved(PointerMoveEvent { x, y })
            | InputEvent::PointerButton(PointerButtonEvent { x, y, .. }) => {
                self.pointer_pos = Some((*x, *y));
            }
            InputEvent::PointerLeft => self.pointer_pos = None,
            _ => {}
        }

        frame.push_event(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyState, MouseButton, MouseButtonState, MouseWheelDelta};

    #[test]
    fn every_event_is_queued_in_order() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        let press = InputEvent::Key {
            key: Key::PageDown,
            state: KeyState::Pressed,
            repeat: false,
        };
        let wheel = InputEvent::MouseWheel(MouseWheelDelta::Line { x: 0.0, y: -1.0 });

        state.apply_event(&mut frame, press.clone());
        state.apply_event(&mut frame, wheel.clone());

        assert_eq!(frame.events, vec![press, wheel]);

        frame.clear();
        assert!(frame.events.is_empty());
    }

    #[test]
    fn button_events_update_pointer_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(
            &mut frame,
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                x: 12.0,
                y: 34.0,
            }),
        );

        assert_eq!(state.pointer_pos, Some((12.0, 34.0)));
    }

    #[test]
    fn pointer_leave_forgets_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 2.0 }));
        assert_eq!(state.pointer_pos, Some((1.0, 2.0)));

        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }
}

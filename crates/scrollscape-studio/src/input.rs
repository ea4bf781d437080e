//! Engine input events to motion commands.

use scrollscape_engine::input::{InputEvent, Key, KeyState, MouseButtonState, MouseWheelDelta};
use scrollscape_motion::MotionCommand;

/// Fraction of the viewport one page key scrolls.
const PAGE_FRACTION: f32 = 0.9;

/// What one input event asks of the studio.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Action {
    Motion(MotionCommand),
    Exit,
}

/// Scroll distances that depend on the current layout.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScrollMetrics {
    pub viewport_height: f32,
    pub line_height: f32,
}

impl ScrollMetrics {
    fn page(&self) -> f32 {
        self.viewport_height.max(1.0) * PAGE_FRACTION
    }
}

/// Maps one event; `None` when the scene does not react to it.
pub fn translate(event: &InputEvent, metrics: ScrollMetrics) -> Option<Action> {
    let motion = match event {
        InputEvent::PointerMoved(p) => MotionCommand::PointerMoved { x: p.x, y: p.y },

        InputEvent::PointerButton(b) => match b.state {
            MouseButtonState::Pressed => MotionCommand::PointerDown,
            MouseButtonState::Released => MotionCommand::PointerUp,
        },

        // A release outside the window never arrives.
        InputEvent::Focused(false) => MotionCommand::PointerUp,

        // Wheel-down reports negative y; the page moves down.
        InputEvent::MouseWheel(delta) => match *delta {
            MouseWheelDelta::Line { y, .. } => MotionCommand::ScrollBy(-y * metrics.line_height),
            MouseWheelDelta::Pixel { y, .. } => MotionCommand::ScrollBy(-y),
        },

        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            ..
        } => match key {
            Key::Escape => return Some(Action::Exit),
            Key::ArrowDown => MotionCommand::ScrollBy(metrics.line_height),
            Key::ArrowUp => MotionCommand::ScrollBy(-metrics.line_height),
            Key::PageDown | Key::Space => MotionCommand::ScrollBy(metrics.page()),
            Key::PageUp => MotionCommand::ScrollBy(-metrics.page()),
            Key::Home => MotionCommand::ScrollTo(0.0),
            Key::End => MotionCommand::ScrollTo(f32::INFINITY),
            _ => return None,
        },

        _ => return None,
    };

    Some(Action::Motion(motion))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollscape_engine::input::{MouseButton, PointerButtonEvent, PointerMoveEvent};

    const METRICS: ScrollMetrics = ScrollMetrics {
        viewport_height: 800.0,
        line_height: 40.0,
    };

    fn press(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            repeat: false,
        }
    }

    fn motion(event: InputEvent) -> MotionCommand {
        match translate(&event, METRICS) {
            Some(Action::Motion(cmd)) => cmd,
            other => panic!("expected a motion command, got {other:?}"),
        }
    }

    #[test]
    fn wheel_lines_scale_by_line_height() {
        let down = InputEvent::MouseWheel(MouseWheelDelta::Line { x: 0.0, y: -3.0 });
        assert_eq!(motion(down), MotionCommand::ScrollBy(120.0));
    }

    #[test]
    fn wheel_pixels_pass_through() {
        let up = InputEvent::MouseWheel(MouseWheelDelta::Pixel { x: 4.0, y: 25.0 });
        assert_eq!(motion(up), MotionCommand::ScrollBy(-25.0));
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(motion(press(Key::ArrowDown)), MotionCommand::ScrollBy(40.0));
        assert_eq!(motion(press(Key::ArrowUp)), MotionCommand::ScrollBy(-40.0));
        assert_eq!(motion(press(Key::PageDown)), MotionCommand::ScrollBy(720.0));
        assert_eq!(motion(press(Key::Space)), MotionCommand::ScrollBy(720.0));
        assert_eq!(motion(press(Key::PageUp)), MotionCommand::ScrollBy(-720.0));
        assert_eq!(motion(press(Key::Home)), MotionCommand::ScrollTo(0.0));
        assert_eq!(motion(press(Key::End)), MotionCommand::ScrollTo(f32::INFINITY));
    }

    #[test]
    fn escape_exits_and_releases_are_ignored() {
        assert_eq!(translate(&press(Key::Escape), METRICS), Some(Action::Exit));

        let release = InputEvent::Key {
            key: Key::PageDown,
            state: KeyState::Released,
            repeat: false,
        };
        assert_eq!(translate(&release, METRICS), None);
        assert_eq!(translate(&press(Key::ArrowLeft), METRICS), None);
    }

    #[test]
    fn pointer_events_map_one_to_one() {
        let moved = InputEvent::PointerMoved(PointerMoveEvent { x: 10.0, y: 20.0 });
        assert_eq!(motion(moved), MotionCommand::PointerMoved { x: 10.0, y: 20.0 });

        let down = InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Right,
            state: MouseButtonState::Pressed,
            x: 0.0,
            y: 0.0,
        });
        assert_eq!(motion(down), MotionCommand::PointerDown);
        assert_eq!(motion(InputEvent::Focused(false)), MotionCommand::PointerUp);
        assert_eq!(translate(&InputEvent::PointerLeft, METRICS), None);
    }

    #[test]
    fn degenerate_viewport_still_pages() {
        let metrics = ScrollMetrics {
            viewport_height: 0.0,
            line_height: 40.0,
        };
        let cmd = translate(&press(Key::PageDown), metrics);
        assert_eq!(cmd, Some(Action::Motion(MotionCommand::ScrollBy(0.9))));
    }
}

//! Touch gesture contract between a platform event loop and widgets

use crate::renderer::Renderer;

/// A single gesture, in display pixels with y growing downwards
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    SingleTouchDown { x: i32, y: i32 },
    SingleTouchUp,
    /// Pointer motion since the previous pan event
    SingleTouchPan { dx: f64, dy: f64 },
    DoubleTap,
}

/// Something that consumes touch gestures
///
/// Every handler returns whether the gesture was consumed, so the caller can
/// fall back to camera interaction when it was not.
pub trait GestureHandler {
    fn handle_single_touch_down(&mut self, renderer: &Renderer, x: i32, y: i32) -> bool;

    fn handle_single_touch_up(&mut self) -> bool;

    fn handle_single_touch_pan_gesture(&mut self, renderer: &Renderer, dx: f64, dy: f64) -> bool;

    fn handle_double_tap(&mut self, renderer: &mut Renderer) -> bool;

    /// Route an event to the matching handler
    fn dispatch(&mut self, renderer: &mut Renderer, event: GestureEvent) -> bool {
        match event {
            GestureEvent::SingleTouchDown { x, y } => self.handle_single_touch_down(renderer, x, y),
            GestureEvent::SingleTouchUp => self.handle_single_touch_up(),
            GestureEvent::SingleTouchPan { dx, dy } => {
                self.handle_single_touch_pan_gesture(renderer, dx, dy)
            }
            GestureEvent::DoubleTap => self.handle_double_tap(renderer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl GestureHandler for Recorder {
        fn handle_single_touch_down(&mut self, _renderer: &Renderer, _x: i32, _y: i32) -> bool {
            self.calls.push("down");
            true
        }

        fn handle_single_touch_up(&mut self) -> bool {
            self.calls.push("up");
            false
        }

        fn handle_single_touch_pan_gesture(
            &mut self,
            _renderer: &Renderer,
            _dx: f64,
            _dy: f64,
        ) -> bool {
            self.calls.push("pan");
            true
        }

        fn handle_double_tap(&mut self, _renderer: &mut Renderer) -> bool {
            self.calls.push("tap");
            true
        }
    }

    #[test]
    fn test_dispatch_routes_each_gesture() {
        let mut renderer = Renderer::default();
        let mut recorder = Recorder::default();
        let events = [
            GestureEvent::SingleTouchDown { x: 1, y: 2 },
            GestureEvent::SingleTouchPan { dx: 0.0, dy: 3.0 },
            GestureEvent::SingleTouchUp,
            GestureEvent::DoubleTap,
        ];
        let handled: Vec<bool> = events
            .iter()
            .map(|e| recorder.dispatch(&mut renderer, *e))
            .collect();

        assert_eq!(recorder.calls, vec!["down", "pan", "up", "tap"]);
        assert_eq!(handled, vec![true, true, false, true]);
    }
}

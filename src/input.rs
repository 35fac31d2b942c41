use egui::{Context, Pos2, Rect};
use log::debug;

/// A touch gesture on the editor canvas, in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Finger down / primary button pressed inside the canvas
    Start(Pos2),
    /// Pointer moved while the gesture is held
    Move(Pos2),
    /// Finger lifted / button released, wherever the pointer ended up
    End,
}

/// The slice of egui pointer state the gesture recognizer needs for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// Screen position of the pointer, if known
    pub pos: Option<Pos2>,
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
}

impl PointerSample {
    /// Read the primary pointer from the egui input of the current frame
    pub fn from_context(ctx: &Context) -> Self {
        ctx.input(|input| Self {
            pos: input.pointer.interact_pos(),
            pressed: input.pointer.primary_pressed(),
            down: input.pointer.primary_down(),
            released: input.pointer.primary_released(),
        })
    }
}

/// Turns per-frame pointer samples into start/move/end gesture events
#[derive(Debug, Clone)]
pub struct InputHandler {
    canvas_rect: Rect,
    active: bool,
    last_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            active: false,
            last_pos: None,
        }
    }

    /// Update the canvas rectangle (e.g. if the window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn to_local(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Process one frame worth of pointer state.
    ///
    /// A gesture only starts on a press inside the canvas. Once started it
    /// follows the pointer anywhere until release, like a touch responder.
    pub fn process(&mut self, sample: PointerSample) -> Vec<GestureEvent> {
        let mut events = Vec::new();

        if !self.active {
            if let Some(pos) = sample.pos.filter(|pos| sample.pressed && self.canvas_rect.contains(*pos)) {
                self.active = true;
                self.last_pos = Some(pos);
                debug!("Gesture start at {:?}", pos);
                events.push(GestureEvent::Start(self.to_local(pos)));
            }
        } else if let Some(pos) = sample.pos {
            if Some(pos) != self.last_pos {
                self.last_pos = Some(pos);
                events.push(GestureEvent::Move(self.to_local(pos)));
            }
        }

        if self.active && (sample.released || !sample.down) {
            self.active = false;
            self.last_pos = None;
            debug!("Gesture end");
            events.push(GestureEvent::End);
        }

        events
    }

    /// Convenience for the UI: sample the context and process it
    pub fn process_context(&mut self, ctx: &Context) -> Vec<GestureEvent> {
        self.process(PointerSample::from_context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn canvas() -> InputHandler {
        InputHandler::new(Rect::from_min_size(pos2(10.0, 20.0), vec2(100.0, 100.0)))
    }

    fn press(x: f32, y: f32) -> PointerSample {
        PointerSample {
            pos: Some(pos2(x, y)),
            pressed: true,
            down: true,
            released: false,
        }
    }

    fn hold(x: f32, y: f32) -> PointerSample {
        PointerSample {
            pos: Some(pos2(x, y)),
            pressed: false,
            down: true,
            released: false,
        }
    }

    fn release(x: f32, y: f32) -> PointerSample {
        PointerSample {
            pos: Some(pos2(x, y)),
            pressed: false,
            down: false,
            released: true,
        }
    }

    #[test]
    fn converts_to_canvas_coordinates() {
        let mut input = canvas();
        assert_eq!(input.process(press(15.0, 25.0)), vec![GestureEvent::Start(pos2(5.0, 5.0))]);
        assert_eq!(input.process(hold(20.0, 30.0)), vec![GestureEvent::Move(pos2(10.0, 10.0))]);
        assert_eq!(input.process(release(20.0, 30.0)), vec![GestureEvent::End]);
        assert!(!input.is_active());
    }

    #[test]
    fn press_outside_canvas_is_ignored() {
        let mut input = canvas();
        assert!(input.process(press(0.0, 0.0)).is_empty());
        assert!(input.process(hold(50.0, 50.0)).is_empty());
        assert!(input.process(release(50.0, 50.0)).is_empty());
    }

    #[test]
    fn gesture_follows_pointer_outside_canvas() {
        let mut input = canvas();
        input.process(press(15.0, 25.0));
        assert_eq!(input.process(hold(500.0, 25.0)), vec![GestureEvent::Move(pos2(490.0, 5.0))]);
    }

    #[test]
    fn stationary_pointer_reports_no_moves() {
        let mut input = canvas();
        input.process(press(15.0, 25.0));
        assert!(input.process(hold(15.0, 25.0)).is_empty());
    }

    #[test]
    fn release_without_position_still_ends_gesture() {
        let mut input = canvas();
        input.process(press(15.0, 25.0));
        let events = input.process(PointerSample::default());
        assert_eq!(events, vec![GestureEvent::End]);
    }
}

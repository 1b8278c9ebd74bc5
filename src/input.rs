use egui::{Context, Event, PointerButton, Pos2, Rect, Response};

/// Pointer input translated into canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed inside the canvas
    Down(Pos2),
    /// Pointer moved inside the canvas (with or without a button held)
    Move(Pos2),
    /// Primary button released
    Up,
    /// Pointer left the canvas
    Leave,
}

/// One pointer event of the frame, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawPointer {
    Moved(Pos2),
    Pressed(Pos2),
    Released,
    /// The pointer left the window
    Gone,
}

impl RawPointer {
    /// Keep pointer motion and primary-button events, drop everything else
    pub fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::PointerMoved(pos) => Some(Self::Moved(*pos)),
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                ..
            } => Some(if *pressed { Self::Pressed(*pos) } else { Self::Released }),
            Event::PointerGone => Some(Self::Gone),
            _ => None,
        }
    }
}

/// Every pointer event of one frame, in arrival order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerFrame {
    pub events: Vec<RawPointer>,
    /// Whether egui's hit-test puts the canvas on top under the pointer.
    /// Presses only start a stroke when it does.
    pub canvas_hovered: bool,
}

impl PointerFrame {
    pub fn from_context(ctx: &Context, canvas_hovered: bool) -> Self {
        ctx.input(|input| Self {
            events: input.events.iter().filter_map(RawPointer::from_event).collect(),
            canvas_hovered,
        })
    }
}

/// Turns raw pointer events into `PointerEvent`s for the canvas
#[derive(Debug)]
pub struct CanvasInput {
    canvas_rect: Rect,
    last_pos: Option<Pos2>,
    inside: bool,
}

impl CanvasInput {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            last_pos: None,
            inside: false,
        }
    }

    /// Update the canvas rectangle (e.g. if the layout moved)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Screen position relative to the canvas' top-left corner
    pub fn to_canvas(&self, screen: Pos2) -> Pos2 {
        (screen - self.canvas_rect.min).to_pos2()
    }

    /// Translate this frame's input for the canvas described by `response`
    pub fn process(&mut self, ctx: &Context, response: &Response) -> Vec<PointerEvent> {
        self.set_canvas_rect(response.rect);
        self.translate(PointerFrame::from_context(ctx, response.hovered()))
    }

    /// One `Move` per distinct position, so fast strokes keep every sample
    pub fn translate(&mut self, frame: PointerFrame) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        for raw in frame.events {
            match raw {
                RawPointer::Moved(pos) => {
                    let inside = self.canvas_rect.contains(pos);
                    if self.inside && !inside {
                        events.push(PointerEvent::Leave);
                    } else if inside && self.last_pos != Some(pos) {
                        events.push(PointerEvent::Move(self.to_canvas(pos)));
                    }
                    self.inside = inside;
                    self.last_pos = Some(pos);
                }
                RawPointer::Pressed(pos) => {
                    let inside = self.canvas_rect.contains(pos);
                    if inside && frame.canvas_hovered {
                        events.push(PointerEvent::Down(self.to_canvas(pos)));
                    }
                    self.inside = inside;
                    self.last_pos = Some(pos);
                }
                RawPointer::Released => events.push(PointerEvent::Up),
                RawPointer::Gone => {
                    if self.inside {
                        events.push(PointerEvent::Leave);
                    }
                    self.inside = false;
                    self.last_pos = None;
                }
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Modifiers, vec2};

    fn input() -> CanvasInput {
        CanvasInput::new(Rect::from_min_size(Pos2::new(100.0, 50.0), vec2(200.0, 100.0)))
    }

    fn hovered(events: Vec<RawPointer>) -> PointerFrame {
        PointerFrame {
            events,
            canvas_hovered: true,
        }
    }

    fn moved(x: f32, y: f32) -> RawPointer {
        RawPointer::Moved(Pos2::new(x, y))
    }

    fn pressed(x: f32, y: f32) -> RawPointer {
        RawPointer::Pressed(Pos2::new(x, y))
    }

    #[test]
    fn test_press_inside_is_canvas_local() {
        let mut input = input();
        let events = input.translate(hovered(vec![pressed(110.0, 60.0)]));
        assert_eq!(events, vec![PointerEvent::Down(Pos2::new(10.0, 10.0))]);
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut input = input();
        assert!(input.translate(hovered(vec![pressed(10.0, 10.0)])).is_empty());
    }

    #[test]
    fn test_press_under_another_layer_is_ignored() {
        let mut input = input();
        let events = input.translate(PointerFrame {
            events: vec![pressed(110.0, 60.0), moved(120.0, 70.0)],
            canvas_hovered: false,
        });
        // Moves still pass through; without a Down they draw nothing
        assert_eq!(events, vec![PointerEvent::Move(Pos2::new(20.0, 20.0))]);
    }

    #[test]
    fn test_every_move_in_a_frame_is_kept() {
        let mut input = input();
        let events = input.translate(hovered(vec![
            pressed(110.0, 60.0),
            moved(120.0, 60.0),
            moved(130.0, 65.0),
            moved(140.0, 70.0),
            RawPointer::Released,
        ]));
        assert_eq!(
            events,
            vec![
                PointerEvent::Down(Pos2::new(10.0, 10.0)),
                PointerEvent::Move(Pos2::new(20.0, 10.0)),
                PointerEvent::Move(Pos2::new(30.0, 15.0)),
                PointerEvent::Move(Pos2::new(40.0, 20.0)),
                PointerEvent::Up,
            ]
        );
    }

    #[test]
    fn test_moves_only_when_position_changes() {
        let mut input = input();
        assert_eq!(
            input.translate(hovered(vec![moved(150.0, 100.0)])),
            vec![PointerEvent::Move(Pos2::new(50.0, 50.0))]
        );
        assert!(input.translate(hovered(vec![moved(150.0, 100.0)])).is_empty());
    }

    #[test]
    fn test_leaving_canvas_emits_leave() {
        let mut input = input();
        input.translate(hovered(vec![moved(150.0, 100.0)]));
        assert_eq!(input.translate(hovered(vec![moved(5.0, 5.0)])), vec![PointerEvent::Leave]);
        assert!(input.translate(hovered(vec![RawPointer::Gone])).is_empty());
    }

    #[test]
    fn test_pointer_gone_inside_canvas_emits_leave() {
        let mut input = input();
        input.translate(hovered(vec![moved(150.0, 100.0)]));
        assert_eq!(input.translate(hovered(vec![RawPointer::Gone])), vec![PointerEvent::Leave]);
    }

    #[test]
    fn test_release_always_reported() {
        let mut input = input();
        let events = input.translate(hovered(vec![moved(5.0, 5.0), RawPointer::Released]));
        assert_eq!(events, vec![PointerEvent::Up]);
    }

    #[test]
    fn test_only_primary_button_events_are_kept() {
        let secondary = Event::PointerButton {
            pos: Pos2::new(1.0, 2.0),
            button: PointerButton::Secondary,
            pressed: true,
            modifiers: Modifiers::NONE,
        };
        let primary = Event::PointerButton {
            pos: Pos2::new(1.0, 2.0),
            button: PointerButton::Primary,
            pressed: false,
            modifiers: Modifiers::NONE,
        };
        assert_eq!(RawPointer::from_event(&secondary), None);
        assert_eq!(RawPointer::from_event(&primary), Some(RawPointer::Released));
        assert_eq!(RawPointer::from_event(&Event::PointerGone), Some(RawPointer::Gone));
    }
}

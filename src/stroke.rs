use egui::{Color32, Pos2};

use crate::surface::Surface;
use crate::tool::ToolState;

/// Path being drawn between pointer-down and pointer-up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenStroke {
    pen: Pos2,
    color: Color32,
    width: f32,
    segments: usize,
}

impl OpenStroke {
    /// Current pen position (end of the last segment)
    pub fn pen(&self) -> Pos2 {
        self.pen
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Number of segments rendered so far
    pub fn segments(&self) -> usize {
        self.segments
    }
}

/// Turns pointer positions into segments drawn straight onto the surface.
///
/// Rendering is immediate: every `extend` paints one segment synchronously.
/// Color and width are fixed when the stroke begins.
#[derive(Debug, Default)]
pub struct StrokeController {
    current: Option<OpenStroke>,
}

impl StrokeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a path at `point` using the tool's effective color and width.
    /// Nothing is drawn until the first `extend`.
    pub fn begin(&mut self, point: Pos2, tool: &ToolState) {
        self.current = Some(OpenStroke {
            pen: point,
            color: tool.effective_color(),
            width: f32::from(tool.stroke_width()),
            segments: 0,
        });
    }

    /// Draw a segment from the pen to `point`. Returns false if no stroke is open.
    pub fn extend(&mut self, point: Pos2, surface: &mut Surface) -> bool {
        let Some(stroke) = &mut self.current else {
            return false;
        };
        surface.stroke_segment(stroke.pen, point, stroke.color, stroke.width);
        stroke.pen = point;
        stroke.segments += 1;
        true
    }

    /// Close the open path, returning it if there was one
    pub fn end(&mut self) -> Option<OpenStroke> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&OpenStroke> {
        self.current.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }
}

use egui::Color32;

use crate::error::{WhiteboardError, WhiteboardResult};
use crate::surface::BACKGROUND;

/// Smallest selectable stroke width, in pixels
pub const MIN_STROKE_WIDTH: u8 = 1;
/// Largest selectable stroke width, in pixels
pub const MAX_STROKE_WIDTH: u8 = 20;

/// Which tool new strokes are drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
}

impl ToolKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pen => "✏ Pen",
            Self::Eraser => "⌫ Eraser",
        }
    }
}

/// User-selected color, width and pen/eraser mode applied to new strokes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    active_color: Color32,
    stroke_width: u8,
    eraser_active: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            active_color: Color32::BLACK,
            stroke_width: 2,
            eraser_active: false,
        }
    }
}

impl ToolState {
    pub fn new(active_color: Color32, stroke_width: u8) -> Self {
        Self {
            active_color: opaque(active_color),
            stroke_width: clamp_width(stroke_width),
            eraser_active: false,
        }
    }

    /// The color picked by the user, kept even while the eraser is active
    pub fn active_color(&self) -> Color32 {
        self.active_color
    }

    pub fn set_active_color(&mut self, color: Color32) {
        self.active_color = opaque(color);
    }

    pub fn stroke_width(&self) -> u8 {
        self.stroke_width
    }

    /// Widths outside `MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH` are clamped
    pub fn set_stroke_width(&mut self, width: u8) {
        self.stroke_width = clamp_width(width);
    }

    pub fn eraser_active(&self) -> bool {
        self.eraser_active
    }

    pub fn set_eraser_active(&mut self, active: bool) {
        self.eraser_active = active;
    }

    pub fn kind(&self) -> ToolKind {
        if self.eraser_active {
            ToolKind::Eraser
        } else {
            ToolKind::Pen
        }
    }

    pub fn select(&mut self, kind: ToolKind) {
        self.eraser_active = kind == ToolKind::Eraser;
    }

    /// Color actually painted: the surface background while erasing
    pub fn effective_color(&self) -> Color32 {
        if self.eraser_active {
            BACKGROUND
        } else {
            self.active_color
        }
    }
}

fn clamp_width(width: u8) -> u8 {
    width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH)
}

fn opaque(color: Color32) -> Color32 {
    let [r, g, b, _] = color.to_srgba_unmultiplied();
    Color32::from_rgb(r, g, b)
}

/// Parse a `#rrggbb` (or `rrggbb`) color string
pub fn parse_hex_color(text: &str) -> WhiteboardResult<Color32> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(WhiteboardError::InvalidColor(text.to_owned()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| WhiteboardError::InvalidColor(text.to_owned()))
    };
    Ok(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Format an opaque color as `#rrggbb`
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tool = ToolState::default();
        assert_eq!(tool.active_color(), Color32::BLACK);
        assert_eq!(tool.stroke_width(), 2);
        assert_eq!(tool.kind(), ToolKind::Pen);
    }

    #[test]
    fn test_eraser_keeps_active_color() {
        let mut tool = ToolState::new(parse_hex_color("#ff0000").unwrap(), 4);

        tool.select(ToolKind::Eraser);
        assert_eq!(tool.effective_color(), BACKGROUND);
        assert_eq!(tool.active_color(), Color32::from_rgb(255, 0, 0));

        tool.select(ToolKind::Pen);
        assert_eq!(tool.effective_color(), Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_width_is_clamped() {
        let mut tool = ToolState::default();
        tool.set_stroke_width(0);
        assert_eq!(tool.stroke_width(), MIN_STROKE_WIDTH);
        tool.set_stroke_width(200);
        assert_eq!(tool.stroke_width(), MAX_STROKE_WIDTH);
        tool.set_stroke_width(7);
        assert_eq!(tool.stroke_width(), 7);
    }

    #[test]
    fn test_translucent_colors_become_opaque() {
        let mut tool = ToolState::default();
        tool.set_active_color(Color32::from_rgba_unmultiplied(10, 20, 30, 40));
        assert_eq!(tool.active_color(), Color32::from_rgb(10, 20, 30));
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(parse_hex_color("#00ff7f").unwrap(), Color32::from_rgb(0, 255, 127));
        assert_eq!(parse_hex_color("ABCDEF").unwrap(), Color32::from_rgb(0xab, 0xcd, 0xef));
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
        assert_eq!(to_hex(Color32::from_rgb(255, 0, 16)), "#ff0010");
    }
}

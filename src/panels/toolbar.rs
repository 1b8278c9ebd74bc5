use egui::color_picker::{self, Alpha};

use crate::WhiteboardApp;
use crate::tool::{MAX_STROKE_WIDTH, MIN_STROKE_WIDTH, ToolKind};

/// Buttons that act on the whole session rather than on tool state
enum ToolbarAction {
    Export,
    Clear,
    Undo,
}

pub fn toolbar(app: &mut WhiteboardApp, ctx: &egui::Context) {
    let mut action = None;

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let Some(board) = app.whiteboard_mut() else {
                ui.label("Loading…");
                return;
            };

            let tool = board.tool_mut();
            let eraser_active = tool.eraser_active();

            // The picker edits the stored pen color; it is disabled, not reset, while erasing
            let mut color = tool.active_color();
            ui.add_enabled_ui(!eraser_active, |ui| {
                if color_picker::color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
                    tool.set_active_color(color);
                }
            });

            let mut width = tool.stroke_width();
            if ui
                .add(egui::Slider::new(&mut width, MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH).text("Width"))
                .changed()
            {
                tool.set_stroke_width(width);
            }

            for kind in [ToolKind::Pen, ToolKind::Eraser] {
                if ui.selectable_label(tool.kind() == kind, kind.label()).clicked() {
                    log::info!("Tool selected from UI: {:?}", kind);
                    tool.select(kind);
                }
            }

            ui.separator();

            if ui.button("⬇ Download").clicked() {
                action = Some(ToolbarAction::Export);
            }
            if ui.button("🗑 Clear").clicked() {
                action = Some(ToolbarAction::Clear);
            }
            if ui.add_enabled(board.can_undo(), egui::Button::new("↩ Undo")).clicked() {
                action = Some(ToolbarAction::Undo);
            }

            ui.separator();
            ui.label(format!("History: {}", board.history().len()));
            if board.restore_pending() {
                ui.spinner();
            }
        });

        if let Some(status) = app.status() {
            ui.small(status);
        }
    });

    match action {
        Some(ToolbarAction::Export) => app.export(),
        Some(ToolbarAction::Clear) => app.clear(),
        Some(ToolbarAction::Undo) => app.undo(),
        None => {}
    }
}

use egui::{Color32, Rect, pos2, vec2};

use crate::WhiteboardApp;

const BORDER_WIDTH: f32 = 10.0;
const BORDER_COLOR: Color32 = Color32::from_gray(0xcc);

pub fn canvas_panel(app: &mut WhiteboardApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(BORDER_COLOR).inner_margin(BORDER_WIDTH))
        .show(ctx, |ui| {
            let board = app.mount(ui.available_size());
            let [width, height] = board.surface().size();

            let (response, painter) = ui.allocate_painter(vec2(width as f32, height as f32), egui::Sense::drag());
            if response.hovered() {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }

            // Input before upload so this frame shows the newest segments
            app.route_input(ctx, &response);

            if let Some(texture) = app.sync_texture(ctx) {
                painter.image(
                    texture.id(),
                    response.rect,
                    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
        });
}

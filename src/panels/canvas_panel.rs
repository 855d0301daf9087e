use crate::OverlayApp;

pub fn canvas_panel(app: &mut OverlayApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let canvas_rect = response.rect;

            app.resize_surface(canvas_rect);

            // Handle input
            if app.session().accepts_input() {
                let events = app.collect_input(ctx);
                app.handle_raw_input(&events, canvas_rect, response.hovered());

                if response.hovered() {
                    ctx.set_cursor_icon(app.toolbar().current_tool().cursor_icon());
                }
            }

            // Render the surface
            let texture_id = app.surface_texture(ctx);
            painter.image(
                texture_id,
                canvas_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        });
}

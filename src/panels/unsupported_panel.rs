use crate::host::UNSUPPORTED_HOST_MESSAGE;

/// Static notice shown for the whole session when no supported host was found
pub fn unsupported_panel(ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                egui::Frame::none()
                    .fill(egui::Color32::from_black_alpha(204))
                    .rounding(10.0)
                    .inner_margin(20.0)
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(UNSUPPORTED_HOST_MESSAGE)
                                .size(16.0)
                                .color(egui::Color32::WHITE),
                        );
                    });
            });
        });
}

use eframe::egui;

/// Round palette button
pub struct ColorSwatch {
    pub color: egui::Color32,
    pub selected: bool,
}

impl ColorSwatch {
    pub fn new(color: egui::Color32, selected: bool) -> Self {
        Self { color, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(22.0, 22.0), egui::Sense::click());

        if ui.is_rect_visible(rect) {
            // Draw the color dot
            let radius = rect.width() / 2.0 - 2.0;
            ui.painter().circle_filled(rect.center(), radius, self.color);

            // Ring shows selection and hover
            let ring = if self.selected {
                egui::Stroke::new(2.5, egui::Color32::from_rgb(33, 150, 243))
            } else if response.hovered() {
                egui::Stroke::new(1.5, egui::Color32::from_gray(160))
            } else {
                egui::Stroke::new(1.0, egui::Color32::from_gray(80))
            };
            ui.painter().circle_stroke(rect.center(), radius, ring);
        }

        response
    }
}

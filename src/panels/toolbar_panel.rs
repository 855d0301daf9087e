use crate::OverlayApp;
use crate::components::{ColorSwatch, ToolButton};
use crate::tools::Tool;
use egui::Slider;

pub fn toolbar_panel(app: &mut OverlayApp, ctx: &egui::Context) {
    let panel = egui::TopBottomPanel::top("toolbar_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            // Tool buttons
            for tool in Tool::ALL {
                let is_selected = app.toolbar().current_tool() == tool;
                if ToolButton::new(tool, is_selected).show(ui).clicked() {
                    log::info!("Tool selected from UI: {}", tool.name());
                    app.toolbar_mut().select_tool(tool);
                }
            }
            ui.separator();

            // Palette swatches
            let palette = app.toolbar().palette().to_vec();
            let active_swatch = app.toolbar().active_swatch();
            for (index, color) in palette.into_iter().enumerate() {
                if ColorSwatch::new(color, active_swatch == Some(index)).show(ui).clicked() {
                    app.toolbar_mut().select_color(color);
                }
            }
            ui.separator();

            ui.button("⋯").on_hover_text("More")
        })
        .inner
    });

    let more_button = panel.inner;
    if more_button.clicked() {
        app.toolbar_mut().toggle_more_menu();
    }

    // More menu with custom color sliders
    let mut menu_rect = None;
    if app.toolbar().is_more_menu_open() {
        let menu = egui::Window::new("More")
            .collapsible(false)
            .resizable(false)
            .title_bar(false)
            .fixed_pos(more_button.rect.left_bottom() + egui::vec2(0.0, 6.0))
            .show(ctx, |ui| more_menu(app, ui));
        menu_rect = menu.map(|menu| menu.response.rect);
    }

    // Clicking anywhere outside the menu (and its button) closes it
    if ctx.input(|i| i.pointer.any_click()) {
        let pointer = ctx.input(|i| i.pointer.interact_pos());
        let inside = pointer.is_some_and(|pos| {
            more_button.rect.contains(pos) || menu_rect.is_some_and(|rect| rect.contains(pos))
        });
        app.toolbar_mut().handle_click(inside);
    }
}

fn more_menu(app: &mut OverlayApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.strong("Custom color");
        if ui.small_button("✖").clicked() {
            app.toolbar_mut().close_more_menu();
        }
    });

    // RGB sliders
    let [mut r, mut g, mut b] = app.toolbar().rgb();
    let mut changed = false;
    changed |= ui.add(Slider::new(&mut r, 0..=255).text("R")).changed();
    changed |= ui.add(Slider::new(&mut g, 0..=255).text("G")).changed();
    changed |= ui.add(Slider::new(&mut b, 0..=255).text("B")).changed();
    if changed {
        app.toolbar_mut().set_rgb(r, g, b);
    }

    // Preview box and hex value
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(40.0, 20.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 4.0, app.toolbar().preview_color());
        ui.monospace(app.toolbar().current_color_hex());
    });

    ui.separator();
    if ui.button("Clear canvas").clicked() {
        app.clear_surface();
    }
}

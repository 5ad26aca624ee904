//! Bordered content card

use crate::dashboard::theme::Palette;

/// Full-width card used across the dashboards
pub fn card(ui: &mut egui::Ui, palette: &Palette, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(palette.bg_card)
        .stroke(egui::Stroke::new(1.0, palette.border))
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        });
    ui.add_space(12.0);
}

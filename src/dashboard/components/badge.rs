//! Small status pills and progress rows

use egui::{Color32, RichText, Rounding};

use crate::dashboard::theme::{color_with_alpha, Palette};

/// A rounded pill tinted with `color`
pub fn badge(ui: &mut egui::Ui, text: &str, color: Color32) -> egui::Response {
    egui::Frame::none()
        .fill(color_with_alpha(color, 38))
        .stroke(egui::Stroke::new(1.0, color_with_alpha(color, 120)))
        .rounding(Rounding::same(10.0))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(RichText::new(text).size(12.0).color(color).strong());
        })
        .response
}

/// Label, right-aligned percentage and a bar underneath
pub fn progress_row(ui: &mut egui::Ui, palette: &Palette, label: &str, percent: f32) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).color(palette.text_secondary));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(format!("{:.1}%", percent)).color(palette.text_primary).strong());
        });
    });
    ui.add(egui::ProgressBar::new((percent / 100.0).clamp(0.0, 1.0)).desired_height(8.0));
    ui.add_space(6.0);
}

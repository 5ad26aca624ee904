//! Horizontal tab strip

use egui::RichText;

use crate::dashboard::theme::{Palette, ThemeColors};

/// Render `tabs` as selectable labels, updating `current` on click
pub fn render_tab_bar<T: Copy + PartialEq>(
    ui: &mut egui::Ui,
    palette: &Palette,
    tabs: &[T],
    current: &mut T,
    name: impl Fn(&T) -> &'static str,
) {
    egui::Frame::none()
        .fill(palette.bg_raised)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(4.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                for tab in tabs {
                    let selected = *current == *tab;
                    let text = if selected {
                        RichText::new(name(tab)).color(ThemeColors::ACCENT_PRIMARY).strong()
                    } else {
                        RichText::new(name(tab)).color(palette.text_secondary)
                    };
                    if ui.selectable_label(selected, text).clicked() {
                        *current = *tab;
                    }
                }
            });
        });
    ui.add_space(16.0);
}

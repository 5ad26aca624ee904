//! Dashboard header with back navigation and the theme toggle

use egui::RichText;

use crate::dashboard::state::ViewContext;
use crate::shared::UiCommand;

/// Button that asks the root to flip the theme
pub fn theme_toggle_button(ui: &mut egui::Ui, ctx: &mut ViewContext) {
    let icon = ctx.theme().toggle_icon();
    let hint = if ctx.theme().is_dark() {
        "Switch to light mode"
    } else {
        "Switch to dark mode"
    };
    if ui
        .add(egui::Button::new(RichText::new(icon).size(16.0)).min_size(egui::vec2(36.0, 32.0)))
        .on_hover_text(hint)
        .clicked()
    {
        ctx.send(UiCommand::ToggleTheme);
    }
}

/// Title row shared by every dashboard. `extra` renders right-aligned
/// before the theme toggle.
pub fn render_header(
    ui: &mut egui::Ui,
    ctx: &mut ViewContext,
    title: &str,
    subtitle: &str,
    extra: impl FnOnce(&mut egui::Ui),
) {
    let palette = ctx.palette();
    ui.horizontal(|ui| {
        if ui.button("← Back").clicked() {
            ctx.send(UiCommand::GoHome);
        }
        ui.add_space(12.0);
        ui.vertical(|ui| {
            ui.heading(RichText::new(title).size(26.0).strong().color(palette.text_primary));
            ui.label(RichText::new(subtitle).size(14.0).color(palette.text_secondary));
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            theme_toggle_button(ui, ctx);
            ui.add_space(8.0);
            extra(ui);
        });
    });
    ui.add_space(20.0);
}

//! Home view - product overview and dashboard launcher

use egui::{Color32, RichText};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::dashboard::components::{badge, card, theme_toggle_button};
use crate::dashboard::state::{AppView, ViewContext};
use crate::dashboard::theme::{Palette, ThemeColors};
use crate::shared::{SharedAppState, UiCommand};

/// Launcher button color per dashboard
fn dashboard_color(view: AppView) -> Color32 {
    match view {
        AppView::Student => ThemeColors::ACCENT_PRIMARY,
        AppView::Teacher => ThemeColors::ACCENT_SUCCESS,
        AppView::Admin => ThemeColors::ACCENT_SECONDARY,
        AppView::Attendance | AppView::Home => ThemeColors::ACCENT_ORANGE,
    }
}

/// Render the home view
pub fn render_home_view(
    ui: &mut egui::Ui,
    shared_state: &Arc<RwLock<SharedAppState>>,
    ctx: &mut ViewContext,
) {
    let palette = ctx.palette();
    let app_state = shared_state.read();
    let home = &app_state.data.home;

    ui.horizontal(|ui| {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            theme_toggle_button(ui, ctx);
        });
    });

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("SmartCurriculum")
                    .size(36.0)
                    .strong()
                    .color(palette.text_primary),
            );
            ui.add_space(8.0);
            ui.label(
                RichText::new("Intelligent Attendance & Activity Management System for Modern Education")
                    .size(17.0)
                    .color(palette.text_secondary),
            );
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                // Center the badge row
                let width = 330.0;
                ui.add_space(((ui.available_width() - width) / 2.0).max(0.0));
                badge(ui, "NEP 2020 Aligned", ThemeColors::ACCENT_SUCCESS);
                badge(ui, "AI-Powered", ThemeColors::ACCENT_PRIMARY);
                badge(ui, "Lightweight", ThemeColors::ACCENT_SECONDARY);
            });
        });

        ui.add_space(32.0);
        section_heading(ui, palette, "Key Features");
        ui.columns(home.features.len().max(1), |columns| {
            for (column, feature) in columns.iter_mut().zip(&home.features) {
                card(column, palette, |ui| {
                    ui.label(RichText::new(&feature.title).strong().color(palette.text_primary));
                    ui.add_space(6.0);
                    ui.label(RichText::new(&feature.description).size(13.0).color(palette.text_secondary));
                });
            }
        });

        ui.add_space(32.0);
        section_heading(ui, palette, "Access Your Dashboard");
        ui.columns(AppView::DASHBOARDS.len(), |columns| {
            for (column, view) in columns.iter_mut().zip(AppView::DASHBOARDS) {
                let button = egui::Button::new(
                    RichText::new(format!("{}\n{}", view.icon(), view.name()))
                        .size(16.0)
                        .color(Color32::WHITE),
                )
                .fill(dashboard_color(view))
                .min_size(egui::vec2(column.available_width(), 80.0));
                if column.add(button).clicked() {
                    ctx.send(UiCommand::Open(view));
                }
            }
        });

        ui.add_space(32.0);
        section_heading(ui, palette, "Beneficiaries & Impact");
        ui.columns(2, |columns| {
            for (index, stakeholder) in home.stakeholders.iter().enumerate() {
                card(&mut columns[index % 2], palette, |ui| {
                    ui.label(
                        RichText::new(&stakeholder.role)
                            .size(17.0)
                            .strong()
                            .color(ThemeColors::ACCENT_PRIMARY),
                    );
                    ui.add_space(4.0);
                    ui.label(RichText::new(&stakeholder.description).color(palette.text_secondary));
                    ui.add_space(6.0);
                    for benefit in &stakeholder.benefits {
                        ui.label(
                            RichText::new(format!("• {}", benefit))
                                .size(13.0)
                                .color(palette.text_primary),
                        );
                    }
                });
            }
        });
        ui.add_space(24.0);
    });
}

fn section_heading(ui: &mut egui::Ui, palette: &Palette, text: &str) {
    ui.vertical_centered(|ui| {
        ui.heading(RichText::new(text).size(22.0).strong().color(palette.text_primary));
    });
    ui.add_space(16.0);
}

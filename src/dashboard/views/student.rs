//! Student view - timetable, recommendations, progress and achievements

use egui::RichText;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::dashboard::components::{badge, card, progress_row, render_header, render_tab_bar};
use crate::dashboard::filter::{filter_records, CategoryFilter};
use crate::dashboard::state::{StudentTab, StudentViewState, ViewContext};
use crate::dashboard::theme::{Palette, ThemeColors};
use crate::data::{SlotStatus, StudentData};
use crate::shared::SharedAppState;

fn slot_color(status: SlotStatus) -> egui::Color32 {
    match status {
        SlotStatus::Present => ThemeColors::ACCENT_SUCCESS,
        SlotStatus::Free => ThemeColors::ACCENT_PRIMARY,
        SlotStatus::Upcoming => ThemeColors::ACCENT_ORANGE,
    }
}

fn difficulty_color(difficulty: &str, palette: &Palette) -> egui::Color32 {
    match difficulty {
        "Easy" => ThemeColors::ACCENT_SUCCESS,
        "Medium" => ThemeColors::ACCENT_WARNING,
        "Intermediate" => ThemeColors::ACCENT_ORANGE,
        _ => palette.text_muted,
    }
}

/// Render the student view
pub fn render_student_view(
    ui: &mut egui::Ui,
    view_state: &mut StudentViewState,
    shared_state: &Arc<RwLock<SharedAppState>>,
    ctx: &mut ViewContext,
) {
    let palette = ctx.palette();
    let app_state = shared_state.read();
    let student = &app_state.data.student;

    render_header(
        ui,
        ctx,
        "Student Dashboard",
        &format!("Welcome back, {}!", student.profile.name),
        |_| {},
    );

    render_profile_card(ui, palette, student);

    render_tab_bar(ui, palette, &StudentTab::ALL, &mut view_state.tab, StudentTab::name);

    egui::ScrollArea::vertical().show(ui, |ui| match view_state.tab {
        StudentTab::Schedule => render_schedule(ui, palette, student),
        StudentTab::Recommendations => render_recommendations(ui, palette, view_state, student),
        StudentTab::Progress => render_progress(ui, palette, student),
        StudentTab::Achievements => render_achievements(ui, palette, student),
    });
}

fn render_profile_card(ui: &mut egui::Ui, palette: &Palette, student: &StudentData) {
    let profile = &student.profile;
    card(ui, palette, |ui| {
        ui.columns(3, |columns| {
            columns[0].label(RichText::new("Profile Information").strong().color(palette.text_primary));
            columns[0].label(
                RichText::new(format!("Student ID: {}", profile.student_id)).color(palette.text_secondary),
            );
            columns[0].label(RichText::new(&profile.course).color(palette.text_secondary));
            columns[0].label(RichText::new(&profile.semester).color(palette.text_secondary));

            columns[1].label(RichText::new("Attendance").strong().color(palette.text_primary));
            columns[1].label(
                RichText::new(format!("{}%", profile.attendance_percentage))
                    .size(24.0)
                    .strong()
                    .color(ThemeColors::ACCENT_SUCCESS),
            );
            columns[1].add(
                egui::ProgressBar::new(profile.attendance_percentage as f32 / 100.0).desired_height(8.0),
            );

            columns[2].label(RichText::new("Career Goal").strong().color(palette.text_primary));
            columns[2].label(RichText::new(&profile.career_goal).strong().color(palette.text_primary));
            columns[2].horizontal_wrapped(|ui| {
                for interest in &profile.interests {
                    badge(ui, interest, palette.text_muted);
                }
            });
        });
    });
}

fn render_schedule(ui: &mut egui::Ui, palette: &Palette, student: &StudentData) {
    card(ui, palette, |ui| {
        ui.label(RichText::new("Today's Schedule").size(18.0).strong().color(palette.text_primary));
        ui.add_space(12.0);
        for slot in &student.schedule {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&slot.time).monospace().color(palette.text_secondary));
                ui.add_space(12.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new(&slot.subject).strong().color(palette.text_primary));
                    if let Some(room) = &slot.room {
                        ui.label(RichText::new(format!("Room {}", room)).size(12.0).color(palette.text_muted));
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    badge(ui, slot.status.name(), slot_color(slot.status));
                });
            });
            ui.separator();
        }
    });
}

fn render_recommendations(
    ui: &mut egui::Ui,
    palette: &Palette,
    view_state: &mut StudentViewState,
    student: &StudentData,
) {
    card(ui, palette, |ui| {
        ui.label(
            RichText::new("Personalized Activity Recommendations")
                .size(18.0)
                .strong()
                .color(palette.text_primary),
        );
        ui.label(
            RichText::new(format!(
                "Based on your career goal ({}) and current free periods",
                student.profile.career_goal
            ))
            .color(palette.text_secondary),
        );
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            ui.label("Search:");
            ui.add(
                egui::TextEdit::singleline(&mut view_state.search_query)
                    .hint_text("Type to filter...")
                    .desired_width(200.0),
            );
            ui.add_space(12.0);
            ui.label("Category:");
            egui::ComboBox::from_id_salt("student_category")
                .selected_text(view_state.category.label("All Categories").to_string())
                .show_ui(ui, |ui| {
                    if ui.selectable_label(view_state.category.is_all(), "All Categories").clicked() {
                        view_state.category = CategoryFilter::All;
                    }
                    for category in student.activity_categories() {
                        let selected = view_state.category == CategoryFilter::only(category);
                        if ui.selectable_label(selected, category).clicked() {
                            view_state.category = CategoryFilter::only(category);
                        }
                    }
                });
        });
        ui.add_space(12.0);

        let activities =
            filter_records(&student.activities, &view_state.search_query, &view_state.category);
        if activities.is_empty() {
            ui.label(RichText::new("No activities match").color(palette.text_muted));
        }

        for activity in activities {
            let selected = view_state.selected_activity.as_deref() == Some(activity.id.as_str());
            let stroke_color = if selected {
                ThemeColors::ACCENT_PRIMARY
            } else {
                palette.border
            };
            let response = egui::Frame::none()
                .fill(palette.bg_raised)
                .stroke(egui::Stroke::new(1.0, stroke_color))
                .rounding(egui::Rounding::same(6.0))
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&activity.title).strong().color(palette.text_primary));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            badge(
                                ui,
                                &format!("{}% match", activity.relevance_score),
                                ThemeColors::ACCENT_SUCCESS,
                            );
                        });
                    });
                    ui.label(RichText::new(&activity.description).color(palette.text_secondary));
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&activity.duration).size(12.0).color(palette.text_muted));
                        ui.label(RichText::new(&activity.category).size(12.0).color(palette.text_muted));
                        ui.label(
                            RichText::new(&activity.difficulty)
                                .size(12.0)
                                .color(difficulty_color(&activity.difficulty, palette)),
                        );
                    });

                    if selected {
                        ui.add_space(8.0);
                        ui.horizontal(|ui| {
                            let _ = ui.button("Start Activity");
                            let _ = ui.button("Save for Later");
                        });
                    }
                })
                .response;

            if response.interact(egui::Sense::click()).clicked() {
                view_state.selected_activity = if selected {
                    None
                } else {
                    Some(activity.id.clone())
                };
            }
            ui.add_space(8.0);
        }
    });
}

fn render_progress(ui: &mut egui::Ui, palette: &Palette, student: &StudentData) {
    card(ui, palette, |ui| {
        ui.label(RichText::new("Progress Overview").size(18.0).strong().color(palette.text_primary));
        ui.add_space(12.0);
        for metric in &student.progress {
            progress_row(ui, palette, &metric.label, metric.value as f32);
        }
    });
}

fn render_achievements(ui: &mut egui::Ui, palette: &Palette, student: &StudentData) {
    ui.columns(student.achievements.len().max(1), |columns| {
        for (column, achievement) in columns.iter_mut().zip(&student.achievements) {
            card(column, palette, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("★").size(28.0).color(ThemeColors::ACCENT_WARNING));
                    ui.label(RichText::new(&achievement.title).strong().color(palette.text_primary));
                    ui.label(
                        RichText::new(&achievement.description)
                            .size(13.0)
                            .color(palette.text_secondary),
                    );
                });
            });
        }
    });
}

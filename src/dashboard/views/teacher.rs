//! Teacher view - classes, attendance roster, assigned activities and analytics

use egui::RichText;
use egui_extras::{Column, TableBuilder};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::dashboard::components::status_card::CardStatus;
use crate::dashboard::components::{badge, card, progress_row, render_header, render_tab_bar, StatusCard};
use crate::dashboard::filter::{filter_records, CategoryFilter};
use crate::dashboard::state::{AttendanceViewState, TeacherTab, TeacherViewState, ViewContext};
use crate::dashboard::theme::{Palette, ThemeColors};
use crate::data::{percentage, AttendanceStatus, ClassStatus, TeacherData};
use crate::shared::SharedAppState;

pub(super) fn status_color(status: AttendanceStatus) -> egui::Color32 {
    match status {
        AttendanceStatus::Present => ThemeColors::ACCENT_SUCCESS,
        AttendanceStatus::Absent => ThemeColors::ACCENT_ERROR,
        AttendanceStatus::Late => ThemeColors::ACCENT_WARNING,
    }
}

fn class_color(status: ClassStatus) -> egui::Color32 {
    match status {
        ClassStatus::Completed => ThemeColors::ACCENT_SUCCESS,
        ClassStatus::Ongoing => ThemeColors::ACCENT_PRIMARY,
        ClassStatus::Upcoming => ThemeColors::STATUS_STOPPED,
    }
}

/// Render the teacher view
pub fn render_teacher_view(
    ui: &mut egui::Ui,
    view_state: &mut TeacherViewState,
    shared_state: &Arc<RwLock<SharedAppState>>,
    ctx: &mut ViewContext,
) {
    let palette = ctx.palette();
    let app_state = shared_state.read();
    let teacher = &app_state.data.teacher;

    render_header(
        ui,
        ctx,
        "Teacher Dashboard",
        &format!("Welcome, {} | {}", teacher.profile.name, teacher.profile.department),
        |_| {},
    );

    render_summary(ui, palette, teacher);

    render_tab_bar(ui, palette, &TeacherTab::ALL, &mut view_state.tab, TeacherTab::name);

    egui::ScrollArea::vertical().show(ui, |ui| match view_state.tab {
        TeacherTab::Classes => render_classes(ui, palette, teacher),
        TeacherTab::Attendance => render_attendance(ui, palette, view_state, teacher),
        TeacherTab::Activities => render_activities(ui, palette, teacher),
        TeacherTab::Analytics => render_analytics(ui, palette, teacher),
    });
}

fn render_summary(ui: &mut egui::Ui, palette: &Palette, teacher: &TeacherData) {
    let total: u32 = teacher.classes.iter().map(|c| c.total_students).sum();
    let present: u32 = teacher.classes.iter().map(|c| c.present_students).sum();
    let rate = percentage(present, total);

    ui.horizontal_wrapped(|ui| {
        StatusCard::new("Classes Today", teacher.classes.len().to_string(), CardStatus::Active)
            .show(ui, palette);
        StatusCard::new("Students Tracked", total.to_string(), CardStatus::Active)
            .show(ui, palette);
        StatusCard::new(
            "Attendance Rate",
            format!("{}%", rate),
            CardStatus::from_rate(rate as f32, 85.0, 75.0),
        )
        .with_caption(format!("{} of {} present", present, total))
        .show(ui, palette);
        StatusCard::new("Activities", teacher.activities.len().to_string(), CardStatus::Active)
            .show(ui, palette);
    });
    ui.add_space(16.0);
}

fn render_classes(ui: &mut egui::Ui, palette: &Palette, teacher: &TeacherData) {
    for class in &teacher.classes {
        card(ui, palette, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(format!("{} - {}", class.code, class.subject))
                            .size(17.0)
                            .strong()
                            .color(palette.text_primary),
                    );
                    ui.label(
                        RichText::new(format!(
                            "{} | Section {} | Room {}",
                            class.time, class.section, class.room
                        ))
                        .color(palette.text_secondary),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    badge(ui, class.status.name(), class_color(class.status));
                });
            });
            ui.add_space(8.0);
            ui.label(
                RichText::new(format!(
                    "{}/{} present",
                    class.present_students, class.total_students
                ))
                .color(palette.text_muted),
            );
            progress_row(ui, palette, "Attendance", class.attendance_rate() as f32);
        });
    }
}

fn render_attendance(
    ui: &mut egui::Ui,
    palette: &Palette,
    view_state: &mut TeacherViewState,
    teacher: &TeacherData,
) {
    card(ui, palette, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Class Attendance").size(18.0).strong().color(palette.text_primary));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                egui::ComboBox::from_id_salt("teacher_class")
                    .selected_text(view_state.selected_class.clone())
                    .show_ui(ui, |ui| {
                        for class in &teacher.classes {
                            let label = class.label();
                            let selected = view_state.selected_class == label;
                            if ui.selectable_label(selected, label.as_str()).clicked() {
                                view_state.selected_class = label;
                            }
                        }
                    });
            });
        });
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            ui.label("Search:");
            ui.add(
                egui::TextEdit::singleline(&mut view_state.search_query)
                    .hint_text("Name or ID...")
                    .desired_width(200.0),
            );
            ui.add_space(12.0);
            ui.label("Status:");
            egui::ComboBox::from_id_salt("teacher_status")
                .selected_text(view_state.status.label("All Statuses").to_string())
                .show_ui(ui, |ui| {
                    if ui.selectable_label(view_state.status.is_all(), "All Statuses").clicked() {
                        view_state.status = CategoryFilter::All;
                    }
                    for status in AttendanceViewState::status_options() {
                        let selected = view_state.status == CategoryFilter::only(status);
                        if ui.selectable_label(selected, status).clicked() {
                            view_state.status = CategoryFilter::only(status);
                        }
                    }
                });
        });
        ui.add_space(12.0);

        let students = filter_records(&teacher.roster, &view_state.search_query, &view_state.status);
        if students.is_empty() {
            ui.label(RichText::new("No students match").color(palette.text_muted));
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::exact(110.0))
            .column(Column::remainder().at_least(160.0))
            .column(Column::exact(90.0))
            .column(Column::exact(90.0))
            .header(22.0, |mut header| {
                for title in ["Student ID", "Name", "Status", "Time"] {
                    header.col(|ui| {
                        ui.label(RichText::new(title).strong().color(palette.text_secondary));
                    });
                }
            })
            .body(|mut body| {
                for student in students {
                    body.row(26.0, |mut row| {
                        row.col(|ui| {
                            ui.label(RichText::new(&student.id).monospace().color(palette.text_primary));
                        });
                        row.col(|ui| {
                            ui.label(RichText::new(&student.name).color(palette.text_primary));
                        });
                        row.col(|ui| {
                            badge(ui, student.status.name(), status_color(student.status));
                        });
                        row.col(|ui| {
                            ui.label(
                                RichText::new(student.time.as_deref().unwrap_or("-"))
                                    .color(palette.text_muted),
                            );
                        });
                    });
                }
            });
    });
}

fn render_activities(ui: &mut egui::Ui, palette: &Palette, teacher: &TeacherData) {
    for activity in &teacher.activities {
        card(ui, palette, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&activity.title).size(16.0).strong().color(palette.text_primary));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    badge(ui, &activity.category, ThemeColors::ACCENT_SECONDARY);
                });
            });
            ui.label(RichText::new(&activity.description).color(palette.text_secondary));
            ui.add_space(6.0);
            ui.label(
                RichText::new(format!(
                    "{} of {} students completed",
                    activity.completed, activity.assigned_to
                ))
                .size(13.0)
                .color(palette.text_muted),
            );
            progress_row(ui, palette, "Completion", activity.completion_rate() as f32);
        });
    }
}

fn render_analytics(ui: &mut egui::Ui, palette: &Palette, teacher: &TeacherData) {
    ui.columns(2, |columns| {
        card(&mut columns[0], palette, |ui| {
            ui.label(RichText::new("Attendance by Class").size(17.0).strong().color(palette.text_primary));
            ui.add_space(10.0);
            for class in &teacher.classes {
                progress_row(ui, palette, &class.label(), class.attendance_rate() as f32);
            }
        });

        card(&mut columns[1], palette, |ui| {
            ui.label(RichText::new("Roster Breakdown").size(17.0).strong().color(palette.text_primary));
            ui.add_space(10.0);
            let total = teacher.roster.len() as u32;
            for status in AttendanceStatus::ALL {
                let count = teacher.roster.iter().filter(|s| s.status == status).count() as u32;
                ui.horizontal(|ui| {
                    badge(ui, status.name(), status_color(status));
                    ui.label(
                        RichText::new(format!("{} students", count)).color(palette.text_secondary),
                    );
                });
                ui.add(
                    egui::ProgressBar::new(percentage(count, total) as f32 / 100.0)
                        .desired_height(6.0),
                );
                ui.add_space(6.0);
            }
        });
    });
}

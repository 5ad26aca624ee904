//! Attendance view - live session control, check-in methods, roster and devices

use egui::RichText;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{error, info, trace};

use crate::attendance::{format_elapsed, AttendanceSession, CheckIn, CheckInMethod};
use crate::config::SessionConfig;
use crate::dashboard::components::status_card::CardStatus;
use crate::dashboard::components::{badge, card, progress_row, render_header, render_tab_bar, StatusCard};
use crate::dashboard::filter::{filter_records, CategoryFilter};
use crate::dashboard::state::{AttendanceTab, AttendanceViewState, ViewContext};
use crate::dashboard::theme::{Palette, ThemeColors};
use crate::data::{percentage, AttendanceData, DeviceStatus, LiveRosterEntry};
use crate::shared::SharedAppState;
use crate::storage;

use super::teacher::status_color;

fn device_color(status: DeviceStatus) -> egui::Color32 {
    match status {
        DeviceStatus::Active => ThemeColors::ACCENT_SUCCESS,
        DeviceStatus::Standby => ThemeColors::ACCENT_WARNING,
        DeviceStatus::Inactive => ThemeColors::STATUS_STOPPED,
    }
}

/// Render the attendance view
pub fn render_attendance_view(
    ui: &mut egui::Ui,
    view_state: &mut AttendanceViewState,
    shared_state: &Arc<RwLock<SharedAppState>>,
    ctx: &mut ViewContext,
) {
    if view_state.session.timer_due() {
        trace!("Session timer signalled");
    }
    let fired = view_state.session.poll_timer();
    if fired > 0 {
        trace!(
            "Session timer fired {} time(s) every {:?}",
            fired,
            view_state.session.cadence()
        );
    }
    if let Some(wait) = view_state.session.until_next_tick() {
        ui.ctx().request_repaint_after(wait);
    }

    let palette = ctx.palette();
    let mut export_requested = false;

    {
        let app_state = shared_state.read();
        let attendance = &app_state.data.attendance;
        let session_config = &app_state.config.session;
        let last_export = app_state.runtime.last_export_name();
        let active = view_state.session.is_active();

        render_header(
            ui,
            ctx,
            "Smart Attendance System",
            "Automated attendance tracking with QR, proximity and face recognition",
            |ui| {
                let (text, color) = if active {
                    ("Session Active", ThemeColors::ACCENT_SUCCESS)
                } else {
                    ("Session Inactive", ThemeColors::STATUS_STOPPED)
                };
                badge(ui, text, color);
            },
        );

        render_session_card(
            ui,
            palette,
            view_state,
            session_config,
            last_export.as_deref(),
            &mut export_requested,
        );

        render_tab_bar(
            ui,
            palette,
            &AttendanceTab::ALL,
            &mut view_state.tab,
            AttendanceTab::name,
        );

        egui::ScrollArea::vertical().show(ui, |ui| match view_state.tab {
            AttendanceTab::Methods => render_methods(ui, palette, view_state, attendance),
            AttendanceTab::Live => render_live(ui, palette, view_state, attendance),
            AttendanceTab::Devices => render_devices(ui, palette, attendance),
            AttendanceTab::Analytics => render_analytics(ui, palette, attendance),
        });
    }

    if export_requested {
        export_snapshot(view_state, shared_state);
    }
}

fn render_session_card(
    ui: &mut egui::Ui,
    palette: &Palette,
    view_state: &mut AttendanceViewState,
    config: &SessionConfig,
    last_export: Option<&str>,
    export_requested: &mut bool,
) {
    let active = view_state.session.is_active();
    card(ui, palette, |ui| {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(
                    RichText::new(format!("{} - {}", view_state.session.subject(), config.section))
                        .size(18.0)
                        .strong()
                        .color(palette.text_primary),
                );
                ui.label(
                    RichText::new(format!(
                        "Room {} | {} | {} - {}",
                        config.room, config.teacher, config.start_time, config.end_time
                    ))
                    .color(palette.text_secondary),
                );
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if active {
                    if ui.button("End Session").clicked() {
                        if let Some(summary) = view_state.session.end_session() {
                            view_state.notice = Some(format!(
                                "Session ended after {} with {} check-ins",
                                summary.elapsed_display,
                                summary.check_ins.len()
                            ));
                        }
                    }
                    if ui.button("Export Data").clicked() {
                        *export_requested = true;
                    }
                } else if ui.button("Start Session").clicked() {
                    view_state.notice = match view_state.session.start_session() {
                        Ok(token) => Some(format!("Session started with token {}", token)),
                        Err(e) => Some(e.to_string()),
                    };
                }

                ui.add_space(16.0);
                ui.label(
                    RichText::new(format_elapsed(view_state.session.elapsed_seconds()))
                        .size(28.0)
                        .monospace()
                        .strong()
                        .color(if active {
                            ThemeColors::ACCENT_SUCCESS
                        } else {
                            palette.text_muted
                        }),
                );
            });
        });

        ui.add_space(10.0);
        // Live check-ins come on top of the configured baseline
        let present = (config.checked_in + view_state.session.check_ins().len() as u32)
            .min(config.expected_students);
        ui.label(
            RichText::new(format!(
                "{} of {} students checked in",
                present, config.expected_students
            ))
            .color(palette.text_secondary),
        );
        progress_row(
            ui,
            palette,
            "Attendance Progress",
            percentage(present, config.expected_students) as f32,
        );

        if let Some(notice) = &view_state.notice {
            ui.label(RichText::new(notice).size(13.0).color(palette.text_muted));
        }
        if let Some(name) = last_export {
            ui.label(
                RichText::new(format!("Last export: {}", name))
                    .size(12.0)
                    .color(palette.text_muted),
            );
        }
    });
}

fn render_methods(
    ui: &mut egui::Ui,
    palette: &Palette,
    view_state: &mut AttendanceViewState,
    attendance: &AttendanceData,
) {
    ui.columns(3, |columns| {
        card(&mut columns[0], palette, |ui| {
            ui.label(RichText::new("QR Code").size(17.0).strong().color(palette.text_primary));
            ui.add_space(8.0);
            match view_state.session.token() {
                Some(token) => {
                    ui.label(RichText::new("Current session token").color(palette.text_secondary));
                    ui.label(RichText::new(token).monospace().color(ThemeColors::ACCENT_PRIMARY));
                }
                None => {
                    ui.label(
                        RichText::new("Start a session to generate a QR token")
                            .color(palette.text_muted),
                    );
                }
            }
            ui.add_space(8.0);
            let regenerate = ui.add_enabled(
                view_state.session.is_active(),
                egui::Button::new("Regenerate Token"),
            );
            if regenerate.clicked() {
                if let Err(e) = view_state.session.regenerate_token() {
                    view_state.notice = Some(e.to_string());
                }
            }
        });

        card(&mut columns[1], palette, |ui| {
            ui.label(RichText::new("Proximity").size(17.0).strong().color(palette.text_primary));
            ui.add_space(8.0);
            ui.label(
                RichText::new(attendance.proximity_devices.to_string())
                    .size(28.0)
                    .strong()
                    .color(ThemeColors::ACCENT_PRIMARY),
            );
            ui.label(RichText::new("devices in range").color(palette.text_secondary));
        });

        card(&mut columns[2], palette, |ui| {
            ui.label(
                RichText::new("Face Recognition")
                    .size(17.0)
                    .strong()
                    .color(palette.text_primary),
            );
            ui.add_space(8.0);
            let (text, color) = if view_state.face_recognition_active {
                ("Camera Active", ThemeColors::ACCENT_SUCCESS)
            } else {
                ("Camera Off", ThemeColors::STATUS_STOPPED)
            };
            badge(ui, text, color);
            ui.add_space(8.0);
            let label = if view_state.face_recognition_active {
                "Stop Camera"
            } else {
                "Start Camera"
            };
            if ui.button(label).clicked() {
                view_state.face_recognition_active = !view_state.face_recognition_active;
                info!(
                    "Face recognition camera {}",
                    if view_state.face_recognition_active { "started" } else { "stopped" }
                );
            }
        });
    });

    for method in &attendance.methods {
        card(ui, palette, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&method.name).strong().color(palette.text_primary));
                    ui.label(RichText::new(&method.description).size(13.0).color(palette.text_secondary));
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    badge(ui, method.status.name(), device_color(method.status));
                    ui.label(
                        RichText::new(format!("{} check-ins | {:.1}% accuracy", method.count, method.accuracy))
                            .color(palette.text_muted),
                    );
                });
            });
        });
    }
}

fn render_live(
    ui: &mut egui::Ui,
    palette: &Palette,
    view_state: &mut AttendanceViewState,
    attendance: &AttendanceData,
) {
    card(ui, palette, |ui| {
        ui.horizontal(|ui| {
            ui.label("Search:");
            ui.add(
                egui::TextEdit::singleline(&mut view_state.search_query)
                    .hint_text("Name or ID...")
                    .desired_width(200.0),
            );
            ui.add_space(12.0);
            ui.label("Status:");
            egui::ComboBox::from_id_salt("attendance_status")
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
            ui.add_space(12.0);
            ui.label("Method:");
            egui::ComboBox::from_id_salt("attendance_method")
                .selected_text(view_state.check_in_method.name())
                .show_ui(ui, |ui| {
                    for method in CheckInMethod::ALL {
                        ui.selectable_value(&mut view_state.check_in_method, method, method.name());
                    }
                });
        });
        ui.add_space(12.0);

        let students =
            filter_records(&attendance.roster, &view_state.search_query, &view_state.status);
        if students.is_empty() {
            ui.label(RichText::new("No students match").color(palette.text_muted));
        }

        let active = view_state.session.is_active();
        for student in students {
            ui.horizontal(|ui| {
                badge(ui, &student.initials(), ThemeColors::ACCENT_PRIMARY);
                ui.vertical(|ui| {
                    ui.label(RichText::new(&student.name).strong().color(palette.text_primary));
                    ui.label(RichText::new(&student.id).size(12.0).monospace().color(palette.text_muted));
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    match row_status(&view_state.session, student) {
                        RowStatus::Live(check_in) => {
                            badge(ui, "Checked In", ThemeColors::ACCENT_SUCCESS);
                            ui.label(
                                RichText::new(format!(
                                    "{} at {}",
                                    check_in.method.name(),
                                    format_elapsed(check_in.at_elapsed)
                                ))
                                .size(12.0)
                                .color(palette.text_secondary),
                            );
                        }
                        RowStatus::Feed(entry) => {
                            let button = ui.add_enabled(active, egui::Button::new("Check In"));
                            if button.clicked() {
                                let method = view_state.check_in_method;
                                if let Err(e) = view_state.session.mark_attendance(&entry.id, method) {
                                    view_state.notice = Some(e.to_string());
                                }
                            }
                            badge(ui, entry.status.name(), status_color(entry.status));
                            if let (Some(method), Some(time)) = (&entry.method, &entry.time) {
                                ui.label(
                                    RichText::new(format!("{} at {}", method, time))
                                        .size(12.0)
                                        .color(palette.text_secondary),
                                );
                            }
                        }
                    }
                });
            });
            ui.separator();
        }
    });
}

/// Status column of a live roster row
#[derive(Debug)]
enum RowStatus<'r> {
    /// Checked in during the running session; supersedes the feed status
    Live(CheckIn),
    Feed(&'r LiveRosterEntry),
}

fn row_status<'r>(session: &AttendanceSession, student: &'r LiveRosterEntry) -> RowStatus<'r> {
    match session.check_in_for(&student.id) {
        Some(check_in) => RowStatus::Live(check_in.clone()),
        None => RowStatus::Feed(student),
    }
}

fn render_devices(ui: &mut egui::Ui, palette: &Palette, attendance: &AttendanceData) {
    ui.columns(2, |columns| {
        for (index, device) in attendance.devices.iter().enumerate() {
            card(&mut columns[index % 2], palette, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&device.id).strong().color(palette.text_primary));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        badge(ui, device.status.name(), device_color(device.status));
                    });
                });
                ui.label(
                    RichText::new(format!("{} | Room {}", device.kind, device.room))
                        .color(palette.text_secondary),
                );
                ui.label(
                    RichText::new(format!("Last update: {}", device.last_update))
                        .size(12.0)
                        .color(palette.text_muted),
                );
            });
        }
    });
}

fn render_analytics(ui: &mut egui::Ui, palette: &Palette, attendance: &AttendanceData) {
    let total = attendance.total_check_ins();
    ui.horizontal_wrapped(|ui| {
        StatusCard::new("Total Check-ins", total.to_string(), CardStatus::Active).show(ui, palette);
        let online = attendance
            .devices
            .iter()
            .filter(|d| d.status == DeviceStatus::Active)
            .count();
        StatusCard::new(
            "Devices Online",
            format!("{}/{}", online, attendance.devices.len()),
            if online == attendance.devices.len() {
                CardStatus::Active
            } else {
                CardStatus::Warning
            },
        )
        .show(ui, palette);
    });
    ui.add_space(12.0);

    card(ui, palette, |ui| {
        ui.label(RichText::new("Method Distribution").size(17.0).strong().color(palette.text_primary));
        ui.add_space(10.0);
        for method in &attendance.methods {
            progress_row(ui, palette, &method.name, attendance.method_share(method) as f32);
        }
    });
}

/// Write the running session to the export directory
fn export_snapshot(view_state: &mut AttendanceViewState, shared_state: &Arc<RwLock<SharedAppState>>) {
    let Some(summary) = view_state.session.snapshot() else {
        return;
    };

    let mut app_state = shared_state.write();
    let dir = match app_state.runtime.export_dir.clone() {
        Some(dir) => dir,
        None => match storage::get_data_dir() {
            Ok(dir) => dir,
            Err(e) => {
                error!("No export directory: {}", e);
                app_state.runtime.set_error(format!("Export failed: {}", e));
                return;
            }
        },
    };

    match storage::export_session(&summary, &dir) {
        Ok(path) => {
            info!("Exported attendance session to {:?}", path);
            view_state.notice = Some(format!("Exported to {}", path.display()));
            app_state.runtime.record_export(path);
        }
        Err(e) => {
            error!("Failed to export attendance session: {}", e);
            app_state.runtime.set_error(format!("Export failed: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AttendanceStatus;
    use std::time::Duration;

    fn absent_student() -> LiveRosterEntry {
        LiveRosterEntry {
            id: "CS21B003".to_string(),
            name: "Charlie Brown".to_string(),
            method: None,
            time: None,
            status: AttendanceStatus::Absent,
        }
    }

    #[test]
    fn test_live_check_in_supersedes_feed_status() {
        let student = absent_student();
        let mut session = AttendanceSession::new("Database Systems", Duration::from_secs(60))
            .with_roster(["CS21B003"]);
        session.start_session().unwrap();
        assert!(matches!(row_status(&session, &student), RowStatus::Feed(entry) if entry.id == "CS21B003"));

        session.mark_attendance("CS21B003", CheckInMethod::Proximity).unwrap();
        match row_status(&session, &student) {
            RowStatus::Live(check_in) => {
                assert_eq!(check_in.student_id, "CS21B003");
                assert_eq!(check_in.method, CheckInMethod::Proximity);
            }
            RowStatus::Feed(entry) => panic!("feed status {:?} shown after check-in", entry.status),
        }
    }

    #[test]
    fn test_feed_status_returns_after_session_ends() {
        let student = absent_student();
        let mut session = AttendanceSession::new("Database Systems", Duration::from_secs(60))
            .with_roster(["CS21B003"]);
        session.start_session().unwrap();
        session.mark_attendance("CS21B003", CheckInMethod::QrCode).unwrap();
        session.end_session();

        assert!(matches!(
            row_status(&session, &student),
            RowStatus::Feed(entry) if entry.status == AttendanceStatus::Absent
        ));
    }
}

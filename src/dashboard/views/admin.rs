//! Admin view - institution overview, departments, users, system health and reports

use egui::RichText;
use egui_extras::{Column, TableBuilder};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::dashboard::components::status_card::CardStatus;
use crate::dashboard::components::{badge, card, progress_row, render_header, render_tab_bar, StatusCard};
use crate::dashboard::filter::{filter_records, CategoryFilter};
use crate::dashboard::state::{AdminTab, AdminViewState, ViewContext};
use crate::dashboard::theme::{Palette, ThemeColors};
use crate::data::{AdminData, AlertLevel};
use crate::shared::SharedAppState;

const ALL_DEPARTMENTS: &str = "All Departments";

fn alert_color(level: AlertLevel) -> egui::Color32 {
    match level {
        AlertLevel::Info => ThemeColors::ACCENT_PRIMARY,
        AlertLevel::Success => ThemeColors::ACCENT_SUCCESS,
        AlertLevel::Warning => ThemeColors::ACCENT_WARNING,
        AlertLevel::Error => ThemeColors::ACCENT_ERROR,
    }
}

/// Render the admin view
pub fn render_admin_view(
    ui: &mut egui::Ui,
    view_state: &mut AdminViewState,
    shared_state: &Arc<RwLock<SharedAppState>>,
    ctx: &mut ViewContext,
) {
    let palette = ctx.palette();
    let app_state = shared_state.read();
    let admin = &app_state.data.admin;

    render_header(
        ui,
        ctx,
        "Admin Dashboard",
        "Institution-wide monitoring and management",
        |ui| {
            badge(ui, "System Online", ThemeColors::ACCENT_SUCCESS);
        },
    );

    render_stats(ui, palette, admin);

    render_tab_bar(ui, palette, &AdminTab::ALL, &mut view_state.tab, AdminTab::name);

    egui::ScrollArea::vertical().show(ui, |ui| match view_state.tab {
        AdminTab::Overview => render_overview(ui, palette, admin),
        AdminTab::Departments => render_departments(ui, palette, view_state, admin),
        AdminTab::Users => render_users(ui, palette, view_state, admin),
        AdminTab::System => render_system(ui, palette, admin),
        AdminTab::Reports => render_reports(ui, palette, admin),
    });
}

fn render_stats(ui: &mut egui::Ui, palette: &Palette, admin: &AdminData) {
    let stats = &admin.stats;
    ui.horizontal_wrapped(|ui| {
        StatusCard::new("Total Students", stats.total_students.to_string(), CardStatus::Active)
            .show(ui, palette);
        StatusCard::new("Total Teachers", stats.total_teachers.to_string(), CardStatus::Active)
            .show(ui, palette);
        StatusCard::new("Active Sessions", stats.active_sessions.to_string(), CardStatus::Active)
            .show(ui, palette);
        StatusCard::new(
            "Avg Attendance",
            format!("{:.1}%", stats.avg_attendance),
            CardStatus::from_rate(stats.avg_attendance, 85.0, 75.0),
        )
        .show(ui, palette);
        StatusCard::new("Departments", stats.total_departments.to_string(), CardStatus::Active)
            .show(ui, palette);
        StatusCard::new(
            "System Uptime",
            format!("{:.1}%", stats.system_uptime),
            CardStatus::from_rate(stats.system_uptime, 99.0, 95.0),
        )
        .show(ui, palette);
    });
    ui.add_space(16.0);
}

/// Department selector shared by the departments and users tabs
fn department_selector(ui: &mut egui::Ui, view_state: &mut AdminViewState, admin: &AdminData) {
    ui.horizontal(|ui| {
        ui.label("Search:");
        ui.add(
            egui::TextEdit::singleline(&mut view_state.search_query)
                .hint_text("Type to filter...")
                .desired_width(200.0),
        );
        ui.add_space(12.0);
        ui.label("Department:");
        let selected_text = match &view_state.department {
            CategoryFilter::All => ALL_DEPARTMENTS,
            CategoryFilter::Only(code) => admin.department_name(code),
        };
        egui::ComboBox::from_id_salt("admin_department")
            .selected_text(selected_text.to_string())
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(view_state.department.is_all(), ALL_DEPARTMENTS)
                    .clicked()
                {
                    view_state.department = CategoryFilter::All;
                }
                for dept in &admin.departments {
                    let selected = view_state.department == CategoryFilter::only(dept.code.as_str());
                    if ui.selectable_label(selected, dept.name.as_str()).clicked() {
                        view_state.department = CategoryFilter::only(dept.code.as_str());
                    }
                }
            });
    });
    ui.add_space(12.0);
}

fn render_overview(ui: &mut egui::Ui, palette: &Palette, admin: &AdminData) {
    ui.columns(2, |columns| {
        card(&mut columns[0], palette, |ui| {
            ui.label(RichText::new("Department Attendance").size(17.0).strong().color(palette.text_primary));
            ui.add_space(10.0);
            for dept in &admin.departments {
                progress_row(ui, palette, &dept.name, dept.attendance);
            }
        });

        card(&mut columns[1], palette, |ui| {
            ui.label(RichText::new("Recent Activity").size(17.0).strong().color(palette.text_primary));
            ui.add_space(10.0);
            for activity in &admin.recent_activities {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&activity.time).size(12.0).color(palette.text_muted));
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&activity.action).color(palette.text_primary));
                        ui.label(RichText::new(&activity.user).size(12.0).color(palette.text_secondary));
                    });
                });
                ui.separator();
            }
        });
    });
}

fn render_departments(
    ui: &mut egui::Ui,
    palette: &Palette,
    view_state: &mut AdminViewState,
    admin: &AdminData,
) {
    department_selector(ui, view_state, admin);

    let departments =
        filter_records(&admin.departments, &view_state.search_query, &view_state.department);
    if departments.is_empty() {
        ui.label(RichText::new("No departments match").color(palette.text_muted));
        return;
    }

    ui.columns(2, |columns| {
        for (index, dept) in departments.into_iter().enumerate() {
            card(&mut columns[index % 2], palette, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&dept.name).size(16.0).strong().color(palette.text_primary));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        badge(ui, &dept.code.to_uppercase(), ThemeColors::ACCENT_PRIMARY);
                    });
                });
                ui.label(
                    RichText::new(format!("{} students | {} teachers", dept.students, dept.teachers))
                        .color(palette.text_secondary),
                );
                ui.add_space(6.0);
                progress_row(ui, palette, "Attendance", dept.attendance);
            });
        }
    });
}

fn render_users(
    ui: &mut egui::Ui,
    palette: &Palette,
    view_state: &mut AdminViewState,
    admin: &AdminData,
) {
    department_selector(ui, view_state, admin);

    let users = filter_records(&admin.users, &view_state.search_query, &view_state.department);

    card(ui, palette, |ui| {
        ui.label(RichText::new("User Accounts").size(17.0).strong().color(palette.text_primary));
        ui.add_space(10.0);
        if users.is_empty() {
            ui.label(RichText::new("No users match").color(palette.text_muted));
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::remainder().at_least(160.0))
            .column(Column::exact(100.0))
            .column(Column::exact(180.0))
            .column(Column::exact(90.0))
            .header(22.0, |mut header| {
                for title in ["Name", "Role", "Department", "Status"] {
                    header.col(|ui| {
                        ui.label(RichText::new(title).strong().color(palette.text_secondary));
                    });
                }
            })
            .body(|mut body| {
                for user in users {
                    body.row(26.0, |mut row| {
                        row.col(|ui| {
                            ui.label(RichText::new(&user.name).color(palette.text_primary));
                        });
                        row.col(|ui| {
                            ui.label(RichText::new(&user.role).color(palette.text_secondary));
                        });
                        row.col(|ui| {
                            ui.label(
                                RichText::new(admin.department_name(&user.department))
                                    .color(palette.text_secondary),
                            );
                        });
                        row.col(|ui| {
                            let color = if user.status.eq_ignore_ascii_case("active") {
                                ThemeColors::ACCENT_SUCCESS
                            } else {
                                ThemeColors::STATUS_STOPPED
                            };
                            badge(ui, &user.status, color);
                        });
                    });
                }
            });
    });
}

fn render_system(ui: &mut egui::Ui, palette: &Palette, admin: &AdminData) {
    card(ui, palette, |ui| {
        ui.label(RichText::new("System Alerts").size(17.0).strong().color(palette.text_primary));
        ui.add_space(10.0);
        for alert in &admin.alerts {
            let color = alert_color(alert.level);
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(4.0, 28.0), egui::Sense::hover());
                ui.painter().rect_filled(rect, 2.0, color);
                ui.vertical(|ui| {
                    ui.label(RichText::new(&alert.message).color(palette.text_primary));
                    ui.label(RichText::new(&alert.time).size(12.0).color(palette.text_muted));
                });
            });
            ui.add_space(6.0);
        }
    });

    card(ui, palette, |ui| {
        ui.label(RichText::new("Pending Approvals").size(17.0).strong().color(palette.text_primary));
        ui.add_space(10.0);
        for approval in &admin.approvals {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&approval.name).strong().color(palette.text_primary));
                    ui.label(
                        RichText::new(format!("{} | {}", approval.kind, approval.department))
                            .size(12.0)
                            .color(palette.text_secondary),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    badge(ui, &approval.status, ThemeColors::ACCENT_WARNING);
                });
            });
            ui.separator();
        }
    });
}

fn render_reports(ui: &mut egui::Ui, palette: &Palette, admin: &AdminData) {
    let stats = &admin.stats;
    card(ui, palette, |ui| {
        ui.label(RichText::new("Institution Report").size(17.0).strong().color(palette.text_primary));
        ui.add_space(10.0);
        egui::Grid::new("admin_report_grid")
            .num_columns(2)
            .spacing([40.0, 8.0])
            .show(ui, |ui| {
                let rows = [
                    ("Students enrolled", stats.total_students.to_string()),
                    ("Teaching staff", stats.total_teachers.to_string()),
                    ("Departments", stats.total_departments.to_string()),
                    ("Average attendance", format!("{:.1}%", stats.avg_attendance)),
                    ("System uptime", format!("{:.1}%", stats.system_uptime)),
                ];
                for (label, value) in rows {
                    ui.label(RichText::new(label).color(palette.text_secondary));
                    ui.label(RichText::new(value).strong().color(palette.text_primary));
                    ui.end_row();
                }
            });
    });

    card(ui, palette, |ui| {
        ui.label(RichText::new("Lowest Attendance").size(17.0).strong().color(palette.text_primary));
        ui.add_space(10.0);
        let mut departments: Vec<_> = admin.departments.iter().collect();
        departments.sort_by(|a, b| a.attendance.total_cmp(&b.attendance));
        for dept in departments.into_iter().take(3) {
            progress_row(ui, palette, &dept.name, dept.attendance);
        }
    });
}

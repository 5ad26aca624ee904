//! Dashboard application entry point

use eframe::egui;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::WindowConfig;
use crate::dashboard::state::{AppView, DashboardState, ViewContext, ViewRouter};
use crate::dashboard::theme::{self, ThemeColors, ThemeController, ThemePreference};
use crate::dashboard::views::{
    render_admin_view, render_attendance_view, render_home_view, render_student_view,
    render_teacher_view,
};
use crate::shared::{SharedAppState, UiCommand};
use crate::storage::{self, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};

/// The main dashboard application. Owns the theme and the current view;
/// views only read them and queue [`UiCommand`]s.
pub struct DashboardApp {
    /// Shared application state
    shared_state: Arc<RwLock<SharedAppState>>,
    /// Per-view state
    dashboard_state: DashboardState,
    router: ViewRouter,
    theme: ThemeController,
    /// Whether the palette has been installed
    theme_applied: bool,
}

impl DashboardApp {
    /// Create the dashboard. `theme_override` replaces the stored or
    /// platform preference; `initial_view` is opened from home.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        shared_state: Arc<RwLock<SharedAppState>>,
        theme_override: Option<ThemePreference>,
        initial_view: Option<AppView>,
    ) -> Self {
        let (theme_config, session_config, dashboard_state) = {
            let state = shared_state.read();
            (
                state.config.theme.clone(),
                state.config.session.clone(),
                DashboardState::new(state.config.session.clone(), &state.data),
            )
        };
        info!(
            "Attendance timer cadence {:?} for {}",
            session_config.cadence(),
            session_config.subject
        );

        let platform_prefers_dark = theme_config.follow_system
            && matches!(cc.egui_ctx.system_theme(), Some(egui::Theme::Dark));

        let mut theme =
            ThemeController::initialize(open_preferences(), theme_config.storage_key, platform_prefers_dark);
        debug!("Theme source: {:?}", theme.source());
        if let Some(preference) = theme_override {
            info!("Theme forced to {} from the command line", preference.as_str());
            theme.set(preference);
        }

        let mut router = ViewRouter::new();
        if let Some(view) = initial_view {
            router.navigate(view);
        }

        Self {
            shared_state,
            dashboard_state,
            router,
            theme,
            theme_applied: false,
        }
    }

    /// Create eframe options for the dashboard window
    pub fn options(window: &WindowConfig) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([window.width, window.height])
                .with_min_inner_size([window.min_width, window.min_height])
                .with_title("SmartCurriculum"),
            ..Default::default()
        }
    }

    /// Apply the commands views queued this frame
    fn process_commands(&mut self, ctx: &egui::Context, commands: Vec<UiCommand>) {
        for command in commands {
            match command {
                UiCommand::GoHome => {
                    let previous = self.router.go_home();
                    let state = self.shared_state.read();
                    self.dashboard_state.reset(previous, &state.data);
                }
                UiCommand::Open(view) => {
                    self.router.navigate(view);
                }
                UiCommand::ToggleTheme => {
                    self.theme.toggle();
                    self.theme.apply(ctx);
                }
            }
        }
    }
}

/// Preference store in the config directory, or an in-memory one when the
/// directory cannot be resolved
fn open_preferences() -> Box<dyn PreferenceStore> {
    match storage::get_config_dir() {
        Ok(dir) => {
            let store = FilePreferenceStore::in_dir(&dir);
            debug!("Preferences stored at {:?}", store.path());
            Box::new(store)
        }
        Err(e) => {
            warn!("Theme preference will not persist: {}", e);
            Box::new(MemoryPreferenceStore::new())
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme once
        if !self.theme_applied {
            theme::apply_theme(ctx, self.theme.preference());
            self.theme.apply(ctx);
            self.theme_applied = true;
        }

        let mut view_ctx = ViewContext::new(self.theme.preference());

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::none().inner_margin(24.0).show(ui, |ui| {
                if let Some(error) = self.shared_state.read().runtime.last_error.clone() {
                    ui.colored_label(ThemeColors::ACCENT_ERROR, error);
                    ui.add_space(8.0);
                }

                match self.router.current() {
                    AppView::Home => {
                        render_home_view(ui, &self.shared_state, &mut view_ctx);
                    }
                    AppView::Student => {
                        render_student_view(
                            ui,
                            &mut self.dashboard_state.student,
                            &self.shared_state,
                            &mut view_ctx,
                        );
                    }
                    AppView::Teacher => {
                        render_teacher_view(
                            ui,
                            &mut self.dashboard_state.teacher,
                            &self.shared_state,
                            &mut view_ctx,
                        );
                    }
                    AppView::Admin => {
                        render_admin_view(
                            ui,
                            &mut self.dashboard_state.admin,
                            &self.shared_state,
                            &mut view_ctx,
                        );
                    }
                    AppView::Attendance => {
                        render_attendance_view(
                            ui,
                            &mut self.dashboard_state.attendance,
                            &self.shared_state,
                            &mut view_ctx,
                        );
                    }
                }
            });
        });

        self.process_commands(ctx, view_ctx.drain());
    }
}

/// Run the dashboard application
pub fn run_dashboard(
    shared_state: Arc<RwLock<SharedAppState>>,
    theme_override: Option<ThemePreference>,
    initial_view: Option<AppView>,
) -> Result<(), eframe::Error> {
    let options = DashboardApp::options(&shared_state.read().config.window);
    eframe::run_native(
        "SmartCurriculum",
        options,
        Box::new(move |cc| {
            Ok(Box::new(DashboardApp::new(
                cc,
                shared_state,
                theme_override,
                initial_view,
            )))
        }),
    )
}

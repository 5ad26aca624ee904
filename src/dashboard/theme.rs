//! Dashboard theme and styling
//!
//! Light and dark palettes, the persisted theme preference and the
//! controller that applies it to the egui context.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};
use tracing::{debug, info, warn};

use crate::storage::PreferenceStore;

/// Persisted light/dark choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Parse a stored value; anything other than "light" or "dark" is unreadable
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            _ => None,
        }
    }

    pub fn from_dark(dark: bool) -> Self {
        if dark {
            ThemePreference::Dark
        } else {
            ThemePreference::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ThemePreference::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Glyph for the toggle button: a sun while dark, a moon while light
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            ThemePreference::Light => "☾",
            ThemePreference::Dark => "☀",
        }
    }

    pub fn palette(&self) -> &'static Palette {
        match self {
            ThemePreference::Light => &Palette::LIGHT,
            ThemePreference::Dark => &Palette::DARK,
        }
    }
}

/// Where the initial preference came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    Stored,
    Platform,
}

/// Surface the theme is applied to. The egui context in the app, a
/// recorder in tests.
pub trait PresentationContext {
    fn set_dark_mode(&self, dark: bool);
    fn is_dark_mode(&self) -> bool;
}

impl PresentationContext for egui::Context {
    fn set_dark_mode(&self, dark: bool) {
        apply_theme(self, ThemePreference::from_dark(dark));
    }

    fn is_dark_mode(&self) -> bool {
        self.style().visuals.dark_mode
    }
}

/// Owns the theme preference and keeps the presentation context and the
/// preference store in step with it
pub struct ThemeController {
    preference: ThemePreference,
    source: ThemeSource,
    store: Box<dyn PreferenceStore>,
    storage_key: String,
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("preference", &self.preference)
            .field("source", &self.source)
            .field("storage_key", &self.storage_key)
            .finish()
    }
}

impl ThemeController {
    /// Read the stored preference, falling back to the platform signal when
    /// nothing usable is stored
    pub fn initialize(
        store: Box<dyn PreferenceStore>,
        storage_key: impl Into<String>,
        platform_prefers_dark: bool,
    ) -> Self {
        let storage_key = storage_key.into();
        let stored = store.get(&storage_key);

        let (preference, source) = match stored.as_deref().and_then(ThemePreference::parse) {
            Some(preference) => (preference, ThemeSource::Stored),
            None => {
                if let Some(value) = &stored {
                    warn!("Ignoring unreadable stored theme {:?}", value);
                }
                (ThemePreference::from_dark(platform_prefers_dark), ThemeSource::Platform)
            }
        };

        info!("Theme initialized to {} ({:?})", preference.as_str(), source);
        Self {
            preference,
            source,
            store,
            storage_key,
        }
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub fn source(&self) -> ThemeSource {
        self.source
    }

    /// Replace the preference without applying it
    pub fn set(&mut self, preference: ThemePreference) {
        self.preference = preference;
    }

    /// Flip between light and dark
    pub fn toggle(&mut self) -> ThemePreference {
        self.preference = self.preference.toggled();
        info!("Theme switched to {}", self.preference.as_str());
        self.preference
    }

    /// Push the preference to the presentation context and the store.
    /// Storage failures are logged and otherwise ignored.
    pub fn apply(&mut self, target: &dyn PresentationContext) {
        let dark = self.preference.is_dark();
        if target.is_dark_mode() != dark {
            target.set_dark_mode(dark);
        }

        if let Err(e) = self.store.set(&self.storage_key, self.preference.as_str()) {
            warn!("Could not persist theme preference: {}", e);
        } else {
            debug!("Persisted theme preference {}", self.preference.as_str());
        }
    }
}

/// Accent colors shared by both palettes
pub struct ThemeColors;

impl ThemeColors {
    pub const ACCENT_PRIMARY: Color32 = Color32::from_rgb(59, 130, 246);
    pub const ACCENT_SECONDARY: Color32 = Color32::from_rgb(139, 92, 246);
    pub const ACCENT_SUCCESS: Color32 = Color32::from_rgb(22, 163, 74);
    pub const ACCENT_WARNING: Color32 = Color32::from_rgb(234, 179, 8);
    pub const ACCENT_ERROR: Color32 = Color32::from_rgb(220, 38, 38);
    pub const ACCENT_ORANGE: Color32 = Color32::from_rgb(234, 88, 12);

    pub const STATUS_RUNNING: Color32 = Color32::from_rgb(34, 197, 94);
    pub const STATUS_STOPPED: Color32 = Color32::from_rgb(148, 163, 184);
    pub const STATUS_ERROR: Color32 = Color32::from_rgb(239, 68, 68);
}

/// Surface and text colors for one theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_base: Color32,
    pub bg_card: Color32,
    pub bg_raised: Color32,
    pub bg_hover: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub border: Color32,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        bg_base: Color32::from_rgb(249, 250, 251),
        bg_card: Color32::from_rgb(255, 255, 255),
        bg_raised: Color32::from_rgb(243, 244, 246),
        bg_hover: Color32::from_rgb(229, 231, 235),
        text_primary: Color32::from_rgb(17, 24, 39),
        text_secondary: Color32::from_rgb(75, 85, 99),
        text_muted: Color32::from_rgb(107, 114, 128),
        border: Color32::from_rgb(229, 231, 235),
    };

    pub const DARK: Palette = Palette {
        bg_base: Color32::from_rgb(17, 24, 39),
        bg_card: Color32::from_rgb(31, 41, 55),
        bg_raised: Color32::from_rgb(55, 65, 81),
        bg_hover: Color32::from_rgb(75, 85, 99),
        text_primary: Color32::from_rgb(255, 255, 255),
        text_secondary: Color32::from_rgb(209, 213, 219),
        text_muted: Color32::from_rgb(156, 163, 175),
        border: Color32::from_rgb(55, 65, 81),
    };
}

/// Install the palette for `theme` into egui
pub fn apply_theme(ctx: &egui::Context, theme: ThemePreference) {
    let palette = theme.palette();
    let egui_theme = if theme.is_dark() {
        egui::Theme::Dark
    } else {
        egui::Theme::Light
    };
    ctx.set_theme(egui_theme);

    let mut style = (*ctx.style()).clone();
    let mut visuals = if theme.is_dark() {
        Visuals::dark()
    } else {
        Visuals::light()
    };

    // Window and panel backgrounds
    visuals.window_fill = palette.bg_card;
    visuals.panel_fill = palette.bg_base;
    visuals.faint_bg_color = palette.bg_raised;
    visuals.extreme_bg_color = palette.bg_card;

    // Widget colors
    visuals.widgets.noninteractive.bg_fill = palette.bg_card;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_secondary);
    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);

    visuals.widgets.inactive.bg_fill = palette.bg_raised;
    visuals.widgets.inactive.weak_bg_fill = palette.bg_raised;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);

    visuals.widgets.hovered.bg_fill = palette.bg_hover;
    visuals.widgets.hovered.weak_bg_fill = palette.bg_hover;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, palette.text_primary);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);

    visuals.widgets.active.bg_fill = ThemeColors::ACCENT_PRIMARY;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(6.0);

    visuals.selection.bg_fill = color_with_alpha(ThemeColors::ACCENT_PRIMARY, 77); // ~0.3 alpha
    visuals.selection.stroke = Stroke::new(1.0, ThemeColors::ACCENT_PRIMARY);
    visuals.hyperlink_color = ThemeColors::ACCENT_PRIMARY;

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, palette.border);
    visuals.menu_rounding = Rounding::same(6.0);

    style.visuals = visuals;

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(16.0);

    style.text_styles = [
        (TextStyle::Small, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(15.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(15.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(22.0, FontFamily::Proportional)),
    ]
    .into();

    ctx.set_style(style);
}

/// Helper to create a color with modified alpha
pub fn color_with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPreferenceStore;
    use anyhow::bail;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Records dark-mode writes instead of styling a window
    #[derive(Default)]
    struct RecordingContext {
        dark: Cell<bool>,
        changes: Cell<usize>,
    }

    impl PresentationContext for RecordingContext {
        fn set_dark_mode(&self, dark: bool) {
            self.dark.set(dark);
            self.changes.set(self.changes.get() + 1);
        }

        fn is_dark_mode(&self) -> bool {
            self.dark.get()
        }
    }

    /// Store whose contents stay observable after being boxed
    #[derive(Clone, Default)]
    struct SharedStore(Rc<std::cell::RefCell<MemoryPreferenceStore>>);

    impl PreferenceStore for SharedStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
            self.0.borrow_mut().set(key, value)
        }
    }

    struct FailingStore;

    impl PreferenceStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
            bail!("disk full")
        }
    }

    fn controller(stored: Option<&str>, platform_dark: bool) -> ThemeController {
        let store = match stored {
            Some(value) => MemoryPreferenceStore::with_value("theme", value),
            None => MemoryPreferenceStore::new(),
        };
        ThemeController::initialize(Box::new(store), "theme", platform_dark)
    }

    #[test]
    fn test_stored_value_wins_over_platform() {
        let theme = controller(Some("light"), true);
        assert_eq!(theme.preference(), ThemePreference::Light);
        assert_eq!(theme.source(), ThemeSource::Stored);

        let theme = controller(Some("dark"), false);
        assert_eq!(theme.preference(), ThemePreference::Dark);
    }

    #[test]
    fn test_platform_used_when_nothing_stored() {
        let theme = controller(None, true);
        assert_eq!(theme.preference(), ThemePreference::Dark);
        assert_eq!(theme.source(), ThemeSource::Platform);

        let theme = controller(None, false);
        assert_eq!(theme.preference(), ThemePreference::Light);
    }

    #[test]
    fn test_unreadable_value_falls_back_to_platform() {
        let theme = controller(Some("solarized"), true);
        assert_eq!(theme.preference(), ThemePreference::Dark);
        assert_eq!(theme.source(), ThemeSource::Platform);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut theme = controller(None, false);
        let original = theme.preference();
        assert_eq!(theme.toggle(), ThemePreference::Dark);
        assert_eq!(theme.toggle(), original);
    }

    #[test]
    fn test_apply_sets_marker_and_persists() {
        let store = SharedStore::default();
        let mut theme = ThemeController::initialize(Box::new(store.clone()), "theme", true);
        let ctx = RecordingContext::default();

        theme.apply(&ctx);
        assert!(ctx.is_dark_mode());
        assert_eq!(store.get("theme").as_deref(), Some("dark"));

        theme.toggle();
        theme.apply(&ctx);
        assert!(!ctx.is_dark_mode());
        assert_eq!(store.get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let store = SharedStore::default();
        let mut theme = ThemeController::initialize(Box::new(store.clone()), "theme", true);
        let ctx = RecordingContext::default();

        theme.apply(&ctx);
        theme.apply(&ctx);

        assert_eq!(ctx.changes.get(), 1);
        assert_eq!(store.0.borrow().writes, 1);
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_apply_survives_storage_failure() {
        let mut theme = ThemeController::initialize(Box::new(FailingStore), "theme", true);
        let ctx = RecordingContext::default();
        theme.apply(&ctx);
        assert!(ctx.is_dark_mode());
    }

    #[test]
    fn test_preference_parse_and_format() {
        assert_eq!(ThemePreference::parse("dark"), Some(ThemePreference::Dark));
        assert_eq!(ThemePreference::parse(" light\n"), Some(ThemePreference::Light));
        assert_eq!(ThemePreference::parse("Dark"), None);
        assert_eq!(ThemePreference::Dark.as_str(), "dark");
        assert_eq!(ThemePreference::default(), ThemePreference::Light);
    }
}

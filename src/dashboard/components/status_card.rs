//! Status card component for headline figures

use egui::{Color32, RichText, Rounding, Vec2};

use crate::dashboard::theme::{Palette, ThemeColors};

/// A card displaying one headline figure
pub struct StatusCard {
    pub title: String,
    pub value: String,
    pub status: CardStatus,
    pub caption: Option<String>,
}

/// Status types for cards
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardStatus {
    Active,
    Inactive,
    Warning,
    Error,
}

impl CardStatus {
    pub fn color(&self) -> Color32 {
        match self {
            CardStatus::Active => ThemeColors::STATUS_RUNNING,
            CardStatus::Inactive => ThemeColors::STATUS_STOPPED,
            CardStatus::Warning => ThemeColors::ACCENT_WARNING,
            CardStatus::Error => ThemeColors::STATUS_ERROR,
        }
    }

    /// Pick a status from a percentage: healthy at `good` and above,
    /// warning down to `warn`, error below
    pub fn from_rate(rate: f32, good: f32, warn: f32) -> Self {
        if rate >= good {
            CardStatus::Active
        } else if rate >= warn {
            CardStatus::Warning
        } else {
            CardStatus::Error
        }
    }
}

impl StatusCard {
    pub fn new(title: impl Into<String>, value: impl Into<String>, status: CardStatus) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            status,
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn show(&self, ui: &mut egui::Ui, palette: &Palette) {
        egui::Frame::none()
            .fill(palette.bg_card)
            .stroke(egui::Stroke::new(1.0, palette.border))
            .rounding(Rounding::same(8.0))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_min_width(170.0);

                ui.horizontal(|ui| {
                    // Status indicator dot
                    let dot_rect = egui::Rect::from_center_size(
                        ui.cursor().left_top() + Vec2::new(6.0, 10.0),
                        Vec2::splat(8.0),
                    );
                    ui.painter().circle_filled(dot_rect.center(), 4.0, self.status.color());
                    ui.add_space(16.0);

                    ui.vertical(|ui| {
                        ui.label(RichText::new(&self.title).size(12.0).color(palette.text_muted));
                        ui.add_space(4.0);
                        ui.label(
                            RichText::new(&self.value)
                                .size(20.0)
                                .color(palette.text_primary)
                                .strong(),
                        );
                        if let Some(caption) = &self.caption {
                            ui.add_space(4.0);
                            ui.label(RichText::new(caption).size(11.0).color(self.status.color()));
                        }
                    });
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_rate() {
        assert_eq!(CardStatus::from_rate(93.2, 90.0, 85.0), CardStatus::Active);
        assert_eq!(CardStatus::from_rate(88.7, 90.0, 85.0), CardStatus::Warning);
        assert_eq!(CardStatus::from_rate(70.0, 90.0, 85.0), CardStatus::Error);
    }
}

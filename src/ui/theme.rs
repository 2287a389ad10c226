//! Dark egui styling for the page overlays.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// Resource to track if the theme has been applied
#[derive(Resource, Default)]
pub struct ThemeApplied(pub bool);

pub struct ThemePlugin;

impl Plugin for ThemePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ThemeApplied>()
            .add_systems(Update, apply_dark_theme);
    }
}

/// Color palette for the overlays, matching the page's night-sky look.
pub mod colors {
    use bevy_egui::egui::Color32;

    // Backgrounds (slightly transparent so the field shows through)
    pub const BG_DARK: Color32 = Color32::from_rgba_premultiplied(16, 24, 39, 240);
    pub const BG_DARKEST: Color32 = Color32::from_rgb(8, 12, 24);
    pub const WIDGET_BG: Color32 = Color32::from_rgb(30, 38, 55);
    pub const WIDGET_BG_HOVER: Color32 = Color32::from_rgb(40, 50, 70);
    pub const WIDGET_BG_ACTIVE: Color32 = Color32::from_rgb(50, 62, 86);
    pub const WIDGET_BORDER: Color32 = Color32::from_rgb(55, 65, 85);

    // Text
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(225, 228, 235);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(150, 158, 175);

    // Accent (the field's gold)
    pub const ACCENT: Color32 = Color32::from_rgb(212, 175, 55);

    // Toast fills per severity
    pub const TOAST_SUCCESS_BG: Color32 = Color32::from_rgba_premultiplied(16, 24, 39, 230);
    pub const TOAST_WARNING_BG: Color32 = Color32::from_rgba_premultiplied(120, 82, 10, 230);
    pub const TOAST_ERROR_BG: Color32 = Color32::from_rgba_premultiplied(110, 20, 20, 230);
}

/// Apply the dark theme to egui once a context exists.
fn apply_dark_theme(mut contexts: EguiContexts, mut applied: ResMut<ThemeApplied>) {
    if applied.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut style = (*ctx.style()).clone();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(12);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);

    style.visuals.window_corner_radius = egui::CornerRadius::same(8);
    style.visuals.window_fill = colors::BG_DARK;
    style.visuals.window_stroke = egui::Stroke::new(1.0, colors::WIDGET_BORDER);
    style.visuals.panel_fill = colors::BG_DARK;

    style.visuals.widgets.noninteractive.bg_fill = colors::WIDGET_BG;
    style.visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, colors::TEXT_SECONDARY);
    style.visuals.widgets.inactive.bg_fill = colors::WIDGET_BG;
    style.visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, colors::TEXT_PRIMARY);
    style.visuals.widgets.hovered.bg_fill = colors::WIDGET_BG_HOVER;
    style.visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, colors::TEXT_PRIMARY);
    style.visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, colors::ACCENT);
    style.visuals.widgets.active.bg_fill = colors::WIDGET_BG_ACTIVE;
    style.visuals.widgets.active.fg_stroke = egui::Stroke::new(1.0, colors::TEXT_PRIMARY);

    style.visuals.extreme_bg_color = colors::BG_DARKEST;
    style.visuals.hyperlink_color = colors::ACCENT;
    style.visuals.override_text_color = Some(colors::TEXT_PRIMARY);

    ctx.set_style(style);
    applied.0 = true;
}

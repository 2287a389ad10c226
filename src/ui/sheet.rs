//! The add-post sheet: trigger button, form fields, and close rules.
//!
//! The sheet closes from its own close control, from Escape (handled in
//! the interaction layer), or from a click that lands outside every UI
//! surface. Image paths are validated when the field loses focus, the
//! way the page validated its file input on change.

use std::path::Path;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

use crate::encode::{self, EncodeError};
use crate::interaction::{SubmitFlow, SubmitPostEvent};
use crate::store::ActiveStore;

use super::theme::colors;
use super::toast::Toast;

/// Add-post sheet state; the form owns its field buffers.
#[derive(Resource, Default)]
pub struct SheetState {
    pub open: bool,
    pub title: String,
    pub text: String,
    /// Path of the chosen image file; empty means none chosen.
    pub image_path: String,
    /// Last path that passed selection-time validation.
    pub(crate) validated_path: String,
}

impl SheetState {
    /// Empty every field, the clear control's behavior.
    pub fn reset(&mut self) {
        self.title.clear();
        self.text.clear();
        self.image_path.clear();
        self.validated_path.clear();
    }
}

pub struct SheetPlugin;

impl Plugin for SheetPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SheetState>()
            .add_systems(EguiPrimaryContextPass, (draw_trigger, draw_sheet).chain());
    }
}

fn draw_trigger(mut contexts: EguiContexts, mut sheet: ResMut<SheetState>) -> Result {
    let ctx = contexts.ctx_mut()?;
    egui::Area::new(egui::Id::new("add_trigger"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
        .show(ctx, |ui| {
            if ui
                .button(egui::RichText::new("✦ Add a star").size(16.0))
                .clicked()
            {
                sheet.open = true;
            }
        });
    Ok(())
}

fn draw_sheet(
    mut contexts: EguiContexts,
    mut sheet: ResMut<SheetState>,
    mut submits: MessageWriter<SubmitPostEvent>,
    flow: Res<SubmitFlow>,
    store: Res<ActiveStore>,
    mut toast: ResMut<Toast>,
) -> Result {
    let ctx = contexts.ctx_mut()?.clone();
    if !sheet.open {
        return Ok(());
    }

    let image_label = if store.0.requires_image() {
        "Image (required)"
    } else {
        "Image (optional)"
    };

    let mut still_open = true;
    egui::Window::new("New star")
        .id(egui::Id::new("add_sheet"))
        .open(&mut still_open)
        .collapsible(false)
        .resizable(false)
        .default_width(320.0)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 56.0))
        .show(&ctx, |ui| {
            ui.label(egui::RichText::new("Title").color(colors::TEXT_SECONDARY));
            ui.text_edit_singleline(&mut sheet.title);

            ui.label(egui::RichText::new("Text").color(colors::TEXT_SECONDARY));
            ui.add(egui::TextEdit::multiline(&mut sheet.text).desired_rows(4));

            ui.label(egui::RichText::new(image_label).color(colors::TEXT_SECONDARY));
            let path_field = ui.add(
                egui::TextEdit::singleline(&mut sheet.image_path)
                    .hint_text("Path to an image file"),
            );
            if path_field.lost_focus() && sheet.image_path.trim() != sheet.validated_path {
                check_selection(&mut sheet, &mut toast);
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let label = if flow.is_idle() {
                    "Publish"
                } else {
                    "Publishing…"
                };
                if ui
                    .add_enabled(flow.is_idle(), egui::Button::new(label))
                    .clicked()
                {
                    submits.write(SubmitPostEvent);
                }
                if ui.button("Clear").clicked() {
                    sheet.reset();
                }
            });
        });

    // A click outside every UI surface (the trigger included, since it is
    // one) closes the sheet.
    if still_open && ctx.input(|i| i.pointer.any_pressed()) && !ctx.is_pointer_over_area() {
        still_open = false;
    }
    sheet.open = still_open;
    Ok(())
}

/// Selection-time image validation: reject wrong types and oversized
/// files immediately, confirm good picks with name and size.
fn check_selection(sheet: &mut SheetState, toast: &mut Toast) {
    let path = sheet.image_path.trim().to_string();
    if path.is_empty() {
        sheet.validated_path.clear();
        return;
    }

    match encode::validate_selection(Path::new(&path)) {
        Ok(size) => {
            let name = Path::new(&path)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(&path);
            let size_mb = size as f64 / (1024.0 * 1024.0);
            toast.success(format!("Image selected: {name} ({size_mb:.1} MB)"));
            sheet.validated_path = path;
        }
        Err(err) => {
            let message = match err {
                EncodeError::TooLarge { .. } => "The image is too large (max 10 MB)",
                _ => "Please choose a valid image file",
            };
            toast.error(message);
            sheet.image_path.clear();
            sheet.validated_path.clear();
        }
    }
}

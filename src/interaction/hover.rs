//! Cursor hit-testing and the hover enter/exit transitions.
//!
//! No picking plugin: the cursor is projected into world space and tested
//! against each star's glow radius, newest star first. Pointer input that
//! egui wants (a form field, the modal) never reaches the field.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::field::{StarField, StarMode};
use crate::theme::FieldTheme;

/// Index of the currently hovered star, if any.
#[derive(Resource, Default)]
pub struct HoveredStar(pub Option<usize>);

pub(super) fn track_hover(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    mut contexts: EguiContexts,
    theme: Res<FieldTheme>,
    mut field: ResMut<StarField>,
    mut hovered: ResMut<HoveredStar>,
) {
    let next = cursor_world_position(&windows, &cameras, &mut contexts)
        .and_then(|point| field.hit_test(point, &theme));
    if next == hovered.0 {
        return;
    }

    if let Some(previous) = hovered.0 {
        // The index may be stale after a rebuild; a missing particle just
        // means there is nothing to restore.
        if let Some(star) = field.get_mut(previous) {
            star.mode = StarMode::Resting;
        }
    }
    if let Some(index) = next {
        if let Some(star) = field.get_mut(index) {
            star.mode = StarMode::Hovered;
        }
    }
    hovered.0 = next;
}

/// Cursor position in world coordinates, or `None` when the cursor is
/// outside the window or captured by the UI.
fn cursor_world_position(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    contexts: &mut EguiContexts,
) -> Option<Vec2> {
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
            return None;
        }
    }
    let window = windows.single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = cameras.single().ok()?;
    camera.viewport_to_world_2d(camera_transform, cursor).ok()
}

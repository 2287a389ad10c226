//! Background star decoration and debounced resize handling.
//!
//! Tiny dim stars scattered across the viewport, redrawn when the window
//! settles after a resize. The redraw waits behind a short debounce so a
//! drag-resize does not rescatter every frame; field bounds track the
//! window immediately.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::constants::timing;
use crate::field::{FieldBounds, StarField};
use crate::theme::FieldTheme;

use super::glow::GlowTexture;
use super::layers;

#[derive(Component)]
pub(super) struct BackgroundStar;

/// Debounce for resize-driven background redraws.
#[derive(Resource)]
pub(super) struct ResizeDebounce {
    timer: Timer,
    pending: bool,
}

impl Default for ResizeDebounce {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(timing::RESIZE_DEBOUNCE_SECS, TimerMode::Once),
            pending: false,
        }
    }
}

fn rand_range(lo: f32, hi: f32) -> f32 {
    lo + fastrand::f32() * (hi - lo)
}

/// Scatter the background stars over a `width` x `height` viewport.
pub(super) fn scatter_background(
    commands: &mut Commands,
    theme: &FieldTheme,
    glow: &GlowTexture,
    width: f32,
    height: f32,
) {
    let half = Vec2::new(width, height) * 0.5;
    for _ in 0..theme.background_count {
        let color = theme.background_colors[fastrand::usize(..theme.background_colors.len())];
        let scale = rand_range(theme.background_scale.0, theme.background_scale.1);
        commands.spawn((
            BackgroundStar,
            Sprite {
                image: glow.0.clone(),
                color: color.with_alpha(theme.background_alpha),
                ..default()
            },
            Transform::from_translation(Vec3::new(
                rand_range(-half.x, half.x),
                rand_range(-half.y, half.y),
                layers::BACKGROUND,
            ))
            .with_scale(Vec3::splat(scale)),
        ));
    }
}

/// Track window resizes: bounds update immediately, the decoration
/// redraw is deferred behind the debounce.
pub(super) fn watch_resize(
    mut resizes: MessageReader<WindowResized>,
    mut debounce: ResMut<ResizeDebounce>,
    mut field: ResMut<StarField>,
) {
    let mut latest = None;
    for event in resizes.read() {
        latest = Some((event.width, event.height));
    }
    if let Some((width, height)) = latest {
        field.set_bounds(FieldBounds::new(width, height));
        debounce.timer.reset();
        debounce.pending = true;
    }
}

pub(super) fn debounced_redraw(
    time: Res<Time>,
    mut debounce: ResMut<ResizeDebounce>,
    mut commands: Commands,
    existing: Query<Entity, With<BackgroundStar>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    theme: Res<FieldTheme>,
    glow: Res<GlowTexture>,
) {
    if !debounce.pending {
        return;
    }
    if !debounce.timer.tick(time.delta()).finished() {
        return;
    }
    debounce.pending = false;

    let Ok(window) = windows.single() else {
        return;
    };
    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }
    scatter_background(&mut commands, &theme, &glow, window.width(), window.height());
    debug!(
        "Background redrawn for {}x{}",
        window.width(),
        window.height()
    );
}

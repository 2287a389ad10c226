//! Mouse-driven parallax planet decoration.
//!
//! Three soft planet sprites drift against the pointer, each with its own
//! strength, selling a little depth behind the field.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::theme::FieldTheme;

use super::glow::GlowTexture;
use super::layers;

/// Pointer position normalized to `-1..1` on both axes (screen
/// convention: +y toward the bottom edge).
#[derive(Resource, Default)]
pub struct PointerOffset(pub Vec2);

/// One parallax layer: an anchor relative to the window and a pixel
/// offset factor applied against the pointer.
#[derive(Component)]
pub(super) struct ParallaxLayer {
    /// Anchor in `0..1` window fractions, measured from the top-left.
    rel_anchor: Vec2,
    /// Pixels of travel at full pointer deflection.
    factor: Vec2,
}

/// (relative anchor, pointer factor, sprite scale, tint)
const PLANETS: [(Vec2, Vec2, f32, Color); 3] = [
    (
        Vec2::new(0.18, 0.28),
        Vec2::new(-10.0, -6.0),
        2.6,
        Color::srgba(0.83, 0.69, 0.22, 0.2),
    ),
    (
        Vec2::new(0.78, 0.22),
        Vec2::new(14.0, 10.0),
        1.8,
        Color::srgba(0.29, 0.62, 1.0, 0.18),
    ),
    (
        Vec2::new(0.55, 0.82),
        Vec2::new(6.0, 4.0),
        3.4,
        Color::srgba(0.61, 0.44, 0.86, 0.14),
    ),
];

pub(super) fn spawn_planets(commands: &mut Commands, glow: &GlowTexture) {
    for (rel_anchor, factor, scale, color) in PLANETS {
        commands.spawn((
            ParallaxLayer { rel_anchor, factor },
            Sprite {
                image: glow.0.clone(),
                color,
                ..default()
            },
            Transform::from_translation(Vec3::new(0.0, 0.0, layers::PLANETS))
                .with_scale(Vec3::splat(scale)),
        ));
    }
}

pub(super) fn track_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut offset: ResMut<PointerOffset>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    offset.0 = Vec2::new(
        (cursor.x / window.width().max(1.0)) * 2.0 - 1.0,
        (cursor.y / window.height().max(1.0)) * 2.0 - 1.0,
    );
}

/// Anchors are recomputed from the live window size every frame, so the
/// layers also follow resizes for free.
pub(super) fn apply_parallax(
    windows: Query<&Window, With<PrimaryWindow>>,
    offset: Res<PointerOffset>,
    mut layers_query: Query<(&ParallaxLayer, &mut Transform)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = Vec2::new(window.width(), window.height());

    for (layer, mut transform) in layers_query.iter_mut() {
        // Window fractions (top-left origin) into world space (centered,
        // y up), then the pointer offset in screen convention.
        let anchor = Vec2::new(
            (layer.rel_anchor.x - 0.5) * size.x,
            (0.5 - layer.rel_anchor.y) * size.y,
        );
        let shift = Vec2::new(
            offset.0.x * layer.factor.x,
            -offset.0.y * layer.factor.y,
        );
        transform.translation = (anchor + shift).extend(layers::PLANETS);
    }
}

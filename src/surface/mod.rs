//! The render surface: camera, glow texture, background, parallax.

mod background;
mod glow;
mod parallax;

pub use glow::{GlowTexture, glow_image};
pub use parallax::PointerOffset;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::theme::FieldTheme;

/// Z ordering of the sprite layers.
pub mod layers {
    pub const BACKGROUND: f32 = -10.0;
    pub const PLANETS: f32 = -5.0;
    pub const STARS: f32 = 0.0;
}

pub struct SurfacePlugin;

impl Plugin for SurfacePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb_u8(5, 8, 20)))
            .init_resource::<PointerOffset>()
            .init_resource::<background::ResizeDebounce>()
            .add_systems(Startup, setup_surface)
            .add_systems(
                Update,
                (
                    background::watch_resize,
                    background::debounced_redraw,
                    parallax::track_pointer,
                    parallax::apply_parallax,
                ),
            );
    }
}

/// One-shot scene setup: camera, the shared glow texture, the initial
/// background scatter, and the parallax planets.
fn setup_surface(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    theme: Res<FieldTheme>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    commands.spawn(Camera2d);

    let handle = images.add(glow_image(theme.glow_size, theme.glow_stops));
    let glow = GlowTexture(handle);

    let (width, height) = windows
        .single()
        .map(|window| (window.width(), window.height()))
        .unwrap_or((1280.0, 720.0));

    background::scatter_background(&mut commands, &theme, &glow, width, height);
    parallax::spawn_planets(&mut commands, &glow);

    commands.insert_resource(glow);
}

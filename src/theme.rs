//! Visual themes for the field.
//!
//! The hosted and local backends kept distinct looks in the original page:
//! a warm golden field over a sparse backdrop, and a cooler pale-blue field
//! over a dense one. Both survive here as presets; the active preset
//! follows the selected backend.

use bevy::prelude::*;

use crate::store::BackendKind;

/// One stop of the radial glow gradient: (distance ratio from center,
/// straight-alpha sRGBA channels in `0.0..=1.0`).
pub type GlowStop = (f32, [f32; 4]);

/// Everything the field and surface need to render one visual style.
#[derive(Resource, Clone, Debug)]
pub struct FieldTheme {
    /// Resting star tint, multiplied with the glow texture.
    pub star_tint: Color,
    /// Tint while hovered.
    pub highlight_tint: Color,
    /// Scale multiplier while hovered.
    pub hover_scale: f32,
    /// Uniform spawn range for the base sprite scale.
    pub scale: (f32, f32),
    /// Uniform spawn range for the base opacity.
    pub base_alpha: (f32, f32),
    /// Uniform spawn range for the phase rate, rad/s. Strictly positive.
    pub wobble_rate: (f32, f32),
    /// Per-axis velocity magnitude cap, units/s. Horizontal is wider,
    /// giving the field its gentle sideways drift bias.
    pub max_velocity: Vec2,

    /// Edge length of the generated glow texture, in pixels.
    pub glow_size: u32,
    /// Radial gradient of the glow texture.
    pub glow_stops: &'static [GlowStop],

    /// Number of tiny background decoration stars.
    pub background_count: usize,
    /// Opacity of the background decoration.
    pub background_alpha: f32,
    /// Colors the background stars are drawn from.
    pub background_colors: &'static [Color],
    /// Uniform range for background star sprite scale.
    pub background_scale: (f32, f32),
}

/// White core fading through gold, transparent at the rim.
const HOSTED_GLOW: &[GlowStop] = &[
    (0.0, [1.0, 1.0, 1.0, 1.0]),
    (0.2, [1.0, 0.92, 0.71, 0.9]),
    (0.5, [0.83, 0.69, 0.22, 0.7]),
    (0.8, [0.72, 0.53, 0.04, 0.3]),
    (1.0, [1.0, 1.0, 1.0, 0.0]),
];

/// White core through pale blue, transparent at the rim.
const LOCAL_GLOW: &[GlowStop] = &[
    (0.0, [1.0, 1.0, 1.0, 1.0]),
    (0.5, [0.61, 0.76, 1.0, 0.6]),
    (1.0, [1.0, 1.0, 1.0, 0.0]),
];

const HOSTED_BACKGROUND: &[Color] = &[
    Color::srgb(0.83, 0.69, 0.22),
    Color::srgb(0.29, 0.62, 1.0),
];

const LOCAL_BACKGROUND: &[Color] = &[Color::srgb(0.43, 0.66, 1.0)];

impl FieldTheme {
    /// The look paired with the hosted backend.
    pub fn hosted() -> Self {
        Self {
            star_tint: Color::srgb_u8(255, 215, 0),
            highlight_tint: Color::WHITE,
            hover_scale: 1.5,
            scale: (0.4, 1.2),
            base_alpha: (0.85, 1.0),
            wobble_rate: (0.06, 0.3),
            max_velocity: Vec2::new(18.0, 12.0),
            glow_size: 100,
            glow_stops: HOSTED_GLOW,
            background_count: 80,
            background_alpha: 0.15,
            background_colors: HOSTED_BACKGROUND,
            background_scale: (0.004, 0.014),
        }
    }

    /// The look paired with the local backend.
    pub fn local() -> Self {
        Self {
            star_tint: Color::srgb_u8(156, 195, 255),
            highlight_tint: Color::WHITE,
            hover_scale: 1.6,
            scale: (0.18, 0.7),
            base_alpha: (0.6, 1.0),
            wobble_rate: (0.06, 0.24),
            max_velocity: Vec2::new(18.0, 15.0),
            glow_size: 64,
            glow_stops: LOCAL_GLOW,
            background_count: 450,
            background_alpha: 0.35,
            background_colors: LOCAL_BACKGROUND,
            background_scale: (0.003, 0.0375),
        }
    }

    pub fn for_backend(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Hosted => Self::hosted(),
            BackendKind::Local => Self::local(),
        }
    }
}

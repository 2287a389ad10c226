//! Star particle data and spawn sampling.

use bevy::prelude::*;

use crate::post::Post;
use crate::theme::FieldTheme;

/// Interaction mode of a star.
///
/// Base visual attributes are permanent fields on the particle, so
/// leaving `Hovered` always restores them, even if an exit arrives
/// without a matching enter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StarMode {
    #[default]
    Resting,
    Hovered,
}

/// A single CPU-simulated star. Exactly one per live post; rebuilt from
/// the post set whenever the field is fully re-rendered.
#[derive(Debug)]
pub struct StarParticle {
    /// Sprite entity this particle drives.
    pub entity: Entity,
    /// The post this star projects.
    pub post: Post,
    pub position: Vec2,
    /// Linear drift, units/s.
    pub velocity: Vec2,
    /// Phase accumulator driving the circular perturbation and twinkle.
    pub wobble: f32,
    /// Phase rate, rad/s. Strictly positive.
    pub wobble_rate: f32,
    pub base_scale: f32,
    pub base_alpha: f32,
    /// Current opacity, recomputed every frame.
    pub alpha: f32,
    pub mode: StarMode,
}

impl StarParticle {
    /// Sprite scale after the hover multiplier.
    pub fn render_scale(&self, theme: &FieldTheme) -> f32 {
        match self.mode {
            StarMode::Resting => self.base_scale,
            StarMode::Hovered => self.base_scale * theme.hover_scale,
        }
    }

    /// Sprite tint for the current mode.
    pub fn tint(&self, theme: &FieldTheme) -> Color {
        match self.mode {
            StarMode::Resting => theme.star_tint,
            StarMode::Hovered => theme.highlight_tint,
        }
    }
}

/// Uniform sample in `lo..hi`.
pub(crate) fn rand_range(lo: f32, hi: f32) -> f32 {
    lo + fastrand::f32() * (hi - lo)
}

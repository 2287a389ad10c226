//! Procedural radial-gradient glow texture.
//!
//! Every star sprite shares one soft-glow texture: a white core fading
//! through the theme's gradient to a fully transparent rim. Tinting per
//! sprite gives the resting/hover colors.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::theme::GlowStop;

/// Shared glow sprite texture, generated once per theme.
#[derive(Resource)]
pub struct GlowTexture(pub Handle<Image>);

/// Rasterize a radial gradient: each pixel samples the gradient by its
/// distance from the center; everything outside the disc is transparent.
pub fn glow_image(size: u32, stops: &[GlowStop]) -> Image {
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    let center = (size as f32 - 1.0) * 0.5;
    let radius = size as f32 * 0.5;

    for y in 0..size {
        for x in 0..size {
            let distance = Vec2::new(x as f32 - center, y as f32 - center).length() / radius;
            let color = sample_stops(stops, distance);
            for channel in color {
                data.push((channel.clamp(0.0, 1.0) * 255.0).round() as u8);
            }
        }
    }

    Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
}

/// Linear interpolation between gradient stops; clamped to the first and
/// last stops, transparent at and beyond the rim.
fn sample_stops(stops: &[GlowStop], t: f32) -> [f32; 4] {
    if t >= 1.0 {
        return [0.0; 4];
    }
    let Some(first) = stops.first() else {
        return [0.0; 4];
    };
    if t <= first.0 {
        return first.1;
    }

    for pair in stops.windows(2) {
        let (lo, lo_color) = pair[0];
        let (hi, hi_color) = pair[1];
        if t <= hi {
            let span = (hi - lo).max(f32::EPSILON);
            let frac = (t - lo) / span;
            let mut out = [0.0; 4];
            for (i, slot) in out.iter_mut().enumerate() {
                *slot = lo_color[i] + (hi_color[i] - lo_color[i]) * frac;
            }
            return out;
        }
    }

    stops.last().map(|stop| stop.1).unwrap_or([0.0; 4])
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOPS: &[GlowStop] = &[
        (0.0, [1.0, 1.0, 1.0, 1.0]),
        (0.5, [0.5, 0.5, 0.5, 0.5]),
        (1.0, [0.0, 0.0, 0.0, 0.0]),
    ];

    #[test]
    fn endpoints_clamp_to_first_and_last_stops() {
        assert_eq!(sample_stops(STOPS, 0.0), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(sample_stops(STOPS, 1.0), [0.0; 4]);
        assert_eq!(sample_stops(STOPS, 2.0), [0.0; 4]);
    }

    #[test]
    fn midpoints_interpolate_linearly() {
        let mid = sample_stops(STOPS, 0.25);
        for channel in mid {
            assert!((channel - 0.75).abs() < 1e-5);
        }
    }

    #[test]
    fn generated_image_is_opaque_center_transparent_corners() {
        let image = glow_image(32, STOPS);
        let data = image.data.as_ref().expect("cpu-side image data");
        // Center pixel (16, 16), RGBA8.
        let center = ((16 * 32 + 16) * 4) as usize;
        assert!(data[center + 3] > 200, "center should be nearly opaque");
        // Corner pixel (0, 0) lies outside the disc.
        assert_eq!(data[3], 0, "corner should be transparent");
    }
}

//! The post detail modal.
//!
//! Draws the open post's title, text, and image. Decoded pixels are
//! registered as an egui texture the first frame they are available and
//! released when the view closes. Posts without an image get no image
//! area at all.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, EguiTextureHandle, egui};

use crate::interaction::{DetailImage, DetailView};

use super::theme::colors;

const MAX_CONTENT_WIDTH: f32 = 420.0;

pub struct DetailUiPlugin;

impl Plugin for DetailUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, draw_detail);
    }
}

fn draw_detail(
    mut contexts: EguiContexts,
    mut detail: ResMut<DetailView>,
    mut images: ResMut<Assets<Image>>,
) -> Result {
    // Closed: release the egui texture registered for the previous post.
    if detail.post.is_none() {
        if let DetailImage::Ready { handle, .. } = &detail.image {
            contexts.remove_image(handle);
        }
        detail.image = DetailImage::None;
        return Ok(());
    }

    // Promote freshly decoded pixels into an egui-visible texture.
    if let DetailImage::Decoded(decoded) = &detail.image {
        let image = Image::new(
            Extent3d {
                width: decoded.width,
                height: decoded.height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            decoded.rgba.clone(),
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
        );
        let handle = images.add(image);
        let id = contexts.add_image(EguiTextureHandle::Strong(handle.clone()));
        let size = Vec2::new(decoded.width as f32, decoded.height as f32);
        detail.image = DetailImage::Ready { handle, id, size };
    }

    let ctx = contexts.ctx_mut()?.clone();
    let Some(post) = detail.post.clone() else {
        return Ok(());
    };

    let mut still_open = true;
    egui::Window::new(egui::RichText::new(post.title.clone()).color(colors::ACCENT))
        .id(egui::Id::new("detail_view"))
        .open(&mut still_open)
        .collapsible(false)
        .resizable(false)
        .max_width(MAX_CONTENT_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(&ctx, |ui| {
            match &detail.image {
                DetailImage::Ready { id, size, .. } => {
                    let width = ui.available_width().min(MAX_CONTENT_WIDTH);
                    let scale = width / size.x.max(1.0);
                    ui.image(egui::load::SizedTexture::new(*id, [width, size.y * scale]));
                    ui.add_space(8.0);
                }
                DetailImage::Loading(_) => {
                    ui.spinner();
                    ui.add_space(8.0);
                }
                // No image, or the decode failed: no image area at all.
                _ => {}
            }
            ui.label(egui::RichText::new(post.text.clone()).color(colors::TEXT_PRIMARY));
        });

    // Backdrop click: a press outside every UI surface closes the view
    // (clicks on the window content stay inside it). The opening click is
    // exempt for one frame.
    if detail.just_opened {
        detail.just_opened = false;
    } else if ctx.input(|i| i.pointer.any_pressed()) && !ctx.is_pointer_over_area() {
        still_open = false;
    }
    if !still_open {
        detail.close();
    }
    Ok(())
}

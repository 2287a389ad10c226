//! Detail view state: which post is open and its image, if any.
//!
//! Opening a post with an image kicks off an async decode (embedded data
//! URLs) or fetch-and-decode (remote URLs); the modal shows a spinner
//! until pixels arrive and omits the image area entirely on failure.

use std::time::Duration;

use bevy::prelude::*;
use bevy::tasks::futures_lite::future;
use bevy::tasks::{AsyncComputeTaskPool, IoTaskPool, Task};
use bevy_egui::EguiContexts;
use bevy_egui::egui;

use crate::encode::{self, DecodedImage};
use crate::field::StarField;
use crate::post::Post;

use super::hover::HoveredStar;

const IMAGE_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Image slot of the open detail view.
#[derive(Default)]
pub enum DetailImage {
    /// Post has no image.
    #[default]
    None,
    Loading(Task<Result<DecodedImage, String>>),
    /// Pixels arrived; not yet registered with the renderer.
    Decoded(DecodedImage),
    /// Registered as an egui texture and ready to draw.
    Ready {
        handle: Handle<Image>,
        id: egui::TextureId,
        size: Vec2,
    },
    Failed,
}

/// The open post detail modal. `post == None` means closed.
#[derive(Resource, Default)]
pub struct DetailView {
    pub post: Option<Post>,
    pub image: DetailImage,
    /// True until the first frame after opening, so the click that opened
    /// the view is not also read as a backdrop click.
    pub just_opened: bool,
}

impl DetailView {
    pub fn is_open(&self) -> bool {
        self.post.is_some()
    }

    pub fn open(&mut self, post: Post) {
        self.image = match post.image.as_deref() {
            None => DetailImage::None,
            Some(source) => DetailImage::Loading(spawn_decode(source.to_string())),
        };
        self.post = Some(post);
        self.just_opened = true;
    }

    /// Close the view. The image slot is left for the UI to release, so
    /// any registered egui texture is removed before it is dropped.
    pub fn close(&mut self) {
        self.post = None;
    }
}

fn spawn_decode(source: String) -> Task<Result<DecodedImage, String>> {
    if source.starts_with("data:") {
        AsyncComputeTaskPool::get()
            .spawn(async move { encode::decode_data_url(&source).map_err(|err| err.to_string()) })
    } else {
        IoTaskPool::get().spawn(async move { fetch_and_decode(&source) })
    }
}

fn fetch_and_decode(url: &str) -> Result<DecodedImage, String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(IMAGE_FETCH_TIMEOUT)
        .build()
        .map_err(|err| err.to_string())?;
    let response = client.get(url).send().map_err(|err| err.to_string())?;
    if !response.status().is_success() {
        return Err(format!("image fetch failed ({})", response.status()));
    }
    let bytes = response.bytes().map_err(|err| err.to_string())?;
    encode::decode_bytes(&bytes).map_err(|err| err.to_string())
}

/// Open the detail view for the hovered star on click. Clicks the UI
/// claims (the sheet, an open modal) never reach the field.
pub(super) fn open_on_click(
    buttons: Res<ButtonInput<MouseButton>>,
    mut contexts: EguiContexts,
    hovered: Res<HoveredStar>,
    field: Res<StarField>,
    mut detail: ResMut<DetailView>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
            return;
        }
    }
    let Some(index) = hovered.0 else {
        return;
    };
    let Some(star) = field.particles().get(index) else {
        return;
    };
    detail.open(star.post.clone());
}

/// Resolve the pending image decode, if one is in flight.
pub(super) fn poll_detail_image(mut detail: ResMut<DetailView>) {
    let DetailImage::Loading(task) = &mut detail.image else {
        return;
    };
    let Some(result) = future::block_on(future::poll_once(task)) else {
        return;
    };
    detail.image = match result {
        Ok(decoded) => DetailImage::Decoded(decoded),
        Err(err) => {
            warn!("Detail image unavailable: {err}");
            DetailImage::Failed
        }
    };
}

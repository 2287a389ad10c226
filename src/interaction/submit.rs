//! The add-post submit flow.
//!
//! A state machine with one submission in flight at most:
//! `Idle → (validate) → Encoding → Persisting → Idle`. Validation happens
//! synchronously at submit time; encoding and persistence run as tasks so
//! the frame loop never waits on them. Every completion path returns to
//! `Idle`, which is what re-enables the submit control.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy::tasks::futures_lite::future;
use bevy::tasks::{AsyncComputeTaskPool, IoTaskPool, Task};

use crate::encode::{self, EncodeError};
use crate::field::{SpawnStarEvent, StarField};
use crate::post::{NewPost, Post};
use crate::store::{ActiveStore, PostSet, StoreError};
use crate::ui::{SheetState, Toast};

/// Fired by the sheet's submit button.
#[derive(Message)]
pub struct SubmitPostEvent;

/// Validated form contents, captured when the submission begins.
#[derive(Clone, Debug)]
pub struct Draft {
    pub title: String,
    pub text: String,
    pub image_path: Option<PathBuf>,
    pub position: Vec2,
}

/// Submit state machine.
#[derive(Resource, Default)]
pub enum SubmitFlow {
    #[default]
    Idle,
    Encoding {
        task: Task<Result<String, EncodeError>>,
        draft: Draft,
    },
    Persisting {
        task: Task<Result<Post, StoreError>>,
    },
}

impl SubmitFlow {
    pub fn is_idle(&self) -> bool {
        matches!(self, SubmitFlow::Idle)
    }
}

/// Field-level validation, checked in the order the form shows them.
/// The store is never called when this fails.
pub fn validate(
    title: &str,
    text: &str,
    has_image: bool,
    image_required: bool,
) -> Result<(), &'static str> {
    if title.trim().is_empty() {
        return Err("Please enter a title");
    }
    if text.trim().is_empty() {
        return Err("Please enter some text");
    }
    if image_required && !has_image {
        return Err("Please choose an image");
    }
    Ok(())
}

pub(super) fn begin_submit(
    mut events: MessageReader<SubmitPostEvent>,
    mut flow: ResMut<SubmitFlow>,
    sheet: Res<SheetState>,
    store: Res<ActiveStore>,
    field: Res<StarField>,
    mut toast: ResMut<Toast>,
) {
    for _ in events.read() {
        if !flow.is_idle() {
            continue;
        }

        let has_image = !sheet.image_path.trim().is_empty();
        if let Err(message) = validate(
            &sheet.title,
            &sheet.text,
            has_image,
            store.0.requires_image(),
        ) {
            toast.warning(message);
            continue;
        }

        let draft = Draft {
            title: sheet.title.trim().to_string(),
            text: sheet.text.trim().to_string(),
            image_path: has_image.then(|| PathBuf::from(sheet.image_path.trim())),
            position: field.random_interior_point(),
        };

        *flow = match draft.image_path.clone() {
            Some(path) => {
                let task =
                    AsyncComputeTaskPool::get().spawn(async move { encode::encode_file(&path) });
                SubmitFlow::Encoding { task, draft }
            }
            None => SubmitFlow::Persisting {
                task: spawn_persist(&store, draft, None),
            },
        };
    }
}

fn spawn_persist(
    store: &ActiveStore,
    draft: Draft,
    image: Option<String>,
) -> Task<Result<Post, StoreError>> {
    let store = store.0.clone();
    let new_post = NewPost {
        title: draft.title,
        text: draft.text,
        image,
        position: Some(draft.position),
    };
    IoTaskPool::get().spawn(async move { store.add(new_post) })
}

pub(super) fn poll_encode(
    mut flow: ResMut<SubmitFlow>,
    store: Res<ActiveStore>,
    mut toast: ResMut<Toast>,
) {
    let SubmitFlow::Encoding { task, draft } = &mut *flow else {
        return;
    };
    let Some(result) = future::block_on(future::poll_once(task)) else {
        return;
    };

    match result {
        Ok(data_url) => {
            let draft = draft.clone();
            *flow = SubmitFlow::Persisting {
                task: spawn_persist(&store, draft, Some(data_url)),
            };
        }
        Err(err) => {
            warn!("Image encoding failed: {err}");
            toast.error(format!("Could not process the image: {err}"));
            *flow = SubmitFlow::Idle;
        }
    }
}

pub(super) fn poll_persist(
    mut flow: ResMut<SubmitFlow>,
    mut posts: ResMut<PostSet>,
    mut sheet: ResMut<SheetState>,
    mut spawns: MessageWriter<SpawnStarEvent>,
    mut toast: ResMut<Toast>,
) {
    let SubmitFlow::Persisting { task } = &mut *flow else {
        return;
    };
    let Some(result) = future::block_on(future::poll_once(task)) else {
        return;
    };
    // Back to Idle on success and failure alike; the submit control must
    // always come back.
    *flow = SubmitFlow::Idle;

    match result {
        Ok(post) => {
            info!("Post published: {}", post.title);
            posts.0.push(post.clone());
            spawns.write(SpawnStarEvent { post });
            sheet.reset();
            sheet.open = false;
            toast.success("Published! ✨");
        }
        Err(err) => {
            warn!("Failed to save post: {err}");
            let message = match err {
                StoreError::Unconfigured => {
                    "Backend not configured; the post was not saved".to_string()
                }
                other => format!("Could not save the post: {other}"),
            };
            toast.error(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_is_rejected_first() {
        assert_eq!(validate("", "", false, false), Err("Please enter a title"));
        assert_eq!(
            validate("   ", "body", true, true),
            Err("Please enter a title")
        );
    }

    #[test]
    fn empty_text_is_rejected_after_title() {
        assert_eq!(
            validate("title", "  \n", true, false),
            Err("Please enter some text")
        );
    }

    #[test]
    fn image_policy_is_enforced_per_backend() {
        // Hosted: image optional.
        assert_eq!(validate("title", "body", false, false), Ok(()));
        // Local: image required.
        assert_eq!(
            validate("title", "body", false, true),
            Err("Please choose an image")
        );
        assert_eq!(validate("title", "body", true, true), Ok(()));
    }
}

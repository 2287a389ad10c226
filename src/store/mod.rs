//! Post persistence: one capability contract, two interchangeable backends.
//!
//! The page used to exist twice, once wired to a hosted records API and
//! once to browser-local storage. Here a single [`PostStore`] trait covers
//! both; everything above it (field, interaction, UI) is backend-agnostic.

mod local;
mod remote;

pub use local::LocalStore;
pub use remote::RemoteStore;

use std::env;
use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::futures_lite::future;
use bevy::tasks::{IoTaskPool, Task};
use thiserror::Error;

use crate::field::RebuildFieldEvent;
use crate::post::{NewPost, Post};
use crate::ui::Toast;

/// Forces a backend regardless of credential presence.
pub const BACKEND_VAR: &str = "STARFIELD_BACKEND";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend not configured; set {url} and {key}", url = remote::URL_VAR, key = remote::KEY_VAR)]
    Unconfigured,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend rejected the request ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("local storage failure: {0}")]
    Storage(String),
    #[error("malformed record data: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Which backend family a store belongs to. Drives the paired theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    Hosted,
    Local,
}

impl BackendKind {
    pub fn label(self) -> &'static str {
        match self {
            BackendKind::Hosted => "hosted",
            BackendKind::Local => "local",
        }
    }
}

/// Persistence contract shared by both backends. Methods block and are
/// meant to run on a task pool, never on the render thread.
pub trait PostStore: Send + Sync {
    /// Every stored post, in display order (the hosted backend returns
    /// newest first).
    fn load(&self) -> Result<Vec<Post>, StoreError>;

    /// Persist one new post and return the stored record with id and
    /// timestamp assigned.
    fn add(&self, post: NewPost) -> Result<Post, StoreError>;

    /// Whether submissions must carry an image.
    fn requires_image(&self) -> bool;

    fn kind(&self) -> BackendKind;
}

/// The backend selected at startup.
#[derive(Resource, Clone)]
pub struct ActiveStore(pub Arc<dyn PostStore>);

/// The in-memory working set; append-only after the initial load.
#[derive(Resource, Default)]
pub struct PostSet(pub Vec<Post>);

/// The one in-flight initial load, if still pending.
#[derive(Resource, Default)]
struct PendingLoad(Option<Task<Result<Vec<Post>, StoreError>>>);

/// Pick the backend: an explicit `STARFIELD_BACKEND` override wins;
/// otherwise hosted when credentials are present, local when not.
pub fn select_backend() -> Arc<dyn PostStore> {
    match env::var(BACKEND_VAR).as_deref() {
        Ok("remote") | Ok("hosted") => Arc::new(RemoteStore::from_env()),
        Ok("local") => Arc::new(LocalStore::at_default_path()),
        _ => {
            let remote = RemoteStore::from_env();
            if remote.is_configured() {
                Arc::new(remote)
            } else {
                Arc::new(LocalStore::at_default_path())
            }
        }
    }
}

pub struct StorePlugin;

impl Plugin for StorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PostSet>()
            .init_resource::<PendingLoad>()
            .add_systems(Startup, begin_initial_load)
            .add_systems(Update, poll_initial_load);
    }
}

fn begin_initial_load(store: Res<ActiveStore>, mut pending: ResMut<PendingLoad>) {
    let store = store.0.clone();
    info!("Loading posts from the {} store...", store.kind().label());
    pending.0 = Some(IoTaskPool::get().spawn(async move { store.load() }));
}

fn poll_initial_load(
    mut pending: ResMut<PendingLoad>,
    mut posts: ResMut<PostSet>,
    mut rebuilds: MessageWriter<RebuildFieldEvent>,
    mut toast: ResMut<Toast>,
) {
    let Some(task) = pending.0.as_mut() else {
        return;
    };
    let Some(result) = future::block_on(future::poll_once(task)) else {
        return;
    };
    pending.0 = None;

    match result {
        Ok(loaded) => {
            info!("Loaded {} posts", loaded.len());
            posts.0 = loaded;
        }
        Err(err) => {
            // Start with an empty field; the page stays interactive.
            warn!("Failed to load posts: {err}");
            toast.error("Could not load existing stars");
            posts.0.clear();
        }
    }
    rebuilds.write(RebuildFieldEvent);
}

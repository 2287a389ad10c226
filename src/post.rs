//! Domain model for user submissions.

use bevy::prelude::*;
use chrono::{DateTime, Utc};

/// One user-submitted post, projected onto the field as a star.
///
/// Posts are immutable once stored; the store that created a post owns
/// its `id` format and timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub text: String,
    /// Embedded JPEG data URL or a remote URL. `None` means no image.
    pub image: Option<String>,
    /// World position at creation time. Backends that do not persist
    /// positions return `None` and the star is placed randomly on load.
    pub position: Option<Vec2>,
    pub created_at: DateTime<Utc>,
}

/// A post as submitted, before the store has assigned id and timestamp.
#[derive(Clone, Debug)]
pub struct NewPost {
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub position: Option<Vec2>,
}

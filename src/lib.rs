//! # Starfield
//!
//! An interactive animated starfield: every user-submitted post is a
//! glowing, drifting, twinkling star. Click a star to read its post; add
//! your own through the sheet. Posts persist to a hosted records API when
//! credentials are configured, or to a local blob otherwise.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bevy::prelude::*;
//! use starfield::StarfieldPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(StarfieldPlugin)
//!         .run();
//! }
//! ```
//!
//! ## Backends
//!
//! - **Hosted**: set `STARFIELD_API_URL` and `STARFIELD_API_KEY` (a
//!   `.env` file works). Posts keep their positions across reloads and
//!   images are optional.
//! - **Local**: no configuration; posts live in a JSON blob under the
//!   platform data directory, images are required, and star positions are
//!   re-randomized on every launch.
//!
//! `STARFIELD_BACKEND=remote|local` forces a backend.

pub mod constants;
pub mod encode;
pub mod field;
pub mod interaction;
pub mod post;
pub mod store;
pub mod surface;
pub mod theme;
pub mod ui;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

// Re-export the main plugin's collaborators
pub use field::{StarField, StarMode, StarParticle};
pub use post::{NewPost, Post};
pub use store::{ActiveStore, BackendKind, LocalStore, PostStore, RemoteStore, StoreError};
pub use theme::FieldTheme;

/// Bundles the whole page: surface, field, store, interaction, and UI.
pub struct StarfieldPlugin;

impl Plugin for StarfieldPlugin {
    fn build(&self, app: &mut App) {
        let store = store::select_backend();
        let kind = store.kind();
        info!("Using the {} post store", kind.label());

        app.insert_resource(FieldTheme::for_backend(kind))
            .insert_resource(ActiveStore(store))
            .add_plugins(EguiPlugin::default())
            .add_plugins(surface::SurfacePlugin)
            .add_plugins(field::FieldPlugin)
            .add_plugins(store::StorePlugin)
            .add_plugins(interaction::InteractionPlugin)
            .add_plugins(ui::UiPlugin);
    }
}

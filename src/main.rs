//! Standalone starfield binary.

use bevy::prelude::*;
use starfield::StarfieldPlugin;

fn main() {
    // Credentials for the hosted backend may live in a .env file.
    dotenvy::dotenv().ok();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Starfield".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(StarfieldPlugin)
        .run();
}

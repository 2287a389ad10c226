//! egui overlays: the add-post sheet, the detail modal, toasts, theming.

mod detail;
mod sheet;
mod theme;
mod toast;

pub use sheet::SheetState;
pub use theme::colors;
pub use toast::{Toast, ToastKind};

use bevy::prelude::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(theme::ThemePlugin)
            .add_plugins(toast::ToastPlugin)
            .add_plugins(sheet::SheetPlugin)
            .add_plugins(detail::DetailUiPlugin);
    }
}

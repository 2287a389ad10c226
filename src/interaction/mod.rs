//! Pointer and form events translated into field and store operations.

mod detail;
mod hover;
mod submit;

pub use detail::{DetailImage, DetailView};
pub use hover::HoveredStar;
pub use submit::{Draft, SubmitFlow, SubmitPostEvent, validate};

use bevy::prelude::*;

use crate::ui::SheetState;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoveredStar>()
            .init_resource::<DetailView>()
            .init_resource::<SubmitFlow>()
            .add_message::<SubmitPostEvent>()
            .add_systems(
                Update,
                (
                    hover::track_hover,
                    detail::open_on_click.after(hover::track_hover),
                    detail::poll_detail_image,
                    submit::begin_submit,
                    submit::poll_encode,
                    submit::poll_persist,
                    close_on_escape,
                ),
            );
    }
}

/// Escape closes the detail view and the add-post sheet together.
fn close_on_escape(
    keys: Res<ButtonInput<KeyCode>>,
    mut detail: ResMut<DetailView>,
    mut sheet: ResMut<SheetState>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        close_overlays(&mut detail, &mut sheet);
    }
}

pub(crate) fn close_overlays(detail: &mut DetailView, sheet: &mut SheetState) {
    detail.close();
    sheet.open = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::Post;
    use chrono::Utc;

    #[test]
    fn escape_path_closes_both_overlays() {
        let mut detail = DetailView::default();
        detail.open(Post {
            id: "p".to_string(),
            title: "t".to_string(),
            text: "x".to_string(),
            image: None,
            position: None,
            created_at: Utc::now(),
        });
        let mut sheet = SheetState {
            open: true,
            ..Default::default()
        };

        close_overlays(&mut detail, &mut sheet);
        assert!(!detail.is_open());
        assert!(!sheet.open);
    }
}
